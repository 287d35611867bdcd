use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewriterPhase {
    Typing,
    /// Whole string on screen, waiting before deletion starts.
    Pausing,
    Deleting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterTimings {
    pub type_speed: Duration,
    pub delete_speed: Duration,
    pub pause_time: Duration,
}

impl Default for TypewriterTimings {
    fn default() -> Self {
        Self {
            type_speed: Duration::from_millis(100),
            delete_speed: Duration::from_millis(50),
            pause_time: Duration::from_millis(2000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypewriterState {
    pub text_index: usize,
    pub char_count: usize,
    pub deleting: bool,
}

/// What to render after a tick and how long to wait before the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub text: String,
    pub delay: Duration,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    // Stored as chars so counting and slicing never split a code point
    texts: Vec<Vec<char>>,
    timings: TypewriterTimings,
    state: TypewriterState,
}

impl Typewriter {
    /// Empty strings are dropped; returns None when nothing is left to type.
    pub fn new<I, S>(texts: I, timings: TypewriterTimings) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let texts: Vec<Vec<char>> = texts
            .into_iter()
            .map(|s| s.as_ref().chars().collect::<Vec<_>>())
            .filter(|chars| !chars.is_empty())
            .collect();
        if texts.is_empty() {
            return None;
        }
        Some(Self {
            texts,
            timings,
            state: TypewriterState::default(),
        })
    }

    pub fn state(&self) -> TypewriterState {
        self.state
    }

    pub fn phase(&self) -> TypewriterPhase {
        if !self.state.deleting {
            TypewriterPhase::Typing
        } else if self.state.char_count == self.current().len() {
            TypewriterPhase::Pausing
        } else {
            TypewriterPhase::Deleting
        }
    }

    fn current(&self) -> &[char] {
        &self.texts[self.state.text_index]
    }

    /// Advance one character forward or backward.
    pub fn tick(&mut self) -> Tick {
        let len = self.current().len();

        if self.state.deleting {
            self.state.char_count = self.state.char_count.saturating_sub(1);
        } else {
            self.state.char_count = (self.state.char_count + 1).min(len);
        }

        let text: String = self.current()[..self.state.char_count].iter().collect();
        let mut delay = if self.state.deleting {
            self.timings.delete_speed
        } else {
            self.timings.type_speed
        };

        if !self.state.deleting && self.state.char_count == len {
            delay = self.timings.pause_time;
            self.state.deleting = true;
        } else if self.state.deleting && self.state.char_count == 0 {
            self.state.deleting = false;
            self.state.text_index = (self.state.text_index + 1) % self.texts.len();
        }

        Tick { text, delay }
    }
}
