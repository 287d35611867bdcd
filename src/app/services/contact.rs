#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Email,
    LinkedIn,
    GitHub,
    Other,
}

impl ContactKind {
    pub const ALL: [ContactKind; 4] = [Self::Email, Self::LinkedIn, Self::GitHub, Self::Other];

    fn index(self) -> usize {
        self as usize
    }

    pub fn from_href(href: &str) -> Self {
        if href.starts_with("mailto:") {
            Self::Email
        } else if href.contains("linkedin") {
            Self::LinkedIn
        } else if href.contains("github") {
            Self::GitHub
        } else {
            Self::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::LinkedIn => "LinkedIn",
            Self::GitHub => "GitHub",
            Self::Other => "Other",
        }
    }
}

/// Logs which contact channel a visitor picked and counts clicks per channel.
#[derive(Debug, Default)]
pub struct ContactTracker {
    counts: [usize; ContactKind::ALL.len()],
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, href: Option<&str>) -> ContactKind {
        let kind = href.map_or(ContactKind::Other, ContactKind::from_href);
        if kind != ContactKind::Other {
            log::info!("{} contact initiated", kind.as_str());
        }
        self.counts[kind.index()] += 1;
        kind
    }

    pub fn clicks(&self, kind: ContactKind) -> usize {
        self.counts[kind.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_hrefs() {
        assert_eq!(ContactKind::from_href("mailto:someone@example.com"), ContactKind::Email);
        assert_eq!(ContactKind::from_href("https://www.linkedin.com/in/someone"), ContactKind::LinkedIn);
        assert_eq!(ContactKind::from_href("https://github.com/someone"), ContactKind::GitHub);
        assert_eq!(ContactKind::from_href("tel:+34600000000"), ContactKind::Other);
    }

    #[test]
    fn test_record_without_href() {
        let mut tracker = ContactTracker::new();
        assert_eq!(tracker.record(None), ContactKind::Other);
        assert_eq!(tracker.record(Some("mailto:a@b.c")), ContactKind::Email);
        assert_eq!(tracker.record(Some("mailto:c@d.e")), ContactKind::Email);
        assert_eq!(tracker.clicks(ContactKind::Other), 1);
        assert_eq!(tracker.clicks(ContactKind::Email), 2);
        assert_eq!(tracker.clicks(ContactKind::GitHub), 0);
        assert_eq!(tracker.total(), 3);
    }
}
