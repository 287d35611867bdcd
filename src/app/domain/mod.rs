//! Domain layer - transient UI state and configuration.
//!
//! This module contains the plain data the controllers operate on:
//! - Theme preference and menu state
//! - Section geometry for active-link tracking
//! - The typewriter state machine
//! - Settings and the event type dispatched by the coordinator

pub mod menu;
pub mod messages;
pub mod section;
pub mod settings;
pub mod theme;
pub mod typewriter;

pub use menu::MenuState;
pub use messages::{EventResponse, UiEvent};
pub use section::{SectionBounds, find_active};
pub use settings::UiSettings;
pub use theme::ThemePreference;
pub use typewriter::{Typewriter, TypewriterPhase, TypewriterState, TypewriterTimings};
