//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Plain UI state (ThemePreference, MenuState, Typewriter, Settings, UiEvent)
//! - `controllers/` - One reactive object per behavior (ThemeManager, ScrollTracker, etc.)
//! - `services/` - Page conveniences (lazy images, download toast, contact tracking)
//! - `infrastructure/` - Host collaborators (DOM, storage, scheduler, visibility, error)
//! - `state.rs` - Main UI coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use controllers::{
    NavigationController, RevealAnimator, ScrollTracker, SmoothScroller, ThemeManager, TypewriterTask,
};
pub use domain::{EventResponse, MenuState, ThemePreference, Typewriter, UiEvent, UiSettings};
pub use infrastructure::dom::Dom;
pub use infrastructure::error::{Result, UiError};
pub use infrastructure::memory::{MemoryDocument, MemoryElement};
pub use infrastructure::scheduler::{ManualScheduler, Scheduler, TimerId};
pub use infrastructure::storage::{FileStore, MemoryStore, PreferenceStore};
pub use infrastructure::visibility::{MemoryVisibility, VisibilityWatcher, WatchDecision, WatchOptions};
pub use state::{Collaborators, UiStateCoordinator};
