//! Controllers layer - one reactive object per page behavior.
//!
//! Each controller owns its slice of UI state and exposes explicit
//! handler methods; none of them calls another:
//! - Theme switching and restore
//! - Mobile navigation menu
//! - Scroll tracking (active link, navbar backdrop, parallax)
//! - Reveal-on-scroll animations
//! - Typewriter loop
//! - Smooth in-page scrolling

pub mod navigation;
pub mod reveal;
pub mod scroll;
pub mod smooth_scroll;
pub mod theme;
pub mod typewriter;

pub use navigation::NavigationController;
pub use reveal::RevealAnimator;
pub use scroll::ScrollTracker;
pub use smooth_scroll::SmoothScroller;
pub use theme::ThemeManager;
pub use typewriter::TypewriterTask;
