/// Every page event the coordinator reacts to.
/// Each DOM listener sends one of these; `UiStateCoordinator::handle` dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent<E> {
    // Theme
    ThemeToggleClicked,

    // Navigation
    HamburgerClicked,
    LinkClicked(E),
    DocumentClicked(E),

    // Viewport
    Scrolled,
    Resized,
    VisibilityChanged { hidden: bool },

    // Calls to action
    DownloadClicked,
    ContactClicked(E),
}

/// Whether the browser's default action for the event should still run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventResponse {
    #[default]
    Default,
    PreventDefault,
}
