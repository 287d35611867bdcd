//! Behavior layer for a single-page portfolio site.
//!
//! The page logic lives in [`app`] and talks to the browser only through
//! the collaborator traits in `app::infrastructure`, so every behavior runs
//! against the in-memory document in tests. The `web` feature adds the
//! browser bindings and a `mount` entry point for wasm builds.

pub mod app;

#[cfg(feature = "web")]
pub mod web;

pub use app::{Collaborators, UiError, UiSettings, UiStateCoordinator};
