//! Infrastructure layer - the collaborators the page provides.
//!
//! This module contains the seams between the behavior layer and its host:
//! - The DOM abstraction and its in-memory implementation
//! - Preference storage (memory, JSON file)
//! - Timer / animation-frame scheduling
//! - Viewport visibility notifications
//! - Error types

pub mod dom;
pub mod error;
pub mod memory;
pub mod scheduler;
pub mod storage;
pub mod visibility;
