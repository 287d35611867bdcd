//! Services layer - smaller page conveniences.
//!
//! This module contains behaviors that sit beside the core controllers:
//! - Lazy image loading
//! - The CV download toast
//! - Contact link classification

pub mod contact;
pub mod download_notice;
pub mod lazy_images;

pub use contact::{ContactKind, ContactTracker};
pub use download_notice::DownloadNotice;
pub use lazy_images::LazyImageLoader;
