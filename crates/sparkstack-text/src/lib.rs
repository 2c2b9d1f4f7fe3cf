#![forbid(unsafe_code)]

//! Text measurement and truncation.
//!
//! All widths are terminal display widths (cells), measured per grapheme
//! cluster so emoji and combining sequences are never split.

pub mod truncate;

pub use truncate::{ELLIPSIS, display_width, truncate_to_width, truncate_with_ellipsis};
