//! Paint output: the positioned words handed to a renderer.

/// Placed items and viewport filtering.
pub mod display_list;

pub use display_list::{DisplayList, PlacedItem};
