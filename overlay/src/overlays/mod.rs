//! Complete overlay implementations
//!
//! Each overlay is a self-contained window built on [`crate::frame::OverlayFrame`]
//! for chrome and the platform layer for window management.

mod spells;

pub use spells::{OverlayAction, SpellTrackerOverlay, WINDOW_WIDTH};
