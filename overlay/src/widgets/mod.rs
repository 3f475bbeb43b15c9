//! Reusable UI widgets for overlays
//!
//! Each widget renders to an `OverlayFrame`.

pub mod colors;
mod spell_button;

pub use colors::*;
pub use spell_button::SpellButton;
