pub mod formatting;
pub mod geometry;

pub use geometry::{Point, Rect};
