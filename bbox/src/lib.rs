//! Axis-aligned bounding box types, coordinate maps and overlap measures.

mod common;

pub use affine::*;
pub mod affine;

pub use boxes::*;
pub mod boxes;

pub use error::*;
pub mod error;

pub use overlap::*;
pub mod overlap;

pub use rect::*;
pub mod rect;

pub use xyxy::*;
pub mod xyxy;

pub mod prelude {
    pub use crate::rect::{Rect, RectFloat, RectNum};
}
