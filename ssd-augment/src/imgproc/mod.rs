//! Pixel-level primitives the transforms are built on.

pub mod color;
pub mod layout;
pub mod resize;

pub use color::*;
pub use layout::*;
pub use resize::*;
