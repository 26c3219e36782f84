//! Data augmentation building blocks.

pub mod compose;
pub mod coords;
pub mod expand;
pub mod format;
pub mod mirror;
pub mod photometric;
pub mod photometric_distort;
pub mod presets;
pub mod resize;
pub mod sample_crop;
pub mod transform;

pub use compose::*;
pub use coords::*;
pub use expand::*;
pub use format::*;
pub use mirror::*;
pub use photometric::*;
pub use photometric_distort::*;
pub use presets::*;
pub use resize::*;
pub use sample_crop::*;
pub use transform::*;
