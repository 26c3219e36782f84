//! Randomized image and bounding box augmentation for detection training data.
//!
//! Every transform receives a [Sample](sample::Sample), the image together
//! with its boxes and labels, and returns the updated triple. Geometric
//! transforms move boxes with the same coordinate map applied to the pixels,
//! so the ground truth stays aligned after each step. Randomness is drawn from
//! a caller-owned generator, which makes a pipeline reproducible under a fixed
//! seed and safe to share among data-loading workers.

mod common;
pub mod config;
pub mod error;
pub mod imgproc;
pub mod processor;
pub mod ratio;
pub mod sample;

pub use error::AugmentError;
pub use processor::{Compose, Transform};
pub use sample::{Boxes, Image, Labels, Sample};
