//! Error kinds raised by the augmentation pipeline.
//!
//! Fallible functions return [anyhow::Result]. Errors listed here are raised
//! as [AugmentError] values and can be recovered with
//! `err.downcast_ref::<AugmentError>()`.

use crate::imgproc::ColorSpace;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AugmentError {
    #[error(transparent)]
    InvalidShape(#[from] bbox::ShapeError),
    #[error("unsupported color conversion from {from} to {to}")]
    UnsupportedConversion { from: ColorSpace, to: ColorSpace },
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl AugmentError {
    pub fn invalid_shape(shape: &[usize], reason: &'static str) -> Self {
        Self::InvalidShape(bbox::ShapeError::new(shape, reason))
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
