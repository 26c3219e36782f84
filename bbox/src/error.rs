use thiserror::Error;

/// A box array whose shape is not `(N, 4)` or a single box not shaped `(4,)` or `(1, 4)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("invalid box shape {shape:?}: {reason}")]
pub struct ShapeError {
    pub shape: Vec<usize>,
    pub reason: &'static str,
}

impl ShapeError {
    pub fn new(shape: &[usize], reason: &'static str) -> Self {
        Self {
            shape: shape.to_vec(),
            reason,
        }
    }
}
