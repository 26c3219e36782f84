pub use anyhow::{ensure, Result};
pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ArrayViewD, ArrayViewMut2, Axis, Ix1};
pub use num_traits::{Float, Num, Zero};
pub use std::ops::{Mul, Neg};
