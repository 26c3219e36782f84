pub use anyhow::{bail, ensure, Context as _, Error, Result};
pub use approx::AbsDiffEq;
pub use bbox::{prelude::*, Affine, XyXy};
pub use itertools::Itertools as _;
pub use log::{debug, trace, warn};
pub use ndarray::{arr1, s, Array2, Array3, ArrayD, ArrayView3, Axis, Ix2};
pub use noisy_float::prelude::*;
pub use rand::prelude::*;
pub use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
pub use std::{fmt, fmt::Debug, path::Path};
