//! Probability values checked to lie within [0, 1].

use crate::{common::*, AugmentError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Ratio(R64);

impl Ratio {
    pub fn zero() -> Self {
        Self(r64(0.0))
    }

    pub fn half() -> Self {
        Self(r64(0.5))
    }

    pub fn one() -> Self {
        Self(r64(1.0))
    }

    pub fn to_f64(&self) -> f64 {
        self.0.raw()
    }

    /// Draw a Bernoulli trial that succeeds with this probability.
    pub fn sample<R>(&self, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        rng.gen_bool(self.to_f64())
    }
}

impl Serialize for Ratio {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Ratio {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Self::try_from(value).map_err(|err| D::Error::custom(format!("{:#}", err)))
    }
}

impl PartialEq<f64> for Ratio {
    fn eq(&self, other: &f64) -> bool {
        self.0.raw() == *other
    }
}

impl AbsDiffEq<f64> for Ratio {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &f64, epsilon: Self::Epsilon) -> bool {
        self.0.raw().abs_diff_eq(other, epsilon)
    }
}

impl TryFrom<R64> for Ratio {
    type Error = Error;

    fn try_from(value: R64) -> Result<Self, Self::Error> {
        ensure!(
            ((0.0 - f64::default_epsilon())..=(1.0 + f64::default_epsilon()))
                .contains(&value.raw()),
            AugmentError::invalid_config(format!(
                "ratio value must be within range [0.0, 1.0], but get {}",
                value
            ))
        );
        Ok(Self(r64(value.raw().clamp(0.0, 1.0))))
    }
}

impl TryFrom<f64> for Ratio {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let value = R64::try_new(value)
            .ok_or_else(|| AugmentError::invalid_config("ratio must be a finite value"))?;
        Self::try_from(value)
    }
}

impl From<Ratio> for f64 {
    fn from(ratio: Ratio) -> Self {
        ratio.0.raw()
    }
}
