use crate::{common::*, Sample};

/// A step of an augmentation pipeline.
///
/// A transform takes the whole sample and returns it with image, boxes and
/// labels updated together. Implementations hold configuration only. Every
/// random draw comes from `rng`, so the same generator state always
/// reproduces the same output.
pub trait Transform: Debug + Send + Sync {
    fn apply(&self, sample: Sample, rng: &mut dyn RngCore) -> Result<Sample>;

    /// A readable name used in logs and error contexts.
    fn name(&self) -> &'static str {
        let name = std::any::type_name::<Self>();
        name.rsplit("::").next().unwrap_or(name)
    }
}

impl<T> Transform for Box<T>
where
    T: Transform + ?Sized,
{
    fn apply(&self, sample: Sample, rng: &mut dyn RngCore) -> Result<Sample> {
        (**self).apply(sample, rng)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Wraps a closure as a transform.
pub struct Lambda<F> {
    func: F,
}

impl<F> Lambda<F>
where
    F: Fn(Sample, &mut dyn RngCore) -> Result<Sample> + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Debug for Lambda<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lambda").finish_non_exhaustive()
    }
}

impl<F> Transform for Lambda<F>
where
    F: Fn(Sample, &mut dyn RngCore) -> Result<Sample> + Send + Sync,
{
    fn apply(&self, sample: Sample, rng: &mut dyn RngCore) -> Result<Sample> {
        (self.func)(sample, rng)
    }

    fn name(&self) -> &'static str {
        "Lambda"
    }
}
