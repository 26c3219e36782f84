use super::Transform;
use crate::{common::*, Labels, Sample};

/// Runs a sequence of transforms, feeding each output into the next step.
#[derive(Debug, Default)]
pub struct Compose {
    transforms: Vec<Box<dyn Transform>>,
}

impl Compose {
    pub fn new(transforms: Vec<Box<dyn Transform>>) -> Self {
        Self { transforms }
    }

    /// Append a transform to the end of the sequence.
    pub fn then<T>(mut self, transform: T) -> Self
    where
        T: Transform + 'static,
    {
        self.transforms.push(Box::new(transform));
        self
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn transforms(&self) -> &[Box<dyn Transform>] {
        &self.transforms
    }

    /// Build a sample from loosely shaped input and run the pipeline on it.
    ///
    /// See [Sample::from_raw] for the accepted box shapes.
    pub fn process(
        &self,
        image: Array3<f32>,
        boxes: Option<ArrayD<f32>>,
        labels: Option<Labels>,
        rng: &mut dyn RngCore,
    ) -> Result<Sample> {
        let sample = Sample::from_raw(image, boxes, labels)?;
        self.apply(sample, rng)
    }
}

impl FromIterator<Box<dyn Transform>> for Compose {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Transform>>,
    {
        Self::new(iter.into_iter().collect())
    }
}

impl Transform for Compose {
    fn apply(&self, sample: Sample, rng: &mut dyn RngCore) -> Result<Sample> {
        sample.check()?;
        self.transforms
            .iter()
            .enumerate()
            .try_fold(sample, |sample, (index, transform)| {
                trace!("apply step {} {}", index, transform.name());
                transform.apply(sample, rng).with_context(|| {
                    format!("transform step {} ({}) failed", index, transform.name())
                })
            })
    }
}
