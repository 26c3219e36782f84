//! Element type, mean and layout adapters around the pipeline.

use super::Transform;
use crate::{common::*, imgproc, Image, Sample};
use num_traits::AsPrimitive;

/// Casts an integer image to the `f32` pixel type, keeping values as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ConvertFromInts;

impl ConvertFromInts {
    pub fn forward<A>(&self, image: ArrayView3<A>) -> Image
    where
        A: AsPrimitive<f32>,
    {
        image.mapv(|value| value.as_())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtractMeansInit {
    pub mean: [R64; 3],
}

impl Default for SubtractMeansInit {
    fn default() -> Self {
        Self {
            mean: [r64(104.0), r64(117.0), r64(123.0)],
        }
    }
}

impl SubtractMeansInit {
    pub fn build(self) -> Result<SubtractMeans> {
        Ok(SubtractMeans {
            mean: self.mean.map(|value| value.raw() as f32),
        })
    }
}

/// Subtracts a per-channel mean from every pixel.
#[derive(Debug, Clone)]
pub struct SubtractMeans {
    mean: [f32; 3],
}

impl Transform for SubtractMeans {
    fn apply(&self, mut sample: Sample, _rng: &mut dyn RngCore) -> Result<Sample> {
        sample.image -= &arr1(&self.mean);
        Ok(sample)
    }
}

/// Converts an (H, W, C) image into a (C, H, W) tensor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ToTensor;

impl ToTensor {
    pub fn forward(&self, image: ArrayView3<f32>) -> Array3<f32> {
        imgproc::to_channel_first(image)
    }
}

/// Converts a (C, H, W) tensor back into an (H, W, C) image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ToCv2Image;

impl ToCv2Image {
    pub fn forward(&self, tensor: ArrayView3<f32>) -> Image {
        imgproc::to_row_major(tensor)
    }
}
