//! Ready-made pipelines for detector training and evaluation.

use super::{
    Compose, ExpandInit, PhotometricDistortInit, RandomMirrorInit, RandomSampleCropInit,
    ResizeInit, SubtractMeansInit, ToAbsoluteCoords, ToPercentCoords,
};
use crate::{common::*, ratio::Ratio};

fn default_size() -> usize {
    300
}

fn default_mean() -> [R64; 3] {
    [r64(104.0), r64(117.0), r64(123.0)]
}

/// The training pipeline.
///
/// Samples enter with percent boxes and leave resized to `size` x `size`
/// with percent boxes and mean-subtracted pixels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainAugmentationInit {
    pub size: usize,
    pub mean: [R64; 3],
    pub photometric_distort: PhotometricDistortInit,
    pub expand_prob: Ratio,
    pub expand_max_ratio: R64,
    pub sample_crop: RandomSampleCropInit,
    pub mirror: RandomMirrorInit,
}

impl Default for TrainAugmentationInit {
    fn default() -> Self {
        let expand = ExpandInit::default();
        Self {
            size: default_size(),
            mean: default_mean(),
            photometric_distort: Default::default(),
            expand_prob: expand.prob,
            expand_max_ratio: expand.max_ratio,
            sample_crop: Default::default(),
            mirror: Default::default(),
        }
    }
}

impl TrainAugmentationInit {
    pub fn new(size: usize, mean: [R64; 3]) -> Self {
        Self {
            size,
            mean,
            ..Default::default()
        }
    }

    pub fn build(self) -> Result<Compose> {
        let Self {
            size,
            mean,
            photometric_distort,
            expand_prob,
            expand_max_ratio,
            sample_crop,
            mirror,
        } = self;

        let expand = ExpandInit {
            mean,
            max_ratio: expand_max_ratio,
            prob: expand_prob,
        }
        .build()?;

        let pipeline = Compose::default()
            .then(ToAbsoluteCoords)
            .then(photometric_distort.build()?)
            .then(expand)
            .then(sample_crop.build()?)
            .then(mirror.build()?)
            .then(ToPercentCoords)
            .then(ResizeInit { size }.build()?)
            .then(SubtractMeansInit { mean }.build()?);
        debug!("built training pipeline with {} steps", pipeline.len());
        Ok(pipeline)
    }
}

/// The evaluation pipeline: resize then mean subtraction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalTransformInit {
    pub size: usize,
    pub mean: [R64; 3],
}

impl Default for EvalTransformInit {
    fn default() -> Self {
        Self {
            size: default_size(),
            mean: default_mean(),
        }
    }
}

impl EvalTransformInit {
    pub fn new(size: usize, mean: [R64; 3]) -> Self {
        Self { size, mean }
    }

    pub fn build(self) -> Result<Compose> {
        let Self { size, mean } = self;
        Ok(Compose::default()
            .then(ResizeInit { size }.build()?)
            .then(SubtractMeansInit { mean }.build()?))
    }
}
