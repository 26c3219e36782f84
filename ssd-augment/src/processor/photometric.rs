//! Transforms that alter pixel values only. Boxes and labels pass through.

use super::Transform;
use crate::{
    common::*,
    imgproc::{self, ColorSpace},
    ratio::Ratio,
    sample::NUM_CHANNELS,
    AugmentError, Sample,
};

/// All orderings of three channels.
pub const CHANNEL_PERMUTATIONS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

fn check_scale_range(lower: R64, upper: R64, what: &str) -> Result<()> {
    ensure!(
        upper >= lower,
        AugmentError::invalid_config(format!("{} upper must be >= lower", what))
    );
    ensure!(
        lower >= 0.0,
        AugmentError::invalid_config(format!("{} lower must be non-negative", what))
    );
    Ok(())
}

// contrast

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomContrastInit {
    pub lower: R64,
    pub upper: R64,
    pub prob: Ratio,
}

impl Default for RandomContrastInit {
    fn default() -> Self {
        Self {
            lower: r64(0.5),
            upper: r64(1.5),
            prob: Ratio::half(),
        }
    }
}

impl RandomContrastInit {
    pub fn build(self) -> Result<RandomContrast> {
        let Self { lower, upper, prob } = self;
        check_scale_range(lower, upper, "contrast")?;
        Ok(RandomContrast {
            lower: lower.raw() as f32,
            upper: upper.raw() as f32,
            prob,
        })
    }
}

/// Scales all pixels by a factor drawn from `[lower, upper]`.
#[derive(Debug, Clone)]
pub struct RandomContrast {
    lower: f32,
    upper: f32,
    prob: Ratio,
}

impl Transform for RandomContrast {
    fn apply(&self, mut sample: Sample, rng: &mut dyn RngCore) -> Result<Sample> {
        if self.prob.sample(rng) {
            let alpha = rng.gen_range(self.lower..=self.upper);
            sample.image *= alpha;
        }
        Ok(sample)
    }
}

// brightness

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomBrightnessInit {
    pub delta: R64,
    pub prob: Ratio,
}

impl Default for RandomBrightnessInit {
    fn default() -> Self {
        Self {
            delta: r64(32.0),
            prob: Ratio::half(),
        }
    }
}

impl RandomBrightnessInit {
    pub fn build(self) -> Result<RandomBrightness> {
        let Self { delta, prob } = self;
        ensure!(
            (0.0..=255.0).contains(&delta.raw()),
            AugmentError::invalid_config(format!(
                "brightness delta must be within [0, 255], but get {}",
                delta
            ))
        );
        Ok(RandomBrightness {
            delta: delta.raw() as f32,
            prob,
        })
    }
}

/// Adds an offset drawn from `[-delta, delta]` to all pixels.
#[derive(Debug, Clone)]
pub struct RandomBrightness {
    delta: f32,
    prob: Ratio,
}

impl Transform for RandomBrightness {
    fn apply(&self, mut sample: Sample, rng: &mut dyn RngCore) -> Result<Sample> {
        if self.prob.sample(rng) {
            let delta = rng.gen_range(-self.delta..=self.delta);
            sample.image += delta;
        }
        Ok(sample)
    }
}

// saturation

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomSaturationInit {
    pub lower: R64,
    pub upper: R64,
    pub prob: Ratio,
}

impl Default for RandomSaturationInit {
    fn default() -> Self {
        Self {
            lower: r64(0.5),
            upper: r64(1.5),
            prob: Ratio::half(),
        }
    }
}

impl RandomSaturationInit {
    pub fn build(self) -> Result<RandomSaturation> {
        let Self { lower, upper, prob } = self;
        check_scale_range(lower, upper, "saturation")?;
        Ok(RandomSaturation {
            lower: lower.raw() as f32,
            upper: upper.raw() as f32,
            prob,
        })
    }
}

/// Scales the saturation channel of an HSV image.
#[derive(Debug, Clone)]
pub struct RandomSaturation {
    lower: f32,
    upper: f32,
    prob: Ratio,
}

impl Transform for RandomSaturation {
    fn apply(&self, mut sample: Sample, rng: &mut dyn RngCore) -> Result<Sample> {
        if self.prob.sample(rng) {
            let alpha = rng.gen_range(self.lower..=self.upper);
            sample
                .image
                .index_axis_mut(Axis(2), 1)
                .mapv_inplace(|value| value * alpha);
        }
        Ok(sample)
    }
}

// hue

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomHueInit {
    pub delta: R64,
    pub prob: Ratio,
}

impl Default for RandomHueInit {
    fn default() -> Self {
        Self {
            delta: r64(18.0),
            prob: Ratio::half(),
        }
    }
}

impl RandomHueInit {
    pub fn build(self) -> Result<RandomHue> {
        let Self { delta, prob } = self;
        ensure!(
            (0.0..=360.0).contains(&delta.raw()),
            AugmentError::invalid_config(format!(
                "hue delta must be within [0, 360], but get {}",
                delta
            ))
        );
        Ok(RandomHue {
            delta: delta.raw() as f32,
            prob,
        })
    }
}

/// Shifts the hue channel of an HSV image, wrapping around 360 degrees.
#[derive(Debug, Clone)]
pub struct RandomHue {
    delta: f32,
    prob: Ratio,
}

impl Transform for RandomHue {
    fn apply(&self, mut sample: Sample, rng: &mut dyn RngCore) -> Result<Sample> {
        if self.prob.sample(rng) {
            let delta = rng.gen_range(-self.delta..=self.delta);
            sample
                .image
                .index_axis_mut(Axis(2), 0)
                .mapv_inplace(|hue| wrap_hue(hue + delta));
        }
        Ok(sample)
    }
}

/// Wrap once into the hue circle. A shift never exceeds one full turn.
fn wrap_hue(hue: f32) -> f32 {
    if hue > 360.0 {
        hue - 360.0
    } else if hue < 0.0 {
        hue + 360.0
    } else {
        hue
    }
}

// channel swapping

/// Reorders channels: output channel `i` takes input channel `order[i]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapChannels {
    order: [usize; 3],
}

impl SwapChannels {
    pub fn new(order: [usize; 3]) -> Result<Self> {
        ensure!(
            CHANNEL_PERMUTATIONS.contains(&order),
            AugmentError::invalid_config(format!(
                "channel order {:?} is not a permutation of [0, 1, 2]",
                order
            ))
        );
        Ok(Self { order })
    }

    pub fn forward(&self, image: ArrayView3<f32>) -> Result<Array3<f32>> {
        let (_, _, channels) = image.dim();
        ensure!(
            channels == NUM_CHANNELS,
            AugmentError::invalid_shape(image.shape(), "channel swap expects 3 channels")
        );
        Ok(image.select(Axis(2), &self.order))
    }
}

impl Transform for SwapChannels {
    fn apply(&self, mut sample: Sample, _rng: &mut dyn RngCore) -> Result<Sample> {
        sample.image = self.forward(sample.image.view())?;
        Ok(sample)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomLightingNoiseInit {
    pub prob: Ratio,
}

impl Default for RandomLightingNoiseInit {
    fn default() -> Self {
        Self {
            prob: Ratio::half(),
        }
    }
}

impl RandomLightingNoiseInit {
    pub fn build(self) -> Result<RandomLightingNoise> {
        Ok(RandomLightingNoise { prob: self.prob })
    }
}

/// Shuffles the channels with one of the six permutations, picked uniformly.
#[derive(Debug, Clone)]
pub struct RandomLightingNoise {
    prob: Ratio,
}

impl Transform for RandomLightingNoise {
    fn apply(&self, sample: Sample, rng: &mut dyn RngCore) -> Result<Sample> {
        if !self.prob.sample(rng) {
            return Ok(sample);
        }
        let order = CHANNEL_PERMUTATIONS[rng.gen_range(0..CHANNEL_PERMUTATIONS.len())];
        SwapChannels::new(order)?.apply(sample, rng)
    }
}

// color conversion

/// Converts the image between color spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConvertColor {
    from: ColorSpace,
    to: ColorSpace,
}

impl ConvertColor {
    pub fn new(from: ColorSpace, to: ColorSpace) -> Result<Self> {
        imgproc::check_conversion(from, to)?;
        Ok(Self { from, to })
    }
}

impl Transform for ConvertColor {
    fn apply(&self, mut sample: Sample, _rng: &mut dyn RngCore) -> Result<Sample> {
        sample.image = imgproc::convert_color_space(sample.image, self.from, self.to)?;
        Ok(sample)
    }
}
