use super::Transform;
use crate::{common::*, ratio::Ratio, AugmentError, Sample};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpandInit {
    /// Per-channel fill value of the enlarged canvas.
    pub mean: [R64; 3],
    pub max_ratio: R64,
    pub prob: Ratio,
}

impl Default for ExpandInit {
    fn default() -> Self {
        Self {
            mean: [r64(104.0), r64(117.0), r64(123.0)],
            max_ratio: r64(4.0),
            prob: Ratio::half(),
        }
    }
}

impl ExpandInit {
    pub fn build(self) -> Result<Expand> {
        let Self {
            mean,
            max_ratio,
            prob,
        } = self;
        ensure!(
            max_ratio >= 1.0,
            AugmentError::invalid_config(format!(
                "max_ratio must be at least 1, but get {}",
                max_ratio
            ))
        );

        Ok(Expand {
            mean: mean.map(|value| value.raw() as f32),
            max_ratio: max_ratio.raw() as f32,
            prob,
        })
    }
}

/// Places the image on a larger canvas filled with the mean color.
///
/// This zooms out the scene so that objects become smaller.
#[derive(Debug, Clone)]
pub struct Expand {
    mean: [f32; 3],
    max_ratio: f32,
    prob: Ratio,
}

impl Expand {
    /// Place the image at `(top, left)` on a canvas enlarged by `ratio`.
    pub fn forward(&self, sample: Sample, ratio: f32, left: f32, top: f32) -> Result<Sample> {
        sample.check()?;
        ensure!(
            ratio >= 1.0,
            AugmentError::invalid_config(format!("expand ratio {} is below 1", ratio))
        );
        let Sample {
            image,
            mut boxes,
            labels,
        } = sample;
        let (height, width, channels) = image.dim();

        let left = left.max(0.0).floor() as usize;
        let top = top.max(0.0).floor() as usize;
        let canvas_h = ((height as f32 * ratio).floor() as usize).max(top + height);
        let canvas_w = ((width as f32 * ratio).floor() as usize).max(left + width);

        let mut canvas =
            Array3::from_shape_fn((canvas_h, canvas_w, channels), |(_, _, c)| self.mean[c]);
        canvas
            .slice_mut(s![top..(top + height), left..(left + width), ..])
            .assign(&image);
        Affine::translate(left as f32, top as f32).apply_to_boxes(boxes.view_mut());

        Ok(Sample {
            image: canvas,
            boxes,
            labels,
        })
    }
}

impl Transform for Expand {
    fn apply(&self, sample: Sample, rng: &mut dyn RngCore) -> Result<Sample> {
        if !self.prob.sample(rng) {
            return Ok(sample);
        }

        let height = sample.height() as f32;
        let width = sample.width() as f32;
        let ratio = rng.gen_range(1.0..=self.max_ratio);
        let left = rng.gen_range(0.0..=(width * ratio - width));
        let top = rng.gen_range(0.0..=(height * ratio - height));
        trace!("expand ratio={} left={} top={}", ratio, left, top);

        self.forward(sample, ratio, left, top)
    }
}
