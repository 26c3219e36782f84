use super::Transform;
use crate::{common::*, ratio::Ratio, Sample};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomMirrorInit {
    pub prob: Ratio,
}

impl Default for RandomMirrorInit {
    fn default() -> Self {
        Self {
            prob: Ratio::half(),
        }
    }
}

impl RandomMirrorInit {
    pub fn build(self) -> Result<RandomMirror> {
        Ok(RandomMirror { prob: self.prob })
    }
}

/// Flips the image left to right along with its boxes.
#[derive(Debug, Clone)]
pub struct RandomMirror {
    prob: Ratio,
}

impl RandomMirror {
    /// Mirror unconditionally.
    pub fn forward(&self, sample: Sample) -> Sample {
        let Sample {
            image,
            mut boxes,
            labels,
        } = sample;
        let width = image.dim().1 as f32;

        let image = image.slice(s![.., ..;-1, ..]).to_owned();
        Affine::hflip(width).apply_to_boxes(boxes.view_mut());

        Sample {
            image,
            boxes,
            labels,
        }
    }
}

impl Transform for RandomMirror {
    fn apply(&self, sample: Sample, rng: &mut dyn RngCore) -> Result<Sample> {
        if self.prob.sample(rng) {
            Ok(self.forward(sample))
        } else {
            Ok(sample)
        }
    }
}
