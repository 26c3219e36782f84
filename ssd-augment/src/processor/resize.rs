use super::Transform;
use crate::{common::*, imgproc, AugmentError, Sample};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeInit {
    pub size: usize,
}

impl Default for ResizeInit {
    fn default() -> Self {
        Self { size: 300 }
    }
}

impl ResizeInit {
    pub fn build(self) -> Result<Resize> {
        let Self { size } = self;
        ensure!(size > 0, AugmentError::invalid_config("resize size must be positive"));
        Ok(Resize { size })
    }
}

/// Resizes the image to a `size` x `size` square.
///
/// Boxes are expected in percent coordinates and are left untouched.
#[derive(Debug, Clone)]
pub struct Resize {
    size: usize,
}

impl Transform for Resize {
    fn apply(&self, mut sample: Sample, _rng: &mut dyn RngCore) -> Result<Sample> {
        sample.image = imgproc::resize(sample.image.view(), self.size, self.size)?;
        Ok(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn resize_keeps_boxes() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(0);
        let resize = ResizeInit { size: 32 }.build()?;
        let input = Sample::new(
            Array3::zeros((50, 80, 3)),
            array![[0.1, 0.2, 0.3, 0.4]],
            vec![1],
        )?;
        let output = resize.apply(input.clone(), &mut rng)?;
        assert_eq!(output.image.dim(), (32, 32, 3));
        assert_eq!(output.boxes, input.boxes);
        assert_eq!(output.labels, input.labels);
        Ok(())
    }

    #[test]
    fn resize_rejects_zero() {
        assert!(ResizeInit { size: 0 }.build().is_err());
    }
}
