use super::{
    Compose, ConvertColor, RandomBrightness, RandomBrightnessInit, RandomContrastInit,
    RandomHueInit, RandomLightingNoise, RandomLightingNoiseInit, RandomSaturationInit, Transform,
};
use crate::{common::*, imgproc::ColorSpace, ratio::Ratio, AugmentError, Sample};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotometricDistortInit {
    /// The color space of incoming images, either RGB or BGR.
    pub color_space: ColorSpace,
    pub brightness: RandomBrightnessInit,
    pub contrast: RandomContrastInit,
    pub saturation: RandomSaturationInit,
    pub hue: RandomHueInit,
    pub lighting_noise: RandomLightingNoiseInit,
    /// The probability to adjust contrast before the HSV stage rather than after.
    pub contrast_first_prob: Ratio,
}

impl Default for PhotometricDistortInit {
    fn default() -> Self {
        Self {
            color_space: ColorSpace::Rgb,
            brightness: Default::default(),
            contrast: Default::default(),
            saturation: Default::default(),
            hue: Default::default(),
            lighting_noise: Default::default(),
            contrast_first_prob: Ratio::half(),
        }
    }
}

impl PhotometricDistortInit {
    pub fn build(self) -> Result<PhotometricDistort> {
        let Self {
            color_space,
            brightness,
            contrast,
            saturation,
            hue,
            lighting_noise,
            contrast_first_prob,
        } = self;

        ensure!(
            color_space != ColorSpace::Hsv,
            AugmentError::invalid_config("photometric distortion expects RGB or BGR input")
        );

        let contrast = contrast.build()?;
        let to_hsv = ConvertColor::new(color_space, ColorSpace::Hsv)?;
        let from_hsv = ConvertColor::new(ColorSpace::Hsv, color_space)?;
        let saturation = saturation.build()?;
        let hue = hue.build()?;

        let contrast_first = Compose::default()
            .then(contrast.clone())
            .then(to_hsv)
            .then(saturation.clone())
            .then(hue.clone())
            .then(from_hsv);
        let contrast_last = Compose::default()
            .then(to_hsv)
            .then(saturation)
            .then(hue)
            .then(from_hsv)
            .then(contrast);

        Ok(PhotometricDistort {
            brightness: brightness.build()?,
            contrast_first,
            contrast_last,
            lighting_noise: lighting_noise.build()?,
            contrast_first_prob,
        })
    }
}

/// Brightness, contrast, saturation and hue jitter followed by channel
/// shuffling.
///
/// Contrast runs either before or after the HSV stage, chosen per call.
#[derive(Debug)]
pub struct PhotometricDistort {
    brightness: RandomBrightness,
    contrast_first: Compose,
    contrast_last: Compose,
    lighting_noise: RandomLightingNoise,
    contrast_first_prob: Ratio,
}

impl Transform for PhotometricDistort {
    fn apply(&self, sample: Sample, rng: &mut dyn RngCore) -> Result<Sample> {
        let sample = self.brightness.apply(sample, rng)?;
        let sample = if self.contrast_first_prob.sample(rng) {
            self.contrast_first.apply(sample, rng)?
        } else {
            self.contrast_last.apply(sample, rng)?
        };
        self.lighting_noise.apply(sample, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use itertools::izip;
    use ndarray::array;

    fn sample() -> Sample {
        let image = Array3::from_shape_fn((6, 6, 3), |(y, x, c)| (y * 40 + x * 7 + c * 3) as f32);
        Sample::new(image, array![[1.0, 1.0, 4.0, 4.0]], vec![9]).unwrap()
    }

    #[test]
    fn distort_keeps_boxes_and_labels() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(3);
        let distort = PhotometricDistortInit::default().build()?;
        let input = sample();
        for _ in 0..10 {
            let output = distort.apply(input.clone(), &mut rng)?;
            assert_eq!(output.image.dim(), input.image.dim());
            assert_eq!(output.boxes, input.boxes);
            assert_eq!(output.labels, input.labels);
        }
        Ok(())
    }

    #[test]
    fn distort_all_gates_off_round_trips_hsv() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(3);
        let distort = PhotometricDistortInit {
            brightness: RandomBrightnessInit {
                prob: Ratio::zero(),
                ..Default::default()
            },
            contrast: RandomContrastInit {
                prob: Ratio::zero(),
                ..Default::default()
            },
            saturation: RandomSaturationInit {
                prob: Ratio::zero(),
                ..Default::default()
            },
            hue: RandomHueInit {
                prob: Ratio::zero(),
                ..Default::default()
            },
            lighting_noise: RandomLightingNoiseInit {
                prob: Ratio::zero(),
            },
            ..Default::default()
        }
        .build()?;

        let input = sample();
        let output = distort.apply(input.clone(), &mut rng)?;
        izip!(output.image.iter(), input.image.iter())
            .for_each(|(&lhs, &rhs)| assert_abs_diff_eq!(lhs, rhs, epsilon = 1e-3));
        Ok(())
    }

    #[test]
    fn distort_rejects_hsv_input() {
        let err = PhotometricDistortInit {
            color_space: ColorSpace::Hsv,
            ..Default::default()
        }
        .build()
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AugmentError>(),
            Some(AugmentError::InvalidConfiguration(_))
        ));
    }
}
