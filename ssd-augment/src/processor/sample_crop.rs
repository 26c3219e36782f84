//! Random cropping constrained by box overlap.

use super::Transform;
use crate::{common::*, AugmentError, Sample};

/// One option of the crop sampler.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum SampleMode {
    /// Leave the sample as is.
    Keep,
    /// Accept a crop only if every box overlaps it within the given bounds.
    /// Missing bounds are unbounded.
    Overlap {
        min_iou: Option<R64>,
        max_iou: Option<R64>,
    },
}

impl SampleMode {
    pub fn overlap(min_iou: Option<f64>, max_iou: Option<f64>) -> Self {
        Self::Overlap {
            min_iou: min_iou.map(r64),
            max_iou: max_iou.map(r64),
        }
    }

    /// The accepted IoU range, or `None` for [SampleMode::Keep].
    pub fn iou_bounds(&self) -> Option<(f32, f32)> {
        match *self {
            Self::Keep => None,
            Self::Overlap { min_iou, max_iou } => {
                let min_iou = min_iou.map_or(f32::NEG_INFINITY, |value| value.raw() as f32);
                let max_iou = max_iou.map_or(f32::INFINITY, |value| value.raw() as f32);
                Some((min_iou, max_iou))
            }
        }
    }

    pub fn default_modes() -> Vec<Self> {
        vec![
            Self::Keep,
            Self::overlap(Some(0.1), None),
            Self::overlap(Some(0.3), None),
            Self::overlap(Some(0.7), None),
            Self::overlap(Some(0.9), None),
            Self::overlap(None, None),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomSampleCropInit {
    /// If false, the transform passes every sample through.
    pub enabled: bool,
    pub modes: Vec<SampleMode>,
    pub max_trials: usize,
    /// Minimum crop side relative to the image side.
    pub min_scale: R64,
    pub min_aspect_ratio: R64,
    pub max_aspect_ratio: R64,
}

impl Default for RandomSampleCropInit {
    fn default() -> Self {
        Self {
            enabled: true,
            modes: SampleMode::default_modes(),
            max_trials: 50,
            min_scale: r64(0.3),
            min_aspect_ratio: r64(0.5),
            max_aspect_ratio: r64(2.0),
        }
    }
}

impl RandomSampleCropInit {
    pub fn build(self) -> Result<RandomSampleCrop> {
        let Self {
            enabled,
            modes,
            max_trials,
            min_scale,
            min_aspect_ratio,
            max_aspect_ratio,
        } = self;

        ensure!(
            !modes.is_empty(),
            AugmentError::invalid_config("at least one sample mode is required")
        );
        ensure!(
            max_trials > 0,
            AugmentError::invalid_config("max_trials must be positive")
        );
        ensure!(
            min_scale > 0.0 && min_scale <= 1.0,
            AugmentError::invalid_config(format!(
                "min_scale must be within (0, 1], but get {}",
                min_scale
            ))
        );
        ensure!(
            min_aspect_ratio > 0.0 && min_aspect_ratio <= max_aspect_ratio,
            AugmentError::invalid_config(format!(
                "invalid aspect ratio range [{}, {}]",
                min_aspect_ratio, max_aspect_ratio
            ))
        );
        for mode in &modes {
            if let Some((min_iou, max_iou)) = mode.iou_bounds() {
                ensure!(
                    min_iou <= max_iou,
                    AugmentError::invalid_config(format!(
                        "min_iou {} exceeds max_iou {}",
                        min_iou, max_iou
                    ))
                );
            }
        }

        Ok(RandomSampleCrop {
            enabled,
            modes,
            max_trials,
            min_scale: min_scale.raw() as f32,
            aspect_ratio_range: (min_aspect_ratio.raw() as f32, max_aspect_ratio.raw() as f32),
        })
    }
}

/// Crops a random window whose overlap with the boxes satisfies a sampled
/// IoU constraint.
///
/// Boxes whose centers fall outside the window are dropped with their
/// labels. The remaining boxes are clipped to the window and moved into its
/// frame. If no window is found within the trial budget, the sample is
/// returned unchanged.
#[derive(Debug, Clone)]
pub struct RandomSampleCrop {
    enabled: bool,
    modes: Vec<SampleMode>,
    max_trials: usize,
    min_scale: f32,
    aspect_ratio_range: (f32, f32),
}

impl RandomSampleCrop {
    /// Try to crop `sample` to `rect`, given in absolute pixel coordinates.
    ///
    /// Returns `None` if some box overlap falls outside `iou_bounds`, or if
    /// no box center lies strictly inside `rect`.
    pub fn crop_to(
        sample: &Sample,
        rect: &XyXy<f32>,
        iou_bounds: (f32, f32),
    ) -> Result<Option<Sample>> {
        sample.check()?;
        let (min_iou, max_iou) = iou_bounds;
        let rect_array = arr1(&rect.xyxy()).into_dyn();
        let overlaps = bbox::jaccard_overlap(sample.boxes.view(), rect_array.view())
            .map_err(AugmentError::from)?;
        if overlaps.iter().any(|&iou| iou < min_iou || iou > max_iou) {
            return Ok(None);
        }

        let centers = bbox::box_centers(sample.boxes.view()).map_err(AugmentError::from)?;
        let kept = centers
            .rows()
            .into_iter()
            .enumerate()
            .filter(|(_, center)| rect.contains_point(center[0], center[1]))
            .map(|(index, _)| index)
            .collect_vec();
        if kept.is_empty() {
            return Ok(None);
        }

        let mut boxes = sample.boxes.select(Axis(0), &kept);
        let labels = kept.iter().map(|&index| sample.labels[index]).collect_vec();
        bbox::clip_boxes(boxes.view_mut(), rect).map_err(AugmentError::from)?;
        Affine::translate(-rect.x_min(), -rect.y_min()).apply_to_boxes(boxes.view_mut());

        let [left, top, right, bottom] = rect.xyxy().map(|value| value.max(0.0) as usize);
        let right = right.min(sample.width());
        let bottom = bottom.min(sample.height());
        let image = sample
            .image
            .slice(s![top..bottom, left..right, ..])
            .to_owned();

        Ok(Some(Sample {
            image,
            boxes,
            labels,
        }))
    }

    fn sample_rect(&self, width: f32, height: f32, rng: &mut dyn RngCore) -> Option<XyXy<f32>> {
        let (min_ratio, max_ratio) = self.aspect_ratio_range;
        let w = rng.gen_range((self.min_scale * width)..=width);
        let h = rng.gen_range((self.min_scale * height)..=height);

        let aspect_ratio = h / w;
        if !(min_ratio..=max_ratio).contains(&aspect_ratio) {
            return None;
        }

        let left = rng.gen_range(0.0..=(width - w));
        let top = rng.gen_range(0.0..=(height - h));
        Some(XyXy::new_unchecked([
            left.floor(),
            top.floor(),
            (left + w).floor(),
            (top + h).floor(),
        ]))
    }
}

impl Transform for RandomSampleCrop {
    fn apply(&self, sample: Sample, rng: &mut dyn RngCore) -> Result<Sample> {
        if !self.enabled || sample.num_boxes() == 0 {
            return Ok(sample);
        }

        let iou_bounds = match self.modes.choose(rng).and_then(SampleMode::iou_bounds) {
            Some(bounds) => bounds,
            None => return Ok(sample),
        };

        let width = sample.width() as f32;
        let height = sample.height() as f32;
        for trial in 0..self.max_trials {
            let rect = match self.sample_rect(width, height, rng) {
                Some(rect) => rect,
                None => continue,
            };
            if let Some(cropped) = Self::crop_to(&sample, &rect, iou_bounds)? {
                trace!(
                    "crop {:?} accepted at trial {}, {} of {} boxes kept",
                    rect.xyxy(),
                    trial,
                    cropped.num_boxes(),
                    sample.num_boxes()
                );
                return Ok(cropped);
            }
        }

        debug!(
            "no crop satisfies iou bounds {:?} after {} trials",
            iou_bounds, self.max_trials
        );
        Ok(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::Compose;
    use ndarray::array;

    fn sample() -> Sample {
        let image = Array3::from_shape_fn((100, 100, 3), |(y, x, c)| (y * 300 + x * 3 + c) as f32);
        let boxes = array![
            [10.0, 10.0, 30.0, 30.0],
            [60.0, 60.0, 90.0, 90.0],
            [40.0, 5.0, 70.0, 25.0]
        ];
        Sample::new(image, boxes, vec![1, 2, 3]).unwrap()
    }

    #[test]
    fn crop_keeps_centered_boxes() -> Result<()> {
        let input = sample();
        let rect = XyXy::new_unchecked([0.0, 0.0, 50.0, 50.0]);
        let output = RandomSampleCrop::crop_to(&input, &rect, (f32::NEG_INFINITY, f32::INFINITY))?
            .unwrap();

        assert_eq!(output.image.dim(), (50, 50, 3));
        assert_eq!(output.labels, vec![1]);
        assert_eq!(output.boxes, array![[10.0, 10.0, 30.0, 30.0]]);
        Ok(())
    }

    #[test]
    fn crop_clips_and_translates() -> Result<()> {
        let input = sample();
        let rect = XyXy::new_unchecked([20.0, 0.0, 80.0, 60.0]);
        let output = RandomSampleCrop::crop_to(&input, &rect, (f32::NEG_INFINITY, f32::INFINITY))?
            .unwrap();

        // box 1 center (20, 20) lies on the left edge and is dropped
        assert_eq!(output.labels, vec![3]);
        assert_eq!(output.boxes, array![[20.0, 5.0, 50.0, 25.0]]);
        assert_eq!(output.image.dim(), (60, 60, 3));
        assert_eq!(output.image[[0, 0, 0]], input.image[[0, 20, 0]]);
        Ok(())
    }

    #[test]
    fn crop_rejects_by_overlap() -> Result<()> {
        let input = sample();
        let rect = XyXy::new_unchecked([0.0, 0.0, 50.0, 50.0]);
        assert!(RandomSampleCrop::crop_to(&input, &rect, (0.1, f32::INFINITY))?.is_none());

        let far = XyXy::new_unchecked([0.0, 40.0, 5.0, 45.0]);
        assert!(
            RandomSampleCrop::crop_to(&input, &far, (f32::NEG_INFINITY, f32::INFINITY))?.is_none()
        );
        Ok(())
    }

    #[test]
    fn random_crop_stays_consistent() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(11);
        let crop = RandomSampleCropInit::default().build()?;
        let input = sample();

        for _ in 0..100 {
            let output = crop.apply(input.clone(), &mut rng)?;
            let (height, width) = (output.height() as f32, output.width() as f32);
            assert_eq!(output.labels.len(), output.num_boxes());
            assert!(output.num_boxes() >= 1);
            output.boxes.rows().into_iter().for_each(|row| {
                assert!(row[0] >= 0.0 && row[2] <= width);
                assert!(row[1] >= 0.0 && row[3] <= height);
            });
        }
        Ok(())
    }

    #[test]
    fn crop_rejects_label_mismatch() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut input = sample();
        input.labels.pop();

        let rect = XyXy::new_unchecked([0.0, 0.0, 100.0, 100.0]);
        let err = RandomSampleCrop::crop_to(&input, &rect, (f32::NEG_INFINITY, f32::INFINITY))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AugmentError>(),
            Some(AugmentError::InvalidShape(_))
        ));

        let pipeline = Compose::default().then(RandomSampleCropInit::default().build().unwrap());
        let err = pipeline.apply(input, &mut rng).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AugmentError>(),
            Some(AugmentError::InvalidShape(_))
        ));
    }

    #[test]
    fn keep_mode_and_disabled() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(0);
        let input = sample();

        let keep = RandomSampleCropInit {
            modes: vec![SampleMode::Keep],
            ..Default::default()
        }
        .build()?;
        assert_eq!(keep.apply(input.clone(), &mut rng)?, input);

        let disabled = RandomSampleCropInit {
            enabled: false,
            ..Default::default()
        }
        .build()?;
        assert_eq!(disabled.apply(input.clone(), &mut rng)?, input);
        Ok(())
    }

    #[test]
    fn empty_boxes_pass() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(0);
        let crop = RandomSampleCropInit::default().build()?;
        let input = Sample::new(Array3::zeros((10, 10, 3)), Array2::zeros((0, 4)), vec![])?;
        assert_eq!(crop.apply(input.clone(), &mut rng)?, input);
        Ok(())
    }

    #[test]
    fn invalid_init() {
        assert!(RandomSampleCropInit {
            modes: vec![],
            ..Default::default()
        }
        .build()
        .is_err());
        assert!(RandomSampleCropInit {
            modes: vec![SampleMode::overlap(Some(0.9), Some(0.1))],
            ..Default::default()
        }
        .build()
        .is_err());
        assert!(RandomSampleCropInit {
            min_scale: r64(0.0),
            ..Default::default()
        }
        .build()
        .is_err());
    }

    #[test]
    fn sample_mode_serde() -> Result<()> {
        let mode: SampleMode = serde_json::from_str(r#"{"mode": "Overlap", "min_iou": 0.3}"#)?;
        assert_eq!(mode, SampleMode::overlap(Some(0.3), None));
        let mode: SampleMode = serde_json::from_str(r#"{"mode": "Keep"}"#)?;
        assert_eq!(mode, SampleMode::Keep);
        Ok(())
    }
}
