//! Conversion between percent and absolute box coordinates.

use super::Transform;
use crate::{common::*, AugmentError, Sample};

fn image_scale(sample: &Sample) -> Affine<f32> {
    Affine::scale(sample.width() as f32, sample.height() as f32)
}

/// Scales percent boxes by the image width and height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ToAbsoluteCoords;

impl Transform for ToAbsoluteCoords {
    fn apply(&self, mut sample: Sample, _rng: &mut dyn RngCore) -> Result<Sample> {
        image_scale(&sample).apply_to_boxes(sample.boxes.view_mut());
        Ok(sample)
    }
}

/// Divides absolute boxes by the image width and height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ToPercentCoords;

impl Transform for ToPercentCoords {
    fn apply(&self, mut sample: Sample, _rng: &mut dyn RngCore) -> Result<Sample> {
        ensure!(
            (sample.width() > 0 && sample.height() > 0) || sample.num_boxes() == 0,
            AugmentError::invalid_shape(
                sample.image.shape(),
                "cannot normalize boxes on an empty image"
            )
        );
        image_scale(&sample)
            .inverse()
            .apply_to_boxes(sample.boxes.view_mut());
        Ok(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use itertools::izip;
    use ndarray::array;

    #[test]
    fn percent_then_absolute() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(0);
        let input = Sample::new(
            Array3::zeros((100, 200, 3)),
            array![[20.0, 10.0, 100.0, 50.0]],
            vec![1],
        )?;

        let percent = ToPercentCoords.apply(input.clone(), &mut rng)?;
        izip!(percent.boxes.iter(), [0.1, 0.1, 0.5, 0.5])
            .for_each(|(&lhs, rhs)| assert_abs_diff_eq!(lhs, rhs, epsilon = 1e-6));

        let absolute = ToAbsoluteCoords.apply(percent, &mut rng)?;
        izip!(absolute.boxes.iter(), input.boxes.iter())
            .for_each(|(&lhs, &rhs)| assert_abs_diff_eq!(lhs, rhs, epsilon = 1e-4));
        assert_eq!(absolute.labels, input.labels);
        Ok(())
    }

    #[test]
    fn empty_boxes_pass() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(0);
        let input = Sample::new(Array3::zeros((8, 8, 3)), Array2::zeros((0, 4)), vec![])?;
        let output = ToAbsoluteCoords.apply(input.clone(), &mut rng)?;
        assert_eq!(output, input);
        Ok(())
    }
}
