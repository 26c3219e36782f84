//! The (image, boxes, labels) triple passed through every transform.

use crate::{common::*, AugmentError};

/// Pixel array with axes (height, width, channel).
pub type Image = Array3<f32>;

/// Box array shaped `(N, 4)`, each row `(x_min, y_min, x_max, y_max)`.
pub type Boxes = Array2<f32>;

/// Class labels, index-aligned with box rows.
pub type Labels = Vec<usize>;

/// The number of image channels every transform expects.
pub const NUM_CHANNELS: usize = 3;

/// An image with its boxes and labels.
///
/// Boxes are either absolute pixel coordinates or percent coordinates
/// normalized by the image size. The two forms are never mixed within one
/// sample. The i-th label belongs to the i-th box row.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub image: Image,
    pub boxes: Boxes,
    pub labels: Labels,
}

impl Sample {
    pub fn new(image: Image, boxes: Boxes, labels: Labels) -> Result<Self> {
        let sample = Self {
            image,
            boxes,
            labels,
        };
        sample.check()?;
        Ok(sample)
    }

    /// Build a sample from loosely shaped input.
    ///
    /// Missing or zero-sized boxes and missing labels are treated as empty,
    /// and a flat box of four coordinates is read as a single row. Box arrays with any other shape
    /// are rejected with [AugmentError::InvalidShape].
    pub fn from_raw(
        image: Image,
        boxes: Option<ArrayD<f32>>,
        labels: Option<Labels>,
    ) -> Result<Self> {
        let boxes = match boxes {
            Some(boxes) => normalize_boxes(boxes)?,
            None => Boxes::zeros((0, 4)),
        };
        Self::new(image, boxes, labels.unwrap_or_default())
    }

    /// Build a sample from an integer image, casting pixels to `f32`.
    pub fn from_ints<A>(
        image: ArrayView3<A>,
        boxes: Option<ArrayD<f32>>,
        labels: Option<Labels>,
    ) -> Result<Self>
    where
        A: num_traits::AsPrimitive<f32>,
    {
        let image = crate::processor::ConvertFromInts.forward(image);
        Self::from_raw(image, boxes, labels)
    }

    pub fn height(&self) -> usize {
        self.image.dim().0
    }

    pub fn width(&self) -> usize {
        self.image.dim().1
    }

    pub fn num_boxes(&self) -> usize {
        self.boxes.nrows()
    }

    /// Verify the image channel count, the box array shape and the label count.
    pub fn check(&self) -> Result<()> {
        let (_, _, channels) = self.image.dim();
        ensure!(
            channels == NUM_CHANNELS,
            AugmentError::invalid_shape(self.image.shape(), "the image must have 3 channels")
        );
        bbox::check_box_array(&self.boxes.view()).map_err(AugmentError::from)?;
        ensure!(
            self.labels.len() == self.boxes.nrows(),
            AugmentError::invalid_shape(
                self.boxes.shape(),
                "the number of labels must match the number of boxes"
            )
        );
        Ok(())
    }
}

fn normalize_boxes(boxes: ArrayD<f32>) -> Result<Boxes> {
    if boxes.is_empty() {
        return Ok(Boxes::zeros((0, 4)));
    }
    let shape = boxes.shape().to_vec();
    let boxes = match *shape.as_slice() {
        [4] => boxes.into_shape((1, 4)),
        [_, 4] => boxes.into_dimensionality::<Ix2>(),
        _ => {
            bail!(AugmentError::invalid_shape(
                &shape,
                "boxes must be shaped [4] or [N, 4]"
            ))
        }
    };
    let boxes = boxes
        .map_err(|_| AugmentError::invalid_shape(&shape, "boxes must be shaped [4] or [N, 4]"))?;
    Ok(boxes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, ArrayD, IxDyn};

    fn image() -> Image {
        Image::zeros((4, 6, 3))
    }

    #[test]
    fn sample_flat_box_is_one_row() -> Result<()> {
        let boxes = array![1.0f32, 2.0, 3.0, 4.0].into_dyn();
        let sample = Sample::from_raw(image(), Some(boxes), Some(vec![7]))?;
        assert_eq!(sample.boxes, array![[1.0f32, 2.0, 3.0, 4.0]]);
        assert_eq!(sample.labels, vec![7]);
        Ok(())
    }

    #[test]
    fn sample_missing_boxes_are_empty() -> Result<()> {
        let sample = Sample::from_raw(image(), None, None)?;
        assert_eq!(sample.boxes.dim(), (0, 4));
        assert!(sample.labels.is_empty());
        Ok(())
    }

    #[test]
    fn sample_zero_sized_boxes_are_empty() -> Result<()> {
        let shapes: [&[usize]; 4] = [&[0], &[0, 4], &[0, 5], &[2, 0]];
        for shape in shapes {
            let boxes = ArrayD::<f32>::zeros(IxDyn(shape));
            let sample = Sample::from_raw(image(), Some(boxes), None)?;
            assert_eq!(sample.boxes.dim(), (0, 4));
            assert_eq!(sample.num_boxes(), 0);
        }

        let mut rng = StdRng::seed_from_u64(0);
        let boxes = ArrayD::<f32>::zeros(IxDyn(&[0]));
        let output = crate::processor::Compose::default().process(
            image(),
            Some(boxes),
            Some(vec![]),
            &mut rng,
        )?;
        assert_eq!(output.boxes.dim(), (0, 4));
        Ok(())
    }

    #[test]
    fn sample_rejects_bad_box_shape() {
        let boxes = ArrayD::<f32>::zeros(IxDyn(&[2, 5]));
        let err = Sample::from_raw(image(), Some(boxes), Some(vec![0, 1])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AugmentError>(),
            Some(AugmentError::InvalidShape(_))
        ));

        let boxes = ArrayD::<f32>::zeros(IxDyn(&[1, 1, 4]));
        assert!(Sample::from_raw(image(), Some(boxes), Some(vec![0])).is_err());
    }

    #[test]
    fn sample_rejects_label_mismatch() {
        let boxes = array![[0.0f32, 0.0, 1.0, 1.0], [1.0, 1.0, 2.0, 2.0]];
        assert!(Sample::new(image(), boxes.clone(), vec![1]).is_err());
        assert!(Sample::new(image(), boxes, vec![1, 2]).is_ok());
    }

    #[test]
    fn sample_from_u8_image() -> Result<()> {
        let pixels = ndarray::Array3::<u8>::from_elem((4, 6, 3), 200);
        let sample = Sample::from_ints(pixels.view(), None, None)?;
        assert_eq!(sample.image, Image::from_elem((4, 6, 3), 200.0));
        Ok(())
    }

    #[test]
    fn sample_rejects_gray_image() {
        let gray = Image::zeros((4, 4, 1));
        assert!(Sample::new(gray, Boxes::zeros((0, 4)), vec![]).is_err());
    }
}
