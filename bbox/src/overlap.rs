//! Overlap measures between a box array and a single box.

use crate::{common::*, RectFloat, ShapeError, XyXy};

/// The floor applied to union areas so that degenerate boxes never divide by zero.
pub const UNION_EPSILON: f32 = 1e-6;

/// Intersection area between each row of `boxes_a` and `box_b`.
///
/// `box_b` is shaped `(4,)` or `(1, 4)`. An empty `box_b` yields zeros, one
/// per row of `boxes_a`.
pub fn intersect<T>(boxes_a: ArrayView2<T>, box_b: ArrayViewD<T>) -> Result<Array1<T>, ShapeError>
where
    T: Float,
{
    let num_boxes = boxes_a.nrows();
    if box_b.is_empty() {
        return Ok(Array1::zeros(num_boxes));
    }
    check_box_array(&boxes_a)?;

    let rhs = XyXy::from_row(single_box(box_b)?);
    let areas = boxes_a
        .rows()
        .into_iter()
        .map(|row| XyXy::from_row(row).intersection_area_with(&rhs))
        .collect();
    Ok(areas)
}

/// Jaccard overlap (IoU) between each row of `boxes_a` and `box_b`.
///
/// `box_b` is shaped `(4,)` or `(1, 4)`. If either side holds no box, the
/// result is a zero vector with one entry per row of `boxes_a`.
pub fn jaccard_overlap<T>(
    boxes_a: ArrayView2<T>,
    box_b: ArrayViewD<T>,
) -> Result<Array1<T>, ShapeError>
where
    T: Float,
{
    let num_boxes = boxes_a.nrows();
    if num_boxes == 0 || box_b.is_empty() {
        return Ok(Array1::zeros(num_boxes));
    }
    check_box_array(&boxes_a)?;

    let epsilon = T::from(UNION_EPSILON).unwrap_or_else(T::epsilon);
    let rhs = XyXy::from_row(single_box(box_b)?);
    let overlaps = boxes_a
        .rows()
        .into_iter()
        .map(|row| XyXy::from_row(row).iou_with(&rhs, epsilon))
        .collect();
    Ok(overlaps)
}

/// View a `(4,)` or `(1, 4)` array as one box.
fn single_box<T>(box_b: ArrayViewD<T>) -> Result<ArrayView1<T>, ShapeError> {
    let shape = box_b.shape().to_vec();
    match shape.as_slice() {
        [4] => box_b.into_dimensionality::<Ix1>(),
        [1, 4] => box_b.index_axis_move(Axis(0), 0).into_dimensionality::<Ix1>(),
        _ => Err(ndarray::ShapeError::from_kind(ndarray::ErrorKind::IncompatibleShape)),
    }
    .map_err(|_| ShapeError::new(&shape, "expect a single box shaped [4] or [1, 4]"))
}

/// Check that the array is shaped `(N, 4)`.
pub fn check_box_array<T>(boxes: &ArrayView2<T>) -> Result<(), ShapeError> {
    if boxes.ncols() != 4 {
        return Err(ShapeError::new(
            boxes.shape(),
            "the trailing dimension of a box array must be 4",
        ));
    }
    Ok(())
}
