//! Helpers over `(N, 4)` box arrays.

use crate::{common::*, RectFloat, RectNum, ShapeError, XyXy};

/// Center point `(cx, cy)` of each box row, shaped `(N, 2)`.
pub fn box_centers<T>(boxes: ArrayView2<T>) -> Result<Array2<T>, ShapeError>
where
    T: Float,
{
    crate::check_box_array(&boxes)?;
    let two = T::one() + T::one();
    let centers = Array2::from_shape_fn((boxes.nrows(), 2), |(row, axis)| {
        (boxes[[row, axis]] + boxes[[row, axis + 2]]) / two
    });
    Ok(centers)
}

/// Clamp every box edge into `bound` in place.
pub fn clip_boxes<T>(mut boxes: ArrayViewMut2<T>, bound: &XyXy<T>) -> Result<(), ShapeError>
where
    T: Float,
{
    crate::check_box_array(&boxes.view())?;
    boxes.rows_mut().into_iter().for_each(|mut row| {
        let [x_min, y_min, x_max, y_max] = XyXy::from_row(row.view()).clamp_to(bound).xyxy();
        row[0] = x_min;
        row[1] = y_min;
        row[2] = x_max;
        row[3] = y_max;
    });
    Ok(())
}
