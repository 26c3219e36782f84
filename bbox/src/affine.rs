use super::XyXy;
use crate::{common::*, RectNum};

/// Axis-aligned coordinate map `x' = sx * x + tx`, `y' = sy * y + ty`.
///
/// Every geometric augmentation moves boxes with one of these maps, so the
/// same value can be applied to a single [XyXy] or a whole box array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Affine<T> {
    pub sx: T,
    pub sy: T,
    pub tx: T,
    pub ty: T,
}

impl<T> Affine<T>
where
    T: Copy + Num,
{
    pub fn scale(sx: T, sy: T) -> Self {
        Self {
            sx,
            sy,
            tx: T::zero(),
            ty: T::zero(),
        }
    }

    pub fn translate(tx: T, ty: T) -> Self {
        Self {
            sx: T::one(),
            sy: T::one(),
            tx,
            ty,
        }
    }
}

impl<T> Affine<T>
where
    T: Copy + Num + Neg<Output = T>,
{
    /// Horizontal reflection inside an image of the given width.
    pub fn hflip(width: T) -> Self {
        Self {
            sx: -T::one(),
            sy: T::one(),
            tx: width,
            ty: T::zero(),
        }
    }

    pub fn inverse(&self) -> Self {
        let sx = T::one() / self.sx;
        let sy = T::one() / self.sy;
        let tx = -self.tx / self.sx;
        let ty = -self.ty / self.sy;

        Self { sx, sy, tx, ty }
    }
}

impl<T> Affine<T>
where
    T: Copy + Num + PartialOrd,
{
    /// Map every row of an `(N, 4)` box array in place.
    pub fn apply_to_boxes(&self, mut boxes: ArrayViewMut2<T>) {
        boxes.rows_mut().into_iter().for_each(|mut row| {
            let [x_min, y_min, x_max, y_max] = XyXy::from_row(row.view()).transform(self).xyxy();
            row[0] = x_min;
            row[1] = y_min;
            row[2] = x_max;
            row[3] = y_max;
        });
    }
}

impl<T> Mul<&XyXy<T>> for &Affine<T>
where
    T: Copy + Num + PartialOrd,
{
    type Output = XyXy<T>;

    fn mul(self, rhs: &XyXy<T>) -> Self::Output {
        rhs.transform(self)
    }
}

/// `&lhs * &rhs` applies `rhs` first, then `lhs`.
impl<T> Mul<&Affine<T>> for &Affine<T>
where
    T: Copy + Num,
{
    type Output = Affine<T>;

    fn mul(self, rhs: &Affine<T>) -> Self::Output {
        Affine {
            sx: self.sx * rhs.sx,
            sy: self.sy * rhs.sy,
            tx: rhs.tx * self.sx + self.tx,
            ty: rhs.ty * self.sy + self.ty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn affine_inverse() {
        let orig = Affine {
            sx: 2.0,
            sy: 2.0,
            tx: 1.0,
            ty: 1.0,
        };
        assert_eq!(orig.inverse().inverse(), orig);
    }

    #[test]
    fn affine_compose() {
        let scale = Affine::scale(2.0, 4.0);
        let shift = Affine::translate(1.0, -1.0);
        let rect = XyXy::new_unchecked([1.0, 1.0, 2.0, 2.0]);

        let composed = &shift * &scale;
        assert_eq!((&composed * &rect).xyxy(), [3.0, 3.0, 5.0, 7.0]);
        assert_eq!(&composed * &rect, &shift * &(&scale * &rect));
    }

    #[test]
    fn affine_apply_to_boxes() {
        let mut boxes = array![[0.1f32, 0.1, 0.5, 0.5], [0.0, 0.5, 1.0, 1.0]];
        Affine::scale(200.0, 100.0).apply_to_boxes(boxes.view_mut());
        let expect = array![[20.0f32, 10.0, 100.0, 50.0], [0.0, 50.0, 200.0, 100.0]];
        boxes
            .iter()
            .zip(expect.iter())
            .for_each(|(&lhs, &rhs)| assert_abs_diff_eq!(lhs, rhs, epsilon = 1e-4));

        let mut flipped = expect.clone();
        Affine::hflip(200.0).apply_to_boxes(flipped.view_mut());
        assert_eq!(
            flipped,
            array![[100.0f32, 10.0, 180.0, 50.0], [0.0, 50.0, 200.0, 100.0]]
        );
    }
}
