use super::XyXy;
use crate::common::*;

/// The generic axis-aligned rectangle.
pub trait Rect {
    type Type;

    fn x_min(&self) -> Self::Type;
    fn y_min(&self) -> Self::Type;
    fn x_max(&self) -> Self::Type;
    fn y_max(&self) -> Self::Type;
    fn cx(&self) -> Self::Type;
    fn cy(&self) -> Self::Type;
    fn w(&self) -> Self::Type;
    fn h(&self) -> Self::Type;

    fn try_from_xyxy(xyxy: [Self::Type; 4]) -> Result<Self>
    where
        Self: Sized;

    fn try_from_xywh(xywh: [Self::Type; 4]) -> Result<Self>
    where
        Self: Sized;
}

pub trait RectNum: Rect
where
    Self::Type: Copy + Num + PartialOrd,
{
    fn xyxy(&self) -> [Self::Type; 4] {
        [self.x_min(), self.y_min(), self.x_max(), self.y_max()]
    }

    /// Signed area. Inverted boxes yield a non-positive value.
    fn area(&self) -> Self::Type {
        self.w() * self.h()
    }

    /// Returns true if the point lies strictly inside the rectangle.
    fn contains_point(&self, x: Self::Type, y: Self::Type) -> bool {
        x > self.x_min() && x < self.x_max() && y > self.y_min() && y < self.y_max()
    }
}

pub trait RectFloat: RectNum
where
    Self::Type: Float,
{
    /// Compute the overlapping region, or `None` if the rectangles are disjoint.
    fn intersect_with<R>(&self, other: &R) -> Option<XyXy<Self::Type>>
    where
        R: Rect<Type = Self::Type>,
    {
        let x_min = self.x_min().max(other.x_min());
        let y_min = self.y_min().max(other.y_min());
        let x_max = self.x_max().min(other.x_max());
        let y_max = self.y_max().min(other.y_max());
        (x_max > x_min && y_max > y_min).then(|| XyXy {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Intersection area, each axis clipped at zero before multiplying.
    fn intersection_area_with<R>(&self, other: &R) -> Self::Type
    where
        R: Rect<Type = Self::Type>,
    {
        let zero = Self::Type::zero();
        let w = (self.x_max().min(other.x_max()) - self.x_min().max(other.x_min())).max(zero);
        let h = (self.y_max().min(other.y_max()) - self.y_min().max(other.y_min())).max(zero);
        w * h
    }

    /// Intersection over union. The union is floored at `epsilon`.
    fn iou_with<R>(&self, other: &R, epsilon: Self::Type) -> Self::Type
    where
        R: Rect<Type = Self::Type>,
    {
        let inter_area = self.intersection_area_with(other);
        let union_area = (self.area() + other.area() - inter_area).max(epsilon);
        inter_area / union_area
    }

    /// Clamp each edge into `bound`. Unlike [RectFloat::intersect_with], the
    /// result is produced even when the rectangles do not overlap.
    fn clamp_to<R>(&self, bound: &R) -> XyXy<Self::Type>
    where
        R: Rect<Type = Self::Type>,
    {
        XyXy {
            x_min: self.x_min().max(bound.x_min()),
            y_min: self.y_min().max(bound.y_min()),
            x_max: self.x_max().min(bound.x_max()),
            y_max: self.y_max().min(bound.y_max()),
        }
    }
}

impl<T> RectNum for T
where
    T: Rect,
    T::Type: Copy + Num + PartialOrd,
{
}

impl<T> RectFloat for T
where
    T: Rect,
    T::Type: Float,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn rect_intersection() {
        let lhs = XyXy::try_from_xyxy([0.0, 0.0, 10.0, 10.0]).unwrap();
        let rhs = XyXy::try_from_xyxy([5.0, 5.0, 15.0, 15.0]).unwrap();
        assert_eq!(
            lhs.intersect_with(&rhs),
            Some(XyXy::try_from_xyxy([5.0, 5.0, 10.0, 10.0]).unwrap())
        );
        assert_abs_diff_eq!(lhs.intersection_area_with(&rhs), 25.0);
        assert_abs_diff_eq!(lhs.iou_with(&rhs, 1e-6), 25.0 / 175.0);
    }

    #[test]
    fn rect_disjoint() {
        let lhs = XyXy::try_from_xyxy([0.0, 0.0, 1.0, 1.0]).unwrap();
        let rhs = XyXy::try_from_xyxy([2.0, 0.0, 3.0, 1.0]).unwrap();
        assert_eq!(lhs.intersect_with(&rhs), None);
        assert_abs_diff_eq!(lhs.intersection_area_with(&rhs), 0.0);

        let clamped = lhs.clamp_to(&rhs);
        assert_eq!(clamped.xyxy(), [2.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn rect_degenerate_iou() {
        let point = XyXy::new_unchecked([3.0f32, 3.0, 3.0, 3.0]);
        assert_abs_diff_eq!(point.iou_with(&point, 1e-6), 0.0);
    }

    #[test]
    fn rect_contains_point() {
        let rect = XyXy::try_from_xywh([0.0, 0.0, 4.0, 2.0]).unwrap();
        assert!(rect.contains_point(2.0, 1.0));
        assert!(!rect.contains_point(0.0, 1.0));
        assert!(!rect.contains_point(2.0, 2.0));
    }
}
