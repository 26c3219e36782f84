use super::Rect;
use crate::{common::*, Affine};

/// Bounding box in (x_min, y_min, x_max, y_max) format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XyXy<T> {
    pub(crate) x_min: T,
    pub(crate) y_min: T,
    pub(crate) x_max: T,
    pub(crate) y_max: T,
}

impl<T> XyXy<T> {
    /// Build a box without checking the edge order.
    ///
    /// Boxes read from annotation data may be inverted or empty, and the
    /// overlap functions must still accept them.
    pub fn new_unchecked(xyxy: [T; 4]) -> Self {
        let [x_min, y_min, x_max, y_max] = xyxy;
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }
}

impl<T> XyXy<T>
where
    T: Copy,
{
    /// Read a box from one row of an `(N, 4)` box array.
    pub fn from_row(row: ArrayView1<T>) -> Self {
        Self::new_unchecked([row[0], row[1], row[2], row[3]])
    }
}

impl<T> XyXy<T>
where
    T: Copy + Num + PartialOrd,
{
    /// Map the box through `affine`. Edges are swapped on a negative scale so
    /// that a reflected box keeps its min edge first.
    pub fn transform(&self, affine: &Affine<T>) -> Self {
        let zero = T::zero();
        let x1 = self.x_min * affine.sx + affine.tx;
        let x2 = self.x_max * affine.sx + affine.tx;
        let y1 = self.y_min * affine.sy + affine.ty;
        let y2 = self.y_max * affine.sy + affine.ty;
        let (x_min, x_max) = if affine.sx < zero { (x2, x1) } else { (x1, x2) };
        let (y_min, y_max) = if affine.sy < zero { (y2, y1) } else { (y1, y2) };

        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }
}

impl<T> Rect for XyXy<T>
where
    T: Copy + Num + PartialOrd,
{
    type Type = T;

    fn x_min(&self) -> Self::Type {
        self.x_min
    }

    fn y_min(&self) -> Self::Type {
        self.y_min
    }

    fn x_max(&self) -> Self::Type {
        self.x_max
    }

    fn y_max(&self) -> Self::Type {
        self.y_max
    }

    fn cx(&self) -> Self::Type {
        let two = T::one() + T::one();
        (self.x_min + self.x_max) / two
    }

    fn cy(&self) -> Self::Type {
        let two = T::one() + T::one();
        (self.y_min + self.y_max) / two
    }

    fn w(&self) -> Self::Type {
        self.x_max - self.x_min
    }

    fn h(&self) -> Self::Type {
        self.y_max - self.y_min
    }

    fn try_from_xyxy(xyxy: [Self::Type; 4]) -> Result<Self> {
        let [x_min, y_min, x_max, y_max] = xyxy;
        ensure!(
            x_max >= x_min && y_max >= y_min,
            "x_max >= x_min and y_max >= y_min must hold"
        );
        Ok(Self::new_unchecked(xyxy))
    }

    fn try_from_xywh(xywh: [Self::Type; 4]) -> Result<Self> {
        let [x, y, w, h] = xywh;
        let zero = T::zero();
        ensure!(w >= zero && h >= zero, "w and h must be non-negative");
        Self::try_from_xyxy([x, y, x + w, y + h])
    }
}
