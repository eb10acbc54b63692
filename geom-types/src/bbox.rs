use crate::Point;

/// Minimum and maximum extents of a rectangular region.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox<T> {
    /// Minimum extent in the x direction-- the left side of a region.
    pub x_min: T,
    /// Minimum extent in the y direction. With the Y axis growing
    /// downwards, this represents the top of a region.
    pub y_min: T,
    /// Maximum extent in the x direction-- the right side of a region.
    pub x_max: T,
    /// Maximum extent in the y direction. With the Y axis growing
    /// downwards, this represents the bottom of a region.
    pub y_max: T,
}

impl<T> BoundingBox<T>
where
    T: PartialOrd + Copy,
{
    /// Returns the empty-area box containing only `point`.
    pub fn from_point(point: Point<T>) -> Self {
        Self {
            x_min: point.x,
            y_min: point.y,
            x_max: point.x,
            y_max: point.y,
        }
    }

    /// Grows the box so that it contains `point`.
    pub fn include(&mut self, point: Point<T>) {
        if point.x < self.x_min {
            self.x_min = point.x;
        }
        if point.x > self.x_max {
            self.x_max = point.x;
        }
        if point.y < self.y_min {
            self.y_min = point.y;
        }
        if point.y > self.y_max {
            self.y_max = point.y;
        }
    }
}
