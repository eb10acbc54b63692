use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::{Fix32, Fix64};

// 181/256 is approximately 1/√2, or sin(π/4).
const SIN_45_NUM: i64 = 181;
const SIN_45_DEN: i64 = 256;

/// Two dimensional point with a generic coordinate type.
///
/// The coordinate type defaults to the 24.8 [`Fix32`] used for glyph
/// outlines. The same type doubles as a vector: the `Fix32` specific
/// methods (dot product, length, rotations) treat it as one.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bytemuck", derive(bytemuck::AnyBitPattern))]
#[repr(C)]
pub struct Point<T = Fix32> {
    /// X coordinate.
    pub x: T,
    /// Y coordinate.
    pub y: T,
}

impl<T> Point<T> {
    /// Creates a new point with the given x and y coordinates.
    #[inline(always)]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Maps `Point<T>` to `Point<U>` by applying a function to each coordinate.
    #[inline(always)]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Point<U> {
        Point {
            x: f(self.x),
            y: f(self.y),
        }
    }
}

/// Vector algebra over 24.8 coordinates.
///
/// The Y axis grows downwards, so a clockwise rotation of `(1, 0)` by 90
/// degrees yields `(0, 1)`. Products are computed with 64-bit intermediates;
/// coordinates should stay within the 24-bit integer range so that sums of
/// two products cannot overflow.
impl Point<Fix32> {
    /// The origin, or the zero vector.
    pub const ZERO: Self = Self::new(Fix32::ZERO, Fix32::ZERO);

    /// Creates a new point from raw 24.8 coordinates.
    #[inline(always)]
    pub const fn from_bits(x: i32, y: i32) -> Self {
        Self::new(Fix32::from_bits(x), Fix32::from_bits(y))
    }

    /// Returns the dot product `self · other` as a 48.16 value.
    pub fn dot(self, other: Self) -> Fix64 {
        let (px, py) = self.wide();
        let (qx, qy) = other.wide();
        Fix64::from_bits(px * qx + py * qy)
    }

    /// Returns the euclidean length of the vector.
    ///
    /// This is computed with an integer square root and truncates, so it is
    /// exact and identical on every platform.
    pub fn length(self) -> Fix32 {
        let x = self.x.to_bits().unsigned_abs() as u64;
        let y = self.y.to_bits().unsigned_abs() as u64;
        Fix32::from_bits((x * x + y * y).isqrt() as i32)
    }

    /// Returns the vector scaled to the given length, or the zero vector if
    /// `self` has zero length.
    pub fn norm(self, length: Fix32) -> Self {
        let d = self.length().to_bits() as i64;
        if d == 0 {
            return Self::ZERO;
        }
        let s = length.to_bits() as i64;
        let (x, y) = self.wide();
        Self::from_bits((x * s / d) as i32, (y * s / d) as i32)
    }

    /// Returns the vector rotated clockwise by 45 degrees.
    ///
    /// `(1, 0)` becomes approximately `(1/√2, 1/√2)`.
    pub fn rot45_cw(self) -> Self {
        let (px, py) = self.wide();
        Self::sin45(px - py, px + py)
    }

    /// Returns the vector rotated clockwise by 90 degrees.
    ///
    /// `(1, 0)` becomes `(0, 1)`.
    pub fn rot90_cw(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Returns the vector rotated clockwise by 135 degrees.
    ///
    /// `(1, 0)` becomes approximately `(-1/√2, 1/√2)`.
    pub fn rot135_cw(self) -> Self {
        let (px, py) = self.wide();
        Self::sin45(-px - py, px - py)
    }

    /// Returns the vector rotated counter-clockwise by 45 degrees.
    ///
    /// `(1, 0)` becomes approximately `(1/√2, -1/√2)`.
    pub fn rot45_ccw(self) -> Self {
        let (px, py) = self.wide();
        Self::sin45(px + py, -px + py)
    }

    /// Returns the vector rotated counter-clockwise by 90 degrees.
    ///
    /// `(1, 0)` becomes `(0, -1)`.
    pub fn rot90_ccw(self) -> Self {
        Self::new(self.y, -self.x)
    }

    /// Returns the vector rotated counter-clockwise by 135 degrees.
    ///
    /// `(1, 0)` becomes approximately `(-1/√2, -1/√2)`.
    pub fn rot135_ccw(self) -> Self {
        let (px, py) = self.wide();
        Self::sin45(-px + py, -px - py)
    }

    #[inline(always)]
    fn wide(self) -> (i64, i64) {
        (self.x.to_bits() as i64, self.y.to_bits() as i64)
    }

    #[inline(always)]
    fn sin45(x: i64, y: i64) -> Self {
        Self::from_bits(
            (x * SIN_45_NUM / SIN_45_DEN) as i32,
            (y * SIN_45_NUM / SIN_45_DEN) as i32,
        )
    }
}

impl<T> Add for Point<T>
where
    T: Add<Output = T>,
{
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl<T> AddAssign for Point<T>
where
    T: AddAssign,
{
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl<T> Sub for Point<T>
where
    T: Sub<Output = T>,
{
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl<T> SubAssign for Point<T>
where
    T: SubAssign,
{
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

/// For `Point<Fix32>` this is the fixed point scale `k * p / 256`.
impl<T> Mul<T> for Point<T>
where
    T: Mul<Output = T> + Copy,
{
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: T) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl<T> MulAssign<T> for Point<T>
where
    T: MulAssign + Copy,
{
    #[inline(always)]
    fn mul_assign(&mut self, rhs: T) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl<T> Div<T> for Point<T>
where
    T: Div<Output = T> + Copy,
{
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: T) -> Self::Output {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
        }
    }
}

impl<T> DivAssign<T> for Point<T>
where
    T: DivAssign + Copy,
{
    #[inline(always)]
    fn div_assign(&mut self, rhs: T) {
        self.x /= rhs;
        self.y /= rhs;
    }
}

impl<T> Neg for Point<T>
where
    T: Neg<Output = T>,
{
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Point<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::Point;
    use crate::{Fix32, Fix64};
    use std::string::ToString;

    fn pt(x: i32, y: i32) -> Point {
        Point::from_bits(x, y)
    }

    #[test]
    fn map() {
        assert_eq!(
            Point::new(42.5, 20.25).map(Fix32::from_f64),
            Point::from_bits(10880, 5184)
        );
    }

    #[test]
    fn add() {
        assert_eq!(Point::new(1, 2) + Point::new(3, 4), Point::new(4, 6));
        let mut point = Point::new(1, 2);
        point += Point::new(3, 4);
        assert_eq!(point, Point::new(4, 6));
    }

    #[test]
    fn sub() {
        assert_eq!(Point::new(1, 2) - Point::new(3, 4), Point::new(-2, -2));
        let mut point = Point::new(1, 2);
        point -= Point::new(3, 4);
        assert_eq!(point, Point::new(-2, -2));
    }

    #[test]
    fn add_sub_roundtrip() {
        let points = [pt(0, 0), pt(256, -512), pt(-77, 31), pt(100_000, 3)];
        for p in points {
            for q in points {
                assert_eq!(p + q - q, p);
            }
        }
    }

    #[test]
    fn mul() {
        // 1.5 * (2.0, -3.0)
        assert_eq!(pt(512, -768) * Fix32::from_bits(384), pt(768, -1152));
        // truncated toward zero
        assert_eq!(pt(3, -3) * Fix32::from_bits(128), pt(1, -1));
        let mut point = pt(256, 256);
        point *= Fix32::from_bits(64);
        assert_eq!(point, pt(64, 64));
        assert_eq!(Point::new(1, 2) * 8, Point::new(8, 16));
    }

    #[test]
    fn div() {
        assert_eq!(Point::new(10, 16) / 2, Point::new(5, 8));
        let mut point = Point::new(10, 16);
        point /= 2;
        assert_eq!(point, Point::new(5, 8));
    }

    #[test]
    fn neg() {
        assert_eq!(-Point::new(1, -2), Point::new(-1, 2));
        let p = pt(300, -7);
        assert_eq!(-(-p), p);
    }

    #[test]
    fn dot() {
        // (1, 2) · (3, -1) = 1
        let d = pt(256, 512).dot(pt(768, -256));
        assert_eq!(d, Fix64::ONE);
        assert_eq!(d.to_string(), "1:00000");
    }

    #[test]
    fn length() {
        assert_eq!(pt(768, 1024).length(), Fix32::from_int(5));
        assert_eq!(pt(-768, -1024).length(), Fix32::from_int(5));
        assert_eq!(Point::ZERO.length(), Fix32::ZERO);
        // sqrt(2) * 256 = 362.03...
        assert_eq!(pt(256, 256).length(), Fix32::from_bits(362));
    }

    #[test]
    fn norm() {
        assert_eq!(pt(768, 1024).norm(Fix32::from_int(10)), pt(1536, 2048));
        assert_eq!(pt(0, -100).norm(Fix32::ONE), pt(0, -256));
        for length in [0, 1, 256, -256, 100_000] {
            assert_eq!(Point::ZERO.norm(Fix32::from_bits(length)), Point::ZERO);
        }
    }

    #[test]
    fn right_angle_rotations() {
        let p = pt(256, 0);
        assert_eq!(p.rot90_cw(), pt(0, 256));
        assert_eq!(p.rot90_ccw(), pt(0, -256));
        let q = pt(300, -71);
        assert_eq!(q.rot90_cw().rot90_cw(), -q);
        assert_eq!(q.rot90_ccw().rot90_ccw(), -q);
        assert_eq!(q.rot90_cw().rot90_ccw(), q);
    }

    #[test]
    fn diagonal_rotations() {
        let p = pt(256, 0);
        assert_eq!(p.rot45_cw(), pt(181, 181));
        assert_eq!(p.rot135_cw(), pt(-181, 181));
        assert_eq!(p.rot45_ccw(), pt(181, -181));
        assert_eq!(p.rot135_ccw(), pt(-181, -181));
        assert_eq!(pt(0, 256).rot45_cw(), pt(-181, 181));
    }

    #[test]
    fn eight_eighths_of_a_turn() {
        for p in [pt(256, 0), pt(0, 256), pt(300, -100), pt(-3200, 7040), pt(25600, 0)] {
            let cw = (0..8).fold(p, |q, _| q.rot45_cw());
            let ccw = (0..8).fold(p, |q, _| q.rot45_ccw());
            for q in [cw, ccw] {
                let error = p - q;
                assert!(error.x.abs() < Fix32::ONE, "{p} -> {q}");
                assert!(error.y.abs() < Fix32::ONE, "{p} -> {q}");
            }
        }
    }

    #[test]
    fn display() {
        assert_eq!(pt(320, -256).to_string(), "(1:064, -1:000)");
        assert_eq!(Point::new(1, 2).to_string(), "(1, 2)");
    }
}
