//! Conversions between [`Path`] and kurbo's [`BezPath`].

use kurbo::{BezPath, PathEl};

use crate::{
    adder::Adder,
    error::PathError,
    path::Path,
    types::{Fix32, Point},
};

fn to_kurbo(point: Point) -> kurbo::Point {
    let point = point.map(Fix32::to_f64);
    kurbo::Point::new(point.x, point.y)
}

fn from_kurbo(point: kurbo::Point) -> Point {
    Point::new(Fix32::from_f64(point.x), Fix32::from_f64(point.y))
}

impl Adder for BezPath {
    fn start(&mut self, a: Point) {
        self.move_to(to_kurbo(a));
    }

    fn add1(&mut self, b: Point) {
        self.line_to(to_kurbo(b));
    }

    fn add2(&mut self, b: Point, c: Point) {
        self.quad_to(to_kurbo(b), to_kurbo(c));
    }

    fn add3(&mut self, b: Point, c: Point, d: Point) {
        self.curve_to(to_kurbo(b), to_kurbo(c), to_kurbo(d));
    }
}

impl Path {
    /// Converts to a kurbo path. Every 24.8 coordinate is exactly
    /// representable, so this is lossless.
    pub fn to_bez_path(&self) -> BezPath {
        let mut bez = BezPath::new();
        self.replay(&mut bez);
        bez
    }

    /// Converts from a kurbo path, rounding coordinates to the nearest 24.8
    /// value.
    ///
    /// A `ClosePath` becomes a line back to the start of its contour unless
    /// the contour already ends there. A segment that follows a `ClosePath`
    /// without a `MoveTo` starts a new contour at that same point, matching
    /// kurbo's notion of the current point.
    ///
    /// A segment that is not preceded by a `MoveTo` is reported as
    /// [`PathError::MissingStart`] at the index it would have been encoded at.
    pub fn from_bez_path(bez: &BezPath) -> Result<Self, PathError> {
        let mut path = Path::new();
        // start of the current subpath, and whether it has been closed
        let mut subpath: Option<(Point, bool)> = None;
        for el in bez.elements() {
            match (*el, subpath) {
                (PathEl::MoveTo(p), _) => {
                    let start = from_kurbo(p);
                    path.start(start);
                    subpath = Some((start, false));
                }
                (PathEl::ClosePath, Some((start, _))) => {
                    if path.last_point() != Some(start) {
                        path.add1(start);
                    }
                    subpath = Some((start, true));
                }
                (PathEl::ClosePath, None) => (),
                (_, None) => return Err(PathError::MissingStart { index: path.len() }),
                (segment, Some((start, closed))) => {
                    if closed {
                        log::trace!("restarting closed subpath at {start}");
                        path.start(start);
                        subpath = Some((start, false));
                    }
                    match segment {
                        PathEl::LineTo(p) => path.add1(from_kurbo(p)),
                        PathEl::QuadTo(p0, p1) => path.add2(from_kurbo(p0), from_kurbo(p1)),
                        PathEl::CurveTo(p0, p1, p2) => {
                            path.add3(from_kurbo(p0), from_kurbo(p1), from_kurbo(p2))
                        }
                        PathEl::MoveTo(_) | PathEl::ClosePath => unreachable!(),
                    }
                }
            }
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn to_kurbo_and_back() {
        let mut path = Path::new();
        path.start(Point::from_bits(0, 64));
        path.add1(Point::from_bits(2560, 64));
        path.add2(Point::from_bits(-300, 7), Point::from_bits(1, 1));
        path.add3(
            Point::from_bits(9, 8),
            Point::from_bits(7, 6),
            Point::from_bits(0, 64),
        );
        let bez = path.to_bez_path();
        assert_eq!(
            bez.elements()[..2],
            [
                PathEl::MoveTo(kurbo::Point::new(0.0, 0.25)),
                PathEl::LineTo(kurbo::Point::new(10.0, 0.25)),
            ]
        );
        assert_eq!(Path::from_bez_path(&bez).unwrap(), path);
    }

    #[test]
    fn from_kurbo_rounds_and_closes() {
        let bez = BezPath::from_vec(vec![
            PathEl::MoveTo(kurbo::Point::new(0.001, 0.0)),
            PathEl::LineTo(kurbo::Point::new(1.0, 0.999)),
            PathEl::ClosePath,
            PathEl::MoveTo(kurbo::Point::new(5.0, 5.0)),
            PathEl::LineTo(kurbo::Point::new(6.0, 5.0)),
            PathEl::LineTo(kurbo::Point::new(5.0, 5.0)),
            PathEl::ClosePath,
        ]);
        let path = Path::from_bez_path(&bez).unwrap();
        // the second contour already ends at its start, so gains no line
        assert_eq!(
            path.to_string(),
            "S0[0:000 0:000] A1[1:000 1:000] A1[0:000 0:000] \
             S0[5:000 5:000] A1[6:000 5:000] A1[5:000 5:000]"
        );
    }

    #[test]
    fn segment_after_close_starts_at_subpath_start() {
        let bez = BezPath::from_vec(vec![
            PathEl::MoveTo(kurbo::Point::new(0.0, 0.0)),
            PathEl::LineTo(kurbo::Point::new(10.0, 0.0)),
            PathEl::LineTo(kurbo::Point::new(10.0, 10.0)),
            PathEl::ClosePath,
            PathEl::LineTo(kurbo::Point::new(5.0, 5.0)),
            PathEl::QuadTo(kurbo::Point::new(7.0, 3.0), kurbo::Point::new(2.5, 0.5)),
            PathEl::ClosePath,
        ]);
        let path = Path::from_bez_path(&bez).unwrap();
        assert_eq!(
            path.to_string(),
            "S0[0:000 0:000] A1[10:000 0:000] A1[10:000 10:000] A1[0:000 0:000] \
             S0[0:000 0:000] A1[5:000 5:000] A2[7:000 3:000 2:128 0:128] A1[0:000 0:000]"
        );
        assert_eq!(
            path.to_bez_path().segments().collect::<Vec<_>>(),
            bez.segments().collect::<Vec<_>>()
        );
    }
}
