//! The interface for producing and consuming curves.

use alloc::vec::Vec;
use core::fmt;

use crate::types::Point;

/// Interface for accepting a sequence of curves.
///
/// A curve starts with a call to [`start`](Adder::start) followed by any
/// number of linear, quadratic or cubic segments, each beginning at the end
/// point of the previous one. Calling a segment method before the first
/// `start` is a contract violation; implementations may panic.
///
/// This is implemented by [`Path`](crate::Path) as well as by any algorithm
/// that consumes an outline, such as a rasterizer or a stroker.
pub trait Adder {
    /// Starts a new curve at `a`.
    fn start(&mut self, a: Point);

    /// Adds a linear segment from the current point to `b`.
    fn add1(&mut self, b: Point);

    /// Adds a quadratic segment from the current point with a control point
    /// at `b` and ending at `c`.
    fn add2(&mut self, b: Point, c: Point);

    /// Adds a cubic segment from the current point with control points at
    /// `b` and `c` and ending at `d`.
    fn add3(&mut self, b: Point, c: Point, d: Point);
}

impl<T: Adder + ?Sized> Adder for &mut T {
    fn start(&mut self, a: Point) {
        (**self).start(a)
    }

    fn add1(&mut self, b: Point) {
        (**self).add1(b)
    }

    fn add2(&mut self, b: Point, c: Point) {
        (**self).add2(b, c)
    }

    fn add3(&mut self, b: Point, c: Point, d: Point) {
        (**self).add3(b, c, d)
    }
}

/// Single record of a path.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PathElement {
    /// Begin a new curve at `at`.
    Start { at: Point },
    /// Line from the current point to `to`.
    Line { to: Point },
    /// Quadratic bezier from the current point with a control point at
    /// `ctrl` and ending at `to`.
    Quad { ctrl: Point, to: Point },
    /// Cubic bezier from the current point with control points at `ctrl0`
    /// and `ctrl1` and ending at `to`.
    Cubic {
        ctrl0: Point,
        ctrl1: Point,
        to: Point,
    },
}

impl PathElement {
    /// Returns the point at which this element leaves the pen.
    pub fn end_point(&self) -> Point {
        match *self {
            Self::Start { at } => at,
            Self::Line { to } | Self::Quad { to, .. } | Self::Cubic { to, .. } => to,
        }
    }

    /// Replays this element onto `adder`.
    pub fn apply(&self, adder: &mut (impl Adder + ?Sized)) {
        match *self {
            Self::Start { at } => adder.start(at),
            Self::Line { to } => adder.add1(to),
            Self::Quad { ctrl, to } => adder.add2(ctrl, to),
            Self::Cubic { ctrl0, ctrl1, to } => adder.add3(ctrl0, ctrl1, to),
        }
    }
}

/// Formats as the tag name followed by the raw coordinate payload, for
/// example `A2[1:000 2:000 3:000 4:128]`.
impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start { at } => write!(f, "S0[{} {}]", at.x, at.y),
            Self::Line { to } => write!(f, "A1[{} {}]", to.x, to.y),
            Self::Quad { ctrl, to } => {
                write!(f, "A2[{} {} {} {}]", ctrl.x, ctrl.y, to.x, to.y)
            }
            Self::Cubic { ctrl0, ctrl1, to } => write!(
                f,
                "A3[{} {} {} {} {} {}]",
                ctrl0.x, ctrl0.y, ctrl1.x, ctrl1.y, to.x, to.y
            ),
        }
    }
}

impl Adder for Vec<PathElement> {
    fn start(&mut self, a: Point) {
        self.push(PathElement::Start { at: a })
    }

    fn add1(&mut self, b: Point) {
        self.push(PathElement::Line { to: b })
    }

    fn add2(&mut self, b: Point, c: Point) {
        self.push(PathElement::Quad { ctrl: b, to: c })
    }

    fn add3(&mut self, b: Point, c: Point, d: Point) {
        self.push(PathElement::Cubic {
            ctrl0: b,
            ctrl1: c,
            to: d,
        })
    }
}

/// Adder that drops all curves into the ether.
pub struct NullAdder;

impl Adder for NullAdder {
    fn start(&mut self, _a: Point) {}
    fn add1(&mut self, _b: Point) {}
    fn add2(&mut self, _b: Point, _c: Point) {}
    fn add3(&mut self, _b: Point, _c: Point, _d: Point) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn pt(x: i32, y: i32) -> Point {
        Point::from_bits(x, y)
    }

    fn draw(adder: &mut impl Adder) {
        adder.start(pt(0, 0));
        adder.add1(pt(256, 0));
        adder.add2(pt(512, 128), pt(256, 256));
        adder.add3(pt(128, 384), pt(0, 384), pt(0, 256));
    }

    #[test]
    fn record_elements() {
        let mut elements: Vec<PathElement> = vec![];
        draw(&mut elements);
        assert_eq!(
            elements,
            [
                PathElement::Start { at: pt(0, 0) },
                PathElement::Line { to: pt(256, 0) },
                PathElement::Quad {
                    ctrl: pt(512, 128),
                    to: pt(256, 256)
                },
                PathElement::Cubic {
                    ctrl0: pt(128, 384),
                    ctrl1: pt(0, 384),
                    to: pt(0, 256)
                },
            ]
        );
        assert_eq!(elements[2].end_point(), pt(256, 256));
    }

    #[test]
    fn replay_through_dyn_adder() {
        let mut elements: Vec<PathElement> = vec![];
        draw(&mut elements);
        let mut replayed: Vec<PathElement> = vec![];
        let mut target: &mut dyn Adder = &mut replayed;
        for element in &elements {
            element.apply(&mut target);
        }
        assert_eq!(replayed, elements);
        // nothing to observe, but it must accept any sequence
        draw(&mut NullAdder);
    }

    #[test]
    fn element_display() {
        assert_eq!(
            PathElement::Quad {
                ctrl: pt(256, 512),
                to: pt(768, 1152)
            }
            .to_string(),
            "A2[1:000 2:000 3:000 4:128]"
        );
        assert_eq!(
            PathElement::Start { at: pt(-64, 0) }.to_string(),
            "S0[-0:064 0:000]"
        );
    }
}
