//! The boundary between a path and the algorithm that strokes it.
//!
//! Stroking itself lives outside this crate. A [`Stroker`] receives a source
//! path and emits the fill outline of its stroke onto an [`Adder`]; cap and
//! join styles are strategies it invokes at the ends of open contours and
//! between segments.

use crate::{
    adder::Adder,
    error::PathError,
    path::Path,
    types::{Fix32, Point},
};

/// Adds a cap to the end of a stroked contour.
pub trait Capper {
    /// Adds a cap to `p` given a pivot point and the normal vector of a
    /// terminal segment. The normal's length is `half_width`.
    fn cap(&self, p: &mut dyn Adder, half_width: Fix32, pivot: Point, n1: Point);
}

impl<F> Capper for F
where
    F: Fn(&mut dyn Adder, Fix32, Point, Point),
{
    fn cap(&self, p: &mut dyn Adder, half_width: Fix32, pivot: Point, n1: Point) {
        self(p, half_width, pivot, n1)
    }
}

/// Joins two consecutive segments of a stroked contour.
pub trait Joiner {
    /// Adds a join to the two sides of a stroke (`lhs` and `rhs`) given a
    /// pivot point and the normal vectors of the trailing and leading
    /// segments. Both normals have length `half_width`.
    fn join(
        &self,
        lhs: &mut dyn Adder,
        rhs: &mut dyn Adder,
        half_width: Fix32,
        pivot: Point,
        n0: Point,
        n1: Point,
    );
}

impl<F> Joiner for F
where
    F: Fn(&mut dyn Adder, &mut dyn Adder, Fix32, Point, Point, Point),
{
    fn join(
        &self,
        lhs: &mut dyn Adder,
        rhs: &mut dyn Adder,
        half_width: Fix32,
        pivot: Point,
        n0: Point,
        n1: Point,
    ) {
        self(lhs, rhs, half_width, pivot, n0, n1)
    }
}

/// Computes the outline of a stroked path.
pub trait Stroker {
    /// Emits onto `target` the closed outline covering `source` stroked at
    /// `width`, using `capper` and `joiner` for caps and joins.
    ///
    /// Errors from decoding `source` (for example while walking one of its
    /// contours backwards) are propagated.
    fn stroke(
        &self,
        target: &mut dyn Adder,
        source: &Path,
        width: Fix32,
        capper: &dyn Capper,
        joiner: &dyn Joiner,
    ) -> Result<(), PathError>;
}
