//! Compact encoding of a sequence of curves.
//!
//! A [`Path`] is a flat buffer of 24.8 scalars made of records. Each record
//! carries its tag at both ends:
//!
//! | tag | segment   | layout                         |
//! |-----|-----------|--------------------------------|
//! | 0   | start     | `0 x y 0`                      |
//! | 1   | linear    | `1 x y 1`                      |
//! | 2   | quadratic | `2 cx cy x y 2`                |
//! | 3   | cubic     | `3 c0x c0y c1x c1y x y 3`      |
//!
//! Reading forward, the leading tag gives the length of the record; reading
//! backward, the trailing tag does. This is what allows a contour to be
//! replayed in reverse without an index.

use alloc::vec::Vec;
use core::fmt;

use crate::{
    adder::{Adder, PathElement},
    error::PathError,
    stroke::{Capper, Joiner, Stroker},
    types::{BoundingBox, Fix32, Point},
};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Tag {
    Start,
    Line,
    Quad,
    Cubic,
}

impl Tag {
    fn from_fixed(value: Fix32) -> Option<Self> {
        match value.to_bits() {
            0 => Some(Self::Start),
            1 => Some(Self::Line),
            2 => Some(Self::Quad),
            3 => Some(Self::Cubic),
            _ => None,
        }
    }

    fn to_fixed(self) -> Fix32 {
        Fix32::from_bits(self as i32)
    }

    /// Total number of scalars in a record, both tags included.
    fn record_len(self) -> usize {
        match self {
            Self::Start | Self::Line => 4,
            Self::Quad => 6,
            Self::Cubic => 8,
        }
    }
}

/// A sequence of curves, and a curve is a start point followed by a
/// sequence of linear, quadratic or cubic segments.
///
/// Paths are built through the [`Adder`] implementation, by appending other
/// paths with [`add_path`](Self::add_path), or from a raw buffer with
/// [`TryFrom`], which validates the encoding. A `Path` is therefore always
/// well formed.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Fix32>", into = "Vec<Fix32>")
)]
pub struct Path(Vec<Fix32>);

impl Path {
    /// Creates a new empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty path with room for `capacity` scalars.
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Returns the number of encoded scalars.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing has been added since creation or the last
    /// [`clear`](Self::clear).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of scalars the path can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.0.capacity()
    }

    /// Returns the encoded buffer.
    pub fn as_slice(&self) -> &[Fix32] {
        &self.0
    }

    /// Consumes the path, returning the encoded buffer.
    pub fn into_raw(self) -> Vec<Fix32> {
        self.0
    }

    /// Removes all curves, keeping the allocated storage for reuse.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Appends a copy of all curves in `other`.
    pub fn add_path(&mut self, other: &Path) {
        self.grow(other.len());
        self.0.extend_from_slice(&other.0);
    }

    /// Appends the outline of `other` stroked at the given `width`.
    ///
    /// The outline is computed by `stroker`; `capper` and `joiner` are
    /// handed to it untouched. If the stroker fails, anything it already
    /// emitted is removed again.
    pub fn add_stroke(
        &mut self,
        stroker: &(impl Stroker + ?Sized),
        other: &Path,
        width: Fix32,
        capper: &dyn Capper,
        joiner: &dyn Joiner,
    ) -> Result<(), PathError> {
        let len = self.len();
        let result = stroker.stroke(self, other, width, capper, joiner);
        if result.is_err() {
            self.0.truncate(len);
        }
        result
    }

    /// Returns the first point of a non-empty path.
    pub fn first_point(&self) -> Option<Point> {
        match self.0.as_slice() {
            [_, x, y, ..] => Some(Point::new(*x, *y)),
            _ => None,
        }
    }

    /// Returns the last point of a non-empty path.
    pub fn last_point(&self) -> Option<Point> {
        match self.0.as_slice() {
            [.., x, y, _] => Some(Point::new(*x, *y)),
            _ => None,
        }
    }

    /// Returns an iterator over the decoded records.
    pub fn records(&self) -> Records<'_> {
        Records::new(&self.0)
    }

    /// Returns an iterator over the contours of the path.
    pub fn contours(&self) -> Contours<'_> {
        Contours { buf: &self.0, pos: 0 }
    }

    /// Returns the smallest box containing every point of the path,
    /// including control points.
    pub fn control_box(&self) -> Option<BoundingBox<Fix32>> {
        let mut points = self.elements().flat_map(points_of);
        let mut bbox = BoundingBox::from_point(points.next()?);
        for point in points {
            bbox.include(point);
        }
        Some(bbox)
    }

    /// Replays every curve, in order, onto `adder`.
    pub fn replay(&self, adder: &mut (impl Adder + ?Sized)) {
        for element in self.elements() {
            element.apply(adder);
        }
    }

    // never yields an error on a well formed buffer
    fn elements(&self) -> impl Iterator<Item = PathElement> + '_ {
        self.records().map_while(Result::ok)
    }

    // Grows the buffer geometrically when `additional` scalars do not fit.
    fn grow(&mut self, additional: usize) {
        let len = self.0.len() + additional;
        if len > self.0.capacity() {
            let capacity = 2 * len + 8;
            log::trace!(
                "growing path from {} to {capacity} scalars",
                self.0.capacity()
            );
            self.0.reserve_exact(capacity - self.0.len());
        }
    }

    fn push_record<const N: usize>(&mut self, tag: Tag, points: [Point; N]) {
        let tag = tag.to_fixed();
        self.grow(2 * N + 2);
        self.0.push(tag);
        for point in points {
            self.0.push(point.x);
            self.0.push(point.y);
        }
        self.0.push(tag);
    }

    fn push_segment<const N: usize>(&mut self, tag: Tag, points: [Point; N]) {
        assert!(
            !self.0.is_empty(),
            "path segment added before the start of a curve"
        );
        self.push_record(tag, points);
    }
}

fn points_of(element: PathElement) -> impl Iterator<Item = Point> {
    let (points, len) = match element {
        PathElement::Start { at } => ([at, at, at], 1),
        PathElement::Line { to } => ([to, to, to], 1),
        PathElement::Quad { ctrl, to } => ([ctrl, to, to], 2),
        PathElement::Cubic { ctrl0, ctrl1, to } => ([ctrl0, ctrl1, to], 3),
    };
    points.into_iter().take(len)
}

/// # Panics
///
/// The segment methods panic if called on an empty path, since there is no
/// current point for the segment to begin at.
impl Adder for Path {
    fn start(&mut self, a: Point) {
        self.push_record(Tag::Start, [a]);
    }

    fn add1(&mut self, b: Point) {
        self.push_segment(Tag::Line, [b]);
    }

    fn add2(&mut self, b: Point, c: Point) {
        self.push_segment(Tag::Quad, [b, c]);
    }

    fn add3(&mut self, b: Point, c: Point, d: Point) {
        self.push_segment(Tag::Cubic, [b, c, d]);
    }
}

impl TryFrom<Vec<Fix32>> for Path {
    type Error = PathError;

    fn try_from(buf: Vec<Fix32>) -> Result<Self, Self::Error> {
        validate(&buf)?;
        Ok(Self(buf))
    }
}

impl From<Path> for Vec<Fix32> {
    fn from(path: Path) -> Self {
        path.0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_records(f, &self.0)
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Path").field(&format_args!("{self}")).finish()
    }
}

/// Writes the records of an encoded buffer as space separated tokens such
/// as `S0[0:000 0:000] A1[1:000 0:000]`.
///
/// Fails on the first malformed record.
pub fn write_records(f: &mut impl fmt::Write, buf: &[Fix32]) -> fmt::Result {
    for (i, record) in Records::new(buf).enumerate() {
        if i != 0 {
            f.write_char(' ')?;
        }
        match record {
            Ok(element) => write!(f, "{element}")?,
            Err(e) => {
                log::warn!("cannot format path: {e}");
                return Err(fmt::Error);
            }
        }
    }
    Ok(())
}

/// Checks that `buf` is a sequence of well formed contours.
pub fn validate(buf: &[Fix32]) -> Result<(), PathError> {
    Records::new(buf).try_for_each(|record| record.map(|_| ()))
}

/// Iterator over the records of an encoded buffer.
///
/// Yields an error and stops at the first record that is malformed, or
/// that is a segment not preceded by the start of a curve.
#[derive(Clone, Debug)]
pub struct Records<'a> {
    buf: &'a [Fix32],
    pos: usize,
    started: bool,
    failed: bool,
}

impl<'a> Records<'a> {
    /// Creates an iterator over the records of `buf`.
    pub fn new(buf: &'a [Fix32]) -> Self {
        Self {
            buf,
            pos: 0,
            started: false,
            failed: false,
        }
    }

    fn decode(&mut self) -> Result<PathElement, PathError> {
        let index = self.pos;
        let leading = self.buf[index];
        let tag = Tag::from_fixed(leading).ok_or(PathError::InvalidTag {
            index,
            tag: leading,
        })?;
        let record = self
            .buf
            .get(index..index + tag.record_len())
            .ok_or(PathError::TruncatedRecord { index })?;
        let trailing = record[record.len() - 1];
        if trailing != leading {
            return Err(PathError::MismatchedTag {
                index,
                leading,
                trailing,
            });
        }
        let point = |i: usize| Point::new(record[i], record[i + 1]);
        let element = match tag {
            Tag::Start => PathElement::Start { at: point(1) },
            Tag::Line => PathElement::Line { to: point(1) },
            Tag::Quad => PathElement::Quad {
                ctrl: point(1),
                to: point(3),
            },
            Tag::Cubic => PathElement::Cubic {
                ctrl0: point(1),
                ctrl1: point(3),
                to: point(5),
            },
        };
        if tag != Tag::Start && !self.started {
            return Err(PathError::MissingStart { index });
        }
        self.started = true;
        self.pos += record.len();
        Ok(element)
    }
}

impl Iterator for Records<'_> {
    type Item = Result<PathElement, PathError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.buf.len() {
            return None;
        }
        let result = self.decode();
        if let Err(e) = &result {
            log::warn!("malformed path record: {e}");
            self.failed = true;
        }
        Some(result)
    }
}

/// Replays the last contour of `contour` backwards onto `target`.
///
/// The walk starts from the trailing tag of the buffer and follows trailing
/// tags back to the start of the contour. Only segments are emitted: the
/// caller is expected to have started `target` at the contour's last point.
/// A linear segment reverses to a linear segment, a quadratic keeps its
/// control point and a cubic swaps its two control points.
///
/// For example, a line from A to B followed by a quadratic from B through C
/// to D is encoded as
///
/// ```text
/// index: 0 1 2 3 4 5 6 7 8 9 10 11 12 13
/// value: 0 A A 0 1 B B 1 2 C C  D  D  2
/// ```
///
/// and reversing it emits `add2(C, B)` followed by `add1(A)`.
///
/// An empty buffer is a no-op. On error, `target` may already have
/// received the segments that follow the malformed record.
pub fn reverse_contour(
    target: &mut (impl Adder + ?Sized),
    contour: &[Fix32],
) -> Result<(), PathError> {
    let Some(mut index) = contour.len().checked_sub(1) else {
        return Ok(());
    };
    log::trace!("reversing contour of {} scalars", contour.len());
    let result = loop {
        let trailing = contour[index];
        let Some(tag) = Tag::from_fixed(trailing) else {
            break Err(PathError::InvalidTag {
                index,
                tag: trailing,
            });
        };
        let Some(first) = (index + 1).checked_sub(tag.record_len()) else {
            break Err(PathError::TruncatedRecord { index });
        };
        let leading = contour[first];
        if leading != trailing {
            break Err(PathError::MismatchedTag {
                index: first,
                leading,
                trailing,
            });
        }
        if tag == Tag::Start {
            break Ok(());
        }
        // the segment ends where the previous record left off
        if first < Tag::Start.record_len() {
            break Err(PathError::MissingStart { index: first });
        }
        let previous = Point::new(contour[first - 3], contour[first - 2]);
        let point = |i: usize| Point::new(contour[first + i], contour[first + i + 1]);
        match tag {
            Tag::Line => target.add1(previous),
            Tag::Quad => target.add2(point(1), previous),
            Tag::Cubic => target.add3(point(3), point(1), previous),
            Tag::Start => unreachable!(),
        }
        index = first - 1;
    };
    if let Err(e) = &result {
        log::warn!("cannot reverse contour: {e}");
    }
    result
}

/// A single contour of a [`Path`]: a start record followed by its
/// segments.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Contour<'a>(&'a [Fix32]);

impl<'a> Contour<'a> {
    /// Returns the encoded records of this contour.
    pub fn as_slice(&self) -> &'a [Fix32] {
        self.0
    }

    /// Returns the point at which the contour starts.
    pub fn first_point(&self) -> Point {
        Point::new(self.0[1], self.0[2])
    }

    /// Returns the end point of the last segment, or the start point if the
    /// contour has no segments.
    pub fn last_point(&self) -> Point {
        let len = self.0.len();
        Point::new(self.0[len - 3], self.0[len - 2])
    }

    /// Returns true if the contour ends where it starts.
    pub fn is_closed(&self) -> bool {
        self.first_point() == self.last_point()
    }

    /// Returns an iterator over the records of this contour.
    pub fn records(&self) -> Records<'a> {
        Records::new(self.0)
    }

    /// Replays the segments of this contour backwards onto `target`.
    ///
    /// See [`reverse_contour`].
    pub fn reverse_into(&self, target: &mut (impl Adder + ?Sized)) -> Result<(), PathError> {
        reverse_contour(target, self.0)
    }
}

/// Iterator over the contours of a [`Path`].
#[derive(Clone, Debug)]
pub struct Contours<'a> {
    buf: &'a [Fix32],
    pos: usize,
}

impl<'a> Iterator for Contours<'a> {
    type Item = Contour<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.buf.len() {
            return None;
        }
        let start = self.pos;
        let mut end = start + Tag::Start.record_len();
        while let Some(tag) = self.buf.get(end).copied().and_then(Tag::from_fixed) {
            if tag == Tag::Start {
                break;
            }
            end += tag.record_len();
        }
        let end = end.min(self.buf.len());
        self.pos = end;
        Some(Contour(&self.buf[start..end]))
    }
}
