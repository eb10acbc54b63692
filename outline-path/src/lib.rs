//! Curve paths for glyph outline rendering.
//!
//! A [`Path`] stores a sequence of contours, each made of linear, quadratic
//! and cubic segments, in a compact encoding that can be walked in both
//! directions. Paths are built, and consumed, through the [`Adder`] trait:
//! the same interface is implemented by rasterizers and strokers, so a path
//! can be handed to either unchanged.
//!
//! ```
//! use outline_path::{types::Point, Adder, Path};
//!
//! let mut path = Path::new();
//! path.start(Point::from_bits(0, 0));
//! path.add1(Point::from_bits(256, 0));
//! path.add2(Point::from_bits(512, 256), Point::from_bits(256, 512));
//! assert_eq!(
//!     path.to_string(),
//!     "S0[0:000 0:000] A1[1:000 0:000] A2[2:000 1:000 1:000 2:000]"
//! );
//! ```

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

extern crate alloc;

/// Expose our underlying scalar crate.
pub extern crate geom_types as types;

mod adder;
mod error;
#[cfg(feature = "kurbo")]
mod kurbo_path;
mod path;
mod stroke;


pub use adder::{Adder, NullAdder, PathElement};
pub use error::PathError;
pub use path::{reverse_contour, validate, write_records, Contour, Contours, Path, Records};
pub use stroke::{Capper, Joiner, Stroker};
