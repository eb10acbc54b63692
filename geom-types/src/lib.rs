//! Fixed-point scalar and vector types for glyph outlines.
//!
//! Coordinates are stored as 24.8 fixed point numbers ([`Fix32`]); the
//! product of two coordinates is a 48.16 number ([`Fix64`]). All arithmetic,
//! including the 45 degree rotations on [`Point`], is integer arithmetic
//! so results are bit-identical across platforms.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[cfg(all(not(feature = "std"), not(test)))]
#[macro_use]
extern crate core as std;

mod bbox;
mod fixed;
mod point;


pub use bbox::BoundingBox;
pub use fixed::{max_abs, Fix32, Fix64};
pub use point::Point;
