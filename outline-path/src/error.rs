//! Errors that occur when decoding an encoded path.

use core::fmt;

use crate::types::Fix32;

/// A path encoding could not be decoded.
///
/// Every variant carries the index into the encoded buffer at which the
/// problem was detected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathError {
    /// The value at this index is not a record tag.
    InvalidTag { index: usize, tag: Fix32 },
    /// The record beginning (or ending) at this index runs past the buffer.
    TruncatedRecord { index: usize },
    /// The leading and trailing tags of the record at this index differ.
    MismatchedTag {
        index: usize,
        leading: Fix32,
        trailing: Fix32,
    },
    /// A segment record at this index is not preceded by the start of a
    /// contour.
    MissingStart { index: usize },
}

impl PathError {
    /// Returns the buffer index at which decoding failed.
    pub fn index(&self) -> usize {
        match self {
            Self::InvalidTag { index, .. }
            | Self::TruncatedRecord { index }
            | Self::MismatchedTag { index, .. }
            | Self::MissingStart { index } => *index,
        }
    }
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidTag { index, tag } => write!(
                f,
                "Invalid path tag {} at index {index}",
                tag.to_bits()
            ),
            Self::TruncatedRecord { index } => {
                write!(f, "Path record at index {index} is truncated")
            }
            Self::MismatchedTag {
                index,
                leading,
                trailing,
            } => write!(
                f,
                "Path record at index {index} starts with tag {} but ends with tag {}",
                leading.to_bits(),
                trailing.to_bits()
            ),
            Self::MissingStart { index } => write!(
                f,
                "Path segment at index {index} does not follow the start of a contour"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PathError {}
