//! Shape descriptors for constructive primitives.
//!
//! A `Range` is the requested-dimensions list handed to primitives such as
//! `constant`. It may hold any number of extents; consumers decide which
//! ranks they accept (rank 0, 1 and 2 are the only ones the value model can
//! build).

use std::fmt;

use smallvec::SmallVec;

/// Per-axis extents `[rows, columns]`.
///
/// Axes that do not exist for a given rank are reported as `0`.
pub type Dimensions = [usize; 2];

/// Ordered sequence of requested dimension sizes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    extents: SmallVec<[usize; 2]>,
}

impl Range {
    /// Create an empty shape descriptor.
    pub fn new() -> Self {
        Range {
            extents: SmallVec::new(),
        }
    }

    /// Append an extent.
    pub fn push(&mut self, extent: usize) {
        self.extents.push(extent);
    }

    /// Number of requested dimensions.
    #[inline]
    pub fn len(&self) -> usize {
        self.extents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    /// Extent of axis `index`, if present.
    #[inline]
    pub fn get(&self, index: usize) -> Option<usize> {
        self.extents.get(index).copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.extents
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.extents.iter().copied()
    }
}

impl FromIterator<usize> for Range {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Range {
            extents: iter.into_iter().collect(),
        }
    }
}

impl From<&[usize]> for Range {
    fn from(extents: &[usize]) -> Self {
        extents.iter().copied().collect()
    }
}

impl<const N: usize> From<[usize; N]> for Range {
    fn from(extents: [usize; N]) -> Self {
        extents.into_iter().collect()
    }
}

impl From<Vec<usize>> for Range {
    fn from(extents: Vec<usize>) -> Self {
        Range {
            extents: SmallVec::from_vec(extents),
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, extent) in self.extents.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{extent}")?;
        }
        write!(f, ")")
    }
}

/// Number of dimensions requested by a shape descriptor.
#[inline]
pub fn extract_num_dimensions(shape: &Range) -> usize {
    shape.len()
}

/// Extents requested by a shape descriptor, as `[first, second]`.
///
/// A missing second axis is padded with `0` rather than rejected, so a
/// rank-1 descriptor `(n)` yields `[n, 0]`. Callers that only need rank 1
/// must ignore the second field. An empty descriptor yields `[0, 0]`;
/// primitives reject empty shapes before they get here.
pub fn extract_dimensions(shape: &Range) -> Dimensions {
    [shape.get(0).unwrap_or(0), shape.get(1).unwrap_or(0)]
}
