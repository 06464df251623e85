//! Dense row-major matrix storage.

use std::fmt;

/// Dense `rows × cols` matrix of `f64`, stored row-major.
///
/// The element buffer always holds exactly `rows * cols` entries; all
/// constructors maintain this.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a matrix with every element set to `value`.
    ///
    /// Returns `None` when `rows * cols` overflows or the buffer cannot be
    /// allocated.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Option<Self> {
        let data = filled_elements(rows.checked_mul(cols)?, value)?;
        Some(Matrix { rows, cols, data })
    }

    /// Build a matrix from row vectors.
    ///
    /// Returns `None` if the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != cols) {
            return None;
        }
        let num_rows = rows.len();
        Some(Matrix {
            rows: num_rows,
            cols,
            data: rows.into_iter().flatten().collect(),
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Element at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col).copied()
    }

    /// Row-major view of all elements.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Iterate over rows.
    pub fn row_iter(&self) -> impl Iterator<Item = &[f64]> + '_ {
        // chunks(0) panics; an empty-column matrix has no elements to yield
        // but still reports `rows` empty rows.
        let width = self.cols.max(1);
        self.data
            .chunks(width)
            .chain(std::iter::repeat(&[][..]))
            .take(self.rows)
    }

    /// Apply `f` element-wise, preserving the shape.
    #[must_use]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.row_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write_elements(f, row)?;
        }
        write!(f, "]")
    }
}

/// `len` copies of `value`, or `None` if the buffer cannot be allocated.
pub(crate) fn filled_elements(len: usize, value: f64) -> Option<Vec<f64>> {
    let mut elements = Vec::new();
    elements.try_reserve_exact(len).ok()?;
    elements.resize(len, value);
    Some(elements)
}

/// Write `[a, b, c]`.
pub(crate) fn write_elements(f: &mut fmt::Formatter<'_>, elements: &[f64]) -> fmt::Result {
    write!(f, "[")?;
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{element}")?;
    }
    write!(f, "]")
}
