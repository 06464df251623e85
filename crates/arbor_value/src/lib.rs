//! Arbor Value - array value model for the Arbor execution tree.
//!
//! This crate provides:
//! - `Value`: a scalar, vector or matrix of `f64`
//! - `Range`: shape descriptors requested by constructive primitives
//! - `Matrix`: dense row-major storage backing matrix values
//!
//! # Invariants
//!
//! A value's dimensionality is a function of its variant: a `Value` can
//! never report a rank that contradicts its stored shape. Values are
//! immutable once produced and are handed between primitives by move.

mod matrix;
mod range;

use std::fmt;

pub use matrix::Matrix;
pub use range::{extract_dimensions, extract_num_dimensions, Dimensions, Range};

/// Why `Value::broadcast` could not build a value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BroadcastError {
    #[error("unsupported number of dimensions: {rank}")]
    UnsupportedRank { rank: usize },
    #[error("the shape {shape} is too large to allocate")]
    TooLarge { shape: Range },
}

/// Array value produced by evaluating a primitive.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Rank 0, shape `()`.
    Scalar(f64),
    /// Rank 1, shape `(n)`.
    Vector(Vec<f64>),
    /// Rank 2, shape `(r, c)`.
    Matrix(Matrix),
}

impl Value {
    #[inline]
    pub fn scalar(value: f64) -> Self {
        Value::Scalar(value)
    }

    #[inline]
    pub fn vector(elements: Vec<f64>) -> Self {
        Value::Vector(elements)
    }

    #[inline]
    pub fn matrix(matrix: Matrix) -> Self {
        Value::Matrix(matrix)
    }

    /// Build a value of the rank requested by `shape`, every element equal
    /// to `element`.
    ///
    /// - rank 0: the scalar itself, no allocation
    /// - rank 1: a vector of length `shape[0]`
    /// - rank 2: a `shape[0] × shape[1]` matrix
    ///
    /// Fails for any other rank, and when the element buffer cannot be
    /// allocated.
    pub fn broadcast(element: f64, shape: &Range) -> Result<Self, BroadcastError> {
        let dims = extract_dimensions(shape);
        let too_large = || BroadcastError::TooLarge {
            shape: shape.clone(),
        };
        match extract_num_dimensions(shape) {
            0 => Ok(Value::Scalar(element)),
            1 => matrix::filled_elements(dims[0], element)
                .map(Value::Vector)
                .ok_or_else(too_large),
            2 => Matrix::filled(dims[0], dims[1], element)
                .map(Value::Matrix)
                .ok_or_else(too_large),
            rank => Err(BroadcastError::UnsupportedRank { rank }),
        }
    }

    /// Rank of the value: 0, 1 or 2.
    #[inline]
    pub fn num_dimensions(&self) -> usize {
        match self {
            Value::Scalar(_) => 0,
            Value::Vector(_) => 1,
            Value::Matrix(_) => 2,
        }
    }

    /// Per-axis extents, padded with `0` like `extract_dimensions`.
    pub fn dimensions(&self) -> Dimensions {
        match self {
            Value::Scalar(_) => [0, 0],
            Value::Vector(v) => [v.len(), 0],
            Value::Matrix(m) => [m.rows(), m.cols()],
        }
    }

    /// Shape descriptor: `()`, `(n)` or `(r, c)`.
    pub fn shape(&self) -> Range {
        match self {
            Value::Scalar(_) => Range::new(),
            Value::Vector(v) => Range::from([v.len()]),
            Value::Matrix(m) => Range::from([m.rows(), m.cols()]),
        }
    }

    /// Total number of elements.
    pub fn size(&self) -> usize {
        match self {
            Value::Scalar(_) => 1,
            Value::Vector(v) => v.len(),
            Value::Matrix(m) => m.as_slice().len(),
        }
    }

    /// The element of a rank-0 value.
    #[inline]
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(x) => Some(*x),
            _ => None,
        }
    }

    /// Iterate over all elements in row-major order.
    pub fn elements(&self) -> impl Iterator<Item = f64> + '_ {
        let slice: &[f64] = match self {
            Value::Scalar(x) => std::slice::from_ref(x),
            Value::Vector(v) => v,
            Value::Matrix(m) => m.as_slice(),
        };
        slice.iter().copied()
    }

    /// Apply `f` element-wise, preserving rank and shape.
    #[must_use]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        match self {
            Value::Scalar(x) => Value::Scalar(f(x)),
            Value::Vector(v) => Value::Vector(v.into_iter().map(f).collect()),
            Value::Matrix(m) => Value::Matrix(m.map(f)),
        }
    }

    /// Human-readable kind, used in type errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Vector(_) => "vector",
            Value::Matrix(_) => "matrix",
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(value)
    }
}

impl From<Vec<f64>> for Value {
    fn from(elements: Vec<f64>) -> Self {
        Value::Vector(elements)
    }
}

impl From<Matrix> for Value {
    fn from(matrix: Matrix) -> Self {
        Value::Matrix(matrix)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(x) => write!(f, "{x}"),
            Value::Vector(v) => matrix::write_elements(f, v),
            Value::Matrix(m) => write!(f, "{m}"),
        }
    }
}
