//! Error types for primitive evaluation.
//!
//! Every failure carries the primitive's name and codename so that a single
//! message is enough to locate the offending node in a large tree.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` is the typed category; factory functions (e.g.
//! `wrong_arity()`) are the public way to build errors and fill in both the
//! kind and the rendered message.

use std::fmt;
use std::sync::Arc;

use arbor_value::{Range, Value};

use crate::Arity;

/// Result of evaluating a primitive.
pub type EvalResult = Result<Value, EvalError>;

/// Identity of a primitive instance for diagnostics.
///
/// Cheap to clone: continuations capture a `Site` instead of the node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Site {
    name: Arc<str>,
    codename: Arc<str>,
}

impl Site {
    pub fn new(name: &str, codename: &str) -> Self {
        Site {
            name: Arc::from(name),
            codename: Arc::from(codename),
        }
    }

    /// Human-readable primitive name, e.g. `constant`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source-level code name (file, line, column), possibly empty.
    pub fn codename(&self) -> &str {
        &self.codename
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.codename.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}({})", self.name, self.codename)
        }
    }
}

/// Violated shape-descriptor precondition.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ShapeViolation {
    #[error("the shape must not be empty")]
    Empty,
    #[error("the shape must not exceed two dimensions, got {rank}")]
    TooManyDimensions { rank: usize },
    #[error("shape extents must be non-negative integers, got {value}")]
    InvalidExtent { value: f64 },
    #[error("the shape {shape} is too large to allocate")]
    TooLarge { shape: Range },
}

/// Typed error category.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EvalErrorKind {
    /// Operand count outside the primitive's declared arity.
    #[error("requires {expected}, got {got}")]
    Arity { expected: Arity, got: usize },

    /// An operand expression is unset or ill-formed.
    #[error("{detail}")]
    InvalidOperand { detail: String },

    /// An operand resolved to a value of the wrong kind or rank.
    #[error("{operand} must be {expected}, got {got}")]
    TypeMismatch {
        operand: String,
        expected: &'static str,
        got: &'static str,
    },

    /// Shape descriptor is empty, too long, has a bad extent, or describes
    /// more elements than can be allocated.
    #[error(transparent)]
    Shape(ShapeViolation),

    /// Rank outside {0, 1, 2}.
    #[error("unsupported number of dimensions: {rank}")]
    UnsupportedRank { rank: usize },

    /// Factory lookup for a name with no registration record.
    #[error("attempting to instantiate an unknown primitive type: {name}")]
    UnknownPrimitive { name: String },

    /// A spawned statement task panicked or was shut down by the runtime.
    #[error("statement task failed: {detail}")]
    TaskFailed { detail: String },
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Name of the primitive that raised the error.
    pub primitive: String,
    /// Code name of the primitive that raised the error.
    pub codename: String,
    /// Rendered message, see `generate_error_message`.
    pub message: String,
}

impl EvalError {
    /// Create an error raised by the primitive at `site`.
    #[cold]
    pub fn new(site: &Site, kind: EvalErrorKind) -> Self {
        let message = generate_error_message(&kind.to_string(), site.name(), site.codename());
        EvalError {
            kind,
            primitive: site.name().to_string(),
            codename: site.codename().to_string(),
            message,
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EvalError {}

/// Build the user-visible message `name(codename): message`.
///
/// The codename part is omitted when empty.
pub fn generate_error_message(message: &str, name: &str, codename: &str) -> String {
    if codename.is_empty() {
        format!("{name}: {message}")
    } else {
        format!("{name}({codename}): {message}")
    }
}

// Factory functions

#[cold]
pub fn wrong_arity(site: &Site, expected: Arity, got: usize) -> EvalError {
    EvalError::new(site, EvalErrorKind::Arity { expected, got })
}

#[cold]
pub fn invalid_operands(site: &Site) -> EvalError {
    EvalError::new(
        site,
        EvalErrorKind::InvalidOperand {
            detail: format!(
                "the {} primitive requires that the arguments given by the operands array are valid",
                site.name()
            ),
        },
    )
}

#[cold]
pub fn argument_out_of_range(site: &Site, index: usize, supplied: usize) -> EvalError {
    EvalError::new(
        site,
        EvalErrorKind::InvalidOperand {
            detail: format!("argument index {index} out of range ({supplied} supplied)"),
        },
    )
}

#[cold]
pub fn type_mismatch(
    site: &Site,
    operand: impl Into<String>,
    expected: &'static str,
    got: &'static str,
) -> EvalError {
    EvalError::new(
        site,
        EvalErrorKind::TypeMismatch {
            operand: operand.into(),
            expected,
            got,
        },
    )
}

/// `operand` was required to be rank 0.
#[cold]
pub fn expected_scalar(site: &Site, operand: impl Into<String>, got: &Value) -> EvalError {
    type_mismatch(site, operand, "scalar", got.type_name())
}

#[cold]
pub fn invalid_shape(site: &Site, violation: ShapeViolation) -> EvalError {
    EvalError::new(site, EvalErrorKind::Shape(violation))
}

#[cold]
pub fn unsupported_rank(site: &Site, rank: usize) -> EvalError {
    EvalError::new(site, EvalErrorKind::UnsupportedRank { rank })
}

#[cold]
pub fn unknown_primitive(site: &Site) -> EvalError {
    EvalError::new(
        site,
        EvalErrorKind::UnknownPrimitive {
            name: site.name().to_string(),
        },
    )
}

#[cold]
pub fn task_failed(site: &Site, detail: impl fmt::Display) -> EvalError {
    EvalError::new(
        site,
        EvalErrorKind::TaskFailed {
            detail: detail.to_string(),
        },
    )
}
