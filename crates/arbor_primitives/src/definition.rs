//! The primitive trait and the closed set of primitive kinds.

use std::fmt;

use crate::{Arguments, EvalFuture, Operand, SharedResolver, Site};

/// Closed set of primitive node types.
///
/// Each kind maps to a zero-sized `PrimitiveDefinition` with static
/// lifetime (see `PrimitiveKind::definition`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Constant,
    ParallelBlock,
    Len,
    UnaryMinus,
    Or,
}

impl PrimitiveKind {
    /// All kinds, in registration order.
    pub const ALL: [PrimitiveKind; 5] = [
        PrimitiveKind::Constant,
        PrimitiveKind::ParallelBlock,
        PrimitiveKind::Len,
        PrimitiveKind::UnaryMinus,
        PrimitiveKind::Or,
    ];
}

/// Accepted operand counts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Arity {
    min: usize,
    max: Option<usize>,
}

impl Arity {
    pub const fn exactly(n: usize) -> Self {
        Arity {
            min: n,
            max: Some(n),
        }
    }

    pub const fn between(min: usize, max: usize) -> Self {
        Arity {
            min,
            max: Some(max),
        }
    }

    pub const fn at_least(min: usize) -> Self {
        Arity { min, max: None }
    }

    pub fn accepts(self, count: usize) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = |n: usize| if n == 1 { "operand" } else { "operands" };
        match self.max {
            Some(max) if max == self.min => write!(f, "exactly {max} {}", noun(max)),
            Some(max) if max == self.min + 1 => {
                write!(f, "exactly {} or {max} {}", self.min, noun(max))
            }
            Some(max) => write!(f, "between {} and {max} operands", self.min),
            None => write!(f, "at least {} {}", self.min, noun(self.min)),
        }
    }
}

/// Evaluation behavior of one primitive kind.
///
/// # Adding a primitive
/// 1. Create a module under `primitives/` with a ZST implementing this trait
/// 2. Add a `PrimitiveKind` variant and its static instance in `registry.rs`
/// 3. Add its `MatchPattern` to `PrimitiveRegistry::new()`
///
/// Arity and operand validity are checked by `PrimitiveNode` before `eval`
/// is called, so implementations may assume `arity().accepts(operands.len())`
/// and that every operand is valid.
pub trait PrimitiveDefinition: Send + Sync {
    /// The primitive's canonical name (e.g. "constant").
    fn name(&self) -> &'static str;

    /// Operand counts this primitive accepts.
    fn arity(&self) -> Arity;

    /// Issue operand resolutions and return the composed future.
    ///
    /// Must not block: operand values are only awaited inside the returned
    /// future.
    fn eval(
        &self,
        site: &Site,
        operands: &[Operand],
        args: &Arguments,
        resolver: &SharedResolver,
    ) -> EvalFuture;
}
