#![allow(
    clippy::result_large_err,
    reason = "EvalError carries the primitive identity; boxing would add indirection on every hop"
)]
//! Arbor Primitives - the nodes of the Arbor execution tree.
//!
//! This crate provides:
//! - Operand expressions (`Operand`) and primitive nodes (`PrimitiveNode`)
//! - The operand resolution protocol (`OperandResolver`, typed helpers)
//! - Evaluation error types (`EvalError`, `EvalResult`)
//! - The primitive registry and registration records
//! - Built-in primitives (constant, parallel block, len, unary minus, or)
//!
//! # Evaluation
//!
//! `PrimitiveNode::eval` never blocks. It checks the operand count, then
//! operand validity, then issues one resolution per operand and returns a
//! future composed over them. Sub-expressions are evaluated the same way,
//! so a whole tree becomes one future.

mod definition;
mod errors;
mod node;
mod operand;
pub mod primitives;
mod registry;
pub mod resolve;
mod stack;

#[cfg(test)]
mod test_helpers;

pub use definition::{Arity, PrimitiveDefinition, PrimitiveKind};
pub use errors::{EvalError, EvalErrorKind, EvalResult, ShapeViolation, Site};
pub use node::PrimitiveNode;
pub use operand::Operand;
pub use registry::{CreateFn, MatchPattern, PrimitiveRegistry, RegistryError, BUILTINS};
pub use resolve::{
    no_args, ready, Arguments, EvalFuture, OperandFuture, OperandResolver, SharedResolver,
    TreeResolver,
};
pub use stack::ensure_sufficient_stack;

// Re-export error constructors for use by other crates
pub use errors::{
    argument_out_of_range, expected_scalar, generate_error_message, invalid_operands,
    invalid_shape, task_failed, type_mismatch, unknown_primitive, unsupported_rank, wrong_arity,
};
