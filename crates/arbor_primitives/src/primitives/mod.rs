//! Built-in primitives.
//!
//! Each submodule holds one zero-sized `PrimitiveDefinition`, its node
//! constructor and its registration record.

pub mod constant;
pub mod len;
pub mod or;
pub mod parallel_block;
pub mod unary_minus;

pub use constant::{create_constant, ConstantPrimitive};
pub use len::{create_len, LenPrimitive};
pub use or::{create_or, OrPrimitive};
pub use parallel_block::{create_parallel_block, ParallelBlockPrimitive};
pub use unary_minus::{create_unary_minus, UnaryMinusPrimitive};
