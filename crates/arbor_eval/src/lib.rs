//! Arbor Eval - top-level evaluation of Arbor execution trees.
//!
//! Builds the runtime from an [`EvalConfig`], instantiates primitives
//! through the registry and evaluates trees:
//!
//! ```no_run
//! use arbor_eval::{EvalConfig, Evaluator, Operand};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let evaluator = Evaluator::new(&EvalConfig::from_env()?)?;
//! let zeros = evaluator.create_primitive(
//!     "constant",
//!     vec![Operand::literal(0.0), Operand::shape(&[2, 3])],
//!     "main.ar(1, 1)",
//! )?;
//! let value = evaluator.evaluate(&zeros, arbor_eval::no_args())?;
//! assert_eq!(value.dimensions(), [2, 3]);
//! # Ok(())
//! # }
//! ```

mod config;
mod evaluator;

use std::sync::Once;

pub use arbor_primitives::{
    no_args, Arguments, EvalError, EvalErrorKind, EvalResult, MatchPattern, Operand,
    PrimitiveKind, PrimitiveNode, PrimitiveRegistry, RegistryError,
};
pub use arbor_value::{Matrix, Range, Value};
pub use config::{ConfigError, EvalConfig, THREAD_STACK_SIZE_VAR, WORKER_THREADS_VAR};
pub use evaluator::Evaluator;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=arbor_primitives=debug` or `RUST_LOG=arbor_eval=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
