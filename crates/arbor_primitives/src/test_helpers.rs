//! Test helpers for primitive unit testing.
//!
//! Provides `MockResolver` for observing how primitives issue operand
//! resolutions without building a full tree.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::resolve::{OperandResolver, TreeResolver};
use crate::{Arguments, EvalError, EvalErrorKind, EvalFuture, EvalResult, Operand, Site};

/// Resolver that counts calls and scripts argument results.
///
/// `Argument(i)` operands with a scripted result complete after the given
/// delay and record `i` in the completion log. Everything else is resolved
/// like `TreeResolver` would.
#[derive(Default)]
pub struct MockResolver {
    calls: AtomicUsize,
    scripted: FxHashMap<usize, (Duration, EvalResult)>,
    completions: Arc<Mutex<Vec<usize>>>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `Argument(index)` to `result` after `delay_ms` milliseconds.
    pub fn with_argument(mut self, index: usize, delay_ms: u64, result: EvalResult) -> Self {
        self.scripted
            .insert(index, (Duration::from_millis(delay_ms), result));
        self
    }

    /// Number of `resolve` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Scripted argument indices, in completion order.
    pub fn completions(&self) -> Vec<usize> {
        self.completions.lock().clone()
    }
}

impl OperandResolver for MockResolver {
    fn resolve(
        &self,
        operand: &Operand,
        args: &Arguments,
        site: &Site,
        resolver: &crate::SharedResolver,
    ) -> EvalFuture {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Operand::Argument(index) = operand {
            if let Some((delay, result)) = self.scripted.get(index) {
                let (index, delay, result) = (*index, *delay, result.clone());
                let completions = Arc::clone(&self.completions);
                return Box::pin(async move {
                    tokio::time::sleep(delay).await;
                    completions.lock().push(index);
                    result
                });
            }
        }
        TreeResolver.resolve(operand, args, site, resolver)
    }
}

/// A scripted failure attributed to a primitive named `name`.
pub fn failure(name: &str, detail: &str) -> EvalError {
    EvalError::new(
        &Site::new(name, ""),
        EvalErrorKind::InvalidOperand {
            detail: detail.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use arbor_value::Value;

    use super::*;

    #[tokio::test]
    async fn counts_every_resolution() {
        let mock = Arc::new(MockResolver::new());
        let resolver: crate::SharedResolver = mock.clone();
        let site = Site::new("probe", "");
        let args = crate::no_args();

        let first = resolver.resolve(&Operand::literal(1.0), &args, &site, &resolver);
        let second = resolver.resolve(&Operand::literal(2.0), &args, &site, &resolver);

        assert_eq!(mock.calls(), 2);
        assert_eq!(first.await.unwrap(), Value::Scalar(1.0));
        assert_eq!(second.await.unwrap(), Value::Scalar(2.0));
    }

    #[tokio::test]
    async fn scripted_arguments_complete_in_delay_order() {
        let mock = Arc::new(
            MockResolver::new()
                .with_argument(0, 30, Ok(Value::Scalar(0.0)))
                .with_argument(1, 1, Err(failure("probe", "boom"))),
        );
        let resolver: crate::SharedResolver = mock.clone();
        let site = Site::new("probe", "");
        let args = crate::no_args();

        let slow = resolver.resolve(&Operand::Argument(0), &args, &site, &resolver);
        let fast = resolver.resolve(&Operand::Argument(1), &args, &site, &resolver);
        let (slow, fast) = tokio::join!(slow, fast);

        assert_eq!(slow.unwrap(), Value::Scalar(0.0));
        assert_eq!(fast.unwrap_err().message, "probe: boom");
        assert_eq!(mock.completions(), vec![1, 0]);
    }
}
