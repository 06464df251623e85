//! The evaluator: a runtime, a registry and a resolver.

use std::sync::Arc;

use arbor_primitives::{
    Arguments, EvalError, EvalResult, Operand, PrimitiveNode, PrimitiveRegistry, SharedResolver,
    TreeResolver,
};
use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinHandle;

use crate::{ConfigError, EvalConfig};

/// Owns the work-stealing runtime trees are evaluated on.
///
/// `evaluate` blocks the calling thread until the root future completes; no
/// worker thread ever blocks. Call it from outside the runtime.
pub struct Evaluator {
    runtime: Runtime,
    registry: Arc<PrimitiveRegistry>,
    resolver: SharedResolver,
}

impl Evaluator {
    /// Build an evaluator with every built-in primitive registered.
    pub fn new(config: &EvalConfig) -> Result<Self, ConfigError> {
        Self::with_registry(config, Arc::new(PrimitiveRegistry::new()))
    }

    pub fn with_registry(
        config: &EvalConfig,
        registry: Arc<PrimitiveRegistry>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Builder::new_multi_thread();
        builder.enable_all().thread_name(config.thread_name.clone());
        if config.worker_threads > 0 {
            builder.worker_threads(config.worker_threads);
        }
        if let Some(bytes) = config.thread_stack_size {
            builder.thread_stack_size(bytes);
        }
        let runtime = builder.build()?;
        tracing::debug!(
            worker_threads = config.worker_threads,
            primitives = registry.len(),
            "evaluator ready"
        );
        Ok(Evaluator {
            runtime,
            registry,
            resolver: TreeResolver::shared(),
        })
    }

    pub fn registry(&self) -> &PrimitiveRegistry {
        &self.registry
    }

    /// Instantiate a registered primitive.
    pub fn create_primitive(
        &self,
        name: &str,
        operands: Vec<Operand>,
        codename: &str,
    ) -> Result<Arc<PrimitiveNode>, EvalError> {
        self.registry.create_primitive(name, operands, codename)
    }

    /// Evaluate `node` with external `args` and wait for its value.
    ///
    /// # Panics
    /// When called from inside an async context.
    #[tracing::instrument(level = "debug", skip_all, fields(root = %node.site()))]
    pub fn evaluate(&self, node: &PrimitiveNode, args: Arguments) -> EvalResult {
        let result = self.runtime.block_on(node.eval(args, &self.resolver));
        if let Err(error) = &result {
            tracing::debug!(%error, "evaluation failed");
        }
        result
    }

    /// Start evaluating `node` in the background.
    pub fn spawn(&self, node: &PrimitiveNode, args: Arguments) -> JoinHandle<EvalResult> {
        self.runtime.spawn(node.eval(args, &self.resolver))
    }

    /// Wait for a handle returned by [`Evaluator::spawn`].
    ///
    /// A task that panicked or was aborted surfaces as a task failure of the
    /// node's primitive.
    pub fn join(&self, node: &PrimitiveNode, handle: JoinHandle<EvalResult>) -> EvalResult {
        self.runtime
            .block_on(handle)
            .unwrap_or_else(|error| Err(arbor_primitives::task_failed(node.site(), error)))
    }
}
