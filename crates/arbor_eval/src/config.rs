//! Runtime configuration.

use std::num::ParseIntError;

/// Environment variable overriding [`EvalConfig::worker_threads`].
pub const WORKER_THREADS_VAR: &str = "ARBOR_WORKER_THREADS";

/// Environment variable overriding [`EvalConfig::thread_stack_size`].
pub const THREAD_STACK_SIZE_VAR: &str = "ARBOR_THREAD_STACK_SIZE";

/// Configuration of the runtime an `Evaluator` owns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Worker thread count; 0 picks one per CPU core.
    pub worker_threads: usize,
    /// Name given to worker threads.
    pub thread_name: String,
    /// Worker stack size in bytes; `None` keeps the runtime default.
    pub thread_stack_size: Option<usize>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            worker_threads: 0,
            thread_name: "arbor-worker".to_string(),
            thread_stack_size: None,
        }
    }
}

impl EvalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_worker_threads(mut self, worker_threads: usize) -> Self {
        self.worker_threads = worker_threads;
        self
    }

    #[must_use]
    pub fn with_thread_name(mut self, thread_name: impl Into<String>) -> Self {
        self.thread_name = thread_name.into();
        self
    }

    #[must_use]
    pub fn with_thread_stack_size(mut self, bytes: usize) -> Self {
        self.thread_stack_size = Some(bytes);
        self
    }

    /// Defaults overridden by `ARBOR_WORKER_THREADS` and
    /// `ARBOR_THREAD_STACK_SIZE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(raw) = lookup(WORKER_THREADS_VAR) {
            config.worker_threads = parse(WORKER_THREADS_VAR, &raw)?;
        }
        if let Some(raw) = lookup(THREAD_STACK_SIZE_VAR) {
            let bytes = parse(THREAD_STACK_SIZE_VAR, &raw)?;
            if bytes == 0 {
                return Err(ConfigError::ZeroStackSize);
            }
            config.thread_stack_size = Some(bytes);
        }
        tracing::debug!(?config, "loaded evaluator configuration");
        Ok(config)
    }
}

fn parse(var: &'static str, raw: &str) -> Result<usize, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|source| ConfigError::InvalidNumber {
            var,
            value: raw.to_string(),
            source,
        })
}

/// Invalid configuration, or a runtime that could not be built from it.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got `{value}`")]
    InvalidNumber {
        var: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("worker stack size must be greater than zero")]
    ZeroStackSize,

    #[error("failed to build the evaluation runtime")]
    Runtime(#[from] std::io::Error),
}
