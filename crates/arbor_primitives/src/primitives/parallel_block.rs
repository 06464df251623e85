//! `parallel_block(s1, s2, ..., sn)`: run statements concurrently.
//!
//! Every statement is spawned as its own task on the runtime. The block's
//! value is the value of the last statement and is available once all
//! statements have completed.
//!
//! # Failure
//!
//! The first statement to *complete* with an error fails the block with that
//! error. Statements still running are detached, not cancelled; whatever
//! they produce afterwards is discarded, so a failure is reported once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::Instrument;

use crate::errors::task_failed;
use crate::registry::MatchPattern;
use crate::resolve::value_operand;
use crate::{
    Arguments, Arity, EvalFuture, EvalResult, Operand, PrimitiveDefinition, PrimitiveKind,
    PrimitiveNode, SharedResolver, Site,
};

/// Concurrent block of statements.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParallelBlockPrimitive;

impl PrimitiveDefinition for ParallelBlockPrimitive {
    fn name(&self) -> &'static str {
        "parallel_block"
    }

    fn arity(&self) -> Arity {
        Arity::at_least(1)
    }

    fn eval(
        &self,
        site: &Site,
        operands: &[Operand],
        args: &Arguments,
        resolver: &SharedResolver,
    ) -> EvalFuture {
        let statements = operands
            .iter()
            .map(|statement| value_operand(statement, args, site, resolver))
            .collect();
        Box::pin(run_block(site.clone(), statements))
    }
}

async fn run_block(site: Site, statements: Vec<EvalFuture>) -> EvalResult {
    let last = statements.len().saturating_sub(1);
    let failed = Arc::new(AtomicBool::new(false));
    let mut tasks = JoinSet::new();

    for (index, statement) in statements.into_iter().enumerate() {
        let failed = Arc::clone(&failed);
        let block = site.clone();
        tasks.spawn(
            async move {
                let result = statement.await;
                if failed.load(Ordering::Acquire) {
                    tracing::warn!(
                        block = %block,
                        statement = index,
                        ok = result.is_ok(),
                        "statement finished after the block failed; result discarded"
                    );
                }
                (index, result)
            }
            .in_current_span(),
        );
    }
    tracing::debug!(primitive = %site, statements = last + 1, "spawned block statements");

    let mut designated = None;
    while let Some(joined) = tasks.join_next().await {
        let outcome = match joined {
            Ok((index, Ok(value))) => {
                if index == last {
                    designated = Some(value);
                }
                continue;
            }
            Ok((index, Err(error))) => {
                tracing::debug!(primitive = %site, statement = index, %error, "statement failed");
                error
            }
            Err(join_error) => task_failed(&site, join_error),
        };
        failed.store(true, Ordering::Release);
        tasks.detach_all();
        return Err(outcome);
    }

    designated.ok_or_else(|| task_failed(&site, "the block finished without a result"))
}

pub fn create_parallel_block(
    operands: Vec<Operand>,
    name: &str,
    codename: &str,
) -> PrimitiveNode {
    PrimitiveNode::new(PrimitiveKind::ParallelBlock, operands, name, codename)
}

pub const MATCH_DATA: MatchPattern = MatchPattern {
    name: "parallel_block",
    signatures: &["parallel_block(__1)"],
    create: create_parallel_block,
    kind: PrimitiveKind::ParallelBlock,
    help: concat!(
        "*args\n",
        "Args:\n",
        "\n",
        "    *args (arg list): statements to evaluate concurrently\n",
        "\n",
        "Returns:\n",
        "\n",
        "The value of the last statement, once every statement has completed."
    ),
};
