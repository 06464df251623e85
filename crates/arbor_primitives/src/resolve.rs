//! Operand resolution.
//!
//! A primitive issues one resolution per operand and gets back a future for
//! each; it never waits for a value outside its own composed future. The
//! helpers here turn operand expressions into typed futures:
//!
//! - `value_operand`: any array value
//! - `scalar_operand`: a rank-0 element
//! - `list_operand`: a shape descriptor
//! - `map_operands`: every operand, concurrently, in operand order

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use arbor_value::{Range, Value};

use crate::errors::{
    argument_out_of_range, expected_scalar, invalid_operands, invalid_shape, type_mismatch,
};
use crate::stack::ensure_sufficient_stack;
use crate::{EvalError, EvalResult, Operand, ShapeViolation, Site};

/// Boxed, sendable future of a typed operand.
pub type OperandFuture<T> = Pin<Box<dyn Future<Output = Result<T, EvalError>> + Send + 'static>>;

/// Future of a primitive's value.
pub type EvalFuture = OperandFuture<Value>;

/// Externally supplied arguments of a parameterized sub-tree.
pub type Arguments = Arc<[Value]>;

/// Resolver shared by every node of one evaluation.
pub type SharedResolver = Arc<dyn OperandResolver>;

/// An empty argument list.
pub fn no_args() -> Arguments {
    Arc::from(Vec::new())
}

/// An already-completed future.
pub fn ready<T: Send + 'static>(result: Result<T, EvalError>) -> OperandFuture<T> {
    Box::pin(std::future::ready(result))
}

/// Turns operand expressions into value futures.
///
/// `resolver` is the shared handle this resolver is reachable through; it
/// is handed down to sub-expressions so that nested resolutions go through
/// the same resolver.
pub trait OperandResolver: Send + Sync {
    fn resolve(
        &self,
        operand: &Operand,
        args: &Arguments,
        site: &Site,
        resolver: &SharedResolver,
    ) -> EvalFuture;
}

/// Resolves operands by walking the expression tree.
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeResolver;

impl TreeResolver {
    pub fn shared() -> SharedResolver {
        Arc::new(TreeResolver)
    }
}

impl OperandResolver for TreeResolver {
    fn resolve(
        &self,
        operand: &Operand,
        args: &Arguments,
        site: &Site,
        resolver: &SharedResolver,
    ) -> EvalFuture {
        match operand {
            Operand::Literal(value) => ready(Ok(value.clone())),
            Operand::Argument(index) => match args.get(*index) {
                Some(value) => ready(Ok(value.clone())),
                None => ready(Err(argument_out_of_range(site, *index, args.len()))),
            },
            Operand::Node(node) => {
                ensure_sufficient_stack(|| node.eval(Arc::clone(args), resolver))
            }
            Operand::List(_) => ready(Err(type_mismatch(
                site,
                "an operand",
                "an array value",
                "list",
            ))),
            Operand::Empty => ready(Err(invalid_operands(site))),
        }
    }
}

/// Resolve `operand` to any array value.
pub fn value_operand(
    operand: &Operand,
    args: &Arguments,
    site: &Site,
    resolver: &SharedResolver,
) -> EvalFuture {
    resolver.resolve(operand, args, site, resolver)
}

/// Resolve `operand` to a rank-0 element.
pub fn scalar_operand(
    operand: &Operand,
    args: &Arguments,
    site: &Site,
    resolver: &SharedResolver,
) -> OperandFuture<f64> {
    let pending = resolver.resolve(operand, args, site, resolver);
    let site = site.clone();
    Box::pin(async move {
        let value = pending.await?;
        value
            .as_scalar()
            .ok_or_else(|| expected_scalar(&site, "the operand", &value))
    })
}

/// Resolve `operand` to a shape descriptor.
///
/// A `List` operand resolves each entry concurrently; each must be a
/// non-negative integral scalar. Any other operand must resolve to a vector
/// whose elements are the extents.
pub fn list_operand(
    operand: &Operand,
    args: &Arguments,
    site: &Site,
    resolver: &SharedResolver,
) -> OperandFuture<Range> {
    let site_owned = site.clone();
    if let Operand::List(items) = operand {
        let pending = JoinAll::new(
            items
                .iter()
                .map(|item| resolver.resolve(item, args, site, resolver))
                .collect(),
        );
        return Box::pin(async move {
            let site = site_owned;
            pending
                .await?
                .iter()
                .map(|entry| match entry {
                    Value::Scalar(x) => extent(&site, *x),
                    other => Err(expected_scalar(&site, "a shape entry", other)),
                })
                .collect::<Result<Range, EvalError>>()
        });
    }

    let pending = resolver.resolve(operand, args, site, resolver);
    Box::pin(async move {
        let site = site_owned;
        match pending.await? {
            Value::Vector(elements) => elements
                .iter()
                .map(|&x| extent(&site, x))
                .collect::<Result<Range, EvalError>>(),
            other => Err(type_mismatch(
                &site,
                "the shape",
                "a list or vector",
                other.type_name(),
            )),
        }
    })
}

/// Resolve all `operands` concurrently.
///
/// Completes once every operand has settled; on failure reports the error
/// of the first failing operand in operand order.
pub fn map_operands(
    operands: &[Operand],
    args: &Arguments,
    site: &Site,
    resolver: &SharedResolver,
) -> OperandFuture<Vec<Value>> {
    Box::pin(JoinAll::new(
        operands
            .iter()
            .map(|operand| resolver.resolve(operand, args, site, resolver))
            .collect(),
    ))
}

/// Largest accepted extent, 2^53. Every integer up to it is exact in `f64`.
const MAX_EXTENT: f64 = 9_007_199_254_740_992.0;

fn extent(site: &Site, value: f64) -> Result<usize, EvalError> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > MAX_EXTENT {
        return Err(invalid_shape(site, ShapeViolation::InvalidExtent { value }));
    }
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "checked integral and within 0..=2^53 above"
    )]
    let extent = value as usize;
    Ok(extent)
}

/// Polls a set of operand futures concurrently until all have settled.
///
/// # Panics
///
/// Polling again after it has completed panics.
pub struct JoinAll {
    pending: Vec<Option<EvalFuture>>,
    results: Vec<Option<EvalResult>>,
    finished: bool,
}

impl JoinAll {
    pub fn new(pending: Vec<EvalFuture>) -> Self {
        let results = vec![None; pending.len()];
        JoinAll {
            pending: pending.into_iter().map(Some).collect(),
            results,
            finished: false,
        }
    }
}

impl Future for JoinAll {
    type Output = Result<Vec<Value>, EvalError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        assert!(!this.finished, "`JoinAll` polled after completion");
        let mut settled = true;
        for (slot, result) in this.pending.iter_mut().zip(this.results.iter_mut()) {
            let Some(future) = slot else { continue };
            match ensure_sufficient_stack(|| future.as_mut().poll(cx)) {
                Poll::Ready(value) => {
                    *result = Some(value);
                    *slot = None;
                }
                Poll::Pending => settled = false,
            }
        }
        if !settled {
            return Poll::Pending;
        }
        this.finished = true;
        let results = std::mem::take(&mut this.results);
        Poll::Ready(results.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests;
