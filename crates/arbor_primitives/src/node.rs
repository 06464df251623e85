//! Primitive nodes of the execution tree.

use std::fmt;

use tracing::Instrument;

use crate::errors::{invalid_operands, wrong_arity};
use crate::stack::GrowStack;
use crate::{ready, Arguments, EvalFuture, Operand, PrimitiveKind, SharedResolver, Site};

/// A node in the execution tree.
///
/// Owns its operand list only. Nodes are shared through `Arc`, so one
/// sub-expression can feed several parents.
pub struct PrimitiveNode {
    kind: PrimitiveKind,
    operands: Vec<Operand>,
    site: Site,
}

impl PrimitiveNode {
    pub fn new(kind: PrimitiveKind, operands: Vec<Operand>, name: &str, codename: &str) -> Self {
        PrimitiveNode {
            kind,
            operands,
            site: Site::new(name, codename),
        }
    }

    #[inline]
    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn name(&self) -> &str {
        self.site.name()
    }

    pub fn codename(&self) -> &str {
        self.site.codename()
    }

    /// Evaluate this node.
    ///
    /// Returns immediately; the value is produced by the returned future.
    /// A node built without operands takes the external arguments as its
    /// operands instead (a function body applied to call arguments).
    pub fn eval(&self, args: Arguments, resolver: &SharedResolver) -> EvalFuture {
        if self.operands.is_empty() && !args.is_empty() {
            let operands: Vec<Operand> = args.iter().cloned().map(Operand::Literal).collect();
            return self.eval_operands(&operands, &crate::no_args(), resolver);
        }
        self.eval_operands(&self.operands, &args, resolver)
    }

    /// Evaluate this node's primitive against an explicit operand list.
    ///
    /// Arity is checked first, then operand validity; either failure is
    /// returned as an already-failed future before any operand is resolved.
    pub fn eval_operands(
        &self,
        operands: &[Operand],
        args: &Arguments,
        resolver: &SharedResolver,
    ) -> EvalFuture {
        let definition = self.kind.definition();
        let arity = definition.arity();
        if !arity.accepts(operands.len()) {
            tracing::debug!(primitive = %self.site, got = operands.len(), "arity check failed");
            return ready(Err(wrong_arity(&self.site, arity, operands.len())));
        }
        if !operands.iter().all(Operand::is_valid) {
            tracing::debug!(primitive = %self.site, "operand validity check failed");
            return ready(Err(invalid_operands(&self.site)));
        }

        let span = tracing::debug_span!(
            "eval",
            primitive = %self.site.name(),
            codename = %self.site.codename(),
        );
        let future = span.in_scope(|| definition.eval(&self.site, operands, args, resolver));
        Box::pin(GrowStack(future.instrument(span)))
    }
}

impl fmt::Debug for PrimitiveNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimitiveNode")
            .field("kind", &self.kind)
            .field("site", &self.site)
            .field("operands", &self.operands.len())
            .finish()
    }
}

impl fmt::Display for PrimitiveNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.site.name())?;
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{operand}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests;
