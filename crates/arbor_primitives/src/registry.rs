//! Primitive registry: registration records and the node factory.
//!
//! Definitions are ZSTs with static lifetime and are looked up by kind with
//! a direct match. Registration records are looked up by name.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::errors::unknown_primitive;
use crate::primitives::{
    constant, len, or, parallel_block, unary_minus, ConstantPrimitive, LenPrimitive, OrPrimitive,
    ParallelBlockPrimitive, UnaryMinusPrimitive,
};
use crate::{EvalError, Operand, PrimitiveDefinition, PrimitiveKind, PrimitiveNode, Site};

// Static primitive instances for 'static lifetime references
static CONSTANT: ConstantPrimitive = ConstantPrimitive;
static PARALLEL_BLOCK: ParallelBlockPrimitive = ParallelBlockPrimitive;
static LEN: LenPrimitive = LenPrimitive;
static UNARY_MINUS: UnaryMinusPrimitive = UnaryMinusPrimitive;
static OR: OrPrimitive = OrPrimitive;

impl PrimitiveKind {
    /// The evaluation behavior for this kind.
    pub fn definition(self) -> &'static dyn PrimitiveDefinition {
        match self {
            PrimitiveKind::Constant => &CONSTANT,
            PrimitiveKind::ParallelBlock => &PARALLEL_BLOCK,
            PrimitiveKind::Len => &LEN,
            PrimitiveKind::UnaryMinus => &UNARY_MINUS,
            PrimitiveKind::Or => &OR,
        }
    }
}

/// Node constructor stored in a registration record.
pub type CreateFn = fn(Vec<Operand>, &str, &str) -> PrimitiveNode;

/// Registration record of one primitive.
#[derive(Clone, Copy, Debug)]
pub struct MatchPattern {
    /// Canonical name, e.g. `"constant"`.
    pub name: &'static str,
    /// Accepted textual forms, e.g. `"constant(_1, _2)"`.
    pub signatures: &'static [&'static str],
    /// Builds a node from operands, a name and a codename.
    pub create: CreateFn,
    /// Kind tag used by the generic factory.
    pub kind: PrimitiveKind,
    /// Arguments, their types and the returned value.
    pub help: &'static str,
}

/// Records registered by `PrimitiveRegistry::new`, in order.
pub const BUILTINS: [MatchPattern; 5] = [
    constant::MATCH_DATA,
    parallel_block::MATCH_DATA,
    len::MATCH_DATA,
    unary_minus::MATCH_DATA,
    or::MATCH_DATA,
];

/// Registration failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("a primitive named `{name}` is already registered")]
    Duplicate { name: &'static str },
}

/// Append-only table of registration records.
///
/// Built once and shared read-only; nothing is registered during
/// evaluation.
#[derive(Clone, Debug)]
pub struct PrimitiveRegistry {
    records: Vec<MatchPattern>,
    by_name: FxHashMap<&'static str, usize>,
}

impl PrimitiveRegistry {
    /// An empty registry.
    pub fn empty() -> Self {
        PrimitiveRegistry {
            records: Vec::new(),
            by_name: FxHashMap::default(),
        }
    }

    /// A registry holding every built-in primitive.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for record in BUILTINS {
            if let Err(error) = registry.register(record) {
                tracing::error!(%error, "built-in primitive not registered");
            }
        }
        registry
    }

    /// Append `record`. A name already present is rejected.
    pub fn register(&mut self, record: MatchPattern) -> Result<(), RegistryError> {
        if self.by_name.contains_key(record.name) {
            return Err(RegistryError::Duplicate { name: record.name });
        }
        tracing::trace!(primitive = record.name, "registered primitive");
        self.by_name.insert(record.name, self.records.len());
        self.records.push(record);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&MatchPattern> {
        self.by_name.get(name).map(|&index| &self.records[index])
    }

    /// Static definition for `kind`.
    pub fn definition(&self, kind: PrimitiveKind) -> &'static dyn PrimitiveDefinition {
        kind.definition()
    }

    /// Instantiate the primitive registered as `name`.
    pub fn create_primitive(
        &self,
        name: &str,
        operands: Vec<Operand>,
        codename: &str,
    ) -> Result<Arc<PrimitiveNode>, EvalError> {
        let Some(record) = self.get(name) else {
            return Err(unknown_primitive(&Site::new(name, codename)));
        };
        Ok(Arc::new((record.create)(operands, record.name, codename)))
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.records.iter().map(|record| record.name)
    }

    pub fn help(&self, name: &str) -> Option<&'static str> {
        self.get(name).map(|record| record.help)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for PrimitiveRegistry {
    fn default() -> Self {
        Self::new()
    }
}
