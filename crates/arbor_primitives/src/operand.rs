//! Operand expressions.

use std::fmt;
use std::sync::Arc;

use arbor_value::Value;

use crate::PrimitiveNode;

/// An argument to a primitive: a literal or a nested sub-expression.
#[derive(Clone, Debug, Default)]
pub enum Operand {
    /// Unset or ill-formed operand. Never valid.
    #[default]
    Empty,
    /// Already-resolved array value.
    Literal(Value),
    /// Literal list of operand expressions, e.g. the shape `[2, 3]`.
    List(Vec<Operand>),
    /// The `n`-th externally supplied argument.
    Argument(usize),
    /// Reference to a sub-expression.
    Node(Arc<PrimitiveNode>),
}

impl Operand {
    pub fn literal(value: impl Into<Value>) -> Self {
        Operand::Literal(value.into())
    }

    /// A list of scalar literals describing a shape.
    pub fn shape(extents: &[usize]) -> Self {
        #[expect(
            clippy::cast_precision_loss,
            reason = "shape extents in tests and builders are small"
        )]
        let items = extents
            .iter()
            .map(|&n| Operand::Literal(Value::Scalar(n as f64)))
            .collect();
        Operand::List(items)
    }

    /// Whether this operand may be resolved.
    ///
    /// Only `Empty` (or a list containing it) is invalid.
    pub fn is_valid(&self) -> bool {
        match self {
            Operand::Empty => false,
            Operand::List(items) => items.iter().all(Operand::is_valid),
            Operand::Literal(_) | Operand::Argument(_) | Operand::Node(_) => true,
        }
    }

    /// Short kind name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Operand::Empty => "empty",
            Operand::Literal(_) => "literal",
            Operand::List(_) => "list",
            Operand::Argument(_) => "argument",
            Operand::Node(_) => "node",
        }
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Literal(value)
    }
}

impl From<Arc<PrimitiveNode>> for Operand {
    fn from(node: Arc<PrimitiveNode>) -> Self {
        Operand::Node(node)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Empty => write!(f, "<empty>"),
            Operand::Literal(value) => write!(f, "{value}"),
            Operand::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Operand::Argument(index) => write!(f, "_{}", index + 1),
            Operand::Node(node) => write!(f, "{node}"),
        }
    }
}
