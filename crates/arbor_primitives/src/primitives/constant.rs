//! `constant(value)` and `constant(value, shape)`.
//!
//! With one operand the value passes through unchanged. With two, the first
//! operand must be a scalar and is broadcast to the shape given by the
//! second: `constant(0, [2, 3])` is a 2x3 matrix of zeros.

use arbor_value::{extract_num_dimensions, BroadcastError, Range, Value};

use crate::errors::{expected_scalar, invalid_shape, unsupported_rank, wrong_arity};
use crate::registry::MatchPattern;
use crate::resolve::{list_operand, value_operand};
use crate::{
    ready, Arguments, Arity, EvalFuture, EvalResult, Operand, PrimitiveDefinition, PrimitiveKind,
    PrimitiveNode, SharedResolver, ShapeViolation, Site,
};

/// Builds scalars, vectors and matrices filled with one value.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConstantPrimitive;

impl PrimitiveDefinition for ConstantPrimitive {
    fn name(&self) -> &'static str {
        "constant"
    }

    fn arity(&self) -> Arity {
        Arity::between(1, 2)
    }

    fn eval(
        &self,
        site: &Site,
        operands: &[Operand],
        args: &Arguments,
        resolver: &SharedResolver,
    ) -> EvalFuture {
        match operands {
            [value] => value_operand(value, args, site, resolver),
            [value, shape] => {
                let element = value_operand(value, args, site, resolver);
                let shape = list_operand(shape, args, site, resolver);
                let site = site.clone();
                Box::pin(async move {
                    let (element, shape) = tokio::join!(element, shape);
                    let element = element?;
                    let Some(element) = element.as_scalar() else {
                        return Err(expected_scalar(&site, "the first argument", &element));
                    };
                    broadcast(&site, element, &shape?)
                })
            }
            _ => ready(Err(wrong_arity(site, self.arity(), operands.len()))),
        }
    }
}

fn broadcast(site: &Site, element: f64, shape: &Range) -> EvalResult {
    let rank = extract_num_dimensions(shape);
    if rank == 0 {
        return Err(invalid_shape(site, ShapeViolation::Empty));
    }
    if rank > 2 {
        return Err(invalid_shape(
            site,
            ShapeViolation::TooManyDimensions { rank },
        ));
    }
    tracing::trace!(primitive = %site, %shape, "broadcasting constant");
    Value::broadcast(element, shape).map_err(|error| match error {
        BroadcastError::UnsupportedRank { rank } => unsupported_rank(site, rank),
        BroadcastError::TooLarge { shape } => {
            invalid_shape(site, ShapeViolation::TooLarge { shape })
        }
    })
}

pub fn create_constant(operands: Vec<Operand>, name: &str, codename: &str) -> PrimitiveNode {
    PrimitiveNode::new(PrimitiveKind::Constant, operands, name, codename)
}

pub const MATCH_DATA: MatchPattern = MatchPattern {
    name: "constant",
    signatures: &["constant(_1, _2)", "constant(_1)"],
    create: create_constant,
    kind: PrimitiveKind::Constant,
    help: concat!(
        "value, shape\n",
        "Args:\n",
        "\n",
        "    value (float): the constant value\n",
        "    shape (list, optional): the extents of the result, one or two entries\n",
        "\n",
        "Returns:\n",
        "\n",
        "A scalar, vector or matrix with every element equal to `value`."
    ),
};
