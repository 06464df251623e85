//! `or(a, b, ...)`: logical disjunction of scalar operands.

use arbor_value::Value;

use crate::errors::expected_scalar;
use crate::registry::MatchPattern;
use crate::resolve::map_operands;
use crate::{
    Arguments, Arity, EvalFuture, Operand, PrimitiveDefinition, PrimitiveKind, PrimitiveNode,
    SharedResolver, Site,
};

/// Non-zero is true. All operands are resolved, there is no short circuit.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrPrimitive;

impl PrimitiveDefinition for OrPrimitive {
    fn name(&self) -> &'static str {
        "or"
    }

    fn arity(&self) -> Arity {
        Arity::at_least(2)
    }

    fn eval(
        &self,
        site: &Site,
        operands: &[Operand],
        args: &Arguments,
        resolver: &SharedResolver,
    ) -> EvalFuture {
        let values = map_operands(operands, args, site, resolver);
        let site = site.clone();
        Box::pin(async move {
            let mut any = false;
            for (index, value) in values.await?.iter().enumerate() {
                let Some(x) = value.as_scalar() else {
                    return Err(expected_scalar(
                        &site,
                        format!("operand {}", index + 1),
                        value,
                    ));
                };
                any |= x != 0.0;
            }
            Ok(Value::Scalar(if any { 1.0 } else { 0.0 }))
        })
    }
}

pub fn create_or(operands: Vec<Operand>, name: &str, codename: &str) -> PrimitiveNode {
    PrimitiveNode::new(PrimitiveKind::Or, operands, name, codename)
}

pub const MATCH_DATA: MatchPattern = MatchPattern {
    name: "or",
    signatures: &["_1 || __2", "or(_1, __2)"],
    create: create_or,
    kind: PrimitiveKind::Or,
    help: concat!(
        "a, b, *args\n",
        "Args:\n",
        "\n",
        "    a, b, *args (float): scalars, non-zero is true\n",
        "\n",
        "Returns:\n",
        "\n",
        "1 if any operand is non-zero, otherwise 0."
    ),
};
