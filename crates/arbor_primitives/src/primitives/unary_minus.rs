//! `__minus(x)`: element-wise negation.

use crate::errors::wrong_arity;
use crate::registry::MatchPattern;
use crate::resolve::value_operand;
use crate::{
    ready, Arguments, Arity, EvalFuture, Operand, PrimitiveDefinition, PrimitiveKind,
    PrimitiveNode, SharedResolver, Site,
};

#[derive(Clone, Copy, Debug, Default)]
pub struct UnaryMinusPrimitive;

impl PrimitiveDefinition for UnaryMinusPrimitive {
    fn name(&self) -> &'static str {
        "__minus"
    }

    fn arity(&self) -> Arity {
        Arity::exactly(1)
    }

    fn eval(
        &self,
        site: &Site,
        operands: &[Operand],
        args: &Arguments,
        resolver: &SharedResolver,
    ) -> EvalFuture {
        let [operand] = operands else {
            return ready(Err(wrong_arity(site, self.arity(), operands.len())));
        };
        let value = value_operand(operand, args, site, resolver);
        Box::pin(async move { Ok(value.await?.map(|x| -x)) })
    }
}

pub fn create_unary_minus(operands: Vec<Operand>, name: &str, codename: &str) -> PrimitiveNode {
    PrimitiveNode::new(PrimitiveKind::UnaryMinus, operands, name, codename)
}

pub const MATCH_DATA: MatchPattern = MatchPattern {
    name: "__minus",
    signatures: &["-_1", "__minus(_1)"],
    create: create_unary_minus,
    kind: PrimitiveKind::UnaryMinus,
    help: concat!(
        "x\n",
        "Args:\n",
        "\n",
        "    x (object): a scalar, vector or matrix\n",
        "\n",
        "Returns:\n",
        "\n",
        "`x` with every element negated."
    ),
};
