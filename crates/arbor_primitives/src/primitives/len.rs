//! `len(x)`: number of elements along the leading axis.

use arbor_value::Value;

use crate::errors::wrong_arity;
use crate::registry::MatchPattern;
use crate::resolve::value_operand;
use crate::{
    ready, Arguments, Arity, EvalFuture, Operand, PrimitiveDefinition, PrimitiveKind,
    PrimitiveNode, SharedResolver, Site,
};

#[derive(Clone, Copy, Debug, Default)]
pub struct LenPrimitive;

impl PrimitiveDefinition for LenPrimitive {
    fn name(&self) -> &'static str {
        "len"
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
        Box::pin(async move {
            let len = match value.await? {
                Value::Scalar(_) => 1,
                Value::Vector(elements) => elements.len(),
                Value::Matrix(matrix) => matrix.rows(),
            };
            #[expect(clippy::cast_precision_loss, reason = "lengths are far below 2^52")]
            let len = len as f64;
            Ok(Value::Scalar(len))
        })
    }
}

pub fn create_len(operands: Vec<Operand>, name: &str, codename: &str) -> PrimitiveNode {
    PrimitiveNode::new(PrimitiveKind::Len, operands, name, codename)
}

pub const MATCH_DATA: MatchPattern = MatchPattern {
    name: "len",
    signatures: &["len(_1)"],
    create: create_len,
    kind: PrimitiveKind::Len,
    help: concat!(
        "x\n",
        "Args:\n",
        "\n",
        "    x (object): a scalar, vector or matrix\n",
        "\n",
        "Returns:\n",
        "\n",
        "1 for a scalar, the length of a vector, the row count of a matrix."
    ),
};
