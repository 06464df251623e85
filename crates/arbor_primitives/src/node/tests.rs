#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::sync::Arc;

use arbor_value::{Matrix, Value};
use pretty_assertions::assert_eq;

use super::*;
use crate::primitives::{create_constant, create_len, create_unary_minus};
use crate::test_helpers::MockResolver;
use crate::{no_args, Arity, EvalErrorKind, TreeResolver};

fn mock() -> (Arc<MockResolver>, SharedResolver) {
    let mock = Arc::new(MockResolver::new());
    let resolver: SharedResolver = mock.clone();
    (mock, resolver)
}

#[tokio::test]
async fn wrong_arity_fails_before_any_resolution() {
    let (mock, resolver) = mock();
    let node = create_constant(
        vec![
            Operand::literal(1.0),
            Operand::shape(&[2]),
            Operand::literal(3.0),
        ],
        "constant",
        "t.ar(1, 1)",
    );

    let error = node.eval(no_args(), &resolver).await.unwrap_err();

    assert_eq!(mock.calls(), 0);
    assert_eq!(
        error.kind,
        EvalErrorKind::Arity {
            expected: Arity::between(1, 2),
            got: 3
        }
    );
    assert_eq!(
        error.message,
        "constant(t.ar(1, 1)): requires exactly 1 or 2 operands, got 3"
    );
}

#[tokio::test]
async fn arity_is_checked_before_validity() {
    let (mock, resolver) = mock();
    let node = create_len(vec![Operand::Empty, Operand::Empty], "len", "");

    let error = node.eval(no_args(), &resolver).await.unwrap_err();

    assert_eq!(mock.calls(), 0);
    assert!(matches!(error.kind, EvalErrorKind::Arity { got: 2, .. }));
}

#[tokio::test]
async fn invalid_operand_fails_before_any_resolution() {
    let (mock, resolver) = mock();
    let node = create_constant(
        vec![
            Operand::literal(1.0),
            Operand::List(vec![Operand::literal(2.0), Operand::Empty]),
        ],
        "constant",
        "",
    );

    let error = node.eval(no_args(), &resolver).await.unwrap_err();

    assert_eq!(mock.calls(), 0);
    assert!(matches!(error.kind, EvalErrorKind::InvalidOperand { .. }));
}

#[tokio::test]
async fn valid_node_resolves_each_operand() {
    let (mock, resolver) = mock();
    let node = create_constant(
        vec![Operand::literal(7.0), Operand::shape(&[2, 3])],
        "constant",
        "",
    );

    let value = node.eval(no_args(), &resolver).await.unwrap();

    assert_eq!(value, Value::Matrix(Matrix::filled(2, 3, 7.0).unwrap()));
    // the value and each of the two shape entries
    assert_eq!(mock.calls(), 3);
}

#[tokio::test]
async fn node_without_operands_applies_arguments() {
    let node = create_unary_minus(vec![], "__minus", "");
    let args: Arguments = Arc::from(vec![Value::Vector(vec![1.0, -2.0])]);

    let value = node.eval(args, &TreeResolver::shared()).await.unwrap();

    assert_eq!(value, Value::Vector(vec![-1.0, 2.0]));
}

#[tokio::test]
async fn node_without_operands_or_arguments_reports_arity() {
    let node = create_len(vec![], "len", "");
    let error = node
        .eval(no_args(), &TreeResolver::shared())
        .await
        .unwrap_err();
    assert!(matches!(error.kind, EvalErrorKind::Arity { got: 0, .. }));
}

#[tokio::test]
async fn shared_sub_expression_feeds_two_parents() {
    let shared = Arc::new(create_constant(
        vec![Operand::literal(2.0), Operand::shape(&[3])],
        "constant",
        "",
    ));
    let negated = create_unary_minus(vec![Operand::from(Arc::clone(&shared))], "__minus", "");
    let counted = create_len(vec![Operand::from(shared)], "len", "");
    let resolver = TreeResolver::shared();

    let (negated, counted) = tokio::join!(
        negated.eval(no_args(), &resolver),
        counted.eval(no_args(), &resolver)
    );

    assert_eq!(negated.unwrap(), Value::Vector(vec![-2.0; 3]));
    assert_eq!(counted.unwrap(), Value::Scalar(3.0));
}

#[test]
fn accessors_and_display() {
    let node = create_constant(
        vec![Operand::literal(0.0), Operand::shape(&[2, 2])],
        "constant",
        "m.ar(4, 2)",
    );
    assert_eq!(node.kind(), PrimitiveKind::Constant);
    assert_eq!(node.name(), "constant");
    assert_eq!(node.codename(), "m.ar(4, 2)");
    assert_eq!(node.operands().len(), 2);
    assert_eq!(node.site().to_string(), "constant(m.ar(4, 2))");
    assert_eq!(node.to_string(), "constant(0, [2, 2])");
}
