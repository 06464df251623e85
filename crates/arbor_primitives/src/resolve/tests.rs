#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::sync::Arc;

use arbor_value::{Range, Value};
use pretty_assertions::assert_eq;

use super::*;
use crate::primitives::{create_constant, create_unary_minus};
use crate::test_helpers::{failure, MockResolver};
use crate::EvalErrorKind;

fn site() -> Site {
    Site::new("probe", "r.ar(1, 1)")
}

fn args(values: Vec<Value>) -> Arguments {
    Arc::from(values)
}

mod tree_resolver {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn literal_resolves_to_itself() {
        let resolver = TreeResolver::shared();
        let value = value_operand(&Operand::literal(4.0), &no_args(), &site(), &resolver)
            .await
            .unwrap();
        assert_eq!(value, Value::Scalar(4.0));
    }

    #[tokio::test]
    async fn argument_looks_up_external_list() {
        let resolver = TreeResolver::shared();
        let supplied = args(vec![Value::Scalar(1.0), Value::Vector(vec![2.0, 3.0])]);
        let value = value_operand(&Operand::Argument(1), &supplied, &site(), &resolver)
            .await
            .unwrap();
        assert_eq!(value, Value::Vector(vec![2.0, 3.0]));
    }

    #[tokio::test]
    async fn argument_out_of_range_is_an_operand_error() {
        let resolver = TreeResolver::shared();
        let error = value_operand(&Operand::Argument(2), &no_args(), &site(), &resolver)
            .await
            .unwrap_err();
        assert!(matches!(error.kind, EvalErrorKind::InvalidOperand { .. }));
        assert_eq!(
            error.message,
            "probe(r.ar(1, 1)): argument index 2 out of range (0 supplied)"
        );
    }

    #[tokio::test]
    async fn node_evaluates_sub_expression() {
        let resolver = TreeResolver::shared();
        let node = Arc::new(create_unary_minus(
            vec![Operand::literal(5.0)],
            "__minus",
            "",
        ));
        let value = value_operand(&Operand::from(node), &no_args(), &site(), &resolver)
            .await
            .unwrap();
        assert_eq!(value, Value::Scalar(-5.0));
    }

    #[tokio::test]
    async fn list_is_not_an_array_value() {
        let resolver = TreeResolver::shared();
        let error = value_operand(&Operand::shape(&[1, 2]), &no_args(), &site(), &resolver)
            .await
            .unwrap_err();
        assert_eq!(
            error.kind,
            EvalErrorKind::TypeMismatch {
                operand: "an operand".to_string(),
                expected: "an array value",
                got: "list",
            }
        );
    }
}

mod typed {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn scalar_operand_accepts_rank_zero() {
        let resolver = TreeResolver::shared();
        let x = scalar_operand(&Operand::literal(2.5), &no_args(), &site(), &resolver)
            .await
            .unwrap();
        assert_eq!(x, 2.5);
    }

    #[tokio::test]
    async fn scalar_operand_rejects_vectors() {
        let resolver = TreeResolver::shared();
        let error = scalar_operand(
            &Operand::literal(vec![1.0]),
            &no_args(),
            &site(),
            &resolver,
        )
        .await
        .unwrap_err();
        assert_eq!(
            error.message,
            "probe(r.ar(1, 1)): the operand must be scalar, got vector"
        );
    }

    #[tokio::test]
    async fn list_operand_from_literal_list() {
        let resolver = TreeResolver::shared();
        let shape = list_operand(&Operand::shape(&[2, 3]), &no_args(), &site(), &resolver)
            .await
            .unwrap();
        assert_eq!(shape, Range::from([2, 3]));
    }

    #[tokio::test]
    async fn list_operand_from_vector_value() {
        let resolver = TreeResolver::shared();
        let supplied = args(vec![Value::Vector(vec![4.0])]);
        let shape = list_operand(&Operand::Argument(0), &supplied, &site(), &resolver)
            .await
            .unwrap();
        assert_eq!(shape, Range::from([4]));
    }

    #[tokio::test]
    async fn list_operand_rejects_fractional_and_negative_extents() {
        let resolver = TreeResolver::shared();
        for bad in [1.5, -1.0, f64::NAN, f64::INFINITY] {
            let operand = Operand::List(vec![Operand::literal(bad)]);
            let error = list_operand(&operand, &no_args(), &site(), &resolver)
                .await
                .unwrap_err();
            assert!(
                matches!(
                    error.kind,
                    EvalErrorKind::Shape(ShapeViolation::InvalidExtent { .. })
                ),
                "{bad} accepted as an extent"
            );
        }
    }

    #[tokio::test]
    async fn list_operand_caps_extents_at_exact_integers() {
        let resolver = TreeResolver::shared();
        let limit = 9_007_199_254_740_992.0;

        let shape = list_operand(
            &Operand::List(vec![Operand::literal(limit)]),
            &no_args(),
            &site(),
            &resolver,
        )
        .await
        .unwrap();
        assert_eq!(shape, Range::from([1 << 53]));

        for beyond in [limit * 2.0, 1e20, 1e300] {
            let operand = Operand::literal(vec![beyond]);
            let error = list_operand(&operand, &no_args(), &site(), &resolver)
                .await
                .unwrap_err();
            assert_eq!(
                error.kind,
                EvalErrorKind::Shape(ShapeViolation::InvalidExtent { value: beyond })
            );
        }
    }

    #[tokio::test]
    async fn list_operand_rejects_non_scalar_entries() {
        let resolver = TreeResolver::shared();
        let operand = Operand::List(vec![Operand::literal(vec![1.0, 2.0])]);
        let error = list_operand(&operand, &no_args(), &site(), &resolver)
            .await
            .unwrap_err();
        assert_eq!(
            error.message,
            "probe(r.ar(1, 1)): a shape entry must be scalar, got vector"
        );
    }

    #[tokio::test]
    async fn list_operand_rejects_scalar_value() {
        let resolver = TreeResolver::shared();
        let error = list_operand(&Operand::literal(3.0), &no_args(), &site(), &resolver)
            .await
            .unwrap_err();
        assert_eq!(
            error.message,
            "probe(r.ar(1, 1)): the shape must be a list or vector, got scalar"
        );
    }
}

mod join {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn empty_join_completes_with_no_values() {
        let values = JoinAll::new(Vec::new()).await.unwrap();
        assert_eq!(values, Vec::<Value>::new());
    }

    #[tokio::test]
    #[should_panic(expected = "polled after completion")]
    async fn join_panics_when_polled_after_completion() {
        let one: EvalFuture = Box::pin(async { Ok(Value::Scalar(1.0)) });
        let mut join = JoinAll::new(vec![one]);
        assert_eq!((&mut join).await.unwrap(), vec![Value::Scalar(1.0)]);
        let _ = (&mut join).await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn map_operands_keeps_operand_order() {
        let mock = Arc::new(
            MockResolver::new()
                .with_argument(0, 40, Ok(Value::Scalar(0.0)))
                .with_argument(1, 1, Ok(Value::Scalar(1.0))),
        );
        let resolver: SharedResolver = mock.clone();
        let operands = [Operand::Argument(0), Operand::Argument(1)];

        let values = map_operands(&operands, &no_args(), &site(), &resolver)
            .await
            .unwrap();

        assert_eq!(values, vec![Value::Scalar(0.0), Value::Scalar(1.0)]);
        assert_eq!(mock.completions(), vec![1, 0]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn map_operands_waits_for_all_and_reports_first_operand_error() {
        let mock = Arc::new(
            MockResolver::new()
                .with_argument(0, 40, Err(failure("slow", "first")))
                .with_argument(1, 1, Err(failure("fast", "second")))
                .with_argument(2, 20, Ok(Value::Scalar(2.0))),
        );
        let resolver: SharedResolver = mock.clone();
        let operands = [
            Operand::Argument(0),
            Operand::Argument(1),
            Operand::Argument(2),
        ];

        let error = map_operands(&operands, &no_args(), &site(), &resolver)
            .await
            .unwrap_err();

        assert_eq!(error.message, "slow: first");
        assert_eq!(mock.completions(), vec![1, 2, 0]);
    }

    #[tokio::test]
    async fn join_all_of_nothing_is_empty() {
        let values = JoinAll::new(Vec::new()).await.unwrap();
        assert!(values.is_empty());
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn deep_tree_does_not_overflow() {
    let mut operand = Operand::literal(1.0);
    for _ in 0..2_000 {
        operand = Operand::from(Arc::new(create_unary_minus(vec![operand], "__minus", "")));
    }
    let root = create_constant(vec![operand], "constant", "");

    let value = root
        .eval(no_args(), &TreeResolver::shared())
        .await
        .unwrap();

    assert_eq!(value, Value::Scalar(1.0));
}
