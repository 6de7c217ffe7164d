mod test_support;

use std::collections::HashSet;

use molino_core::{FilterOp, FilterQuery, Value};
use proptest::prelude::*;
use test_support::article_query;

fn op_strategy() -> impl Strategy<Value = FilterOp> {
    prop_oneof![Just(FilterOp::Equal),
                Just(FilterOp::NotEqual),
                Just(FilterOp::Like),
                Just(FilterOp::NotLike),
                Just(FilterOp::Greater),
                Just(FilterOp::Less),
                Just(FilterOp::GreaterEqual),
                Just(FilterOp::LessEqual),
                Just(FilterOp::In),
                Just(FilterOp::NotIn)]
}

fn value_for(op: FilterOp, seed: i64) -> Value {
    match op {
        FilterOp::Like | FilterOp::NotLike => Value::String(format!("*{seed}*")),
        FilterOp::In | FilterOp::NotIn => Value::from(vec![seed, seed + 1]),
        _ => Value::Int(seed),
    }
}

proptest! {
    #[test]
    fn n_filters_bind_n_distinct_parameters(calls in prop::collection::vec((op_strategy(), "[a-z]{1,6}", any::<i32>()), 0..40)) {
        let mut q = article_query();
        for (op, field, seed) in &calls {
            q.filter(field, *op, value_for(*op, *seed as i64)).unwrap();
        }
        let (ids, params) = match q.peek_query_builder() {
            Some(b) => (b.predicates.iter().map(|p| p.parameter()).collect::<HashSet<_>>(), b.parameters.len()),
            None => (HashSet::new(), 0),
        };
        prop_assert_eq!(ids.len(), calls.len());
        prop_assert_eq!(params, calls.len());
    }
}
