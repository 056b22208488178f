// crates/readiness-logic/tests/proptest_laws.rs
// ============================================================================
// Module: Condition Property-Based Tests
// Description: Boolean algebra laws and fail-closed invariants.
// Purpose: Detect panics and law violations across generated trees and facts.
// ============================================================================

//! Property-based tests for condition evaluation invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use readiness_logic::Condition;
use readiness_logic::convert_capability_condition;
use readiness_logic::evaluate;
use readiness_logic::to_capability_condition;
use serde_json::Value;
use serde_json::json;

/// Paths drawn from a small vocabulary so generated trees hit real facts.
const PATHS: &[&str] = &["a", "b", "a.x", "a.y", "list", "missing", "a.missing.deep"];

fn path_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(PATHS).prop_map(str::to_string)
}

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-5_i64 .. 5).prop_map(|v| json!(v)),
        "[a-c]".prop_map(Value::String),
    ]
}

fn facts_strategy() -> impl Strategy<Value = Value> {
    (
        scalar_strategy(),
        scalar_strategy(),
        scalar_strategy(),
        prop::collection::vec(scalar_strategy(), 0 .. 4),
    )
        .prop_map(|(b, x, y, list)| json!({ "a": { "x": x, "y": y }, "b": b, "list": list }))
}

fn leaf_strategy() -> impl Strategy<Value = Condition> {
    prop_oneof![
        Just(Condition::Never),
        path_strategy().prop_map(Condition::exists),
        (path_strategy(), scalar_strategy()).prop_map(|(p, v)| Condition::equals(p, v)),
        (path_strategy(), scalar_strategy()).prop_map(|(p, v)| Condition::not_equals(p, v)),
        (path_strategy(), -5_i64 .. 5).prop_map(|(p, v)| Condition::gt(p, v)),
        (path_strategy(), -5_i64 .. 5).prop_map(|(p, v)| Condition::lte(p, v)),
        (path_strategy(), prop::collection::vec(scalar_strategy(), 0 .. 3))
            .prop_map(|(p, v)| Condition::one_of(p, v)),
        (path_strategy(), prop::collection::vec(scalar_strategy(), 0 .. 3))
            .prop_map(|(p, v)| Condition::contains_any(p, v)),
    ]
}

fn condition_strategy() -> impl Strategy<Value = Condition> {
    leaf_strategy().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0 .. 4).prop_map(Condition::all),
            prop::collection::vec(inner.clone(), 0 .. 4).prop_map(Condition::any),
            inner.prop_map(Condition::negate),
        ]
    })
}

proptest! {
    #[test]
    fn negation_inverts(c in condition_strategy(), facts in facts_strategy()) {
        prop_assert_eq!(evaluate(&Condition::negate(c.clone()), &facts), !evaluate(&c, &facts));
    }

    #[test]
    fn all_is_conjunction(
        c1 in condition_strategy(),
        c2 in condition_strategy(),
        facts in facts_strategy(),
    ) {
        let both = Condition::all(vec![c1.clone(), c2.clone()]);
        prop_assert_eq!(evaluate(&both, &facts), evaluate(&c1, &facts) && evaluate(&c2, &facts));
    }

    #[test]
    fn any_is_disjunction(
        c1 in condition_strategy(),
        c2 in condition_strategy(),
        facts in facts_strategy(),
    ) {
        let either = Condition::any(vec![c1.clone(), c2.clone()]);
        prop_assert_eq!(evaluate(&either, &facts), evaluate(&c1, &facts) || evaluate(&c2, &facts));
    }

    #[test]
    fn missing_paths_never_exist_or_equal(value in scalar_strategy(), facts in facts_strategy()) {
        prop_assert!(!evaluate(&Condition::exists("missing"), &facts));
        prop_assert!(!evaluate(&Condition::equals("a.missing.deep", value), &facts));
    }

    #[test]
    fn string_facts_never_order(s in "[a-z0-9]{0,6}", threshold in any::<i64>()) {
        let facts = json!({ "s": s });
        prop_assert!(!evaluate(&Condition::gt("s", threshold), &facts));
        prop_assert!(!evaluate(&Condition::gte("s", threshold), &facts));
        prop_assert!(!evaluate(&Condition::lt("s", threshold), &facts));
        prop_assert!(!evaluate(&Condition::lte("s", threshold), &facts));
    }

    #[test]
    fn wire_format_round_trips(c in condition_strategy(), facts in facts_strategy()) {
        let encoded = serde_json::to_value(&c).unwrap();
        let decoded: Condition = serde_json::from_value(encoded).unwrap();
        prop_assert_eq!(evaluate(&decoded, &facts), evaluate(&c, &facts));
    }

    #[test]
    fn capability_dialect_preserves_evaluation(c in condition_strategy(), facts in facts_strategy()) {
        let translated = convert_capability_condition(&to_capability_condition(&c));
        prop_assert_eq!(evaluate(&translated, &facts), evaluate(&c, &facts));
    }
}
