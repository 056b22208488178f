// crates/readiness-logic/src/eval.rs
// ============================================================================
// Module: Condition Evaluation
// Description: Recursive, short-circuiting evaluator for condition trees.
// Purpose: Decide conditions against a fact reader without side effects.
// Dependencies: crate::{comparator, condition, path}
// ============================================================================

//! ## Overview
//! Evaluation is a pure tree walk. It never fails: unresolvable paths,
//! non-numeric operands for ordering, non-array facts for `containsAny`, and
//! [`Condition::Never`] all yield `false`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;

use serde_json::Number;
use serde_json::Value;

use crate::comparator::compare_to_threshold;
use crate::comparator::contains_any;
use crate::comparator::in_set;
use crate::comparator::strict_equals;
use crate::condition::Condition;
use crate::path::FactReader;

// ============================================================================
// SECTION: Evaluation
// ============================================================================

impl Condition {
    /// Evaluates this condition against `facts`.
    pub fn evaluate<R: FactReader + ?Sized>(&self, facts: &R) -> bool {
        evaluate(self, facts)
    }
}

/// Evaluates `condition` against `facts`.
pub fn evaluate<R: FactReader + ?Sized>(condition: &Condition, facts: &R) -> bool {
    match condition {
        // Short-circuit AND: exit on first failure
        Condition::All(children) => children.iter().all(|child| evaluate(child, facts)),
        // Short-circuit OR: exit on first success
        Condition::Any(children) => children.iter().any(|child| evaluate(child, facts)),
        Condition::Not(child) => !evaluate(child, facts),
        Condition::Exists {
            path,
        } => facts.lookup(path).is_some_and(|value| !value.is_null()),
        Condition::Eq {
            path,
            value,
        } => facts.lookup(path).is_some_and(|actual| strict_equals(actual, value)),
        Condition::Ne {
            path,
            value,
        } => !facts.lookup(path).is_some_and(|actual| strict_equals(actual, value)),
        Condition::Gt {
            path,
            value,
        } => ordered(facts, path, value, Ordering::is_gt),
        Condition::Gte {
            path,
            value,
        } => ordered(facts, path, value, Ordering::is_ge),
        Condition::Lt {
            path,
            value,
        } => ordered(facts, path, value, Ordering::is_lt),
        Condition::Lte {
            path,
            value,
        } => ordered(facts, path, value, Ordering::is_le),
        Condition::In {
            path,
            values,
        } => facts.lookup(path).is_some_and(|actual| in_set(actual, values)),
        Condition::ContainsAny {
            path,
            values,
        } => facts.lookup(path).is_some_and(|actual| contains_any(actual, values)),
        Condition::Never => false,
    }
}

/// Resolves `path` and tests its ordering against `threshold`.
fn ordered<R: FactReader + ?Sized>(
    facts: &R,
    path: &str,
    threshold: &Number,
    accept: fn(Ordering) -> bool,
) -> bool {
    facts
        .lookup(path)
        .and_then(|actual: &Value| compare_to_threshold(actual, threshold))
        .is_some_and(accept)
}
