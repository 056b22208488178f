// crates/readiness-logic/src/comparator.rs
// ============================================================================
// Module: Leaf Comparators
// Description: Strict equality, numeric ordering, and set semantics.
// Purpose: Compare resolved facts with authored operands without coercion.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Comparators never coerce types. Numbers compare by value regardless of
//! their integer or float encoding; strings, booleans and null compare by
//! value; arrays and objects are never strictly equal to anything. Ordering
//! is defined for numbers only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;

use serde_json::Number;
use serde_json::Value;

// ============================================================================
// SECTION: Equality
// ============================================================================

/// Returns true when two values are strictly equal.
#[must_use]
pub fn strict_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => {
            numeric_cmp(left, right).is_some_and(Ordering::is_eq)
        }
        (Value::String(left), Value::String(right)) => left == right,
        (Value::Bool(left), Value::Bool(right)) => left == right,
        (Value::Null, Value::Null) => true,
        _ => false,
    }
}

/// Returns true when `value` is strictly equal to one of `candidates`.
#[must_use]
pub fn in_set(value: &Value, candidates: &[Value]) -> bool {
    candidates.iter().any(|candidate| strict_equals(value, candidate))
}

/// Returns true when `value` is an array sharing an element with `candidates`.
#[must_use]
pub fn contains_any(value: &Value, candidates: &[Value]) -> bool {
    match value {
        Value::Array(items) => items.iter().any(|item| in_set(item, candidates)),
        _ => false,
    }
}

// ============================================================================
// SECTION: Ordering
// ============================================================================

/// Orders a resolved fact against a numeric threshold.
///
/// Returns `None` when the fact is not a number.
#[must_use]
pub fn compare_to_threshold(value: &Value, threshold: &Number) -> Option<Ordering> {
    let Value::Number(number) = value else {
        return None;
    };
    numeric_cmp(number, threshold)
}

/// Compares two JSON numbers, exactly for integers and by `f64` otherwise.
fn numeric_cmp(left: &Number, right: &Number) -> Option<Ordering> {
    if let (Some(left), Some(right)) = (integer_value(left), integer_value(right)) {
        return Some(integer_cmp(left, right));
    }
    left.as_f64()?.partial_cmp(&right.as_f64()?)
}

/// Integer representation of JSON numbers for exact comparison.
#[derive(Clone, Copy)]
enum IntegerValue {
    /// Value fits in `i64`.
    Signed(i64),
    /// Value only fits in `u64`.
    Unsigned(u64),
}

/// Extracts an integer value, rejecting floats.
fn integer_value(value: &Number) -> Option<IntegerValue> {
    if let Some(value) = value.as_i64() {
        return Some(IntegerValue::Signed(value));
    }
    value.as_u64().map(IntegerValue::Unsigned)
}

/// Compares integers across signedness.
fn integer_cmp(left: IntegerValue, right: IntegerValue) -> Ordering {
    match (left, right) {
        (IntegerValue::Signed(left), IntegerValue::Signed(right)) => left.cmp(&right),
        (IntegerValue::Unsigned(left), IntegerValue::Unsigned(right)) => left.cmp(&right),
        (IntegerValue::Signed(left), IntegerValue::Unsigned(right)) => {
            u64::try_from(left).map_or(Ordering::Less, |left| left.cmp(&right))
        }
        (IntegerValue::Unsigned(left), IntegerValue::Signed(right)) => {
            u64::try_from(right).map_or(Ordering::Greater, |right| left.cmp(&right))
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
