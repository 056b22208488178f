// crates/readiness-logic/src/capability.rs
// ============================================================================
// Module: Capability Condition Dialect
// Description: Operator-keyed condition format used by reusable capability packs.
// Purpose: Parse the capability dialect straight into canonical `Condition` trees.
// Dependencies: crate::condition, serde, serde_json
// ============================================================================

//! ## Overview
//! Capability packs author conditions as `{ geoPath | contextPath, operator,
//! value }` objects with their own `all`/`any`/`not` nesting:
//!
//! ```json
//! { "all": [ { "geoPath": "geo.mountains.mountainElevationAvg",
//!              "operator": "gte", "value": 3000 } ] }
//! ```
//!
//! The dialect is a wire format only. [`CapabilityCondition`] converts 1:1
//! into [`Condition`], and the [`dialect`] serde adapter lets a field typed as
//! `Condition` be read from and written in this format, so there is a single
//! evaluator at runtime.
//!
//! Translation fails closed: a missing or unrecognised operator maps to
//! equality, and a node with neither a path nor a combinator maps to
//! [`Condition::Never`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::condition::Condition;

// ============================================================================
// SECTION: Dialect Types
// ============================================================================

/// Path prefix that routes a canonical path to `geoPath` when re-encoding.
const GEO_PREFIX: &str = "geo.";

/// Comparison operator in the capability dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CapabilityOperator {
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Strict equality.
    Eq,
    /// Strict inequality.
    Ne,
    /// Membership in the `value` array.
    In,
    /// Presence of a non-null value.
    Exists,
    /// Array intersection with the `value` array.
    ContainsAny,
    /// Any operator string this build does not know; treated as equality.
    #[serde(other)]
    Unrecognized,
}

/// Condition node in the capability dialect.
///
/// # Invariants
/// - None enforced at parse time; conversion decides precedence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityCondition {
    /// Path into the `geo` subtree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_path: Option<String>,
    /// Path into the rest of the fact context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_path: Option<String>,
    /// Comparison operator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<CapabilityOperator>,
    /// Comparison operand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Conjunction children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<Vec<Self>>,
    /// Disjunction children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any: Option<Vec<Self>>,
    /// Negated child.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<Self>>,
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates a capability-dialect condition into the canonical tree.
#[must_use]
pub fn convert_capability_condition(condition: &CapabilityCondition) -> Condition {
    Condition::from(condition.clone())
}

impl From<CapabilityCondition> for Condition {
    fn from(condition: CapabilityCondition) -> Self {
        if let Some(children) = condition.all {
            return Self::All(children.into_iter().map(Self::from).collect());
        }
        if let Some(children) = condition.any {
            return Self::Any(children.into_iter().map(Self::from).collect());
        }
        if let Some(child) = condition.not {
            return Self::Not(Box::new(Self::from(*child)));
        }
        let Some(path) = condition.geo_path.or(condition.context_path) else {
            return Self::Never;
        };
        let operator = condition.operator.unwrap_or(CapabilityOperator::Eq);
        let value = condition.value.unwrap_or(Value::Null);
        convert_leaf(path, operator, value)
    }
}

/// Maps one operator leaf onto its canonical variant.
fn convert_leaf(path: String, operator: CapabilityOperator, value: Value) -> Condition {
    match (operator, value) {
        (CapabilityOperator::Exists, _) => Condition::Exists {
            path,
        },
        (CapabilityOperator::Ne, value) => Condition::Ne {
            path,
            value,
        },
        (CapabilityOperator::Gt, Value::Number(value)) => Condition::Gt {
            path,
            value,
        },
        (CapabilityOperator::Gte, Value::Number(value)) => Condition::Gte {
            path,
            value,
        },
        (CapabilityOperator::Lt, Value::Number(value)) => Condition::Lt {
            path,
            value,
        },
        (CapabilityOperator::Lte, Value::Number(value)) => Condition::Lte {
            path,
            value,
        },
        (CapabilityOperator::In, Value::Array(values)) => Condition::In {
            path,
            values,
        },
        (CapabilityOperator::ContainsAny, Value::Array(values)) => Condition::ContainsAny {
            path,
            values,
        },
        (
            CapabilityOperator::Gt
            | CapabilityOperator::Gte
            | CapabilityOperator::Lt
            | CapabilityOperator::Lte
            | CapabilityOperator::In
            | CapabilityOperator::ContainsAny,
            _,
        ) => Condition::Never,
        (CapabilityOperator::Eq | CapabilityOperator::Unrecognized, value) => Condition::Eq {
            path,
            value,
        },
    }
}

/// Re-encodes a canonical condition in the capability dialect.
///
/// Paths under `geo.` become `geoPath`; every other path becomes
/// `contextPath`. `Never` encodes as an empty node.
#[must_use]
pub fn to_capability_condition(condition: &Condition) -> CapabilityCondition {
    match condition {
        Condition::All(children) => CapabilityCondition {
            all: Some(children.iter().map(to_capability_condition).collect()),
            ..CapabilityCondition::default()
        },
        Condition::Any(children) => CapabilityCondition {
            any: Some(children.iter().map(to_capability_condition).collect()),
            ..CapabilityCondition::default()
        },
        Condition::Not(child) => CapabilityCondition {
            not: Some(Box::new(to_capability_condition(child))),
            ..CapabilityCondition::default()
        },
        Condition::Exists {
            path,
        } => leaf(path, CapabilityOperator::Exists, None),
        Condition::Eq {
            path,
            value,
        } => leaf(path, CapabilityOperator::Eq, Some(value.clone())),
        Condition::Ne {
            path,
            value,
        } => leaf(path, CapabilityOperator::Ne, Some(value.clone())),
        Condition::Gt {
            path,
            value,
        } => leaf(path, CapabilityOperator::Gt, Some(Value::Number(value.clone()))),
        Condition::Gte {
            path,
            value,
        } => leaf(path, CapabilityOperator::Gte, Some(Value::Number(value.clone()))),
        Condition::Lt {
            path,
            value,
        } => leaf(path, CapabilityOperator::Lt, Some(Value::Number(value.clone()))),
        Condition::Lte {
            path,
            value,
        } => leaf(path, CapabilityOperator::Lte, Some(Value::Number(value.clone()))),
        Condition::In {
            path,
            values,
        } => leaf(path, CapabilityOperator::In, Some(Value::Array(values.clone()))),
        Condition::ContainsAny {
            path,
            values,
        } => leaf(path, CapabilityOperator::ContainsAny, Some(Value::Array(values.clone()))),
        Condition::Never => CapabilityCondition::default(),
    }
}

/// Builds a dialect leaf, routing the path by prefix.
fn leaf(path: &str, operator: CapabilityOperator, value: Option<Value>) -> CapabilityCondition {
    let (geo_path, context_path) = if path.starts_with(GEO_PREFIX) {
        (Some(path.to_string()), None)
    } else {
        (None, Some(path.to_string()))
    };
    CapabilityCondition {
        geo_path,
        context_path,
        operator: Some(operator),
        value,
        ..CapabilityCondition::default()
    }
}

// ============================================================================
// SECTION: Serde Adapter
// ============================================================================

/// Serde adapter reading and writing a `Condition` field in the capability dialect.
///
/// Use with `#[serde(with = "readiness_logic::capability::dialect")]`.
pub mod dialect {
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serialize;
    use serde::Serializer;

    use super::CapabilityCondition;
    use super::to_capability_condition;
    use crate::condition::Condition;

    /// Deserializes a capability-dialect node into a canonical condition.
    ///
    /// # Errors
    ///
    /// Returns the deserializer's error when the input is not an object.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Condition, D::Error>
    where
        D: Deserializer<'de>,
    {
        CapabilityCondition::deserialize(deserializer).map(Condition::from)
    }

    /// Serializes a canonical condition in the capability dialect.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error.
    pub fn serialize<S>(condition: &Condition, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        to_capability_condition(condition).serialize(serializer)
    }
}
