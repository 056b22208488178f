// crates/readiness-logic/src/condition.rs
// ============================================================================
// Module: Condition Tree
// Description: Canonical boolean condition tree over fact paths.
// Purpose: Define `Condition`, its wire format, and structural helpers.
// Dependencies: serde::{Deserialize, Serialize}, serde_json
// ============================================================================

//! ## Overview
//! A [`Condition`] is a recursive boolean expression evaluated against a fact
//! tree. Combinators (`all`, `any`, `not`) are universal; leaves compare the
//! value found at a dot-separated path with an authored operand.
//!
//! On the wire a condition is an object with exactly one recognised key:
//!
//! ```json
//! { "all": [
//!     { "containsAny": { "path": "itinerary.activities", "values": ["hiking"] } },
//!     { "gte": { "path": "geo.mountains.mountainElevationAvg", "value": 3000 } }
//! ] }
//! ```
//!
//! Rule packs are data, so the wire format is lenient and fails closed: an
//! object with no recognised key, or a leaf whose operand has the wrong shape,
//! becomes [`Condition::Never`] instead of a parse error. When several keys are
//! present the first in the order `all, any, not, exists, eq, ne, gt, gte, lt,
//! lte, in, containsAny` wins.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Number;
use serde_json::Value;

// ============================================================================
// SECTION: Condition Definition
// ============================================================================

/// Recursive condition tree with path-addressed leaves.
///
/// # Invariants
/// - Every node is exactly one variant; the absence of a usable variant is
///   represented explicitly by [`Condition::Never`].
/// - Trees are finite. No cycle detection is performed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ConditionWire", into = "ConditionWire")]
pub enum Condition {
    /// True iff every child is true. Empty `All` is true.
    All(Vec<Self>),
    /// True iff at least one child is true. Empty `Any` is false.
    Any(Vec<Self>),
    /// Negation of the child.
    Not(Box<Self>),
    /// True iff the path resolves to a non-null value.
    Exists {
        /// Dot-separated fact path.
        path: String,
    },
    /// Strict equality with the resolved value.
    Eq {
        /// Dot-separated fact path.
        path: String,
        /// Expected value.
        value: Value,
    },
    /// Strict inequality with the resolved value.
    Ne {
        /// Dot-separated fact path.
        path: String,
        /// Value the fact must differ from.
        value: Value,
    },
    /// Resolved value is a number greater than `value`.
    Gt {
        /// Dot-separated fact path.
        path: String,
        /// Numeric threshold.
        value: Number,
    },
    /// Resolved value is a number greater than or equal to `value`.
    Gte {
        /// Dot-separated fact path.
        path: String,
        /// Numeric threshold.
        value: Number,
    },
    /// Resolved value is a number less than `value`.
    Lt {
        /// Dot-separated fact path.
        path: String,
        /// Numeric threshold.
        value: Number,
    },
    /// Resolved value is a number less than or equal to `value`.
    Lte {
        /// Dot-separated fact path.
        path: String,
        /// Numeric threshold.
        value: Number,
    },
    /// Resolved value is strictly equal to one of `values`.
    In {
        /// Dot-separated fact path.
        path: String,
        /// Accepted values.
        values: Vec<Value>,
    },
    /// Resolved value is an array sharing at least one element with `values`.
    ContainsAny {
        /// Dot-separated fact path.
        path: String,
        /// Values to look for.
        values: Vec<Value>,
    },
    /// Always false. Produced for malformed or unrecognised nodes.
    Never,
}

// ============================================================================
// SECTION: Constructors
// ============================================================================

impl Condition {
    /// Builds an `All` node.
    #[must_use]
    pub const fn all(children: Vec<Self>) -> Self {
        Self::All(children)
    }

    /// Builds an `Any` node.
    #[must_use]
    pub const fn any(children: Vec<Self>) -> Self {
        Self::Any(children)
    }

    /// Builds a `Not` node.
    #[must_use]
    pub fn negate(child: Self) -> Self {
        Self::Not(Box::new(child))
    }

    /// Builds an `Exists` leaf.
    pub fn exists(path: impl Into<String>) -> Self {
        Self::Exists {
            path: path.into(),
        }
    }

    /// Builds an `Eq` leaf.
    pub fn equals(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Builds a `Ne` leaf.
    pub fn not_equals(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Ne {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Builds a `Gt` leaf.
    pub fn gt(path: impl Into<String>, value: impl Into<Number>) -> Self {
        Self::Gt {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Builds a `Gte` leaf.
    pub fn gte(path: impl Into<String>, value: impl Into<Number>) -> Self {
        Self::Gte {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Builds a `Lt` leaf.
    pub fn lt(path: impl Into<String>, value: impl Into<Number>) -> Self {
        Self::Lt {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Builds a `Lte` leaf.
    pub fn lte(path: impl Into<String>, value: impl Into<Number>) -> Self {
        Self::Lte {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Builds an `In` leaf.
    pub fn one_of(path: impl Into<String>, values: Vec<Value>) -> Self {
        Self::In {
            path: path.into(),
            values,
        }
    }

    /// Builds a `ContainsAny` leaf.
    pub fn contains_any(path: impl Into<String>, values: Vec<Value>) -> Self {
        Self::ContainsAny {
            path: path.into(),
            values,
        }
    }
}

// ============================================================================
// SECTION: Structural Helpers
// ============================================================================

impl Condition {
    /// Returns the depth of the tree. Leaves and `Never` have depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::All(children) | Self::Any(children) => {
                1 + children.iter().map(Self::depth).max().unwrap_or(0)
            }
            Self::Not(child) => 1 + child.depth(),
            _ => 1,
        }
    }
}

// ============================================================================
// SECTION: Wire Format
// ============================================================================

/// Operand carrying only a path.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PathOperand {
    /// Dot-separated fact path.
    path: String,
}

/// Operand carrying a path and a single value.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ValueOperand {
    /// Dot-separated fact path.
    path: String,
    /// Authored value; absent values decode as null.
    #[serde(default)]
    value: Value,
}

/// Operand carrying a path and a list of values.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ValuesOperand {
    /// Dot-separated fact path.
    path: String,
    /// Authored list; non-array payloads fail closed.
    #[serde(default)]
    values: Value,
}

/// Object form of a condition node with every key optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConditionWire {
    /// Conjunction children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    all: Option<Vec<Condition>>,
    /// Disjunction children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    any: Option<Vec<Condition>>,
    /// Negated child.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    not: Option<Box<Condition>>,
    /// Presence check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exists: Option<PathOperand>,
    /// Equality check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    eq: Option<ValueOperand>,
    /// Inequality check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ne: Option<ValueOperand>,
    /// Greater-than check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gt: Option<ValueOperand>,
    /// Greater-or-equal check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gte: Option<ValueOperand>,
    /// Less-than check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lt: Option<ValueOperand>,
    /// Less-or-equal check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lte: Option<ValueOperand>,
    /// Set membership check.
    #[serde(default, rename = "in", skip_serializing_if = "Option::is_none")]
    in_set: Option<ValuesOperand>,
    /// Array intersection check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    contains_any: Option<ValuesOperand>,
}

impl From<ConditionWire> for Condition {
    fn from(wire: ConditionWire) -> Self {
        if let Some(children) = wire.all {
            return Self::All(children);
        }
        if let Some(children) = wire.any {
            return Self::Any(children);
        }
        if let Some(child) = wire.not {
            return Self::Not(child);
        }
        if let Some(operand) = wire.exists {
            return Self::Exists {
                path: operand.path,
            };
        }
        if let Some(operand) = wire.eq {
            return Self::Eq {
                path: operand.path,
                value: operand.value,
            };
        }
        if let Some(operand) = wire.ne {
            return Self::Ne {
                path: operand.path,
                value: operand.value,
            };
        }
        if let Some(operand) = wire.gt {
            return numeric_leaf(operand, |path, value| Self::Gt {
                path,
                value,
            });
        }
        if let Some(operand) = wire.gte {
            return numeric_leaf(operand, |path, value| Self::Gte {
                path,
                value,
            });
        }
        if let Some(operand) = wire.lt {
            return numeric_leaf(operand, |path, value| Self::Lt {
                path,
                value,
            });
        }
        if let Some(operand) = wire.lte {
            return numeric_leaf(operand, |path, value| Self::Lte {
                path,
                value,
            });
        }
        if let Some(operand) = wire.in_set {
            return list_leaf(operand, |path, values| Self::In {
                path,
                values,
            });
        }
        if let Some(operand) = wire.contains_any {
            return list_leaf(operand, |path, values| Self::ContainsAny {
                path,
                values,
            });
        }
        Self::Never
    }
}

impl From<Condition> for ConditionWire {
    fn from(condition: Condition) -> Self {
        let mut wire = Self::default();
        match condition {
            Condition::All(children) => wire.all = Some(children),
            Condition::Any(children) => wire.any = Some(children),
            Condition::Not(child) => wire.not = Some(child),
            Condition::Exists {
                path,
            } => {
                wire.exists = Some(PathOperand {
                    path,
                });
            }
            Condition::Eq {
                path,
                value,
            } => {
                wire.eq = Some(ValueOperand {
                    path,
                    value,
                });
            }
            Condition::Ne {
                path,
                value,
            } => {
                wire.ne = Some(ValueOperand {
                    path,
                    value,
                });
            }
            Condition::Gt {
                path,
                value,
            } => wire.gt = Some(number_operand(path, value)),
            Condition::Gte {
                path,
                value,
            } => wire.gte = Some(number_operand(path, value)),
            Condition::Lt {
                path,
                value,
            } => wire.lt = Some(number_operand(path, value)),
            Condition::Lte {
                path,
                value,
            } => wire.lte = Some(number_operand(path, value)),
            Condition::In {
                path,
                values,
            } => {
                wire.in_set = Some(ValuesOperand {
                    path,
                    values: Value::Array(values),
                });
            }
            Condition::ContainsAny {
                path,
                values,
            } => {
                wire.contains_any = Some(ValuesOperand {
                    path,
                    values: Value::Array(values),
                });
            }
            Condition::Never => {}
        }
        wire
    }
}

/// Builds a numeric leaf, or `Never` when the operand is not a number.
fn numeric_leaf(operand: ValueOperand, build: impl FnOnce(String, Number) -> Condition) -> Condition {
    match operand.value {
        Value::Number(number) => build(operand.path, number),
        _ => Condition::Never,
    }
}

/// Builds a list leaf, or `Never` when the operand is not an array.
fn list_leaf(
    operand: ValuesOperand,
    build: impl FnOnce(String, Vec<Value>) -> Condition,
) -> Condition {
    match operand.values {
        Value::Array(values) => build(operand.path, values),
        _ => Condition::Never,
    }
}

/// Wraps a numeric threshold back into its wire operand.
fn number_operand(path: String, value: Number) -> ValueOperand {
    ValueOperand {
        path,
        value: Value::Number(value),
    }
}
