// crates/readiness-core/src/core/context.rs
// ============================================================================
// Module: Fact Context
// Description: Immutable, path-addressed snapshot of trip facts.
// Purpose: Hold traveler, itinerary, and geo facts for one evaluation.
// Dependencies: readiness-logic, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`FactContext`] is assembled by callers from the traveler profile, trip
//! dates, itinerary, and a `geo` subtree filled in by geographic services. The
//! engine only reads named paths from it. The single write path,
//! [`FactContext::with_value`], returns a new context and leaves the original
//! untouched.

// ============================================================================
// SECTION: Imports
// ============================================================================

use readiness_logic::FactReader;
use readiness_logic::resolve_path;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Well-Known Paths
// ============================================================================

/// Path of the itinerary season.
pub const SEASON_PATH: &str = "itinerary.season";
/// Path of the itinerary activity list.
pub const ACTIVITIES_PATH: &str = "itinerary.activities";
/// Path of the traveler tag list.
pub const TRAVELER_TAGS_PATH: &str = "traveler.tags";
/// Path of the traveler nationality (ISO 3166-1 alpha-2).
pub const NATIONALITY_PATH: &str = "traveler.nationality";
/// Path of the derived Schengen flag.
pub const REQUIRES_SCHENGEN_PATH: &str = "traveler.nationalityRequiresSchengen";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when constructing a fact context.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    /// The root value was not a JSON object.
    #[error("fact context root must be a json object")]
    NotAnObject,
}

// ============================================================================
// SECTION: Fact Context
// ============================================================================

/// Hierarchically namespaced facts for one evaluation.
///
/// # Invariants
/// - The root is always a JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct FactContext {
    /// Root object of the fact tree.
    root: Value,
}

impl Default for FactContext {
    fn default() -> Self {
        Self::new(Map::new())
    }
}

impl FactContext {
    /// Creates a context from a JSON object.
    #[must_use]
    pub const fn new(root: Map<String, Value>) -> Self {
        Self {
            root: Value::Object(root),
        }
    }

    /// Creates a context from an arbitrary JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::NotAnObject`] when `value` is not an object.
    pub fn from_value(value: Value) -> Result<Self, ContextError> {
        match value {
            Value::Object(map) => Ok(Self::new(map)),
            _ => Err(ContextError::NotAnObject),
        }
    }

    /// Returns the value at `path`, if any.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        resolve_path(&self.root, path)
    }

    /// Returns the fact tree as JSON.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.root
    }

    /// Returns a copy with `value` written at `path`.
    ///
    /// Missing or non-object intermediate segments are replaced by objects.
    /// An empty path leaves the copy unchanged.
    #[must_use]
    pub fn with_value(&self, path: &str, value: Value) -> Self {
        let mut next = self.clone();
        if path.is_empty() {
            return next;
        }
        let mut current = &mut next.root;
        let mut segments = path.split('.').peekable();
        while let Some(segment) = segments.next() {
            if !current.is_object() {
                *current = Value::Object(Map::new());
            }
            let Value::Object(map) = current else {
                return next;
            };
            if segments.peek().is_none() {
                map.insert(segment.to_string(), value);
                return next;
            }
            current = map.entry(segment.to_string()).or_insert(Value::Null);
        }
        next
    }

    /// Returns the itinerary season, when set to a string.
    #[must_use]
    pub fn season(&self) -> Option<&str> {
        self.get(SEASON_PATH).and_then(Value::as_str)
    }

    /// Returns the itinerary activities. Non-string entries are ignored.
    #[must_use]
    pub fn activities(&self) -> Vec<&str> {
        self.string_list(ACTIVITIES_PATH)
    }

    /// Returns the traveler tags. Non-string entries are ignored.
    #[must_use]
    pub fn traveler_tags(&self) -> Vec<&str> {
        self.string_list(TRAVELER_TAGS_PATH)
    }

    /// Returns the traveler nationality, when set to a string.
    #[must_use]
    pub fn nationality(&self) -> Option<&str> {
        self.get(NATIONALITY_PATH).and_then(Value::as_str)
    }

    /// Reads a list of strings at `path`; anything else yields an empty list.
    fn string_list(&self, path: &str) -> Vec<&str> {
        match self.get(path) {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

impl FactReader for FactContext {
    fn lookup(&self, path: &str) -> Option<&Value> {
        self.get(path)
    }
}

impl TryFrom<Value> for FactContext {
    type Error = ContextError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<FactContext> for Value {
    fn from(context: FactContext) -> Self {
        context.root
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    /// Verifies writes create intermediate objects and leave the source intact.
    #[test]
    fn with_value_is_copy_on_write() {
        let base = FactContext::from_value(json!({ "traveler": { "nationality": "DE" } }))
            .unwrap_or_default();
        let next = base.with_value("traveler.flags.schengen", json!(true));
        assert_eq!(next.get("traveler.flags.schengen"), Some(&json!(true)));
        assert_eq!(next.get("traveler.nationality"), Some(&json!("DE")));
        assert_eq!(base.get("traveler.flags"), None);
    }

    /// Verifies scalar intermediates are replaced by objects.
    #[test]
    fn with_value_replaces_scalar_intermediates() {
        let base = FactContext::from_value(json!({ "traveler": "unknown" })).unwrap_or_default();
        let next = base.with_value("traveler.nationality", json!("FR"));
        assert_eq!(next.nationality(), Some("FR"));
    }

    /// Verifies list accessors skip non-string entries.
    #[test]
    fn list_accessors_skip_non_strings() {
        let context = FactContext::from_value(json!({
            "itinerary": { "activities": ["hiking", 3, null, "rafting"], "season": 4 }
        }))
        .unwrap_or_default();
        assert_eq!(context.activities(), vec!["hiking", "rafting"]);
        assert_eq!(context.season(), None);
        assert!(context.traveler_tags().is_empty());
    }

    /// Verifies non-object roots are rejected.
    #[test]
    fn rejects_non_object_roots() {
        assert_eq!(FactContext::from_value(json!([1, 2])), Err(ContextError::NotAnObject));
    }
}
