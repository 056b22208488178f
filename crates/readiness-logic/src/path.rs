// crates/readiness-logic/src/path.rs
// ============================================================================
// Module: Fact Paths
// Description: Dot-separated path resolution over JSON fact trees.
// Purpose: Provide the reader contract conditions evaluate against.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Facts are addressed by dot-separated paths such as
//! `geo.mountains.mountainElevationAvg`. Resolution walks objects by key and
//! arrays by decimal index, and yields `None` as soon as a segment is missing
//! or an intermediate value is null or a scalar. Resolution never fails.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

// ============================================================================
// SECTION: Reader Contract
// ============================================================================

/// Source of facts addressable by dot-separated paths.
///
/// Implementations return `None` for unresolvable paths. A path that resolves
/// to an explicit JSON `null` returns `Some(&Value::Null)`.
pub trait FactReader {
    /// Looks up the value at `path`.
    fn lookup(&self, path: &str) -> Option<&Value>;
}

impl FactReader for Value {
    fn lookup(&self, path: &str) -> Option<&Value> {
        resolve_path(self, path)
    }
}

impl<R: FactReader + ?Sized> FactReader for &R {
    fn lookup(&self, path: &str) -> Option<&Value> {
        (**self).lookup(path)
    }
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves a dot-separated path against a JSON tree.
///
/// An empty path resolves to nothing. Array segments must be canonical
/// decimal indices: `01` and `+1` do not address element 1.
#[must_use]
pub fn resolve_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    let mut current = root;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(array_index(segment)?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Parses a segment as an array index, accepting only its canonical form.
fn array_index(segment: &str) -> Option<usize> {
    let index = segment.parse::<usize>().ok()?;
    (index.to_string() == segment).then_some(index)
}
