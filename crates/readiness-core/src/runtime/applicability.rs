// crates/readiness-core/src/runtime/applicability.rs
// ============================================================================
// Module: Rule Applicability
// Description: Season, activity, and traveler-tag gate applied before `when`.
// Purpose: Decide whether a rule is considered at all for a context.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Applicability is a separate gate from the rule condition. Each populated
//! sub-filter must pass (AND) while matching within one sub-filter is any-of
//! (OR). Destination rules and capability rules share this one function.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::AppliesTo;
use crate::core::FactContext;
use crate::core::Rule;

/// Season label matching any season the context sets.
pub const ALL_SEASONS: &str = "all";

// ============================================================================
// SECTION: Applicability
// ============================================================================

/// Returns true when a rule with `applies_to` is considered for `context`.
///
/// A missing filter always applies. A declared season list with no season in
/// the context never applies.
#[must_use]
pub fn is_applicable(applies_to: Option<&AppliesTo>, context: &FactContext) -> bool {
    let Some(filter) = applies_to else {
        return true;
    };
    seasons_match(&filter.seasons, context)
        && intersects(&filter.activities, &context.activities())
        && intersects(&filter.traveler_tags, &context.traveler_tags())
}

/// Returns true when `rule` is considered for `context`.
#[must_use]
pub fn rule_is_applicable(rule: &Rule, context: &FactContext) -> bool {
    is_applicable(rule.applies_to.as_ref(), context)
}

/// Season sub-filter.
fn seasons_match(seasons: &[String], context: &FactContext) -> bool {
    if seasons.is_empty() {
        return true;
    }
    let Some(season) = context.season() else {
        return false;
    };
    seasons.iter().any(|declared| declared == season || declared == ALL_SEASONS)
}

/// Any-of sub-filter; an empty declared list does not restrict.
fn intersects(declared: &[String], present: &[&str]) -> bool {
    declared.is_empty() || declared.iter().any(|item| present.contains(&item.as_str()))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
