// crates/readiness-core/src/runtime/capability.rs
// ============================================================================
// Module: Capability Pack Evaluation
// Description: Two-stage trigger/rule evaluation and pack conversion.
// Purpose: Select reusable capability packs and fold them into the checker.
// Dependencies: crate::{core, runtime::applicability}, readiness-logic
// ============================================================================

//! ## Overview
//! A capability pack passes two gates. The trigger decides whether the pack
//! matters for the trip at all; only then are its rules considered, each
//! through the shared applicability filter and its own condition. Because
//! capability conditions are parsed into canonical [`Condition`] trees on
//! load, the same evaluator serves both stages and the converted
//! [`ReadinessPack`] behaves identically in the readiness checker.
//!
//! Evaluation here reads the context as given. The public entry points are
//! the [`ReadinessChecker`](crate::runtime::ReadinessChecker) methods, which
//! enrich the context with derived traveler fields first.

// ============================================================================
// SECTION: Imports
// ============================================================================

use readiness_logic::Condition;
use readiness_logic::FactReader;

use crate::core::CapabilityPackConfig;
use crate::core::CapabilityPackResult;
use crate::core::CapabilityRuleResult;
use crate::core::FactContext;
use crate::core::HazardSummary;
use crate::core::PackGeo;
use crate::core::ReadinessPack;
use crate::core::Rule;
use crate::runtime::applicability::is_applicable;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Prefix of pack identifiers produced by [`convert_to_readiness_pack`].
pub const CAPABILITY_PACK_PREFIX: &str = "capability.";
/// Prefix of destination identifiers produced by [`convert_to_readiness_pack`].
pub const CAPABILITY_DESTINATION_PREFIX: &str = "capability:";
/// ISO 3166-1 user-assigned "unknown" code; capability packs have no country.
pub const UNKNOWN_COUNTRY_CODE: &str = "ZZ";
/// Version reported when the pack metadata carries none.
pub const UNVERSIONED: &str = "0.0.0";

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Evaluates a capability trigger. A trigger with no clause never fires.
#[must_use]
pub(crate) fn evaluate_trigger<R: FactReader + ?Sized>(trigger: &Condition, facts: &R) -> bool {
    trigger.evaluate(facts)
}

/// Evaluates a capability pack against an enriched context.
///
/// When the trigger does not fire the result lists no rules and no hazards.
#[must_use]
pub(crate) fn evaluate_capability_pack(
    pack: &CapabilityPackConfig,
    context: &FactContext,
) -> CapabilityPackResult {
    let triggered = evaluate_trigger(&pack.trigger, context);
    if !triggered {
        return CapabilityPackResult {
            pack_type: pack.capability,
            triggered,
            rules: Vec::new(),
            hazards: Vec::new(),
        };
    }
    let rules = pack
        .rules
        .iter()
        .map(|rule| CapabilityRuleResult {
            id: rule.id.clone(),
            triggered: is_applicable(rule.applies_to.as_ref(), context)
                && rule.when.evaluate(context),
            level: rule.then.level,
            message: rule.then.message.clone(),
        })
        .collect();
    CapabilityPackResult {
        pack_type: pack.capability,
        triggered,
        rules,
        hazards: pack.hazards.iter().map(HazardSummary::from).collect(),
    }
}

// ============================================================================
// SECTION: Conversion
// ============================================================================

/// Repackages a capability pack as a canonical readiness pack.
#[must_use]
pub fn convert_to_readiness_pack(pack: &CapabilityPackConfig) -> ReadinessPack {
    let label = pack.capability.as_str();
    ReadinessPack {
        pack_id: format!("{CAPABILITY_PACK_PREFIX}{label}"),
        destination_id: format!("{CAPABILITY_DESTINATION_PREFIX}{label}"),
        version: pack.metadata.version.clone().unwrap_or_else(|| UNVERSIONED.to_string()),
        last_reviewed_at: pack.metadata.last_reviewed_at.clone().unwrap_or_default(),
        geo: PackGeo {
            country_code: UNKNOWN_COUNTRY_CODE.to_string(),
            region: None,
            city: None,
            lat: None,
            lng: None,
        },
        supported_seasons: pack.metadata.supported_seasons.clone(),
        sources: pack.metadata.sources.clone(),
        rules: pack.rules.iter().cloned().map(Rule::from).collect(),
        checklists: Vec::new(),
        hazards: pack.hazards.clone(),
    }
}
