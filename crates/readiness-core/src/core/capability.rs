// crates/readiness-core/src/core/capability.rs
// ============================================================================
// Module: Capability Packs
// Description: Reusable, trigger-selected rule packs and their results.
// Purpose: Define capability pack configs authored in the capability dialect.
// Dependencies: crate::core::pack, readiness-logic, serde
// ============================================================================

//! ## Overview
//! Capability packs are not tied to a destination. Each carries a trigger
//! over the fact context (for example a high average mountain elevation) and
//! a rule set that only matters once the trigger fires. Their conditions are
//! authored in the capability dialect and parsed straight into canonical
//! [`Condition`] trees through [`readiness_logic::capability::dialect`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use readiness_logic::Condition;
use serde::Deserialize;
use serde::Serialize;

use crate::core::pack::ActionLevel;
use crate::core::pack::AppliesTo;
use crate::core::pack::Hazard;
use crate::core::pack::PackSource;
use crate::core::pack::Rule;
use crate::core::pack::RuleAction;
use crate::core::pack::RuleCategory;
use crate::core::pack::RuleEvidence;
use crate::core::pack::RuleSeverity;

// ============================================================================
// SECTION: Capability Types
// ============================================================================

/// Fixed capability domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityType {
    /// Altitude sickness and acclimatization.
    HighAltitude,
    /// Long stretches without fuel, food, or water resupply.
    SparseSupply,
    /// Roads closed or impassable for part of the year.
    SeasonalRoad,
    /// Permits and checkpoints along the route.
    PermitCheckpoint,
    /// Remoteness from emergency services.
    Emergency,
}

impl CapabilityType {
    /// Returns a stable label for the capability type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HighAltitude => "high_altitude",
            Self::SparseSupply => "sparse_supply",
            Self::SeasonalRoad => "seasonal_road",
            Self::PermitCheckpoint => "permit_checkpoint",
            Self::Emergency => "emergency",
        }
    }
}

// ============================================================================
// SECTION: Capability Pack Config
// ============================================================================

/// Rule inside a capability pack, authored in the capability dialect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityRule {
    /// Identifier, unique within the pack.
    pub id: String,
    /// Rule category.
    pub category: RuleCategory,
    /// Display severity.
    pub severity: RuleSeverity,
    /// Optional applicability filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applies_to: Option<AppliesTo>,
    /// Firing condition.
    #[serde(with = "readiness_logic::capability::dialect")]
    pub when: Condition,
    /// Action produced when the rule fires.
    pub then: RuleAction,
    /// Evidence references.
    #[serde(default)]
    pub evidence: Vec<RuleEvidence>,
    /// Author notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<CapabilityRule> for Rule {
    fn from(rule: CapabilityRule) -> Self {
        Self {
            id: rule.id,
            category: rule.category,
            severity: rule.severity,
            applies_to: rule.applies_to,
            when: rule.when,
            then: rule.then,
            evidence: rule.evidence,
            notes: rule.notes,
        }
    }
}

/// Editorial metadata of a capability pack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityMetadata {
    /// Semantic version string.
    #[serde(default)]
    pub version: Option<String>,
    /// Last editorial review date.
    #[serde(default)]
    pub last_reviewed_at: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Seasons the pack has content for.
    #[serde(default)]
    pub supported_seasons: Vec<String>,
    /// Sources cited by rule evidence.
    #[serde(default)]
    pub sources: Vec<PackSource>,
}

/// Reusable capability pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityPackConfig {
    /// Capability domain.
    #[serde(rename = "type")]
    pub capability: CapabilityType,
    /// Human-readable name.
    pub display_name: String,
    /// Trigger deciding whether the pack applies at all.
    #[serde(with = "readiness_logic::capability::dialect")]
    pub trigger: Condition,
    /// Rules evaluated once the trigger fires.
    pub rules: Vec<CapabilityRule>,
    /// Hazards reported once the trigger fires.
    #[serde(default)]
    pub hazards: Vec<Hazard>,
    /// Editorial metadata.
    #[serde(default)]
    pub metadata: CapabilityMetadata,
}

// ============================================================================
// SECTION: Capability Results
// ============================================================================

/// Outcome of one capability rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityRuleResult {
    /// Rule identifier.
    pub id: String,
    /// Whether the rule fired.
    pub triggered: bool,
    /// Bucket level.
    pub level: ActionLevel,
    /// Advisory message.
    pub message: String,
}

/// Hazard as reported in capability results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardSummary {
    /// Hazard type label.
    #[serde(rename = "type")]
    pub kind: String,
    /// Hazard severity.
    pub severity: RuleSeverity,
    /// Short description.
    pub summary: String,
}

impl From<&Hazard> for HazardSummary {
    fn from(hazard: &Hazard) -> Self {
        Self {
            kind: hazard.kind.clone(),
            severity: hazard.severity,
            summary: hazard.summary.clone(),
        }
    }
}

/// Inspection view of one capability pack against one context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityPackResult {
    /// Capability domain.
    pub pack_type: CapabilityType,
    /// Whether the trigger fired.
    pub triggered: bool,
    /// Per-rule outcomes; empty when the trigger did not fire.
    pub rules: Vec<CapabilityRuleResult>,
    /// Pack hazards; empty when the trigger did not fire.
    pub hazards: Vec<HazardSummary>,
}
