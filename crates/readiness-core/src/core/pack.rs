// crates/readiness-core/src/core/pack.rs
// ============================================================================
// Module: Readiness Packs
// Description: Destination packs, advisory rules, actions, and hazards.
// Purpose: Define the canonical, versioned rule pack consumed by the checker.
// Dependencies: readiness-logic, serde, thiserror
// ============================================================================

//! ## Overview
//! A [`ReadinessPack`] bundles the advisory rules, checklists, and known
//! hazards for one destination. Packs are validated upstream and are never
//! mutated by the engine. [`ReadinessPack::check_structure`] offers the cheap,
//! local checks the multi-destination checker uses to isolate a bad pack.
//!
//! Rules carry two independent severity axes: [`ActionLevel`] decides which
//! bucket a fired rule lands in, while [`RuleSeverity`] is display-only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use readiness_logic::Condition;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Severity Axes
// ============================================================================

/// Action level of a fired rule. The only axis that affects bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionLevel {
    /// The trip cannot proceed until resolved.
    Blocker,
    /// Required preparation.
    Must,
    /// Recommended preparation.
    Should,
    /// Nice to have.
    Optional,
}

/// How strongly the downstream planner treats a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintStrength {
    /// Hard planner constraint.
    Hard,
    /// Soft planner constraint.
    Soft,
}

impl ActionLevel {
    /// All levels in bucket order.
    pub const ALL: [Self; 4] = [Self::Blocker, Self::Must, Self::Should, Self::Optional];

    /// Returns the planner constraint strength for the level.
    #[must_use]
    pub const fn constraint_strength(self) -> ConstraintStrength {
        match self {
            Self::Blocker | Self::Must => ConstraintStrength::Hard,
            Self::Should | Self::Optional => ConstraintStrength::Soft,
        }
    }
}

/// Informational rule severity, carried for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSeverity {
    /// Low impact.
    Low,
    /// Medium impact.
    Medium,
    /// High impact.
    High,
}

/// Fixed rule categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    /// Visas, entry permits, and transit.
    EntryTransit,
    /// Environmental and security hazards.
    SafetyHazards,
    /// Vaccinations, medical care, and insurance.
    HealthInsurance,
    /// Gear and packing.
    GearPacking,
    /// Activity permits and bookings.
    ActivitiesBookings,
    /// Money, connectivity, and transport logistics.
    Logistics,
}

// ============================================================================
// SECTION: Rules
// ============================================================================

/// Applicability filter evaluated before a rule's condition.
///
/// Empty lists are unpopulated and do not restrict the rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliesTo {
    /// Seasons the rule applies to; `"all"` matches any set season.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub seasons: Vec<String>,
    /// Activities, any of which makes the rule applicable.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub activities: Vec<String>,
    /// Traveler tags, any of which makes the rule applicable.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub traveler_tags: Vec<String>,
}

/// Preparation task attached to a rule action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionTask {
    /// Task title.
    pub title: String,
    /// Days relative to departure; negative values fall before departure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_offset_days: Option<i32>,
    /// Free-form task tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// What a fired rule asks of the traveler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleAction {
    /// Bucket the fired rule lands in.
    pub level: ActionLevel,
    /// Advisory message.
    pub message: String,
    /// Preparation tasks.
    #[serde(default)]
    pub tasks: Vec<ActionTask>,
    /// Questions to put to the traveler when facts are missing.
    #[serde(default)]
    pub ask_user: Vec<String>,
}

/// Evidence backing a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleEvidence {
    /// Identifier of a source listed in the pack.
    pub source_id: String,
    /// Optional excerpt or note from the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Advisory rule inside a pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
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

// ============================================================================
// SECTION: Pack
// ============================================================================

/// Geographic anchor of a pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackGeo {
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: String,
    /// Region name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// City name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Latitude in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// Longitude in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

/// Source referenced by rule evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackSource {
    /// Source identifier.
    pub id: String,
    /// Source title.
    pub title: String,
    /// Source location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Static checklist shipped with a pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    /// Checklist identifier.
    pub id: String,
    /// Checklist title.
    pub title: String,
    /// Checklist entries.
    #[serde(default)]
    pub items: Vec<String>,
}

/// Known hazard copied into findings verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hazard {
    /// Hazard type label.
    #[serde(rename = "type")]
    pub kind: String,
    /// Hazard severity.
    pub severity: RuleSeverity,
    /// Short description.
    pub summary: String,
    /// Suggested mitigations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mitigations: Vec<String>,
}

/// Versioned rule pack for one destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessPack {
    /// Pack identifier.
    pub pack_id: String,
    /// Destination identifier.
    pub destination_id: String,
    /// Semantic version string.
    pub version: String,
    /// Last editorial review date.
    pub last_reviewed_at: String,
    /// Geographic anchor.
    pub geo: PackGeo,
    /// Seasons the pack has content for.
    #[serde(default)]
    pub supported_seasons: Vec<String>,
    /// Sources cited by rule evidence.
    #[serde(default)]
    pub sources: Vec<PackSource>,
    /// Advisory rules in evaluation order.
    pub rules: Vec<Rule>,
    /// Static checklists.
    #[serde(default)]
    pub checklists: Vec<Checklist>,
    /// Known hazards.
    #[serde(default)]
    pub hazards: Vec<Hazard>,
}

// ============================================================================
// SECTION: Structural Checks
// ============================================================================

/// Limits applied by [`ReadinessPack::check_structure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackLimits {
    /// Maximum depth of any rule condition.
    pub max_condition_depth: usize,
}

/// Default maximum condition depth.
pub const DEFAULT_MAX_CONDITION_DEPTH: usize = 32;

impl Default for PackLimits {
    fn default() -> Self {
        Self {
            max_condition_depth: DEFAULT_MAX_CONDITION_DEPTH,
        }
    }
}

/// Structural problems that make a pack unsafe to evaluate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PackError {
    /// The pack identifier is empty.
    #[error("pack id is empty")]
    MissingPackId,
    /// Two rules share an identifier.
    #[error("pack {pack_id} has duplicate rule id {rule_id}")]
    DuplicateRuleId {
        /// Offending pack.
        pack_id: String,
        /// Repeated rule identifier.
        rule_id: String,
    },
    /// A rule condition exceeds the depth limit.
    #[error("rule {rule_id} in pack {pack_id} is {depth} levels deep (max {max_depth})")]
    ConditionTooDeep {
        /// Offending pack.
        pack_id: String,
        /// Offending rule.
        rule_id: String,
        /// Depth encountered.
        depth: usize,
        /// Configured maximum.
        max_depth: usize,
    },
}

impl ReadinessPack {
    /// Checks the local structural invariants the checker relies on.
    ///
    /// A pack without rules passes: it still contributes its hazards.
    ///
    /// # Errors
    ///
    /// Returns [`PackError`] for the first violated invariant.
    pub fn check_structure(&self, limits: PackLimits) -> Result<(), PackError> {
        if self.pack_id.trim().is_empty() {
            return Err(PackError::MissingPackId);
        }
        let mut seen = BTreeSet::new();
        for rule in &self.rules {
            if !seen.insert(rule.id.as_str()) {
                return Err(PackError::DuplicateRuleId {
                    pack_id: self.pack_id.clone(),
                    rule_id: rule.id.clone(),
                });
            }
            let depth = rule.when.depth();
            if depth > limits.max_condition_depth {
                return Err(PackError::ConditionTooDeep {
                    pack_id: self.pack_id.clone(),
                    rule_id: rule.id.clone(),
                    depth,
                    max_depth: limits.max_condition_depth,
                });
            }
        }
        Ok(())
    }
}
