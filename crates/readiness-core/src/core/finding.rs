// crates/readiness-core/src/core/finding.rs
// ============================================================================
// Module: Readiness Findings
// Description: Per-pack findings and the cross-destination check result.
// Purpose: Define the bucketed output consumed by planners and task extraction.
// Dependencies: crate::core::{hashing, pack}, serde
// ============================================================================

//! ## Overview
//! A [`ReadinessFinding`] holds the fired rules of one pack in four disjoint
//! buckets keyed by [`ActionLevel`], the pack's hazards, and the questions to
//! ask the traveler. A [`ReadinessCheckResult`] collects findings across
//! packs together with summary counters.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::hashing::HashDigest;
use crate::core::hashing::HashError;
use crate::core::hashing::hash_canonical_json;
use crate::core::pack::ActionLevel;
use crate::core::pack::ActionTask;
use crate::core::pack::Hazard;
use crate::core::pack::RuleCategory;
use crate::core::pack::RuleEvidence;
use crate::core::pack::RuleSeverity;

// ============================================================================
// SECTION: Finding Items
// ============================================================================

/// One fired rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessFindingItem {
    /// Rule identifier.
    pub id: String,
    /// Rule category.
    pub category: RuleCategory,
    /// Display severity.
    pub severity: RuleSeverity,
    /// Bucket level.
    pub level: ActionLevel,
    /// Advisory message.
    pub message: String,
    /// Preparation tasks.
    pub tasks: Vec<ActionTask>,
    /// Questions for the traveler.
    pub ask_user: Vec<String>,
    /// Evidence references.
    pub evidence: Vec<RuleEvidence>,
}

// ============================================================================
// SECTION: Finding
// ============================================================================

/// Categorized result of evaluating one pack against one context.
///
/// # Invariants
/// - Every item sits in the bucket named by its `level`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessFinding {
    /// Evaluated pack.
    pub pack_id: String,
    /// Destination of the pack.
    pub destination_id: String,
    /// Version of the pack.
    pub pack_version: String,
    /// Fired blocker rules.
    pub blockers: Vec<ReadinessFindingItem>,
    /// Fired must rules.
    pub must: Vec<ReadinessFindingItem>,
    /// Fired should rules.
    pub should: Vec<ReadinessFindingItem>,
    /// Fired optional rules.
    pub optional: Vec<ReadinessFindingItem>,
    /// Pack hazards, verbatim.
    pub risks: Vec<Hazard>,
    /// Questions collected from fired rules.
    pub missing_info: Vec<String>,
}

impl ReadinessFinding {
    /// Creates an empty finding for a pack.
    pub fn empty(
        pack_id: impl Into<String>,
        destination_id: impl Into<String>,
        pack_version: impl Into<String>,
    ) -> Self {
        Self {
            pack_id: pack_id.into(),
            destination_id: destination_id.into(),
            pack_version: pack_version.into(),
            blockers: Vec::new(),
            must: Vec::new(),
            should: Vec::new(),
            optional: Vec::new(),
            risks: Vec::new(),
            missing_info: Vec::new(),
        }
    }

    /// Returns the bucket for `level`.
    #[must_use]
    pub fn bucket(&self, level: ActionLevel) -> &[ReadinessFindingItem] {
        match level {
            ActionLevel::Blocker => &self.blockers,
            ActionLevel::Must => &self.must,
            ActionLevel::Should => &self.should,
            ActionLevel::Optional => &self.optional,
        }
    }

    /// Appends an item to the bucket named by its level.
    pub fn push(&mut self, item: ReadinessFindingItem) {
        let bucket = match item.level {
            ActionLevel::Blocker => &mut self.blockers,
            ActionLevel::Must => &mut self.must,
            ActionLevel::Should => &mut self.should,
            ActionLevel::Optional => &mut self.optional,
        };
        bucket.push(item);
    }

    /// Iterates every fired item in bucket order.
    pub fn items(&self) -> impl Iterator<Item = &ReadinessFindingItem> {
        ActionLevel::ALL.into_iter().flat_map(|level| self.bucket(level).iter())
    }

    /// Returns the number of fired rules.
    #[must_use]
    pub fn fired_count(&self) -> usize {
        self.blockers.len() + self.must.len() + self.should.len() + self.optional.len()
    }

    /// Computes the canonical hash of the finding.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] when canonicalization fails.
    pub fn canonical_hash(&self) -> Result<HashDigest, HashError> {
        hash_canonical_json(self)
    }
}

// ============================================================================
// SECTION: Check Result
// ============================================================================

/// Summary counters across findings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessSummary {
    /// Total blocker items.
    pub total_blockers: usize,
    /// Total must items.
    pub total_must: usize,
    /// Total should items.
    pub total_should: usize,
    /// Total optional items.
    pub total_optional: usize,
    /// Total hazards.
    pub total_risks: usize,
}

impl ReadinessSummary {
    /// Adds one finding's bucket sizes to the counters.
    pub fn add(&mut self, finding: &ReadinessFinding) {
        self.total_blockers += finding.blockers.len();
        self.total_must += finding.must.len();
        self.total_should += finding.should.len();
        self.total_optional += finding.optional.len();
        self.total_risks += finding.risks.len();
    }
}

/// Pack left out of a multi-destination check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedPack {
    /// Skipped pack.
    pub pack_id: String,
    /// Destination of the skipped pack.
    pub destination_id: String,
    /// Why the pack was skipped.
    pub reason: String,
}

/// Findings across packs plus summary counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessCheckResult {
    /// One finding per evaluated pack, in input order.
    pub findings: Vec<ReadinessFinding>,
    /// Counters summed over `findings`.
    pub summary: ReadinessSummary,
    /// Packs excluded by structural checks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedPack>,
}

impl ReadinessCheckResult {
    /// Returns true when any finding has a blocker.
    #[must_use]
    pub const fn has_blockers(&self) -> bool {
        self.summary.total_blockers > 0
    }

    /// Returns the finding for a pack.
    #[must_use]
    pub fn finding(&self, pack_id: &str) -> Option<&ReadinessFinding> {
        self.findings.iter().find(|finding| finding.pack_id == pack_id)
    }

    /// Computes the canonical hash of the result.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] when canonicalization fails.
    pub fn canonical_hash(&self) -> Result<HashDigest, HashError> {
        hash_canonical_json(self)
    }
}
