// crates/readiness-core/src/runtime/aggregate.rs
// ============================================================================
// Module: Finding Aggregation
// Description: Cross-pack summary counters and result merging.
// Purpose: Fold per-pack findings into one trip-wide check result.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Aggregation never inspects rules; it only sums bucket sizes. Findings keep
//! their input order so a merged result stays reproducible.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::ReadinessCheckResult;
use crate::core::ReadinessFinding;
use crate::core::ReadinessSummary;
use crate::core::SkippedPack;

// ============================================================================
// SECTION: Aggregation
// ============================================================================

impl ReadinessSummary {
    /// Sums bucket sizes over `findings`.
    #[must_use]
    pub fn from_findings(findings: &[ReadinessFinding]) -> Self {
        let mut summary = Self::default();
        for finding in findings {
            summary.add(finding);
        }
        summary
    }
}

/// Builds a check result from findings and skipped packs.
#[must_use]
pub fn aggregate(findings: Vec<ReadinessFinding>, skipped: Vec<SkippedPack>) -> ReadinessCheckResult {
    let summary = ReadinessSummary::from_findings(&findings);
    ReadinessCheckResult {
        findings,
        summary,
        skipped,
    }
}

/// Concatenates results (for example destination and capability checks) and
/// recomputes the counters.
#[must_use]
pub fn merge_results<I>(results: I) -> ReadinessCheckResult
where
    I: IntoIterator<Item = ReadinessCheckResult>,
{
    let mut findings = Vec::new();
    let mut skipped = Vec::new();
    for result in results {
        findings.extend(result.findings);
        skipped.extend(result.skipped);
    }
    aggregate(findings, skipped)
}
