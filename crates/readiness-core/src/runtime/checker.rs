// crates/readiness-core/src/runtime/checker.rs
// ============================================================================
// Module: Readiness Checker
// Description: Evaluates packs against a fact context and buckets fired rules.
// Purpose: Produce deterministic readiness findings per pack and per trip.
// Dependencies: crate::{audit, core, runtime}, readiness-logic, serde, thiserror
// ============================================================================

//! ## Overview
//! The checker is the orchestration point of the engine. For each rule it
//! applies the applicability filter, then the rule condition, and files
//! fired rules into the bucket named by their action level. Before any rule
//! runs it derives `traveler.nationalityRequiresSchengen` into a copy of the
//! context from the injected [`SchengenTable`].
//!
//! Security posture: packs are treated as data. A misauthored condition never
//! fires, and a structurally broken pack is isolated (or aborts the check)
//! according to [`InvalidPackPolicy`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::audit::CapabilityTriggerEvent;
use crate::audit::NoopAuditSink;
use crate::audit::PackEvaluatedEvent;
use crate::audit::PackSkippedEvent;
use crate::audit::ReadinessAuditSink;
use crate::core::CapabilityPackConfig;
use crate::core::CapabilityPackResult;
use crate::core::FactContext;
use crate::core::PackError;
use crate::core::PackLimits;
use crate::core::ReadinessCheckResult;
use crate::core::ReadinessFinding;
use crate::core::ReadinessFindingItem;
use crate::core::ReadinessPack;
use crate::core::Rule;
use crate::core::SkippedPack;
use crate::core::context::REQUIRES_SCHENGEN_PATH;
use crate::runtime::aggregate::aggregate;
use crate::runtime::applicability::rule_is_applicable;
use crate::runtime::capability::convert_to_readiness_pack;
use crate::runtime::capability::evaluate_capability_pack;
use crate::runtime::capability::evaluate_trigger;

// ============================================================================
// SECTION: Schengen Table
// ============================================================================

/// Schengen-area members (ISO 3166-1 alpha-2) used by the default table.
pub const DEFAULT_SCHENGEN_MEMBERS: [&str; 29] = [
    "AT", "BE", "BG", "HR", "CZ", "DK", "EE", "FI", "FR", "DE", "GR", "HU", "IS", "IT", "LV", "LI",
    "LT", "LU", "MT", "NL", "NO", "PL", "PT", "RO", "SK", "SI", "ES", "SE", "CH",
];

/// Schengen membership lookup injected into the checker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchengenTable {
    /// Uppercase member codes.
    members: BTreeSet<String>,
}

impl SchengenTable {
    /// Builds a table from country codes. Codes are stored uppercase.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            members: codes.into_iter().map(|code| code.as_ref().to_ascii_uppercase()).collect(),
        }
    }

    /// Returns true when `code` is a member, ignoring ASCII case.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.members.contains(&code.to_ascii_uppercase())
    }
}

impl Default for SchengenTable {
    fn default() -> Self {
        Self::new(DEFAULT_SCHENGEN_MEMBERS)
    }
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// How `missingInfo` questions are collected across fired rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingInfoPolicy {
    /// Keep the first occurrence of each exact question.
    #[default]
    Dedupe,
    /// Keep every question in firing order.
    KeepAll,
}

/// What a multi-destination check does with a structurally broken pack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidPackPolicy {
    /// Leave the pack out, record it, and continue.
    #[default]
    Skip,
    /// Fail the whole check.
    Abort,
}

/// Checker configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckerConfig {
    /// Schengen membership used for context enrichment.
    pub schengen: SchengenTable,
    /// `missingInfo` collection policy.
    pub missing_info: MissingInfoPolicy,
    /// Broken-pack handling in multi-destination checks.
    pub on_invalid_pack: InvalidPackPolicy,
    /// Structural limits applied before multi-destination evaluation.
    pub limits: PackLimits,
}

/// Errors raised by multi-destination checks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckError {
    /// A pack failed structural checks under [`InvalidPackPolicy::Abort`].
    #[error("invalid pack {pack_id}: {source}")]
    InvalidPack {
        /// Offending pack.
        pack_id: String,
        /// Structural failure.
        #[source]
        source: PackError,
    },
}

// ============================================================================
// SECTION: Readiness Checker
// ============================================================================

/// Evaluates readiness packs against fact contexts.
#[derive(Clone)]
pub struct ReadinessChecker {
    /// Checker configuration.
    config: CheckerConfig,
    /// Audit sink for evaluation events.
    audit: Arc<dyn ReadinessAuditSink>,
}

impl Default for ReadinessChecker {
    fn default() -> Self {
        Self::new(CheckerConfig::default())
    }
}

impl ReadinessChecker {
    /// Creates a checker that does not audit.
    #[must_use]
    pub fn new(config: CheckerConfig) -> Self {
        Self {
            config,
            audit: Arc::new(NoopAuditSink),
        }
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit_sink(mut self, audit: Arc<dyn ReadinessAuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Returns the checker configuration.
    #[must_use]
    pub const fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Returns a copy of `context` with derived traveler fields.
    ///
    /// Without a nationality the derived flag is left unset.
    #[must_use]
    pub fn enrich_context(&self, context: &FactContext) -> FactContext {
        match context.nationality() {
            Some(code) => context.with_value(
                REQUIRES_SCHENGEN_PATH,
                Value::Bool(!self.config.schengen.contains(code)),
            ),
            None => context.clone(),
        }
    }

    /// Evaluates one pack against `context`.
    #[must_use]
    pub fn check_destination(&self, pack: &ReadinessPack, context: &FactContext) -> ReadinessFinding {
        let enriched = self.enrich_context(context);
        self.evaluate_pack(pack, &enriched)
    }

    /// Evaluates every pack against the same context and sums the buckets.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::InvalidPack`] when a pack fails structural checks
    /// and the policy is [`InvalidPackPolicy::Abort`].
    pub fn check_multiple_destinations(
        &self,
        packs: &[ReadinessPack],
        context: &FactContext,
    ) -> Result<ReadinessCheckResult, CheckError> {
        let enriched = self.enrich_context(context);
        let mut findings = Vec::with_capacity(packs.len());
        let mut skipped = Vec::new();
        for pack in packs {
            if let Err(err) = pack.check_structure(self.config.limits) {
                match self.config.on_invalid_pack {
                    InvalidPackPolicy::Abort => {
                        return Err(CheckError::InvalidPack {
                            pack_id: pack.pack_id.clone(),
                            source: err,
                        });
                    }
                    InvalidPackPolicy::Skip => {
                        let entry = SkippedPack {
                            pack_id: pack.pack_id.clone(),
                            destination_id: pack.destination_id.clone(),
                            reason: err.to_string(),
                        };
                        self.audit.record_skipped(&PackSkippedEvent::new(
                            entry.pack_id.clone(),
                            entry.destination_id.clone(),
                            entry.reason.clone(),
                        ));
                        skipped.push(entry);
                        continue;
                    }
                }
            }
            findings.push(self.evaluate_pack(pack, &enriched));
        }
        Ok(aggregate(findings, skipped))
    }

    /// Evaluates a capability pack for inspection.
    ///
    /// Trigger and rules see the enriched context, so they may key on
    /// `traveler.nationalityRequiresSchengen`.
    #[must_use]
    pub fn evaluate_capability_pack(
        &self,
        pack: &CapabilityPackConfig,
        context: &FactContext,
    ) -> CapabilityPackResult {
        let enriched = self.enrich_context(context);
        let result = evaluate_capability_pack(pack, &enriched);
        self.audit.record_trigger(&CapabilityTriggerEvent::new(pack.capability, result.triggered));
        result
    }

    /// Returns converted packs for the capabilities whose trigger fires.
    #[must_use]
    pub fn select_capability_packs(
        &self,
        configs: &[CapabilityPackConfig],
        context: &FactContext,
    ) -> Vec<ReadinessPack> {
        let enriched = self.enrich_context(context);
        let mut selected = Vec::new();
        for config in configs {
            let triggered = evaluate_trigger(&config.trigger, &enriched);
            self.audit.record_trigger(&CapabilityTriggerEvent::new(config.capability, triggered));
            if triggered {
                selected.push(convert_to_readiness_pack(config));
            }
        }
        selected
    }

    /// Runs every rule of `pack` against an already enriched context.
    fn evaluate_pack(&self, pack: &ReadinessPack, context: &FactContext) -> ReadinessFinding {
        let mut finding =
            ReadinessFinding::empty(&pack.pack_id, &pack.destination_id, &pack.version);
        for rule in &pack.rules {
            if rule_is_applicable(rule, context) && rule.when.evaluate(context) {
                self.collect_missing_info(&mut finding.missing_info, &rule.then.ask_user);
                finding.push(finding_item(rule));
            }
        }
        finding.risks.clone_from(&pack.hazards);
        self.audit.record_evaluated(&PackEvaluatedEvent::new(&finding, pack.rules.len()));
        finding
    }

    /// Appends questions according to the missing-info policy.
    fn collect_missing_info(&self, missing_info: &mut Vec<String>, questions: &[String]) {
        for question in questions {
            if self.config.missing_info == MissingInfoPolicy::Dedupe
                && missing_info.contains(question)
            {
                continue;
            }
            missing_info.push(question.clone());
        }
    }
}

/// Builds the finding item for a fired rule.
fn finding_item(rule: &Rule) -> ReadinessFindingItem {
    ReadinessFindingItem {
        id: rule.id.clone(),
        category: rule.category,
        severity: rule.severity,
        level: rule.then.level,
        message: rule.then.message.clone(),
        tasks: rule.then.tasks.clone(),
        ask_user: rule.then.ask_user.clone(),
        evidence: rule.evidence.clone(),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
