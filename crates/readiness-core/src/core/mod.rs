// crates/readiness-core/src/core/mod.rs
// ============================================================================
// Module: Readiness Core Types
// Description: Canonical pack, context, and finding structures.
// Purpose: Provide stable, serializable types for readiness evaluation.
// Dependencies: readiness-logic, serde
// ============================================================================

//! ## Overview
//! Core types define rule packs, capability packs, the fact context, and the
//! findings the checker produces. They are request-scoped values: built at the
//! start of an evaluation and discarded afterwards.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod capability;
pub mod context;
pub mod finding;
pub mod hashing;
pub mod pack;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use capability::CapabilityMetadata;
pub use capability::CapabilityPackConfig;
pub use capability::CapabilityPackResult;
pub use capability::CapabilityRule;
pub use capability::CapabilityRuleResult;
pub use capability::CapabilityType;
pub use capability::HazardSummary;
pub use context::ContextError;
pub use context::FactContext;
pub use finding::ReadinessCheckResult;
pub use finding::ReadinessFinding;
pub use finding::ReadinessFindingItem;
pub use finding::ReadinessSummary;
pub use finding::SkippedPack;
pub use hashing::HashAlgorithm;
pub use hashing::HashDigest;
pub use hashing::HashError;
pub use pack::ActionLevel;
pub use pack::ActionTask;
pub use pack::AppliesTo;
pub use pack::Checklist;
pub use pack::ConstraintStrength;
pub use pack::Hazard;
pub use pack::PackError;
pub use pack::PackGeo;
pub use pack::PackLimits;
pub use pack::PackSource;
pub use pack::ReadinessPack;
pub use pack::Rule;
pub use pack::RuleAction;
pub use pack::RuleCategory;
pub use pack::RuleEvidence;
pub use pack::RuleSeverity;
