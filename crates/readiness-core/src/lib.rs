// crates/readiness-core/src/lib.rs
// ============================================================================
// Module: Readiness Core Library
// Description: Public API surface for the readiness rule engine.
// Purpose: Expose pack types, the fact context, and the readiness checker.
// Dependencies: crate::{audit, core, runtime}
// ============================================================================

//! ## Overview
//! Readiness core decides, for one trip context, which advisory rules fire
//! and files them into blocker, must, should, and optional buckets alongside
//! the packs' known hazards. It is a synchronous library: no I/O happens
//! during evaluation apart from the optional audit sink.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod core;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use audit::CapabilityTriggerEvent;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::PackEvaluatedEvent;
pub use audit::PackSkippedEvent;
pub use audit::ReadinessAuditSink;
pub use audit::StderrAuditSink;
pub use readiness_logic::CapabilityCondition;
pub use readiness_logic::CapabilityOperator;
pub use readiness_logic::Condition;
pub use readiness_logic::convert_capability_condition;
pub use runtime::CheckError;
pub use runtime::CheckerConfig;
pub use runtime::InvalidPackPolicy;
pub use runtime::MissingInfoPolicy;
pub use runtime::ReadinessChecker;
pub use runtime::ReadinessTask;
pub use runtime::SchengenTable;
pub use runtime::aggregate;
pub use runtime::convert_to_readiness_pack;
pub use runtime::extract_tasks;
pub use runtime::is_applicable;
pub use runtime::merge_results;
