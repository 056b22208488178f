// crates/readiness-core/src/runtime/mod.rs
// ============================================================================
// Module: Readiness Runtime
// Description: Applicability filter, checker, capability packs, aggregation.
// Purpose: Evaluate packs against fact contexts deterministically.
// Dependencies: crate::{audit, core}, readiness-logic
// ============================================================================

//! ## Overview
//! Runtime modules implement readiness evaluation. Destination packs and
//! converted capability packs go through the same checker so both produce
//! identical finding shapes.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod aggregate;
pub mod applicability;
pub mod capability;
pub mod checker;
pub mod tasks;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use aggregate::aggregate;
pub use aggregate::merge_results;
pub use applicability::is_applicable;
pub use applicability::rule_is_applicable;
pub use capability::convert_to_readiness_pack;
pub use checker::CheckError;
pub use checker::CheckerConfig;
pub use checker::InvalidPackPolicy;
pub use checker::MissingInfoPolicy;
pub use checker::ReadinessChecker;
pub use checker::SchengenTable;
pub use tasks::ReadinessTask;
pub use tasks::extract_tasks;
