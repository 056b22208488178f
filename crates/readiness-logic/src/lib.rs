// crates/readiness-logic/src/lib.rs
// ============================================================================
// Module: Readiness Logic Root
// Description: Public API surface for the condition language.
// Purpose: Wire together the condition tree, dialects, and evaluator.
// Dependencies: crate::{capability, comparator, condition, eval, path}
// ============================================================================

//! ## Overview
//! Readiness logic is the boolean condition language advisory rules are
//! written in. It is domain-agnostic: conditions address facts by
//! dot-separated paths through the [`FactReader`] contract and evaluate to a
//! plain `bool`, failing closed on anything malformed.

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod capability;
pub mod comparator;
pub mod condition;
pub mod eval;
pub mod path;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use capability::CapabilityCondition;
pub use capability::CapabilityOperator;
pub use capability::convert_capability_condition;
pub use capability::to_capability_condition;
pub use condition::Condition;
pub use eval::evaluate;
pub use path::FactReader;
pub use path::resolve_path;
