// crates/readiness-config/src/lib.rs
// ============================================================================
// Module: Readiness Config Library
// Description: Engine configuration model and validation.
// Purpose: Single source of truth for readiness.toml semantics.
// Dependencies: readiness-core, serde, toml
// ============================================================================

//! ## Overview
//! `readiness-config` defines the configuration model for the readiness
//! checker. It provides strict, fail-closed validation and builds the
//! checker, its Schengen table, and its audit sink from one TOML file.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
