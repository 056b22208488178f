// crates/readiness-core/src/audit.rs
// ============================================================================
// Module: Readiness Audit Logging
// Description: Structured audit events for readiness evaluation.
// Purpose: Emit JSON-lines audit records without a logging framework dependency.
// Dependencies: crate::core, serde, serde_json
// ============================================================================

//! ## Overview
//! The checker reports what it evaluated, skipped, and triggered through a
//! [`ReadinessAuditSink`]. Events carry a wall-clock timestamp; findings
//! never do, so repeated checks stay byte-for-byte identical while the audit
//! trail still records when they happened.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::CapabilityType;
use crate::core::ReadinessFinding;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Emitted after a pack has been evaluated.
#[derive(Debug, Clone, Serialize)]
pub struct PackEvaluatedEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Evaluated pack.
    pub pack_id: String,
    /// Destination of the pack.
    pub destination_id: String,
    /// Version of the pack.
    pub pack_version: String,
    /// Rules in the pack.
    pub rules_considered: usize,
    /// Rules that fired.
    pub rules_fired: usize,
    /// Blocker bucket size.
    pub blockers: usize,
    /// Must bucket size.
    pub must: usize,
    /// Should bucket size.
    pub should: usize,
    /// Optional bucket size.
    pub optional: usize,
    /// Hazards copied into the finding.
    pub risks: usize,
}

/// Emitted when a pack is left out of a multi-destination check.
#[derive(Debug, Clone, Serialize)]
pub struct PackSkippedEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Skipped pack.
    pub pack_id: String,
    /// Destination of the skipped pack.
    pub destination_id: String,
    /// Why the pack was skipped.
    pub reason: String,
}

/// Emitted when a capability trigger is evaluated.
#[derive(Debug, Clone, Serialize)]
pub struct CapabilityTriggerEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Capability domain.
    pub capability: CapabilityType,
    /// Whether the trigger fired.
    pub triggered: bool,
}

/// Returns the current time in milliseconds since the epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

impl PackEvaluatedEvent {
    /// Creates an event describing `finding`.
    #[must_use]
    pub fn new(finding: &ReadinessFinding, rules_considered: usize) -> Self {
        Self {
            event: "pack_evaluated",
            timestamp_ms: now_ms(),
            pack_id: finding.pack_id.clone(),
            destination_id: finding.destination_id.clone(),
            pack_version: finding.pack_version.clone(),
            rules_considered,
            rules_fired: finding.fired_count(),
            blockers: finding.blockers.len(),
            must: finding.must.len(),
            should: finding.should.len(),
            optional: finding.optional.len(),
            risks: finding.risks.len(),
        }
    }
}

impl PackSkippedEvent {
    /// Creates a skip event.
    #[must_use]
    pub fn new(pack_id: String, destination_id: String, reason: String) -> Self {
        Self {
            event: "pack_skipped",
            timestamp_ms: now_ms(),
            pack_id,
            destination_id,
            reason,
        }
    }
}

impl CapabilityTriggerEvent {
    /// Creates a trigger event.
    #[must_use]
    pub fn new(capability: CapabilityType, triggered: bool) -> Self {
        Self {
            event: "capability_trigger",
            timestamp_ms: now_ms(),
            capability,
            triggered,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for readiness events.
pub trait ReadinessAuditSink: Send + Sync {
    /// Record a pack evaluation.
    fn record_evaluated(&self, event: &PackEvaluatedEvent);

    /// Record a skipped pack.
    fn record_skipped(&self, _event: &PackSkippedEvent) {}

    /// Record a capability trigger evaluation.
    fn record_trigger(&self, _event: &CapabilityTriggerEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl StderrAuditSink {
    /// Writes one event as a JSON line.
    fn emit<T: Serialize>(event: &T) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

impl ReadinessAuditSink for StderrAuditSink {
    fn record_evaluated(&self, event: &PackEvaluatedEvent) {
        Self::emit(event);
    }

    fn record_skipped(&self, event: &PackSkippedEvent) {
        Self::emit(event);
    }

    fn record_trigger(&self, event: &CapabilityTriggerEvent) {
        Self::emit(event);
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one event as a JSON line.
    fn emit<T: Serialize>(&self, event: &T) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

impl ReadinessAuditSink for FileAuditSink {
    fn record_evaluated(&self, event: &PackEvaluatedEvent) {
        self.emit(event);
    }

    fn record_skipped(&self, event: &PackSkippedEvent) {
        self.emit(event);
    }

    fn record_trigger(&self, event: &CapabilityTriggerEvent) {
        self.emit(event);
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl ReadinessAuditSink for NoopAuditSink {
    fn record_evaluated(&self, _event: &PackEvaluatedEvent) {}
}
