// crates/readiness-core/tests/common/mod.rs
// ============================================================================
// Module: Test Support
// Description: Result helpers plus pack and context fixtures for checker tests.
// ============================================================================
//! ## Overview
//! Shared fixtures for readiness checker integration tests. Packs are built
//! from JSON so every test also exercises the wire format.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    dead_code,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::error::Error;
use std::fmt;

use readiness_core::CapabilityPackConfig;
use readiness_core::FactContext;
use readiness_core::ReadinessPack;
use serde_json::Value;
use serde_json::json;

// ========================================================================
// Test Result Helpers
// ========================================================================

/// Standard result type used across readiness integration tests.
pub type TestResult<T = ()> = Result<T, Box<dyn Error>>;

/// Lightweight error type for test assertions.
#[derive(Debug)]
struct TestError {
    /// Human-readable failure message.
    message: String,
}

impl fmt::Display for TestError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

impl Error for TestError {}

/// Returns an error when a test condition fails.
///
/// # Errors
/// Returns a `TestError` when the condition is false.
pub fn ensure(condition: bool, message: impl Into<String>) -> TestResult {
    if condition {
        Ok(())
    } else {
        Err(Box::new(TestError {
            message: message.into(),
        }))
    }
}

// ========================================================================
// Fixtures
// ========================================================================

/// Builds a rule with the given level and condition.
pub fn rule(id: &str, level: &str, when: Value) -> Value {
    json!({
        "id": id,
        "category": "activities_bookings",
        "severity": "medium",
        "when": when,
        "then": { "level": level, "message": format!("{id} fired") }
    })
}

/// Builds a pack around `rules`.
pub fn pack(pack_id: &str, rules: Vec<Value>) -> TestResult<ReadinessPack> {
    let pack = serde_json::from_value(json!({
        "packId": pack_id,
        "destinationId": format!("dest-{pack_id}"),
        "version": "1.0.0",
        "lastReviewedAt": "2026-01-15",
        "geo": { "countryCode": "NP", "region": "Bagmati" },
        "supportedSeasons": ["winter", "spring"],
        "rules": rules,
        "hazards": [
            { "type": "altitude", "severity": "high", "summary": "Thin air above 3000m" }
        ]
    }))?;
    Ok(pack)
}

/// Condition matching when the itinerary includes hiking.
pub fn hiking() -> Value {
    json!({ "containsAny": { "path": "itinerary.activities", "values": ["hiking"] } })
}

/// Condition that always holds for [`trip_context`].
pub fn always() -> Value {
    json!({ "all": [] })
}

/// Builds a context from JSON.
pub fn context(value: Value) -> TestResult<FactContext> {
    Ok(FactContext::from_value(value)?)
}

/// A winter hiking trip by a US traveler with asthma.
pub fn trip_context() -> TestResult<FactContext> {
    context(json!({
        "traveler": { "nationality": "US", "tags": ["asthma"] },
        "itinerary": { "season": "winter", "activities": ["hiking", "sightseeing"] },
        "geo": { "mountains": { "mountainElevationAvg": 3500 } }
    }))
}

/// High-altitude capability pack authored in the capability dialect.
pub fn high_altitude_pack() -> TestResult<CapabilityPackConfig> {
    let pack = serde_json::from_value(json!({
        "type": "high_altitude",
        "displayName": "High altitude",
        "trigger": {
            "all": [
                { "geoPath": "geo.mountains.mountainElevationAvg", "operator": "gte", "value": 3000 }
            ]
        },
        "rules": [
            {
                "id": "acclimatize",
                "category": "health_insurance",
                "severity": "high",
                "when": { "geoPath": "geo.mountains.mountainElevationAvg", "operator": "gte", "value": 3000 },
                "then": {
                    "level": "must",
                    "message": "Plan acclimatization days",
                    "tasks": [{ "title": "Add rest day", "dueOffsetDays": -30 }]
                }
            },
            {
                "id": "asthma-check",
                "category": "health_insurance",
                "severity": "medium",
                "appliesTo": { "travelerTags": ["asthma"] },
                "when": { "contextPath": "itinerary.season", "operator": "eq", "value": "winter" },
                "then": { "level": "should", "message": "Talk to a doctor about altitude and asthma" }
            },
            {
                "id": "summer-sun",
                "category": "gear_packing",
                "severity": "low",
                "appliesTo": { "seasons": ["summer"] },
                "when": { "all": [] },
                "then": { "level": "optional", "message": "Pack glacier glasses" }
            }
        ],
        "hazards": [
            {
                "type": "altitude_sickness",
                "severity": "high",
                "summary": "AMS risk above 2500m",
                "mitigations": ["Ascend slowly"]
            }
        ],
        "metadata": { "version": "2.1.0", "lastReviewedAt": "2026-03-01" }
    }))?;
    Ok(pack)
}
