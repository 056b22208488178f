// crates/readiness-core/tests/capability_packs.rs
// ============================================================================
// Module: Capability Pack Tests
// Description: Two-stage gating, conversion, and checker parity.
// ============================================================================
//! ## Overview
//! Integration tests for capability packs, from trigger evaluation through
//! conversion into canonical readiness packs.

mod common;

use common::TestResult;
use common::context;
use common::ensure;
use common::high_altitude_pack;
use common::trip_context;
use readiness_core::ActionLevel;
use readiness_core::CapabilityPackConfig;
use readiness_core::CapabilityType;
use readiness_core::Condition;
use readiness_core::ReadinessChecker;
use readiness_core::CheckerConfig;
use readiness_core::InvalidPackPolicy;
use readiness_core::convert_to_readiness_pack;
use serde_json::json;

#[test]
fn elevation_trigger_follows_the_fact() -> TestResult {
    let pack = high_altitude_pack()?;
    let checker = ReadinessChecker::default();
    let high = context(json!({ "geo": { "mountains": { "mountainElevationAvg": 3500 } } }))?;
    let low = context(json!({ "geo": { "mountains": { "mountainElevationAvg": 2000 } } }))?;
    ensure(checker.evaluate_capability_pack(&pack, &high).triggered, "3500 triggers")?;
    ensure(!checker.evaluate_capability_pack(&pack, &low).triggered, "2000 does not trigger")?;
    Ok(())
}

#[test]
fn untriggered_pack_contributes_nothing() -> TestResult {
    let pack = high_altitude_pack()?;
    let result = ReadinessChecker::default().evaluate_capability_pack(&pack, &context(json!({}))?);
    ensure(!result.triggered, "no elevation, no trigger")?;
    ensure(result.rules.is_empty(), "no rule results")?;
    ensure(result.hazards.is_empty(), "no hazards")?;
    Ok(())
}

#[test]
fn triggered_pack_reports_every_rule() -> TestResult {
    let pack = high_altitude_pack()?;
    let result = ReadinessChecker::default().evaluate_capability_pack(&pack, &trip_context()?);
    ensure(result.pack_type == CapabilityType::HighAltitude, "pack type")?;
    let fired: Vec<(&str, bool)> =
        result.rules.iter().map(|rule| (rule.id.as_str(), rule.triggered)).collect();
    ensure(
        fired == vec![("acclimatize", true), ("asthma-check", true), ("summer-sun", false)],
        "applicability and conditions decide each rule",
    )?;
    ensure(result.hazards.len() == 1, "hazard summary")?;
    ensure(result.hazards[0].kind == "altitude_sickness", "hazard type")?;
    Ok(())
}

#[test]
fn capability_rules_honor_traveler_tags() -> TestResult {
    let pack = high_altitude_pack()?;
    let ctx = context(json!({
        "traveler": { "tags": [] },
        "itinerary": { "season": "winter" },
        "geo": { "mountains": { "mountainElevationAvg": 4200 } }
    }))?;
    let result = ReadinessChecker::default().evaluate_capability_pack(&pack, &ctx);
    let asthma = result.rules.iter().find(|rule| rule.id == "asthma-check").ok_or("rule")?;
    ensure(!asthma.triggered, "untagged traveler skips the tagged rule")?;
    Ok(())
}

#[test]
fn empty_trigger_never_fires() -> TestResult {
    let pack: CapabilityPackConfig = serde_json::from_value(json!({
        "type": "emergency",
        "displayName": "Remote emergency",
        "trigger": {},
        "rules": []
    }))?;
    ensure(pack.trigger == Condition::Never, "empty trigger parses to never")?;
    let result = ReadinessChecker::default().evaluate_capability_pack(&pack, &trip_context()?);
    ensure(!result.triggered, "never fires")?;
    Ok(())
}

#[test]
fn converted_pack_matches_inspection_result() -> TestResult {
    let config = high_altitude_pack()?;
    let ctx = trip_context()?;
    let converted = convert_to_readiness_pack(&config);
    ensure(converted.pack_id == "capability.high_altitude", "pack id")?;
    ensure(converted.destination_id == "capability:high_altitude", "destination id")?;
    ensure(converted.version == "2.1.0", "version from metadata")?;
    ensure(converted.rules.len() == config.rules.len(), "rules carried over")?;

    let checker = ReadinessChecker::default();
    let inspection = checker.evaluate_capability_pack(&config, &ctx);
    let finding = checker.check_destination(&converted, &ctx);
    for rule in &inspection.rules {
        let in_finding = finding.items().any(|item| item.id == rule.id);
        ensure(in_finding == rule.triggered, format!("parity for {}", rule.id))?;
    }
    ensure(finding.bucket(ActionLevel::Must).len() == 1, "acclimatize is must")?;
    ensure(finding.bucket(ActionLevel::Should).len() == 1, "asthma-check is should")?;
    Ok(())
}

#[test]
fn selection_returns_only_triggered_packs() -> TestResult {
    let altitude = high_altitude_pack()?;
    let road: CapabilityPackConfig = serde_json::from_value(json!({
        "type": "seasonal_road",
        "displayName": "Seasonal roads",
        "trigger": {
            "any": [
                { "contextPath": "itinerary.season", "operator": "in", "value": ["monsoon"] }
            ]
        },
        "rules": []
    }))?;
    let ctx = trip_context()?;
    let selected = ReadinessChecker::default().select_capability_packs(&[altitude, road], &ctx);
    ensure(selected.len() == 1, "only altitude triggers")?;
    ensure(selected[0].pack_id == "capability.high_altitude", "altitude selected")?;
    Ok(())
}

#[test]
fn triggers_see_the_derived_schengen_flag() -> TestResult {
    let checkpoint: CapabilityPackConfig = serde_json::from_value(json!({
        "type": "permit_checkpoint",
        "displayName": "Schengen entry",
        "trigger": {
            "all": [
                {
                    "contextPath": "traveler.nationalityRequiresSchengen",
                    "operator": "eq",
                    "value": true
                }
            ]
        },
        "rules": [
            {
                "id": "visa",
                "category": "entry_transit",
                "severity": "high",
                "when": {
                    "contextPath": "traveler.nationalityRequiresSchengen",
                    "operator": "eq",
                    "value": true
                },
                "then": { "level": "blocker", "message": "Apply for a Schengen visa" }
            }
        ]
    }))?;
    let checker = ReadinessChecker::default();
    let outsider = context(json!({ "traveler": { "nationality": "US" } }))?;
    let member = context(json!({ "traveler": { "nationality": "FR" } }))?;

    let inspection = checker.evaluate_capability_pack(&checkpoint, &outsider);
    ensure(inspection.triggered, "non-member nationality triggers")?;
    ensure(inspection.rules.iter().all(|rule| rule.triggered), "rule sees the flag")?;
    ensure(
        checker.select_capability_packs(std::slice::from_ref(&checkpoint), &outsider).len() == 1,
        "selection agrees with inspection",
    )?;
    ensure(
        checker.select_capability_packs(&[checkpoint], &member).is_empty(),
        "member nationality does not trigger",
    )?;
    Ok(())
}

#[test]
fn hazard_only_capability_pack_reaches_the_checker() -> TestResult {
    let emergency: CapabilityPackConfig = serde_json::from_value(json!({
        "type": "emergency",
        "displayName": "Remote emergency",
        "trigger": {
            "all": [
                {
                    "geoPath": "geo.mountains.mountainElevationAvg",
                    "operator": "gte",
                    "value": 3000
                }
            ]
        },
        "rules": [],
        "hazards": [
            { "type": "evacuation_delay", "severity": "high", "summary": "Rescue can take days" }
        ]
    }))?;
    let ctx = trip_context()?;
    for policy in [InvalidPackPolicy::Skip, InvalidPackPolicy::Abort] {
        let checker = ReadinessChecker::new(CheckerConfig {
            on_invalid_pack: policy,
            ..CheckerConfig::default()
        });
        let inspection = checker.evaluate_capability_pack(&emergency, &ctx);
        ensure(inspection.triggered && inspection.hazards.len() == 1, "inspection sees the hazard")?;
        let selected = checker.select_capability_packs(std::slice::from_ref(&emergency), &ctx);
        ensure(selected.len() == 1, "trigger fires")?;
        let result = checker.check_multiple_destinations(&selected, &ctx)?;
        ensure(result.skipped.is_empty(), "not skipped")?;
        let finding = result.finding("capability.emergency").ok_or("emergency finding")?;
        ensure(finding.items().next().is_none(), "empty buckets")?;
        ensure(finding.risks.len() == 1, "hazard merged as a risk")?;
        ensure(result.summary.total_risks == 1, "risk counted")?;
    }
    Ok(())
}

#[test]
fn capability_pack_round_trips_through_json() -> TestResult {
    let config = high_altitude_pack()?;
    let encoded = serde_json::to_value(&config)?;
    ensure(
        encoded["trigger"]["all"][0]["geoPath"] == json!("geo.mountains.mountainElevationAvg"),
        "trigger re-encodes in the capability dialect",
    )?;
    let decoded: CapabilityPackConfig = serde_json::from_value(encoded)?;
    ensure(decoded == config, "decoded pack is equal")?;
    Ok(())
}
