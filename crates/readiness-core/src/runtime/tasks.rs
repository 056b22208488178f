// crates/readiness-core/src/runtime/tasks.rs
// ============================================================================
// Module: Task Extraction
// Description: Flattens fired-rule tasks into a due-offset ordered to-do list.
// Purpose: Feed trip to-do lists from readiness results.
// Dependencies: crate::core, serde
// ============================================================================

//! ## Overview
//! Every fired rule may carry preparation tasks. Extraction flattens them
//! across all findings and orders them by due offset (earliest first, undated
//! last), breaking ties by destination, rule, and title so the list is stable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::core::ActionLevel;
use crate::core::ReadinessCheckResult;

// ============================================================================
// SECTION: Types
// ============================================================================

/// One to-do entry derived from a fired rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessTask {
    /// Destination of the finding.
    pub destination_id: String,
    /// Rule that produced the task.
    pub rule_id: String,
    /// Level of the rule.
    pub level: ActionLevel,
    /// Task title.
    pub title: String,
    /// Days relative to departure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_offset_days: Option<i32>,
    /// Task tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

// ============================================================================
// SECTION: Extraction
// ============================================================================

/// Flattens every fired rule's tasks in `result` into a sorted list.
#[must_use]
pub fn extract_tasks(result: &ReadinessCheckResult) -> Vec<ReadinessTask> {
    let mut tasks: Vec<ReadinessTask> = result
        .findings
        .iter()
        .flat_map(|finding| {
            finding.items().flat_map(move |item| {
                item.tasks.iter().map(move |task| ReadinessTask {
                    destination_id: finding.destination_id.clone(),
                    rule_id: item.id.clone(),
                    level: item.level,
                    title: task.title.clone(),
                    due_offset_days: task.due_offset_days,
                    tags: task.tags.clone(),
                })
            })
        })
        .collect();
    tasks.sort_by(|left, right| {
        due_order(left.due_offset_days, right.due_offset_days)
            .then_with(|| left.destination_id.cmp(&right.destination_id))
            .then_with(|| left.rule_id.cmp(&right.rule_id))
            .then_with(|| left.title.cmp(&right.title))
    });
    tasks
}

/// Orders dated tasks first, earliest offset first.
fn due_order(left: Option<i32>, right: Option<i32>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
