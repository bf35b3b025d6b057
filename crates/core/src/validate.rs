// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The validation service for evaluation-period mutations.
//!
//! Every check here runs against the candidate state (current entity with
//! the pending edit merged in), never against the raw patch alone. Sibling
//! checks receive lightweight summaries of every other non-deleted period
//! so the core stays free of persistence concerns.

use crate::error::CoreError;
use reviewd_domain::{
    DomainError, GradeRange, PeriodStatus, Schedule, SchedulePatch, validate_grade_ranges,
    validate_period_name, validate_schedule, validate_self_evaluation_rate,
};
use time::Date;

/// A lightweight view of another non-deleted period, used for the
/// name-uniqueness and date-overlap checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiblingPeriod {
    /// The sibling's identifier, used to exclude the period being edited.
    pub period_id: i64,
    /// The sibling's name.
    pub name: String,
    /// The sibling's start date.
    pub start_date: Date,
    /// The sibling's effective end date.
    pub end_date: Date,
}

/// Rejects any mutation of a period whose status is terminal.
///
/// # Errors
///
/// Returns `InvalidStatusTransition` if the period is `Completed`.
pub fn ensure_mutable(status: PeriodStatus) -> Result<(), CoreError> {
    if status.is_terminal() {
        return Err(DomainError::InvalidStatusTransition {
            from: status.to_string(),
            to: status.to_string(),
            reason: String::from("a completed period cannot be modified"),
        }
        .into());
    }
    Ok(())
}

/// Validates a full create request. Checks run in a fixed order: name shape,
/// schedule ordering, rate bounds, grade ranges, then sibling uniqueness and
/// overlap. The first violation is returned.
///
/// # Errors
///
/// Returns the first violated rule as a `CoreError`.
pub fn validate_create(
    name: &str,
    schedule: &Schedule,
    max_self_evaluation_rate: u16,
    grade_ranges: &[GradeRange],
    siblings: &[SiblingPeriod],
) -> Result<(), CoreError> {
    validate_period_name(name)?;
    validate_schedule(schedule)?;
    validate_self_evaluation_rate(max_self_evaluation_rate)?;
    validate_grade_ranges(grade_ranges)?;
    validate_name_unique(name, None, siblings)?;
    validate_no_overlap(schedule, None, siblings)?;
    Ok(())
}

/// Validates a basic-info edit against the candidate values.
///
/// `period_id` excludes the period itself from the uniqueness check. The
/// schedule is unchanged by this operation, so no overlap check runs.
///
/// # Errors
///
/// Returns the first violated rule as a `CoreError`.
pub fn validate_basic_info(
    period_id: i64,
    name: &str,
    max_self_evaluation_rate: u16,
    siblings: &[SiblingPeriod],
) -> Result<(), CoreError> {
    validate_period_name(name)?;
    validate_self_evaluation_rate(max_self_evaluation_rate)?;
    validate_name_unique(name, Some(period_id), siblings)?;
    Ok(())
}

/// Merges a schedule patch onto the current schedule and validates the
/// result: full chain ordering, end-date sanity, and overlap against
/// siblings. Returns the merged schedule on success so the caller applies
/// exactly what was validated.
///
/// # Errors
///
/// Returns the first violated rule as a `CoreError`.
pub fn validate_schedule_patch(
    period_id: i64,
    current: &Schedule,
    patch: &SchedulePatch,
    siblings: &[SiblingPeriod],
) -> Result<Schedule, CoreError> {
    let merged = current.merged(patch);
    validate_schedule(&merged)?;
    validate_no_overlap(&merged, Some(period_id), siblings)?;
    Ok(merged)
}

/// Validates a full grade-range replacement.
///
/// # Errors
///
/// Returns the first violated rule as a `CoreError`.
pub fn validate_grade_range_replacement(ranges: &[GradeRange]) -> Result<(), CoreError> {
    validate_grade_ranges(ranges)?;
    Ok(())
}

/// Validates a soft delete. Running periods must be completed first;
/// `Waiting` and `Completed` periods may be deleted.
///
/// # Errors
///
/// Returns `InvalidStatusTransition` if the period is `InProgress`.
pub fn validate_delete(status: PeriodStatus) -> Result<(), CoreError> {
    if status == PeriodStatus::InProgress {
        return Err(DomainError::InvalidStatusTransition {
            from: status.to_string(),
            to: String::from("deleted"),
            reason: String::from("an in-progress period cannot be deleted"),
        }
        .into());
    }
    Ok(())
}

fn validate_name_unique(
    name: &str,
    exclude_period_id: Option<i64>,
    siblings: &[SiblingPeriod],
) -> Result<(), CoreError> {
    for sibling in siblings {
        if Some(sibling.period_id) == exclude_period_id {
            continue;
        }
        if sibling.name == name {
            return Err(DomainError::DuplicatePeriodName {
                name: name.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

fn validate_no_overlap(
    schedule: &Schedule,
    exclude_period_id: Option<i64>,
    siblings: &[SiblingPeriod],
) -> Result<(), CoreError> {
    let start = schedule.start_date;
    let end = schedule.effective_end_date();

    for sibling in siblings {
        if Some(sibling.period_id) == exclude_period_id {
            continue;
        }
        // Ranges are inclusive on both ends; touching ranges collide.
        if start <= sibling.end_date && sibling.start_date <= end {
            return Err(DomainError::OverlappingPeriod {
                name: sibling.name.clone(),
                start_date: sibling.start_date,
                end_date: sibling.end_date,
            }
            .into());
        }
    }
    Ok(())
}
