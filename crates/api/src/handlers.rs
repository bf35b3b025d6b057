// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for evaluation-period operations.
//!
//! Handlers own the wire conversion and the clock: they parse request
//! strings into domain values, read the current UTC day once, and hand
//! everything to the core aggregate. Mutations follow a common shape of
//! load, mutate, write back.

use std::str::FromStr;
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};
use tracing::info;

use reviewd::{BasicInfoPatch, EvaluationPeriod, SiblingPeriod};
use reviewd_domain::{
    DEFAULT_SELF_EVALUATION_RATE, GradeRange, PermissionFlag, Schedule, SchedulePatch,
    format_schedule_date, parse_schedule_date,
};
use reviewd_persistence::Persistence;

use crate::error::ApiError;
use crate::request_response::{
    ActivePeriodsResponse, CreatePeriodRequest, DeletePeriodResponse, GradeRangeDto,
    ListPeriodsResponse, PeriodResponse, ReplaceGradeRangesRequest, UpdateBasicInfoRequest,
    UpdateDateRequest, UpdatePermissionRequest, UpdateScheduleRequest,
};

/// Upper bound for the page size of the list endpoint.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size applied when the list request does not name one.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// The current UTC day, used for status/phase derivation on writes.
fn current_day() -> Date {
    OffsetDateTime::now_utc().date()
}

/// The current RFC 3339 timestamp, used for audit columns.
fn current_timestamp() -> Result<String, ApiError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to format timestamp: {e}"),
        })
}

fn parse_date_field(value: &str, field: &str) -> Result<Date, ApiError> {
    parse_schedule_date(value).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: e.to_string(),
    })
}

fn parse_optional_date_field(value: Option<&str>, field: &str) -> Result<Option<Date>, ApiError> {
    value.map(|v| parse_date_field(v, field)).transpose()
}

fn format_date(date: Date) -> Result<String, ApiError> {
    format_schedule_date(date).map_err(crate::error::translate_domain_error)
}

fn format_optional_date(date: Option<Date>) -> Result<Option<String>, ApiError> {
    date.map(format_date).transpose()
}

fn grade_ranges_from_dtos(dtos: &[GradeRangeDto]) -> Vec<GradeRange> {
    dtos.iter()
        .map(|dto| GradeRange {
            grade: dto.grade.clone(),
            min_range: dto.min_range,
            max_range: dto.max_range,
        })
        .collect()
}

/// Converts a period aggregate into its wire representation.
///
/// # Errors
///
/// Returns an error if a schedule date cannot be formatted.
pub fn period_to_response(period: &EvaluationPeriod) -> Result<PeriodResponse, ApiError> {
    Ok(PeriodResponse {
        period_id: period.period_id,
        name: period.name.clone(),
        description: period.description.clone(),
        status: period.status.to_string(),
        current_phase: period.current_phase.to_string(),
        start_date: format_date(period.schedule.start_date)?,
        end_date: format_optional_date(period.schedule.end_date)?,
        evaluation_setup_deadline: format_optional_date(
            period.schedule.evaluation_setup_deadline,
        )?,
        performance_deadline: format_optional_date(period.schedule.performance_deadline)?,
        self_evaluation_deadline: format_optional_date(period.schedule.self_evaluation_deadline)?,
        peer_evaluation_deadline: format_date(period.schedule.peer_evaluation_deadline)?,
        max_self_evaluation_rate: period.max_self_evaluation_rate,
        criteria_setting_enabled: period.criteria_setting_enabled,
        self_evaluation_setting_enabled: period.self_evaluation_setting_enabled,
        final_evaluation_setting_enabled: period.final_evaluation_setting_enabled,
        grade_ranges: period
            .grade_ranges
            .iter()
            .map(|range| GradeRangeDto {
                grade: range.grade.clone(),
                min_range: range.min_range,
                max_range: range.max_range,
            })
            .collect(),
        created_by: period.created_by.clone(),
        created_at: period.created_at.clone(),
        updated_by: period.updated_by.clone(),
        updated_at: period.updated_at.clone(),
    })
}

fn siblings(persistence: &mut Persistence) -> Result<Vec<SiblingPeriod>, ApiError> {
    Ok(persistence.list_siblings()?)
}

/// Loads a period, applies a mutation, writes it back, and returns the new
/// representation.
fn mutate_period<F>(
    persistence: &mut Persistence,
    period_id: i64,
    mutation: F,
) -> Result<PeriodResponse, ApiError>
where
    F: FnOnce(&mut EvaluationPeriod, &mut Persistence) -> Result<(), ApiError>,
{
    let mut period = persistence.get_period(period_id)?;
    mutation(&mut period, persistence)?;
    persistence.update_period(&period)?;
    period_to_response(&period)
}

// ============================================================================
// Mutations
// ============================================================================

/// Creates a new evaluation period.
///
/// # Errors
///
/// Returns an error if validation fails or persistence fails.
pub fn create_period(
    persistence: &mut Persistence,
    request: &CreatePeriodRequest,
    actor: &str,
) -> Result<PeriodResponse, ApiError> {
    let schedule = Schedule {
        start_date: parse_date_field(&request.start_date, "start_date")?,
        end_date: parse_optional_date_field(request.end_date.as_deref(), "end_date")?,
        evaluation_setup_deadline: parse_optional_date_field(
            request.evaluation_setup_deadline.as_deref(),
            "evaluation_setup_deadline",
        )?,
        performance_deadline: parse_optional_date_field(
            request.performance_deadline.as_deref(),
            "performance_deadline",
        )?,
        self_evaluation_deadline: parse_optional_date_field(
            request.self_evaluation_deadline.as_deref(),
            "self_evaluation_deadline",
        )?,
        peer_evaluation_deadline: parse_date_field(
            &request.peer_evaluation_deadline,
            "peer_evaluation_deadline",
        )?,
    };

    let rate = request
        .max_self_evaluation_rate
        .unwrap_or(DEFAULT_SELF_EVALUATION_RATE);
    let existing = siblings(persistence)?;
    let timestamp = current_timestamp()?;

    let mut period = EvaluationPeriod::create(
        request.name.clone(),
        request.description.clone(),
        schedule,
        rate,
        grade_ranges_from_dtos(&request.grade_ranges),
        &existing,
        current_day(),
        actor,
        &timestamp,
    )?;

    period.period_id = persistence.create_period(&period)?;
    info!(period_id = period.period_id, name = %period.name, "Created evaluation period");

    period_to_response(&period)
}

/// Edits a period's basic info (name, description, rate).
///
/// # Errors
///
/// Returns an error if the period is missing, validation fails, or
/// persistence fails.
pub fn update_basic_info(
    persistence: &mut Persistence,
    period_id: i64,
    request: &UpdateBasicInfoRequest,
    actor: &str,
) -> Result<PeriodResponse, ApiError> {
    let patch = BasicInfoPatch {
        name: request.name.clone(),
        description: request.description.clone(),
        max_self_evaluation_rate: request.max_self_evaluation_rate,
    };
    let timestamp = current_timestamp()?;

    mutate_period(persistence, period_id, |period, persistence| {
        let existing = siblings(persistence)?;
        period.apply_basic_info(&patch, &existing, actor, &timestamp)?;
        Ok(())
    })
}

/// Edits any subset of a period's schedule and re-derives its status and
/// phase.
///
/// # Errors
///
/// Returns an error if the period is missing, validation fails, or
/// persistence fails.
pub fn update_schedule(
    persistence: &mut Persistence,
    period_id: i64,
    request: &UpdateScheduleRequest,
    actor: &str,
) -> Result<PeriodResponse, ApiError> {
    let patch = SchedulePatch {
        start_date: parse_optional_date_field(request.start_date.as_deref(), "start_date")?,
        end_date: parse_optional_date_field(request.end_date.as_deref(), "end_date")?,
        evaluation_setup_deadline: parse_optional_date_field(
            request.evaluation_setup_deadline.as_deref(),
            "evaluation_setup_deadline",
        )?,
        performance_deadline: parse_optional_date_field(
            request.performance_deadline.as_deref(),
            "performance_deadline",
        )?,
        self_evaluation_deadline: parse_optional_date_field(
            request.self_evaluation_deadline.as_deref(),
            "self_evaluation_deadline",
        )?,
        peer_evaluation_deadline: parse_optional_date_field(
            request.peer_evaluation_deadline.as_deref(),
            "peer_evaluation_deadline",
        )?,
    };

    apply_schedule_patch(persistence, period_id, patch, actor)
}

/// Updates only the start date.
///
/// # Errors
///
/// Returns an error if the period is missing, validation fails, or
/// persistence fails.
pub fn update_start_date(
    persistence: &mut Persistence,
    period_id: i64,
    request: &UpdateDateRequest,
    actor: &str,
) -> Result<PeriodResponse, ApiError> {
    let date = parse_date_field(&request.date, "start_date")?;
    apply_schedule_patch(persistence, period_id, SchedulePatch::start_date(date), actor)
}

/// Updates only the evaluation-setup deadline.
///
/// # Errors
///
/// Returns an error if the period is missing, validation fails, or
/// persistence fails.
pub fn update_evaluation_setup_deadline(
    persistence: &mut Persistence,
    period_id: i64,
    request: &UpdateDateRequest,
    actor: &str,
) -> Result<PeriodResponse, ApiError> {
    let date = parse_date_field(&request.date, "evaluation_setup_deadline")?;
    apply_schedule_patch(
        persistence,
        period_id,
        SchedulePatch::evaluation_setup_deadline(date),
        actor,
    )
}

/// Updates only the performance deadline.
///
/// # Errors
///
/// Returns an error if the period is missing, validation fails, or
/// persistence fails.
pub fn update_performance_deadline(
    persistence: &mut Persistence,
    period_id: i64,
    request: &UpdateDateRequest,
    actor: &str,
) -> Result<PeriodResponse, ApiError> {
    let date = parse_date_field(&request.date, "performance_deadline")?;
    apply_schedule_patch(
        persistence,
        period_id,
        SchedulePatch::performance_deadline(date),
        actor,
    )
}

/// Updates only the self-evaluation deadline.
///
/// # Errors
///
/// Returns an error if the period is missing, validation fails, or
/// persistence fails.
pub fn update_self_evaluation_deadline(
    persistence: &mut Persistence,
    period_id: i64,
    request: &UpdateDateRequest,
    actor: &str,
) -> Result<PeriodResponse, ApiError> {
    let date = parse_date_field(&request.date, "self_evaluation_deadline")?;
    apply_schedule_patch(
        persistence,
        period_id,
        SchedulePatch::self_evaluation_deadline(date),
        actor,
    )
}

/// Updates only the peer-evaluation deadline.
///
/// # Errors
///
/// Returns an error if the period is missing, validation fails, or
/// persistence fails.
pub fn update_peer_evaluation_deadline(
    persistence: &mut Persistence,
    period_id: i64,
    request: &UpdateDateRequest,
    actor: &str,
) -> Result<PeriodResponse, ApiError> {
    let date = parse_date_field(&request.date, "peer_evaluation_deadline")?;
    apply_schedule_patch(
        persistence,
        period_id,
        SchedulePatch::peer_evaluation_deadline(date),
        actor,
    )
}

fn apply_schedule_patch(
    persistence: &mut Persistence,
    period_id: i64,
    patch: SchedulePatch,
    actor: &str,
) -> Result<PeriodResponse, ApiError> {
    let timestamp = current_timestamp()?;
    let now = current_day();

    mutate_period(persistence, period_id, |period, persistence| {
        let existing = siblings(persistence)?;
        period.apply_schedule_patch(&patch, &existing, now, actor, &timestamp)?;
        Ok(())
    })
}

/// Starts a waiting period explicitly.
///
/// # Errors
///
/// Returns an error if the period is missing or not `waiting`.
pub fn start_period(
    persistence: &mut Persistence,
    period_id: i64,
    actor: &str,
) -> Result<PeriodResponse, ApiError> {
    let timestamp = current_timestamp()?;
    mutate_period(persistence, period_id, |period, _| {
        period.start(actor, &timestamp)?;
        info!(period_id, "Started evaluation period");
        Ok(())
    })
}

/// Completes an in-progress period. The period becomes immutable.
///
/// # Errors
///
/// Returns an error if the period is missing or not `in_progress`.
pub fn complete_period(
    persistence: &mut Persistence,
    period_id: i64,
    actor: &str,
) -> Result<PeriodResponse, ApiError> {
    let timestamp = current_timestamp()?;
    mutate_period(persistence, period_id, |period, _| {
        period.complete(actor, &timestamp)?;
        info!(period_id, "Completed evaluation period");
        Ok(())
    })
}

/// Advances the phase one step manually, ahead of its deadline.
///
/// # Errors
///
/// Returns an error if the period is missing, not in progress, or already
/// in closure.
pub fn change_phase(
    persistence: &mut Persistence,
    period_id: i64,
    actor: &str,
) -> Result<PeriodResponse, ApiError> {
    let timestamp = current_timestamp()?;
    mutate_period(persistence, period_id, |period, _| {
        period.advance_phase(actor, &timestamp)?;
        Ok(())
    })
}

/// Replaces a period's grade ranges wholesale.
///
/// # Errors
///
/// Returns an error if the period is missing, validation fails, or
/// persistence fails.
pub fn replace_grade_ranges(
    persistence: &mut Persistence,
    period_id: i64,
    request: &ReplaceGradeRangesRequest,
    actor: &str,
) -> Result<PeriodResponse, ApiError> {
    let ranges = grade_ranges_from_dtos(&request.grade_ranges);
    let timestamp = current_timestamp()?;
    mutate_period(persistence, period_id, |period, _| {
        period.replace_grade_ranges(ranges, actor, &timestamp)?;
        Ok(())
    })
}

/// Flips one permission flag on a period.
///
/// # Errors
///
/// Returns an error if the flag name is unknown, the period is missing, or
/// the period is completed.
pub fn update_permission(
    persistence: &mut Persistence,
    period_id: i64,
    request: &UpdatePermissionRequest,
    actor: &str,
) -> Result<PeriodResponse, ApiError> {
    let flag = PermissionFlag::from_str(&request.flag)?;
    let timestamp = current_timestamp()?;
    mutate_period(persistence, period_id, |period, _| {
        period.set_permission(flag, request.enabled, actor, &timestamp)?;
        Ok(())
    })
}

/// Soft-deletes a period. In-progress periods must be completed first.
///
/// # Errors
///
/// Returns an error if the period is missing or in progress.
pub fn delete_period(
    persistence: &mut Persistence,
    period_id: i64,
    actor: &str,
) -> Result<DeletePeriodResponse, ApiError> {
    let timestamp = current_timestamp()?;
    let mut period = persistence.get_period(period_id)?;
    period.soft_delete(actor, &timestamp)?;
    persistence.update_period(&period)?;

    info!(period_id, "Soft-deleted evaluation period");
    Ok(DeletePeriodResponse {
        period_id,
        message: format!("Evaluation period '{}' deleted", period.name),
    })
}

// ============================================================================
// Queries
// ============================================================================

/// Fetches one non-deleted period by ID.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the period does not exist or is deleted.
pub fn get_period(
    persistence: &mut Persistence,
    period_id: i64,
) -> Result<PeriodResponse, ApiError> {
    let period = persistence.get_period(period_id)?;
    period_to_response(&period)
}

/// Lists one page of non-deleted periods, ordered by start date.
///
/// Page numbers are 1-based; out-of-range values are clamped rather than
/// rejected.
///
/// # Errors
///
/// Returns an error if persistence fails.
pub fn list_periods(
    persistence: &mut Persistence,
    page: u32,
    limit: u32,
) -> Result<ListPeriodsResponse, ApiError> {
    let page = page.max(1);
    let limit = limit.clamp(1, MAX_PAGE_SIZE);
    let offset = i64::from(page - 1) * i64::from(limit);

    let (periods, total) = persistence.list_periods_paged(offset, i64::from(limit))?;
    let periods = periods
        .iter()
        .map(period_to_response)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ListPeriodsResponse {
        periods,
        page,
        limit,
        total,
    })
}

/// Lists every period whose stored status is `in_progress`.
///
/// # Errors
///
/// Returns an error if persistence fails.
pub fn get_active_periods(
    persistence: &mut Persistence,
) -> Result<ActivePeriodsResponse, ApiError> {
    let periods = persistence.list_active_periods()?;
    let periods = periods
        .iter()
        .map(period_to_response)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ActivePeriodsResponse { periods })
}
