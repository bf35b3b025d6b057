// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates cross this boundary as strings. Requests accept `YYYY-MM-DD` or an
//! RFC 3339 timestamp (normalized to its UTC day); responses always emit
//! `YYYY-MM-DD`.

use serde::{Deserialize, Serialize};

/// One grade band as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeRangeDto {
    /// The grade label (e.g., "A", "B+").
    pub grade: String,
    /// The minimum score covered by this band.
    pub min_range: u8,
    /// The maximum score covered by this band.
    pub max_range: u8,
}

/// API request to create a new evaluation period.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePeriodRequest {
    /// Unique period name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// The day the period begins.
    pub start_date: String,
    /// Optional explicit end of the period.
    pub end_date: Option<String>,
    /// Deadline for the evaluation-setup phase.
    pub evaluation_setup_deadline: Option<String>,
    /// Deadline for the performance phase.
    pub performance_deadline: Option<String>,
    /// Deadline for the self-evaluation phase.
    pub self_evaluation_deadline: Option<String>,
    /// Deadline for the peer-evaluation phase.
    pub peer_evaluation_deadline: String,
    /// Percentage cap for self-evaluation scores. Defaults to 120.
    pub max_self_evaluation_rate: Option<u16>,
    /// The grade bands for this period.
    pub grade_ranges: Vec<GradeRangeDto>,
}

/// API request to edit a period's basic info. Absent fields are untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct UpdateBasicInfoRequest {
    /// New period name, if being edited.
    pub name: Option<String>,
    /// New description, if being edited.
    pub description: Option<String>,
    /// New max self-evaluation rate, if being edited.
    pub max_self_evaluation_rate: Option<u16>,
}

/// API request to edit a period's schedule. Absent fields are untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct UpdateScheduleRequest {
    /// New start date, if being edited.
    pub start_date: Option<String>,
    /// New end date, if being edited.
    pub end_date: Option<String>,
    /// New evaluation-setup deadline, if being edited.
    pub evaluation_setup_deadline: Option<String>,
    /// New performance deadline, if being edited.
    pub performance_deadline: Option<String>,
    /// New self-evaluation deadline, if being edited.
    pub self_evaluation_deadline: Option<String>,
    /// New peer-evaluation deadline, if being edited.
    pub peer_evaluation_deadline: Option<String>,
}

/// API request carrying a single schedule date, for the per-field endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateDateRequest {
    /// The new date value.
    pub date: String,
}

/// API request to replace a period's grade ranges wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReplaceGradeRangesRequest {
    /// The full new list of bands.
    pub grade_ranges: Vec<GradeRangeDto>,
}

/// API request to flip one permission flag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdatePermissionRequest {
    /// Which flag to set: `criteria_setting`, `self_evaluation_setting`,
    /// or `final_evaluation_setting`.
    pub flag: String,
    /// The new value.
    pub enabled: bool,
}

/// Full period representation returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodResponse {
    /// The period's identifier.
    pub period_id: i64,
    /// The period name.
    pub name: String,
    /// The description, if set.
    pub description: Option<String>,
    /// The stored lifecycle status.
    pub status: String,
    /// The stored phase.
    pub current_phase: String,
    /// The start date.
    pub start_date: String,
    /// The explicit end date, if set.
    pub end_date: Option<String>,
    /// The evaluation-setup deadline, if set.
    pub evaluation_setup_deadline: Option<String>,
    /// The performance deadline, if set.
    pub performance_deadline: Option<String>,
    /// The self-evaluation deadline, if set.
    pub self_evaluation_deadline: Option<String>,
    /// The peer-evaluation deadline.
    pub peer_evaluation_deadline: String,
    /// The self-evaluation percentage cap.
    pub max_self_evaluation_rate: u16,
    /// Whether criteria setting is open.
    pub criteria_setting_enabled: bool,
    /// Whether self-evaluation entry is open.
    pub self_evaluation_setting_enabled: bool,
    /// Whether final evaluation entry is open.
    pub final_evaluation_setting_enabled: bool,
    /// The grade bands, in stored order.
    pub grade_ranges: Vec<GradeRangeDto>,
    /// Who created the period.
    pub created_by: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// Who last modified the period.
    pub updated_by: String,
    /// RFC 3339 timestamp of the last modification.
    pub updated_at: String,
}

/// Response for the paged list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPeriodsResponse {
    /// One page of non-deleted periods, ordered by start date.
    pub periods: Vec<PeriodResponse>,
    /// The page that was returned (1-based).
    pub page: u32,
    /// The page size that was applied.
    pub limit: u32,
    /// Total count of non-deleted periods across all pages.
    pub total: i64,
}

/// Response for the active-periods endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePeriodsResponse {
    /// Every period whose stored status is `in_progress`.
    pub periods: Vec<PeriodResponse>,
}

/// Response for a successful soft delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletePeriodResponse {
    /// The deleted period's identifier.
    pub period_id: i64,
    /// A success message.
    pub message: String,
}
