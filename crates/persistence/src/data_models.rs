// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types bridging Diesel and the domain model.
//!
//! Dates are stored as ISO `YYYY-MM-DD` text and booleans as integers, so
//! every load goes through a rehydration step that can fail with
//! `CorruptRecord` if a row was tampered with outside the application.

use crate::diesel_schema::{evaluation_periods, grade_ranges};
use crate::error::PersistenceError;
use diesel::prelude::*;
use reviewd::EvaluationPeriod;
use reviewd_domain::{
    EvaluationPhase, GradeRange, PeriodStatus, Schedule, format_schedule_date,
    parse_schedule_date,
};
use time::Date;

/// A full evaluation-period row as stored.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = evaluation_periods)]
pub struct PeriodRow {
    pub period_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub current_phase: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub evaluation_setup_deadline: Option<String>,
    pub performance_deadline: Option<String>,
    pub self_evaluation_deadline: Option<String>,
    pub peer_evaluation_deadline: String,
    pub max_self_evaluation_rate: i32,
    pub criteria_setting_enabled: i32,
    pub self_evaluation_setting_enabled: i32,
    pub final_evaluation_setting_enabled: i32,
    pub created_by: String,
    pub created_at: String,
    pub updated_by: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

/// Insert payload for an evaluation-period row.
#[derive(Debug, Insertable)]
#[diesel(table_name = evaluation_periods)]
pub struct NewPeriod {
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub current_phase: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub evaluation_setup_deadline: Option<String>,
    pub performance_deadline: Option<String>,
    pub self_evaluation_deadline: Option<String>,
    pub peer_evaluation_deadline: String,
    pub max_self_evaluation_rate: i32,
    pub criteria_setting_enabled: i32,
    pub self_evaluation_setting_enabled: i32,
    pub final_evaluation_setting_enabled: i32,
    pub created_by: String,
    pub created_at: String,
    pub updated_by: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

/// A grade-range row as stored.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = grade_ranges)]
pub struct GradeRangeRow {
    pub grade_range_id: i64,
    pub period_id: i64,
    pub position: i32,
    pub grade: String,
    pub min_range: i32,
    pub max_range: i32,
}

/// Insert payload for a grade-range row.
#[derive(Debug, Insertable)]
#[diesel(table_name = grade_ranges)]
pub struct NewGradeRange {
    pub period_id: i64,
    pub position: i32,
    pub grade: String,
    pub min_range: i32,
    pub max_range: i32,
}

fn parse_date(value: &str) -> Result<Date, PersistenceError> {
    Ok(parse_schedule_date(value)?)
}

fn parse_optional_date(value: Option<&str>) -> Result<Option<Date>, PersistenceError> {
    value.map(parse_date).transpose()
}

fn format_date(date: Date) -> Result<String, PersistenceError> {
    Ok(format_schedule_date(date)?)
}

fn format_optional_date(date: Option<Date>) -> Result<Option<String>, PersistenceError> {
    date.map(format_date).transpose()
}

const fn bool_to_int(value: bool) -> i32 {
    if value { 1 } else { 0 }
}

impl PeriodRow {
    /// Rehydrates a stored row plus its grade ranges into the aggregate.
    ///
    /// # Errors
    ///
    /// Returns `CorruptRecord` if any stored field fails to parse.
    pub fn into_period(
        self,
        grade_ranges: Vec<GradeRange>,
    ) -> Result<EvaluationPeriod, PersistenceError> {
        let status: PeriodStatus = self.status.parse()?;
        let current_phase: EvaluationPhase = self.current_phase.parse()?;

        let schedule = Schedule {
            start_date: parse_date(&self.start_date)?,
            end_date: parse_optional_date(self.end_date.as_deref())?,
            evaluation_setup_deadline: parse_optional_date(
                self.evaluation_setup_deadline.as_deref(),
            )?,
            performance_deadline: parse_optional_date(self.performance_deadline.as_deref())?,
            self_evaluation_deadline: parse_optional_date(
                self.self_evaluation_deadline.as_deref(),
            )?,
            peer_evaluation_deadline: parse_date(&self.peer_evaluation_deadline)?,
        };

        let max_self_evaluation_rate =
            u16::try_from(self.max_self_evaluation_rate).map_err(|_| {
                PersistenceError::CorruptRecord(format!(
                    "max_self_evaluation_rate out of range: {}",
                    self.max_self_evaluation_rate
                ))
            })?;

        Ok(EvaluationPeriod {
            period_id: self.period_id,
            name: self.name,
            description: self.description,
            status,
            current_phase,
            schedule,
            max_self_evaluation_rate,
            criteria_setting_enabled: self.criteria_setting_enabled != 0,
            self_evaluation_setting_enabled: self.self_evaluation_setting_enabled != 0,
            final_evaluation_setting_enabled: self.final_evaluation_setting_enabled != 0,
            grade_ranges,
            created_by: self.created_by,
            created_at: self.created_at,
            updated_by: self.updated_by,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        })
    }
}

impl NewPeriod {
    /// Builds an insert payload from the aggregate.
    ///
    /// # Errors
    ///
    /// Returns an error if a schedule date cannot be formatted.
    pub fn from_period(period: &EvaluationPeriod) -> Result<Self, PersistenceError> {
        Ok(Self {
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
            self_evaluation_deadline: format_optional_date(
                period.schedule.self_evaluation_deadline,
            )?,
            peer_evaluation_deadline: format_date(period.schedule.peer_evaluation_deadline)?,
            max_self_evaluation_rate: i32::from(period.max_self_evaluation_rate),
            criteria_setting_enabled: bool_to_int(period.criteria_setting_enabled),
            self_evaluation_setting_enabled: bool_to_int(period.self_evaluation_setting_enabled),
            final_evaluation_setting_enabled: bool_to_int(period.final_evaluation_setting_enabled),
            created_by: period.created_by.clone(),
            created_at: period.created_at.clone(),
            updated_by: period.updated_by.clone(),
            updated_at: period.updated_at.clone(),
            deleted_at: period.deleted_at.clone(),
        })
    }
}

impl GradeRangeRow {
    /// Rehydrates a stored grade-range row.
    ///
    /// # Errors
    ///
    /// Returns `CorruptRecord` if the score bounds are out of range.
    pub fn into_grade_range(self) -> Result<GradeRange, PersistenceError> {
        let min_range = u8::try_from(self.min_range).map_err(|_| {
            PersistenceError::CorruptRecord(format!("min_range out of range: {}", self.min_range))
        })?;
        let max_range = u8::try_from(self.max_range).map_err(|_| {
            PersistenceError::CorruptRecord(format!("max_range out of range: {}", self.max_range))
        })?;

        Ok(GradeRange {
            grade: self.grade,
            min_range,
            max_range,
        })
    }
}

impl NewGradeRange {
    /// Builds an insert payload for one band, keyed by list position.
    #[must_use]
    pub fn from_grade_range(period_id: i64, position: i32, range: &GradeRange) -> Self {
        Self {
            period_id,
            position,
            grade: range.grade.clone(),
            min_range: i32::from(range.min_range),
            max_range: i32::from(range.max_range),
        }
    }
}
