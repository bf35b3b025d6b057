// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Evaluation-period query operations.
//!
//! Soft-deleted rows are filtered out here, at the query layer, so callers
//! never see them.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{GradeRangeRow, PeriodRow};
use crate::diesel_schema::{evaluation_periods, grade_ranges};
use crate::error::PersistenceError;
use reviewd_domain::{GradeRange, PeriodStatus};

/// Looks up one non-deleted period row by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_period_row(
    conn: &mut SqliteConnection,
    period_id: i64,
) -> Result<Option<PeriodRow>, PersistenceError> {
    evaluation_periods::table
        .filter(evaluation_periods::period_id.eq(period_id))
        .filter(evaluation_periods::deleted_at.is_null())
        .select(PeriodRow::as_select())
        .first::<PeriodRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("find_period_row: {e}")))
}

/// Loads all non-deleted period rows, ordered by start date.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_period_rows(conn: &mut SqliteConnection) -> Result<Vec<PeriodRow>, PersistenceError> {
    evaluation_periods::table
        .filter(evaluation_periods::deleted_at.is_null())
        .order(evaluation_periods::start_date.asc())
        .select(PeriodRow::as_select())
        .load::<PeriodRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_period_rows: {e}")))
}

/// Loads one page of non-deleted period rows, ordered by start date.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_period_rows_paged(
    conn: &mut SqliteConnection,
    offset: i64,
    limit: i64,
) -> Result<Vec<PeriodRow>, PersistenceError> {
    evaluation_periods::table
        .filter(evaluation_periods::deleted_at.is_null())
        .order(evaluation_periods::start_date.asc())
        .offset(offset)
        .limit(limit)
        .select(PeriodRow::as_select())
        .load::<PeriodRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_period_rows_paged: {e}")))
}

/// Counts the non-deleted period rows, for paged listings.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_period_rows(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    evaluation_periods::table
        .filter(evaluation_periods::deleted_at.is_null())
        .count()
        .get_result::<i64>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("count_period_rows: {e}")))
}

/// Loads every non-deleted period row whose stored status is `in_progress`,
/// ordered by start date. Overlap validation keeps concurrent periods
/// disjoint, but a stale row past its deadlines can coexist with a freshly
/// started one, so this is a list rather than a single row.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_active_rows(
    conn: &mut SqliteConnection,
) -> Result<Vec<PeriodRow>, PersistenceError> {
    evaluation_periods::table
        .filter(evaluation_periods::deleted_at.is_null())
        .filter(evaluation_periods::status.eq(PeriodStatus::InProgress.as_str()))
        .order(evaluation_periods::start_date.asc())
        .select(PeriodRow::as_select())
        .load::<PeriodRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_active_rows: {e}")))
}

/// Loads the grade ranges for one period, in stored order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be rehydrated.
pub fn load_grade_ranges(
    conn: &mut SqliteConnection,
    period_id: i64,
) -> Result<Vec<GradeRange>, PersistenceError> {
    let rows = grade_ranges::table
        .filter(grade_ranges::period_id.eq(period_id))
        .order(grade_ranges::position.asc())
        .select(GradeRangeRow::as_select())
        .load::<GradeRangeRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("load_grade_ranges: {e}")))?;

    rows.into_iter().map(GradeRangeRow::into_grade_range).collect()
}
