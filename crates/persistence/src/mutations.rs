// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Evaluation-period mutation operations.
//!
//! Each public function runs inside a single transaction so a period row and
//! its grade ranges can never be observed half-written.

use diesel::prelude::*;
use diesel::{Connection, SqliteConnection};
use tracing::debug;

use crate::data_models::{NewGradeRange, NewPeriod};
use crate::diesel_schema::{evaluation_periods, grade_ranges};
use crate::error::PersistenceError;
use crate::sqlite::last_insert_rowid;
use reviewd::EvaluationPeriod;

/// Inserts a new period row with its grade ranges and returns the assigned
/// ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_period(
    conn: &mut SqliteConnection,
    period: &EvaluationPeriod,
) -> Result<i64, PersistenceError> {
    let row = NewPeriod::from_period(period)?;

    conn.transaction::<i64, PersistenceError, _>(|conn| {
        diesel::insert_into(evaluation_periods::table)
            .values(&row)
            .execute(conn)?;

        let period_id = last_insert_rowid(conn)?;
        insert_grade_ranges(conn, period_id, period)?;

        debug!(period_id, "Inserted evaluation period");
        Ok(period_id)
    })
}

/// Writes the full state of an existing period back, replacing its grade
/// ranges wholesale.
///
/// # Errors
///
/// Returns `PeriodNotFound` if no row carries the period's ID, or a database
/// error if the write fails.
pub fn update_period(
    conn: &mut SqliteConnection,
    period: &EvaluationPeriod,
) -> Result<(), PersistenceError> {
    let row = NewPeriod::from_period(period)?;
    let period_id = period.period_id;

    conn.transaction::<(), PersistenceError, _>(|conn| {
        let updated = diesel::update(
            evaluation_periods::table.filter(evaluation_periods::period_id.eq(period_id)),
        )
        .set((
            evaluation_periods::name.eq(&row.name),
            evaluation_periods::description.eq(&row.description),
            evaluation_periods::status.eq(&row.status),
            evaluation_periods::current_phase.eq(&row.current_phase),
            evaluation_periods::start_date.eq(&row.start_date),
            evaluation_periods::end_date.eq(&row.end_date),
            evaluation_periods::evaluation_setup_deadline.eq(&row.evaluation_setup_deadline),
            evaluation_periods::performance_deadline.eq(&row.performance_deadline),
            evaluation_periods::self_evaluation_deadline.eq(&row.self_evaluation_deadline),
            evaluation_periods::peer_evaluation_deadline.eq(&row.peer_evaluation_deadline),
            evaluation_periods::max_self_evaluation_rate.eq(row.max_self_evaluation_rate),
            evaluation_periods::criteria_setting_enabled.eq(row.criteria_setting_enabled),
            evaluation_periods::self_evaluation_setting_enabled
                .eq(row.self_evaluation_setting_enabled),
            evaluation_periods::final_evaluation_setting_enabled
                .eq(row.final_evaluation_setting_enabled),
            evaluation_periods::updated_by.eq(&row.updated_by),
            evaluation_periods::updated_at.eq(&row.updated_at),
            evaluation_periods::deleted_at.eq(&row.deleted_at),
        ))
        .execute(conn)?;

        if updated == 0 {
            return Err(PersistenceError::PeriodNotFound(period_id));
        }

        diesel::delete(grade_ranges::table.filter(grade_ranges::period_id.eq(period_id)))
            .execute(conn)?;
        insert_grade_ranges(conn, period_id, period)?;

        debug!(period_id, "Updated evaluation period");
        Ok(())
    })
}

fn insert_grade_ranges(
    conn: &mut SqliteConnection,
    period_id: i64,
    period: &EvaluationPeriod,
) -> Result<(), PersistenceError> {
    let rows: Vec<NewGradeRange> = period
        .grade_ranges
        .iter()
        .enumerate()
        .map(|(position, range)| {
            let position = i32::try_from(position).map_err(|_| {
                PersistenceError::CorruptRecord(format!(
                    "grade range position out of range: {position}"
                ))
            })?;
            Ok(NewGradeRange::from_grade_range(period_id, position, range))
        })
        .collect::<Result<_, PersistenceError>>()?;

    diesel::insert_into(grade_ranges::table)
        .values(&rows)
        .execute(conn)?;
    Ok(())
}
