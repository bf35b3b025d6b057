// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the reviewd evaluation backend.
//!
//! Evaluation periods and their grade ranges are stored in `SQLite` via
//! Diesel with embedded migrations. Dates live as ISO `YYYY-MM-DD` text,
//! timestamps as RFC 3339 text. Deletion is always soft: rows keep their
//! `deleted_at` marker and drop out of every query.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use reviewd::{EvaluationPeriod, SiblingPeriod};

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique sequential
/// ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for evaluation periods.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let conn = sqlite::open(&shared_memory_url, sqlite::Journal::Rollback)?;
        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let conn = sqlite::open(path_str, sqlite::Journal::WriteAhead)?;
        Ok(Self { conn })
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Persists a newly created period and returns its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_period(&mut self, period: &EvaluationPeriod) -> Result<i64, PersistenceError> {
        mutations::insert_period(&mut self.conn, period)
    }

    /// Writes a mutated period back, replacing its grade ranges wholesale.
    /// Soft deletion goes through here too, as a write of `deleted_at`.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` if the period was never persisted, or a
    /// database error if the write fails.
    pub fn update_period(&mut self, period: &EvaluationPeriod) -> Result<(), PersistenceError> {
        mutations::update_period(&mut self.conn, period)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Loads one non-deleted period by ID.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` if no live row carries the ID.
    pub fn get_period(&mut self, period_id: i64) -> Result<EvaluationPeriod, PersistenceError> {
        let row = queries::find_period_row(&mut self.conn, period_id)?
            .ok_or(PersistenceError::PeriodNotFound(period_id))?;
        let ranges = queries::load_grade_ranges(&mut self.conn, period_id)?;
        row.into_period(ranges)
    }

    /// Loads every non-deleted period, ordered by start date.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a row cannot be rehydrated.
    pub fn list_periods(&mut self) -> Result<Vec<EvaluationPeriod>, PersistenceError> {
        let rows = queries::list_period_rows(&mut self.conn)?;
        self.rows_into_periods(rows)
    }

    /// Loads one page of non-deleted periods, ordered by start date, plus
    /// the total count of non-deleted periods.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a row cannot be rehydrated.
    pub fn list_periods_paged(
        &mut self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<EvaluationPeriod>, i64), PersistenceError> {
        let total = queries::count_period_rows(&mut self.conn)?;
        let rows = queries::list_period_rows_paged(&mut self.conn, offset, limit)?;
        let periods = self.rows_into_periods(rows)?;
        Ok((periods, total))
    }

    /// Loads every period whose stored status is `in_progress`, ordered by
    /// start date.
    ///
    /// This reads the stored status; it does not re-derive against the
    /// clock. A period past its deadlines stays active here until the next
    /// write refreshes it.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a row cannot be rehydrated.
    pub fn list_active_periods(&mut self) -> Result<Vec<EvaluationPeriod>, PersistenceError> {
        let rows = queries::list_active_rows(&mut self.conn)?;
        self.rows_into_periods(rows)
    }

    /// Builds sibling summaries of every non-deleted period, for the
    /// uniqueness and overlap checks.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a row cannot be rehydrated.
    pub fn list_siblings(&mut self) -> Result<Vec<SiblingPeriod>, PersistenceError> {
        let periods = self.list_periods()?;
        Ok(periods
            .into_iter()
            .map(|period| SiblingPeriod {
                period_id: period.period_id,
                name: period.name,
                start_date: period.schedule.start_date,
                end_date: period.schedule.effective_end_date(),
            })
            .collect())
    }

    fn rows_into_periods(
        &mut self,
        rows: Vec<data_models::PeriodRow>,
    ) -> Result<Vec<EvaluationPeriod>, PersistenceError> {
        rows.into_iter()
            .map(|row| {
                let ranges = queries::load_grade_ranges(&mut self.conn, row.period_id)?;
                row.into_period(ranges)
            })
            .collect()
    }
}
