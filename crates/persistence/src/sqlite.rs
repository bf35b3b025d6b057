// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` connection setup for the period store.
//!
//! Opening a connection applies PRAGMAs, runs the embedded migrations, and
//! verifies that foreign key enforcement actually took effect before the
//! store accepts the connection (grade ranges reference their period row).
//! Raw SQL here is confined to PRAGMA statements, which Diesel has no DSL
//! for.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Journal mode applied when a connection is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Journal {
    /// `SQLite`'s default rollback journal, used for shared-memory
    /// databases.
    Rollback,
    /// Write-ahead logging, used for file databases for read concurrency.
    WriteAhead,
}

/// Opens a connection to `database_url` ready for the period store: foreign
/// keys on and verified, journal mode applied, migrations current.
///
/// # Errors
///
/// Returns an error if the connection cannot be established, a PRAGMA or
/// migration fails, or foreign key enforcement did not take effect.
pub fn open(database_url: &str, journal: Journal) -> Result<SqliteConnection, PersistenceError> {
    info!(database_url, "Opening SQLite database");

    let mut conn = SqliteConnection::establish(database_url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("PRAGMA foreign_keys: {e}")))?;

    if journal == Journal::WriteAhead {
        diesel::sql_query("PRAGMA journal_mode = WAL")
            .execute(&mut conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("PRAGMA journal_mode: {e}")))?;
    }

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;

    // PRAGMA foreign_keys is a no-op on builds compiled without the
    // feature, so read it back instead of trusting the write.
    let enabled = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<ForeignKeysPragma>(&mut conn)?
        .foreign_keys;
    if enabled == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }
    debug!("Foreign key enforcement verified");

    Ok(conn)
}

/// Returns the row ID assigned by the most recent insert on this connection.
///
/// `SQLite` does not support `RETURNING` in all contexts, so inserts query
/// `last_insert_rowid()` instead.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}
