// ABOUTME: Database management for users, activities and suggestions on SQLite
// ABOUTME: Owns the connection pool, runs idempotent migrations and traces every statement
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

//! # Database Management
//!
//! `Database` wraps a sqlx `SqlitePool`. Storage operations are grouped per
//! table in submodules, each contributing its own `impl Database` block and
//! its own `migrate_*` function.
//!
//! Every user-scoped query is built with [`filters::SqlFilter`], which
//! appends optional conditions with positional placeholders so that nothing
//! supplied by a client ends up in SQL text.

mod activities;
/// Positional-placeholder filter builder for user-scoped queries
pub mod filters;
mod reports;
mod suggestions;
mod users;

pub use activities::ActivityFilter;
pub use filters::{SqlFilter, SqlValue};
pub use reports::{
    ActivityStats, DailyActivity, DailyBreakdown, DailyNutrition, ExerciseSession, ExerciseStats,
    KindShare, NutritionEntry, PeriodStats, TopExercise, WeightEntry,
};
pub use suggestions::SuggestionStats;

use std::str::FromStr;
use std::time::Instant;

use athlyze_core::errors::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

/// Database manager for users, activities and suggestions
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails or a
    /// migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::config(format!("Invalid database URL {database_url}: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePool::connect_with(options).await?;
        let db = Self { pool };

        db.migrate().await?;
        info!("Database ready at {database_url}");

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index cannot be created
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_activities().await?;
        self.migrate_suggestions().await?;
        Ok(())
    }

    /// Check that the database answers queries
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Times a statement and traces it at debug level once it completes
pub(crate) struct QueryTimer {
    operation: &'static str,
    started: Instant,
}

impl QueryTimer {
    pub(crate) fn start(operation: &'static str) -> Self {
        Self {
            operation,
            started: Instant::now(),
        }
    }

    pub(crate) fn finish(self, sql: &str, rows: u64) {
        let duration_ms = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        debug!(
            db.operation = self.operation,
            db.rows = rows,
            db.duration_ms = duration_ms,
            db.statement = %compact_sql(sql),
            "Query executed"
        );
    }
}

/// Collapse whitespace so multi-line statements log on one line
fn compact_sql(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_uuid(row: &SqliteRow, column: &str) -> AppResult<Uuid> {
    let raw: String = row.try_get(column)?;
    Uuid::parse_str(&raw)
        .map_err(|e| AppError::database(format!("Invalid UUID in column {column}: {e}")))
}

fn parse_enum<T: FromStr<Err = AppError>>(row: &SqliteRow, column: &str) -> AppResult<T> {
    let raw: String = row.try_get(column)?;
    raw.parse()
        .map_err(|e: AppError| AppError::database(format!("Corrupt {column} value: {}", e.message)))
}

fn count_as_u64(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_sql() {
        assert_eq!(
            compact_sql("\n  SELECT id\n    FROM users\n   WHERE id = $1\n"),
            "SELECT id FROM users WHERE id = $1"
        );
    }
}
