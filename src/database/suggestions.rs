// ABOUTME: Suggestion storage operations including read tracking and per-kind statistics
// ABOUTME: Batch inserts run in one transaction so a generation run is stored all-or-nothing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

use super::{count_as_u64, parse_enum, parse_uuid, Database, QueryTimer, SqlFilter};
use athlyze_core::errors::AppResult;
use athlyze_core::models::{NewSuggestion, Suggestion, SuggestionKind};
use athlyze_core::pagination::{Page, PageRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

const SUGGESTION_COLUMNS: &str = "id, user_id, text, kind, is_read, created_at";
const INSERT_SUGGESTION: &str = r"
    INSERT INTO suggestions (id, user_id, text, kind, is_read, created_at)
    VALUES ($1, $2, $3, $4, $5, $6)
";

/// Suggestion counters for one user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionStats {
    /// All suggestions
    pub total: i64,
    /// Suggestions not read yet
    pub unread: i64,
    /// Exercise suggestions
    pub exercise: i64,
    /// Nutrition suggestions
    pub nutrition: i64,
    /// Measurement suggestions
    pub measurement: i64,
    /// General suggestions
    pub general: i64,
}

impl Database {
    pub(super) async fn migrate_suggestions(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS suggestions (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                text TEXT NOT NULL,
                kind TEXT NOT NULL DEFAULT 'general' CHECK (kind IN ('exercise', 'nutrition', 'measurement', 'general')),
                is_read BOOLEAN NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_suggestions_user_read ON suggestions(user_id, is_read)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Store one suggestion
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_suggestion(
        &self,
        user_id: Uuid,
        suggestion: &NewSuggestion,
    ) -> AppResult<Suggestion> {
        let stored = Self::new_suggestion_row(user_id, suggestion);
        let timer = QueryTimer::start("create_suggestion");
        let result = Self::bind_suggestion(&stored)
            .execute(&self.pool)
            .await?;
        timer.finish(INSERT_SUGGESTION, result.rows_affected());

        Ok(stored)
    }

    /// Store a batch of suggestions in a single transaction
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is stored in that case
    pub async fn create_suggestions(
        &self,
        user_id: Uuid,
        suggestions: &[NewSuggestion],
    ) -> AppResult<Vec<Suggestion>> {
        let mut tx = self.pool.begin().await?;
        let mut stored = Vec::with_capacity(suggestions.len());

        for suggestion in suggestions {
            let row = Self::new_suggestion_row(user_id, suggestion);
            let timer = QueryTimer::start("create_suggestions");
            let result = Self::bind_suggestion(&row).execute(&mut *tx).await?;
            timer.finish(INSERT_SUGGESTION, result.rows_affected());
            stored.push(row);
        }

        tx.commit().await?;
        Ok(stored)
    }

    /// One page of a user's suggestions, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails
    pub async fn list_suggestions(
        &self,
        user_id: Uuid,
        kind: Option<SuggestionKind>,
        page: PageRequest,
    ) -> AppResult<Page<Suggestion>> {
        let sql_filter = SqlFilter::for_user(user_id).and_eq("kind", kind.map(SuggestionKind::as_str));

        let count_sql = format!("SELECT COUNT(*) FROM suggestions {}", sql_filter.clause());
        let timer = QueryTimer::start("count_suggestions");
        let total: i64 = sql_filter
            .apply_scalar(sqlx::query_scalar(&count_sql))
            .fetch_one(&self.pool)
            .await?;
        timer.finish(&count_sql, 1);

        let limit = sql_filter.next_placeholder();
        let list_sql = format!(
            "SELECT {SUGGESTION_COLUMNS} FROM suggestions {} \
             ORDER BY created_at DESC, rowid DESC LIMIT ${limit} OFFSET ${}",
            sql_filter.clause(),
            limit + 1
        );
        let timer = QueryTimer::start("list_suggestions");
        let rows = sql_filter
            .apply(sqlx::query(&list_sql))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;
        timer.finish(&list_sql, count_as_u64(rows.len()));

        let items = rows
            .iter()
            .map(Self::row_to_suggestion)
            .collect::<AppResult<Vec<_>>>()?;
        Ok(Page::new(items, page, total))
    }

    /// Mark the given suggestions read; ids of other users are ignored
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn mark_suggestions_read(&self, user_id: Uuid, ids: &[Uuid]) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let sql_filter = SqlFilter::for_user(user_id).and_in("id", ids.iter().copied());
        let sql = format!("UPDATE suggestions SET is_read = 1 {}", sql_filter.clause());
        let timer = QueryTimer::start("mark_suggestions_read");
        let result = sql_filter
            .apply(sqlx::query(&sql))
            .execute(&self.pool)
            .await?;
        timer.finish(&sql, result.rows_affected());

        Ok(result.rows_affected())
    }

    /// Mark one suggestion unread; false when it is not the user's
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn mark_suggestion_unread(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let sql = "UPDATE suggestions SET is_read = 0 WHERE id = $1 AND user_id = $2";
        let timer = QueryTimer::start("mark_suggestion_unread");
        let result = sqlx::query(sql)
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;
        timer.finish(sql, result.rows_affected());

        Ok(result.rows_affected() > 0)
    }

    /// Delete one suggestion; false when it is not the user's
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_suggestion(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let sql = "DELETE FROM suggestions WHERE id = $1 AND user_id = $2";
        let timer = QueryTimer::start("delete_suggestion");
        let result = sqlx::query(sql)
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;
        timer.finish(sql, result.rows_affected());

        Ok(result.rows_affected() > 0)
    }

    /// Newest unread suggestions
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn unread_suggestions(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<Suggestion>> {
        let sql_filter = SqlFilter::for_user(user_id).and_eq("is_read", Some(0_i64));
        let sql = format!(
            "SELECT {SUGGESTION_COLUMNS} FROM suggestions {} \
             ORDER BY created_at DESC, rowid DESC LIMIT ${}",
            sql_filter.clause(),
            sql_filter.next_placeholder()
        );
        let timer = QueryTimer::start("unread_suggestions");
        let rows = sql_filter
            .apply(sqlx::query(&sql))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        timer.finish(&sql, count_as_u64(rows.len()));

        rows.iter().map(Self::row_to_suggestion).collect()
    }

    /// Totals, unread count and per-kind counts
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn suggestion_stats(&self, user_id: Uuid) -> AppResult<SuggestionStats> {
        let sql_filter = SqlFilter::for_user(user_id);
        let sql = format!(
            r"
            SELECT
                COUNT(*) AS total,
                COALESCE(SUM(CASE WHEN is_read = 0 THEN 1 ELSE 0 END), 0) AS unread,
                COALESCE(SUM(CASE WHEN kind = 'exercise' THEN 1 ELSE 0 END), 0) AS exercise,
                COALESCE(SUM(CASE WHEN kind = 'nutrition' THEN 1 ELSE 0 END), 0) AS nutrition,
                COALESCE(SUM(CASE WHEN kind = 'measurement' THEN 1 ELSE 0 END), 0) AS measurement,
                COALESCE(SUM(CASE WHEN kind = 'general' THEN 1 ELSE 0 END), 0) AS general
            FROM suggestions {}
            ",
            sql_filter.clause()
        );
        let timer = QueryTimer::start("suggestion_stats");
        let row = sql_filter
            .apply(sqlx::query(&sql))
            .fetch_one(&self.pool)
            .await?;
        timer.finish(&sql, 1);

        Ok(SuggestionStats {
            total: row.try_get("total")?,
            unread: row.try_get("unread")?,
            exercise: row.try_get("exercise")?,
            nutrition: row.try_get("nutrition")?,
            measurement: row.try_get("measurement")?,
            general: row.try_get("general")?,
        })
    }

    fn new_suggestion_row(user_id: Uuid, suggestion: &NewSuggestion) -> Suggestion {
        Suggestion {
            id: Uuid::new_v4(),
            user_id,
            text: suggestion.text.clone(),
            kind: suggestion.kind,
            is_read: false,
            created_at: Utc::now(),
        }
    }

    fn bind_suggestion(
        suggestion: &Suggestion,
    ) -> sqlx::query::Query<'static, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'static>> {
        sqlx::query(INSERT_SUGGESTION)
            .bind(suggestion.id.to_string())
            .bind(suggestion.user_id.to_string())
            .bind(suggestion.text.clone())
            .bind(suggestion.kind.as_str())
            .bind(suggestion.is_read)
            .bind(suggestion.created_at)
    }

    fn row_to_suggestion(row: &SqliteRow) -> AppResult<Suggestion> {
        let created_at: DateTime<Utc> = row.try_get("created_at")?;
        Ok(Suggestion {
            id: parse_uuid(row, "id")?,
            user_id: parse_uuid(row, "user_id")?,
            text: row.try_get("text")?,
            kind: parse_enum(row, "kind")?,
            is_read: row.try_get("is_read")?,
            created_at,
        })
    }
}
