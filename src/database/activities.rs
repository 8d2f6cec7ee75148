// ABOUTME: Activity storage operations for exercise, nutrition and measurement entries
// ABOUTME: Create, fetch, delete and filtered paginated listing scoped to the owning user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

use super::{count_as_u64, parse_enum, parse_uuid, Database, QueryTimer, SqlFilter};
use athlyze_core::errors::{AppError, AppResult};
use athlyze_core::models::{Activity, ActivityDetails, ActivityKind, ActivitySnapshot, NewActivity};
use athlyze_core::pagination::{Page, PageRequest};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

const ACTIVITY_COLUMNS: &str =
    "id, user_id, kind, description, date, calories, details, created_at";

/// Optional filters for activity listings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityFilter {
    /// Only this kind
    pub kind: Option<ActivityKind>,
    /// Only activities on or after this day
    pub date_from: Option<NaiveDate>,
    /// Only activities on or before this day
    pub date_to: Option<NaiveDate>,
}

impl ActivityFilter {
    /// Render as a user-scoped SQL filter
    #[must_use]
    pub fn to_sql(&self, user_id: Uuid) -> SqlFilter {
        SqlFilter::for_user(user_id)
            .and_eq("kind", self.kind.map(ActivityKind::as_str))
            .and_gte("date", self.date_from)
            .and_lte("date", self.date_to)
    }
}

impl Database {
    pub(super) async fn migrate_activities(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS activities (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                kind TEXT NOT NULL CHECK (kind IN ('exercise', 'nutrition', 'measurement')),
                description TEXT NOT NULL,
                date TEXT NOT NULL,
                calories INTEGER,
                details TEXT NOT NULL DEFAULT '{}',
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_activities_user_date ON activities(user_id, date)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Store a new activity
    ///
    /// # Errors
    ///
    /// Returns an error if the owner does not exist or the insert fails
    pub async fn create_activity(&self, new_activity: &NewActivity) -> AppResult<Activity> {
        let activity = Activity {
            id: Uuid::new_v4(),
            user_id: new_activity.user_id,
            kind: new_activity.kind,
            description: new_activity.description.clone(),
            date: new_activity.date,
            calories: new_activity.calories,
            details: new_activity.details.clone(),
            created_at: Utc::now(),
        };

        let sql = r"
            INSERT INTO activities (id, user_id, kind, description, date, calories, details, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ";
        let timer = QueryTimer::start("create_activity");
        let result = sqlx::query(sql)
            .bind(activity.id.to_string())
            .bind(activity.user_id.to_string())
            .bind(activity.kind.as_str())
            .bind(&activity.description)
            .bind(activity.date)
            .bind(activity.calories)
            .bind(serde_json::to_string(&activity.details)?)
            .bind(activity.created_at)
            .execute(&self.pool)
            .await?;
        timer.finish(sql, result.rows_affected());

        Ok(activity)
    }

    /// Fetch one activity owned by `user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_activity(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Activity>> {
        let sql = format!("SELECT {ACTIVITY_COLUMNS} FROM activities WHERE id = $1 AND user_id = $2");
        let timer = QueryTimer::start("get_activity");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        timer.finish(&sql, u64::from(row.is_some()));

        row.as_ref().map(Self::row_to_activity).transpose()
    }

    /// Delete one activity owned by `user_id`; false when nothing matched
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn delete_activity(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let sql = "DELETE FROM activities WHERE id = $1 AND user_id = $2";
        let timer = QueryTimer::start("delete_activity");
        let result = sqlx::query(sql)
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;
        timer.finish(sql, result.rows_affected());

        Ok(result.rows_affected() > 0)
    }

    /// One page of a user's activities, newest day first
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails
    pub async fn list_activities(
        &self,
        user_id: Uuid,
        filter: &ActivityFilter,
        page: PageRequest,
    ) -> AppResult<Page<Activity>> {
        let sql_filter = filter.to_sql(user_id);

        let count_sql = format!("SELECT COUNT(*) FROM activities {}", sql_filter.clause());
        let timer = QueryTimer::start("count_activities");
        let total: i64 = sql_filter
            .apply_scalar(sqlx::query_scalar(&count_sql))
            .fetch_one(&self.pool)
            .await?;
        timer.finish(&count_sql, 1);

        let limit = sql_filter.next_placeholder();
        let offset = limit + 1;
        let list_sql = format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities {} \
             ORDER BY date DESC, created_at DESC LIMIT ${limit} OFFSET ${offset}",
            sql_filter.clause()
        );
        let timer = QueryTimer::start("list_activities");
        let rows = sql_filter
            .apply(sqlx::query(&list_sql))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;
        timer.finish(&list_sql, count_as_u64(rows.len()));

        let items = rows
            .iter()
            .map(Self::row_to_activity)
            .collect::<AppResult<Vec<_>>>()?;
        Ok(Page::new(items, page, total))
    }

    /// The most recent activities of a user
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn recent_activities(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<Activity>> {
        let sql_filter = SqlFilter::for_user(user_id);
        let sql = format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities {} \
             ORDER BY date DESC, created_at DESC LIMIT ${}",
            sql_filter.clause(),
            sql_filter.next_placeholder()
        );
        let timer = QueryTimer::start("recent_activities");
        let rows = sql_filter
            .apply(sqlx::query(&sql))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        timer.finish(&sql, count_as_u64(rows.len()));

        rows.iter().map(Self::row_to_activity).collect()
    }

    /// Activities dated on or after `since`, as seen by the suggestion engine
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn activities_since(
        &self,
        user_id: Uuid,
        since: NaiveDate,
    ) -> AppResult<Vec<ActivitySnapshot>> {
        let sql_filter = SqlFilter::for_user(user_id).and_gte("date", Some(since));
        let sql = format!(
            "SELECT kind, description, date, calories FROM activities {} ORDER BY date DESC",
            sql_filter.clause()
        );
        let timer = QueryTimer::start("activities_since");
        let rows = sql_filter
            .apply(sqlx::query(&sql))
            .fetch_all(&self.pool)
            .await?;
        timer.finish(&sql, count_as_u64(rows.len()));

        rows.iter()
            .map(|row| {
                Ok(ActivitySnapshot {
                    kind: parse_enum(row, "kind")?,
                    description: row.try_get("description")?,
                    date: row.try_get("date")?,
                    calories: row.try_get("calories")?,
                })
            })
            .collect()
    }

    fn row_to_activity(row: &SqliteRow) -> AppResult<Activity> {
        let details_json: String = row.try_get("details")?;
        let details: ActivityDetails = serde_json::from_str(&details_json).map_err(|e| {
            AppError::database(format!("Corrupt activity details: {e}")).with_source(e)
        })?;
        let created_at: DateTime<Utc> = row.try_get("created_at")?;

        Ok(Activity {
            id: parse_uuid(row, "id")?,
            user_id: parse_uuid(row, "user_id")?,
            kind: parse_enum(row, "kind")?,
            description: row.try_get("description")?,
            date: row.try_get("date")?,
            calories: row.try_get("calories")?,
            details,
            created_at,
        })
    }
}
