// ABOUTME: Aggregate queries behind the dashboard and the activity, exercise and nutrition reports
// ABOUTME: Every window starts at a date computed by the caller and bound as a parameter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

use super::{count_as_u64, parse_enum, Database, QueryTimer, SqlFilter};
use athlyze_core::errors::{AppError, AppResult};
use athlyze_core::models::{ActivityDetails, ActivityKind};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

/// All-time dashboard counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityStats {
    /// Every activity ever logged
    pub total: i64,
    /// Exercise activities
    pub exercises: i64,
    /// Nutrition activities
    pub meals: i64,
    /// Measurement activities
    pub measurements: i64,
    /// Activities dated within the last week
    pub this_week: i64,
}

/// One day of the dashboard chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyActivity {
    /// Day
    pub date: NaiveDate,
    /// Activities that day
    pub total: i64,
    /// Exercise activities that day
    pub exercises: i64,
    /// Sum of logged calories that day, all kinds
    pub calories: i64,
}

/// Counters for a report period
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PeriodStats {
    /// Activities in the period
    pub total: i64,
    /// Exercise activities
    pub exercises: i64,
    /// Nutrition activities
    pub meals: i64,
    /// Measurement activities
    pub measurements: i64,
    /// Average calories of exercises that logged calories
    pub avg_exercise_calories: Option<f64>,
    /// Calories burned by exercise
    pub calories_burned: i64,
    /// Calories consumed through nutrition entries
    pub calories_consumed: i64,
}

/// One day of the report breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyBreakdown {
    /// Day
    pub date: NaiveDate,
    /// Activities that day
    pub total: i64,
    /// Exercise activities
    pub exercises: i64,
    /// Nutrition activities
    pub meals: i64,
    /// Measurement activities
    pub measurements: i64,
    /// Calories burned by exercise
    pub calories_burned: i64,
    /// Calories consumed through nutrition entries
    pub calories_consumed: i64,
}

/// Share of one activity kind in a period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindShare {
    /// Activity kind
    pub kind: ActivityKind,
    /// Activities of that kind
    pub count: i64,
    /// Percentage of all activities, rounded to one decimal
    pub percentage: f64,
}

/// A recorded body weight
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightEntry {
    /// Day of the measurement
    pub date: NaiveDate,
    /// Weight in kilograms
    pub weight_kg: f64,
}

/// A frequently logged exercise
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopExercise {
    /// Exercise description
    pub description: String,
    /// Sessions in the period
    pub frequency: i64,
    /// Average calories of the sessions that logged calories
    pub avg_calories: Option<f64>,
}

/// One exercise session with its recency among sessions of the same exercise
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseSession {
    /// Exercise description
    pub description: String,
    /// Day
    pub date: NaiveDate,
    /// Calories burned
    pub calories: Option<i64>,
    /// Exercise metrics
    pub details: ActivityDetails,
    /// 1 for the latest session of this exercise, 2 for the one before, ...
    pub recency_rank: i64,
}

/// Per-exercise statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseStats {
    /// Exercise description
    pub description: String,
    /// Sessions in the period
    pub sessions: i64,
    /// Average calories
    pub avg_calories: Option<f64>,
    /// Highest calories in one session
    pub max_calories: Option<i64>,
    /// First session day
    pub first_date: NaiveDate,
    /// Latest session day
    pub last_date: NaiveDate,
}

/// One nutrition entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionEntry {
    /// Day
    pub date: NaiveDate,
    /// Meal description
    pub description: String,
    /// Calories consumed
    pub calories: Option<i64>,
    /// Macronutrients
    pub details: ActivityDetails,
}

/// Nutrition totals for one day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyNutrition {
    /// Day
    pub date: NaiveDate,
    /// Meals logged
    pub meals: i64,
    /// Sum of calories, absent when no meal logged calories
    pub total_calories: Option<i64>,
    /// Average calories per meal that logged calories
    pub avg_calories: Option<f64>,
}

impl Database {
    /// All-time counters plus activities dated on or after `week_start`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn activity_stats(
        &self,
        user_id: Uuid,
        week_start: NaiveDate,
    ) -> AppResult<ActivityStats> {
        let filter = SqlFilter::for_user(user_id);
        let week_placeholder = filter.next_placeholder();
        let sql = format!(
            r"
            SELECT
                COUNT(*) AS total,
                COALESCE(SUM(CASE WHEN kind = 'exercise' THEN 1 ELSE 0 END), 0) AS exercises,
                COALESCE(SUM(CASE WHEN kind = 'nutrition' THEN 1 ELSE 0 END), 0) AS meals,
                COALESCE(SUM(CASE WHEN kind = 'measurement' THEN 1 ELSE 0 END), 0) AS measurements,
                COALESCE(SUM(CASE WHEN date >= ${week_placeholder} THEN 1 ELSE 0 END), 0) AS this_week
            FROM activities {}
            ",
            filter.clause()
        );
        let timer = QueryTimer::start("activity_stats");
        let row = filter
            .apply(sqlx::query(&sql))
            .bind(week_start)
            .fetch_one(&self.pool)
            .await?;
        timer.finish(&sql, 1);

        Ok(ActivityStats {
            total: row.try_get("total")?,
            exercises: row.try_get("exercises")?,
            meals: row.try_get("meals")?,
            measurements: row.try_get("measurements")?,
            this_week: row.try_get("this_week")?,
        })
    }

    /// Per-day totals for the dashboard chart, oldest day first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn daily_activity(
        &self,
        user_id: Uuid,
        since: NaiveDate,
    ) -> AppResult<Vec<DailyActivity>> {
        let filter = SqlFilter::for_user(user_id).and_gte("date", Some(since));
        let sql = format!(
            r"
            SELECT
                date,
                COUNT(*) AS total,
                COALESCE(SUM(CASE WHEN kind = 'exercise' THEN 1 ELSE 0 END), 0) AS exercises,
                COALESCE(SUM(COALESCE(calories, 0)), 0) AS calories
            FROM activities {}
            GROUP BY date
            ORDER BY date ASC
            ",
            filter.clause()
        );
        let rows = self.fetch_filtered("daily_activity", &sql, &filter).await?;

        rows.iter()
            .map(|row| {
                Ok(DailyActivity {
                    date: row.try_get("date")?,
                    total: row.try_get("total")?,
                    exercises: row.try_get("exercises")?,
                    calories: row.try_get("calories")?,
                })
            })
            .collect()
    }

    /// Counters and calorie totals for a report period
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn period_stats(&self, user_id: Uuid, since: NaiveDate) -> AppResult<PeriodStats> {
        let filter = SqlFilter::for_user(user_id).and_gte("date", Some(since));
        let sql = format!(
            r"
            SELECT
                COUNT(*) AS total,
                COALESCE(SUM(CASE WHEN kind = 'exercise' THEN 1 ELSE 0 END), 0) AS exercises,
                COALESCE(SUM(CASE WHEN kind = 'nutrition' THEN 1 ELSE 0 END), 0) AS meals,
                COALESCE(SUM(CASE WHEN kind = 'measurement' THEN 1 ELSE 0 END), 0) AS measurements,
                AVG(CASE WHEN kind = 'exercise' AND calories IS NOT NULL THEN calories END) AS avg_exercise_calories,
                COALESCE(SUM(CASE WHEN kind = 'exercise' AND calories IS NOT NULL THEN calories ELSE 0 END), 0) AS calories_burned,
                COALESCE(SUM(CASE WHEN kind = 'nutrition' AND calories IS NOT NULL THEN calories ELSE 0 END), 0) AS calories_consumed
            FROM activities {}
            ",
            filter.clause()
        );
        let rows = self.fetch_filtered("period_stats", &sql, &filter).await?;
        let row = rows
            .first()
            .ok_or_else(|| AppError::database("Aggregate query returned no row"))?;

        Ok(PeriodStats {
            total: row.try_get("total")?,
            exercises: row.try_get("exercises")?,
            meals: row.try_get("meals")?,
            measurements: row.try_get("measurements")?,
            avg_exercise_calories: row.try_get("avg_exercise_calories")?,
            calories_burned: row.try_get("calories_burned")?,
            calories_consumed: row.try_get("calories_consumed")?,
        })
    }

    /// Per-day counters and calorie totals, oldest day first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn daily_breakdown(
        &self,
        user_id: Uuid,
        since: NaiveDate,
    ) -> AppResult<Vec<DailyBreakdown>> {
        let filter = SqlFilter::for_user(user_id).and_gte("date", Some(since));
        let sql = format!(
            r"
            SELECT
                date,
                COUNT(*) AS total,
                COALESCE(SUM(CASE WHEN kind = 'exercise' THEN 1 ELSE 0 END), 0) AS exercises,
                COALESCE(SUM(CASE WHEN kind = 'nutrition' THEN 1 ELSE 0 END), 0) AS meals,
                COALESCE(SUM(CASE WHEN kind = 'measurement' THEN 1 ELSE 0 END), 0) AS measurements,
                COALESCE(SUM(CASE WHEN kind = 'exercise' AND calories IS NOT NULL THEN calories ELSE 0 END), 0) AS calories_burned,
                COALESCE(SUM(CASE WHEN kind = 'nutrition' AND calories IS NOT NULL THEN calories ELSE 0 END), 0) AS calories_consumed
            FROM activities {}
            GROUP BY date
            ORDER BY date ASC
            ",
            filter.clause()
        );
        let rows = self.fetch_filtered("daily_breakdown", &sql, &filter).await?;

        rows.iter()
            .map(|row| {
                Ok(DailyBreakdown {
                    date: row.try_get("date")?,
                    total: row.try_get("total")?,
                    exercises: row.try_get("exercises")?,
                    meals: row.try_get("meals")?,
                    measurements: row.try_get("measurements")?,
                    calories_burned: row.try_get("calories_burned")?,
                    calories_consumed: row.try_get("calories_consumed")?,
                })
            })
            .collect()
    }

    /// Count and share of each activity kind in the period
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn kind_distribution(
        &self,
        user_id: Uuid,
        since: NaiveDate,
    ) -> AppResult<Vec<KindShare>> {
        let filter = SqlFilter::for_user(user_id).and_gte("date", Some(since));
        let sql = format!(
            r"
            SELECT
                kind,
                COUNT(*) AS count,
                ROUND(COUNT(*) * 100.0 / SUM(COUNT(*)) OVER (), 1) AS percentage
            FROM activities {}
            GROUP BY kind
            ORDER BY count DESC, kind ASC
            ",
            filter.clause()
        );
        let rows = self.fetch_filtered("kind_distribution", &sql, &filter).await?;

        rows.iter()
            .map(|row| {
                Ok(KindShare {
                    kind: parse_enum(row, "kind")?,
                    count: row.try_get("count")?,
                    percentage: row.try_get("percentage")?,
                })
            })
            .collect()
    }

    /// Recorded weights in the period, oldest first
    ///
    /// Entries without a numeric weight are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn weight_history(
        &self,
        user_id: Uuid,
        since: NaiveDate,
    ) -> AppResult<Vec<WeightEntry>> {
        let filter = SqlFilter::for_user(user_id)
            .and_eq("kind", Some(ActivityKind::Measurement.as_str()))
            .and_gte("date", Some(since));
        let sql = format!(
            r"
            SELECT date, CAST(json_extract(details, '$.weight_kg') AS REAL) AS weight_kg
            FROM activities {}
                AND typeof(json_extract(details, '$.weight_kg')) IN ('integer', 'real')
            ORDER BY date ASC, created_at ASC
            ",
            filter.clause()
        );
        let rows = self.fetch_filtered("weight_history", &sql, &filter).await?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in &rows {
            let weight_kg: f64 = row.try_get("weight_kg")?;
            if weight_kg.is_finite() {
                entries.push(WeightEntry {
                    date: row.try_get("date")?,
                    weight_kg,
                });
            }
        }
        Ok(entries)
    }

    /// Most frequent exercises in the period
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn top_exercises(
        &self,
        user_id: Uuid,
        since: NaiveDate,
        limit: i64,
    ) -> AppResult<Vec<TopExercise>> {
        let filter = SqlFilter::for_user(user_id)
            .and_eq("kind", Some(ActivityKind::Exercise.as_str()))
            .and_gte("date", Some(since));
        let limit_placeholder = filter.next_placeholder();
        let sql = format!(
            r"
            SELECT description, COUNT(*) AS frequency, AVG(calories) AS avg_calories
            FROM activities {}
            GROUP BY description
            ORDER BY frequency DESC, description ASC
            LIMIT ${limit_placeholder}
            ",
            filter.clause()
        );
        let timer = QueryTimer::start("top_exercises");
        let rows = filter
            .apply(sqlx::query(&sql))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        timer.finish(&sql, count_as_u64(rows.len()));

        rows.iter()
            .map(|row| {
                Ok(TopExercise {
                    description: row.try_get("description")?,
                    frequency: row.try_get("frequency")?,
                    avg_calories: row.try_get("avg_calories")?,
                })
            })
            .collect()
    }

    /// Exercise sessions in the period, newest first, ranked per exercise
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn exercise_sessions(
        &self,
        user_id: Uuid,
        since: NaiveDate,
    ) -> AppResult<Vec<ExerciseSession>> {
        let filter = SqlFilter::for_user(user_id)
            .and_eq("kind", Some(ActivityKind::Exercise.as_str()))
            .and_gte("date", Some(since));
        let sql = format!(
            r"
            SELECT
                description,
                date,
                calories,
                details,
                ROW_NUMBER() OVER (PARTITION BY description ORDER BY date DESC, created_at DESC) AS recency_rank
            FROM activities {}
            ORDER BY date DESC, created_at DESC
            ",
            filter.clause()
        );
        let rows = self.fetch_filtered("exercise_sessions", &sql, &filter).await?;

        rows.iter()
            .map(|row| {
                Ok(ExerciseSession {
                    description: row.try_get("description")?,
                    date: row.try_get("date")?,
                    calories: row.try_get("calories")?,
                    details: parse_details(row)?,
                    recency_rank: row.try_get("recency_rank")?,
                })
            })
            .collect()
    }

    /// Per-exercise statistics in the period, most practiced first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn exercise_stats(
        &self,
        user_id: Uuid,
        since: NaiveDate,
    ) -> AppResult<Vec<ExerciseStats>> {
        let filter = SqlFilter::for_user(user_id)
            .and_eq("kind", Some(ActivityKind::Exercise.as_str()))
            .and_gte("date", Some(since));
        let sql = format!(
            r"
            SELECT
                description,
                COUNT(*) AS sessions,
                AVG(calories) AS avg_calories,
                MAX(calories) AS max_calories,
                MIN(date) AS first_date,
                MAX(date) AS last_date
            FROM activities {}
            GROUP BY description
            ORDER BY sessions DESC, description ASC
            ",
            filter.clause()
        );
        let rows = self.fetch_filtered("exercise_stats", &sql, &filter).await?;

        rows.iter()
            .map(|row| {
                Ok(ExerciseStats {
                    description: row.try_get("description")?,
                    sessions: row.try_get("sessions")?,
                    avg_calories: row.try_get("avg_calories")?,
                    max_calories: row.try_get("max_calories")?,
                    first_date: row.try_get("first_date")?,
                    last_date: row.try_get("last_date")?,
                })
            })
            .collect()
    }

    /// Nutrition entries in the period, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn nutrition_entries(
        &self,
        user_id: Uuid,
        since: NaiveDate,
    ) -> AppResult<Vec<NutritionEntry>> {
        let filter = SqlFilter::for_user(user_id)
            .and_eq("kind", Some(ActivityKind::Nutrition.as_str()))
            .and_gte("date", Some(since));
        let sql = format!(
            r"
            SELECT date, description, calories, details
            FROM activities {}
            ORDER BY date DESC, created_at DESC
            ",
            filter.clause()
        );
        let rows = self.fetch_filtered("nutrition_entries", &sql, &filter).await?;

        rows.iter()
            .map(|row| {
                Ok(NutritionEntry {
                    date: row.try_get("date")?,
                    description: row.try_get("description")?,
                    calories: row.try_get("calories")?,
                    details: parse_details(row)?,
                })
            })
            .collect()
    }

    /// Nutrition totals per day, newest day first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn daily_nutrition(
        &self,
        user_id: Uuid,
        since: NaiveDate,
    ) -> AppResult<Vec<DailyNutrition>> {
        let filter = SqlFilter::for_user(user_id)
            .and_eq("kind", Some(ActivityKind::Nutrition.as_str()))
            .and_gte("date", Some(since));
        let sql = format!(
            r"
            SELECT
                date,
                COUNT(*) AS meals,
                SUM(calories) AS total_calories,
                AVG(calories) AS avg_calories
            FROM activities {}
            GROUP BY date
            ORDER BY date DESC
            ",
            filter.clause()
        );
        let rows = self.fetch_filtered("daily_nutrition", &sql, &filter).await?;

        rows.iter()
            .map(|row| {
                Ok(DailyNutrition {
                    date: row.try_get("date")?,
                    meals: row.try_get("meals")?,
                    total_calories: row.try_get("total_calories")?,
                    avg_calories: row.try_get("avg_calories")?,
                })
            })
            .collect()
    }

    async fn fetch_filtered(
        &self,
        operation: &'static str,
        sql: &str,
        filter: &SqlFilter,
    ) -> AppResult<Vec<SqliteRow>> {
        let timer = QueryTimer::start(operation);
        let rows = filter.apply(sqlx::query(sql)).fetch_all(&self.pool).await?;
        timer.finish(sql, count_as_u64(rows.len()));
        Ok(rows)
    }
}

fn parse_details(row: &SqliteRow) -> AppResult<ActivityDetails> {
    let raw: String = row.try_get("details")?;
    Ok(serde_json::from_str(&raw)?)
}
