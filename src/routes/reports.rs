// ABOUTME: Report route handlers for overall, exercise and nutrition summaries
// ABOUTME: Reports cover a trailing period of 1 to 365 days, 30 by default
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

//! Report routes
//!
//! - `GET /reports?period=N` - counters, daily breakdown, distribution, weight, top exercises
//! - `GET /reports/exercises?period=N` - exercise sessions and per-exercise stats
//! - `GET /reports/nutrition?period=N` - meals and per-day intake

use super::{non_empty, query_params};
use crate::database::{
    DailyBreakdown, DailyNutrition, ExerciseSession, ExerciseStats, KindShare, NutritionEntry,
    PeriodStats, TopExercise, WeightEntry,
};
use crate::resources::ServerResources;
use crate::services::suggestions::lookback_start;
use athlyze_core::constants::reports::{
    DEFAULT_PERIOD_DAYS, MAX_PERIOD_DAYS, MIN_PERIOD_DAYS, TOP_EXERCISES,
};
use athlyze_core::errors::{AppError, AppResult, FieldError};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::HeaderMap,
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Report query
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// Number of trailing days
    pub period: Option<String>,
}

impl ReportQuery {
    /// Validated period in days
    ///
    /// # Errors
    ///
    /// Returns a validation error unless the period is a whole number of days
    /// within the accepted range
    pub fn period_days(&self) -> AppResult<i64> {
        let Some(raw) = non_empty(self.period.as_deref()) else {
            return Ok(DEFAULT_PERIOD_DAYS);
        };

        raw.parse::<i64>()
            .ok()
            .filter(|days| (MIN_PERIOD_DAYS..=MAX_PERIOD_DAYS).contains(days))
            .ok_or_else(|| {
                AppError::validation(vec![FieldError::new(
                    "period",
                    format!(
                        "Period must be a number of days between {MIN_PERIOD_DAYS} and {MAX_PERIOD_DAYS}"
                    ),
                )])
            })
    }
}

/// Overall report
#[derive(Debug, Serialize)]
pub struct OverviewReport {
    /// Period in days
    pub period: i64,
    /// Counters and calorie totals
    pub stats: PeriodStats,
    /// Per-day breakdown
    pub daily: Vec<DailyBreakdown>,
    /// Share of each kind
    pub distribution: Vec<KindShare>,
    /// Weight measurements
    pub weight: Vec<WeightEntry>,
    /// Most frequent exercises
    pub top_exercises: Vec<TopExercise>,
}

/// Exercise report
#[derive(Debug, Serialize)]
pub struct ExerciseReport {
    /// Period in days
    pub period: i64,
    /// Every exercise session
    pub sessions: Vec<ExerciseSession>,
    /// Per-exercise aggregates
    pub stats: Vec<ExerciseStats>,
}

/// Nutrition report
#[derive(Debug, Serialize)]
pub struct NutritionReport {
    /// Period in days
    pub period: i64,
    /// Every meal
    pub entries: Vec<NutritionEntry>,
    /// Per-day intake
    pub daily: Vec<DailyNutrition>,
}

/// Report routes
pub struct ReportRoutes;

impl ReportRoutes {
    /// Create all report routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/reports", get(Self::handle_overview))
            .route("/reports/exercises", get(Self::handle_exercises))
            .route("/reports/nutrition", get(Self::handle_nutrition))
            .with_state(resources)
    }

    fn period_window(query: Result<Query<ReportQuery>, QueryRejection>) -> AppResult<(i64, NaiveDate)> {
        let period = query_params(query)?.period_days()?;
        Ok((period, lookback_start(Utc::now().date_naive(), period)))
    }

    async fn handle_overview(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        query: Result<Query<ReportQuery>, QueryRejection>,
    ) -> Result<Json<OverviewReport>, AppError> {
        let user = resources.session_auth.authenticate(&headers)?;
        let (period, since) = Self::period_window(query)?;
        let database = &resources.database;

        Ok(Json(OverviewReport {
            period,
            stats: database.period_stats(user.id, since).await?,
            daily: database.daily_breakdown(user.id, since).await?,
            distribution: database.kind_distribution(user.id, since).await?,
            weight: database.weight_history(user.id, since).await?,
            top_exercises: database.top_exercises(user.id, since, TOP_EXERCISES).await?,
        }))
    }

    async fn handle_exercises(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        query: Result<Query<ReportQuery>, QueryRejection>,
    ) -> Result<Json<ExerciseReport>, AppError> {
        let user = resources.session_auth.authenticate(&headers)?;
        let (period, since) = Self::period_window(query)?;

        Ok(Json(ExerciseReport {
            period,
            sessions: resources.database.exercise_sessions(user.id, since).await?,
            stats: resources.database.exercise_stats(user.id, since).await?,
        }))
    }

    async fn handle_nutrition(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        query: Result<Query<ReportQuery>, QueryRejection>,
    ) -> Result<Json<NutritionReport>, AppError> {
        let user = resources.session_auth.authenticate(&headers)?;
        let (period, since) = Self::period_window(query)?;

        Ok(Json(NutritionReport {
            period,
            entries: resources.database.nutrition_entries(user.id, since).await?,
            daily: resources.database.daily_nutrition(user.id, since).await?,
        }))
    }
}
