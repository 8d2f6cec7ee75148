// ABOUTME: Dashboard route handler with activity counters, recent entries and a weekly chart
// ABOUTME: Combines several per-user aggregates into one response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

use crate::database::{ActivityStats, DailyActivity};
use crate::resources::ServerResources;
use crate::services::suggestions::lookback_start;
use athlyze_core::constants::dashboard::{CHART_DAYS, RECENT_ACTIVITIES, UNREAD_SUGGESTIONS};
use athlyze_core::errors::AppError;
use athlyze_core::models::{Activity, SessionUser, Suggestion};
use axum::{extract::State, http::HeaderMap, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

/// Dashboard payload
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Signed-in user
    pub user: SessionUser,
    /// All-time counters plus this week's count
    pub stats: ActivityStats,
    /// Latest activities
    pub recent_activities: Vec<Activity>,
    /// Newest unread suggestions
    pub suggestions: Vec<Suggestion>,
    /// Per-day totals for the last week
    pub chart: Vec<DailyActivity>,
}

/// Dashboard routes
pub struct DashboardRoutes;

impl DashboardRoutes {
    /// Create dashboard routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/dashboard", get(Self::handle_dashboard))
            .with_state(resources)
    }

    async fn handle_dashboard(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Json<DashboardResponse>, AppError> {
        let user = resources.session_auth.authenticate(&headers)?;
        let database = &resources.database;
        let week_start = lookback_start(Utc::now().date_naive(), CHART_DAYS);

        let stats = database.activity_stats(user.id, week_start).await?;
        let recent_activities = database.recent_activities(user.id, RECENT_ACTIVITIES).await?;
        let suggestions = database.unread_suggestions(user.id, UNREAD_SUGGESTIONS).await?;
        let chart = database.daily_activity(user.id, week_start).await?;

        Ok(Json(DashboardResponse {
            user,
            stats,
            recent_activities,
            suggestions,
            chart,
        }))
    }
}
