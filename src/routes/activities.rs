// ABOUTME: Activity route handlers for logging, listing, viewing and deleting activities
// ABOUTME: Listing accepts optional kind and date range filters with 10 entries per page
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

//! Activity routes
//!
//! - `GET /activities` - filtered, paginated listing
//! - `POST /activities` - log an activity (triggers a suggestion)
//! - `GET /activities/:id` - one activity
//! - `POST /activities/:id/delete`, `DELETE /activities/:id` - remove one activity

use super::{json_body, non_empty, path_id, query_params};
use crate::database::ActivityFilter;
use crate::resources::ServerResources;
use crate::services::activities::{log_activity, ActivityForm};
use athlyze_core::constants::pagination::PAGE_SIZE;
use athlyze_core::errors::{AppError, AppResult, FieldError};
use athlyze_core::models::{Activity, ActivityKind};
use athlyze_core::pagination::{Page, PageRequest};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Raw listing query; every value is optional and blank means absent
#[derive(Debug, Default, Deserialize)]
pub struct ActivityListQuery {
    /// Page number
    pub page: Option<String>,
    /// Activity kind
    pub kind: Option<String>,
    /// First day (inclusive)
    pub date_from: Option<String>,
    /// Last day (inclusive)
    pub date_to: Option<String>,
}

impl ActivityListQuery {
    /// Page request; unparseable page numbers fall back to the first page
    #[must_use]
    pub fn page_request(&self) -> PageRequest {
        let page = non_empty(self.page.as_deref()).and_then(|p| p.parse::<i64>().ok());
        PageRequest::new(page, PAGE_SIZE)
    }

    /// Typed filter
    ///
    /// # Errors
    ///
    /// Returns a validation error naming each malformed filter
    pub fn filter(&self) -> AppResult<ActivityFilter> {
        let mut errors = Vec::new();

        let kind = match non_empty(self.kind.as_deref()) {
            Some(raw) => raw.parse::<ActivityKind>().map_or_else(
                |_| {
                    errors.push(FieldError::new("kind", "Invalid activity type"));
                    None
                },
                Some,
            ),
            None => None,
        };
        let date_from = parse_date_filter("date_from", self.date_from.as_deref(), &mut errors);
        let date_to = parse_date_filter("date_to", self.date_to.as_deref(), &mut errors);

        if errors.is_empty() {
            Ok(ActivityFilter {
                kind,
                date_from,
                date_to,
            })
        } else {
            Err(AppError::validation(errors))
        }
    }
}

fn parse_date_filter(
    field: &str,
    raw: Option<&str>,
    errors: &mut Vec<FieldError>,
) -> Option<NaiveDate> {
    let raw = non_empty(raw)?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_or_else(
        |_| {
            errors.push(FieldError::new(field, "Date must be a valid date (YYYY-MM-DD)"));
            None
        },
        Some,
    )
}

/// Listing payload
#[derive(Debug, Serialize)]
pub struct ActivityListResponse {
    /// Matching activities
    pub activities: Page<Activity>,
    /// Filters that were applied
    pub filters: ActivityFilter,
}

/// Activity routes
pub struct ActivityRoutes;

impl ActivityRoutes {
    /// Create all activity routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/activities",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/activities/:id",
                get(Self::handle_get).delete(Self::handle_delete),
            )
            .route("/activities/:id/delete", post(Self::handle_delete))
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        query: Result<Query<ActivityListQuery>, QueryRejection>,
    ) -> Result<Json<ActivityListResponse>, AppError> {
        let user = resources.session_auth.authenticate(&headers)?;
        let query = query_params(query)?;
        let filter = query.filter()?;

        let activities = resources
            .database
            .list_activities(user.id, &filter, query.page_request())
            .await?;

        Ok(Json(ActivityListResponse {
            activities,
            filters: filter,
        }))
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        payload: Result<Json<ActivityForm>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let user = resources.session_auth.authenticate(&headers)?;
        let new_activity = json_body(payload)?.validate(user.id)?;

        let activity = log_activity(
            &resources.database,
            &resources.suggestion_engine,
            &new_activity,
        )
        .await?;

        Ok((StatusCode::CREATED, Json(activity)).into_response())
    }

    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Json<Activity>, AppError> {
        let user = resources.session_auth.authenticate(&headers)?;
        let id = path_id(&id, "Activity")?;

        resources
            .database
            .get_activity(id, user.id)
            .await?
            .map(Json)
            .ok_or_else(|| AppError::not_found("Activity"))
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<StatusCode, AppError> {
        let user = resources.session_auth.authenticate(&headers)?;
        let id = path_id(&id, "Activity")?;

        if resources.database.delete_activity(id, user.id).await? {
            tracing::info!(user_id = %user.id, activity_id = %id, "Activity deleted");
            Ok(StatusCode::NO_CONTENT)
        } else {
            Err(AppError::not_found("Activity"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(kind: &str, date_from: &str, date_to: &str, page: &str) -> ActivityListQuery {
        ActivityListQuery {
            page: Some(page.to_owned()),
            kind: Some(kind.to_owned()),
            date_from: Some(date_from.to_owned()),
            date_to: Some(date_to.to_owned()),
        }
    }

    #[test]
    fn test_blank_filters_mean_no_filter() {
        let q = query("", " ", "", "");
        assert_eq!(q.filter().unwrap(), ActivityFilter::default());
        assert_eq!(q.page_request().page, 1);
    }

    #[test]
    fn test_filters_are_parsed() {
        let q = query("nutrition", "2025-01-01", "2025-01-31", "3");
        let filter = q.filter().unwrap();
        assert_eq!(filter.kind, Some(ActivityKind::Nutrition));
        assert_eq!(filter.date_from, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(filter.date_to, NaiveDate::from_ymd_opt(2025, 1, 31));
        assert_eq!(q.page_request().offset(), 20);
    }

    #[test]
    fn test_malformed_filters_are_rejected() {
        let error = query("dance", "yesterday", "2025-02-30", "x")
            .filter()
            .unwrap_err();
        assert_eq!(error.http_status(), 400);
        assert_eq!(error.details["errors"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_bad_page_falls_back_to_first() {
        assert_eq!(query("", "", "", "abc").page_request().page, 1);
        assert_eq!(query("", "", "", "-4").page_request().page, 1);
    }
}
