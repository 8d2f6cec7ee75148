// ABOUTME: Route module organization for the Athlyze HTTP API
// ABOUTME: Domain routers plus the request decoding helpers they share
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

//! Route module for Athlyze
//!
//! Each domain module owns its route table and thin handlers that delegate to
//! [`crate::services`] or [`crate::database`]. Every endpoint answers with
//! JSON; errors use the shared [`athlyze_core::errors::ErrorResponse`] body.

/// Activity logging and listing routes
pub mod activities;
/// Landing, registration, sign-in and sign-out routes
pub mod auth;
/// Dashboard summary route
pub mod dashboard;
/// Health check and readiness routes
pub mod health;
/// Report routes
pub mod reports;
/// Suggestion routes
pub mod suggestions;

pub use activities::ActivityRoutes;
pub use auth::AuthRoutes;
pub use dashboard::DashboardRoutes;
pub use health::HealthRoutes;
pub use reports::ReportRoutes;
pub use suggestions::SuggestionRoutes;

use athlyze_core::errors::{AppError, AppResult};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Query};
use uuid::Uuid;

/// Unwrap a JSON body, turning extractor rejections into `INVALID_INPUT`
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| {
            AppError::invalid_input(format!("Invalid request body: {}", rejection.body_text()))
        })
}

/// Unwrap query parameters, turning extractor rejections into `INVALID_INPUT`
pub(crate) fn query_params<T>(params: Result<Query<T>, QueryRejection>) -> AppResult<T> {
    params
        .map(|Query(value)| value)
        .map_err(|rejection| {
            AppError::invalid_input(format!("Invalid query parameters: {}", rejection.body_text()))
        })
}

/// Parse a path identifier; malformed ids are reported as missing resources
pub(crate) fn path_id(raw: &str, resource: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found(resource))
}

/// Treat empty or whitespace-only query values as absent
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// JSON 404 for paths no router claims
pub async fn fallback_handler() -> AppError {
    AppError::not_found("Page")
}
