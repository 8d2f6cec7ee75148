// ABOUTME: Suggestion route handlers for listing, generating, re-flagging and deleting tips
// ABOUTME: Listing a page marks its suggestions as read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

//! Suggestion routes
//!
//! - `GET /suggestions` - page of suggestions plus counters
//! - `POST /suggestions/generate` - analyze the last two weeks
//! - `POST /suggestions/:id/unread` - flag one suggestion unread again
//! - `POST /suggestions/:id/delete` - remove one suggestion

use super::{non_empty, path_id, query_params};
use crate::database::SuggestionStats;
use crate::resources::ServerResources;
use crate::services::suggestions::generate_suggestions;
use athlyze_core::constants::pagination::PAGE_SIZE;
use athlyze_core::errors::{AppError, FieldError};
use athlyze_core::models::{Suggestion, SuggestionKind};
use athlyze_core::pagination::{Page, PageRequest};
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Listing query
#[derive(Debug, Default, Deserialize)]
pub struct SuggestionListQuery {
    /// Suggestion kind
    pub kind: Option<String>,
    /// Page number
    pub page: Option<String>,
}

/// Listing payload
#[derive(Debug, Serialize)]
pub struct SuggestionListResponse {
    /// Requested page, reported as read
    pub suggestions: Page<Suggestion>,
    /// Counters after marking the page read
    pub stats: SuggestionStats,
    /// Kind filter that was applied
    pub kind: Option<SuggestionKind>,
}

/// Generation payload
#[derive(Debug, Serialize)]
pub struct GeneratedSuggestions {
    /// Number of stored suggestions
    pub created: usize,
    /// The stored suggestions
    pub suggestions: Vec<Suggestion>,
}

/// Suggestion routes
pub struct SuggestionRoutes;

impl SuggestionRoutes {
    /// Create all suggestion routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/suggestions", get(Self::handle_list))
            .route("/suggestions/generate", post(Self::handle_generate))
            .route("/suggestions/:id/unread", post(Self::handle_mark_unread))
            .route("/suggestions/:id/delete", post(Self::handle_delete))
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        query: Result<Query<SuggestionListQuery>, QueryRejection>,
    ) -> Result<Json<SuggestionListResponse>, AppError> {
        let user = resources.session_auth.authenticate(&headers)?;
        let query = query_params(query)?;

        let kind = non_empty(query.kind.as_deref())
            .map(|raw| {
                raw.parse::<SuggestionKind>().map_err(|_| {
                    AppError::validation(vec![FieldError::new("kind", "Invalid suggestion type")])
                })
            })
            .transpose()?;
        let page = PageRequest::new(
            non_empty(query.page.as_deref()).and_then(|p| p.parse::<i64>().ok()),
            PAGE_SIZE,
        );

        let listed = resources
            .database
            .list_suggestions(user.id, kind, page)
            .await?;

        let unread_ids: Vec<Uuid> = listed
            .items
            .iter()
            .filter(|s| !s.is_read)
            .map(|s| s.id)
            .collect();
        resources
            .database
            .mark_suggestions_read(user.id, &unread_ids)
            .await?;

        let stats = resources.database.suggestion_stats(user.id).await?;
        let suggestions = listed.map(|mut suggestion| {
            suggestion.is_read = true;
            suggestion
        });

        Ok(Json(SuggestionListResponse {
            suggestions,
            stats,
            kind,
        }))
    }

    async fn handle_generate(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = resources.session_auth.authenticate(&headers)?;
        let suggestions =
            generate_suggestions(&resources.database, &resources.suggestion_engine, user.id)
                .await?;

        let body = GeneratedSuggestions {
            created: suggestions.len(),
            suggestions,
        };
        Ok((StatusCode::CREATED, Json(body)).into_response())
    }

    async fn handle_mark_unread(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Json<serde_json::Value>, AppError> {
        let user = resources.session_auth.authenticate(&headers)?;
        let id = path_id(&id, "Suggestion")?;

        let updated = resources
            .database
            .mark_suggestion_unread(id, user.id)
            .await?;
        tracing::debug!(user_id = %user.id, suggestion_id = %id, updated, "Suggestion marked unread");

        Ok(Json(serde_json::json!({ "success": true })))
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Json<serde_json::Value>, AppError> {
        let user = resources.session_auth.authenticate(&headers)?;
        let id = path_id(&id, "Suggestion")?;

        if resources.database.delete_suggestion(id, user.id).await? {
            Ok(Json(serde_json::json!({ "success": true })))
        } else {
            Err(AppError::not_found("Suggestion"))
        }
    }
}
