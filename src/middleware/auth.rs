// ABOUTME: Session authentication for HTTP requests from cookie or bearer token
// ABOUTME: Resolves the signed-in user and distinguishes missing from invalid sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

use crate::auth::AuthManager;
use crate::security::cookies::get_cookie_value;
use athlyze_core::constants::auth::SESSION_COOKIE_NAME;
use athlyze_core::errors::{AppError, AppResult};
use athlyze_core::models::SessionUser;
use axum::http::{header, HeaderMap};
use std::sync::Arc;

/// Authenticates requests against the session token
#[derive(Clone)]
pub struct SessionAuth {
    auth_manager: Arc<AuthManager>,
}

impl SessionAuth {
    /// Create session authentication over `auth_manager`
    #[must_use]
    pub const fn new(auth_manager: Arc<AuthManager>) -> Self {
        Self { auth_manager }
    }

    /// Resolve the signed-in user
    ///
    /// The session cookie is preferred; `Authorization: Bearer` is the
    /// fallback for API clients.
    ///
    /// # Errors
    ///
    /// Returns `AUTH_REQUIRED` when no token is presented and `AUTH_INVALID`
    /// when the token does not validate
    #[tracing::instrument(skip(self, headers), fields(auth_method = tracing::field::Empty, user_id = tracing::field::Empty))]
    pub fn authenticate(&self, headers: &HeaderMap) -> AppResult<SessionUser> {
        let (token, method) = if let Some(token) = get_cookie_value(headers, SESSION_COOKIE_NAME) {
            (token, "cookie")
        } else if let Some(token) = bearer_token(headers) {
            (token, "bearer")
        } else {
            return Err(AppError::auth_required());
        };

        let span = tracing::Span::current();
        span.record("auth_method", method);

        let user = self.auth_manager.validate_session(&token).inspect_err(|e| {
            tracing::warn!("Session authentication failed via {method}: {}", e.message);
        })?;
        span.record("user_id", user.id.to_string());
        Ok(user)
    }

    /// Resolve the signed-in user when a valid session is present
    ///
    /// Used by guest-only endpoints; invalid tokens count as no session.
    #[must_use]
    pub fn optional_user(&self, headers: &HeaderMap) -> Option<SessionUser> {
        self.authenticate(headers).ok()
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}
