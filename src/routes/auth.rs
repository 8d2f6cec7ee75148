// ABOUTME: Landing, registration, sign-in and sign-out route handlers
// ABOUTME: Sets and clears the session cookie; guests-only pages redirect signed-in users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

//! Authentication routes
//!
//! - `GET /` - landing payload, or a redirect to the dashboard when signed in
//! - `POST /register` - create an account and sign in
//! - `POST /login` - sign in
//! - `POST /logout` - sign out
//!
//! Successful registration and sign-in set the `auth_token` cookie and also
//! return the token for API clients.

use super::json_body;
use crate::resources::ServerResources;
use crate::security::cookies::{append_set_cookie, clear_session_cookie, session_cookie};
use crate::services::accounts::{self, LoginForm, RegisterForm, SignedIn};
use athlyze_core::constants::auth::SESSION_COOKIE_NAME;
use athlyze_core::constants::service::APP_TITLE;
use athlyze_core::errors::AppError;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

const DASHBOARD_PATH: &str = "/dashboard";

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_landing))
            .route("/register", post(Self::handle_register))
            .route("/login", post(Self::handle_login))
            .route("/logout", post(Self::handle_logout))
            .with_state(resources)
    }

    async fn handle_landing(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Response {
        if resources.session_auth.optional_user(&headers).is_some() {
            return Redirect::to(DASHBOARD_PATH).into_response();
        }

        Json(serde_json::json!({
            "title": APP_TITLE,
            "message": "Track your workouts, meals and body measurements",
            "register": "/register",
            "login": "/login"
        }))
        .into_response()
    }

    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        payload: Result<Json<RegisterForm>, JsonRejection>,
    ) -> Result<Response, AppError> {
        if resources.session_auth.optional_user(&headers).is_some() {
            return Ok(Redirect::to(DASHBOARD_PATH).into_response());
        }

        let form = json_body(payload)?;
        let signed_in = accounts::register(
            &resources.database,
            &resources.auth_manager,
            resources.config.auth.bcrypt_cost,
            form,
        )
        .await?;

        Ok(Self::signed_in_response(&resources, StatusCode::CREATED, signed_in))
    }

    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        payload: Result<Json<LoginForm>, JsonRejection>,
    ) -> Result<Response, AppError> {
        if resources.session_auth.optional_user(&headers).is_some() {
            return Ok(Redirect::to(DASHBOARD_PATH).into_response());
        }

        let form = json_body(payload)?;
        let signed_in = accounts::login(
            &resources.database,
            &resources.auth_manager,
            resources.config.auth.bcrypt_cost,
            form,
        )
        .await?;

        Ok(Self::signed_in_response(&resources, StatusCode::OK, signed_in))
    }

    async fn handle_logout(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = resources.session_auth.authenticate(&headers)?;
        tracing::info!(user_id = %user.id, "User signed out");

        let mut response_headers = HeaderMap::new();
        append_set_cookie(
            &mut response_headers,
            &clear_session_cookie(SESSION_COOKIE_NAME, resources.config.auth.secure_cookies),
        );
        Ok((response_headers, Redirect::to("/")).into_response())
    }

    fn signed_in_response(
        resources: &ServerResources,
        status: StatusCode,
        signed_in: SignedIn,
    ) -> Response {
        let mut response_headers = HeaderMap::new();
        append_set_cookie(
            &mut response_headers,
            &session_cookie(
                SESSION_COOKIE_NAME,
                &signed_in.token,
                resources.auth_manager.session_max_age_secs(),
                resources.config.auth.secure_cookies,
            ),
        );
        (status, response_headers, Json(signed_in)).into_response()
    }
}
