// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, server resources, users and session helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `athlyze`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use athlyze::{
    auth::AuthManager,
    config::environment::ServerConfig,
    database::Database,
    models::{ActivityDetails, ActivityKind, NewActivity, Plan, SessionUser, User},
    resources::ServerResources,
    server::HttpServer,
};
use axum::Router;
use chrono::NaiveDate;
use std::sync::{Arc, Once};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Secret used to sign every session in tests
pub const TEST_JWT_SECRET: &[u8] = b"athlyze-test-secret";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new("sqlite::memory:").await?)
}

/// Configuration with the cheapest bcrypt cost
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.auth.bcrypt_cost = 4;
    config
}

/// Session manager shared by tests and the resources under test
pub fn test_auth_manager() -> AuthManager {
    AuthManager::new(TEST_JWT_SECRET, 24)
}

/// Complete server resources over a fresh in-memory database
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    Ok(Arc::new(ServerResources::new(
        database,
        test_auth_manager(),
        Arc::new(test_config()),
    )))
}

/// Full application router over the given resources
pub fn test_router(resources: &Arc<ServerResources>) -> Router {
    HttpServer::router(resources)
}

/// Store a user directly, bypassing registration
pub async fn create_test_user(database: &Database) -> Result<User> {
    let user = User::new(
        "Test Athlete".to_owned(),
        format!("athlete_{}@example.com", Uuid::new_v4().simple()),
        "$2b$04$not-a-real-hash".to_owned(),
        Plan::Starter,
    );
    database.create_user(&user).await?;
    Ok(user)
}

/// Store a user and sign a session token for it
pub async fn create_signed_in_user(resources: &ServerResources) -> Result<(User, String)> {
    let user = create_test_user(&resources.database).await?;
    let session = resources
        .auth_manager
        .issue_session(&SessionUser::from(&user))?;
    Ok((user, session.token))
}

/// Store one activity of the given kind
pub async fn log_test_activity(
    database: &Database,
    user_id: Uuid,
    kind: ActivityKind,
    description: &str,
    date: NaiveDate,
    calories: Option<i64>,
) -> Result<Uuid> {
    let activity = database
        .create_activity(&NewActivity::new(
            user_id,
            kind,
            description,
            date,
            calories,
            ActivityDetails::default(),
        ))
        .await?;
    Ok(activity.id)
}

/// Store a measurement with a weight value
pub async fn log_test_weight(
    database: &Database,
    user_id: Uuid,
    date: NaiveDate,
    weight_kg: Option<f64>,
) -> Result<Uuid> {
    let details = ActivityDetails {
        weight_kg,
        ..ActivityDetails::default()
    };
    let activity = database
        .create_activity(&NewActivity::new(
            user_id,
            ActivityKind::Measurement,
            "Morning weigh-in",
            date,
            None,
            details,
        ))
        .await?;
    Ok(activity.id)
}

/// Today in UTC, as the server computes it
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// A day `n` days before today
pub fn days_ago(n: i64) -> NaiveDate {
    today() - chrono::Duration::days(n)
}
