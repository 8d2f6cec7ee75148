// ABOUTME: Integration tests for account, activity and suggestion workflows
// ABOUTME: Runs registration, sign-in, activity logging and analysis against an in-memory database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use athlyze::errors::ErrorCode;
use athlyze::intelligence::SuggestionEngine;
use athlyze::models::{ActivityDetails, ActivityKind, NewActivity, Plan, SuggestionKind};
use athlyze::pagination::PageRequest;
use athlyze::services::accounts::{self, LoginForm, RegisterForm};
use athlyze::services::activities::log_activity;
use athlyze::services::suggestions::generate_suggestions;
use common::{days_ago, log_test_activity};

fn register_form(email: &str) -> RegisterForm {
    RegisterForm {
        name: "Maria Runner".to_owned(),
        email: email.to_owned(),
        password: "secret123".to_owned(),
        confirm_password: "secret123".to_owned(),
        plan: Some("professional".to_owned()),
    }
}

#[tokio::test]
async fn test_register_creates_user_and_welcome_suggestion() {
    let db = common::create_test_database().await.unwrap();
    let auth = common::test_auth_manager();

    let signed_in = accounts::register(&db, &auth, 4, register_form("  Maria@Example.com "))
        .await
        .unwrap();
    assert_eq!(signed_in.user.email, "maria@example.com");
    assert_eq!(signed_in.user.plan, Plan::Professional);

    let session = auth.validate_session(&signed_in.token).unwrap();
    assert_eq!(session.id, signed_in.user.id);

    let stored = db
        .get_user_by_email("maria@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_ne!(stored.password_hash, "secret123");

    let welcome = db.unread_suggestions(stored.id, 3).await.unwrap();
    assert_eq!(welcome.len(), 1);
    assert_eq!(welcome[0].kind, SuggestionKind::General);
    assert!(welcome[0].text.contains("Maria Runner"));
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let db = common::create_test_database().await.unwrap();
    let auth = common::test_auth_manager();

    accounts::register(&db, &auth, 4, register_form("dup@example.com"))
        .await
        .unwrap();
    let err = accounts::register(&db, &auth, 4, register_form("DUP@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
    assert_eq!(db.user_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_login_accepts_only_matching_password() {
    let db = common::create_test_database().await.unwrap();
    let auth = common::test_auth_manager();
    accounts::register(&db, &auth, 4, register_form("login@example.com"))
        .await
        .unwrap();

    let signed_in = accounts::login(
        &db,
        &auth,
        4,
        LoginForm {
            email: "LOGIN@example.com".to_owned(),
            password: "secret123".to_owned(),
        },
    )
    .await
    .unwrap();
    assert_eq!(signed_in.user.name, "Maria Runner");

    let wrong_password = accounts::login(
        &db,
        &auth,
        4,
        LoginForm {
            email: "login@example.com".to_owned(),
            password: "not-it".to_owned(),
        },
    )
    .await
    .unwrap_err();
    let unknown_email = accounts::login(
        &db,
        &auth,
        4,
        LoginForm {
            email: "nobody@example.com".to_owned(),
            password: "secret123".to_owned(),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(wrong_password.code, ErrorCode::AuthInvalid);
    assert_eq!(unknown_email.code, ErrorCode::AuthInvalid);
    assert_eq!(wrong_password.message, unknown_email.message);
}

#[tokio::test]
async fn test_log_activity_survives_suggestion_failure() {
    let db = common::create_test_database().await.unwrap();
    let user = common::create_test_user(&db).await.unwrap();

    sqlx::query("DROP TABLE suggestions")
        .execute(db.pool())
        .await
        .unwrap();

    let activity = log_activity(
        &db,
        &SuggestionEngine::new(),
        &NewActivity::new(
            user.id,
            ActivityKind::Measurement,
            "Morning weigh-in",
            days_ago(0),
            None,
            ActivityDetails::default(),
        ),
    )
    .await
    .unwrap();

    let stored = db.get_activity(activity.id, user.id).await.unwrap().unwrap();
    assert_eq!(stored.description, "Morning weigh-in");
    assert!(db.unread_suggestions(user.id, 10).await.is_err());
}

#[tokio::test]
async fn test_log_activity_stores_follow_up_suggestion() {
    let db = common::create_test_database().await.unwrap();
    let user = common::create_test_user(&db).await.unwrap();
    let engine = SuggestionEngine::new();

    let activity = log_activity(
        &db,
        &engine,
        &NewActivity::new(
            user.id,
            ActivityKind::Exercise,
            "Morning run",
            days_ago(0),
            Some(350),
            ActivityDetails::default(),
        ),
    )
    .await
    .unwrap();
    assert_eq!(activity.user_id, user.id);

    let suggestions = db.unread_suggestions(user.id, 10).await.unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].kind, SuggestionKind::Exercise);
    assert!(suggestions[0].text.contains("first workout of the week"));

    log_activity(
        &db,
        &engine,
        &NewActivity::new(
            user.id,
            ActivityKind::Nutrition,
            "Burger and fries",
            days_ago(0),
            Some(1200),
            ActivityDetails::default(),
        ),
    )
    .await
    .unwrap();
    let latest = db
        .list_suggestions(user.id, Some(SuggestionKind::Nutrition), PageRequest::new(None, 10))
        .await
        .unwrap();
    assert_eq!(latest.total_items, 1);
    assert!(latest.items[0].text.contains("high-calorie meal"));
}

#[tokio::test]
async fn test_generate_suggestions_without_history() {
    let db = common::create_test_database().await.unwrap();
    let user = common::create_test_user(&db).await.unwrap();

    let stored = generate_suggestions(&db, &SuggestionEngine::new(), user.id)
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].kind, SuggestionKind::General);
    assert!(stored[0].text.starts_with("Start by logging"));
}

#[tokio::test]
async fn test_generate_suggestions_ignores_activities_outside_window() {
    let db = common::create_test_database().await.unwrap();
    let user = common::create_test_user(&db).await.unwrap();

    for ago in [1, 3, 5] {
        log_test_activity(&db, user.id, ActivityKind::Exercise, "Running", days_ago(ago), Some(400))
            .await
            .unwrap();
    }
    log_test_activity(&db, user.id, ActivityKind::Nutrition, "Pasta", days_ago(30), Some(900))
        .await
        .unwrap();

    let stored = generate_suggestions(&db, &SuggestionEngine::new(), user.id)
        .await
        .unwrap();
    let kinds: Vec<_> = stored.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SuggestionKind::Exercise,
            SuggestionKind::Nutrition,
            SuggestionKind::Measurement
        ]
    );
    assert!(stored[0].text.contains("vary your routine"));
    assert!(stored[1].text.contains("not logged any meals"));

    let stats = db.suggestion_stats(user.id).await.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.unread, 3);
}
