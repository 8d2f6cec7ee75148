// ABOUTME: HTTP tests for reports, suggestions, health probes and the not-found fallback
// ABOUTME: Verifies period validation, read tracking on listing and suggestion generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use athlyze::models::{ActivityKind, NewSuggestion, SuggestionKind};
use axum::http::StatusCode;
use common::{days_ago, log_test_activity, log_test_weight};
use helpers::axum_test::AxumTestRequest;
use serde_json::Value;
use uuid::Uuid;

#[tokio::test]
async fn test_health_and_ready() {
    let resources = common::create_test_resources().await.unwrap();

    let health = AxumTestRequest::get("/health")
        .send(common::test_router(&resources))
        .await;
    health.assert_status(StatusCode::OK);
    let body: Value = health.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "athlyze");
    assert!(health.header("x-request-id").is_some());

    let ready = AxumTestRequest::get("/ready")
        .send(common::test_router(&resources))
        .await;
    ready.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let resources = common::create_test_resources().await.unwrap();

    let response = AxumTestRequest::get("/health")
        .header("x-request-id", "trace-me-123")
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.header("x-request-id").as_deref(), Some("trace-me-123"));
}

#[tokio::test]
async fn test_unknown_path_is_json_not_found() {
    let resources = common::create_test_resources().await.unwrap();

    let response = AxumTestRequest::get("/no/such/page")
        .send(common::test_router(&resources))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
    assert_eq!(body["error"]["message"], "Page not found");
}

#[tokio::test]
async fn test_dashboard_limits_and_chart_window() {
    let resources = common::create_test_resources().await.unwrap();
    let (user, token) = common::create_signed_in_user(&resources).await.unwrap();
    let db = &resources.database;

    for day in 0..=7 {
        log_test_activity(
            db,
            user.id,
            ActivityKind::Exercise,
            &format!("Workout {day}"),
            days_ago(day),
            Some(100),
        )
        .await
        .unwrap();
    }
    log_test_activity(db, user.id, ActivityKind::Nutrition, "Old lunch", days_ago(10), Some(500))
        .await
        .unwrap();

    for text in ["Tip 1", "Tip 2", "Tip 3", "Tip 4"] {
        db.create_suggestion(user.id, &NewSuggestion::new(SuggestionKind::General, text))
            .await
            .unwrap();
    }

    let response = AxumTestRequest::get("/dashboard")
        .session(&token)
        .send(common::test_router(&resources))
        .await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();

    assert_eq!(body["stats"]["total"], 9);
    assert_eq!(body["stats"]["exercises"], 8);
    assert_eq!(body["stats"]["meals"], 1);
    assert_eq!(body["stats"]["this_week"], 8);

    let recent = body["recent_activities"].as_array().unwrap();
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0]["description"], "Workout 0");
    assert_eq!(recent[4]["description"], "Workout 4");

    let texts: Vec<&str> = body["suggestions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["Tip 4", "Tip 3", "Tip 2"]);

    let chart = body["chart"].as_array().unwrap();
    assert_eq!(chart.len(), 8);
    assert_eq!(chart[0]["date"], days_ago(7).to_string());
    assert_eq!(chart[7]["date"], days_ago(0).to_string());
    assert!(chart
        .iter()
        .all(|day| day["total"] == 1 && day["exercises"] == 1 && day["calories"] == 100));
}

#[tokio::test]
async fn test_overview_report() {
    let resources = common::create_test_resources().await.unwrap();
    let (user, token) = common::create_signed_in_user(&resources).await.unwrap();
    let db = &resources.database;

    log_test_activity(db, user.id, ActivityKind::Exercise, "Rowing", days_ago(3), Some(450))
        .await
        .unwrap();
    log_test_activity(db, user.id, ActivityKind::Exercise, "Rowing", days_ago(40), Some(500))
        .await
        .unwrap();
    log_test_activity(db, user.id, ActivityKind::Nutrition, "Soup", days_ago(3), Some(250))
        .await
        .unwrap();
    log_test_weight(db, user.id, days_ago(3), Some(68.2)).await.unwrap();

    let response = AxumTestRequest::get("/reports")
        .session(&token)
        .send(common::test_router(&resources))
        .await;
    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["period"], 30);
    assert_eq!(body["stats"]["total"], 3);
    assert_eq!(body["stats"]["calories_burned"], 450);
    assert_eq!(body["stats"]["calories_consumed"], 250);
    assert_eq!(body["weight"][0]["weight_kg"], 68.2);
    assert_eq!(body["top_exercises"][0]["description"], "Rowing");
    assert_eq!(body["top_exercises"][0]["frequency"], 1);

    let longer = AxumTestRequest::get("/reports?period=60")
        .session(&token)
        .send(common::test_router(&resources))
        .await;
    let body: Value = longer.json();
    assert_eq!(body["period"], 60);
    assert_eq!(body["stats"]["total"], 4);
}

#[tokio::test]
async fn test_report_period_validation() {
    let resources = common::create_test_resources().await.unwrap();
    let (_, token) = common::create_signed_in_user(&resources).await.unwrap();

    for path in [
        "/reports?period=0",
        "/reports?period=400",
        "/reports/exercises?period=abc",
        "/reports/nutrition?period=7%20days",
    ] {
        let response = AxumTestRequest::get(path)
            .session(&token)
            .send(common::test_router(&resources))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.error_code(), "INVALID_INPUT");
    }
}

#[tokio::test]
async fn test_exercise_and_nutrition_reports() {
    let resources = common::create_test_resources().await.unwrap();
    let (user, token) = common::create_signed_in_user(&resources).await.unwrap();
    let db = &resources.database;

    log_test_activity(db, user.id, ActivityKind::Exercise, "Hiking", days_ago(5), Some(600))
        .await
        .unwrap();
    log_test_activity(db, user.id, ActivityKind::Nutrition, "Trail mix", days_ago(5), Some(400))
        .await
        .unwrap();

    let exercises = AxumTestRequest::get("/reports/exercises?period=7")
        .session(&token)
        .send(common::test_router(&resources))
        .await;
    exercises.assert_status(StatusCode::OK);
    let body: Value = exercises.json();
    assert_eq!(body["period"], 7);
    assert_eq!(body["sessions"].as_array().unwrap().len(), 1);
    assert_eq!(body["stats"][0]["sessions"], 1);

    let nutrition = AxumTestRequest::get("/reports/nutrition?period=7")
        .session(&token)
        .send(common::test_router(&resources))
        .await;
    nutrition.assert_status(StatusCode::OK);
    let body: Value = nutrition.json();
    assert_eq!(body["entries"][0]["description"], "Trail mix");
    assert_eq!(body["daily"][0]["total_calories"], 400);

    let short = AxumTestRequest::get("/reports/nutrition?period=1")
        .session(&token)
        .send(common::test_router(&resources))
        .await;
    let body: Value = short.json();
    assert!(body["entries"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_listing_suggestions_marks_them_read() {
    let resources = common::create_test_resources().await.unwrap();
    let (user, token) = common::create_signed_in_user(&resources).await.unwrap();
    resources
        .database
        .create_suggestions(
            user.id,
            &[
                NewSuggestion::new(SuggestionKind::Exercise, "Stretch after runs"),
                NewSuggestion::new(SuggestionKind::Nutrition, "Drink more water"),
            ],
        )
        .await
        .unwrap();

    let response = AxumTestRequest::get("/suggestions")
        .session(&token)
        .send(common::test_router(&resources))
        .await;
    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    let items = body["suggestions"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|s| s["is_read"] == true));
    assert_eq!(body["stats"]["total"], 2);
    assert_eq!(body["stats"]["unread"], 0);

    let filtered = AxumTestRequest::get("/suggestions?kind=nutrition")
        .session(&token)
        .send(common::test_router(&resources))
        .await;
    let body: Value = filtered.json();
    assert_eq!(body["kind"], "nutrition");
    assert_eq!(body["suggestions"]["total_items"], 1);

    let invalid = AxumTestRequest::get("/suggestions?kind=sleep")
        .session(&token)
        .send(common::test_router(&resources))
        .await;
    invalid.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_unread_and_delete_suggestions() {
    let resources = common::create_test_resources().await.unwrap();
    let (user, token) = common::create_signed_in_user(&resources).await.unwrap();
    let (_, other_token) = common::create_signed_in_user(&resources).await.unwrap();

    let generated = AxumTestRequest::post("/suggestions/generate")
        .session(&token)
        .send(common::test_router(&resources))
        .await;
    generated.assert_status(StatusCode::CREATED);
    let body: Value = generated.json();
    assert_eq!(body["created"], 1);
    let id = body["suggestions"][0]["id"].as_str().unwrap().to_owned();

    resources
        .database
        .mark_suggestions_read(user.id, &[id.parse::<Uuid>().unwrap()])
        .await
        .unwrap();
    let unread = AxumTestRequest::post(&format!("/suggestions/{id}/unread"))
        .session(&token)
        .send(common::test_router(&resources))
        .await;
    unread.assert_status(StatusCode::OK);
    let body: Value = unread.json();
    assert_eq!(body["success"], true);
    assert_eq!(
        resources
            .database
            .suggestion_stats(user.id)
            .await
            .unwrap()
            .unread,
        1
    );

    let foreign_delete = AxumTestRequest::post(&format!("/suggestions/{id}/delete"))
        .session(&other_token)
        .send(common::test_router(&resources))
        .await;
    foreign_delete.assert_status(StatusCode::NOT_FOUND);

    let deleted = AxumTestRequest::post(&format!("/suggestions/{id}/delete"))
        .session(&token)
        .send(common::test_router(&resources))
        .await;
    deleted.assert_status(StatusCode::OK);
    assert_eq!(
        resources
            .database
            .suggestion_stats(user.id)
            .await
            .unwrap()
            .total,
        0
    );
}
