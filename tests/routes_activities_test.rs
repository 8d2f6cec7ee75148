// ABOUTME: HTTP tests for logging, listing, fetching and deleting activities
// ABOUTME: Covers form validation, filters, pagination fallbacks and ownership checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use athlyze::models::ActivityKind;
use axum::http::StatusCode;
use common::{days_ago, log_test_activity};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};
use uuid::Uuid;

#[tokio::test]
async fn test_create_activity() {
    let resources = common::create_test_resources().await.unwrap();
    let (user, token) = common::create_signed_in_user(&resources).await.unwrap();

    let response = AxumTestRequest::post("/activities")
        .session(&token)
        .json(&json!({
            "kind": "exercise",
            "description": "  Evening run  ",
            "date": days_ago(0).to_string(),
            "calories": "350",
            "duration_minutes": 32.5,
            "distance_km": 6.1,
            "protein_g": 20
        }))
        .send(common::test_router(&resources))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["kind"], "exercise");
    assert_eq!(body["description"], "Evening run");
    assert_eq!(body["calories"], 350);
    assert_eq!(body["details"], json!({ "duration_minutes": 32.5, "distance_km": 6.1 }));
    assert_eq!(body["user_id"], user.id.to_string());

    let suggestions = resources
        .database
        .unread_suggestions(user.id, 10)
        .await
        .unwrap();
    assert_eq!(suggestions.len(), 1);
}

#[tokio::test]
async fn test_create_activity_without_calories() {
    let resources = common::create_test_resources().await.unwrap();
    let (_, token) = common::create_signed_in_user(&resources).await.unwrap();

    let response = AxumTestRequest::post("/activities")
        .session(&token)
        .json(&json!({
            "kind": "measurement",
            "description": "Weekly weigh-in",
            "date": days_ago(1).to_string(),
            "calories": "",
            "weight_kg": 71.4
        }))
        .send(common::test_router(&resources))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert!(body["calories"].is_null());
    assert_eq!(body["details"]["weight_kg"], 71.4);
}

#[tokio::test]
async fn test_create_activity_with_string_metrics() {
    let resources = common::create_test_resources().await.unwrap();
    let (_, token) = common::create_signed_in_user(&resources).await.unwrap();

    let response = AxumTestRequest::post("/activities")
        .session(&token)
        .json(&json!({
            "kind": "measurement",
            "description": "Monthly check",
            "date": days_ago(0).to_string(),
            "calories": "",
            "weight_kg": "70.5",
            "muscle_mass_kg": ""
        }))
        .send(common::test_router(&resources))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["details"], json!({ "weight_kg": 70.5 }));

    let invalid = AxumTestRequest::post("/activities")
        .session(&token)
        .json(&json!({
            "kind": "measurement",
            "description": "Monthly check",
            "date": days_ago(0).to_string(),
            "weight_kg": "heavy"
        }))
        .send(common::test_router(&resources))
        .await;
    invalid.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = invalid.json();
    assert_eq!(body["error"]["details"]["errors"][0]["field"], "weight_kg");
}

#[tokio::test]
async fn test_create_activity_reports_every_invalid_field() {
    let resources = common::create_test_resources().await.unwrap();
    let (user, token) = common::create_signed_in_user(&resources).await.unwrap();

    let response = AxumTestRequest::post("/activities")
        .session(&token)
        .json(&json!({
            "kind": "dancing",
            "description": "ab",
            "date": "31/12/2025",
            "calories": 9000
        }))
        .send(common::test_router(&resources))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    let fields: Vec<&str> = body["error"]["details"]["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["kind", "description", "date", "calories"]);

    let stats = resources
        .database
        .activity_stats(user.id, days_ago(7))
        .await
        .unwrap();
    assert_eq!(stats.total, 0);
}

#[tokio::test]
async fn test_calorie_bounds() {
    let resources = common::create_test_resources().await.unwrap();
    let (_, token) = common::create_signed_in_user(&resources).await.unwrap();

    for (calories, expected) in [
        (json!(0), StatusCode::CREATED),
        (json!(5000), StatusCode::CREATED),
        (json!(-1), StatusCode::BAD_REQUEST),
        (json!(5001), StatusCode::BAD_REQUEST),
        (json!("many"), StatusCode::BAD_REQUEST),
        (json!(12.5), StatusCode::BAD_REQUEST),
    ] {
        let response = AxumTestRequest::post("/activities")
            .session(&token)
            .json(&json!({
                "kind": "nutrition",
                "description": "Big plate",
                "date": days_ago(0).to_string(),
                "calories": calories
            }))
            .send(common::test_router(&resources))
            .await;
        response.assert_status(expected);
    }
}

#[tokio::test]
async fn test_list_activities_with_filters() {
    let resources = common::create_test_resources().await.unwrap();
    let (user, token) = common::create_signed_in_user(&resources).await.unwrap();
    let db = &resources.database;

    log_test_activity(db, user.id, ActivityKind::Exercise, "Ride", days_ago(10), Some(700))
        .await
        .unwrap();
    log_test_activity(db, user.id, ActivityKind::Exercise, "Run", days_ago(2), Some(400))
        .await
        .unwrap();
    log_test_activity(db, user.id, ActivityKind::Nutrition, "Salad", days_ago(2), Some(300))
        .await
        .unwrap();

    let response = AxumTestRequest::get(&format!(
        "/activities?kind=exercise&date_from={}&page=",
        days_ago(5)
    ))
    .session(&token)
    .send(common::test_router(&resources))
    .await;
    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["activities"]["total_items"], 1);
    assert_eq!(body["activities"]["page"], 1);
    assert_eq!(body["activities"]["items"][0]["description"], "Run");
    assert_eq!(body["filters"]["kind"], "exercise");

    let everything = AxumTestRequest::get("/activities?page=abc&kind=")
        .session(&token)
        .send(common::test_router(&resources))
        .await;
    everything.assert_status(StatusCode::OK);
    let body: Value = everything.json();
    assert_eq!(body["activities"]["total_items"], 3);
    assert_eq!(body["activities"]["page"], 1);
}

#[tokio::test]
async fn test_list_activities_rejects_bad_filters() {
    let resources = common::create_test_resources().await.unwrap();
    let (_, token) = common::create_signed_in_user(&resources).await.unwrap();

    let response = AxumTestRequest::get("/activities?kind=yoga&date_to=yesterday")
        .session(&token)
        .send(common::test_router(&resources))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_INPUT");
}

#[tokio::test]
async fn test_get_and_delete_respect_ownership() {
    let resources = common::create_test_resources().await.unwrap();
    let (owner, owner_token) = common::create_signed_in_user(&resources).await.unwrap();
    let (_, other_token) = common::create_signed_in_user(&resources).await.unwrap();

    let id = log_test_activity(
        &resources.database,
        owner.id,
        ActivityKind::Nutrition,
        "Porridge",
        days_ago(0),
        Some(320),
    )
    .await
    .unwrap();
    let path = format!("/activities/{id}");

    let foreign = AxumTestRequest::get(&path)
        .session(&other_token)
        .send(common::test_router(&resources))
        .await;
    foreign.assert_status(StatusCode::NOT_FOUND);

    let foreign_delete = AxumTestRequest::delete(&path)
        .session(&other_token)
        .send(common::test_router(&resources))
        .await;
    foreign_delete.assert_status(StatusCode::NOT_FOUND);

    let own = AxumTestRequest::get(&path)
        .session(&owner_token)
        .send(common::test_router(&resources))
        .await;
    own.assert_status(StatusCode::OK);
    let body: Value = own.json();
    assert_eq!(body["description"], "Porridge");

    let deleted = AxumTestRequest::post(&format!("/activities/{id}/delete"))
        .session(&owner_token)
        .send(common::test_router(&resources))
        .await;
    deleted.assert_status(StatusCode::NO_CONTENT);

    let gone = AxumTestRequest::delete(&path)
        .session(&owner_token)
        .send(common::test_router(&resources))
        .await;
    gone.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_and_unknown_ids_are_not_found() {
    let resources = common::create_test_resources().await.unwrap();
    let (_, token) = common::create_signed_in_user(&resources).await.unwrap();

    for path in [
        "/activities/not-a-uuid".to_owned(),
        format!("/activities/{}", Uuid::new_v4()),
    ] {
        let response = AxumTestRequest::get(&path)
            .session(&token)
            .send(common::test_router(&resources))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.error_code(), "RESOURCE_NOT_FOUND");
    }
}
