// ABOUTME: Integration tests for user storage
// ABOUTME: Covers creation, lookups by id and email, and duplicate email handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use athlyze::errors::ErrorCode;
use athlyze::models::{Plan, User};
use uuid::Uuid;

fn sample_user(email: &str) -> User {
    User::new(
        "Test User".to_owned(),
        email.to_owned(),
        "hashed_password".to_owned(),
        Plan::Professional,
    )
}

#[tokio::test]
async fn test_create_and_get_user() {
    let db = common::create_test_database()
        .await
        .expect("Failed to create test database");
    let user = sample_user("runner@example.com");

    let user_id = db.create_user(&user).await.expect("Failed to create user");
    assert_eq!(user_id, user.id);

    let retrieved = db
        .get_user(user.id)
        .await
        .expect("Failed to get user")
        .expect("User not found");
    assert_eq!(retrieved.email, "runner@example.com");
    assert_eq!(retrieved.name, "Test User");
    assert_eq!(retrieved.plan, Plan::Professional);
    assert_eq!(retrieved.password_hash, "hashed_password");
    assert!(retrieved.is_active);

    assert!(db.get_user(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_email_lookup_is_case_insensitive() {
    let db = common::create_test_database().await.unwrap();
    db.create_user(&sample_user("cyclist@example.com"))
        .await
        .unwrap();

    let found = db
        .get_user_by_email("Cyclist@Example.COM")
        .await
        .unwrap()
        .expect("User not found by mixed-case email");
    assert_eq!(found.email, "cyclist@example.com");

    assert!(db.email_exists("CYCLIST@example.com").await.unwrap());
    assert!(!db.email_exists("swimmer@example.com").await.unwrap());
}

#[tokio::test]
async fn test_inactive_user_hidden_from_active_lookup() {
    let db = common::create_test_database().await.unwrap();
    let mut user = sample_user("inactive@example.com");
    user.is_active = false;
    db.create_user(&user).await.unwrap();

    assert!(db
        .get_user_by_email("inactive@example.com")
        .await
        .unwrap()
        .is_some());
    assert!(db
        .get_active_user_by_email("inactive@example.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let db = common::create_test_database().await.unwrap();
    db.create_user(&sample_user("dup@example.com")).await.unwrap();

    let err = db
        .create_user(&sample_user("dup@example.com"))
        .await
        .expect_err("Duplicate email must be rejected");
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
    assert_eq!(db.user_count().await.unwrap(), 1);
}
