// ABOUTME: Shared test helpers for the HTTP integration tests
// ABOUTME: Exports the oneshot request/response wrappers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod axum_test;
