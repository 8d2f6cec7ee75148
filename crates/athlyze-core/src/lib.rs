// ABOUTME: Core types and constants for the Athlyze fitness tracking service
// ABOUTME: Foundation crate with error handling, domain models, pagination, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

#![deny(unsafe_code)]

//! # Athlyze Core
//!
//! Foundation crate providing shared types and constants for the Athlyze
//! service. It has no knowledge of HTTP routing or SQL; integrations with
//! axum and sqlx are feature-gated.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Users, activities, suggestions and session identity
//! - **pagination**: Offset pagination for listing endpoints

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (User, Activity, Suggestion, etc.)
pub mod models;

/// Offset pagination for listing endpoints
pub mod pagination;
