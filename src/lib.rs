// ABOUTME: Main library entry point for the Athlyze fitness tracking service
// ABOUTME: Activity logging, dashboards, reports and rule-based suggestions over a JSON HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

#![deny(unsafe_code)]

//! # Athlyze
//!
//! A fitness tracking service. Users register, log exercise, nutrition and
//! body measurement activities, review dashboards and reports, and receive
//! textual suggestions derived from their recent history.
//!
//! ## Architecture
//!
//! - **Routes**: thin axum handlers, one router per domain
//! - **Services**: workflows spanning several tables (registration, logging)
//! - **Intelligence**: the pure suggestion rule engine
//! - **Database**: sqlx over SQLite, every user query built with positional
//!   placeholders
//! - **Core crate**: errors, models, constants and pagination live in
//!   `athlyze-core`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use athlyze::config::environment::ServerConfig;
//! use athlyze::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Athlyze configured on port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Session tokens and password hashing
pub mod auth;
/// Configuration loaded from the environment
pub mod config;
/// Application constants
pub mod constants;
/// SQLite storage
pub mod database;
/// Unified error handling
pub mod errors;
/// Suggestion rule engine
pub mod intelligence;
/// Structured logging setup
pub mod logging;
/// Authentication, CORS and tracing middleware
pub mod middleware;
/// Domain models
pub mod models;
/// Offset pagination
pub mod pagination;
/// Shared server resources
pub mod resources;
/// HTTP routes
pub mod routes;
/// Security helpers (session cookies)
pub mod security;
/// HTTP server assembly
pub mod server;
/// Business workflows
pub mod services;
