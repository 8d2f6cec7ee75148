// ABOUTME: Business logic layer between route handlers and storage
// ABOUTME: Account, activity and suggestion workflows that span more than one table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

//! Service layer
//!
//! Route handlers stay thin: they authenticate, decode the request and hand
//! over to a function in here.

/// Registration and sign-in
pub mod accounts;
/// Activity form validation and creation
pub mod activities;
/// Suggestion generation and persistence
pub mod suggestions;
