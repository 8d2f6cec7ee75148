// ABOUTME: Core data models and types for the Athlyze fitness tracker
// ABOUTME: Re-exports User, Activity, Suggestion and the session identity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

//! # Data Models
//!
//! Plain data structures shared by the storage layer, the suggestion engine
//! and the HTTP routes.
//!
//! ## Core Models
//!
//! - `User`: An account with its subscription plan
//! - `Activity`: A single logged exercise, meal or body measurement
//! - `Suggestion`: A stored textual tip with a read flag
//! - `SessionUser`: The identity carried by a signed session token

// Domain modules
mod activity;
mod suggestion;
mod user;

// Activity domain
pub use activity::{Activity, ActivityDetails, ActivityKind, ActivitySnapshot, NewActivity};

// Suggestion domain
pub use suggestion::{NewSuggestion, Suggestion, SuggestionKind};

// User domain
pub use user::{Plan, SessionUser, User};
