// ABOUTME: Intelligence module with the rule-based suggestion engine
// ABOUTME: Turns recent activity history into textual exercise, nutrition and measurement tips
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

//! # Intelligence Module
//!
//! Pure analysis over activity snapshots. Nothing in here touches storage;
//! [`crate::services::suggestions`] feeds the engine and persists its output.

/// Threshold rules producing suggestions from activity history
pub mod suggestions;

pub use suggestions::{SuggestionEngine, SuggestionThresholds};
