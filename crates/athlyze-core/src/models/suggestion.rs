// ABOUTME: Suggestion domain types for stored textual fitness tips
// ABOUTME: Defines SuggestionKind, Suggestion and the NewSuggestion insert payload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Category of a suggestion
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    /// Workout advice
    Exercise,
    /// Eating advice
    Nutrition,
    /// Body measurement advice
    Measurement,
    /// Anything else (welcome, encouragement)
    General,
}

impl SuggestionKind {
    /// Storage and wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exercise => "exercise",
            Self::Nutrition => "nutrition",
            Self::Measurement => "measurement",
            Self::General => "general",
        }
    }
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SuggestionKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exercise" => Ok(Self::Exercise),
            "nutrition" => Ok(Self::Nutrition),
            "measurement" => Ok(Self::Measurement),
            "general" => Ok(Self::General),
            other => Err(AppError::invalid_input(format!(
                "Invalid suggestion type: {other}"
            ))),
        }
    }
}

/// A stored suggestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// Suggestion identifier
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// The advice itself
    pub text: String,
    /// Category
    pub kind: SuggestionKind,
    /// Whether the user has seen it
    pub is_read: bool,
    /// When it was generated
    pub created_at: DateTime<Utc>,
}

/// A suggestion produced by the engine, not yet stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSuggestion {
    /// Category
    pub kind: SuggestionKind,
    /// The advice itself
    pub text: String,
}

impl NewSuggestion {
    /// Create a suggestion payload
    pub fn new(kind: SuggestionKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}
