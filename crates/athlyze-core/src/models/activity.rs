// ABOUTME: Activity domain types for logged exercise, nutrition and measurement entries
// ABOUTME: Defines ActivityKind, kind-specific ActivityDetails, Activity and ActivitySnapshot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::suggestion::SuggestionKind;
use crate::errors::AppError;

/// What an activity records
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// A workout
    Exercise,
    /// A meal or snack
    Nutrition,
    /// A body measurement
    Measurement,
}

impl ActivityKind {
    /// Every kind, in display order
    pub const ALL: [Self; 3] = [Self::Exercise, Self::Nutrition, Self::Measurement];

    /// Storage and wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exercise => "exercise",
            Self::Nutrition => "nutrition",
            Self::Measurement => "measurement",
        }
    }

    /// Suggestion category matching this activity kind
    #[must_use]
    pub const fn suggestion_kind(self) -> SuggestionKind {
        match self {
            Self::Exercise => SuggestionKind::Exercise,
            Self::Nutrition => SuggestionKind::Nutrition,
            Self::Measurement => SuggestionKind::Measurement,
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exercise" => Ok(Self::Exercise),
            "nutrition" => Ok(Self::Nutrition),
            "measurement" => Ok(Self::Measurement),
            other => Err(AppError::invalid_input(format!(
                "Invalid activity type: {other}"
            ))),
        }
    }
}

/// Optional kind-specific metrics attached to an activity
///
/// Stored as a JSON object. Only the fields that belong to the activity's
/// kind survive [`ActivityDetails::retain_for`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityDetails {
    /// Workout duration in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,
    /// Distance covered in kilometers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    /// Free-form intensity label (low, moderate, high)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<String>,

    /// Body weight in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Height in centimeters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    /// Body fat percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat_pct: Option<f64>,
    /// Muscle mass in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muscle_mass_kg: Option<f64>,

    /// Protein in grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_g: Option<f64>,
    /// Carbohydrates in grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs_g: Option<f64>,
    /// Fat in grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_g: Option<f64>,
}

impl ActivityDetails {
    /// Drop every metric that does not belong to `kind`
    #[must_use]
    pub fn retain_for(self, kind: ActivityKind) -> Self {
        match kind {
            ActivityKind::Exercise => Self {
                duration_minutes: self.duration_minutes,
                distance_km: self.distance_km,
                intensity: self.intensity.filter(|value| !value.trim().is_empty()),
                ..Self::default()
            },
            ActivityKind::Measurement => Self {
                weight_kg: self.weight_kg,
                height_cm: self.height_cm,
                body_fat_pct: self.body_fat_pct,
                muscle_mass_kg: self.muscle_mass_kg,
                ..Self::default()
            },
            ActivityKind::Nutrition => Self {
                protein_g: self.protein_g,
                carbs_g: self.carbs_g,
                fat_g: self.fat_g,
                ..Self::default()
            },
        }
    }

    /// True when no metric is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A logged activity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    /// Activity identifier
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// What was logged
    pub kind: ActivityKind,
    /// Short description, also used to group exercises
    pub description: String,
    /// Calendar day the activity happened on
    pub date: NaiveDate,
    /// Calories burned (exercise) or consumed (nutrition)
    pub calories: Option<i64>,
    /// Kind-specific metrics
    pub details: ActivityDetails,
    /// When the entry was recorded
    pub created_at: DateTime<Utc>,
}

/// Validated input for a new activity
#[derive(Debug, Clone)]
pub struct NewActivity {
    /// Owner
    pub user_id: Uuid,
    /// What was logged
    pub kind: ActivityKind,
    /// Trimmed description
    pub description: String,
    /// Calendar day
    pub date: NaiveDate,
    /// Optional calories
    pub calories: Option<i64>,
    /// Metrics already restricted to `kind`
    pub details: ActivityDetails,
}

impl NewActivity {
    /// Build a new activity, keeping only the metrics relevant to `kind`
    #[must_use]
    pub fn new(
        user_id: Uuid,
        kind: ActivityKind,
        description: impl Into<String>,
        date: NaiveDate,
        calories: Option<i64>,
        details: ActivityDetails,
    ) -> Self {
        Self {
            user_id,
            kind,
            description: description.into(),
            date,
            calories,
            details: details.retain_for(kind),
        }
    }
}

/// The slice of an activity the suggestion engine looks at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivitySnapshot {
    /// What was logged
    pub kind: ActivityKind,
    /// Description, compared case-insensitively for variety
    pub description: String,
    /// Calendar day
    pub date: NaiveDate,
    /// Optional calories
    pub calories: Option<i64>,
}

impl From<&Activity> for ActivitySnapshot {
    fn from(activity: &Activity) -> Self {
        Self {
            kind: activity.kind,
            description: activity.description.clone(),
            date: activity.date,
            calories: activity.calories,
        }
    }
}
