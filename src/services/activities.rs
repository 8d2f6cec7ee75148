// ABOUTME: Activity form validation and the log-then-suggest creation workflow
// ABOUTME: Collects per-field errors so clients can show every problem at once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

use crate::database::Database;
use crate::intelligence::SuggestionEngine;
use crate::services::suggestions::suggest_after_activity;
use athlyze_core::constants::validation::{MAX_CALORIES, MIN_DESCRIPTION_LENGTH};
use athlyze_core::errors::{AppError, AppResult, FieldError};
use athlyze_core::models::{Activity, ActivityDetails, ActivityKind, NewActivity};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

/// Activity as submitted by a client, before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityForm {
    /// `exercise`, `nutrition` or `measurement`
    #[serde(default)]
    pub kind: String,
    /// Free text description
    #[serde(default)]
    pub description: String,
    /// ISO date (`YYYY-MM-DD`)
    #[serde(default)]
    pub date: String,
    /// Whole number, or a string holding one; empty means absent
    #[serde(default)]
    pub calories: Option<Value>,
    /// Kind-specific metrics sent alongside the common fields
    #[serde(flatten)]
    pub metrics: MetricsForm,
}

/// Kind-specific metrics as submitted: numbers, numeric strings or blanks
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricsForm {
    /// Workout duration in minutes
    #[serde(default)]
    pub duration_minutes: Option<Value>,
    /// Distance in kilometers
    #[serde(default)]
    pub distance_km: Option<Value>,
    /// Intensity label
    #[serde(default)]
    pub intensity: Option<String>,
    /// Body weight in kilograms
    #[serde(default)]
    pub weight_kg: Option<Value>,
    /// Height in centimeters
    #[serde(default)]
    pub height_cm: Option<Value>,
    /// Body fat percentage
    #[serde(default)]
    pub body_fat_pct: Option<Value>,
    /// Muscle mass in kilograms
    #[serde(default)]
    pub muscle_mass_kg: Option<Value>,
    /// Protein in grams
    #[serde(default)]
    pub protein_g: Option<Value>,
    /// Carbohydrates in grams
    #[serde(default)]
    pub carbs_g: Option<Value>,
    /// Fat in grams
    #[serde(default)]
    pub fat_g: Option<Value>,
}

impl MetricsForm {
    /// Parse the metrics that belong to `kind`, ignoring the rest
    fn into_details(self, kind: ActivityKind, errors: &mut Vec<FieldError>) -> ActivityDetails {
        let mut metric = |field: &'static str, raw: Option<Value>| {
            parse_metric(raw.as_ref()).unwrap_or_else(|()| {
                errors.push(FieldError::new(
                    field,
                    format!("{field} must be a non-negative number"),
                ));
                None
            })
        };

        let details = match kind {
            ActivityKind::Exercise => ActivityDetails {
                duration_minutes: metric("duration_minutes", self.duration_minutes),
                distance_km: metric("distance_km", self.distance_km),
                intensity: self.intensity,
                ..ActivityDetails::default()
            },
            ActivityKind::Measurement => ActivityDetails {
                weight_kg: metric("weight_kg", self.weight_kg),
                height_cm: metric("height_cm", self.height_cm),
                body_fat_pct: metric("body_fat_pct", self.body_fat_pct),
                muscle_mass_kg: metric("muscle_mass_kg", self.muscle_mass_kg),
                ..ActivityDetails::default()
            },
            ActivityKind::Nutrition => ActivityDetails {
                protein_g: metric("protein_g", self.protein_g),
                carbs_g: metric("carbs_g", self.carbs_g),
                fat_g: metric("fat_g", self.fat_g),
                ..ActivityDetails::default()
            },
        };
        details.retain_for(kind)
    }
}

impl ActivityForm {
    /// Validate every field and build the activity to store
    ///
    /// # Errors
    ///
    /// Returns a validation error listing each invalid field
    pub fn validate(self, user_id: Uuid) -> AppResult<NewActivity> {
        let mut errors = Vec::new();

        let kind = self.kind.trim().parse::<ActivityKind>().ok();
        if kind.is_none() {
            errors.push(FieldError::new("kind", "Invalid activity type"));
        }

        let description = self.description.trim();
        if description.chars().count() < MIN_DESCRIPTION_LENGTH {
            errors.push(FieldError::new(
                "description",
                format!("Description must be at least {MIN_DESCRIPTION_LENGTH} characters"),
            ));
        }

        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok();
        if date.is_none() {
            errors.push(FieldError::new("date", "Date must be a valid date (YYYY-MM-DD)"));
        }

        let calories = match parse_calories(self.calories.as_ref()) {
            Ok(calories) => calories,
            Err(message) => {
                errors.push(FieldError::new("calories", message));
                None
            }
        };

        let details = kind.map(|kind| self.metrics.into_details(kind, &mut errors));

        match (kind, date, details) {
            (Some(kind), Some(date), Some(details)) if errors.is_empty() => Ok(NewActivity::new(
                user_id,
                kind,
                description,
                date,
                calories,
                details,
            )),
            _ => Err(AppError::validation(errors)),
        }
    }
}

fn parse_calories(raw: Option<&Value>) -> Result<Option<i64>, String> {
    let out_of_range = || format!("Calories must be a whole number between 0 and {MAX_CALORIES}");

    let calories = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| out_of_range())?,
        Some(Value::Number(n)) => n.as_i64().ok_or_else(out_of_range)?,
        Some(_) => return Err(out_of_range()),
    };

    if (0..=MAX_CALORIES).contains(&calories) {
        Ok(Some(calories))
    } else {
        Err(out_of_range())
    }
}

fn parse_metric(raw: Option<&Value>) -> Result<Option<f64>, ()> {
    let value = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| ())?,
        Some(Value::Number(n)) => n.as_f64().ok_or(())?,
        Some(_) => return Err(()),
    };

    if value.is_finite() && value >= 0.0 {
        Ok(Some(value))
    } else {
        Err(())
    }
}

/// Store an activity and follow it up with a suggestion
///
/// # Errors
///
/// Returns an error only if the activity itself cannot be stored
pub async fn log_activity(
    database: &Database,
    engine: &SuggestionEngine,
    new_activity: &NewActivity,
) -> AppResult<Activity> {
    let activity = database.create_activity(new_activity).await?;
    info!(
        user_id = %activity.user_id,
        activity_id = %activity.id,
        kind = %activity.kind,
        "Activity logged"
    );

    suggest_after_activity(database, engine, &activity).await;
    Ok(activity)
}
