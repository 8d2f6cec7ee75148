// ABOUTME: Suggestion workflows tying the rule engine to activity history and storage
// ABOUTME: After-activity tips, on-demand two-week analysis, and the registration greeting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

use crate::database::Database;
use crate::intelligence::SuggestionEngine;
use crate::logging::AppLogger;
use athlyze_core::constants::suggestions::{
    AFTER_ACTIVITY_LOOKBACK_DAYS, ANALYSIS_LOOKBACK_DAYS,
};
use athlyze_core::errors::AppResult;
use athlyze_core::models::{Activity, Suggestion, User};
use chrono::{Duration, NaiveDate, Utc};
use tracing::{error, info};
use uuid::Uuid;

/// First day of a lookback window ending today
#[must_use]
pub fn lookback_start(today: NaiveDate, days: i64) -> NaiveDate {
    today - Duration::days(days)
}

/// Store the suggestion triggered by a freshly logged activity
///
/// Failures are logged and swallowed: logging an activity must never fail
/// because its follow-up tip could not be produced.
pub async fn suggest_after_activity(
    database: &Database,
    engine: &SuggestionEngine,
    activity: &Activity,
) -> Option<Suggestion> {
    match try_suggest_after_activity(database, engine, activity).await {
        Ok(suggestion) => {
            AppLogger::log_suggestions_generated(&activity.user_id.to_string(), "activity", 1);
            Some(suggestion)
        }
        Err(e) => {
            error!(
                user_id = %activity.user_id,
                activity_id = %activity.id,
                error = %e,
                "Failed to generate suggestion after activity"
            );
            None
        }
    }
}

async fn try_suggest_after_activity(
    database: &Database,
    engine: &SuggestionEngine,
    activity: &Activity,
) -> AppResult<Suggestion> {
    let since = lookback_start(Utc::now().date_naive(), AFTER_ACTIVITY_LOOKBACK_DAYS);
    let recent = database.activities_since(activity.user_id, since).await?;
    let suggestion = engine.after_activity(activity.kind, activity.calories, &recent);
    database.create_suggestion(activity.user_id, &suggestion).await
}

/// Run the two-week analysis for a user and store every resulting suggestion
///
/// # Errors
///
/// Returns an error if history cannot be read or the batch insert fails; in
/// the latter case nothing is stored
pub async fn generate_suggestions(
    database: &Database,
    engine: &SuggestionEngine,
    user_id: Uuid,
) -> AppResult<Vec<Suggestion>> {
    let since = lookback_start(Utc::now().date_naive(), ANALYSIS_LOOKBACK_DAYS);
    let history = database.activities_since(user_id, since).await?;
    let suggestions = engine.analyze(&history);

    let stored = database.create_suggestions(user_id, &suggestions).await?;
    info!(
        user_id = %user_id,
        activities = history.len(),
        created = stored.len(),
        "Generated suggestions from activity history"
    );
    AppLogger::log_suggestions_generated(&user_id.to_string(), "analysis", stored.len());

    Ok(stored)
}

/// Store the greeting for a newly registered user
///
/// # Errors
///
/// Returns an error if the insert fails
pub async fn create_welcome_suggestion(database: &Database, user: &User) -> AppResult<Suggestion> {
    database
        .create_suggestion(user.id, &SuggestionEngine::welcome(&user.name))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookback_start_counts_back_from_today() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(
            lookback_start(today, 7),
            NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
        );
        assert_eq!(
            lookback_start(today, 14),
            NaiveDate::from_ymd_opt(2025, 2, 24).unwrap()
        );
    }
}
