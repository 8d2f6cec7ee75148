// ABOUTME: Rule-based suggestion engine for logged activities and periodic analysis
// ABOUTME: Threshold checks on counts, calorie averages and exercise variety over a lookback window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

//! Suggestion rules
//!
//! Two entry points share one set of thresholds:
//!
//! - [`SuggestionEngine::after_activity`] reacts to a single newly logged
//!   activity, looking at the last week of history (new activity included).
//! - [`SuggestionEngine::analyze`] reviews the last two weeks and emits one
//!   suggestion per area plus an optional encouragement.

use std::collections::HashSet;

use athlyze_core::constants::suggestions as limits;
use athlyze_core::models::{ActivityKind, ActivitySnapshot, NewSuggestion, SuggestionKind};

/// Tunable thresholds of the engine
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionThresholds {
    /// Workouts in a week considered a routine
    pub consistent_workouts: usize,
    /// Calories above which a single meal is flagged
    pub high_calorie_meal: i64,
    /// Meals in a week considered good logging
    pub well_logged_meals: usize,
    /// Days the analysis averages intake over
    pub analysis_days: i64,
    /// Average daily intake flagged as high
    pub high_daily_calories: f64,
    /// Average daily intake flagged as low
    pub low_daily_calories: f64,
    /// Activity count for the strongest encouragement
    pub committed_activity_count: usize,
    /// Activity count for regular encouragement
    pub on_track_activity_count: usize,
}

impl Default for SuggestionThresholds {
    fn default() -> Self {
        Self {
            consistent_workouts: limits::CONSISTENT_WORKOUTS,
            high_calorie_meal: limits::HIGH_CALORIE_MEAL,
            well_logged_meals: limits::WELL_LOGGED_MEALS,
            analysis_days: limits::ANALYSIS_LOOKBACK_DAYS,
            high_daily_calories: limits::HIGH_DAILY_CALORIES,
            low_daily_calories: limits::LOW_DAILY_CALORIES,
            committed_activity_count: limits::COMMITTED_ACTIVITY_COUNT,
            on_track_activity_count: limits::ON_TRACK_ACTIVITY_COUNT,
        }
    }
}

/// Stateless rule engine
#[derive(Debug, Clone, Default)]
pub struct SuggestionEngine {
    thresholds: SuggestionThresholds,
}

impl SuggestionEngine {
    /// Engine with default thresholds
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with custom thresholds
    #[must_use]
    pub const fn with_thresholds(thresholds: SuggestionThresholds) -> Self {
        Self { thresholds }
    }

    /// Thresholds in use
    #[must_use]
    pub const fn thresholds(&self) -> &SuggestionThresholds {
        &self.thresholds
    }

    /// Greeting stored when an account is created
    #[must_use]
    pub fn welcome(name: &str) -> NewSuggestion {
        NewSuggestion::new(
            SuggestionKind::General,
            format!(
                "Welcome to Athlyze, {name}! Start by logging your first activity to get personalized tips."
            ),
        )
    }

    /// Suggestion for a freshly logged activity
    ///
    /// `recent` must cover the lookback week and include the new activity.
    #[must_use]
    pub fn after_activity(
        &self,
        kind: ActivityKind,
        calories: Option<i64>,
        recent: &[ActivitySnapshot],
    ) -> NewSuggestion {
        let text = match kind {
            ActivityKind::Exercise => {
                let workouts = count_kind(recent, ActivityKind::Exercise);
                if workouts == 1 {
                    "Great job! You logged your first workout of the week. Aim to stay consistent by exercising at least 3 times a week."
                } else if workouts >= self.thresholds.consistent_workouts {
                    "Fantastic! You are keeping a consistent exercise routine. Remember to include rest days for muscle recovery."
                } else {
                    "Good work on your exercise. Try adding more variety to your routine with both cardio and strength training."
                }
            }
            ActivityKind::Nutrition => {
                let meals = count_kind(recent, ActivityKind::Nutrition);
                if calories.is_some_and(|c| c > self.thresholds.high_calorie_meal) {
                    "You logged a high-calorie meal. Consider balancing it with lighter options in your next meals."
                } else if meals >= self.thresholds.well_logged_meals {
                    "You are keeping a good record of your meals. Make sure to include a variety of nutrients in every meal."
                } else {
                    "Keep logging your meals consistently to get better personalized nutrition advice."
                }
            }
            ActivityKind::Measurement => {
                "Great job tracking your measurements. Regular tracking will help you monitor your progress over time."
            }
        };
        NewSuggestion::new(kind.suggestion_kind(), text)
    }

    /// Review of the analysis window
    ///
    /// An empty history yields exactly one general "start logging" suggestion.
    #[must_use]
    pub fn analyze(&self, activities: &[ActivitySnapshot]) -> Vec<NewSuggestion> {
        if activities.is_empty() {
            return vec![NewSuggestion::new(
                SuggestionKind::General,
                "Start by logging a few activities to receive personalized tips based on your exercise and eating patterns.",
            )];
        }

        let mut suggestions = vec![self.exercise_review(activities)];
        suggestions.extend(self.nutrition_review(activities));
        suggestions.push(Self::measurement_review(activities));
        suggestions.extend(self.encouragement(activities.len()));
        suggestions
    }

    fn exercise_review(&self, activities: &[ActivitySnapshot]) -> NewSuggestion {
        let workouts: Vec<&ActivitySnapshot> = activities
            .iter()
            .filter(|a| a.kind == ActivityKind::Exercise)
            .collect();

        let text = if workouts.is_empty() {
            "You have not logged any workouts in the last 2 weeks. Time to get moving! Start with a 20-30 minute walk every day."
        } else if workouts.len() < self.thresholds.consistent_workouts {
            "You exercised only a few times in the last 2 weeks. Try to work out at least 3 times a week for better results."
        } else {
            let distinct: HashSet<String> = workouts
                .iter()
                .map(|a| a.description.to_lowercase())
                .collect();
            if distinct.len() == 1 {
                "Excellent consistency! For better results, try to vary your routine with different kinds of exercise."
            } else {
                "Fantastic! You keep a varied and consistent exercise routine. Remember to include rest days for recovery."
            }
        };
        NewSuggestion::new(SuggestionKind::Exercise, text)
    }

    fn nutrition_review(&self, activities: &[ActivitySnapshot]) -> Option<NewSuggestion> {
        let meals: Vec<&ActivitySnapshot> = activities
            .iter()
            .filter(|a| a.kind == ActivityKind::Nutrition)
            .collect();

        if meals.is_empty() {
            return Some(NewSuggestion::new(
                SuggestionKind::Nutrition,
                "You have not logged any meals recently. Tracking what you eat helps you spot patterns and improve your nutrition.",
            ));
        }

        let average = self.average_daily_calories(&meals);
        let text = if average > self.thresholds.high_daily_calories {
            "Your average calorie intake is high. Consider adding more vegetables and lean protein, and cutting back on processed food."
        } else if average > 0.0 && average < self.thresholds.low_daily_calories {
            "Your calorie intake looks low. Make sure you eat enough to keep your energy and health up. Consult a nutritionist if in doubt."
        } else if average > 0.0 {
            "Good job logging your meals. Keep a balance between protein, carbohydrates and healthy fats."
        } else {
            return None;
        };
        Some(NewSuggestion::new(SuggestionKind::Nutrition, text))
    }

    fn measurement_review(activities: &[ActivitySnapshot]) -> NewSuggestion {
        let text = if count_kind(activities, ActivityKind::Measurement) == 0 {
            "Logging your body measurements regularly tracks your progress better than weight alone."
        } else {
            "Excellent! You are monitoring your measurements. Body changes take time, so stay consistent and patient."
        };
        NewSuggestion::new(SuggestionKind::Measurement, text)
    }

    fn encouragement(&self, total: usize) -> Option<NewSuggestion> {
        let text = if total >= self.thresholds.committed_activity_count {
            "Incredible commitment! You have logged lots of activities. Keep it up and you will see amazing results."
        } else if total >= self.thresholds.on_track_activity_count {
            "You are on the right track with your activity log. Consistency is the key to reaching your health goals."
        } else {
            return None;
        };
        Some(NewSuggestion::new(SuggestionKind::General, text))
    }

    /// Sum of logged meal calories over the whole window length, not over logged days
    fn average_daily_calories(&self, meals: &[&ActivitySnapshot]) -> f64 {
        let total: i64 = meals.iter().filter_map(|m| m.calories).sum();
        total as f64 / self.thresholds.analysis_days.max(1) as f64
    }
}

fn count_kind(activities: &[ActivitySnapshot], kind: ActivityKind) -> usize {
    activities.iter().filter(|a| a.kind == kind).count()
}
