// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Limits, lookback windows, suggestion thresholds and service defaults for Athlyze
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

//! Constants module
//!
//! Application constants grouped by domain rather than kept in one flat list.

/// Service identity
pub mod service {
    /// Service name reported by health checks and logs
    pub const SERVICE_NAME: &str = "athlyze";
    /// Human-facing application title
    pub const APP_TITLE: &str = "Athlyze - Your Personal Fitness Tracker";
    /// Service version
    pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 3000;
}

/// Listing page sizes
pub mod pagination {
    /// Items per page on activity and suggestion listings
    pub const PAGE_SIZE: i64 = 10;
}

/// Dashboard shape
pub mod dashboard {
    /// Recent activities shown on the dashboard
    pub const RECENT_ACTIVITIES: i64 = 5;
    /// Unread suggestions shown on the dashboard
    pub const UNREAD_SUGGESTIONS: i64 = 3;
    /// Days covered by the dashboard chart and the "this week" counter
    pub const CHART_DAYS: i64 = 7;
}

/// Report periods
pub mod reports {
    /// Period used when the client does not pick one
    pub const DEFAULT_PERIOD_DAYS: i64 = 30;
    /// Smallest accepted period
    pub const MIN_PERIOD_DAYS: i64 = 1;
    /// Largest accepted period
    pub const MAX_PERIOD_DAYS: i64 = 365;
    /// Number of entries in the top exercises table
    pub const TOP_EXERCISES: i64 = 5;
}

/// Input validation limits
pub mod validation {
    /// Minimum characters in a display name (after trimming)
    pub const MIN_NAME_LENGTH: usize = 2;
    /// Minimum characters in a password
    pub const MIN_PASSWORD_LENGTH: usize = 6;
    /// Minimum characters in an activity description (after trimming)
    pub const MIN_DESCRIPTION_LENGTH: usize = 3;
    /// Upper bound for calories on a single activity
    pub const MAX_CALORIES: i64 = 5000;
}

/// Suggestion engine windows and thresholds
pub mod suggestions {
    /// Lookback used right after an activity is logged
    pub const AFTER_ACTIVITY_LOOKBACK_DAYS: i64 = 7;
    /// Lookback used by on-demand analysis
    pub const ANALYSIS_LOOKBACK_DAYS: i64 = 14;
    /// Workouts per week considered a consistent routine
    pub const CONSISTENT_WORKOUTS: usize = 3;
    /// Calories above which a single meal is flagged
    pub const HIGH_CALORIE_MEAL: i64 = 500;
    /// Meals in the lookback considered good logging
    pub const WELL_LOGGED_MEALS: usize = 3;
    /// Average daily intake above which intake is flagged high
    pub const HIGH_DAILY_CALORIES: f64 = 2500.0;
    /// Average daily intake below which intake is flagged low
    pub const LOW_DAILY_CALORIES: f64 = 1200.0;
    /// Activity count that earns the strongest encouragement
    pub const COMMITTED_ACTIVITY_COUNT: usize = 20;
    /// Activity count that earns regular encouragement
    pub const ON_TRACK_ACTIVITY_COUNT: usize = 10;
}

/// Session and password defaults
pub mod auth {
    /// Cookie carrying the session token
    pub const SESSION_COOKIE_NAME: &str = "auth_token";
    /// Default session lifetime
    pub const DEFAULT_SESSION_EXPIRY_HOURS: i64 = 24;
    /// Default bcrypt cost
    pub const DEFAULT_BCRYPT_COST: u32 = 12;
    /// Lowest bcrypt cost accepted by the hashing library
    pub const MIN_BCRYPT_COST: u32 = 4;
    /// Highest bcrypt cost accepted by the hashing library
    pub const MAX_BCRYPT_COST: u32 = 31;
    /// Generic message for every failed login
    pub const INVALID_CREDENTIALS_MESSAGE: &str = "Email or password is incorrect";
}
