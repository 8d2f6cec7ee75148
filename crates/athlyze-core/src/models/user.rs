// ABOUTME: User account models including subscription plan and session identity
// ABOUTME: Defines Plan, User and the SessionUser carried inside session tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Subscription plan chosen at registration
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    /// Free entry plan
    #[default]
    Starter,
    /// Paid individual plan
    Professional,
    /// Organization plan
    Enterprise,
}

impl Plan {
    /// Storage and wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Professional => "professional",
            Self::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "starter" => Ok(Self::Starter),
            "professional" => Ok(Self::Professional),
            "enterprise" => Ok(Self::Enterprise),
            other => Err(AppError::invalid_input(format!("Invalid plan: {other}"))),
        }
    }
}

/// A registered account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Account identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Normalized (trimmed, lowercase) email
    pub email: String,
    /// bcrypt hash, never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Subscription plan
    pub plan: Plan,
    /// Inactive accounts cannot sign in
    pub is_active: bool,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user with a fresh identifier
    #[must_use]
    pub fn new(name: String, email: String, password_hash: String, plan: Plan) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            plan,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

/// Identity carried by a signed session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Account identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email
    pub email: String,
    /// Subscription plan
    pub plan: Plan,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            plan: user.plan,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_defaults_to_starter() {
        assert_eq!(Plan::default(), Plan::Starter);
        assert_eq!("enterprise".parse::<Plan>().unwrap(), Plan::Enterprise);
        assert!("gold".parse::<Plan>().is_err());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new(
            "Ana".to_owned(),
            "ana@example.com".to_owned(),
            "$2b$12$hash".to_owned(),
            Plan::Professional,
        );
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("password_hash").is_none());
        assert_eq!(json["plan"], "professional");
        assert_eq!(json["is_active"], true);
    }
}
