// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses ports, database URL, session secrets, bcrypt cost and CORS origins from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

//! Environment-based configuration management

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use athlyze_core::constants::{auth, ports};
use athlyze_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Default database location
const DEFAULT_DATABASE_URL: &str = "sqlite:./data/athlyze.db";
/// Default bind address
const DEFAULT_HOST: &str = "127.0.0.1";

/// Environment type for security and other configurations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development, error details are exposed
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a development environment
    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// Path to the database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string
    ///
    /// # Errors
    ///
    /// Returns an error for URLs of other database engines
    pub fn parse_url(s: &str) -> AppResult<Self> {
        if let Some(path) = s.strip_prefix("sqlite:") {
            let path = path.trim_start_matches("//");
            if path == ":memory:" {
                Ok(Self::Memory)
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path.split('?').next().unwrap_or(path)),
                })
            }
        } else if s.contains("://") {
            Err(AppError::config(format!(
                "Unsupported DATABASE_URL scheme: {s} (only sqlite is supported)"
            )))
        } else {
            Ok(Self::SQLite {
                path: PathBuf::from(s),
            })
        }
    }

    /// Convert to a sqlx connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/athlyze.db"),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Session and password settings
    pub auth: AuthConfig,
    /// CORS settings
    pub cors: CorsConfig,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
}

/// Session and password settings
#[derive(Clone)]
pub struct AuthConfig {
    /// Session signing secret; a random one is generated when absent
    pub jwt_secret: Option<String>,
    /// Session lifetime in hours
    pub session_expiry_hours: i64,
    /// bcrypt cost factor
    pub bcrypt_cost: u32,
    /// Mark the session cookie `Secure`
    pub secure_cookies: bool,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "[REDACTED]"))
            .field("session_expiry_hours", &self.session_expiry_hours)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("secure_cookies", &self.secure_cookies)
            .finish()
    }
}

/// CORS settings
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Allowed origins, `*` allows any
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: ports::DEFAULT_HTTP_PORT,
            host: DEFAULT_HOST.to_owned(),
            environment: Environment::Development,
            database: DatabaseConfig {
                url: DatabaseUrl::default(),
            },
            auth: AuthConfig {
                jwt_secret: None,
                session_expiry_hours: auth::DEFAULT_SESSION_EXPIRY_HOURS,
                bcrypt_cost: auth::DEFAULT_BCRYPT_COST,
                secure_cookies: false,
            },
            cors: CorsConfig {
                allowed_origins: vec!["*".to_owned()],
            },
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds an invalid value
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds an invalid value
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let environment = var("ENVIRONMENT")
            .or_else(|| var("NODE_ENV"))
            .map_or(Environment::Development, |value| {
                Environment::from_str_or_default(&value)
            });

        let http_port = match var("HTTP_PORT").or_else(|| var("PORT")) {
            Some(value) => parse_value::<u16>("HTTP_PORT", &value)?,
            None => ports::DEFAULT_HTTP_PORT,
        };

        let database_url = var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());

        let session_expiry_hours = match var("SESSION_EXPIRY_HOURS") {
            Some(value) => parse_value::<i64>("SESSION_EXPIRY_HOURS", &value)?,
            None => auth::DEFAULT_SESSION_EXPIRY_HOURS,
        };
        if session_expiry_hours < 1 {
            return Err(AppError::config("SESSION_EXPIRY_HOURS must be at least 1"));
        }

        let bcrypt_cost = match var("BCRYPT_COST") {
            Some(value) => parse_value::<u32>("BCRYPT_COST", &value)?,
            None => auth::DEFAULT_BCRYPT_COST,
        };
        if !(auth::MIN_BCRYPT_COST..=auth::MAX_BCRYPT_COST).contains(&bcrypt_cost) {
            return Err(AppError::config(format!(
                "BCRYPT_COST must be between {} and {}",
                auth::MIN_BCRYPT_COST,
                auth::MAX_BCRYPT_COST
            )));
        }

        let secure_cookies = match var("SECURE_COOKIES") {
            Some(value) => parse_bool("SECURE_COOKIES", &value)?,
            None => environment.is_production(),
        };

        Ok(Self {
            http_port,
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            environment,
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&database_url)?,
            },
            auth: AuthConfig {
                jwt_secret: var("JWT_SECRET"),
                session_expiry_hours,
                bcrypt_cost,
                secure_cookies,
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(
                    &var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| "*".to_owned()),
                ),
            },
        })
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Athlyze Configuration:\n\
             - Environment: {}\n\
             - Listen: {}:{}\n\
             - Database: {}\n\
             - Session Secret: {}\n\
             - Session Expiry: {}h\n\
             - Bcrypt Cost: {}\n\
             - Secure Cookies: {}\n\
             - CORS Origins: {}",
            self.environment,
            self.host,
            self.http_port,
            self.database.url,
            if self.auth.jwt_secret.is_some() {
                "Configured"
            } else {
                "Generated"
            },
            self.auth.session_expiry_hours,
            self.auth.bcrypt_cost,
            self.auth.secure_cookies,
            self.cors.allowed_origins.join(", ")
        )
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> AppResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::config(format!("Invalid {key} value: {value}")))
}

fn parse_bool(key: &str, value: &str) -> AppResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::config(format!("Invalid {key} value: {value}"))),
    }
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
