// ABOUTME: Account registration and sign-in with form validation and password checks
// ABOUTME: Registration stores the user, greets them with a suggestion and opens a session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

use crate::auth::{
    hash_password, verify_dummy_password, verify_password, AuthManager, SessionToken,
};
use crate::database::Database;
use crate::logging::AppLogger;
use crate::services::suggestions::create_welcome_suggestion;
use athlyze_core::constants::auth::INVALID_CREDENTIALS_MESSAGE;
use athlyze_core::constants::validation::{MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH};
use athlyze_core::errors::{AppError, AppResult, FieldError};
use athlyze_core::models::{Plan, SessionUser, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Registration form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Email, normalized before storage
    #[serde(default)]
    pub email: String,
    /// Plain password
    #[serde(default)]
    pub password: String,
    /// Must equal `password`
    #[serde(default)]
    pub confirm_password: String,
    /// Plan name; `starter` when omitted
    #[serde(default)]
    pub plan: Option<String>,
}

/// Sign-in form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    /// Email
    #[serde(default)]
    pub email: String,
    /// Plain password
    #[serde(default)]
    pub password: String,
}

/// Validated registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Trimmed name
    pub name: String,
    /// Trimmed lowercase email
    pub email: String,
    /// Plain password
    pub password: String,
    /// Chosen plan
    pub plan: Plan,
}

/// Result of a successful registration or sign-in
#[derive(Debug, Clone, Serialize)]
pub struct SignedIn {
    /// Session token, also set as a cookie by the HTTP layer
    pub token: String,
    /// Expiry of the token
    pub expires_at: DateTime<Utc>,
    /// Signed-in identity
    pub user: SessionUser,
}

impl SignedIn {
    fn new(user: SessionUser, session: SessionToken) -> Self {
        Self {
            token: session.token,
            expires_at: session.expires_at,
            user,
        }
    }
}

/// Trim and lowercase an email address
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Minimal structural email check: `local@domain.tld` without whitespace
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, _)| !host.is_empty())
        && !domain.ends_with('.')
}

impl RegisterForm {
    /// Validate every field
    ///
    /// # Errors
    ///
    /// Returns a validation error listing each invalid field
    pub fn validate(self) -> AppResult<Registration> {
        let mut errors = Vec::new();

        let name = self.name.trim().to_owned();
        if name.chars().count() < MIN_NAME_LENGTH {
            errors.push(FieldError::new(
                "name",
                format!("Name must be at least {MIN_NAME_LENGTH} characters"),
            ));
        }

        let email = normalize_email(&self.email);
        if !is_valid_email(&email) {
            errors.push(FieldError::new("email", "Enter a valid email address"));
        }

        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.push(FieldError::new(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
            ));
        }

        if self.password != self.confirm_password {
            errors.push(FieldError::new("confirm_password", "Passwords do not match"));
        }

        let plan = match self.plan.as_deref().map(str::trim) {
            None | Some("") => Plan::default(),
            Some(raw) => raw.parse::<Plan>().unwrap_or_else(|_| {
                errors.push(FieldError::new("plan", "Select a valid plan"));
                Plan::default()
            }),
        };

        if errors.is_empty() {
            Ok(Registration {
                name,
                email,
                password: self.password,
                plan,
            })
        } else {
            Err(AppError::validation(errors))
        }
    }
}

impl LoginForm {
    /// Validate and return the normalized email with the password
    ///
    /// # Errors
    ///
    /// Returns a validation error listing each invalid field
    pub fn validate(self) -> AppResult<(String, String)> {
        let mut errors = Vec::new();

        let email = normalize_email(&self.email);
        if !is_valid_email(&email) {
            errors.push(FieldError::new("email", "Enter a valid email address"));
        }
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        }

        if errors.is_empty() {
            Ok((email, self.password))
        } else {
            Err(AppError::validation(errors))
        }
    }
}

/// Create an account and open a session for it
///
/// # Errors
///
/// Returns a validation error for bad input, `RESOURCE_ALREADY_EXISTS` for a
/// taken email, or an error if storage or hashing fails
pub async fn register(
    database: &Database,
    auth_manager: &AuthManager,
    bcrypt_cost: u32,
    form: RegisterForm,
) -> AppResult<SignedIn> {
    let registration = form.validate()?;

    if database.email_exists(&registration.email).await? {
        return Err(AppError::already_exists(
            "An account with this email already exists",
        ));
    }

    let password_hash = hash_password(registration.password, bcrypt_cost).await?;
    let user = User::new(
        registration.name,
        registration.email,
        password_hash,
        registration.plan,
    );
    database.create_user(&user).await?;
    info!(user_id = %user.id, plan = %user.plan, "User registered");

    if let Err(e) = create_welcome_suggestion(database, &user).await {
        warn!(user_id = %user.id, error = %e, "Failed to store welcome suggestion");
    }

    let session_user = SessionUser::from(&user);
    let session = auth_manager.issue_session(&session_user)?;
    AppLogger::log_auth_event(&user.id.to_string(), "register", true, None);

    Ok(SignedIn::new(session_user, session))
}

/// Check credentials and open a session
///
/// Unknown emails, inactive accounts and wrong passwords all produce the same
/// `AUTH_INVALID` error, and each costs one bcrypt verification.
///
/// # Errors
///
/// Returns a validation error for bad input, `AUTH_INVALID` for bad
/// credentials, or an error if storage fails
pub async fn login(
    database: &Database,
    auth_manager: &AuthManager,
    bcrypt_cost: u32,
    form: LoginForm,
) -> AppResult<SignedIn> {
    let (email, password) = form.validate()?;

    let Some(user) = database.get_active_user_by_email(&email).await? else {
        verify_dummy_password(password, bcrypt_cost).await?;
        AppLogger::log_auth_event("unknown", "login", false, Some("no active account"));
        return Err(AppError::auth_invalid(INVALID_CREDENTIALS_MESSAGE));
    };

    if !verify_password(password, user.password_hash.clone()).await? {
        AppLogger::log_auth_event(&user.id.to_string(), "login", false, Some("wrong password"));
        return Err(AppError::auth_invalid(INVALID_CREDENTIALS_MESSAGE));
    }

    let session_user = SessionUser::from(&user);
    let session = auth_manager.issue_session(&session_user)?;
    AppLogger::log_auth_event(&user.id.to_string(), "login", true, None);

    Ok(SignedIn::new(session_user, session))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_form() -> RegisterForm {
        RegisterForm {
            name: "  Maria  ".to_owned(),
            email: "  Maria@Example.COM ".to_owned(),
            password: "secret1".to_owned(),
            confirm_password: "secret1".to_owned(),
            plan: None,
        }
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@mail.example.org"));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user@example."));
        assert!(!is_valid_email("us er@example.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn test_registration_normalizes_input() {
        let registration = register_form().validate().unwrap();
        assert_eq!(registration.name, "Maria");
        assert_eq!(registration.email, "maria@example.com");
        assert_eq!(registration.plan, Plan::Starter);
    }

    #[test]
    fn test_registration_accepts_known_plan() {
        let form = RegisterForm {
            plan: Some("enterprise".to_owned()),
            ..register_form()
        };
        assert_eq!(form.validate().unwrap().plan, Plan::Enterprise);
    }

    #[test]
    fn test_registration_collects_field_errors() {
        let form = RegisterForm {
            name: " M ".to_owned(),
            email: "nope".to_owned(),
            password: "123".to_owned(),
            confirm_password: "1234".to_owned(),
            plan: Some("platinum".to_owned()),
        };
        let error = form.validate().unwrap_err();
        let fields: Vec<&str> = error.details["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert_eq!(
            fields,
            vec!["name", "email", "password", "confirm_password", "plan"]
        );
    }

    #[test]
    fn test_login_requires_password() {
        let form = LoginForm {
            email: "user@example.com".to_owned(),
            password: String::new(),
        };
        let error = form.validate().unwrap_err();
        assert_eq!(error.details["errors"][0]["field"], "password");
    }
}
