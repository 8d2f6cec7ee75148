// ABOUTME: JWT session tokens and bcrypt password hashing
// ABOUTME: Issues and validates HS256 session tokens that carry the signed-in user's identity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

//! # Authentication and Session Management
//!
//! Sessions are stateless: the token itself carries the [`SessionUser`], so
//! authenticating a request never touches the database. Passwords are hashed
//! with bcrypt on the blocking thread pool.

use crate::config::environment::AuthConfig;
use athlyze_core::constants::service::SERVICE_NAME;
use athlyze_core::errors::{AppError, AppResult};
use athlyze_core::models::{Plan, SessionUser};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use uuid::Uuid;

/// Hash checked when a login names no active account
static DUMMY_PASSWORD_HASH: OnceCell<String> = OnceCell::const_new();

/// `JWT` claims for a user session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User `ID`
    pub sub: String,
    /// Display name
    pub name: String,
    /// User email
    pub email: String,
    /// Subscription plan
    pub plan: Plan,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Audience
    pub aud: String,
}

impl Claims {
    fn session_user(&self) -> AppResult<SessionUser> {
        let id = Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::auth_invalid("Session token has an invalid subject"))?;
        Ok(SessionUser {
            id,
            name: self.name.clone(),
            email: self.email.clone(),
            plan: self.plan,
        })
    }
}

/// A freshly issued session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionToken {
    /// Signed `JWT`
    pub token: String,
    /// When the token stops being accepted
    pub expires_at: DateTime<Utc>,
}

/// Authentication manager for `JWT` session tokens
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_expiry_hours: i64,
}

impl AuthManager {
    /// Create a manager signing with `secret`
    #[must_use]
    pub fn new(secret: &[u8], session_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            session_expiry_hours,
        }
    }

    /// Create a manager from configuration
    ///
    /// Without a configured secret a random one is generated, which means
    /// sessions do not survive a restart.
    ///
    /// # Errors
    ///
    /// Returns an error if the system RNG fails while generating a secret
    pub fn from_config(config: &AuthConfig) -> AppResult<Self> {
        if let Some(secret) = &config.jwt_secret {
            return Ok(Self::new(secret.as_bytes(), config.session_expiry_hours));
        }

        tracing::warn!("JWT_SECRET not set, generated a random secret; sessions end on restart");
        let secret = generate_jwt_secret()?;
        Ok(Self::new(&secret, config.session_expiry_hours))
    }

    /// Session lifetime in hours
    #[must_use]
    pub const fn session_expiry_hours(&self) -> i64 {
        self.session_expiry_hours
    }

    /// Session lifetime in seconds, as used for cookie `Max-Age`
    #[must_use]
    pub const fn session_max_age_secs(&self) -> i64 {
        self.session_expiry_hours * 3600
    }

    /// Issue a session token for `user`
    ///
    /// # Errors
    ///
    /// Returns an error if `JWT` encoding fails
    pub fn issue_session(&self, user: &SessionUser) -> AppResult<SessionToken> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.session_expiry_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            plan: user.plan,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            aud: SERVICE_NAME.to_owned(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign session token: {e}")))?;

        Ok(SessionToken { token, expires_at })
    }

    /// Validate a session token and return the identity it carries
    ///
    /// # Errors
    ///
    /// Returns `AUTH_INVALID` for expired, tampered or malformed tokens
    pub fn validate_session(&self, token: &str) -> AppResult<SessionUser> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_audience(&[SERVICE_NAME]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("Session token rejected: {e}");
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::auth_invalid("Session has expired, please sign in again")
                }
                _ => AppError::auth_invalid("Invalid session token"),
            }
        })?;

        data.claims.session_user()
    }
}

/// Hash a password with bcrypt on the blocking pool
///
/// # Errors
///
/// Returns an error if hashing fails or the blocking task panics
pub async fn hash_password(password: String, cost: u32) -> AppResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}

/// Check a password against a bcrypt hash on the blocking pool
///
/// A malformed stored hash counts as a mismatch.
///
/// # Errors
///
/// Returns an error if the blocking task panics
pub async fn verify_password(password: String, password_hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash).unwrap_or(false))
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))
}

/// Spend one bcrypt verification on a login that matched no account
///
/// Keeps the response time of unknown emails in line with wrong passwords.
/// The dummy hash is created once, at `cost`, on first use.
///
/// # Errors
///
/// Returns an error if hashing the dummy password fails
pub async fn verify_dummy_password(password: String, cost: u32) -> AppResult<()> {
    let hash = dummy_password_hash(cost).await?;
    verify_password(password, hash.to_owned()).await?;
    Ok(())
}

async fn dummy_password_hash(cost: u32) -> AppResult<&'static str> {
    DUMMY_PASSWORD_HASH
        .get_or_try_init(|| hash_password("athlyze-no-such-account".to_owned(), cost))
        .await
        .map(String::as_str)
}

/// Generate a random `JWT` secret
///
/// # Errors
///
/// Returns an error if the system RNG fails
pub fn generate_jwt_secret() -> AppResult<[u8; 64]> {
    use ring::rand::{SecureRandom, SystemRandom};

    let rng = SystemRandom::new();
    let mut secret = [0u8; 64];

    rng.fill(&mut secret).map_err(|e| {
        tracing::error!("Failed to generate JWT secret: {}", e);
        AppError::internal("System RNG failure - cannot generate secure JWT secret")
    })?;

    Ok(secret)
}
