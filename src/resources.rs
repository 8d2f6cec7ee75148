// ABOUTME: Centralized resource container shared by every HTTP route
// ABOUTME: Holds the database, session manager, configuration and suggestion engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

//! # Server Resources
//!
//! Built once at startup and handed to each router as axum state.

use crate::auth::AuthManager;
use crate::config::environment::ServerConfig;
use crate::database::Database;
use crate::intelligence::SuggestionEngine;
use crate::middleware::SessionAuth;
use std::sync::Arc;

/// Shared server resources
#[derive(Clone)]
pub struct ServerResources {
    /// Storage
    pub database: Arc<Database>,
    /// Session token issuer and validator
    pub auth_manager: Arc<AuthManager>,
    /// Request authentication over `auth_manager`
    pub session_auth: SessionAuth,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Suggestion rules
    pub suggestion_engine: Arc<SuggestionEngine>,
}

impl ServerResources {
    /// Wrap the long-lived components for sharing across handlers
    #[must_use]
    pub fn new(database: Database, auth_manager: AuthManager, config: Arc<ServerConfig>) -> Self {
        let auth_manager = Arc::new(auth_manager);
        Self {
            database: Arc::new(database),
            session_auth: SessionAuth::new(auth_manager.clone()),
            auth_manager,
            config,
            suggestion_engine: Arc::new(SuggestionEngine::new()),
        }
    }
}
