// ABOUTME: Athlyze HTTP server binary
// ABOUTME: Loads configuration, prepares the database and serves the JSON API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

//! # Athlyze Server Binary
//!
//! Configuration comes from the environment; `--http-port` and
//! `--database-url` override it.

use anyhow::{Context, Result};
use athlyze::{
    auth::AuthManager,
    config::environment::{DatabaseUrl, ServerConfig},
    database::Database,
    errors::set_expose_internal_errors,
    logging,
    resources::ServerResources,
    server::HttpServer,
};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "athlyze-server")]
#[command(about = "Athlyze - fitness tracking API with activity reports and suggestions")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (e.g. `sqlite:./data/athlyze.db` or `sqlite::memory:`)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(url) = args.database_url.as_deref() {
        config.database.url = DatabaseUrl::parse_url(url)?;
    }

    logging::init_from_env()?;
    set_expose_internal_errors(config.environment.is_development());

    info!("Starting Athlyze");
    info!("{}", config.summary());

    if let DatabaseUrl::SQLite { path } = &config.database.url {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create database directory {}", parent.display()))?;
        }
    }

    let database = Database::new(&config.database.url.to_connection_string()).await?;
    info!("Database ready: {}", config.database.url);

    let auth_manager = AuthManager::from_config(&config.auth)?;
    let resources = Arc::new(ServerResources::new(database, auth_manager, Arc::new(config)));

    HttpServer::new(resources).run().await
}
