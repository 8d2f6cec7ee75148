// ABOUTME: HTTP server assembly and lifecycle for the Athlyze API
// ABOUTME: Merges domain routers, adds CORS and tracing layers, serves with graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

//! # HTTP Server
//!
//! [`HttpServer::router`] builds the complete application so tests can drive
//! it without binding a socket; [`HttpServer::run`] serves it.

use crate::middleware::{
    make_request_span, propagate_request_id_layer, set_request_id_layer, setup_cors,
};
use crate::resources::ServerResources;
use crate::routes::{
    fallback_handler, ActivityRoutes, AuthRoutes, DashboardRoutes, HealthRoutes, ReportRoutes,
    SuggestionRoutes,
};
use anyhow::{Context, Result};
use axum::body::Body;
use axum::Router;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// HTTP server over shared resources
pub struct HttpServer {
    resources: Arc<ServerResources>,
}

impl HttpServer {
    /// Create a server
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the full application router with middleware
    pub fn router(resources: &Arc<ServerResources>) -> Router {
        let cors = setup_cors(&resources.config);

        Router::new()
            .merge(HealthRoutes::routes(resources.clone()))
            .merge(AuthRoutes::routes(resources.clone()))
            .merge(DashboardRoutes::routes(resources.clone()))
            .merge(ActivityRoutes::routes(resources.clone()))
            .merge(ReportRoutes::routes(resources.clone()))
            .merge(SuggestionRoutes::routes(resources.clone()))
            .fallback(fallback_handler)
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
            .layer(set_request_id_layer())
            .layer(cors)
    }

    /// Bind `HOST:PORT` and serve until Ctrl-C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or serving fails
    pub async fn run(self) -> Result<()> {
        let config = &self.resources.config;
        let addr = format!("{}:{}", config.host, config.http_port);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("Athlyze listening on http://{addr}");
        info!("  GET  /health, /ready");
        info!("  POST /register, /login, /logout");
        info!("  GET  /dashboard, /activities, /reports, /suggestions");

        axum::serve(listener, Self::router(&self.resources))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server failed")?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully");
        },
        () = terminate => {
            info!("Received SIGTERM, shutting down gracefully");
        },
    }
}
