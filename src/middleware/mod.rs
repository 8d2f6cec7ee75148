// ABOUTME: HTTP middleware for session authentication, CORS and request tracing
// ABOUTME: Provides the layers and extractors shared by every router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

pub mod auth;
pub mod cors;
pub mod tracing;

// Session authentication
pub use auth::SessionAuth;

// CORS configuration
pub use cors::setup_cors;

// Request tracing and request ids
pub use tracing::{make_request_span, propagate_request_id_layer, set_request_id_layer};
