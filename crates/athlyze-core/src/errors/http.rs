// ABOUTME: axum IntoResponse integration for AppError
// ABOUTME: Maps error codes to HTTP statuses and hides internal details outside development
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

use std::sync::atomic::{AtomicBool, Ordering};

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use tracing::{error, warn};

use super::{AppError, ErrorResponse};

static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(false);

/// Controls whether server-side error messages reach the client.
///
/// Enabled at startup in development so failures are visible while
/// iterating; production responses only carry the generic description.
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::Relaxed);
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut body = self;
        if body.code.is_server_error() {
            error!(
                error_code = ?body.code,
                source = ?body.source,
                "Request failed: {}",
                body.message
            );
            if !EXPOSE_INTERNAL_ERRORS.load(Ordering::Relaxed) {
                body.code.description().clone_into(&mut body.message);
                body.details = serde_json::Value::Null;
            }
        } else if status == StatusCode::UNAUTHORIZED {
            warn!(error_code = ?body.code, "Authentication failure: {}", body.message);
        }

        (status, Json(ErrorResponse::from(body))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_status() {
        let response = AppError::not_found("Activity").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::auth_required().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_server_error_status() {
        let response = AppError::database("disk I/O error").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
