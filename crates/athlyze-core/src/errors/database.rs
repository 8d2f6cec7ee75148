// ABOUTME: Conversion from sqlx errors into AppError
// ABOUTME: Row-not-found becomes RESOURCE_NOT_FOUND and unique violations become conflicts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

use super::{AppError, ErrorCode};

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        if matches!(error, sqlx::Error::RowNotFound) {
            return Self::new(ErrorCode::ResourceNotFound, "Record not found");
        }

        let unique_violation = error
            .as_database_error()
            .is_some_and(sqlx::error::DatabaseError::is_unique_violation);
        if unique_violation {
            return Self::already_exists("Record already exists").with_source(error);
        }

        Self::database(error.to_string()).with_source(error)
    }
}
