// ABOUTME: Unified error types re-exported from athlyze-core
// ABOUTME: AppError, ErrorCode and the JSON error body used by every route
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

pub use athlyze_core::errors::*;
