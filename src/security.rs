// ABOUTME: Security helpers for HTTP sessions
// ABOUTME: Session cookie construction and parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

/// Session cookie helpers
pub mod cookies;
