// ABOUTME: Application constants re-exported from athlyze-core
// ABOUTME: Validation limits, lookback windows, suggestion thresholds and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

pub use athlyze_core::constants::*;
