// ABOUTME: Offset pagination re-exported from athlyze-core
// ABOUTME: Keeps `athlyze::pagination` paths working for binaries and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

pub use athlyze_core::pagination::*;
