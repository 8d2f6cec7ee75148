// ABOUTME: Domain models re-exported from athlyze-core
// ABOUTME: Users, activities, suggestions and the session identity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

pub use athlyze_core::models::*;
