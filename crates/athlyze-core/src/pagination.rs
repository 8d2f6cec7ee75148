// ABOUTME: Offset pagination module for activity and suggestion listings
// ABOUTME: Provides 1-based page requests and page responses with total counts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

use serde::{Deserialize, Serialize};

/// A 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number, always at least 1
    pub page: i64,
    /// Items per page, always at least 1
    pub per_page: i64,
}

impl PageRequest {
    /// Create a page request
    ///
    /// A missing, zero or negative page number selects the first page.
    #[must_use]
    pub fn new(page: Option<i64>, per_page: i64) -> Self {
        Self {
            page: page.filter(|p| *p >= 1).unwrap_or(1),
            per_page: per_page.max(1),
        }
    }

    /// Rows to skip
    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Rows to return
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.per_page
    }
}

/// One page of results with pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items in this page
    pub items: Vec<T>,

    /// Current page number (1-based)
    pub page: i64,

    /// Page size used for the query
    pub per_page: i64,

    /// Matching items across all pages
    pub total_items: i64,

    /// Number of pages, zero when nothing matched
    pub total_pages: i64,
}

impl<T> Page<T> {
    /// Create a page from the query results and the total match count
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total_items: i64) -> Self {
        let total_items = total_items.max(0);
        Self {
            items,
            page: request.page,
            per_page: request.per_page,
            total_items,
            total_pages: (total_items + request.per_page - 1) / request.per_page,
        }
    }

    /// Transform the items while keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}
