// ABOUTME: Parameterized WHERE clause builder for user-scoped SQL queries
// ABOUTME: Appends optional conditions with positional placeholders and binds values in order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Athlyze Contributors

use std::fmt::Write;

use chrono::NaiveDate;
use sqlx::query::{Query, QueryScalar};
use sqlx::sqlite::SqliteArguments;
use sqlx::Sqlite;
use uuid::Uuid;

/// A value bound to a placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    /// TEXT parameter
    Text(String),
    /// INTEGER parameter
    Integer(i64),
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<Uuid> for SqlValue {
    fn from(value: Uuid) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(value: NaiveDate) -> Self {
        // Same textual form sqlx uses when storing a NaiveDate
        Self::Text(value.format("%Y-%m-%d").to_string())
    }
}

/// `WHERE` clause scoped to one user, extended with optional conditions
///
/// Column names are `&'static str` so only identifiers written in this crate
/// reach the SQL text. Values always travel as bound parameters.
///
/// ```
/// use athlyze::database::SqlFilter;
/// use uuid::Uuid;
///
/// let filter = SqlFilter::for_user(Uuid::nil())
///     .and_eq("kind", Some("exercise"))
///     .and_gte("date", None::<&str>);
/// assert_eq!(filter.clause(), "WHERE user_id = $1 AND kind = $2");
/// assert_eq!(filter.next_placeholder(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct SqlFilter {
    clause: String,
    values: Vec<SqlValue>,
}

impl SqlFilter {
    /// Start from `WHERE user_id = $1`
    #[must_use]
    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            clause: "WHERE user_id = $1".to_owned(),
            values: vec![SqlValue::from(user_id)],
        }
    }

    /// Append ` AND column = $n` when a value is present
    #[must_use]
    pub fn and_eq<V: Into<SqlValue>>(self, column: &'static str, value: Option<V>) -> Self {
        self.push_condition(column, "=", value)
    }

    /// Append ` AND column >= $n` when a value is present
    #[must_use]
    pub fn and_gte<V: Into<SqlValue>>(self, column: &'static str, value: Option<V>) -> Self {
        self.push_condition(column, ">=", value)
    }

    /// Append ` AND column <= $n` when a value is present
    #[must_use]
    pub fn and_lte<V: Into<SqlValue>>(self, column: &'static str, value: Option<V>) -> Self {
        self.push_condition(column, "<=", value)
    }

    /// Append ` AND column IN ($n, $n+1, ...)` when the list is not empty
    #[must_use]
    pub fn and_in<V: Into<SqlValue>>(
        mut self,
        column: &'static str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let start = self.next_placeholder();
        let values: Vec<SqlValue> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return self;
        }

        let placeholders = (start..start + values.len())
            .map(|n| format!("${n}"))
            .collect::<Vec<_>>()
            .join(", ");
        // Writing to a String cannot fail
        let _ = write!(self.clause, " AND {column} IN ({placeholders})");
        self.values.extend(values);
        self
    }

    fn push_condition<V: Into<SqlValue>>(
        mut self,
        column: &'static str,
        operator: &str,
        value: Option<V>,
    ) -> Self {
        if let Some(value) = value {
            let placeholder = self.next_placeholder();
            let _ = write!(self.clause, " AND {column} {operator} ${placeholder}");
            self.values.push(value.into());
        }
        self
    }

    /// The rendered `WHERE ...` clause
    #[must_use]
    pub fn clause(&self) -> &str {
        &self.clause
    }

    /// Index of the next free placeholder, for clauses appended after the filter
    #[must_use]
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }

    /// Values in placeholder order
    #[must_use]
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Bind every recorded value, in placeholder order
    #[must_use]
    pub fn apply<'q>(
        &self,
        mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        for value in &self.values {
            query = match value {
                SqlValue::Text(text) => query.bind(text.clone()),
                SqlValue::Integer(number) => query.bind(*number),
            };
        }
        query
    }

    /// Bind every recorded value on a scalar query
    #[must_use]
    pub fn apply_scalar<'q, O>(
        &self,
        mut query: QueryScalar<'q, Sqlite, O, SqliteArguments<'q>>,
    ) -> QueryScalar<'q, Sqlite, O, SqliteArguments<'q>> {
        for value in &self.values {
            query = match value {
                SqlValue::Text(text) => query.bind(text.clone()),
                SqlValue::Integer(number) => query.bind(*number),
            };
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> Uuid {
        Uuid::parse_str("6f1c2a4e-8d2b-4a3c-9e5f-1a2b3c4d5e6f").unwrap()
    }

    #[test]
    fn test_base_clause_binds_user() {
        let filter = SqlFilter::for_user(user());
        assert_eq!(filter.clause(), "WHERE user_id = $1");
        assert_eq!(
            filter.values(),
            &[SqlValue::Text("6f1c2a4e-8d2b-4a3c-9e5f-1a2b3c4d5e6f".to_owned())]
        );
        assert_eq!(filter.next_placeholder(), 2);
    }

    #[test]
    fn test_placeholders_follow_present_values_only() {
        let from = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let filter = SqlFilter::for_user(user())
            .and_eq("kind", None::<&str>)
            .and_gte("date", Some(from))
            .and_lte("date", Some("2025-03-31"));

        assert_eq!(
            filter.clause(),
            "WHERE user_id = $1 AND date >= $2 AND date <= $3"
        );
        assert_eq!(filter.values()[1], SqlValue::Text("2025-03-01".to_owned()));
        assert_eq!(filter.next_placeholder(), 4);
    }

    #[test]
    fn test_all_filters_present() {
        let filter = SqlFilter::for_user(user())
            .and_eq("kind", Some("nutrition"))
            .and_gte("date", Some("2025-01-01"))
            .and_lte("date", Some("2025-01-31"));

        assert_eq!(
            filter.clause(),
            "WHERE user_id = $1 AND kind = $2 AND date >= $3 AND date <= $4"
        );
        let limit = filter.next_placeholder();
        assert_eq!(
            format!("LIMIT ${limit} OFFSET ${}", limit + 1),
            "LIMIT $5 OFFSET $6"
        );
    }

    #[test]
    fn test_in_list() {
        let filter = SqlFilter::for_user(user()).and_in("id", ["a", "b", "c"]);
        assert_eq!(filter.clause(), "WHERE user_id = $1 AND id IN ($2, $3, $4)");
        assert_eq!(filter.values().len(), 4);

        let unchanged = SqlFilter::for_user(user()).and_in("id", Vec::<String>::new());
        assert_eq!(unchanged.clause(), "WHERE user_id = $1");
    }

    #[test]
    fn test_values_never_reach_sql_text() {
        let filter =
            SqlFilter::for_user(user()).and_eq("kind", Some("exercise' OR '1'='1"));
        assert!(!filter.clause().contains("OR"));
        assert_eq!(filter.values().len(), 2);
    }
}
