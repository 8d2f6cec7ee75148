// ABOUTME: User management database operations
// ABOUTME: Handles account creation and lookups by id or case-insensitive email

use super::{count_as_u64, parse_enum, parse_uuid, Database, QueryTimer};
use athlyze_core::errors::AppResult;
use athlyze_core::models::User;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, name, email, password_hash, plan, is_active, created_at";

impl Database {
    /// Create users table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                plan TEXT NOT NULL DEFAULT 'starter' CHECK (plan IN ('starter', 'professional', 'enterprise')),
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Insert a new user
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_ALREADY_EXISTS` when the email is taken, or a
    /// database error
    pub async fn create_user(&self, user: &User) -> AppResult<Uuid> {
        let sql = r"
            INSERT INTO users (id, name, email, password_hash, plan, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
        ";
        let timer = QueryTimer::start("create_user");
        let result = sqlx::query(sql)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.plan.as_str())
            .bind(user.is_active)
            .bind(user.created_at)
            .execute(&self.pool)
            .await?;
        timer.finish(sql, result.rows_affected());

        Ok(user.id)
    }

    /// Get a user by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let timer = QueryTimer::start("get_user");
        let row = sqlx::query(&sql)
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        timer.finish(&sql, u64::from(row.is_some()));

        row.as_ref().map(Self::row_to_user).transpose()
    }

    /// Get a user by email, ignoring case
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.get_user_by_email_impl("get_user_by_email", email, false)
            .await
    }

    /// Get an active user by email, ignoring case
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_active_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.get_user_by_email_impl("get_active_user_by_email", email, true)
            .await
    }

    /// Whether an account already uses this email
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let sql = "SELECT COUNT(*) FROM users WHERE LOWER(email) = LOWER($1)";
        let timer = QueryTimer::start("email_exists");
        let count: i64 = sqlx::query_scalar(sql)
            .bind(email.trim())
            .fetch_one(&self.pool)
            .await?;
        timer.finish(sql, 1);

        Ok(count > 0)
    }

    /// Number of registered users
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn user_count(&self) -> AppResult<i64> {
        let sql = "SELECT COUNT(*) FROM users";
        let timer = QueryTimer::start("user_count");
        let count: i64 = sqlx::query_scalar(sql).fetch_one(&self.pool).await?;
        timer.finish(sql, 1);
        Ok(count)
    }

    async fn get_user_by_email_impl(
        &self,
        operation: &'static str,
        email: &str,
        active_only: bool,
    ) -> AppResult<Option<User>> {
        let mut sql = format!("SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)");
        if active_only {
            sql.push_str(" AND is_active = 1");
        }

        let timer = QueryTimer::start(operation);
        let rows = sqlx::query(&sql)
            .bind(email.trim())
            .fetch_all(&self.pool)
            .await?;
        timer.finish(&sql, count_as_u64(rows.len()));

        rows.first().map(Self::row_to_user).transpose()
    }

    /// Convert a database row to a User struct
    fn row_to_user(row: &SqliteRow) -> AppResult<User> {
        let created_at: DateTime<Utc> = row.try_get("created_at")?;
        Ok(User {
            id: parse_uuid(row, "id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            plan: parse_enum(row, "plan")?,
            is_active: row.try_get("is_active")?,
            created_at,
        })
    }
}
