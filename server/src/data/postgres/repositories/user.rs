//! User repository for PostgreSQL operations
//!
//! Users are soft-deleted: DELETE sets `deleted_at` and list queries skip
//! those rows, but votes and quotes keep their foreign keys intact.

use sqlx::PgPool;

use crate::data::error::DataError;
use crate::data::types::UserRow;

/// Create a new user account
///
/// A duplicate (auth_provider, provider_user_id) pair is a conflict.
pub async fn create_user(
    pool: &PgPool,
    auth_provider: &str,
    provider_user_id: &str,
    email: Option<&str>,
    display_name: Option<&str>,
    locale: Option<&str>,
) -> Result<UserRow, DataError> {
    let now = chrono::Utc::now().timestamp();

    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (auth_provider, provider_user_id, email, display_name, locale,
                           created_at, updated_at)
        VALUES ($1, $2, $3, $4, COALESCE($5, 'fr'), $6, $6)
        RETURNING *
        "#,
    )
    .bind(auth_provider)
    .bind(provider_user_id)
    .bind(email)
    .bind(display_name)
    .bind(locale)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| DataError::from_insert(e.into(), "account already exists for this provider"))?;

    Ok(row)
}

/// List users, most recent first, excluding soft-deleted rows
pub async fn list_users(pool: &PgPool, limit: u32) -> Result<Vec<UserRow>, DataError> {
    let rows = sqlx::query_as::<_, UserRow>(
        "SELECT * FROM users WHERE deleted_at IS NULL ORDER BY created_at DESC LIMIT $1",
    )
    .bind(limit as i64)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Get a user by ID (soft-deleted rows are not found)
pub async fn get_user(pool: &PgPool, id: i64) -> Result<Option<UserRow>, DataError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT * FROM users WHERE id = $1 AND deleted_at IS NULL",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Update a user's profile fields
pub async fn update_user(
    pool: &PgPool,
    id: i64,
    display_name: Option<&str>,
    email: Option<&str>,
) -> Result<Option<UserRow>, DataError> {
    let now = chrono::Utc::now().timestamp();

    let row = sqlx::query_as::<_, UserRow>(
        r#"
        UPDATE users
        SET display_name = COALESCE($1, display_name),
            email = COALESCE($2, email),
            updated_at = $3
        WHERE id = $4 AND deleted_at IS NULL
        RETURNING *
        "#,
    )
    .bind(display_name)
    .bind(email)
    .bind(now)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Soft-delete a user. Returns false if the user does not exist or is
/// already deleted, so a repeated DELETE surfaces as not-found.
pub async fn soft_delete_user(pool: &PgPool, id: i64) -> Result<bool, DataError> {
    let now = chrono::Utc::now().timestamp();

    let result = sqlx::query(
        "UPDATE users SET deleted_at = $1, updated_at = $1 WHERE id = $2 AND deleted_at IS NULL",
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
