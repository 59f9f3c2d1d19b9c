//! Device repository for PostgreSQL operations

use sqlx::PgPool;

use crate::data::error::DataError;
use crate::data::types::DeviceRow;

/// Register an anonymous device
///
/// A duplicate fingerprint is a conflict; the client already owns a device id.
pub async fn register_device(
    pool: &PgPool,
    id: &str,
    device_fingerprint: &str,
    locale: Option<&str>,
    platform: Option<&str>,
    app_version: Option<&str>,
) -> Result<DeviceRow, DataError> {
    let now = chrono::Utc::now().timestamp();

    let row = sqlx::query_as::<_, DeviceRow>(
        r#"
        INSERT INTO devices (id, device_fingerprint, locale, platform, app_version, created_at, last_seen_at)
        VALUES ($1, $2, COALESCE($3, 'fr'), $4, $5, $6, $6)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(device_fingerprint)
    .bind(locale)
    .bind(platform)
    .bind(app_version)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| DataError::from_insert(e.into(), "device already registered"))?;

    Ok(row)
}

/// Get a device by ID
pub async fn get_device(pool: &PgPool, id: &str) -> Result<Option<DeviceRow>, DataError> {
    let row = sqlx::query_as::<_, DeviceRow>("SELECT * FROM devices WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Attach a device to a user account after sign-in
///
/// Returns the updated row, or None if the device does not exist.
pub async fn link_device(
    pool: &PgPool,
    id: &str,
    user_id: i64,
) -> Result<Option<DeviceRow>, DataError> {
    let now = chrono::Utc::now().timestamp();

    let row = sqlx::query_as::<_, DeviceRow>(
        "UPDATE devices SET user_id = $1, last_seen_at = $2 WHERE id = $3 RETURNING *",
    )
    .bind(user_id)
    .bind(now)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
