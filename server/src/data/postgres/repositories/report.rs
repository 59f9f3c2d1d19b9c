//! Report repository for PostgreSQL operations

use sqlx::PgPool;

use crate::data::error::DataError;
use crate::data::types::{AuthorRefs, ReportRow};

/// File a report against a quote
///
/// One report per (quote, user) and per (quote, device); duplicates are
/// conflicts. The quote's `report_count` is bumped in the same transaction.
pub async fn create_report(
    pool: &PgPool,
    quote_id: i64,
    author: &AuthorRefs,
    reason: &str,
    details: Option<&str>,
) -> Result<ReportRow, DataError> {
    author.validate()?;
    let now = chrono::Utc::now().timestamp();

    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, ReportRow>(
        r#"
        INSERT INTO reports (quote_id, user_id, device_id, reason, details, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(quote_id)
    .bind(author.user_id)
    .bind(author.device_id.as_deref())
    .bind(reason)
    .bind(details)
    .bind(now)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| DataError::from_insert(e.into(), "already reported this quote"))?;

    sqlx::query("UPDATE quotes SET report_count = report_count + 1, updated_at = $1 WHERE id = $2")
        .bind(now)
        .bind(quote_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(row)
}
