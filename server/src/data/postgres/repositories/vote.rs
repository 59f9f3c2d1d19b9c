//! Vote repository for PostgreSQL operations
//!
//! The partial unique indexes on votes carry the one-vote-per-quote rule;
//! a duplicate insert surfaces as a conflict, never a generic failure.
//! Concurrent duplicates race at the database and exactly one wins.

use sqlx::PgPool;

use crate::data::error::DataError;
use crate::data::types::{Author, VoteRow};

/// Cast a vote on a quote
///
/// Inserts the vote and bumps the quote's denormalized `vote_count` in one
/// transaction. `vote_period` is stored verbatim; the server neither computes
/// nor validates it beyond non-emptiness at the API layer.
pub async fn cast_vote(
    pool: &PgPool,
    quote_id: i64,
    author: &Author,
    vote_period: &str,
) -> Result<VoteRow, DataError> {
    let now = chrono::Utc::now().timestamp();

    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, VoteRow>(
        r#"
        INSERT INTO votes (quote_id, user_id, device_id, vote_period, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(quote_id)
    .bind(author.user_id())
    .bind(author.device_id())
    .bind(vote_period)
    .bind(now)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| DataError::from_insert(e.into(), "already voted on this quote"))?;

    sqlx::query("UPDATE quotes SET vote_count = vote_count + 1, updated_at = $1 WHERE id = $2")
        .bind(now)
        .bind(quote_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(row)
}
