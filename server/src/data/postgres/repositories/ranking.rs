//! Ranking repository for PostgreSQL operations
//!
//! Monthly rankings are precomputed snapshots. Finalizing a period ranks
//! quotes by the votes cast in that period and freezes the result; rows that
//! already exist for the period are kept as-is (conflict-skip), so repeated
//! finalization is idempotent.

use sqlx::PgPool;

use crate::data::error::DataError;
use crate::data::types::RankingRow;

/// List the snapshot for a period, rank ascending
pub async fn list_rankings(pool: &PgPool, period: &str) -> Result<Vec<RankingRow>, DataError> {
    let rows = sqlx::query_as::<_, RankingRow>(
        "SELECT * FROM monthly_rankings WHERE period = $1 ORDER BY rank ASC",
    )
    .bind(period)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Build and finalize the snapshot for a period
///
/// Ranks quotes by votes cast in the period (ties broken by quote id for a
/// stable order), inserts the snapshot with conflict-skip, then marks every
/// row of the period finalized. Returns the finalized snapshot.
pub async fn finalize_period(pool: &PgPool, period: &str) -> Result<Vec<RankingRow>, DataError> {
    let now = chrono::Utc::now().timestamp();

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO monthly_rankings (period, quote_id, rank, vote_count, is_finalized, created_at)
        SELECT $1,
               v.quote_id,
               ROW_NUMBER() OVER (ORDER BY COUNT(*) DESC, v.quote_id ASC)::INTEGER,
               COUNT(*)::INTEGER,
               FALSE,
               $2
        FROM votes v
        JOIN quotes q ON q.id = v.quote_id AND q.deleted_at IS NULL
        WHERE v.vote_period = $1
        GROUP BY v.quote_id
        ON CONFLICT (period, quote_id) DO NOTHING
        "#,
    )
    .bind(period)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE monthly_rankings SET is_finalized = TRUE WHERE period = $1")
        .bind(period)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    list_rankings(pool, period).await
}
