//! Ranking API types

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::types::RankingRow;

/// Ranking snapshot row for API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct RankingDto {
    pub period: String,
    pub quote_id: i64,
    pub rank: i32,
    pub vote_count: i32,
    pub is_finalized: bool,
    pub created_at: DateTime<Utc>,
}

impl From<RankingRow> for RankingDto {
    fn from(row: RankingRow) -> Self {
        Self {
            period: row.period,
            quote_id: row.quote_id,
            rank: row.rank,
            vote_count: row.vote_count,
            is_finalized: row.is_finalized,
            created_at: DateTime::from_timestamp(row.created_at, 0).unwrap_or_else(Utc::now),
        }
    }
}

/// Periods are opaque to the server; only basic shape is enforced
pub fn is_valid_period(period: &str) -> bool {
    !period.is_empty() && period.len() <= 32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_shape() {
        assert!(is_valid_period("2026-08"));
        assert!(is_valid_period("weekly-34"));
        assert!(!is_valid_period(""));
        assert!(!is_valid_period(&"p".repeat(33)));
    }
}
