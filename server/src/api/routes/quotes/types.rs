//! Quote API types
//!
//! Includes the `user_has_voted` annotation applied to listings from a
//! single batched voted-id set.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::types::{ApiError, OrderBy, default_limit};
use crate::data::types::{Author, QuoteRow};

/// Columns a quote listing may sort by
pub const QUOTE_SORT_COLUMNS: &[&str] = &[
    "created_at",
    "updated_at",
    "vote_count",
    "trending_score",
    "bayesian_score",
];

/// Quote DTO for API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteDto {
    pub id: i64,
    pub user_id: Option<i64>,
    pub device_id: Option<String>,
    pub child_name: Option<String>,
    pub child_age_years: Option<i32>,
    pub child_age_months: Option<i32>,
    pub quote: String,
    pub context: Option<String>,
    pub language: String,
    pub status: String,
    pub vote_count: i32,
    pub report_count: i32,
    pub trending_score: f64,
    pub bayesian_score: f64,
    pub user_has_voted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuoteDto {
    fn new(row: QuoteRow, user_has_voted: bool) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            device_id: row.device_id,
            child_name: row.child_name,
            child_age_years: row.child_age_years,
            child_age_months: row.child_age_months,
            quote: row.quote,
            context: row.context,
            language: row.language,
            status: row.status,
            vote_count: row.vote_count,
            report_count: row.report_count,
            trending_score: row.trending_score,
            bayesian_score: row.bayesian_score,
            user_has_voted,
            created_at: DateTime::from_timestamp(row.created_at, 0).unwrap_or_else(Utc::now),
            updated_at: DateTime::from_timestamp(row.updated_at, 0).unwrap_or_else(Utc::now),
        }
    }
}

impl From<QuoteRow> for QuoteDto {
    fn from(row: QuoteRow) -> Self {
        Self::new(row, false)
    }
}

/// Annotate quotes with `user_has_voted` from a batched voted-id set
pub fn annotate_voted(rows: Vec<QuoteRow>, voted: &HashSet<i64>) -> Vec<QuoteDto> {
    rows.into_iter()
        .map(|row| {
            let has_voted = voted.contains(&row.id);
            QuoteDto::new(row, has_voted)
        })
        .collect()
}

/// Request body for submitting a quote
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateQuoteRequest {
    pub user_id: Option<i64>,
    #[validate(length(min = 1, max = 256, message = "device_id must be 1-256 characters"))]
    pub device_id: Option<String>,
    #[validate(length(max = 50, message = "Child name must be at most 50 characters"))]
    pub child_name: Option<String>,
    #[validate(range(min = 0, max = 18, message = "Age must be 0-18 years"))]
    pub child_age_years: Option<i32>,
    #[validate(range(min = 0, max = 11, message = "Age months must be 0-11"))]
    pub child_age_months: Option<i32>,
    #[validate(length(min = 5, max = 800, message = "Quote must be 5-800 characters"))]
    pub quote: String,
    #[validate(length(max = 500, message = "Context must be at most 500 characters"))]
    pub context: Option<String>,
    #[validate(length(min = 2, max = 10, message = "Language must be 2-10 characters"))]
    pub language: Option<String>,
}

/// Request body for editing a quote
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateQuoteRequest {
    #[validate(length(min = 5, max = 800, message = "Quote must be 5-800 characters"))]
    pub quote: Option<String>,
    #[validate(length(max = 500, message = "Context must be at most 500 characters"))]
    pub context: Option<String>,
}

/// Query parameters for listing quotes
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ListQuotesQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Column to sort by (default `created_at`)
    pub sort_by: Option<String>,
    /// Sort direction, `asc` or `desc` (default `desc`)
    pub order: Option<String>,
    /// Requester identity for the `user_has_voted` annotation
    pub user_id: Option<i64>,
    #[validate(length(min = 1, max = 256, message = "device_id must be 1-256 characters"))]
    pub device_id: Option<String>,
}

impl ListQuotesQuery {
    /// Resolve `sort_by` and `order` against the sortable-column allow-list
    pub fn order_by(&self) -> Result<OrderBy, ApiError> {
        let column = self.sort_by.as_deref().unwrap_or("created_at");
        match self.order.as_deref() {
            None => OrderBy::parse(column, QUOTE_SORT_COLUMNS),
            Some(dir) => OrderBy::parse(&format!("{}:{}", column, dir), QUOTE_SORT_COLUMNS),
        }
    }

    /// Resolve the optional requester identity.
    ///
    /// Neither reference means an anonymous listing (annotation all-false);
    /// both at once is a validation error.
    pub fn requester(&self) -> Result<Option<Author>, ApiError> {
        match (self.user_id, self.device_id.clone()) {
            (None, None) => Ok(None),
            (Some(_), Some(_)) => Err(ApiError::bad_request(
                "BOTH_IDENTITIES",
                "Provide user_id or device_id, not both",
            )),
            (uid, did) => Author::from_refs(uid, did)
                .map(Some)
                .map_err(|e| ApiError::bad_request("INVALID_AUTHOR", e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote_row(id: i64) -> QuoteRow {
        QuoteRow {
            id,
            user_id: Some(1),
            device_id: None,
            child_name: None,
            child_age_years: None,
            child_age_months: None,
            quote: "Why is the moon following us?".to_string(),
            context: None,
            language: "fr".to_string(),
            status: "approved".to_string(),
            moderation_method: None,
            rejection_reason: None,
            moderation_notes: None,
            moderated_at: None,
            moderated_by: None,
            ai_safety_score: None,
            ai_quality_score: None,
            vote_count: 0,
            report_count: 0,
            trending_score: 0.0,
            bayesian_score: 0.0,
            published_at: None,
            created_at: 1_700_000_000,
            updated_at: 1_700_000_000,
            deleted_at: None,
        }
    }

    #[test]
    fn test_annotation_marks_only_voted_quotes() {
        let rows = vec![quote_row(1), quote_row(2), quote_row(3)];
        let voted: HashSet<i64> = [1, 3].into_iter().collect();

        let dtos = annotate_voted(rows, &voted);
        assert!(dtos[0].user_has_voted);
        assert!(!dtos[1].user_has_voted);
        assert!(dtos[2].user_has_voted);
    }

    #[test]
    fn test_annotation_with_empty_set_is_all_false() {
        let dtos = annotate_voted(vec![quote_row(1), quote_row(2)], &HashSet::new());
        assert!(dtos.iter().all(|d| !d.user_has_voted));
    }

    #[test]
    fn test_requester_identity_rules() {
        let base = |user_id, device_id| ListQuotesQuery {
            limit: 50,
            sort_by: None,
            order: None,
            user_id,
            device_id,
        };

        assert!(base(None, None).requester().unwrap().is_none());
        assert_eq!(
            base(Some(7), None).requester().unwrap(),
            Some(Author::User(7))
        );
        assert_eq!(
            base(None, Some("d1".to_string())).requester().unwrap(),
            Some(Author::Device("d1".to_string()))
        );
        assert!(base(Some(7), Some("d1".to_string())).requester().is_err());
    }

    #[test]
    fn test_order_by_defaults_and_rejects_unknown_columns() {
        let query = |sort_by: Option<&str>, order: Option<&str>| ListQuotesQuery {
            limit: 50,
            sort_by: sort_by.map(String::from),
            order: order.map(String::from),
            user_id: None,
            device_id: None,
        };

        let default = query(None, None).order_by().unwrap();
        assert_eq!(default.column, "created_at");
        assert!(default.is_descending());

        let asc = query(Some("vote_count"), Some("asc")).order_by().unwrap();
        assert_eq!(asc.column, "vote_count");
        assert!(!asc.is_descending());

        assert!(query(Some("ai_safety_score"), None).order_by().is_err());
        assert!(query(Some("vote_count"), Some("sideways")).order_by().is_err());
    }
}
