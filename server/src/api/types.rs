//! Shared API types
//!
//! Error responses, sorting, and limit handling used across all endpoints.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::core::constants::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use crate::data::DataError;

pub fn default_limit() -> u32 {
    DEFAULT_LIST_LIMIT
}

/// Clamp a caller-supplied limit into [1, MAX_LIST_LIMIT]
pub fn clamp_limit(limit: u32) -> u32 {
    limit.clamp(1, MAX_LIST_LIMIT)
}

/// API error carrying its HTTP status and a machine-readable code.
///
/// Serializes as `{"error", "code", "message"}`; the `code` is the stable
/// contract clients branch on (QUOTE_NOT_FOUND, ALREADY_VOTED, ...).
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    code: String,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    code: &'a str,
    message: &'a str,
}

impl ApiError {
    fn new(
        status: StatusCode,
        kind: &'static str,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", code, message)
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", code, message)
    }

    pub fn conflict(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "conflict", code, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "INTERNAL",
            message,
        )
    }

    /// Map a data layer error to its default HTTP shape.
    ///
    /// Storage failures are logged here and surface as opaque 500s; the
    /// other variants carry enough context to keep their messages.
    pub fn from_data(e: DataError) -> Self {
        match e {
            DataError::Conflict(message) => Self::conflict("CONFLICT", message),
            DataError::Author(e) => Self::bad_request("INVALID_AUTHOR", e.to_string()),
            DataError::MissingReference { entity } => {
                let code = match entity {
                    "user" => "USER_NOT_FOUND",
                    "device" => "DEVICE_NOT_FOUND",
                    "quote" => "QUOTE_NOT_FOUND",
                    _ => "NOT_FOUND",
                };
                Self::not_found(code, format!("Referenced {} does not exist", entity))
            }
            DataError::Postgres(e) => {
                tracing::error!(error = %e, "Storage error");
                Self::internal("Database operation failed")
            }
        }
    }

    /// Like [`from_data`](Self::from_data) but with an endpoint-specific
    /// conflict code (ALREADY_VOTED, ALREADY_REPORTED, ...).
    pub fn from_data_with_conflict(e: DataError, conflict_code: &str) -> Self {
        match e {
            DataError::Conflict(message) => Self::conflict(conflict_code, message),
            other => Self::from_data(other),
        }
    }

    #[cfg(test)]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[cfg(test)]
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.kind,
            code: &self.code,
            message: &self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// OrderBy query parameter parsing
#[derive(Debug, Clone)]
pub struct OrderBy {
    pub column: String,
    pub direction: OrderDirection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderDirection {
    #[default]
    Desc,
    Asc,
}

impl OrderBy {
    /// Parse `column`, `column:asc`, or `column:desc` against an allow-list.
    /// Rejecting unknown columns keeps the name out of any SQL we build.
    pub fn parse(s: &str, allowed_columns: &[&str]) -> Result<Self, ApiError> {
        let (column, direction) = match s.split_once(':') {
            None => (s, OrderDirection::Desc),
            Some((col, "asc")) => (col, OrderDirection::Asc),
            Some((col, "desc")) => (col, OrderDirection::Desc),
            Some(_) => {
                return Err(ApiError::bad_request(
                    "INVALID_ORDER",
                    "Invalid sort format. Use 'column' or 'column:asc' or 'column:desc'",
                ));
            }
        };
        if !allowed_columns.contains(&column) {
            return Err(ApiError::bad_request(
                "INVALID_ORDER_COLUMN",
                format!("Cannot sort by: {}", column),
            ));
        }
        Ok(Self {
            column: column.to_string(),
            direction,
        })
    }

    pub fn is_descending(&self) -> bool {
        self.direction == OrderDirection::Desc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &[&str] = &["created_at", "vote_count"];

    #[test]
    fn test_order_by_defaults_to_descending() {
        let order = OrderBy::parse("vote_count", COLUMNS).unwrap();
        assert_eq!(order.column, "vote_count");
        assert!(order.is_descending());
    }

    #[test]
    fn test_order_by_explicit_direction() {
        let order = OrderBy::parse("created_at:asc", COLUMNS).unwrap();
        assert!(!order.is_descending());
    }

    #[test]
    fn test_order_by_rejects_unknown_column() {
        let err = OrderBy::parse("quote; DROP TABLE votes", COLUMNS);
        assert!(err.is_err());
    }

    #[test]
    fn test_order_by_rejects_bad_direction() {
        assert!(OrderBy::parse("created_at:sideways", COLUMNS).is_err());
    }

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(10), 10);
        assert_eq!(clamp_limit(10_000), MAX_LIST_LIMIT);
    }

    #[test]
    fn test_conflict_errors_keep_their_code() {
        let err = ApiError::from_data_with_conflict(
            DataError::Conflict("already voted on this quote".to_string()),
            "ALREADY_VOTED",
        );
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.code(), "ALREADY_VOTED");
    }

    #[test]
    fn test_missing_references_are_not_found() {
        let err = ApiError::from_data(DataError::MissingReference { entity: "user" });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "USER_NOT_FOUND");

        let err = ApiError::from_data(DataError::MissingReference { entity: "quote" });
        assert_eq!(err.code(), "QUOTE_NOT_FOUND");
    }

    #[test]
    fn test_author_errors_are_bad_requests() {
        use crate::data::types::AuthorError;

        let err = ApiError::from_data(DataError::Author(AuthorError::BothProvided));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "INVALID_AUTHOR");
    }
}
