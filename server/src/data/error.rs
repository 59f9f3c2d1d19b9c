//! Unified data layer error type

use thiserror::Error;

use super::postgres::PostgresError;
use super::types::AuthorError;

/// Errors surfaced by repository functions.
///
/// `Conflict` carries a caller-facing message so handlers can produce precise
/// HTTP responses; `MissingReference` names the entity a foreign key pointed
/// at; everything else stays a storage or authorship error.
#[derive(Error, Debug)]
pub enum DataError {
    #[error(transparent)]
    Postgres(#[from] PostgresError),

    #[error("Invalid author: {0}")]
    Author(#[from] AuthorError),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Referenced {entity} does not exist")]
    MissingReference { entity: &'static str },
}

impl From<sqlx::Error> for DataError {
    fn from(err: sqlx::Error) -> Self {
        Self::from_storage(err.into())
    }
}

/// Entity named by a foreign key constraint
/// (`votes_user_id_fkey` -> "user")
fn referenced_entity(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(c) if c.contains("quote_id") => "quote",
        Some(c) if c.contains("user_id") => "user",
        Some(c) if c.contains("device_id") => "device",
        _ => "row",
    }
}

impl DataError {
    /// Classify a storage error. A foreign key violation (SQLSTATE 23503)
    /// means the caller referenced a row that does not exist and becomes
    /// `MissingReference`; anything else passes through untouched.
    pub fn from_storage(err: PostgresError) -> Self {
        if err.is_foreign_key_violation() {
            let entity = referenced_entity(err.constraint());
            tracing::debug!(entity, "foreign key violation mapped to missing reference");
            Self::MissingReference { entity }
        } else {
            Self::Postgres(err)
        }
    }

    /// Like [`from_storage`](Self::from_storage), but a unique violation
    /// (SQLSTATE 23505) becomes `Conflict`, keeping duplicate inserts
    /// distinguishable from real failures.
    pub fn from_insert(err: PostgresError, conflict_message: &str) -> Self {
        if err.is_unique_violation() {
            tracing::debug!(
                constraint = err.constraint().unwrap_or("unknown"),
                "unique violation mapped to conflict"
            );
            Self::Conflict(conflict_message.to_string())
        } else {
            Self::from_storage(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_unique_violations_stay_storage_errors() {
        // is_unique_violation only matches sqlx database errors with code
        // 23505; anything else passes through untouched.
        let err = DataError::from_insert(
            PostgresError::Config("bad".to_string()),
            "already voted",
        );
        assert!(matches!(err, DataError::Postgres(PostgresError::Config(_))));
    }

    #[test]
    fn test_conflict_message_is_caller_facing() {
        let err = DataError::Conflict("already voted on this quote".to_string());
        assert_eq!(err.to_string(), "Conflict: already voted on this quote");
    }

    #[test]
    fn test_foreign_key_constraints_name_their_entity() {
        assert_eq!(referenced_entity(Some("votes_quote_id_fkey")), "quote");
        assert_eq!(referenced_entity(Some("votes_user_id_fkey")), "user");
        assert_eq!(referenced_entity(Some("quotes_device_id_fkey")), "device");
        assert_eq!(referenced_entity(Some("something_else")), "row");
        assert_eq!(referenced_entity(None), "row");
    }

    #[test]
    fn test_missing_reference_message_names_the_entity() {
        let err = DataError::MissingReference { entity: "user" };
        assert_eq!(err.to_string(), "Referenced user does not exist");
    }
}
