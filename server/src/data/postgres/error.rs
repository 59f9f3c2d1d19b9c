//! PostgreSQL error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostgresError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration {version} ({name}) failed: {error}")]
    MigrationFailed {
        version: i32,
        name: String,
        error: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PostgresError {
    /// Whether the underlying database error is a unique constraint violation
    /// (SQLSTATE 23505). Used to turn duplicate inserts into conflicts instead
    /// of opaque storage failures.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Database(sqlx::Error::Database(db_err)) => {
                db_err.code().as_deref() == Some("23505")
            }
            _ => false,
        }
    }

    /// Whether the underlying database error is a foreign key violation
    /// (SQLSTATE 23503), raised when a write references a row that does not
    /// exist.
    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            Self::Database(sqlx::Error::Database(db_err)) => {
                db_err.code().as_deref() == Some("23503")
            }
            _ => false,
        }
    }

    /// The constraint name reported by the database, when available
    pub fn constraint(&self) -> Option<&str> {
        match self {
            Self::Database(sqlx::Error::Database(db_err)) => db_err.constraint(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_failed_error_display() {
        let err = PostgresError::MigrationFailed {
            version: 2,
            name: "add_votes_table".to_string(),
            error: "syntax error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Migration 2 (add_votes_table) failed: syntax error"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = PostgresError::Config("missing URL".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing URL");
    }

    #[test]
    fn test_non_database_errors_are_not_constraint_violations() {
        let err = PostgresError::Config("not a constraint".to_string());
        assert!(!err.is_unique_violation());
        assert!(!err.is_foreign_key_violation());
        assert!(err.constraint().is_none());
    }
}
