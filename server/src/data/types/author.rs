//! Authorship model for quotes, votes and reports
//!
//! Every authorable row is attributable to a user account or an anonymous
//! device through two nullable foreign keys. Votes require exactly one of the
//! two (strict rule); quotes and reports require at least one but tolerate
//! both (weak rule, preserved as the schema has always enforced it). The
//! checks here run before any write; the CHECK constraints in the schema are
//! the storage-level backstop for writes that bypass this layer.

use thiserror::Error;

/// Validation failures for authorship references
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthorError {
    #[error("exactly one of user_id or device_id must be provided, got both")]
    BothProvided,

    #[error("exactly one of user_id or device_id must be provided, got neither")]
    NeitherProvided,

    #[error("at least one of user_id or device_id must be provided")]
    MissingAuthor,
}

/// A single attributed actor: registered user or anonymous device.
///
/// Construction through [`Author::from_refs`] is the application-level
/// enforcement of the strict XOR rule used by votes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Author {
    User(i64),
    Device(String),
}

impl Author {
    /// Build an author from the two optional references, rejecting both-set
    /// and neither-set before anything reaches the database.
    pub fn from_refs(user_id: Option<i64>, device_id: Option<String>) -> Result<Self, AuthorError> {
        match (user_id, device_id) {
            (Some(_), Some(_)) => Err(AuthorError::BothProvided),
            (None, None) => Err(AuthorError::NeitherProvided),
            (Some(uid), None) => Ok(Self::User(uid)),
            (None, Some(did)) => Ok(Self::Device(did)),
        }
    }

    /// The user reference column value for this author
    pub fn user_id(&self) -> Option<i64> {
        match self {
            Self::User(id) => Some(*id),
            Self::Device(_) => None,
        }
    }

    /// The device reference column value for this author
    pub fn device_id(&self) -> Option<&str> {
        match self {
            Self::User(_) => None,
            Self::Device(id) => Some(id),
        }
    }
}

/// Weak authorship references used by quotes and reports.
///
/// At least one reference must be present; both at once is tolerated, matching
/// the `user_id IS NOT NULL OR device_id IS NOT NULL` CHECK on those tables.
/// This asymmetry against the strict vote rule is deliberate (see DESIGN.md).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorRefs {
    pub user_id: Option<i64>,
    pub device_id: Option<String>,
}

impl AuthorRefs {
    pub fn new(user_id: Option<i64>, device_id: Option<String>) -> Self {
        Self { user_id, device_id }
    }

    /// Validate the at-least-one rule
    pub fn validate(&self) -> Result<(), AuthorError> {
        if self.user_id.is_none() && self.device_id.is_none() {
            return Err(AuthorError::MissingAuthor);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_rule_accepts_user_only() {
        let author = Author::from_refs(Some(7), None).unwrap();
        assert_eq!(author, Author::User(7));
        assert_eq!(author.user_id(), Some(7));
        assert_eq!(author.device_id(), None);
    }

    #[test]
    fn test_strict_rule_accepts_device_only() {
        let author = Author::from_refs(None, Some("dev-1".to_string())).unwrap();
        assert_eq!(author, Author::Device("dev-1".to_string()));
        assert_eq!(author.user_id(), None);
        assert_eq!(author.device_id(), Some("dev-1"));
    }

    #[test]
    fn test_strict_rule_rejects_both() {
        let err = Author::from_refs(Some(7), Some("dev-1".to_string())).unwrap_err();
        assert_eq!(err, AuthorError::BothProvided);
    }

    #[test]
    fn test_strict_rule_rejects_neither() {
        let err = Author::from_refs(None, None).unwrap_err();
        assert_eq!(err, AuthorError::NeitherProvided);
    }

    #[test]
    fn test_strict_rule_exhaustive_xor() {
        // Exactly one present <=> construction succeeds
        for user in [None, Some(1)] {
            for device in [None, Some("d".to_string())] {
                let expect_ok = user.is_some() != device.is_some();
                assert_eq!(
                    Author::from_refs(user, device.clone()).is_ok(),
                    expect_ok,
                    "user={:?} device={:?}",
                    user,
                    device
                );
            }
        }
    }

    #[test]
    fn test_weak_rule_accepts_both() {
        let refs = AuthorRefs::new(Some(7), Some("dev-1".to_string()));
        assert!(refs.validate().is_ok());
    }

    #[test]
    fn test_weak_rule_accepts_either() {
        assert!(AuthorRefs::new(Some(7), None).validate().is_ok());
        assert!(
            AuthorRefs::new(None, Some("dev-1".to_string()))
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_weak_rule_rejects_neither() {
        let err = AuthorRefs::new(None, None).validate().unwrap_err();
        assert_eq!(err, AuthorError::MissingAuthor);
    }
}
