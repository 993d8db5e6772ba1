use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DelivError {
    #[error("Duplicate ID `{0}` in request")]
    DuplicateInRequest(String),

    #[error("Deliverable `{0}` already exists")]
    AlreadyExists(String),

    #[error("Deliverable ID must not be empty")]
    EmptyId,

    #[error("Deliverable `{0}` not found")]
    NotFound(String),

    #[error("Deliverable `{0}` not found in this verification session")]
    UnknownToTracker(String),

    #[error("Deliverable `{0}` is already deprecated")]
    AlreadyDeprecated(String),

    #[error("Deliverable `{0}` is deprecated and its status cannot be changed")]
    Deprecated(String),

    #[error("invalid status '{0}': expected pending, passed, or blocked")]
    InvalidStatus(String),

    #[error("deliverable `{0}` is recorded as both passed and blocked")]
    ConflictingFlags(String),

    #[error("deliverable `{0}` is recorded more than once")]
    DuplicatePersisted(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl DelivError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DelivError::DuplicateInRequest(_)
            | DelivError::AlreadyExists(_)
            | DelivError::EmptyId
            | DelivError::InvalidStatus(_) => ErrorKind::Validation,
            DelivError::NotFound(_) | DelivError::UnknownToTracker(_) => ErrorKind::NotFound,
            DelivError::AlreadyDeprecated(_) | DelivError::Deprecated(_) => {
                ErrorKind::StateConflict
            }
            DelivError::ConflictingFlags(_)
            | DelivError::DuplicatePersisted(_)
            | DelivError::Io(_)
            | DelivError::Yaml(_)
            | DelivError::Json(_) => ErrorKind::Storage,
        }
    }

    /// True for rejections the caller can correct by changing its request.
    pub fn is_domain(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Storage)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    StateConflict,
    Storage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::StateConflict => "state_conflict",
            ErrorKind::Storage => "storage",
        };
        f.write_str(s)
    }
}

pub type Result<T> = std::result::Result<T, DelivError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_id() {
        assert_eq!(
            DelivError::DuplicateInRequest("DL-001".into()).to_string(),
            "Duplicate ID `DL-001` in request"
        );
        assert_eq!(
            DelivError::AlreadyExists("DL-001".into()).to_string(),
            "Deliverable `DL-001` already exists"
        );
        assert!(DelivError::NotFound("DL-9".into())
            .to_string()
            .contains("not found"));
        assert!(DelivError::AlreadyDeprecated("DL-9".into())
            .to_string()
            .contains("already deprecated"));
    }

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(
            DelivError::DuplicateInRequest("a".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(DelivError::NotFound("a".into()).kind(), ErrorKind::NotFound);
        assert_eq!(
            DelivError::UnknownToTracker("a".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            DelivError::Deprecated("a".into()).kind(),
            ErrorKind::StateConflict
        );
        assert_eq!(
            DelivError::AlreadyDeprecated("a".into()).kind(),
            ErrorKind::StateConflict
        );
        assert!(!DelivError::ConflictingFlags("a".into()).is_domain());
        assert_eq!(
            DelivError::DuplicatePersisted("a".into()).kind(),
            ErrorKind::Storage
        );
    }
}
