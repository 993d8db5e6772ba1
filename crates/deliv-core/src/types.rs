use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Tracked state of a deliverable.
///
/// Persisted as two booleans (`passed`, `blocked`); see [`Status::from_flags`]
/// and [`Status::to_flags`] for the mapping at the storage boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Pending,
    Passed,
    Blocked,
}

impl Status {
    pub fn all() -> &'static [Status] {
        &[Status::Pending, Status::Passed, Status::Blocked]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Passed => "passed",
            Status::Blocked => "blocked",
        }
    }

    /// Decode the persisted flag pair. Returns `None` for the invalid
    /// `passed && blocked` combination.
    pub fn from_flags(passed: bool, blocked: bool) -> Option<Status> {
        match (passed, blocked) {
            (false, false) => Some(Status::Pending),
            (true, false) => Some(Status::Passed),
            (false, true) => Some(Status::Blocked),
            (true, true) => None,
        }
    }

    /// Encode as `(passed, blocked)`.
    pub fn to_flags(self) -> (bool, bool) {
        match self {
            Status::Pending => (false, false),
            Status::Passed => (true, false),
            Status::Blocked => (false, true),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = crate::error::DelivError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Status::Pending),
            "passed" => Ok(Status::Passed),
            "blocked" => Ok(Status::Blocked),
            _ => Err(crate::error::DelivError::InvalidStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parse_known_statuses() {
        for status in Status::all() {
            assert_eq!(Status::from_str(status.as_str()).unwrap(), *status);
        }
    }

    #[test]
    fn parse_rejects_unknown() {
        assert!(Status::from_str("done").is_err());
        assert!(Status::from_str("Passed").is_err());
        assert!(Status::from_str("").is_err());
    }

    #[test]
    fn flags_mapping() {
        assert_eq!(Status::Pending.to_flags(), (false, false));
        assert_eq!(Status::Passed.to_flags(), (true, false));
        assert_eq!(Status::Blocked.to_flags(), (false, true));
        assert_eq!(Status::from_flags(true, false), Some(Status::Passed));
        assert_eq!(Status::from_flags(true, true), None);
    }

    #[test]
    fn serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Status::Blocked).unwrap(),
            "\"blocked\""
        );
    }
}
