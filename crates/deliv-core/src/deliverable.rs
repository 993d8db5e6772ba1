use crate::error::DelivError;
use crate::types::Status;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Deliverable
// ---------------------------------------------------------------------------

/// A single tracked work item.
///
/// Status is held as a [`Status`] enum, so the persisted `passed && blocked`
/// combination cannot be represented. Serialization goes through
/// [`DeliverableRecord`], which keeps the on-disk two-boolean shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DeliverableRecord", into = "DeliverableRecord")]
pub struct Deliverable {
    pub id: String,
    pub description: String,
    pub acceptance_criteria: Vec<String>,
    pub status: Status,
    pub deprecated: bool,
    pub deprecated_at: Option<DateTime<Utc>>,
}

impl Deliverable {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        acceptance_criteria: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            acceptance_criteria,
            status: Status::Pending,
            deprecated: false,
            deprecated_at: None,
        }
    }

    pub fn passed(&self) -> bool {
        self.status == Status::Passed
    }

    pub fn blocked(&self) -> bool {
        self.status == Status::Blocked
    }

    pub fn is_active(&self) -> bool {
        !self.deprecated
    }
}

impl From<NewDeliverable> for Deliverable {
    fn from(input: NewDeliverable) -> Self {
        Deliverable::new(input.id, input.description, input.acceptance_criteria)
    }
}

// ---------------------------------------------------------------------------
// NewDeliverable
// ---------------------------------------------------------------------------

/// One entry of a batch-create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDeliverable {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
}

impl NewDeliverable {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        acceptance_criteria: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            acceptance_criteria: acceptance_criteria.into_iter().map(Into::into).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Persisted record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverableRecord {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
    #[serde(default)]
    pub passed: bool,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated_at: Option<DateTime<Utc>>,
}

impl TryFrom<DeliverableRecord> for Deliverable {
    type Error = DelivError;

    fn try_from(record: DeliverableRecord) -> Result<Self, Self::Error> {
        let status = Status::from_flags(record.passed, record.blocked)
            .ok_or_else(|| DelivError::ConflictingFlags(record.id.clone()))?;
        Ok(Deliverable {
            id: record.id,
            description: record.description,
            acceptance_criteria: record.acceptance_criteria,
            status,
            deprecated: record.deprecated,
            deprecated_at: record.deprecated_at,
        })
    }
}

impl From<Deliverable> for DeliverableRecord {
    fn from(d: Deliverable) -> Self {
        let (passed, blocked) = d.status.to_flags();
        DeliverableRecord {
            id: d.id,
            description: d.description,
            acceptance_criteria: d.acceptance_criteria,
            passed,
            blocked,
            deprecated: d.deprecated,
            deprecated_at: d.deprecated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_deliverable_is_pending() {
        let d = Deliverable::new("DL-001", "Login page", vec!["renders".into()]);
        assert_eq!(d.status, Status::Pending);
        assert!(!d.passed());
        assert!(!d.blocked());
        assert!(d.is_active());
        assert!(d.deprecated_at.is_none());
    }

    #[test]
    fn serializes_with_flag_pair() {
        let mut d = Deliverable::new("DL-001", "X", vec!["a".into()]);
        d.status = Status::Blocked;
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["id"], "DL-001");
        assert_eq!(v["acceptanceCriteria"][0], "a");
        assert_eq!(v["passed"], false);
        assert_eq!(v["blocked"], true);
        assert_eq!(v["deprecated"], false);
        assert!(v.get("deprecatedAt").is_none());
    }

    #[test]
    fn missing_flags_default_to_pending() {
        let d: Deliverable =
            serde_json::from_str(r#"{"id":"DL-002","description":"Y"}"#).unwrap();
        assert_eq!(d.status, Status::Pending);
        assert!(d.acceptance_criteria.is_empty());
        assert!(!d.deprecated);
    }

    #[test]
    fn rejects_passed_and_blocked() {
        let err = serde_json::from_str::<Deliverable>(
            r#"{"id":"DL-003","description":"Z","passed":true,"blocked":true}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("both passed and blocked"));
    }

    #[test]
    fn new_deliverable_input_accepts_camel_case() {
        let input: NewDeliverable = serde_json::from_str(
            r#"{"id":"DL-004","description":"W","acceptanceCriteria":["one","two"]}"#,
        )
        .unwrap();
        assert_eq!(input.acceptance_criteria, vec!["one", "two"]);
        let d = Deliverable::from(input);
        assert_eq!(d.id, "DL-004");
    }
}
