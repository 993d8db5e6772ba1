use crate::deliverable::{Deliverable, NewDeliverable};
use crate::error::{DelivError, Result};
use crate::status::DeliverableStatus;
use crate::types::Status;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// A successful transition: the new aggregate and the message for the caller.
#[derive(Debug, Clone)]
pub struct Applied {
    pub status: DeliverableStatus,
    pub message: String,
}

/// A successful status change, carrying the notification payload.
#[derive(Debug, Clone)]
pub struct StatusApplied {
    pub status: DeliverableStatus,
    pub message: String,
    pub change: StatusChange,
}

/// Payload delivered to status-change listeners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub deliverable_id: String,
    pub deliverable_description: String,
    pub previous_status: Status,
    pub new_status: Status,
}

// ---------------------------------------------------------------------------
// Transitions (borrow the input, return a new aggregate)
// ---------------------------------------------------------------------------

/// Append a batch of new deliverables. All-or-nothing.
pub fn create_deliverables(
    current: &DeliverableStatus,
    batch: &[NewDeliverable],
) -> Result<Applied> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(batch.len());
    for item in batch {
        if !seen.insert(item.id.as_str()) {
            return Err(DelivError::DuplicateInRequest(item.id.clone()));
        }
    }
    if let Some(item) = batch.iter().find(|item| current.contains(&item.id)) {
        return Err(DelivError::AlreadyExists(item.id.clone()));
    }
    if batch.iter().any(|item| item.id.is_empty()) {
        return Err(DelivError::EmptyId);
    }

    let mut next = current.clone();
    next.deliverables.extend(batch.iter().cloned().map(Deliverable::from));
    next.touch();

    Ok(Applied {
        status: next,
        message: format!("Created {} deliverable(s)", batch.len()),
    })
}

/// Set a deliverable's status. The transition is absolute: the prior status
/// only feeds the notification payload.
pub fn set_status(current: &DeliverableStatus, id: &str, status: Status) -> Result<StatusApplied> {
    let idx = position(current, id)?;
    let existing = &current.deliverables[idx];
    if existing.deprecated {
        return Err(DelivError::Deprecated(id.to_string()));
    }

    let change = StatusChange {
        deliverable_id: existing.id.clone(),
        deliverable_description: existing.description.clone(),
        previous_status: existing.status,
        new_status: status,
    };

    let mut next = current.clone();
    next.deliverables[idx].status = status;
    next.touch();

    Ok(StatusApplied {
        status: next,
        message: format!("Deliverable `{id}` marked as {status}"),
        change,
    })
}

/// Permanently retire a deliverable. The record stays in the aggregate.
pub fn deprecate(current: &DeliverableStatus, id: &str) -> Result<Applied> {
    let idx = position(current, id)?;
    if current.deliverables[idx].deprecated {
        return Err(DelivError::AlreadyDeprecated(id.to_string()));
    }

    let mut next = current.clone();
    let target = &mut next.deliverables[idx];
    target.deprecated = true;
    target.deprecated_at = Some(Utc::now());
    next.touch();

    Ok(Applied {
        status: next,
        message: format!("Deliverable `{id}` deprecated"),
    })
}

fn position(current: &DeliverableStatus, id: &str) -> Result<usize> {
    current
        .deliverables
        .iter()
        .position(|d| d.id == id)
        .ok_or_else(|| DelivError::NotFound(id.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn item(id: &str) -> NewDeliverable {
        NewDeliverable::new(id, format!("{id} description"), ["criterion"])
    }

    fn seeded(ids: &[&str]) -> DeliverableStatus {
        let batch: Vec<_> = ids.iter().map(|id| item(id)).collect();
        create_deliverables(&DeliverableStatus::new(), &batch)
            .unwrap()
            .status
    }

    #[test]
    fn create_appends_in_order() {
        let agg = seeded(&["DL-001"]);
        let applied = create_deliverables(&agg, &[item("DL-002"), item("DL-003")]).unwrap();
        let ids: Vec<_> = applied
            .status
            .deliverables
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, ["DL-001", "DL-002", "DL-003"]);
        assert_eq!(applied.message, "Created 2 deliverable(s)");
        assert!(applied
            .status
            .deliverables
            .iter()
            .all(|d| d.status == Status::Pending && !d.deprecated));
        assert!(applied.status.updated_at >= agg.updated_at);
        // input untouched
        assert_eq!(agg.len(), 1);
    }

    #[test]
    fn create_rejects_duplicate_within_batch() {
        let agg = seeded(&["DL-001"]);
        let err = create_deliverables(&agg, &[item("DL-002"), item("DL-003"), item("DL-002")])
            .unwrap_err();
        assert_eq!(err.to_string(), "Duplicate ID `DL-002` in request");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(agg.len(), 1);
    }

    #[test]
    fn batch_duplicate_is_reported_before_existing() {
        let agg = seeded(&["DL-001"]);
        let err = create_deliverables(&agg, &[item("DL-001"), item("DL-002"), item("DL-002")])
            .unwrap_err();
        assert!(matches!(err, DelivError::DuplicateInRequest(id) if id == "DL-002"));
    }

    #[test]
    fn create_rejects_existing_id() {
        let agg = seeded(&["DL-001"]);
        let err = create_deliverables(&agg, &[item("DL-002"), item("DL-001")]).unwrap_err();
        assert_eq!(err.to_string(), "Deliverable `DL-001` already exists");
    }

    #[test]
    fn create_rejects_empty_id() {
        let err = create_deliverables(&DeliverableStatus::new(), &[item("")]).unwrap_err();
        assert!(matches!(err, DelivError::EmptyId));
    }

    #[test]
    fn ids_match_exactly() {
        let agg = seeded(&["DL-001"]);
        assert!(create_deliverables(&agg, &[item("dl-001"), item("DL-001 ")]).is_ok());
        assert!(set_status(&agg, "dl-001", Status::Passed).is_err());
    }

    #[test]
    fn set_status_is_absolute() {
        let agg = seeded(&["DL-001"]);
        let blocked = set_status(&agg, "DL-001", Status::Blocked).unwrap().status;
        let pending = set_status(&blocked, "DL-001", Status::Pending).unwrap().status;
        let d = pending.find("DL-001").unwrap();
        assert!(!d.passed() && !d.blocked());

        let passed = set_status(&blocked, "DL-001", Status::Passed).unwrap().status;
        let d = passed.find("DL-001").unwrap();
        assert!(d.passed() && !d.blocked());
    }

    #[test]
    fn set_status_is_idempotent() {
        let agg = seeded(&["DL-001"]);
        let once = set_status(&agg, "DL-001", Status::Passed).unwrap();
        let twice = set_status(&once.status, "DL-001", Status::Passed).unwrap();
        assert_eq!(
            once.status.find("DL-001").unwrap().status,
            twice.status.find("DL-001").unwrap().status
        );
        assert_eq!(twice.change.previous_status, Status::Passed);
        assert_eq!(twice.change.new_status, Status::Passed);
    }

    #[test]
    fn set_status_reports_change() {
        let agg = seeded(&["DL-001"]);
        let applied = set_status(&agg, "DL-001", Status::Passed).unwrap();
        assert_eq!(applied.message, "Deliverable `DL-001` marked as passed");
        assert_eq!(
            applied.change,
            StatusChange {
                deliverable_id: "DL-001".into(),
                deliverable_description: "DL-001 description".into(),
                previous_status: Status::Pending,
                new_status: Status::Passed,
            }
        );
    }

    #[test]
    fn set_status_unknown_id() {
        let agg = seeded(&["DL-001"]);
        let err = set_status(&agg, "DL-404", Status::Passed).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn set_status_on_deprecated_conflicts() {
        let agg = seeded(&["DL-001"]);
        let agg = deprecate(&agg, "DL-001").unwrap().status;
        let err = set_status(&agg, "DL-001", Status::Passed).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StateConflict);
        assert_eq!(agg.find("DL-001").unwrap().status, Status::Pending);
    }

    #[test]
    fn deprecate_keeps_record() {
        let agg = seeded(&["DL-001", "DL-002"]);
        let applied = deprecate(&agg, "DL-001").unwrap();
        assert_eq!(applied.status.len(), 2);
        let d = applied.status.find("DL-001").unwrap();
        assert!(d.deprecated);
        assert!(d.deprecated_at.is_some());
        assert!(!agg.find("DL-001").unwrap().deprecated);
    }

    #[test]
    fn deprecate_twice_fails() {
        let agg = seeded(&["DL-001"]);
        let agg = deprecate(&agg, "DL-001").unwrap().status;
        let err = deprecate(&agg, "DL-001").unwrap_err();
        assert!(err.to_string().contains("already deprecated"));
        assert_eq!(err.kind(), ErrorKind::StateConflict);
    }

    #[test]
    fn deprecate_unknown_id() {
        let err = deprecate(&DeliverableStatus::new(), "DL-001").unwrap_err();
        assert!(matches!(err, DelivError::NotFound(_)));
    }
}
