use crate::deliverable::Deliverable;
use crate::status::DeliverableStatus;
use crate::types::Status;
use crate::verification::VerificationTracker;
use serde::{Deserialize, Serialize};

/// Criteria for [`list_deliverables`]. Unset fields do not constrain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

impl ListFilter {
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn verified(verified: bool) -> Self {
        Self {
            verified: Some(verified),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub deliverables: Vec<Deliverable>,
    pub filter: ListFilter,
}

/// Filter the active deliverables of `status`, preserving order, then truncate
/// to `limit`.
///
/// Deprecated deliverables never appear. The `verified` criterion only applies
/// when a tracker is supplied; without one it is ignored.
pub fn list_deliverables(
    status: &DeliverableStatus,
    tracker: Option<&VerificationTracker>,
    filter: ListFilter,
    limit: Option<usize>,
) -> Listing {
    let matching = status
        .active()
        .filter(|d| filter.status.map_or(true, |s| d.status == s))
        .filter(|d| match (filter.verified, tracker) {
            (Some(want), Some(t)) => t.is_verified(&d.id) == want,
            _ => true,
        })
        .take(limit.unwrap_or(usize::MAX))
        .cloned()
        .collect();

    Listing {
        deliverables: matching,
        filter,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
