use crate::error::{DelivError, Result};
use crate::status::DeliverableStatus;
use std::collections::HashSet;

/// Session-scoped record of which deliverables an external verification pass
/// has confirmed.
///
/// The set of known ids is captured once, at construction. Deliverables
/// created afterwards are unknown to this tracker and cannot be verified
/// through it; start a new tracker for a new pass. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct VerificationTracker {
    known: Vec<String>,
    known_set: HashSet<String>,
    verified: HashSet<String>,
}

impl VerificationTracker {
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tracker = Self::default();
        for id in ids {
            let id = id.into();
            if tracker.known_set.insert(id.clone()) {
                tracker.known.push(id);
            }
        }
        tracker
    }

    /// Snapshot the active (non-deprecated) deliverables of an aggregate.
    pub fn from_status(status: &DeliverableStatus) -> Self {
        Self::from_ids(status.active().map(|d| d.id.clone()))
    }

    /// Mark `id` as verified. Unknown ids are rejected and leave state unchanged.
    pub fn verify(&mut self, id: &str) -> Result<String> {
        if !self.known_set.contains(id) {
            return Err(DelivError::UnknownToTracker(id.to_string()));
        }
        self.verified.insert(id.to_string());
        Ok(format!("Deliverable `{id}` marked as verified"))
    }

    pub fn is_verified(&self, id: &str) -> bool {
        self.verified.contains(id)
    }

    pub fn is_known(&self, id: &str) -> bool {
        self.known_set.contains(id)
    }

    pub fn known_ids(&self) -> &[String] {
        &self.known
    }

    /// Known ids not yet verified, in snapshot order.
    pub fn unverified(&self) -> Vec<&str> {
        self.known
            .iter()
            .filter(|id| !self.verified.contains(*id))
            .map(String::as_str)
            .collect()
    }

    pub fn verified_count(&self) -> usize {
        self.verified.len()
    }

    /// False for an empty tracker.
    pub fn all_verified(&self) -> bool {
        !self.known.is_empty() && self.verified.len() == self.known.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
