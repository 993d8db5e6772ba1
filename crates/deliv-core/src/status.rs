use crate::deliverable::Deliverable;
use crate::error::DelivError;
use crate::types::Status;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// StatusCounts
// ---------------------------------------------------------------------------

/// Tally of an aggregate. The three status counts cover active deliverables only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub passed: usize,
    pub blocked: usize,
    pub deprecated: usize,
}

impl StatusCounts {
    pub fn active(&self) -> usize {
        self.total - self.deprecated
    }
}

// ---------------------------------------------------------------------------
// DeliverableStatus
// ---------------------------------------------------------------------------

/// The aggregate root: every deliverable of a session plus provenance timestamps.
///
/// Insertion order is preserved and ids are unique. Values are never mutated in
/// place by the transition functions in [`crate::ops`]; each one returns a new
/// aggregate. Deserializing rejects data that repeats an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StatusRecord")]
pub struct DeliverableStatus {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deliverables: Vec<Deliverable>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusRecord {
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    deliverables: Vec<Deliverable>,
}

impl TryFrom<StatusRecord> for DeliverableStatus {
    type Error = DelivError;

    fn try_from(record: StatusRecord) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(record.deliverables.len());
        if let Some(dup) = record
            .deliverables
            .iter()
            .find(|d| !seen.insert(d.id.as_str()))
        {
            return Err(DelivError::DuplicatePersisted(dup.id.clone()));
        }
        Ok(DeliverableStatus {
            created_at: record.created_at,
            updated_at: record.updated_at,
            deliverables: record.deliverables,
        })
    }
}

impl Default for DeliverableStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliverableStatus {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            deliverables: Vec::new(),
        }
    }

    pub fn find(&self, id: &str) -> Option<&Deliverable> {
        self.deliverables.iter().find(|d| d.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.deliverables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deliverables.is_empty()
    }

    /// Non-deprecated deliverables, in insertion order.
    pub fn active(&self) -> impl Iterator<Item = &Deliverable> {
        self.deliverables.iter().filter(|d| d.is_active())
    }

    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts {
            total: self.deliverables.len(),
            ..StatusCounts::default()
        };
        for d in &self.deliverables {
            if d.deprecated {
                counts.deprecated += 1;
                continue;
            }
            match d.status {
                Status::Pending => counts.pending += 1,
                Status::Passed => counts.passed += 1,
                Status::Blocked => counts.blocked += 1,
            }
        }
        counts
    }

    /// True when at least one active deliverable exists and all of them passed.
    /// Deprecated deliverables are ignored.
    pub fn is_complete(&self) -> bool {
        let mut active = self.active().peekable();
        active.peek().is_some() && active.all(|d| d.passed())
    }

    /// Human-readable summary: "2/4 passed, 1 blocked, 1 pending, 1 deprecated"
    pub fn summarize(&self) -> String {
        let c = self.counts();
        let mut out = format!(
            "{}/{} passed, {} blocked, {} pending",
            c.passed,
            c.active(),
            c.blocked,
            c.pending
        );
        if c.deprecated > 0 {
            out.push_str(&format!(", {} deprecated", c.deprecated));
        }
        out
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
