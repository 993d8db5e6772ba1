//! Command adapter over a [`DeliverableRepository`].
//!
//! Each command loads the aggregate, runs a pure transition from
//! [`crate::ops`], and saves only when the transition succeeded. Domain
//! rejections come back as an unsuccessful [`OperationResult`]; only storage
//! failures surface as `Err`.

use crate::deliverable::NewDeliverable;
use crate::error::{DelivError, Result};
use crate::ops::{self, StatusChange};
use crate::query::{self, ListFilter};
use crate::repository::DeliverableRepository;
use crate::result::{ListResult, OperationResult};
use crate::status::DeliverableStatus;
use crate::types::Status;
use crate::verification::VerificationTracker;

pub struct DeliverableService<R> {
    repo: R,
}

impl<R: DeliverableRepository> DeliverableService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn load(&self) -> Result<DeliverableStatus> {
        let status = self.repo.load()?;
        tracing::debug!(count = status.len(), "loaded deliverables");
        Ok(status)
    }

    pub fn create(&self, batch: &[NewDeliverable]) -> Result<OperationResult> {
        let current = self.load()?;
        match ops::create_deliverables(&current, batch) {
            Ok(applied) => {
                self.repo.save(&applied.status)?;
                tracing::info!(count = batch.len(), "created deliverables");
                Ok(OperationResult::ok(applied.message))
            }
            Err(e) => rejected("create", e),
        }
    }

    /// Set a deliverable's status. `notify` is called once, after the new
    /// aggregate has been saved, and never on failure.
    pub fn set_status(
        &self,
        id: &str,
        status: Status,
        notify: Option<&dyn Fn(&StatusChange)>,
    ) -> Result<OperationResult> {
        let current = self.load()?;
        match ops::set_status(&current, id, status) {
            Ok(applied) => {
                self.repo.save(&applied.status)?;
                tracing::info!(
                    id,
                    from = %applied.change.previous_status,
                    to = %applied.change.new_status,
                    "deliverable status changed"
                );
                if let Some(notify) = notify {
                    notify(&applied.change);
                }
                Ok(OperationResult::ok(applied.message))
            }
            Err(e) => rejected("set_status", e),
        }
    }

    pub fn deprecate(&self, id: &str) -> Result<OperationResult> {
        let current = self.load()?;
        match ops::deprecate(&current, id) {
            Ok(applied) => {
                self.repo.save(&applied.status)?;
                tracing::info!(id, "deliverable deprecated");
                Ok(OperationResult::ok(applied.message))
            }
            Err(e) => rejected("deprecate", e),
        }
    }

    pub fn list(
        &self,
        tracker: Option<&VerificationTracker>,
        filter: ListFilter,
        limit: Option<usize>,
    ) -> Result<ListResult> {
        let current = self.load()?;
        Ok(query::list_deliverables(&current, tracker, filter, limit).into())
    }

    /// Start a verification pass over the currently active deliverables.
    pub fn begin_verification(&self) -> Result<VerificationTracker> {
        let current = self.load()?;
        let tracker = VerificationTracker::from_status(&current);
        tracing::info!(
            known = tracker.known_ids().len(),
            "verification session started"
        );
        Ok(tracker)
    }
}

/// Record a verification against a session tracker. Touches no storage.
pub fn verify(tracker: &mut VerificationTracker, id: &str) -> OperationResult {
    let result = tracker.verify(id);
    if let Err(e) = &result {
        tracing::debug!(id, error = %e, "verification rejected");
    }
    result.into()
}

fn rejected(op: &str, e: DelivError) -> Result<OperationResult> {
    if !e.is_domain() {
        return Err(e);
    }
    tracing::debug!(op, error = %e, "command rejected");
    Ok(OperationResult::failed(&e))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
