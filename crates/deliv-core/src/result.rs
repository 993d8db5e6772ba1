use crate::deliverable::Deliverable;
use crate::error::{DelivError, ErrorKind};
use crate::query::{ListFilter, Listing};
use serde::{Deserialize, Serialize};

/// What an adapter command hands back to the invoking agent: a success flag
/// and a message meant to be shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
}

impl OperationResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error: None,
        }
    }

    pub fn failed(err: &DelivError) -> Self {
        Self {
            success: false,
            message: err.to_string(),
            error: Some(err.kind()),
        }
    }
}

impl From<crate::error::Result<String>> for OperationResult {
    fn from(result: crate::error::Result<String>) -> Self {
        match result {
            Ok(message) => OperationResult::ok(message),
            Err(e) => OperationResult::failed(&e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResult {
    pub success: bool,
    pub message: String,
    pub deliverables: Vec<Deliverable>,
    pub filter: ListFilter,
}

impl From<Listing> for ListResult {
    fn from(listing: Listing) -> Self {
        let message = format!("Found {} deliverable(s)", listing.deliverables.len());
        Self {
            success: true,
            message,
            deliverables: listing.deliverables,
            filter: listing.filter,
        }
    }
}
