pub mod config;
pub mod deliverable;
pub mod error;
pub mod io;
pub mod ops;
pub mod paths;
pub mod query;
pub mod repository;
pub mod result;
pub mod service;
pub mod status;
pub mod types;
pub mod verification;

pub use deliverable::{Deliverable, NewDeliverable};
pub use error::{DelivError, ErrorKind, Result};
pub use ops::StatusChange;
pub use query::ListFilter;
pub use repository::{DeliverableRepository, FileRepository, MemoryRepository};
pub use result::{ListResult, OperationResult};
pub use service::DeliverableService;
pub use status::DeliverableStatus;
pub use types::Status;
pub use verification::VerificationTracker;
