//! Port contracts for contest persistence.

mod repository;

pub use repository::{SubmissionRepository, SubmissionRepositoryError, SubmissionResult};
