//! Contest domain types.

mod error;
mod submission;

pub use error::ContestDomainError;
pub use submission::{DEFAULT_MAX_RATING, MAX_SUBMISSION_ID, Submission, SubmissionId};
