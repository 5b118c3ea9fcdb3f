//! Contest orchestration services.

mod service;

pub use service::{ContestService, ContestServiceError, ContestServiceResult};
