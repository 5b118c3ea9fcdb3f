//! Response orchestration services.

mod context;

pub use context::{DEFAULT_UPLOAD_TIMEOUT, ResponseContext, ResponseServices};
