//! Batch execution services.

mod executor;
mod processor;
mod reporter;

pub use executor::BatchExecutor;
pub use processor::MessageProcessor;
pub use reporter::{BATCH_REPORT_TITLE, ErrorReporter, GENERIC_FAILURE_BODY};
