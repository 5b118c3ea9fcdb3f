//! Batch domain types.

mod outcome;
mod splitter;

pub use outcome::{BatchResult, SegmentOutcome, SegmentReport};
pub use splitter::{COMPOUND_SEPARATOR, CompoundSplitter};
