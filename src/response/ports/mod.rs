//! Port contracts for the paste service.

mod paste;

pub use paste::{PasteError, PasteResult, PasteUploader};
