//! Port contracts for extensions.

mod extension;

pub use extension::{Extension, ExtensionError};
