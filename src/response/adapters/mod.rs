//! Adapter implementations for the paste port.

pub mod hastebin;
pub mod memory;

pub use hastebin::HastebinUploader;
pub use memory::InMemoryPasteBin;
