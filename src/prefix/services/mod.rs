//! Prefix cache, resolver and update service.

mod cache;
mod resolver;
mod service;

pub use cache::PrefixCache;
pub use resolver::PrefixResolver;
pub use service::{PrefixService, PrefixServiceError};
