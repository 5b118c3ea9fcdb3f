//! Permission lookup port.

use crate::gateway::domain::{Capability, ChannelId, GuildId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for permission lookups.
pub type PermissionResult<T> = Result<T, PermissionError>;

/// Answers whether a member holds a capability in a guild channel.
#[async_trait]
pub trait PermissionSource: Send + Sync {
    /// Returns `true` when `user` holds `capability` in `channel` of `guild`.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError::Lookup`] when the member or channel data
    /// cannot be fetched.
    async fn has_capability(
        &self,
        user: UserId,
        guild: GuildId,
        channel: ChannelId,
        capability: Capability,
    ) -> PermissionResult<bool>;
}

/// Errors returned by permission sources.
#[derive(Debug, Clone, Error)]
pub enum PermissionError {
    /// Member or channel data could not be fetched.
    #[error("permission lookup failed: {0}")]
    Lookup(Arc<dyn std::error::Error + Send + Sync>),
}

impl PermissionError {
    /// Wraps a lookup failure.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lookup(Arc::new(err))
    }
}
