//! Runtime state of one cog.

use super::CogName;
use serde::Serialize;

/// Whether a cog's commands are registered and whether they may run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CogState {
    name: CogName,
    loaded: bool,
    enabled: bool,
}

impl CogState {
    /// State of a cog that is known but has never been loaded.
    #[must_use]
    pub const fn unloaded(name: CogName) -> Self {
        Self {
            name,
            loaded: false,
            enabled: true,
        }
    }

    /// State right after a successful load.
    #[must_use]
    pub const fn freshly_loaded(name: CogName) -> Self {
        Self {
            name,
            loaded: true,
            enabled: true,
        }
    }

    /// Returns the cog name.
    #[must_use]
    pub const fn name(&self) -> &CogName {
        &self.name
    }

    /// Returns `true` when the cog's commands are registered.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Returns the enabled flag.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns `true` when the cog's commands may run.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.loaded && self.enabled
    }

    /// Returns a one-word status for listings.
    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        match (self.loaded, self.enabled) {
            (false, _) => "unloaded",
            (true, false) => "disabled",
            (true, true) => "enabled",
        }
    }

    pub(crate) const fn set_loaded(&mut self, loaded: bool) {
        self.loaded = loaded;
    }

    pub(crate) const fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
