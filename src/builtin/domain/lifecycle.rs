//! Process lifecycle requests.

use std::fmt;

/// What the operator asked the process to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleAction {
    /// Stop and start again.
    Restart,
    /// Stop for good.
    Shutdown,
}

impl LifecycleAction {
    /// Returns the line announced before acting.
    #[must_use]
    pub const fn announcement(self) -> &'static str {
        match self {
            Self::Restart => "Restarting bot.",
            Self::Shutdown => "Shutting down bot.",
        }
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Restart => "restart",
            Self::Shutdown => "shutdown",
        })
    }
}
