//! Guard configuration and rejection reasons.

use crate::gateway::domain::Capability;
use std::num::NonZeroU32;
use std::time::Duration;
use thiserror::Error;

/// Which identity a cooldown window is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CooldownScope {
    /// One window per invoking user.
    User,
    /// One window per channel.
    Channel,
    /// One window per guild; direct messages fall back to the channel.
    Guild,
}

/// Sliding-window rate limit: at most `rate` invocations per `per`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownSpec {
    rate: NonZeroU32,
    per: Duration,
    scope: CooldownScope,
}

impl CooldownSpec {
    /// Creates a cooldown admitting `rate` invocations per `per`.
    #[must_use]
    pub const fn new(rate: NonZeroU32, per: Duration, scope: CooldownScope) -> Self {
        Self { rate, per, scope }
    }

    /// Returns the number of invocations admitted per window.
    #[must_use]
    pub const fn rate(self) -> NonZeroU32 {
        self.rate
    }

    /// Returns the window length.
    #[must_use]
    pub const fn per(self) -> Duration {
        self.per
    }

    /// Returns the scope the window is keyed on.
    #[must_use]
    pub const fn scope(self) -> CooldownScope {
        self.scope
    }
}

/// Capability a caller must hold to run a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionRequirement {
    capability: Capability,
    owner_bypass: bool,
}

impl PermissionRequirement {
    /// Returns the required capability.
    #[must_use]
    pub const fn capability(self) -> Capability {
        self.capability
    }

    /// Returns `true` when the operator passes without the capability.
    #[must_use]
    pub const fn owner_bypass(self) -> bool {
        self.owner_bypass
    }
}

/// The guard configuration of one command.
///
/// Guards always run in the same order, regardless of how they were
/// configured: ownership, then guild context and permission, then cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Guards {
    owner_only: bool,
    guild_only: bool,
    permission: Option<PermissionRequirement>,
    cooldown: Option<CooldownSpec>,
}

impl Guards {
    /// Creates an empty guard set.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            owner_only: false,
            guild_only: false,
            permission: None,
            cooldown: None,
        }
    }

    /// Restricts the command to the operator.
    #[must_use]
    pub const fn owner_only(mut self) -> Self {
        self.owner_only = true;
        self
    }

    /// Refuses to run in direct messages.
    #[must_use]
    pub const fn guild_only(mut self) -> Self {
        self.guild_only = true;
        self
    }

    /// Requires `capability` in the origin guild.
    ///
    /// Capabilities only exist inside guilds, so this implies
    /// [`Guards::guild_only`].
    #[must_use]
    pub const fn require(mut self, capability: Capability) -> Self {
        self.permission = Some(PermissionRequirement {
            capability,
            owner_bypass: false,
        });
        self
    }

    /// Requires `capability` unless the caller is the operator.
    #[must_use]
    pub const fn require_or_owner(mut self, capability: Capability) -> Self {
        self.permission = Some(PermissionRequirement {
            capability,
            owner_bypass: true,
        });
        self
    }

    /// Applies a cooldown window.
    #[must_use]
    pub const fn cooldown(mut self, spec: CooldownSpec) -> Self {
        self.cooldown = Some(spec);
        self
    }

    /// Returns `true` when only the operator may run the command.
    #[must_use]
    pub const fn is_owner_only(self) -> bool {
        self.owner_only
    }

    /// Returns `true` when the command needs guild context.
    #[must_use]
    pub const fn is_guild_only(self) -> bool {
        self.guild_only || self.permission.is_some()
    }

    /// Returns the permission requirement.
    #[must_use]
    pub const fn permission(self) -> Option<PermissionRequirement> {
        self.permission
    }

    /// Returns the cooldown window.
    #[must_use]
    pub const fn cooldown_spec(self) -> Option<CooldownSpec> {
        self.cooldown
    }
}

/// Why a guard refused to run a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardRejection {
    /// The command is restricted to the operator.
    #[error("this command can only be used by the bot owner")]
    NotOwner,

    /// The caller lacks a capability.
    #[error("you need the {0} permission to use this command")]
    MissingPermission(Capability),

    /// The command needs guild context but was used in a direct message.
    #[error("this command cannot be used in private messages")]
    GuildOnly,

    /// The cooldown window is full.
    #[error("this command is on cooldown, try again in {:.2}s", .retry_after.as_secs_f64())]
    OnCooldown {
        /// Time until a slot frees up.
        retry_after: Duration,
    },
}

impl GuardRejection {
    /// Returns `true` for rejections that are logged but never shown.
    #[must_use]
    pub const fn is_silent(&self) -> bool {
        matches!(self, Self::NotOwner)
    }
}
