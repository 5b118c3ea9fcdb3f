//! Sliding-window cooldown tracking.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::clock::SharedClock;
use crate::command::domain::{CommandPath, CooldownScope, CooldownSpec, GuardRejection};
use crate::gateway::domain::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ScopeKey {
    User(u64),
    Channel(u64),
    Guild(u64),
}

impl ScopeKey {
    fn for_message(scope: CooldownScope, message: &Message) -> Self {
        match (scope, message.guild_id()) {
            (CooldownScope::User, _) => Self::User(message.author().id().get()),
            (CooldownScope::Guild, Some(guild)) => Self::Guild(guild.get()),
            (CooldownScope::Channel | CooldownScope::Guild, _) => {
                Self::Channel(message.channel_id().get())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct WindowKey {
    command: CommandPath,
    scope: ScopeKey,
}

/// A slot taken in a cooldown window.
///
/// Hand it back to [`CooldownTracker::release`] when the invocation should
/// not count against the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CooldownReservation {
    key: WindowKey,
    taken_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Window {
    length: TimeDelta,
    slots: VecDeque<DateTime<Utc>>,
}

impl Window {
    fn expire(&mut self, now: DateTime<Utc>) {
        while self
            .slots
            .front()
            .is_some_and(|taken| now.signed_duration_since(*taken) >= self.length)
        {
            self.slots.pop_front();
        }
    }
}

/// Tracks per-command, per-scope invocation windows.
///
/// Windows whose slots have all expired are dropped.
pub struct CooldownTracker {
    clock: SharedClock,
    windows: Mutex<HashMap<WindowKey, Window>>,
}

impl fmt::Debug for CooldownTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CooldownTracker").finish_non_exhaustive()
    }
}

impl CooldownTracker {
    /// Creates a tracker reading time from `clock`.
    #[must_use]
    pub fn new(clock: SharedClock) -> Self {
        Self {
            clock,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Checks the window and reserves a slot in one step.
    ///
    /// # Errors
    ///
    /// Returns [`GuardRejection::OnCooldown`] with the time until the oldest
    /// slot expires when the window is full.
    pub fn try_acquire(
        &self,
        command: &CommandPath,
        spec: CooldownSpec,
        message: &Message,
    ) -> Result<CooldownReservation, GuardRejection> {
        let now = self.clock.utc();
        let window = TimeDelta::from_std(spec.per()).unwrap_or(TimeDelta::MAX);
        let key = WindowKey {
            command: command.clone(),
            scope: ScopeKey::for_message(spec.scope(), message),
        };

        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);
        windows.retain(|_, tracked| {
            tracked.expire(now);
            !tracked.slots.is_empty()
        });
        let tracked = windows.entry(key.clone()).or_default();
        tracked.length = window;
        let slots = &mut tracked.slots;

        let capacity = usize::try_from(spec.rate().get()).unwrap_or(usize::MAX);
        if slots.len() >= capacity {
            let retry_after = slots
                .front()
                .and_then(|oldest| oldest.checked_add_signed(window))
                .map(|expires| expires.signed_duration_since(now))
                .and_then(|remaining| remaining.to_std().ok())
                .unwrap_or(Duration::ZERO);
            return Err(GuardRejection::OnCooldown { retry_after });
        }

        slots.push_back(now);
        Ok(CooldownReservation { key, taken_at: now })
    }

    /// Gives a reserved slot back.
    pub fn release(&self, reservation: CooldownReservation) {
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(tracked) = windows.get_mut(&reservation.key) else {
            return;
        };
        if let Some(position) = tracked
            .slots
            .iter()
            .rposition(|taken| *taken == reservation.taken_at)
        {
            tracked.slots.remove(position);
        }
        if tracked.slots.is_empty() {
            windows.remove(&reservation.key);
        }
    }

    /// Returns the number of windows with at least one live slot.
    #[must_use]
    pub fn active_windows(&self) -> usize {
        self.windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
