//! Runtime cog state and lifecycle transitions.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{info, warn};

use super::ExtensionCatalog;
use crate::cog::domain::{CogDomainError, CogName, CogState};
use crate::command::services::{CogGate, CommandRegistry, CommandRegistryError};

/// Errors returned by cog lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CogRegistryError {
    /// No extension with that name exists.
    #[error("no cog named '{0}' exists")]
    UnknownCog(String),

    /// The cog is already loaded.
    #[error("cog '{0}' is already loaded")]
    AlreadyLoaded(CogName),

    /// The cog is not loaded.
    #[error("cog '{0}' is not loaded")]
    NotLoaded(CogName),

    /// The extension failed to build its commands.
    #[error("cog '{cog}' failed to set up: {reason}")]
    Setup {
        /// The failing cog.
        cog: CogName,
        /// Why setup failed.
        reason: String,
    },

    /// The cog's commands could not be registered.
    #[error(transparent)]
    Registry(#[from] CommandRegistryError),

    /// The cog name was invalid.
    #[error(transparent)]
    Domain(#[from] CogDomainError),
}

/// Result of an enable or disable request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The cog was disabled and is now enabled.
    Enabled,
    /// The cog was enabled and is now disabled.
    Disabled,
    /// The cog was already enabled.
    AlreadyEnabled,
    /// The cog was already disabled.
    AlreadyDisabled,
}

/// Tracks which cogs are loaded and enabled.
///
/// Every transition holds one lock for its whole duration, so a load never
/// interleaves with an unload of the same cog.
#[derive(Debug)]
pub struct CogStateRegistry {
    catalog: ExtensionCatalog,
    commands: Arc<CommandRegistry>,
    states: Mutex<BTreeMap<CogName, CogState>>,
}

impl CogStateRegistry {
    /// Creates a registry over `catalog` registering into `commands`.
    #[must_use]
    pub fn new(catalog: ExtensionCatalog, commands: Arc<CommandRegistry>) -> Self {
        Self {
            catalog,
            commands,
            states: Mutex::new(BTreeMap::new()),
        }
    }

    /// Returns the extension catalog.
    #[must_use]
    pub const fn catalog(&self) -> &ExtensionCatalog {
        &self.catalog
    }

    /// Loads the cog called `name` and registers its commands.
    ///
    /// # Errors
    ///
    /// Returns [`CogRegistryError::UnknownCog`] when no extension has that
    /// name, [`CogRegistryError::AlreadyLoaded`] when it is loaded,
    /// [`CogRegistryError::Setup`] when the extension fails to build its
    /// commands and [`CogRegistryError::Registry`] when a command conflicts
    /// with one already registered.
    pub fn load(&self, name: &str) -> Result<CogState, CogRegistryError> {
        let name = self.known_name(name)?;
        let mut states = self.lock();
        self.load_locked(&mut states, &name)
    }

    /// Unloads the cog called `name`, removing its commands.
    ///
    /// # Errors
    ///
    /// Returns [`CogRegistryError::UnknownCog`] for an unknown name and
    /// [`CogRegistryError::NotLoaded`] when the cog is not loaded.
    pub fn unload(&self, name: &str) -> Result<CogState, CogRegistryError> {
        let name = self.known_name(name)?;
        let mut states = self.lock();
        self.unload_locked(&mut states, &name)
    }

    /// Unloads and loads the cog again.
    ///
    /// If the load step fails the cog stays unloaded.
    ///
    /// # Errors
    ///
    /// Returns the unload error when the cog is not loaded, otherwise the
    /// load error.
    pub fn reload(&self, name: &str) -> Result<CogState, CogRegistryError> {
        let name = self.known_name(name)?;
        let mut states = self.lock();
        self.unload_locked(&mut states, &name)?;
        self.load_locked(&mut states, &name).inspect_err(|err| {
            warn!(cog = %name, error = %err, "reload failed; cog left unloaded");
        })
    }

    /// Enables the cog so its commands may run again.
    ///
    /// # Errors
    ///
    /// Returns [`CogRegistryError::UnknownCog`] for an unknown name.
    pub fn enable(&self, name: &str) -> Result<ToggleOutcome, CogRegistryError> {
        self.toggle(name, true)
    }

    /// Disables the cog; its commands stay registered but resolve as not
    /// found.
    ///
    /// # Errors
    ///
    /// Returns [`CogRegistryError::UnknownCog`] for an unknown name.
    pub fn disable(&self, name: &str) -> Result<ToggleOutcome, CogRegistryError> {
        self.toggle(name, false)
    }

    /// Returns every known cog, loaded or not, in name order.
    #[must_use]
    pub fn list(&self) -> Vec<CogState> {
        let states = self.lock();
        let mut listed: BTreeMap<CogName, CogState> = self
            .catalog
            .names()
            .map(|name| (name.clone(), CogState::unloaded(name.clone())))
            .collect();
        for (name, state) in states.iter() {
            listed.insert(name.clone(), state.clone());
        }
        listed.into_values().collect()
    }

    /// Returns the state of one cog.
    #[must_use]
    pub fn state(&self, name: &CogName) -> Option<CogState> {
        let states = self.lock();
        states.get(name).cloned().or_else(|| {
            self.catalog
                .get(name)
                .map(|_| CogState::unloaded(name.clone()))
        })
    }

    fn known_name(&self, raw: &str) -> Result<CogName, CogRegistryError> {
        let name = CogName::new(raw).map_err(|_| CogRegistryError::UnknownCog(raw.to_owned()))?;
        let known = self.catalog.get(&name).is_some() || self.lock().contains_key(&name);
        if known {
            Ok(name)
        } else {
            Err(CogRegistryError::UnknownCog(raw.to_owned()))
        }
    }

    fn load_locked(
        &self,
        states: &mut BTreeMap<CogName, CogState>,
        name: &CogName,
    ) -> Result<CogState, CogRegistryError> {
        if states.get(name).is_some_and(CogState::is_loaded) {
            return Err(CogRegistryError::AlreadyLoaded(name.clone()));
        }
        let extension = self
            .catalog
            .get(name)
            .ok_or_else(|| CogRegistryError::UnknownCog(name.to_string()))?;
        let commands = extension
            .commands()
            .map_err(|err| CogRegistryError::Setup {
                cog: name.clone(),
                reason: err.to_string(),
            })?
            .into_iter()
            .map(|descriptor| descriptor.in_cog(name.clone()))
            .collect::<Vec<_>>();
        let count = commands.len();
        self.commands.register_all(commands)?;

        let state = CogState::freshly_loaded(name.clone());
        states.insert(name.clone(), state.clone());
        info!(cog = %name, commands = count, "cog loaded");
        Ok(state)
    }

    fn unload_locked(
        &self,
        states: &mut BTreeMap<CogName, CogState>,
        name: &CogName,
    ) -> Result<CogState, CogRegistryError> {
        let Some(state) = states.get_mut(name).filter(|state| state.is_loaded()) else {
            return Err(CogRegistryError::NotLoaded(name.clone()));
        };
        let removed = self.commands.unregister_cog(name);
        state.set_loaded(false);
        info!(cog = %name, commands = removed, "cog unloaded");
        Ok(state.clone())
    }

    fn toggle(&self, raw: &str, enabled: bool) -> Result<ToggleOutcome, CogRegistryError> {
        let name = self.known_name(raw)?;
        let mut states = self.lock();
        let state = states
            .entry(name.clone())
            .or_insert_with(|| CogState::unloaded(name.clone()));
        let outcome = match (state.is_enabled(), enabled) {
            (true, true) => ToggleOutcome::AlreadyEnabled,
            (false, false) => ToggleOutcome::AlreadyDisabled,
            (false, true) => ToggleOutcome::Enabled,
            (true, false) => ToggleOutcome::Disabled,
        };
        state.set_enabled(enabled);
        info!(cog = %name, enabled, "cog flag updated");
        Ok(outcome)
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<CogName, CogState>> {
        self.states.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CogGate for CogStateRegistry {
    fn is_active(&self, cog: &CogName) -> bool {
        self.lock().get(cog).is_some_and(CogState::is_active)
    }
}
