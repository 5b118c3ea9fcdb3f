//! The live command registry.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;
use tracing::debug;

use super::CogGate;
use crate::cog::domain::CogName;
use crate::command::domain::{
    CommandDescriptor, CommandDomainError, CommandPath, split_first_token,
};

/// Errors returned by registry mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandRegistryError {
    /// A qualified name or alias is already taken.
    #[error("command name or alias '{0}' is already registered")]
    DuplicateName(String),

    /// A subcommand was registered without its parent group.
    #[error("parent command '{parent}' of '{command}' is not registered")]
    MissingParent {
        /// The missing parent path.
        parent: String,
        /// The subcommand being registered.
        command: String,
    },

    /// No command has the given path.
    #[error("command '{0}' is not registered")]
    NotFound(String),

    /// A descriptor carried an invalid name or alias.
    #[error(transparent)]
    Domain(#[from] CommandDomainError),
}

/// A registry lookup hit: the descriptor and the text after its path.
#[derive(Debug, Clone)]
pub struct ResolvedCommand {
    descriptor: CommandDescriptor,
    arguments: String,
}

impl ResolvedCommand {
    /// Returns the matched descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    /// Returns the argument text after the command path.
    #[must_use]
    pub fn arguments(&self) -> &str {
        &self.arguments
    }
}

#[derive(Debug, Default)]
struct RegistryState {
    descriptors: BTreeMap<CommandPath, CommandDescriptor>,
    index: HashMap<CommandPath, CommandPath>,
}

impl RegistryState {
    fn check_insertable(
        &self,
        batch: &[CommandDescriptor],
    ) -> Result<Vec<Vec<CommandPath>>, CommandRegistryError> {
        let mut claimed: HashSet<CommandPath> = HashSet::new();
        let batch_paths: HashSet<&CommandPath> =
            batch.iter().map(CommandDescriptor::path).collect();
        let mut all_keys = Vec::with_capacity(batch.len());

        for descriptor in batch {
            let keys = descriptor.lookup_keys()?;
            for key in &keys {
                if self.index.contains_key(key) || !claimed.insert(key.clone()) {
                    return Err(CommandRegistryError::DuplicateName(key.qualified_name()));
                }
            }
            if let Some(parent) = descriptor.path().parent()
                && !self.descriptors.contains_key(&parent)
                && !batch_paths.contains(&parent)
            {
                return Err(CommandRegistryError::MissingParent {
                    parent: parent.qualified_name(),
                    command: descriptor.qualified_name(),
                });
            }
            all_keys.push(keys);
        }
        Ok(all_keys)
    }

    fn insert(&mut self, descriptor: CommandDescriptor, keys: Vec<CommandPath>) {
        for key in keys {
            self.index.insert(key, descriptor.path().clone());
        }
        self.descriptors
            .insert(descriptor.path().clone(), descriptor);
    }

    fn remove(&mut self, path: &CommandPath) -> Option<CommandDescriptor> {
        let removed = self.descriptors.remove(path)?;
        self.index.retain(|_, canonical| canonical != path);
        Some(removed)
    }
}

/// Registry of live commands keyed by normalized path.
///
/// Qualified names and aliases share one key space; every mutation is atomic
/// and registers nothing when any key conflicts.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    state: RwLock<RegistryState>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one command.
    ///
    /// # Errors
    ///
    /// Returns [`CommandRegistryError::DuplicateName`] when the path or an
    /// alias is taken, [`CommandRegistryError::MissingParent`] for a
    /// subcommand whose group is absent, or [`CommandRegistryError::Domain`]
    /// for an invalid alias.
    pub fn register(&self, descriptor: CommandDescriptor) -> Result<(), CommandRegistryError> {
        self.register_all(vec![descriptor])
    }

    /// Registers a batch of commands atomically.
    ///
    /// Subcommands may refer to groups registered in the same batch.
    ///
    /// # Errors
    ///
    /// Same as [`CommandRegistry::register`]; on error nothing from the batch
    /// is registered.
    pub fn register_all(
        &self,
        descriptors: Vec<CommandDescriptor>,
    ) -> Result<(), CommandRegistryError> {
        let mut state = self.write();
        let keys = state.check_insertable(&descriptors)?;
        for (descriptor, descriptor_keys) in descriptors.into_iter().zip(keys) {
            debug!(command = %descriptor.path(), "registering command");
            state.insert(descriptor, descriptor_keys);
        }
        Ok(())
    }

    /// Removes the command at `path` together with its subcommands.
    ///
    /// # Errors
    ///
    /// Returns [`CommandRegistryError::NotFound`] when no command has that
    /// canonical path.
    pub fn unregister(&self, path: &CommandPath) -> Result<usize, CommandRegistryError> {
        let mut state = self.write();
        if !state.descriptors.contains_key(path) {
            return Err(CommandRegistryError::NotFound(path.qualified_name()));
        }
        let doomed: Vec<CommandPath> = state
            .descriptors
            .keys()
            .filter(|candidate| *candidate == path || path.is_ancestor_of(candidate))
            .cloned()
            .collect();
        for candidate in &doomed {
            state.remove(candidate);
        }
        Ok(doomed.len())
    }

    /// Removes every command owned by `cog`, returning how many were removed.
    pub fn unregister_cog(&self, cog: &CogName) -> usize {
        let mut state = self.write();
        let doomed: Vec<CommandPath> = state
            .descriptors
            .values()
            .filter(|descriptor| descriptor.cog() == Some(cog))
            .map(|descriptor| descriptor.path().clone())
            .collect();
        for path in &doomed {
            state.remove(path);
        }
        doomed.len()
    }

    /// Sets a command's own enabled flag in place.
    ///
    /// # Errors
    ///
    /// Returns [`CommandRegistryError::NotFound`] when `path` is neither a
    /// registered name nor an alias.
    pub fn set_enabled(&self, path: &CommandPath, enabled: bool) -> Result<(), CommandRegistryError> {
        let mut state = self.write();
        let canonical = state
            .index
            .get(path)
            .cloned()
            .ok_or_else(|| CommandRegistryError::NotFound(path.qualified_name()))?;
        if let Some(descriptor) = state.descriptors.remove(&canonical) {
            state
                .descriptors
                .insert(canonical, descriptor.with_enabled(enabled));
        }
        Ok(())
    }

    /// Finds a command by qualified name or alias path.
    #[must_use]
    pub fn find(&self, path: &CommandPath) -> Option<CommandDescriptor> {
        let state = self.read();
        let canonical = state.index.get(path)?;
        state.descriptors.get(canonical).cloned()
    }

    /// Returns `true` when `descriptor` may run: its own flag is on, its cog
    /// is active and so is every ancestor group.
    #[must_use]
    pub fn is_runnable(&self, descriptor: &CommandDescriptor, cogs: &dyn CogGate) -> bool {
        let available = |candidate: &CommandDescriptor| {
            candidate.is_enabled() && candidate.cog().is_none_or(|cog| cogs.is_active(cog))
        };
        if !available(descriptor) {
            return false;
        }
        let mut parent = descriptor.path().parent();
        while let Some(path) = parent {
            match self.find(&path) {
                Some(group) if available(&group) => parent = path.parent(),
                _ => return false,
            }
        }
        true
    }

    /// Resolves the longest registered command path at the start of `text`.
    ///
    /// Each token is looked up as a name or alias below the previously
    /// matched command; matching stops at the first token that is not a
    /// registered subcommand. Flags are not consulted here.
    #[must_use]
    pub fn resolve(&self, text: &str) -> Option<ResolvedCommand> {
        let state = self.read();
        let mut matched: Option<&CommandPath> = None;
        let mut arguments = text.trim();
        let mut rest = arguments;

        loop {
            let (token, remainder) = split_first_token(rest);
            if token.is_empty() {
                break;
            }
            let candidate = match matched {
                Some(parent) => parent.child(token),
                None => CommandPath::root(token),
            };
            let Some(canonical) = candidate.ok().and_then(|key| state.index.get(&key)) else {
                break;
            };
            matched = Some(canonical);
            arguments = remainder;
            rest = remainder;
        }

        let descriptor = state.descriptors.get(matched?)?.clone();
        Some(ResolvedCommand {
            descriptor,
            arguments: arguments.to_owned(),
        })
    }

    /// Returns the commands owned by `cog`, ordered by path.
    #[must_use]
    pub fn descriptors_for(&self, cog: &CogName) -> Vec<CommandDescriptor> {
        self.read()
            .descriptors
            .values()
            .filter(|descriptor| descriptor.cog() == Some(cog))
            .cloned()
            .collect()
    }

    /// Returns the direct subcommands of `path`, ordered by path.
    #[must_use]
    pub fn children_of(&self, path: &CommandPath) -> Vec<CommandDescriptor> {
        self.read()
            .descriptors
            .values()
            .filter(|descriptor| descriptor.path().parent().as_ref() == Some(path))
            .cloned()
            .collect()
    }

    /// Returns every registered command, ordered by path.
    #[must_use]
    pub fn all(&self) -> Vec<CommandDescriptor> {
        self.read().descriptors.values().cloned().collect()
    }

    /// Returns the number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().descriptors.len()
    }

    /// Returns `true` when no command is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
