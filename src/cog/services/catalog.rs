//! The set of extensions the bot knows how to load.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::cog::{domain::CogName, ports::Extension};

/// Extensions available for loading, keyed by cog name.
#[derive(Clone, Default)]
pub struct ExtensionCatalog {
    extensions: BTreeMap<CogName, Arc<dyn Extension>>,
}

impl fmt::Debug for ExtensionCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.extensions.keys()).finish()
    }
}

impl ExtensionCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `extension`, replacing any extension with the same name.
    #[must_use]
    pub fn with_extension(mut self, extension: Arc<dyn Extension>) -> Self {
        self.insert(extension);
        self
    }

    /// Adds `extension`, replacing any extension with the same name.
    pub fn insert(&mut self, extension: Arc<dyn Extension>) {
        self.extensions.insert(extension.name().clone(), extension);
    }

    /// Returns the extension called `name`.
    #[must_use]
    pub fn get(&self, name: &CogName) -> Option<&Arc<dyn Extension>> {
        self.extensions.get(name)
    }

    /// Returns every cog name in the catalog, in name order.
    pub fn names(&self) -> impl Iterator<Item = &CogName> {
        self.extensions.keys()
    }
}
