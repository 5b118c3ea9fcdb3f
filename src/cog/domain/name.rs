//! Validated cog name type.

use super::CogDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_NAME_LENGTH: usize = 64;

/// Lowercase identifier of an extension, e.g. `settings` or `misc`.
///
/// Operators type cog names in any case; they are normalized to lowercase
/// so `cogs load Settings` and `cogs load settings` agree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CogName(String);

impl CogName {
    /// Creates a validated cog name.
    ///
    /// # Errors
    ///
    /// Returns [`CogDomainError::EmptyCogName`] when the value is blank,
    /// [`CogDomainError::InvalidCogName`] for characters outside
    /// `[a-z0-9_]` and [`CogDomainError::CogNameTooLong`] beyond 64
    /// characters.
    pub fn new(value: impl Into<String>) -> Result<Self, CogDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();

        if normalized.is_empty() {
            return Err(CogDomainError::EmptyCogName);
        }
        if normalized.len() > MAX_NAME_LENGTH {
            return Err(CogDomainError::CogNameTooLong(raw));
        }
        let is_valid = normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !is_valid {
            return Err(CogDomainError::InvalidCogName(raw));
        }
        Ok(Self(normalized))
    }

    /// Returns the cog name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CogName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CogName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CogName {
    type Error = CogDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CogName> for String {
    fn from(value: CogName) -> Self {
        value.0
    }
}
