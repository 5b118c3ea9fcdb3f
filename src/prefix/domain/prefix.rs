//! Validated command prefix.

use super::PrefixDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest prefix a guild may configure, in characters.
pub const MAX_PREFIX_CHARS: usize = 32;

/// A command prefix such as `!` or `k.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Prefix(String);

impl Prefix {
    /// Creates a validated prefix.
    ///
    /// Surrounding whitespace and one pair of matching surrounding quotes
    /// (`"…"` or `'…'`) are stripped, so `set prefix "k! "` and `set prefix
    /// k!` both configure `k!`.
    ///
    /// # Errors
    ///
    /// Returns [`PrefixDomainError::EmptyPrefix`] when nothing remains after
    /// stripping, [`PrefixDomainError::PrefixTooLong`] when the prefix exceeds
    /// [`MAX_PREFIX_CHARS`] characters, or
    /// [`PrefixDomainError::ContainsSeparator`] when it contains the compound
    /// command separator.
    pub fn new(value: impl Into<String>) -> Result<Self, PrefixDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        let unquoted = ['"', '\'']
            .iter()
            .find_map(|quote| {
                trimmed
                    .strip_prefix(*quote)
                    .and_then(|rest| rest.strip_suffix(*quote))
            })
            .unwrap_or(trimmed)
            .trim();

        if unquoted.is_empty() {
            return Err(PrefixDomainError::EmptyPrefix);
        }
        if unquoted.chars().count() > MAX_PREFIX_CHARS {
            return Err(PrefixDomainError::PrefixTooLong(raw));
        }
        if unquoted.contains("&&") {
            return Err(PrefixDomainError::ContainsSeparator(raw));
        }
        Ok(Self(unquoted.to_owned()))
    }

    /// Returns the prefix as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Prefix {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Prefix {
    type Error = PrefixDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Prefix> for String {
    fn from(value: Prefix) -> Self {
        value.0
    }
}
