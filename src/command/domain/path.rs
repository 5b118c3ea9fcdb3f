//! Normalized command paths.

use super::CommandDomainError;
use std::fmt;

/// Splits off the first whitespace-delimited token of `text`.
///
/// Returns the token and the rest of the text with leading whitespace
/// removed. An all-whitespace input yields an empty token.
#[must_use]
pub fn split_first_token(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.split_once(char::is_whitespace) {
        Some((token, rest)) => (token, rest.trim_start()),
        None => (text, ""),
    }
}

/// Qualified command name as an ordered list of tokens, e.g. `cogs load`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandPath(Vec<String>);

impl CommandPath {
    /// Parses a space-separated qualified name.
    ///
    /// # Errors
    ///
    /// Returns [`CommandDomainError::EmptyCommandPath`] when `qualified` has no
    /// tokens.
    ///
    /// # Examples
    ///
    /// ```
    /// use kern::command::domain::CommandPath;
    ///
    /// let path = CommandPath::parse("cogs   load").expect("valid path");
    /// assert_eq!(path.qualified_name(), "cogs load");
    /// assert_eq!(path.depth(), 2);
    /// ```
    pub fn parse(qualified: &str) -> Result<Self, CommandDomainError> {
        let tokens: Vec<String> = qualified.split_whitespace().map(str::to_owned).collect();
        if tokens.is_empty() {
            return Err(CommandDomainError::EmptyCommandPath);
        }
        Ok(Self(tokens))
    }

    /// Creates a single-token path.
    ///
    /// # Errors
    ///
    /// Returns [`CommandDomainError::InvalidToken`] when `token` is empty or
    /// contains whitespace.
    pub fn root(token: &str) -> Result<Self, CommandDomainError> {
        validate_token(token)?;
        Ok(Self(vec![token.to_owned()]))
    }

    /// Returns this path extended by `token`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandDomainError::InvalidToken`] when `token` is empty or
    /// contains whitespace.
    pub fn child(&self, token: &str) -> Result<Self, CommandDomainError> {
        validate_token(token)?;
        let mut tokens = self.0.clone();
        tokens.push(token.to_owned());
        Ok(Self(tokens))
    }

    /// Returns the parent path, or `None` for a top-level command.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        match self.0.split_last() {
            Some((_, parent)) if !parent.is_empty() => Some(Self(parent.to_vec())),
            _ => None,
        }
    }

    /// Returns the last token.
    #[must_use]
    pub fn leaf(&self) -> &str {
        self.0.last().map_or("", String::as_str)
    }

    /// Returns the tokens.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    /// Returns the number of tokens.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when `self` is a strict ancestor of `other`.
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        other.0.len() > self.0.len() && other.0.starts_with(&self.0)
    }

    /// Returns the space-joined qualified name.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        self.0.join(" ")
    }
}

impl fmt::Display for CommandPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

fn validate_token(token: &str) -> Result<(), CommandDomainError> {
    if token.is_empty() || token.chars().any(char::is_whitespace) {
        return Err(CommandDomainError::InvalidToken(token.to_owned()));
    }
    Ok(())
}
