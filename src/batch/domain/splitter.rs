//! Compound command splitting.

/// Literal separator between commands in one message.
pub const COMPOUND_SEPARATOR: &str = " && ";

/// Splits message text into command segments.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompoundSplitter;

impl CompoundSplitter {
    /// Returns `true` when `text` holds more than one command.
    #[must_use]
    pub fn is_compound(text: &str) -> bool {
        text.contains(COMPOUND_SEPARATOR)
    }

    /// Splits `text` on [`COMPOUND_SEPARATOR`], trimming each segment.
    ///
    /// Text without the separator yields itself as the only segment. Empty
    /// segments are kept so they can be reported.
    ///
    /// # Examples
    ///
    /// ```
    /// use kern::batch::domain::CompoundSplitter;
    ///
    /// assert_eq!(
    ///     CompoundSplitter::split("!ping && !help  && "),
    ///     vec!["!ping", "!help", ""],
    /// );
    /// assert_eq!(CompoundSplitter::split("!ping&&!help"), vec!["!ping&&!help"]);
    /// ```
    #[must_use]
    pub fn split(text: &str) -> Vec<&str> {
        if !Self::is_compound(text) {
            return vec![text];
        }
        text.split(COMPOUND_SEPARATOR).map(str::trim).collect()
    }
}
