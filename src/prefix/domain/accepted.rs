//! Acceptance lists and prefix matching.

use super::Prefix;
use crate::gateway::domain::BotIdentity;
use std::cmp::Reverse;

/// The prefix a message matched and the text following it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixMatch {
    prefix: String,
    remainder: String,
}

impl PrefixMatch {
    /// Returns the accepted prefix that matched, as written in the list.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the text after the prefix, untrimmed.
    #[must_use]
    pub fn remainder(&self) -> &str {
        &self.remainder
    }

    /// Returns the text after the prefix with surrounding whitespace removed.
    #[must_use]
    pub fn command_text(&self) -> &str {
        self.remainder.trim()
    }
}

/// Ordered list of prefixes accepted in one origin context.
///
/// The list order is `[global + " ", guild + " ", global, guild, mention
/// forms]`. Guild entries are omitted when the guild has no configured
/// prefix or configured the global one. Matching always prefers the longest
/// entry, falling back to list order between entries of equal length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedPrefixes {
    entries: Vec<String>,
}

impl AcceptedPrefixes {
    /// Builds the acceptance list for an origin context.
    ///
    /// # Examples
    ///
    /// ```
    /// use kern::gateway::domain::{BotIdentity, UserId};
    /// use kern::prefix::domain::{AcceptedPrefixes, Prefix};
    ///
    /// let global = Prefix::new("!").expect("valid prefix");
    /// let guild = Prefix::new("k.").expect("valid prefix");
    /// let bot = BotIdentity::new(UserId::new(5), "kern");
    /// let accepted = AcceptedPrefixes::build(&global, Some(&guild), &bot);
    ///
    /// let matched = accepted.match_text("k. help").expect("prefix should match");
    /// assert_eq!(matched.prefix(), "k. ");
    /// assert_eq!(matched.command_text(), "help");
    /// ```
    #[must_use]
    pub fn build(global: &Prefix, guild: Option<&Prefix>, bot: &BotIdentity) -> Self {
        let guild = guild.filter(|configured| *configured != global);
        let mut entries = Vec::with_capacity(8);
        entries.push(format!("{global} "));
        if let Some(configured) = guild {
            entries.push(format!("{configured} "));
        }
        entries.push(global.to_string());
        if let Some(configured) = guild {
            entries.push(configured.to_string());
        }
        for form in bot.mention_forms() {
            entries.push(format!("{form} "));
            entries.push(form);
        }
        Self { entries }
    }

    /// Returns the entries in acceptance order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Matches `text` against the list, longest entry first.
    #[must_use]
    pub fn match_text(&self, text: &str) -> Option<PrefixMatch> {
        let mut ordered: Vec<&String> = self.entries.iter().collect();
        ordered.sort_by_key(|entry| Reverse(entry.chars().count()));
        ordered.into_iter().find_map(|entry| {
            text.strip_prefix(entry.as_str()).map(|remainder| PrefixMatch {
                prefix: entry.clone(),
                remainder: remainder.to_owned(),
            })
        })
    }
}
