//! Startup announcement and report.

use chrono::{DateTime, Utc};

const ANNOUNCEMENT_TIME_FORMAT: &str = "%H:%M:%S UTC on the %d of %B, %Y";

/// Formats the line posted to the operator log channel at startup.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use kern::bot::domain::startup_announcement;
///
/// let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).single().expect("valid instant");
/// assert_eq!(
///     startup_announcement(at),
///     "Bot Online at 12:00:00 UTC on the 01 of January, 2024"
/// );
/// ```
#[must_use]
pub fn startup_announcement(at: DateTime<Utc>) -> String {
    format!("Bot Online at {}", at.format(ANNOUNCEMENT_TIME_FORMAT))
}

/// Which initial extensions loaded at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupReport {
    loaded: Vec<String>,
    failed: Vec<(String, String)>,
}

impl StartupReport {
    pub(crate) fn record_loaded(&mut self, name: impl Into<String>) {
        self.loaded.push(name.into());
    }

    pub(crate) fn record_failed(&mut self, name: impl Into<String>, reason: impl Into<String>) {
        self.failed.push((name.into(), reason.into()));
    }

    /// Returns the extensions that loaded.
    #[must_use]
    pub fn loaded(&self) -> &[String] {
        &self.loaded
    }

    /// Returns the extensions that failed, with the reason.
    #[must_use]
    pub fn failed(&self) -> &[(String, String)] {
        &self.failed
    }
}
