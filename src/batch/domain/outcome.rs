//! Per-segment outcomes and the batch result.

use crate::command::domain::{CommandError, GuardRejection};

/// What happened to one segment of a message.
#[derive(Debug, Clone)]
pub enum SegmentOutcome {
    /// The command ran to completion.
    Executed,
    /// The same command text already ran earlier in the batch.
    SkippedDuplicate,
    /// No prefix matched, or no runnable command did.
    NotFound,
    /// A guard refused to run the command.
    Rejected(GuardRejection),
    /// The command failed or timed out.
    ExecutionError(CommandError),
}

impl SegmentOutcome {
    /// Returns `true` for [`SegmentOutcome::Executed`].
    #[must_use]
    pub const fn is_executed(&self) -> bool {
        matches!(self, Self::Executed)
    }

    /// Returns the reason shown in the aggregated report.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::Executed => "executed".to_owned(),
            Self::SkippedDuplicate => "duplicate command skipped".to_owned(),
            Self::NotFound => "command not found".to_owned(),
            Self::Rejected(rejection) => rejection.to_string(),
            Self::ExecutionError(err) => err.to_string(),
        }
    }
}

/// One segment and its outcome.
#[derive(Debug, Clone)]
pub struct SegmentReport {
    segment: String,
    outcome: SegmentOutcome,
}

impl SegmentReport {
    /// Creates a report entry.
    #[must_use]
    pub fn new(segment: impl Into<String>, outcome: SegmentOutcome) -> Self {
        Self {
            segment: segment.into(),
            outcome,
        }
    }

    /// Returns the segment text as written.
    #[must_use]
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// Returns the outcome.
    #[must_use]
    pub const fn outcome(&self) -> &SegmentOutcome {
        &self.outcome
    }
}

/// Ordered outcomes of every segment of one message.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    compound: bool,
    reports: Vec<SegmentReport>,
}

impl BatchResult {
    /// Creates an empty result; `compound` marks a multi-segment message.
    #[must_use]
    pub const fn new(compound: bool) -> Self {
        Self {
            compound,
            reports: Vec::new(),
        }
    }

    /// Appends the outcome of the next segment.
    pub fn record(&mut self, segment: impl Into<String>, outcome: SegmentOutcome) {
        self.reports.push(SegmentReport::new(segment, outcome));
    }

    /// Returns `true` for a multi-segment message.
    #[must_use]
    pub const fn is_compound(&self) -> bool {
        self.compound
    }

    /// Returns every segment report in order.
    #[must_use]
    pub fn reports(&self) -> &[SegmentReport] {
        &self.reports
    }

    /// Returns the segments that did not execute.
    pub fn failures(&self) -> impl Iterator<Item = &SegmentReport> {
        self.reports
            .iter()
            .filter(|report| !report.outcome().is_executed())
    }

    /// Returns how many segments executed.
    #[must_use]
    pub fn executed_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| report.outcome().is_executed())
            .count()
    }

    /// Returns `true` when an aggregated report must be sent.
    #[must_use]
    pub fn needs_report(&self) -> bool {
        self.compound && self.failures().next().is_some()
    }
}
