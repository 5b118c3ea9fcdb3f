//! Per-message batch execution.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use super::ErrorReporter;
use crate::batch::domain::{BatchResult, CompoundSplitter, SegmentOutcome};
use crate::command::services::{DispatchOutcome, Dispatcher};
use crate::gateway::domain::Message;
use crate::prefix::{domain::AcceptedPrefixes, services::PrefixResolver};
use crate::response::{
    domain::{Accent, Response},
    services::ResponseServices,
};

/// Runs every segment of a message once, in order.
#[derive(Debug, Clone)]
pub struct BatchExecutor {
    resolver: Arc<PrefixResolver>,
    dispatcher: Arc<Dispatcher>,
    services: ResponseServices,
    reporter: ErrorReporter,
}

impl BatchExecutor {
    /// Creates an executor over the shared resolver and dispatcher.
    #[must_use]
    pub const fn new(
        resolver: Arc<PrefixResolver>,
        dispatcher: Arc<Dispatcher>,
        services: ResponseServices,
    ) -> Self {
        Self {
            resolver,
            dispatcher,
            services,
            reporter: ErrorReporter,
        }
    }

    /// Returns the dispatcher.
    #[must_use]
    pub const fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Returns the prefix resolver.
    #[must_use]
    pub const fn resolver(&self) -> &Arc<PrefixResolver> {
        &self.resolver
    }

    /// Executes `message`, returning one outcome per recorded segment.
    ///
    /// Segments of a compound message that match no prefix are recorded as
    /// not found; a single-segment message without a prefix is ignored and
    /// yields an empty result. A command text already attempted earlier in
    /// the batch is skipped. Single-segment failures are rendered straight
    /// away; compound failures are gathered into one report at the end.
    pub async fn execute(&self, message: &Message) -> BatchResult {
        let content = message.content();
        let compound = CompoundSplitter::is_compound(content);
        let accepted = self.acceptance(message).await;
        let mut result = BatchResult::new(compound);
        let mut attempted: HashSet<String> = HashSet::new();

        for segment in CompoundSplitter::split(content) {
            let Some(matched) = accepted.match_text(segment) else {
                if compound {
                    result.record(segment, SegmentOutcome::NotFound);
                }
                continue;
            };
            let command_text = matched.command_text();
            if command_text.is_empty() && !compound {
                debug!("prefix without a command ignored");
                continue;
            }
            if !attempted.insert(command_text.to_owned()) {
                debug!(command = command_text, "duplicate segment skipped");
                result.record(segment, SegmentOutcome::SkippedDuplicate);
                continue;
            }

            let segment_message = message.with_content(segment);
            let response = self
                .services
                .context_for(&segment_message, Some(matched.prefix().to_owned()));
            let outcome = self
                .dispatcher
                .dispatch(matched.prefix(), command_text, &response)
                .await;
            if !compound {
                self.reporter
                    .report_single(command_text, &outcome, &response)
                    .await;
            }
            result.record(segment, segment_outcome(outcome));
        }

        if compound {
            let response = self.services.context_for(message, None);
            self.reporter.report_batch(&result, &response).await;
        }
        result
    }

    async fn acceptance(&self, message: &Message) -> AcceptedPrefixes {
        match self.resolver.accepted(message).await {
            Ok(accepted) => accepted,
            Err(err) => {
                warn!(
                    guild = ?message.guild_id(),
                    error = %err,
                    "guild prefix unavailable; accepting global prefix only"
                );
                let report = Response::new(Accent::Warning)
                    .with_title("Prefix lookup failed")
                    .with_body(format!(
                        "Guild {} fell back to the global prefix: {err}",
                        message
                            .guild_id()
                            .map_or_else(|| "(direct)".to_owned(), |guild| guild.to_string()),
                    ));
                self.services.report_to_operators(report).await;
                self.resolver.fallback()
            }
        }
    }
}

fn segment_outcome(outcome: DispatchOutcome) -> SegmentOutcome {
    match outcome {
        DispatchOutcome::Executed => SegmentOutcome::Executed,
        DispatchOutcome::NotFound => SegmentOutcome::NotFound,
        DispatchOutcome::Rejected(rejection) => SegmentOutcome::Rejected(rejection),
        DispatchOutcome::Failed(err) => SegmentOutcome::ExecutionError(err),
    }
}
