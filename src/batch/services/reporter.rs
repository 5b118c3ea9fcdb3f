//! Single-command failure rendering.

use tracing::{debug, error};

use crate::batch::domain::{BatchResult, SegmentOutcome};
use crate::command::domain::{CommandError, split_first_token};
use crate::command::services::DispatchOutcome;
use crate::response::{
    domain::{Accent, RenderOptions, Response},
    services::ResponseContext,
};
use crate::templates::{self, BATCH_REPORT};

/// Title of the aggregated compound-message report.
pub const BATCH_REPORT_TITLE: &str = "These failed to run:";

/// Body shown to users when infrastructure fails underneath a command.
pub const GENERIC_FAILURE_BODY: &str =
    "Something went wrong while running this command. The operators have been notified.";

/// Turns dispatch outcomes into user-facing responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorReporter;

impl ErrorReporter {
    /// Renders the outcome of a single-command message.
    ///
    /// Executed commands and owner-only refusals produce nothing.
    /// Infrastructure and unclassified failures are also duplicated to the
    /// operator log channel.
    pub async fn report_single(
        &self,
        command_text: &str,
        outcome: &DispatchOutcome,
        response: &ResponseContext,
    ) {
        match outcome {
            DispatchOutcome::Executed => {}
            DispatchOutcome::NotFound => {
                let (name, _) = split_first_token(command_text);
                response
                    .error(format!("Command `{name}` is not found."))
                    .await;
            }
            DispatchOutcome::Rejected(rejection) if rejection.is_silent() => {
                debug!(command = command_text, %rejection, "guard refusal kept silent");
            }
            DispatchOutcome::Rejected(rejection) => {
                response.error(rejection.to_string()).await;
            }
            DispatchOutcome::Failed(err) => {
                report_failure(command_text, err, response).await;
            }
        }
    }

    /// Renders the aggregated report for a compound message, if one is
    /// needed.
    ///
    /// Infrastructure and unclassified failures of any segment are also
    /// reported to the operator log channel.
    pub async fn report_batch(&self, result: &BatchResult, response: &ResponseContext) {
        if !result.needs_report() {
            return;
        }
        for report in result.failures() {
            if let SegmentOutcome::ExecutionError(err) = report.outcome() {
                notify_operators(report.segment(), err, response).await;
            }
        }
        let failures: Vec<ReportEntry<'_>> = result
            .failures()
            .map(|report| ReportEntry {
                segment: report.segment(),
                reason: batch_reason(report.outcome()),
            })
            .collect();
        let body = match templates::render(BATCH_REPORT, minijinja::context! { failures }) {
            Ok(rendered) => rendered,
            Err(err) => {
                error!(error = %err, "batch report template failed");
                fallback_report(&failures)
            }
        };
        response
            .error_with(body, RenderOptions::default().titled(BATCH_REPORT_TITLE))
            .await;
    }
}

async fn report_failure(command_text: &str, err: &CommandError, response: &ResponseContext) {
    match err {
        CommandError::Infrastructure(_) => {
            response.error(GENERIC_FAILURE_BODY).await;
        }
        CommandError::Unclassified { category, message } => {
            response
                .error(format!("An unexpected {category} occurred: {message}"))
                .await;
        }
        CommandError::InvalidArguments(_)
        | CommandError::Timeout(_)
        | CommandError::Upstream { .. }
        | CommandError::Failed(_) => {
            response.error(err.to_string()).await;
        }
    }
    notify_operators(command_text, err, response).await;
}

async fn notify_operators(command_text: &str, err: &CommandError, response: &ResponseContext) {
    if !err.is_operator_visible() {
        return;
    }
    error!(command = command_text, error = %err, "command failed unexpectedly");
    let origin = response.origin();
    let report = Response::new(Accent::Error)
        .with_title(format!("Command failed: {}", err.category()))
        .with_body(format!(
            "`{command_text}` by {} in <#{}>\n{err}",
            origin.author().name(),
            origin.channel_id(),
        ));
    response.services().report_to_operators(report).await;
}

fn batch_reason(outcome: &SegmentOutcome) -> String {
    match outcome {
        SegmentOutcome::ExecutionError(CommandError::Infrastructure(_)) => {
            GENERIC_FAILURE_BODY.to_owned()
        }
        other => other.reason(),
    }
}

#[derive(Debug, serde::Serialize)]
struct ReportEntry<'a> {
    segment: &'a str,
    reason: String,
}

fn fallback_report(failures: &[ReportEntry<'_>]) -> String {
    failures
        .iter()
        .map(|entry| {
            let segment = if entry.segment.is_empty() {
                "(empty)"
            } else {
                entry.segment
            };
            format!("**{segment}**: {}", entry.reason)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
