//! The `contest` extension: submissions, ratings and moderation.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{group::SubcommandRequired, require_guild, required_argument, setup_error};
use crate::cog::{
    domain::{CogDomainError, CogName},
    ports::{Extension, ExtensionError},
};
use crate::command::{
    domain::{
        CommandDescriptor, CommandError, CommandResult, CooldownScope, CooldownSpec, Guards,
        InvocationContext,
    },
    ports::CommandHandler,
};
use crate::contest::{
    domain::{Submission, SubmissionId},
    services::{ContestService, ContestServiceError},
};
use crate::gateway::domain::{Capability, GuildId};
use crate::response::{
    domain::{Accent, RenderOptions, Response},
    services::ResponseContext,
};
use crate::settings::ports::GuildSettingsRepository;

const MEMBER_GUARDS: Guards = Guards::none().guild_only();
const JUDGE_GUARDS: Guards = Guards::none()
    .guild_only()
    .require_or_owner(Capability::ManageGuild);
const SUBMIT_COOLDOWN: CooldownSpec =
    CooldownSpec::new(NonZeroU32::MIN, Duration::from_secs(30), CooldownScope::User);

fn contest_error(err: ContestServiceError) -> CommandError {
    match err {
        ContestServiceError::Submissions(_) | ContestServiceError::Settings(_) => {
            CommandError::infrastructure(err)
        }
        ContestServiceError::NotFound(_)
        | ContestServiceError::RatingTooHigh { .. }
        | ContestServiceError::InvalidMaxRating
        | ContestServiceError::IdSpaceExhausted => CommandError::Failed(err.to_string()),
    }
}

fn parse_id(token: &str) -> CommandResult<SubmissionId> {
    token
        .parse::<SubmissionId>()
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))
}

fn parse_rating(token: &str) -> CommandResult<u32> {
    token
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("`{token}` is not a rating")))
}

/// The operation a `contest` subcommand performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContestAction {
    Submit,
    List,
    Rate,
    Withdraw,
    Clear,
    Purge,
    Max,
    SetMax,
}

struct ContestHandler {
    contest: Arc<ContestService>,
    settings: Arc<dyn GuildSettingsRepository>,
    action: ContestAction,
}

impl ContestHandler {
    async fn submit(
        &self,
        guild: GuildId,
        invocation: &InvocationContext,
        response: &ResponseContext,
    ) -> CommandResult<()> {
        let text = required_argument(invocation, "the submission text")?;
        let author = invocation.message().author();
        let embed = Response::new(Accent::Neutral)
            .with_title(format!("Submission by {}", author.name()))
            .with_body(text)
            .with_timestamp(invocation.message().created_at());
        let submission = self
            .contest
            .submit(guild, author.id(), embed)
            .await
            .map_err(contest_error)?;
        let channels = self
            .settings
            .get_contest_channels(guild)
            .await
            .map_err(CommandError::infrastructure)?;
        if let Some(channels) = channels {
            let posted = submission
                .embed()
                .clone()
                .with_footer(format!("Submission {}", submission.id()));
            response.services().deliver(channels.receive(), &posted).await;
        }
        response
            .success(format!("Submission `{}` received.", submission.id()))
            .await;
        Ok(())
    }

    async fn list(&self, guild: GuildId, response: &ResponseContext) -> CommandResult<()> {
        let submissions = self.contest.list(guild).await.map_err(contest_error)?;
        if submissions.is_empty() {
            response.neutral("There are no submissions yet.").await;
            return Ok(());
        }
        let max = self.contest.max_rating(guild).await.map_err(contest_error)?;
        let body = submissions
            .iter()
            .map(|submission| listing_line(submission, max))
            .collect::<Vec<_>>()
            .join("\n");
        response
            .neutral_with(body, RenderOptions::default().titled("Submissions:"))
            .await;
        Ok(())
    }

    async fn rate(
        &self,
        guild: GuildId,
        invocation: &InvocationContext,
        response: &ResponseContext,
    ) -> CommandResult<()> {
        let mut tokens = invocation.argument_tokens();
        let (Some(id_token), Some(rating_token), None) =
            (tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(CommandError::InvalidArguments(
                "expected <submission id> <rating>".to_owned(),
            ));
        };
        let id = parse_id(id_token)?;
        let rating = parse_rating(rating_token)?;
        self.contest
            .rate(guild, id, rating)
            .await
            .map_err(contest_error)?;
        response
            .success(format!("Submission `{id}` rated {rating}."))
            .await;
        Ok(())
    }
}

fn listing_line(submission: &Submission, max: u32) -> String {
    let rating = submission
        .rating()
        .map_or_else(|| "unrated".to_owned(), |rating| format!("{rating}/{max}"));
    format!(
        "`{}` by <@{}>: {rating}",
        submission.id(),
        submission.owner()
    )
}

#[async_trait]
impl CommandHandler for ContestHandler {
    async fn invoke(
        &self,
        invocation: &InvocationContext,
        response: &ResponseContext,
    ) -> CommandResult<()> {
        let guild = require_guild(invocation)?;
        match self.action {
            ContestAction::Submit => self.submit(guild, invocation, response).await,
            ContestAction::List => self.list(guild, response).await,
            ContestAction::Rate => self.rate(guild, invocation, response).await,
            ContestAction::Withdraw => {
                let author = invocation.message().author().id();
                let removed = self
                    .contest
                    .withdraw(guild, author)
                    .await
                    .map_err(contest_error)?;
                if removed == 0 {
                    response
                        .neutral("You have no submissions in this server.")
                        .await;
                } else {
                    response
                        .success(format!("Withdrew {removed} submission(s)."))
                        .await;
                }
                Ok(())
            }
            ContestAction::Clear => {
                let id = parse_id(required_argument(invocation, "a submission id")?)?;
                self.contest.clear(guild, id).await.map_err(contest_error)?;
                response.success(format!("Submission `{id}` removed.")).await;
                Ok(())
            }
            ContestAction::Purge => {
                let removed = self.contest.purge(guild).await.map_err(contest_error)?;
                response
                    .success(format!("Removed {removed} submission(s)."))
                    .await;
                Ok(())
            }
            ContestAction::Max => {
                let max = self.contest.max_rating(guild).await.map_err(contest_error)?;
                response
                    .neutral(format!("The maximum rating is {max}."))
                    .await;
                Ok(())
            }
            ContestAction::SetMax => {
                let max = parse_rating(required_argument(invocation, "a maximum rating")?)?;
                self.contest
                    .set_max_rating(guild, max)
                    .await
                    .map_err(contest_error)?;
                response
                    .success(format!("Maximum rating set to {max}."))
                    .await;
                Ok(())
            }
        }
    }
}

/// Contest entry, rating and moderation commands.
pub struct ContestExtension {
    name: CogName,
    contest: Arc<ContestService>,
    settings: Arc<dyn GuildSettingsRepository>,
}

impl std::fmt::Debug for ContestExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContestExtension")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl ContestExtension {
    /// Creates the extension.
    ///
    /// # Errors
    ///
    /// Returns [`CogDomainError`] when the cog name is rejected.
    pub fn new(
        contest: Arc<ContestService>,
        settings: Arc<dyn GuildSettingsRepository>,
    ) -> Result<Self, CogDomainError> {
        Ok(Self {
            name: CogName::new("contest")?,
            contest,
            settings,
        })
    }

    fn command(
        &self,
        name: &str,
        action: ContestAction,
        guards: Guards,
        help: &str,
    ) -> Result<CommandDescriptor, ExtensionError> {
        let handler = Arc::new(ContestHandler {
            contest: self.contest.clone(),
            settings: self.settings.clone(),
            action,
        });
        Ok(CommandDescriptor::parse(name, handler)
            .map_err(|err| setup_error(&err))?
            .with_help(help)
            .with_guards(guards))
    }
}

impl Extension for ContestExtension {
    fn name(&self) -> &CogName {
        &self.name
    }

    fn description(&self) -> &str {
        "Contest submissions and ratings"
    }

    fn commands(&self) -> Result<Vec<CommandDescriptor>, ExtensionError> {
        let group = CommandDescriptor::parse("contest", Arc::new(SubcommandRequired))
            .map_err(|err| setup_error(&err))?
            .with_help("Enter, list and judge contest submissions")
            .with_guards(MEMBER_GUARDS);
        Ok(vec![
            group,
            self.command(
                "contest submit",
                ContestAction::Submit,
                MEMBER_GUARDS.cooldown(SUBMIT_COOLDOWN),
                "Enter the contest with the given text",
            )?
            .with_alias("enter"),
            self.command(
                "contest list",
                ContestAction::List,
                MEMBER_GUARDS,
                "List this server's submissions by rating",
            )?,
            self.command(
                "contest withdraw",
                ContestAction::Withdraw,
                MEMBER_GUARDS,
                "Withdraw all of your submissions",
            )?,
            self.command(
                "contest max",
                ContestAction::Max,
                MEMBER_GUARDS,
                "Show the highest rating a submission may receive",
            )?,
            self.command(
                "contest rate",
                ContestAction::Rate,
                JUDGE_GUARDS,
                "Rate a submission: <submission id> <rating>",
            )?,
            self.command(
                "contest clear",
                ContestAction::Clear,
                JUDGE_GUARDS,
                "Remove one submission by id",
            )?,
            self.command(
                "contest purge",
                ContestAction::Purge,
                JUDGE_GUARDS,
                "Remove every submission in this server",
            )?,
            self.command(
                "contest setmax",
                ContestAction::SetMax,
                JUDGE_GUARDS,
                "Set the highest rating a submission may receive",
            )?,
        ])
    }
}
