//! A contest from the first entry to the final purge.

use kern::contest::domain::SubmissionId;
use kern::gateway::{
    adapters::StaticPermissions,
    domain::{Capability, ChannelId},
};
use rstest::rstest;

use crate::support::{GUILD, Harness, MEMBER};

fn confirmed_id(body: Option<String>) -> eyre::Result<SubmissionId> {
    let text = body.ok_or_else(|| eyre::eyre!("no confirmation"))?;
    let id = text
        .strip_prefix("Submission `")
        .and_then(|rest| rest.strip_suffix("` received."))
        .ok_or_else(|| eyre::eyre!("unexpected confirmation: {text}"))?;
    Ok(id.parse()?)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn judged_contest_runs_end_to_end() -> eyre::Result<()> {
    let judge = StaticPermissions::new().with_grant(GUILD, MEMBER, Capability::ManageGuild);
    let fx = Harness::start(judge, |builder| builder).await?;

    fx.member_says("!set channels <#700> <#701> && !contest setmax 5").await;
    fx.member_says("!contest submit a haiku about rust").await;
    let id = confirmed_id(fx.last_body())?;
    assert_eq!(id.to_string().len(), 6);

    let posted = fx.transport.responses_in(ChannelId::new(700));
    assert_eq!(
        posted.first().and_then(|r| r.footer()),
        Some(format!("Submission {id}").as_str())
    );

    fx.member_says(&format!("!contest rate {id} 6")).await;
    assert_eq!(
        fx.last_body().as_deref(),
        Some("the rating 6 is greater than the maximum rating allowed (5)")
    );
    fx.member_says(&format!("!contest rate {id} 5")).await;
    fx.member_says("!contest list").await;
    assert_eq!(
        fx.last_body(),
        Some(format!("`{id}` by <@{MEMBER}>: 5/5"))
    );

    fx.member_says("!contest purge").await;
    assert_eq!(fx.last_body().as_deref(), Some("Removed 1 submission(s)."));
    assert!(fx.bot.contest().list(GUILD).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn disabled_contest_cog_hides_its_commands() -> eyre::Result<()> {
    let fx = Harness::start(StaticPermissions::new(), |builder| builder).await?;

    fx.owner_says("!cogs disable contest").await;
    fx.member_says("!contest submit too late").await;

    assert_eq!(
        fx.last_body().as_deref(),
        Some("Command `contest` is not found.")
    );
    assert!(fx.bot.contest().list(GUILD).await?.is_empty());
    Ok(())
}
