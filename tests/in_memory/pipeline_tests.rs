//! Prefix resolution, compound splitting and error reporting through the
//! public bot API.

use std::sync::Arc;

use kern::gateway::{
    adapters::StaticPermissions,
    domain::{Author, UserId},
};
use kern::response::adapters::InMemoryPasteBin;
use rstest::rstest;

use crate::support::{GUILD, Harness, LOG_CHANNEL, MEMBER, message};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn compound_message_runs_each_distinct_segment_once() -> eyre::Result<()> {
    let fx = Harness::start(StaticPermissions::new(), |builder| builder).await?;

    let result = fx
        .bot
        .handle_message(&message(
            Author::new(MEMBER, "ada"),
            Some(GUILD),
            "!ping && !get prefix && !ping",
        ))
        .await;

    assert_eq!(result.executed_count(), 2);
    assert_eq!(result.reports().len(), 3);
    assert_eq!(
        fx.transport.texts(),
        vec![
            "Pong. Time taken: `0ms`".to_owned(),
            "Prefix for this server: `!`".to_owned(),
        ]
    );
    assert!(fx.responses().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failing_segments_are_summarised_once() -> eyre::Result<()> {
    let fx = Harness::start(StaticPermissions::new(), |builder| builder).await?;

    fx.member_says("!ping && !nope && !contest rate 1 2").await;

    let responses = fx.responses();
    assert_eq!(responses.len(), 1);
    let report = responses.first().ok_or_else(|| eyre::eyre!("no report"))?;
    let body = report.body().unwrap_or_default();
    assert!(body.contains("**!nope**: command not found"));
    assert!(body.contains("**!contest rate 1 2**"));
    assert!(!body.contains("!ping"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mention_prefix_always_works() -> eyre::Result<()> {
    let fx = Harness::start(StaticPermissions::new(), |builder| builder.with_prefix("k.")).await?;

    fx.member_says("<@999> ping").await;
    fx.member_says("<@!999> ping").await;
    fx.member_says("k.ping").await;
    fx.member_says("!ping").await;

    assert_eq!(fx.transport.texts().len(), 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn changed_prefix_applies_to_the_next_message() -> eyre::Result<()> {
    let fx = Harness::start(StaticPermissions::new(), |builder| builder).await?;

    fx.owner_says("!set prefix $").await;
    fx.member_says("!ping").await;
    fx.member_says("$ping").await;

    assert_eq!(
        fx.transport.texts(),
        vec![
            "Set prefix to `$`".to_owned(),
            "Pong. Time taken: `0ms`".to_owned(),
        ]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn other_bots_are_never_answered() -> eyre::Result<()> {
    let fx = Harness::start(StaticPermissions::allow_all(), |builder| builder).await?;

    let result = fx
        .bot
        .handle_message(&message(
            Author::bot(UserId::new(77), "other"),
            Some(GUILD),
            "!ping && !ping",
        ))
        .await;

    assert!(result.reports().is_empty());
    assert!(fx.transport.sent().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn oversized_output_is_offloaded_to_the_paste_service() -> eyre::Result<()> {
    let paste = InMemoryPasteBin::new();
    let uploader = Arc::new(paste.clone());
    let fx = Harness::start(StaticPermissions::new(), |builder| builder.with_uploader(uploader))
        .await?;

    fx.owner_says(&format!("!set channels {}", "x".repeat(2_100))).await;

    assert_eq!(
        fx.last_body().as_deref(),
        Some("**Output too long**: memory://paste/1")
    );
    assert_eq!(paste.documents().len(), 1);
    assert!(fx.transport.responses_in(LOG_CHANNEL).is_empty());
    Ok(())
}
