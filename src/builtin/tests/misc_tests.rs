//! Tests for `ping`, `restart` and `shutdown`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::TimeDelta;
use mockall::mock;
use rstest::rstest;

use crate::batch::services::GENERIC_FAILURE_BODY;
use crate::builtin::{
    ports::{LifecycleControl, LifecycleError},
    services::MiscExtension,
};
use crate::clock::ManualClock;
use crate::cog::services::ExtensionCatalog;
use crate::gateway::{
    adapters::StaticPermissions,
    domain::{Author, Message, MessageId},
};
use crate::test_support::{
    BotHarness, CHANNEL, GUILD, LOG_CHANNEL, OWNER, Pipeline, guild_message, owner_message,
    start_instant,
};

mock! {
    Lifecycle {}

    #[async_trait]
    impl LifecycleControl for Lifecycle {
        async fn request_restart(&self) -> Result<(), LifecycleError>;
        async fn request_shutdown(&self) -> Result<(), LifecycleError>;
    }
}

fn pipeline_with(lifecycle: MockLifecycle) -> Pipeline {
    let misc = MiscExtension::new(Arc::new(lifecycle)).expect("valid cog name");
    let pipeline = Pipeline::new(
        ExtensionCatalog::new().with_extension(Arc::new(misc)),
        StaticPermissions::new(),
    );
    pipeline.cogs.load("misc").expect("misc should load");
    pipeline
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ping_reports_the_elapsed_time() {
    let fx = BotHarness::start(&[]).await;
    fx.bed.clock().advance(TimeDelta::milliseconds(42));

    fx.say("!ping").await;

    assert_eq!(fx.transport.texts(), vec!["Pong. Time taken: `42ms`".to_owned()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn restart_announces_and_requests() {
    let mut lifecycle = MockLifecycle::new();
    lifecycle.expect_request_restart().times(1).returning(|| Ok(()));
    lifecycle.expect_request_shutdown().never();
    let pipeline = pipeline_with(lifecycle);

    pipeline.processor.process(&owner_message("!restart")).await;

    assert_eq!(pipeline.transport.texts(), vec!["Restarting bot.".to_owned()]);
    let operator = pipeline.transport.responses_in(LOG_CHANNEL);
    assert_eq!(operator.first().and_then(|r| r.body()), Some("Restarting bot."));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn shutdown_from_the_log_channel_is_announced_once() {
    let mut lifecycle = MockLifecycle::new();
    lifecycle.expect_request_shutdown().times(1).returning(|| Ok(()));
    let pipeline = pipeline_with(lifecycle);
    let in_log_channel = Message::builder(
        MessageId::new(9_001),
        Author::new(OWNER, "operator"),
        LOG_CHANNEL,
    )
    .with_content("!shutdown")
    .in_guild(GUILD)
    .build(&ManualClock::new(start_instant()));

    pipeline.processor.process(&in_log_channel).await;

    assert!(pipeline.transport.texts().is_empty());
    assert_eq!(pipeline.transport.responses_in(LOG_CHANNEL).len(), 1);
}

#[rstest]
#[case("!restart")]
#[case("!shutdown")]
#[tokio::test(flavor = "multi_thread")]
async fn members_cannot_stop_the_bot(#[case] text: &str) {
    let mut lifecycle = MockLifecycle::new();
    lifecycle.expect_request_restart().never();
    lifecycle.expect_request_shutdown().never();
    let pipeline = pipeline_with(lifecycle);

    pipeline.processor.process(&guild_message(text)).await;

    assert!(pipeline.transport.sent().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unavailable_lifecycle_is_an_infrastructure_failure() {
    let mut lifecycle = MockLifecycle::new();
    lifecycle
        .expect_request_shutdown()
        .times(1)
        .returning(|| Err(LifecycleError::Unavailable("supervisor gone".to_owned())));
    let pipeline = pipeline_with(lifecycle);

    pipeline.processor.process(&owner_message("!shutdown")).await;

    let user_facing = pipeline.transport.responses_in(CHANNEL);
    assert_eq!(
        user_facing.last().and_then(|r| r.body()),
        Some(GENERIC_FAILURE_BODY)
    );
    let operator = pipeline.transport.responses_in(LOG_CHANNEL);
    assert!(operator
        .iter()
        .any(|r| r.body().is_some_and(|body| body.contains("supervisor gone"))));
}
