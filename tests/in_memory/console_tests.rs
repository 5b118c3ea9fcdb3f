//! The terminal transport driving a real bot.

use std::sync::Arc;

use kern::bot::services::BotBuilder;
use kern::gateway::{
    adapters::ConsoleTransport,
    domain::{Author, BotIdentity, UserId},
};
use rstest::rstest;

use crate::support::{GUILD, OWNER, message};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn replies_are_written_as_lines() -> eyre::Result<()> {
    let transport = Arc::new(ConsoleTransport::new(Vec::<u8>::new()));
    let bot = BotBuilder::new(
        transport.clone(),
        BotIdentity::new(UserId::new(999), "kern"),
        OWNER,
    )
    .with_initial_extensions(vec!["settings".to_owned()])
    .build()?;
    bot.start().await;

    bot.handle_message(&message(Author::new(OWNER, "operator"), Some(GUILD), "!get prefix"))
        .await;
    drop(bot);

    let sink = Arc::try_unwrap(transport)
        .map_err(|_| eyre::eyre!("transport still shared"))?
        .into_inner();
    let output = String::from_utf8(sink)?;
    assert!(output.contains("[#200] Prefix for this server: `!`"));
    Ok(())
}
