//! Guild settings persistence against a live database.

use kern::gateway::domain::ChannelId;
use kern::prefix::domain::Prefix;
use kern::settings::{
    adapters::PostgresGuildSettings, domain::ContestChannels, ports::GuildSettingsRepository,
};

use super::helpers::{fresh_guild, pool};

async fn repository() -> eyre::Result<Option<PostgresGuildSettings>> {
    let Some(built) = pool().await? else {
        return Ok(None);
    };
    let repository = PostgresGuildSettings::new(built);
    repository.ensure_schema().await?;
    Ok(Some(repository))
}

#[tokio::test(flavor = "multi_thread")]
async fn prefix_round_trips_and_resets() -> eyre::Result<()> {
    let Some(settings) = repository().await? else {
        return Ok(());
    };
    let guild = fresh_guild();

    assert_eq!(settings.get_prefix(guild).await?, None);
    settings.set_prefix(guild, &Prefix::new("k.")?).await?;
    assert_eq!(settings.get_prefix(guild).await?, Some(Prefix::new("k.")?));

    settings.remove_prefix(guild).await?;
    assert_eq!(settings.get_prefix(guild).await?, None);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn contest_settings_share_the_guild_row() -> eyre::Result<()> {
    let Some(settings) = repository().await? else {
        return Ok(());
    };
    let guild = fresh_guild();
    let channels = ContestChannels::new(ChannelId::new(10), ChannelId::new(11));

    settings.set_contest_channels(guild, channels).await?;
    settings.set_max_rating(guild, 5).await?;
    settings.set_prefix(guild, &Prefix::new("?")?).await?;

    assert_eq!(settings.get_contest_channels(guild).await?, Some(channels));
    assert_eq!(settings.get_max_rating(guild).await?, Some(5));
    assert_eq!(settings.get_prefix(guild).await?, Some(Prefix::new("?")?));
    Ok(())
}
