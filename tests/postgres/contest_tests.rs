//! Submission persistence against a live database.

use kern::contest::{
    adapters::PostgresSubmissions,
    domain::{Submission, SubmissionId},
    ports::SubmissionRepository,
};
use kern::gateway::domain::UserId;
use kern::response::domain::{Accent, Response};

use super::helpers::{fresh_guild, pool};

async fn repository() -> eyre::Result<Option<PostgresSubmissions>> {
    let Some(built) = pool().await? else {
        return Ok(None);
    };
    let repository = PostgresSubmissions::new(built);
    repository.ensure_schema().await?;
    Ok(Some(repository))
}

async fn unused_id(repository: &PostgresSubmissions, start: u32) -> eyre::Result<SubmissionId> {
    let taken = repository.submission_ids().await?;
    let mut candidate = start;
    loop {
        let id = SubmissionId::new(candidate)?;
        if !taken.contains(&id) {
            return Ok(id);
        }
        candidate = (candidate + 1) % 1_000_000;
    }
}

fn entry(body: &str) -> Response {
    Response::new(Accent::Neutral).with_body(body)
}

#[tokio::test(flavor = "multi_thread")]
async fn submissions_are_rated_and_listed_in_order() -> eyre::Result<()> {
    let Some(submissions) = repository().await? else {
        return Ok(());
    };
    let guild = fresh_guild();
    let author = UserId::new(300);
    let first = unused_id(&submissions, 100).await?;
    submissions
        .add_submission(&Submission::new(first, guild, author, entry("first")))
        .await?;
    let second = unused_id(&submissions, 200).await?;
    submissions
        .add_submission(&Submission::new(second, guild, author, entry("second")))
        .await?;

    assert!(submissions.set_rating(guild, second, 7).await?);
    assert_eq!(submissions.get_rating(guild, second).await?, Some(7));
    assert_eq!(submissions.get_rating(guild, first).await?, None);

    let listed: Vec<SubmissionId> = submissions
        .list_submissions(guild)
        .await?
        .iter()
        .map(Submission::id)
        .collect();
    assert_eq!(listed, vec![second, first]);

    let stored = submissions
        .get_submission(first)
        .await?
        .ok_or_else(|| eyre::eyre!("submission should exist"))?;
    assert_eq!(stored.embed().body(), Some("first"));

    assert_eq!(submissions.purge_submissions(guild).await?, 2);
    assert!(submissions.list_submissions(guild).await?.is_empty());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn withdraw_and_clear_are_scoped() -> eyre::Result<()> {
    let Some(submissions) = repository().await? else {
        return Ok(());
    };
    let guild = fresh_guild();
    let mine = unused_id(&submissions, 300).await?;
    submissions
        .add_submission(&Submission::new(mine, guild, UserId::new(1), entry("mine")))
        .await?;
    let theirs = unused_id(&submissions, 400).await?;
    submissions
        .add_submission(&Submission::new(theirs, guild, UserId::new(2), entry("theirs")))
        .await?;

    assert_eq!(submissions.remove_submission(guild, UserId::new(1)).await?, 1);
    assert!(!submissions.clear_submission(fresh_guild(), theirs).await?);
    assert!(submissions.clear_submission(guild, theirs).await?);
    assert!(submissions.list_submissions(guild).await?.is_empty());
    Ok(())
}
