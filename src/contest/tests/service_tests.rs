//! Tests for the contest service and the in-memory submission store.

use std::sync::Arc;

use rstest::{fixture, rstest};

use crate::contest::{
    adapters::InMemorySubmissions,
    domain::{DEFAULT_MAX_RATING, SubmissionId},
    ports::{SubmissionRepository, SubmissionRepositoryError},
    services::{ContestService, ContestServiceError},
};
use crate::gateway::domain::{GuildId, UserId};
use crate::response::domain::{Accent, Response};
use crate::settings::adapters::InMemoryGuildSettings;

const GUILD: GuildId = GuildId::new(10);
const OTHER_GUILD: GuildId = GuildId::new(20);
const ADA: UserId = UserId::new(1);
const GRACE: UserId = UserId::new(2);

struct Harness {
    store: Arc<InMemorySubmissions>,
    service: ContestService,
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(InMemorySubmissions::new());
    let service = ContestService::new(store.clone(), Arc::new(InMemoryGuildSettings::new()))
        .with_seed(7);
    Harness { store, service }
}

fn entry(body: &str) -> Response {
    Response::new(Accent::Neutral)
        .with_title("Entry")
        .with_body(body)
}

fn id(raw: u32) -> SubmissionId {
    SubmissionId::new(raw).expect("valid id")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submissions_get_unique_ids(harness: Harness) {
    let mut seen = std::collections::HashSet::new();
    for n in 0..50 {
        let submission = harness
            .service
            .submit(GUILD, ADA, entry(&format!("entry {n}")))
            .await
            .expect("submit");
        assert!(seen.insert(submission.id()));
        assert_eq!(submission.rating(), None);
    }
    assert_eq!(harness.store.submission_ids().await.expect("ids").len(), 50);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submitted_content_is_kept(harness: Harness) {
    let stored = harness
        .service
        .submit(GUILD, GRACE, entry("a poem"))
        .await
        .expect("submit");

    let fetched = harness.service.submission(stored.id()).await.expect("fetch");

    assert_eq!(fetched, stored);
    assert_eq!(fetched.embed().body(), Some("a poem"));
    assert_eq!(fetched.owner(), GRACE);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_ids_are_refused_by_the_store(harness: Harness) {
    let submission = crate::contest::domain::Submission::new(id(5), GUILD, ADA, entry("x"));
    harness.store.add_submission(&submission).await.expect("add");

    let again = harness.store.add_submission(&submission).await;

    assert!(matches!(again, Err(SubmissionRepositoryError::DuplicateId(taken)) if taken == id(5)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ratings_default_to_a_maximum_of_ten(harness: Harness) {
    let stored = harness
        .service
        .submit(GUILD, ADA, entry("x"))
        .await
        .expect("submit");

    assert_eq!(
        harness.service.max_rating(GUILD).await.expect("max"),
        DEFAULT_MAX_RATING
    );
    harness
        .service
        .rate(GUILD, stored.id(), 10)
        .await
        .expect("rating at the maximum");
    let too_high = harness.service.rate(GUILD, stored.id(), 11).await;

    assert!(matches!(
        too_high,
        Err(ContestServiceError::RatingTooHigh { rating: 11, max: 10 })
    ));
    assert_eq!(
        harness.service.rating(GUILD, stored.id()).await.expect("rating"),
        Some(10)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn guild_maximum_rating_is_enforced(harness: Harness) {
    let stored = harness
        .service
        .submit(GUILD, ADA, entry("x"))
        .await
        .expect("submit");
    harness.service.set_max_rating(GUILD, 5).await.expect("set max");

    assert!(matches!(
        harness.service.rate(GUILD, stored.id(), 6).await,
        Err(ContestServiceError::RatingTooHigh { rating: 6, max: 5 })
    ));
    assert!(matches!(
        harness.service.set_max_rating(GUILD, 0).await,
        Err(ContestServiceError::InvalidMaxRating)
    ));
    assert_eq!(harness.service.max_rating(OTHER_GUILD).await.expect("max"), 10);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn entries_are_scoped_to_their_guild(harness: Harness) {
    let stored = harness
        .service
        .submit(GUILD, ADA, entry("x"))
        .await
        .expect("submit");

    assert!(matches!(
        harness.service.rate(OTHER_GUILD, stored.id(), 3).await,
        Err(ContestServiceError::NotFound(_))
    ));
    assert!(matches!(
        harness.service.clear(OTHER_GUILD, stored.id()).await,
        Err(ContestServiceError::NotFound(_))
    ));
    assert!(harness.service.list(OTHER_GUILD).await.expect("list").is_empty());
    assert_eq!(harness.service.list(GUILD).await.expect("list").len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_orders_by_rating_with_unrated_last(harness: Harness) {
    let low = harness.service.submit(GUILD, ADA, entry("low")).await.expect("submit");
    let unrated = harness.service.submit(GUILD, ADA, entry("none")).await.expect("submit");
    let high = harness.service.submit(GUILD, GRACE, entry("high")).await.expect("submit");
    harness.service.rate(GUILD, high.id(), 9).await.expect("rate");
    harness.service.rate(GUILD, low.id(), 2).await.expect("rate");

    let order: Vec<SubmissionId> = harness
        .service
        .list(GUILD)
        .await
        .expect("list")
        .iter()
        .map(|submission| submission.id())
        .collect();

    assert_eq!(order, vec![low.id(), high.id(), unrated.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn withdraw_clear_and_purge(harness: Harness) {
    let first = harness.service.submit(GUILD, ADA, entry("1")).await.expect("submit");
    harness.service.submit(GUILD, ADA, entry("2")).await.expect("submit");
    let kept = harness.service.submit(GUILD, GRACE, entry("3")).await.expect("submit");
    harness.service.submit(OTHER_GUILD, ADA, entry("4")).await.expect("submit");

    assert_eq!(harness.service.withdraw(GUILD, ADA).await.expect("withdraw"), 2);
    assert!(matches!(
        harness.service.submission(first.id()).await,
        Err(ContestServiceError::NotFound(_))
    ));

    harness.service.clear(GUILD, kept.id()).await.expect("clear");
    assert!(harness.service.list(GUILD).await.expect("list").is_empty());

    assert_eq!(harness.service.purge(OTHER_GUILD).await.expect("purge"), 1);
    assert!(harness.store.submission_ids().await.expect("ids").is_empty());
}
