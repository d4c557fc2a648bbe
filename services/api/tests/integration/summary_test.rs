use std::sync::Arc;

use sea_orm::{EntityTrait, PaginatorTrait};

use cookbook_api::domain::repository::LikeRepository;
use cookbook_api::infra::db::DbLikeRepository;
use cookbook_api::jobs::JobRegistry;
use cookbook_api::jobs::summary::DailyLikesSummaryJob;
use cookbook_api::usecase::summary::{DAILY_LIKES_SUMMARY, SUMMARY_SUBJECT};
use cookbook_api_schema::job_runs;

use crate::helpers::{RecordingMailer, seed_category, seed_recipe, seed_user, test_db};

#[tokio::test]
async fn should_email_each_author_with_likes_once_per_day() {
    let db = test_db().await;
    let alice = seed_user(&db, "alice").await;
    let bob = seed_user(&db, "bob").await;
    let carol = seed_user(&db, "carol").await;
    let category = seed_category(&db, "Mains").await;
    let r1 = seed_recipe(&db, alice.id, category.id, "Lasagna").await;
    let r2 = seed_recipe(&db, alice.id, category.id, "Risotto").await;
    seed_recipe(&db, bob.id, category.id, "Toast").await;

    let likes = DbLikeRepository { db: db.clone() };
    for (user_id, recipe_id) in [(bob.id, r1.id), (carol.id, r1.id), (carol.id, r2.id)] {
        assert!(likes.insert(user_id, recipe_id).await.unwrap());
    }

    let mailer = Arc::new(RecordingMailer::default());
    let mut registry = JobRegistry::new();
    registry.register_daily(
        chrono::NaiveTime::MIN,
        Arc::new(DailyLikesSummaryJob {
            db: db.clone(),
            mailer: mailer.clone(),
        }),
    );

    registry.run_now(DAILY_LIKES_SUMMARY, false).await.unwrap();

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "alice@example.com");
    assert_eq!(sent[0].subject, SUMMARY_SUBJECT);
    assert!(sent[0].body.contains("Hello alice"));
    assert!(sent[0].body.contains("total of 3 likes"));

    // Second run on the same date is claimed already.
    registry.run_now(DAILY_LIKES_SUMMARY, false).await.unwrap();
    assert_eq!(mailer.sent().len(), 1);
    assert_eq!(job_runs::Entity::find().count(&db).await.unwrap(), 1);

    registry.run_now(DAILY_LIKES_SUMMARY, true).await.unwrap();
    assert_eq!(mailer.sent().len(), 2);
}

#[tokio::test]
async fn should_email_each_author_their_own_total() {
    let db = test_db().await;
    let alice = seed_user(&db, "alice").await;
    let bob = seed_user(&db, "bob").await;
    let carol = seed_user(&db, "carol").await;
    let category = seed_category(&db, "Mains").await;
    let lasagna = seed_recipe(&db, alice.id, category.id, "Lasagna").await;
    let stew = seed_recipe(&db, bob.id, category.id, "Stew").await;
    let toast = seed_recipe(&db, bob.id, category.id, "Toast").await;

    let likes = DbLikeRepository { db: db.clone() };
    for (user_id, recipe_id) in [(carol.id, lasagna.id), (carol.id, stew.id), (alice.id, toast.id)] {
        assert!(likes.insert(user_id, recipe_id).await.unwrap());
    }
    assert_eq!(likes.count_for_author(alice.id).await.unwrap(), 1);
    assert_eq!(likes.count_for_author(bob.id).await.unwrap(), 2);

    let mailer = Arc::new(RecordingMailer::default());
    let mut registry = JobRegistry::new();
    registry.register_daily(
        chrono::NaiveTime::MIN,
        Arc::new(DailyLikesSummaryJob {
            db,
            mailer: mailer.clone(),
        }),
    );
    registry.run_now(DAILY_LIKES_SUMMARY, false).await.unwrap();

    let mut sent = mailer.sent();
    sent.sort_by(|a, b| a.to.cmp(&b.to));
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, "alice@example.com");
    assert!(sent[0].body.contains("Hello alice"));
    assert!(sent[0].body.contains("total of 1 likes"));
    assert_eq!(sent[1].to, "bob@example.com");
    assert!(sent[1].body.contains("Hello bob"));
    assert!(sent[1].body.contains("total of 2 likes"));
}

#[tokio::test]
async fn should_skip_author_whose_only_like_was_withdrawn() {
    let db = test_db().await;
    let alice = seed_user(&db, "alice").await;
    let bob = seed_user(&db, "bob").await;
    let category = seed_category(&db, "Soup").await;
    let soup = seed_recipe(&db, alice.id, category.id, "Minestrone").await;

    let likes = DbLikeRepository { db: db.clone() };
    assert!(likes.insert(bob.id, soup.id).await.unwrap());
    assert_eq!(likes.count_for_author(alice.id).await.unwrap(), 1);
    assert!(likes.delete(bob.id, soup.id).await.unwrap());
    assert_eq!(likes.count_for_author(alice.id).await.unwrap(), 0);

    let mailer = Arc::new(RecordingMailer::default());
    let mut registry = JobRegistry::new();
    registry.register_daily(
        chrono::NaiveTime::MIN,
        Arc::new(DailyLikesSummaryJob {
            db,
            mailer: mailer.clone(),
        }),
    );
    registry.run_now(DAILY_LIKES_SUMMARY, false).await.unwrap();
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn should_send_nothing_without_likes() {
    let db = test_db().await;
    let author = seed_user(&db, "quiet").await;
    let category = seed_category(&db, "Snacks").await;
    seed_recipe(&db, author.id, category.id, "Crackers").await;

    let mailer = Arc::new(RecordingMailer::default());
    let mut registry = JobRegistry::new();
    registry.register_daily(
        chrono::NaiveTime::MIN,
        Arc::new(DailyLikesSummaryJob {
            db,
            mailer: mailer.clone(),
        }),
    );

    registry.run_now(DAILY_LIKES_SUMMARY, false).await.unwrap();
    assert!(mailer.sent().is_empty());
}
