//! Integration tests for `SqliteStore` against an in-memory database.

use tidings_core::{
  category::Category,
  digest::{Digest, NewDigest},
  store::NewsletterStore,
  subscription::{NewSubscription, SubscriptionStatus},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn subscription(category: Category, email: &str) -> NewSubscription {
  NewSubscription {
    category,
    email: email.into(),
    delivery_time: "08:00".into(),
    user_id: None,
  }
}

fn owned_subscription(
  category: Category,
  email: &str,
  user_id: &str,
) -> NewSubscription {
  NewSubscription {
    category,
    email: email.into(),
    delivery_time: "08:00".into(),
    user_id: Some(user_id.into()),
  }
}

fn digest(category: Category, content: &str) -> NewDigest {
  NewDigest {
    category,
    content: content.into(),
    citations: Vec::new(),
  }
}

// ─── Subscription upsert ─────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_creates_and_reads_back() {
  let s = store().await;

  let sub = s
    .upsert_subscription(subscription(Category::StockMarket, "a@example.com"))
    .await
    .unwrap();

  assert_eq!(sub.category, Category::StockMarket);
  assert_eq!(sub.email, "a@example.com");
  assert_eq!(sub.delivery_time, "08:00");
  assert_eq!(sub.status, SubscriptionStatus::Active);
  assert!(sub.user_id.is_none());
  assert_eq!(sub.created_at, sub.updated_at);
}

#[tokio::test]
async fn repeat_upsert_keeps_id_and_created_at() {
  let s = store().await;

  let first = s
    .upsert_subscription(subscription(Category::AiUpdates, "a@example.com"))
    .await
    .unwrap();

  let mut again = subscription(Category::AiUpdates, "a@example.com");
  again.delivery_time = "21:30".into();
  let second = s.upsert_subscription(again).await.unwrap();

  assert_eq!(second.id, first.id);
  assert_eq!(second.created_at, first.created_at);
  assert_eq!(second.delivery_time, "21:30");
  assert!(second.updated_at > first.updated_at);
}

#[tokio::test]
async fn upsert_is_unique_per_email_and_category() {
  let s = store().await;

  s.upsert_subscription(subscription(Category::Startups, "a@example.com"))
    .await
    .unwrap();
  s.upsert_subscription(subscription(Category::Startups, "a@example.com"))
    .await
    .unwrap();
  s.upsert_subscription(subscription(Category::Startups, "b@example.com"))
    .await
    .unwrap();
  // Same email in another category is a separate record.
  s.upsert_subscription(subscription(Category::Geopolitics, "a@example.com"))
    .await
    .unwrap();

  let startups = s.active_subscriptions(Category::Startups).await.unwrap();
  assert_eq!(startups.len(), 2);

  let geo = s.active_subscriptions(Category::Geopolitics).await.unwrap();
  assert_eq!(geo.len(), 1);
}

#[tokio::test]
async fn anonymous_upsert_preserves_owner() {
  let s = store().await;

  s.upsert_subscription(owned_subscription(
    Category::Geopolitics,
    "a@example.com",
    "user-1",
  ))
  .await
  .unwrap();

  let refreshed = s
    .upsert_subscription(subscription(Category::Geopolitics, "a@example.com"))
    .await
    .unwrap();
  assert_eq!(refreshed.user_id.as_deref(), Some("user-1"));
}

#[tokio::test]
async fn authenticated_upsert_claims_anonymous_record() {
  let s = store().await;

  s.upsert_subscription(subscription(Category::Geopolitics, "a@example.com"))
    .await
    .unwrap();

  let claimed = s
    .upsert_subscription(owned_subscription(
      Category::Geopolitics,
      "a@example.com",
      "user-1",
    ))
    .await
    .unwrap();
  assert_eq!(claimed.user_id.as_deref(), Some("user-1"));
}

// ─── Subscription reads and removal ──────────────────────────────────────────

#[tokio::test]
async fn subscriptions_for_user_scopes_to_owner() {
  let s = store().await;

  s.upsert_subscription(owned_subscription(
    Category::StockMarket,
    "a@example.com",
    "user-1",
  ))
  .await
  .unwrap();
  s.upsert_subscription(owned_subscription(
    Category::Startups,
    "a@example.com",
    "user-1",
  ))
  .await
  .unwrap();
  s.upsert_subscription(owned_subscription(
    Category::Startups,
    "b@example.com",
    "user-2",
  ))
  .await
  .unwrap();
  s.upsert_subscription(subscription(Category::Startups, "c@example.com"))
    .await
    .unwrap();

  let mine = s.subscriptions_for_user("user-1").await.unwrap();
  assert_eq!(mine.len(), 2);
  assert!(mine.iter().all(|sub| sub.user_id.as_deref() == Some("user-1")));
}

#[tokio::test]
async fn remove_subscription_requires_matching_owner() {
  let s = store().await;

  let sub = s
    .upsert_subscription(owned_subscription(
      Category::AiUpdates,
      "a@example.com",
      "user-1",
    ))
    .await
    .unwrap();

  // Wrong owner: nothing deleted.
  let removed = s.remove_subscription(sub.id, "user-2").await.unwrap();
  assert!(!removed);
  assert_eq!(s.subscriptions_for_user("user-1").await.unwrap().len(), 1);

  let removed = s.remove_subscription(sub.id, "user-1").await.unwrap();
  assert!(removed);
  assert!(s.subscriptions_for_user("user-1").await.unwrap().is_empty());
}

#[tokio::test]
async fn remove_unknown_id_returns_false() {
  let s = store().await;
  let removed = s.remove_subscription(Uuid::new_v4(), "user-1").await.unwrap();
  assert!(!removed);
}

// ─── Digests ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn append_and_read_back_digest() {
  let s = store().await;

  let mut input = digest(Category::Geopolitics, "- summit concluded");
  input.citations = vec![
    "https://news.example.com/a".into(),
    "https://news.example.com/b".into(),
  ];

  let appended = s.append_digest(input).await.unwrap();

  let latest = s
    .latest_digest(Category::Geopolitics)
    .await
    .unwrap()
    .expect("digest present");
  assert_eq!(latest.id, appended.id);
  assert_eq!(latest.content, "- summit concluded");
  assert_eq!(
    latest.citations,
    vec!["https://news.example.com/a", "https://news.example.com/b"]
  );
  assert_eq!(latest.created_at, appended.created_at);
}

#[tokio::test]
async fn latest_digest_missing_returns_none() {
  let s = store().await;
  let latest = s.latest_digest(Category::Startups).await.unwrap();
  assert!(latest.is_none());
}

#[tokio::test]
async fn recent_digests_newest_first() {
  let s = store().await;

  for content in ["one", "two", "three"] {
    s.append_digest(digest(Category::StockMarket, content))
      .await
      .unwrap();
  }

  let recent = s.recent_digests(Category::StockMarket, 10).await.unwrap();
  assert_eq!(recent.len(), 3);
  assert_eq!(recent[0].content, "three");
  assert_eq!(recent[1].content, "two");
  assert_eq!(recent[2].content, "one");

  let capped = s.recent_digests(Category::StockMarket, 2).await.unwrap();
  assert_eq!(capped.len(), 2);
  assert_eq!(capped[0].content, "three");
}

#[tokio::test]
async fn recent_digests_scoped_to_category() {
  let s = store().await;

  s.append_digest(digest(Category::StockMarket, "markets"))
    .await
    .unwrap();
  s.append_digest(digest(Category::AiUpdates, "models"))
    .await
    .unwrap();

  let recent = s.recent_digests(Category::AiUpdates, 10).await.unwrap();
  assert_eq!(recent.len(), 1);
  assert_eq!(recent[0].content, "models");
}

#[tokio::test]
async fn prune_digests_keeps_newest() {
  let s = store().await;

  for n in 0..5 {
    s.append_digest(digest(Category::Startups, &format!("digest {n}")))
      .await
      .unwrap();
  }
  // Another category is untouched by the prune.
  s.append_digest(digest(Category::AiUpdates, "other"))
    .await
    .unwrap();

  let deleted = s.prune_digests(Category::Startups, 2).await.unwrap();
  assert_eq!(deleted, 3);

  let kept = s.recent_digests(Category::Startups, 10).await.unwrap();
  assert_eq!(kept.len(), 2);
  assert_eq!(kept[0].content, "digest 4");
  assert_eq!(kept[1].content, "digest 3");

  assert!(s.latest_digest(Category::AiUpdates).await.unwrap().is_some());
}

// ─── Trait-generic access ────────────────────────────────────────────────────

async fn newest<S: NewsletterStore>(
  store: &S,
  category: Category,
) -> Result<Option<Digest>, S::Error> {
  store.latest_digest(category).await
}

#[tokio::test]
async fn serves_callers_generic_over_the_trait() {
  let s = store().await;

  // The associated error the trait impl exposes is the crate's own.
  let missing: Result<Option<Digest>, crate::Error> =
    newest(&s, Category::Geopolitics).await;
  assert!(missing.unwrap().is_none());

  s.append_digest(digest(Category::Geopolitics, "- summit concluded"))
    .await
    .unwrap();

  let found = newest(&s, Category::Geopolitics).await.unwrap();
  assert_eq!(found.expect("digest present").content, "- summit concluded");
}
