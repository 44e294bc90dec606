//! The `NewsletterStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `tidings-store-sqlite`). Higher layers (`tidings-api`, `tidings-server`)
//! depend on this abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  category::Category,
  digest::{Digest, NewDigest},
  subscription::{NewSubscription, Subscription},
};

/// Abstraction over a newsletter store backend.
///
/// Subscriptions are keyed by `(email, category)`; writes for a pair are
/// atomic, so two concurrent subscribes cannot lose an update. Digests are
/// append-only and ordered by creation time within a category.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait NewsletterStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Subscriptions ─────────────────────────────────────────────────────

  /// Create or update the subscription for `(input.email, input.category)`
  /// in one atomic write.
  ///
  /// An existing record keeps its `id` and `created_at`, takes the new
  /// `delivery_time`, is reset to active, and gets a fresh `updated_at`.
  /// `input.user_id` replaces the stored owner only when it is `Some`; an
  /// anonymous update never clears an owner.
  fn upsert_subscription(
    &self,
    input: NewSubscription,
  ) -> impl Future<Output = Result<Subscription, Self::Error>> + Send + '_;

  /// All subscriptions owned by `user_id`.
  fn subscriptions_for_user<'a>(
    &'a self,
    user_id: &'a str,
  ) -> impl Future<Output = Result<Vec<Subscription>, Self::Error>> + Send + 'a;

  /// All active subscriptions for `category` — the delivery audience.
  fn active_subscriptions(
    &self,
    category: Category,
  ) -> impl Future<Output = Result<Vec<Subscription>, Self::Error>> + Send + '_;

  /// Delete the subscription with `id` if it is owned by `user_id`.
  /// Returns whether a row was deleted.
  fn remove_subscription<'a>(
    &'a self,
    id: Uuid,
    user_id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  // ── Digests ───────────────────────────────────────────────────────────

  /// Persist a new digest and return it with its assigned `id` and
  /// `created_at`.
  fn append_digest(
    &self,
    input: NewDigest,
  ) -> impl Future<Output = Result<Digest, Self::Error>> + Send + '_;

  /// The newest digest for `category`, or `None` if none exists yet.
  fn latest_digest(
    &self,
    category: Category,
  ) -> impl Future<Output = Result<Option<Digest>, Self::Error>> + Send + '_;

  /// The newest `limit` digests for `category`, newest first.
  fn recent_digests(
    &self,
    category: Category,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Digest>, Self::Error>> + Send + '_;

  /// Delete all but the newest `keep` digests for `category`.
  /// Returns the number of rows deleted.
  fn prune_digests(
    &self,
    category: Category,
    keep: usize,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;
}
