//! Subscription — a standing request to receive one category's digests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::Category;

/// The delivery state of a subscription. Only `active` exists today; the
/// upsert path always (re)sets it.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
  #[default]
  Active,
}

impl SubscriptionStatus {
  /// The string stored in the `status` column.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Active => "active",
    }
  }
}

/// A standing request for one category's digests, keyed by
/// `(email, category)`.
///
/// At most one record exists per pair; a repeat subscribe for the pair
/// updates the record in place and never allocates a new `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
  pub id:            Uuid,
  pub category:      Category,
  pub email:         String,
  /// Preferred delivery time exactly as the subscriber entered it.
  /// Stored and displayed, never parsed.
  pub delivery_time: String,
  /// Set when the subscribe request carried a verified identity. Never
  /// cleared by a later anonymous update for the same pair.
  pub user_id:       Option<String>,
  pub created_at:    DateTime<Utc>,
  pub updated_at:    DateTime<Utc>,
  pub status:        SubscriptionStatus,
}

/// Input to [`crate::store::NewsletterStore::upsert_subscription`].
/// `id`, `created_at`, and `updated_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewSubscription {
  pub category:      Category,
  pub email:         String,
  pub delivery_time: String,
  pub user_id:       Option<String>,
}
