//! Digest — one generated summary snapshot for a category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::Category;

/// An immutable summary of one category's news at a point in time.
/// Once written, no field is ever updated; history accumulates per category
/// and reads pick by `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Digest {
  pub id:         Uuid,
  pub category:   Category,
  /// Raw generated prose, exactly as the summarizer returned it.
  pub content:    String,
  /// Source URLs reported by the summarizer, in its order.
  pub citations:  Vec<String>,
  /// Store-assigned timestamp; never changes after creation.
  pub created_at: DateTime<Utc>,
}

/// Input to [`crate::store::NewsletterStore::append_digest`].
/// `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewDigest {
  pub category:  Category,
  pub content:   String,
  pub citations: Vec<String>,
}
