//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 UTC strings, which sort
//! lexicographically in time order; the recency queries depend on that.
//! Citation lists are stored as compact JSON arrays. UUIDs are stored as
//! hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use tidings_core::{
  category::Category,
  digest::Digest,
  subscription::{Subscription, SubscriptionStatus},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── Timestamps ──────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Category ────────────────────────────────────────────────────────────────

pub fn encode_category(c: Category) -> &'static str { c.as_str() }

pub fn decode_category(s: &str) -> Result<Category> {
  match s {
    "stock-market" => Ok(Category::StockMarket),
    "ai-updates" => Ok(Category::AiUpdates),
    "geopolitics" => Ok(Category::Geopolitics),
    "startups" => Ok(Category::Startups),
    other => Err(Error::UnknownCategory(other.to_owned())),
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

pub fn encode_status(s: SubscriptionStatus) -> &'static str { s.as_str() }

pub fn decode_status(s: &str) -> Result<SubscriptionStatus> {
  match s {
    "active" => Ok(SubscriptionStatus::Active),
    other => Err(Error::UnknownStatus(other.to_owned())),
  }
}

// ─── Citations ───────────────────────────────────────────────────────────────

pub fn encode_citations(citations: &[String]) -> Result<String> {
  Ok(serde_json::to_string(citations)?)
}

pub fn decode_citations(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `subscriptions` row.
pub struct RawSubscription {
  pub subscription_id: String,
  pub category:        String,
  pub email:           String,
  pub delivery_time:   String,
  pub user_id:         Option<String>,
  pub created_at:      String,
  pub updated_at:      String,
  pub status:          String,
}

impl RawSubscription {
  pub fn into_subscription(self) -> Result<Subscription> {
    Ok(Subscription {
      id:            decode_uuid(&self.subscription_id)?,
      category:      decode_category(&self.category)?,
      email:         self.email,
      delivery_time: self.delivery_time,
      user_id:       self.user_id,
      created_at:    decode_dt(&self.created_at)?,
      updated_at:    decode_dt(&self.updated_at)?,
      status:        decode_status(&self.status)?,
    })
  }
}

/// Raw strings read directly from a `digests` row.
pub struct RawDigest {
  pub digest_id:  String,
  pub category:   String,
  pub content:    String,
  pub citations:  String,
  pub created_at: String,
}

impl RawDigest {
  pub fn into_digest(self) -> Result<Digest> {
    Ok(Digest {
      id:         decode_uuid(&self.digest_id)?,
      category:   decode_category(&self.category)?,
      content:    self.content,
      citations:  decode_citations(&self.citations)?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
