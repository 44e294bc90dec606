//! Error types for `tidings-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::category::Category;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid input: {0}")]
  InvalidInput(String),

  #[error("subscription not found: {0}")]
  SubscriptionNotFound(Uuid),

  #[error("no digest recorded for category: {0}")]
  NoDigest(Category),

  #[error("unknown category: {0:?}")]
  UnknownCategory(String),

  #[error("digest generation failed: {0}")]
  Generation(Box<dyn std::error::Error + Send + Sync>),

  #[error("store error: {0}")]
  Store(Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
