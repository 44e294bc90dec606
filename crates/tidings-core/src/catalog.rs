//! DigestCatalog — append-only digest history per category.

use std::sync::Arc;

use crate::{
  category::Category,
  digest::{Digest, NewDigest},
  error::{Error, Result},
  store::NewsletterStore,
};

/// Number of records [`DigestCatalog::recent`] returns when the caller
/// names no limit.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Read and append access to the digest history, with an optional
/// per-category retention cap.
pub struct DigestCatalog<S> {
  store:     Arc<S>,
  /// Newest records kept per category after an append; `None` keeps all.
  retention: Option<usize>,
}

impl<S: NewsletterStore> DigestCatalog<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store, retention: None } }

  /// A catalog that prunes each category to its newest `keep` records
  /// after every append.
  pub fn with_retention(store: Arc<S>, keep: usize) -> Self {
    Self { store, retention: Some(keep) }
  }

  /// Persist a new digest, then enforce the retention cap.
  pub async fn append(&self, input: NewDigest) -> Result<Digest> {
    let category = input.category;
    let digest = self
      .store
      .append_digest(input)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;

    if let Some(keep) = self.retention {
      self
        .store
        .prune_digests(category, keep)
        .await
        .map_err(|e| Error::Store(Box::new(e)))?;
    }

    Ok(digest)
  }

  /// The newest digest for `category`; [`Error::NoDigest`] when the
  /// category has never been generated.
  pub async fn latest(&self, category: Category) -> Result<Digest> {
    self
      .store
      .latest_digest(category)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?
      .ok_or(Error::NoDigest(category))
  }

  /// The newest digests for `category`, newest first, truncated to `limit`
  /// (default [`DEFAULT_RECENT_LIMIT`]).
  pub async fn recent(
    &self,
    category: Category,
    limit: Option<usize>,
  ) -> Result<Vec<Digest>> {
    let limit = limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    self
      .store
      .recent_digests(category, limit)
      .await
      .map_err(|e| Error::Store(Box::new(e)))
  }
}
