//! Outbound email stub.
//!
//! Looks up the delivery audience for a freshly generated digest and logs
//! what would be sent. No mail transport is wired up.

use tidings_core::{category::Category, store::NewsletterStore};

/// Log the would-be delivery audience for `category`.
///
/// Returns the number of active subscribers.
pub async fn notify_subscribers<S: NewsletterStore>(
  store: &S,
  category: Category,
) -> Result<usize, S::Error> {
  let subscribers = store.active_subscriptions(category).await?;

  // TODO: hand each subscriber off to a real mail transport here.
  tracing::info!(
    category = %category,
    subscribers = subscribers.len(),
    "would send digest email"
  );

  Ok(subscribers.len())
}
