//! SubscriptionRegistry — subscribe, list, and unsubscribe over a store
//! backend.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
  error::{Error, Result},
  store::NewsletterStore,
  subscription::{NewSubscription, Subscription},
};

/// Subscription operations, with input validation at the boundary.
///
/// Category validity is carried by the [`Category`](crate::category::Category)
/// type itself; only the free-form fields are checked here. Store failures
/// surface as [`Error::Store`], never silently.
pub struct SubscriptionRegistry<S> {
  store: Arc<S>,
}

impl<S: NewsletterStore> SubscriptionRegistry<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Create or refresh the subscription for `(input.email, input.category)`.
  ///
  /// A repeat subscribe for the pair keeps the record's `id` and
  /// `created_at`, takes the new delivery time, reactivates it, and
  /// refreshes `updated_at`. An already-set owner survives a later
  /// anonymous request.
  pub async fn subscribe(
    &self,
    input: NewSubscription,
  ) -> Result<Subscription> {
    if input.email.trim().is_empty() {
      return Err(Error::InvalidInput("email must not be blank".into()));
    }
    if input.delivery_time.trim().is_empty() {
      return Err(Error::InvalidInput(
        "deliveryTime must not be blank".into(),
      ));
    }

    self
      .store
      .upsert_subscription(input)
      .await
      .map_err(|e| Error::Store(Box::new(e)))
  }

  /// All subscriptions owned by `user_id`.
  pub async fn list_for_user(
    &self,
    user_id: &str,
  ) -> Result<Vec<Subscription>> {
    self
      .store
      .subscriptions_for_user(user_id)
      .await
      .map_err(|e| Error::Store(Box::new(e)))
  }

  /// Remove the subscription `id` if `user_id` owns it.
  ///
  /// A missing id and an id owned by someone else are indistinguishable to
  /// the caller; both report [`Error::SubscriptionNotFound`].
  pub async fn unsubscribe(&self, id: Uuid, user_id: &str) -> Result<()> {
    let removed = self
      .store
      .remove_subscription(id, user_id)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;

    if removed {
      Ok(())
    } else {
      Err(Error::SubscriptionNotFound(id))
    }
  }
}
