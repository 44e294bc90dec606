//! Handlers for subscription endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST`   | `/subscribe` | Bearer token optional; anonymous allowed |
//! | `GET`    | `/subscriptions` | Bearer token required |
//! | `DELETE` | `/subscribe/:id` | Bearer token required; owner only |

use axum::{
  Json,
  extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tidings_core::{
  store::NewsletterStore,
  subscription::{NewSubscription, Subscription},
};
use uuid::Uuid;

use crate::{
  ApiState,
  auth::{Identity, MaybeIdentity},
  error::ApiError,
};

// ─── Subscribe ────────────────────────────────────────────────────────────────

/// All fields are required; they are optional here only so that a missing
/// field reports as a 400 rather than a deserialisation rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeBody {
  #[serde(default)]
  pub category:      Option<String>,
  #[serde(default)]
  pub email:         Option<String>,
  #[serde(default)]
  pub delivery_time: Option<String>,
}

/// `POST /subscribe` — body:
/// `{"category":"ai-updates","email":"a@x.com","deliveryTime":"08:00"}`
pub async fn subscribe<S, G>(
  State(state): State<ApiState<S, G>>,
  MaybeIdentity(identity): MaybeIdentity,
  Json(body): Json<SubscribeBody>,
) -> Result<Json<Value>, ApiError>
where
  S: NewsletterStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let (Some(category), Some(email), Some(delivery_time)) =
    (body.category, body.email, body.delivery_time)
  else {
    return Err(ApiError::BadRequest("Missing required fields".to_string()));
  };
  let category = category.parse()?;

  let subscription = state
    .registry
    .subscribe(NewSubscription {
      category,
      email,
      delivery_time,
      user_id: identity.map(|id| id.subject),
    })
    .await?;

  Ok(Json(json!({
    "message":      "Successfully subscribed",
    "subscription": subscription,
  })))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /subscriptions` — the caller's own subscriptions only.
pub async fn list<S, G>(
  State(state): State<ApiState<S, G>>,
  identity: Identity,
) -> Result<Json<Vec<Subscription>>, ApiError>
where
  S: NewsletterStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let subscriptions =
    state.registry.list_for_user(&identity.subject).await?;
  Ok(Json(subscriptions))
}

// ─── Unsubscribe ──────────────────────────────────────────────────────────────

/// `DELETE /subscribe/:id`
///
/// 404 covers both an unknown id and an id owned by someone else; the
/// response does not reveal which.
pub async fn unsubscribe<S, G>(
  State(state): State<ApiState<S, G>>,
  identity: Identity,
  Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError>
where
  S: NewsletterStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  state.registry.unsubscribe(id, &identity.subject).await?;
  Ok(Json(json!({ "message": "Successfully unsubscribed" })))
}
