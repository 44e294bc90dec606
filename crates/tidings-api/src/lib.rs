//! JSON REST API for Tidings.
//!
//! Exposes an axum [`Router`] backed by any
//! [`NewsletterStore`](tidings_core::store::NewsletterStore) plus a
//! [`Summarizer`](tidings_core::summarizer::Summarizer). TLS and transport
//! concerns are the caller's responsibility; bearer-token verification
//! happens here.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", tidings_api::api_router(state))
//! ```

pub mod auth;
pub mod digests;
pub mod error;
pub mod health;
pub mod subscriptions;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use tidings_core::{
  catalog::DigestCatalog,
  pipeline::DigestPipeline,
  registry::SubscriptionRegistry,
  store::NewsletterStore,
  summarizer::Summarizer,
};

use auth::AuthConfig;

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all API handlers.
#[derive(Clone)]
pub struct ApiState<S: NewsletterStore, G> {
  pub registry: Arc<SubscriptionRegistry<S>>,
  pub catalog:  Arc<DigestCatalog<S>>,
  pub pipeline: Arc<DigestPipeline<S, G>>,
  pub auth:     Arc<AuthConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, G>(state: ApiState<S, G>) -> Router<()>
where
  S: NewsletterStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
  G: Summarizer + Clone + Send + Sync + 'static,
{
  Router::new()
    // Subscriptions
    .route("/subscribe", post(subscriptions::subscribe::<S, G>))
    .route("/subscribe/{id}", delete(subscriptions::unsubscribe::<S, G>))
    .route("/subscriptions", get(subscriptions::list::<S, G>))
    // Digests
    .route("/digest/generate", post(digests::generate::<S, G>))
    .route("/digest/{category}", get(digests::latest::<S, G>))
    .route("/digests/{category}", get(digests::recent::<S, G>))
    // Health
    .route("/health", get(health::handler))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
