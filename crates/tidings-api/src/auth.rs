//! Bearer-token extractors and standalone verifier.
//!
//! Tokens are issued by an external identity provider; this module only
//! checks a presented token against the configured table and resolves the
//! caller's identity.

use std::collections::HashMap;

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use tidings_core::store::NewsletterStore;

use crate::{ApiState, error::ApiError};

/// The caller an accepted bearer token resolves to.
#[derive(Debug, Clone)]
pub struct Identity {
  /// Stable subject id from the identity provider; subscriptions are owned
  /// by this value.
  pub subject: String,
  pub name:    Option<String>,
  pub email:   Option<String>,
}

/// Tokens accepted as valid for this server instance, keyed by token.
#[derive(Clone, Default)]
pub struct AuthConfig {
  tokens: HashMap<String, Identity>,
}

impl AuthConfig {
  pub fn new(tokens: HashMap<String, Identity>) -> Self { Self { tokens } }

  /// The identity behind `token`, if the token is known.
  pub fn identity_for(&self, token: &str) -> Option<&Identity> {
    self.tokens.get(token)
  }
}

/// Resolve the `Authorization` header against the accepted-token table.
pub fn verify_bearer(
  headers: &HeaderMap,
  config: &AuthConfig,
) -> Result<Identity, ApiError> {
  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  let token = header_val
    .strip_prefix("Bearer ")
    .ok_or(ApiError::Unauthorized)?;

  config
    .identity_for(token)
    .cloned()
    .ok_or(ApiError::Unauthorized)
}

impl<S, G> FromRequestParts<ApiState<S, G>> for Identity
where
  S: NewsletterStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
  G: Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &ApiState<S, G>,
  ) -> Result<Self, Self::Rejection> {
    verify_bearer(&parts.headers, &state.auth)
  }
}

/// Optional-identity extractor for routes that allow anonymous callers.
///
/// An absent `Authorization` header means anonymous; a presented token must
/// still verify.
pub struct MaybeIdentity(pub Option<Identity>);

impl<S, G> FromRequestParts<ApiState<S, G>> for MaybeIdentity
where
  S: NewsletterStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
  G: Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &ApiState<S, G>,
  ) -> Result<Self, Self::Rejection> {
    if !parts
      .headers
      .contains_key(axum::http::header::AUTHORIZATION)
    {
      return Ok(MaybeIdentity(None));
    }
    verify_bearer(&parts.headers, &state.auth).map(|id| MaybeIdentity(Some(id)))
  }
}
