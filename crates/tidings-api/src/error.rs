//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
///
/// The 500-class variants log their source through `tracing` and answer
/// with a generic message; backend detail never reaches the client.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("unauthorized")]
  Unauthorized,

  #[error("not found: {0}")]
  NotFound(String),

  #[error("generation error: {0}")]
  Generation(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<tidings_core::Error> for ApiError {
  fn from(e: tidings_core::Error) -> Self {
    use tidings_core::Error as CoreError;
    match e {
      CoreError::InvalidInput(m) => ApiError::BadRequest(m),
      CoreError::UnknownCategory(_) => {
        ApiError::BadRequest("Invalid category".to_string())
      }
      CoreError::SubscriptionNotFound(_) => {
        ApiError::NotFound("Subscription not found".to_string())
      }
      CoreError::NoDigest(_) => {
        ApiError::NotFound("No digest found".to_string())
      }
      CoreError::Generation(e) => ApiError::Generation(e),
      CoreError::Store(e) => ApiError::Store(e),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Unauthorized => {
        (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
      }
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Generation(e) => {
        tracing::error!(error = %e, "digest generation failed");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          "Digest generation failed".to_string(),
        )
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store operation failed");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          "Internal server error".to_string(),
        )
      }
    };

    let mut response =
      (status, Json(json!({ "error": message }))).into_response();
    if status == StatusCode::UNAUTHORIZED {
      response.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Bearer"),
      );
    }
    response
  }
}
