//! Handlers for digest endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/digest/generate` | Body: `{"category":"ai-updates"}` |
//! | `GET`  | `/digest/:category` | Latest digest; 404 if none yet |
//! | `GET`  | `/digests/:category` | Optional `?limit=N`, default 10 |

use axum::{
  Json,
  extract::{Path, Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tidings_core::{
  bullets::to_bullets,
  category::Category,
  digest::Digest,
  store::NewsletterStore,
  summarizer::Summarizer,
};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

// ─── Response shape ───────────────────────────────────────────────────────────

/// A digest as served to clients: the stored record plus display bullets
/// computed from `content`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DigestResponse {
  pub id:         Uuid,
  pub category:   Category,
  pub content:    String,
  pub citations:  Vec<String>,
  pub bullets:    Vec<String>,
  pub created_at: DateTime<Utc>,
}

impl From<Digest> for DigestResponse {
  fn from(digest: Digest) -> Self {
    let bullets = to_bullets(&digest.content);
    Self {
      id: digest.id,
      category: digest.category,
      content: digest.content,
      citations: digest.citations,
      bullets,
      created_at: digest.created_at,
    }
  }
}

// ─── Generate ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateBody {
  #[serde(default)]
  pub category: Option<String>,
}

/// `POST /digest/generate` — body: `{"category":"ai-updates"}`
pub async fn generate<S, G>(
  State(state): State<ApiState<S, G>>,
  Json(body): Json<GenerateBody>,
) -> Result<Json<Value>, ApiError>
where
  S: NewsletterStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  G: Summarizer,
{
  let category = body
    .category
    .ok_or_else(|| ApiError::BadRequest("Category is required".to_string()))?;
  let category: Category = category.parse()?;

  let digest = state.pipeline.generate_one(category).await?;

  Ok(Json(json!({
    "message": "Digest generated successfully",
    "digest":  DigestResponse::from(digest),
  })))
}

// ─── Latest ───────────────────────────────────────────────────────────────────

/// `GET /digest/:category`
pub async fn latest<S, G>(
  State(state): State<ApiState<S, G>>,
  Path(category): Path<Category>,
) -> Result<Json<DigestResponse>, ApiError>
where
  S: NewsletterStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let digest = state.catalog.latest(category).await?;
  Ok(Json(digest.into()))
}

// ─── Recent ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RecentParams {
  pub limit: Option<usize>,
}

/// `GET /digests/:category[?limit=N]`
pub async fn recent<S, G>(
  State(state): State<ApiState<S, G>>,
  Path(category): Path<Category>,
  Query(params): Query<RecentParams>,
) -> Result<Json<Vec<DigestResponse>>, ApiError>
where
  S: NewsletterStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let digests = state.catalog.recent(category, params.limit).await?;
  Ok(Json(digests.into_iter().map(DigestResponse::from).collect()))
}
