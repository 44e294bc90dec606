//! Perplexity-backed [`Summarizer`] implementation.
//!
//! One [`Summarizer::summarize`] call maps to one `POST
//! /chat/completions` request. Retries and the overall deadline live in
//! the pipeline, not here.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tidings_core::summarizer::{Summarizer, SummaryOutput, SummaryRequest};

/// System message sent with every summarization request.
const SYSTEM_PROMPT: &str =
  "You are a professional news curator that creates concise, accurate \
   daily digests. Provide factual, well-sourced summaries with key \
   highlights.";

#[derive(Debug, Error)]
pub enum PerplexityError {
  #[error("request failed: {0}")]
  Http(#[from] reqwest::Error),
  #[error("api returned status {status}: {body}")]
  Api { status: StatusCode, body: String },
  #[error("response contained no choices")]
  EmptyChoices,
}

/// Connection settings for the Perplexity chat-completions API.
#[derive(Debug, Clone)]
pub struct PerplexityConfig {
  pub api_key:  String,
  pub base_url: String,
  pub model:    String,
  /// Request timeout on the underlying HTTP client.
  pub timeout:  Duration,
}

/// HTTP client for the Perplexity chat-completions API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct PerplexityClient {
  client: Client,
  config: PerplexityConfig,
}

impl PerplexityClient {
  pub fn new(config: PerplexityConfig) -> Result<Self, PerplexityError> {
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self { client, config })
  }

  fn url(&self) -> String {
    format!(
      "{}/chat/completions",
      self.config.base_url.trim_end_matches('/')
    )
  }
}

impl Summarizer for PerplexityClient {
  type Error = PerplexityError;

  async fn summarize(
    &self,
    request: SummaryRequest,
  ) -> Result<SummaryOutput, Self::Error> {
    let payload = ChatRequest {
      model:       self.config.model.clone(),
      messages:    vec![
        ChatMessage {
          role:    "system".to_string(),
          content: SYSTEM_PROMPT.to_string(),
        },
        ChatMessage { role: "user".to_string(), content: request.prompt },
      ],
      temperature: 0.3,
      max_tokens:  1000,
    };

    let response = self
      .client
      .post(self.url())
      .bearer_auth(&self.config.api_key)
      .json(&payload)
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await?;
      return Err(PerplexityError::Api { status, body });
    }

    let decoded: ChatResponse = response.json().await?;
    let text = decoded
      .choices
      .into_iter()
      .next()
      .map(|choice| choice.message.content)
      .ok_or(PerplexityError::EmptyChoices)?;

    Ok(SummaryOutput { text, citations: decoded.citations })
  }
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest {
  model:       String,
  messages:    Vec<ChatMessage>,
  temperature: f32,
  max_tokens:  u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
  role:    String,
  content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
  choices:   Vec<Choice>,
  /// Source URLs; some responses omit the key entirely.
  #[serde(default)]
  citations: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Choice {
  message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
  content: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn request_serialises_wire_field_names() {
    let payload = ChatRequest {
      model:       "sonar".to_string(),
      messages:    vec![ChatMessage {
        role:    "system".to_string(),
        content: "curate".to_string(),
      }],
      temperature: 0.3,
      max_tokens:  1000,
    };

    let value = serde_json::to_value(&payload).unwrap();
    assert_eq!(value["model"], "sonar");
    assert_eq!(value["max_tokens"], 1000);
    assert_eq!(value["messages"][0]["role"], "system");
    assert_eq!(value["messages"][0]["content"], "curate");
  }

  #[test]
  fn response_without_citations_decodes_to_empty_list() {
    let raw = r#"{"choices":[{"message":{"content":"- item one"}}]}"#;
    let decoded: ChatResponse = serde_json::from_str(raw).unwrap();

    assert_eq!(decoded.choices[0].message.content, "- item one");
    assert!(decoded.citations.is_empty());
  }

  #[test]
  fn response_keeps_citation_order() {
    let raw = r#"{
      "id": "resp-1",
      "choices": [{"message": {"role": "assistant", "content": "text"}}],
      "citations": ["https://a.example", "https://b.example"]
    }"#;
    let decoded: ChatResponse = serde_json::from_str(raw).unwrap();

    assert_eq!(decoded.citations, vec![
      "https://a.example",
      "https://b.example"
    ]);
  }
}
