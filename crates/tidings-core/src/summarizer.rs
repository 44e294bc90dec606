//! The `Summarizer` trait — the seam to the external text-generation
//! service.
//!
//! Implemented over a real HTTP client in `tidings-server`; tests substitute
//! canned or failing implementations.

use std::future::Future;

use crate::category::Category;

/// One summarization request.
#[derive(Debug, Clone)]
pub struct SummaryRequest {
  pub category: Category,
  /// The category's full prompt text, resolved from the prompt table.
  pub prompt:   String,
}

/// The service's reply: generated prose plus the sources it cites.
#[derive(Debug, Clone)]
pub struct SummaryOutput {
  pub text:      String,
  pub citations: Vec<String>,
}

/// Abstraction over the external summarization service.
///
/// One call maps to one request against the service. Timeouts live in the
/// caller; implementations do not retry internally.
pub trait Summarizer: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Generate digest prose for one category.
  fn summarize(
    &self,
    request: SummaryRequest,
  ) -> impl Future<Output = Result<SummaryOutput, Self::Error>> + Send + '_;
}
