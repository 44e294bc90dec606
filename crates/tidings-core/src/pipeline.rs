//! DigestPipeline — orchestrates summarizer calls and catalog writes.
//!
//! Both the daily scheduler and the on-demand API endpoint drive the same
//! entry points. Batch runs isolate failures per category: a dead model
//! endpoint for one category never blocks the rest.

use std::{collections::HashMap, sync::Arc, time::Duration};

use crate::{
  catalog::DigestCatalog,
  category::Category,
  digest::{Digest, NewDigest},
  error::{Error, Result},
  store::NewsletterStore,
  summarizer::{Summarizer, SummaryRequest},
};

// ─── Prompt table ────────────────────────────────────────────────────────────

/// The production prompt template for `category`.
fn default_prompt(category: Category) -> &'static str {
  match category {
    Category::StockMarket => {
      "Generate a concise daily digest of the most important stock market \
       and financial news from the past 24 hours. Include: major market \
       movements, significant company news, economic indicators, and expert \
       insights. Format as bullet points with brief explanations."
    }
    Category::AiUpdates => {
      "Generate a concise daily digest of the latest AI and technology \
       developments from the past 24 hours. Include: breakthrough \
       announcements, new AI models, tech company news, research papers, \
       and industry trends. Format as bullet points with brief explanations."
    }
    Category::Geopolitics => {
      "Generate a concise daily digest of the most significant geopolitical \
       and global affairs news from the past 24 hours. Include: \
       international relations, diplomatic developments, policy changes, \
       and global conflicts. Format as bullet points with brief \
       explanations."
    }
    Category::Startups => {
      "Generate a concise daily digest of the most important startup and \
       business news from the past 24 hours. Include: funding rounds, new \
       unicorns, IPOs, innovative business strategies, and venture capital \
       trends. Format as bullet points with brief explanations."
    }
  }
}

/// Per-category prompt templates sent to the summarizer.
///
/// Ships with the production defaults; individual entries can be replaced
/// through configuration. Never user-suppliable at request time.
#[derive(Debug, Clone, Default)]
pub struct PromptTable {
  overrides: HashMap<Category, String>,
}

impl PromptTable {
  /// Replace the template for one category.
  pub fn set(&mut self, category: Category, prompt: String) {
    self.overrides.insert(category, prompt);
  }

  /// The template to send for `category`.
  pub fn prompt_for(&self, category: Category) -> &str {
    self
      .overrides
      .get(&category)
      .map(String::as_str)
      .unwrap_or_else(|| default_prompt(category))
  }
}

// ─── Outcome report ──────────────────────────────────────────────────────────

/// One category's result within a batch run.
#[derive(Debug)]
pub struct CategoryOutcome {
  pub category: Category,
  pub outcome:  Result<Digest>,
}

/// The per-category outcomes of one [`DigestPipeline::generate_all`] run.
#[derive(Debug)]
pub struct GenerationReport {
  pub outcomes: Vec<CategoryOutcome>,
}

impl GenerationReport {
  /// The successfully generated digests, in run order.
  pub fn succeeded(&self) -> impl Iterator<Item = &Digest> {
    self.outcomes.iter().filter_map(|o| o.outcome.as_ref().ok())
  }

  /// The failed categories with their errors, in run order.
  pub fn failed(&self) -> impl Iterator<Item = (Category, &Error)> {
    self
      .outcomes
      .iter()
      .filter_map(|o| o.outcome.as_ref().err().map(|e| (o.category, e)))
  }
}

// ─── Pipeline ────────────────────────────────────────────────────────────────

/// Generates digests through a [`Summarizer`] and records them in the
/// catalog.
pub struct DigestPipeline<S, G> {
  catalog:    Arc<DigestCatalog<S>>,
  summarizer: Arc<G>,
  prompts:    PromptTable,
  /// Upper bound on any single summarizer call.
  timeout:    Duration,
}

impl<S: NewsletterStore, G: Summarizer> DigestPipeline<S, G> {
  pub fn new(
    catalog: Arc<DigestCatalog<S>>,
    summarizer: Arc<G>,
    prompts: PromptTable,
    timeout: Duration,
  ) -> Self {
    Self { catalog, summarizer, prompts, timeout }
  }

  /// Generate and persist one category's digest.
  ///
  /// A summarizer failure or timeout resolves as [`Error::Generation`]
  /// with nothing persisted.
  pub async fn generate_one(&self, category: Category) -> Result<Digest> {
    let request = SummaryRequest {
      category,
      prompt: self.prompts.prompt_for(category).to_owned(),
    };

    let call = self.summarizer.summarize(request);
    let output = match tokio::time::timeout(self.timeout, call).await {
      Ok(Ok(output)) => output,
      Ok(Err(e)) => return Err(Error::Generation(Box::new(e))),
      Err(_) => {
        return Err(Error::Generation(
          format!(
            "summarizer call timed out after {}s",
            self.timeout.as_secs()
          )
          .into(),
        ));
      }
    };

    self
      .catalog
      .append(NewDigest {
        category,
        content: output.text,
        citations: output.citations,
      })
      .await
  }

  /// Generate digests for every category in `categories`, independently.
  ///
  /// One category's failure never aborts the rest; the report carries each
  /// category's outcome for the caller to log or surface.
  pub async fn generate_all(
    &self,
    categories: &[Category],
  ) -> GenerationReport {
    let mut outcomes = Vec::with_capacity(categories.len());
    for &category in categories {
      let outcome = self.generate_one(category).await;
      outcomes.push(CategoryOutcome { category, outcome });
    }
    GenerationReport { outcomes }
  }
}
