//! Runtime configuration, deserialised from `config.toml` and
//! `TIDINGS_`-prefixed environment variables.

use std::{collections::HashMap, path::PathBuf};

use serde::Deserialize;

/// Runtime server configuration.
///
/// Every field has a default, so a missing config file still yields a
/// working development server. The Perplexity key defaults to empty and
/// is warned about at startup; generation fails without it.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                    String,
  #[serde(default = "default_port")]
  pub port:                    u16,
  #[serde(default = "default_store_path")]
  pub store_path:              PathBuf,

  /// Wall-clock time of day the daily generation runs, as `HH:MM`.
  #[serde(default = "default_generation_time")]
  pub generation_time:         String,
  /// IANA zone name the generation time is interpreted in.
  #[serde(default = "default_timezone")]
  pub timezone:                String,
  /// Newest digests kept per category after each append. `0` keeps all.
  #[serde(default = "default_digest_retention")]
  pub digest_retention:        usize,
  /// Upper bound on a single summarizer call, in seconds.
  #[serde(default = "default_generation_timeout_secs")]
  pub generation_timeout_secs: u64,

  #[serde(default)]
  pub perplexity_api_key:      String,
  #[serde(default = "default_perplexity_base_url")]
  pub perplexity_base_url:     String,
  #[serde(default = "default_perplexity_model")]
  pub perplexity_model:        String,

  /// Accepted bearer tokens and the identities they resolve to.
  #[serde(default)]
  pub auth_tokens:             Vec<TokenEntry>,
  /// Prompt template overrides, keyed by category wire name.
  #[serde(default)]
  pub prompts:                 HashMap<String, String>,
}

/// One `[[auth_tokens]]` entry in `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenEntry {
  pub token:   String,
  pub subject: String,
  #[serde(default)]
  pub name:    Option<String>,
  #[serde(default)]
  pub email:   Option<String>,
}

fn default_host() -> String {
  "127.0.0.1".to_string()
}

fn default_port() -> u16 {
  3000
}

fn default_store_path() -> PathBuf {
  PathBuf::from("tidings.db")
}

fn default_generation_time() -> String {
  "08:00".to_string()
}

fn default_timezone() -> String {
  "Asia/Kolkata".to_string()
}

fn default_digest_retention() -> usize {
  100
}

fn default_generation_timeout_secs() -> u64 {
  60
}

fn default_perplexity_base_url() -> String {
  "https://api.perplexity.ai".to_string()
}

fn default_perplexity_model() -> String {
  "sonar".to_string()
}
