//! tidings server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, starts the daily digest schedule, and serves
//! the subscription and digest API over HTTP.

mod delivery;
mod perplexity;
mod scheduler;
mod settings;

use std::{
  collections::HashMap,
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use anyhow::Context as _;
use axum::Router;
use chrono::NaiveTime;
use chrono_tz::Tz;
use clap::Parser;
use tidings_api::{
  ApiState,
  auth::{AuthConfig, Identity},
};
use tidings_core::{
  catalog::DigestCatalog,
  category::Category,
  pipeline::{DigestPipeline, PromptTable},
  registry::SubscriptionRegistry,
};
use tidings_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use perplexity::{PerplexityClient, PerplexityConfig};
use scheduler::DigestScheduler;
use settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "Tidings digest server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let sources = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("TIDINGS"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = sources
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let generation_time =
    NaiveTime::parse_from_str(&server_cfg.generation_time, "%H:%M")
      .with_context(|| {
        format!("invalid generation_time {:?}", server_cfg.generation_time)
      })?;

  let timezone: Tz = server_cfg.timezone.parse().map_err(|e| {
    anyhow::anyhow!("invalid timezone {:?}: {e}", server_cfg.timezone)
  })?;

  if server_cfg.perplexity_api_key.is_empty() {
    tracing::warn!(
      "perplexity_api_key is not set; digest generation will fail"
    );
  }

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open SQLite store.
  let store = Arc::new(
    SqliteStore::open(&store_path)
      .await
      .with_context(|| format!("failed to open store at {store_path:?}"))?,
  );

  // Per-category prompt overrides.
  let mut prompts = PromptTable::default();
  for (name, template) in &server_cfg.prompts {
    let category: Category = name
      .parse()
      .with_context(|| format!("unknown prompt category {name:?}"))?;
    prompts.set(category, template.clone());
  }

  // Bearer tokens and the identities they resolve to.
  let mut tokens = HashMap::new();
  for entry in &server_cfg.auth_tokens {
    tokens.insert(entry.token.clone(), Identity {
      subject: entry.subject.clone(),
      name:    entry.name.clone(),
      email:   entry.email.clone(),
    });
  }

  let timeout = Duration::from_secs(server_cfg.generation_timeout_secs);

  let catalog = Arc::new(if server_cfg.digest_retention > 0 {
    DigestCatalog::with_retention(
      Arc::clone(&store),
      server_cfg.digest_retention,
    )
  } else {
    DigestCatalog::new(Arc::clone(&store))
  });

  let summarizer = Arc::new(
    PerplexityClient::new(PerplexityConfig {
      api_key:  server_cfg.perplexity_api_key.clone(),
      base_url: server_cfg.perplexity_base_url.clone(),
      model:    server_cfg.perplexity_model.clone(),
      timeout,
    })
    .context("failed to build HTTP client")?,
  );

  let pipeline = Arc::new(DigestPipeline::new(
    Arc::clone(&catalog),
    summarizer,
    prompts,
    timeout,
  ));

  // Start the daily generation schedule.
  let scheduler = Arc::new(DigestScheduler::new(
    Arc::clone(&pipeline),
    Arc::clone(&store),
    generation_time,
    timezone,
  ));
  scheduler.start();

  // Build application state.
  let state = ApiState {
    registry: Arc::new(SubscriptionRegistry::new(Arc::clone(&store))),
    catalog:  Arc::clone(&catalog),
    pipeline: Arc::clone(&pipeline),
    auth:     Arc::new(AuthConfig::new(tokens)),
  };

  let app = Router::new()
    .nest("/api", tidings_api::api_router(state))
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
