//! Dossier server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the dashboard plus JSON API over
//! HTTP. A few subcommands cover quick one-off work from the terminal
//! without going through the server.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use dossier_api::{AppState, ServerConfig, app_router};
use dossier_core::{
  search,
  store::CaseStore as _,
  subject::{NewSubject, SubjectFilter},
};
use dossier_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Dossier research-notes server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Run the web dashboard and JSON API (the default).
  Serve {
    /// Override the configured port.
    #[arg(short, long)]
    port: Option<u16>,
  },
  /// Print search URLs for a name without touching the database.
  Search {
    name: String,
    /// Localized spelling; adds the extra search category.
    #[arg(long)]
    name_fa: Option<String>,
  },
  /// Add a subject by English name.
  Add { name: String },
  /// List all subjects.
  List,
  /// Show subject statistics.
  Stats,
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

  // Load configuration; all fields default, so a missing file is fine.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("DOSSIER"))
    .build()
    .context("failed to read config file")?;
  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  match cli.command.unwrap_or(Command::Serve { port: None }) {
    Command::Serve { port } => serve(server_cfg, port).await,
    Command::Search { name, name_fa } => {
      print_search_urls(&name, name_fa.as_deref());
      Ok(())
    }
    Command::Add { name } => {
      let store = open_store(&server_cfg).await?;
      let input = NewSubject::new(name, None, None, None, None)?;
      let subject = store.add_subject(input).await?;
      println!("Added subject {} (id {})", subject.name_en, subject.id);
      Ok(())
    }
    Command::List => {
      let store = open_store(&server_cfg).await?;
      let subjects = store.list_subjects(SubjectFilter::default()).await?;
      println!("Subjects ({} total)", subjects.len());
      for s in subjects {
        println!("  [{}] {} - {} ({})", s.id, s.name_en, s.status, s.risk_level);
      }
      Ok(())
    }
    Command::Stats => {
      let store = open_store(&server_cfg).await?;
      let stats = store.subject_statistics().await?;
      println!("Total: {}", stats.total);
      println!("By status:");
      for (status, count) in &stats.by_status {
        println!("  {status}: {count}");
      }
      println!("By risk level:");
      for (risk, count) in &stats.by_risk {
        println!("  {risk}: {count}");
      }
      Ok(())
    }
  }
}

async fn serve(config: ServerConfig, port_override: Option<u16>) -> anyhow::Result<()> {
  let store = open_store(&config).await?;
  let app = app_router(AppState { store: Arc::new(store) });

  let port = port_override.unwrap_or(config.port);
  let address = format!("{}:{port}", config.host);

  tracing::info!("Dashboard on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Open the configured SQLite store, creating parent directories on first run.
async fn open_store(config: &ServerConfig) -> anyhow::Result<SqliteStore> {
  let db_path = expand_tilde(&config.db_path);
  if let Some(parent) = db_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }
  SqliteStore::open(&db_path)
    .await
    .with_context(|| format!("failed to open store at {}", db_path.display()))
}

fn print_search_urls(name: &str, name_fa: Option<&str>) {
  let urls = search::generate(name, name_fa);
  println!("Search URLs for: {name}");
  let categories = [
    ("linkedin", &urls.linkedin),
    ("sanctions", &urls.sanctions),
    ("corporate", &urls.corporate),
    ("social_media", &urls.social_media),
    ("web_search", &urls.web_search),
  ];
  for (category, links) in categories {
    println!("\n{category}");
    for (label, url) in links {
      println!("  {label}: {url}");
    }
  }
  if let Some(links) = &urls.persian {
    println!("\npersian");
    for (label, url) in links {
      println!("  {label}: {url}");
    }
  }
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
