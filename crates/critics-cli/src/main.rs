//! elite-critics binary.
//!
//! Looks a movie up by title, fetching and caching it on first use, and
//! prints its scores and stored critic reviews. Logs go to stderr.

use std::{
  io::{self, Write},
  path::PathBuf,
};

use anyhow::Context as _;
use clap::Parser;
use critics_cli::{Outcome, Pipeline, Settings, render, settings::Overrides};
use critics_core::source::SourceUrls;
use critics_fetch::{SnapshotDir, WebSource};
use critics_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Movie scores and critic reviews, cached locally")]
struct Cli {
  /// Movie title, e.g. "Twilight" or "Zootopia 2". Prompted for when omitted.
  title: Option<String>,

  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "elite-critics.toml")]
  config: PathBuf,

  /// SQLite cache file.
  #[arg(long)]
  db: Option<PathBuf>,

  /// Directory for raw HTML snapshots.
  #[arg(long)]
  snapshot_dir: Option<PathBuf>,

  /// Skip the headless browser and use direct requests only.
  #[arg(long)]
  no_browser: bool,

  /// Log at debug level unless RUST_LOG says otherwise.
  #[arg(short, long)]
  verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  let level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy(),
    )
    .init();

  let mut settings = Settings::load(&cli.config)
    .with_context(|| format!("failed to read configuration from {:?}", cli.config))?;
  settings.apply(Overrides {
    database_path: cli.db,
    snapshot_dir:  cli.snapshot_dir,
    no_browser:    cli.no_browser,
  });
  let settings = settings.expand_paths();

  let title = match cli.title {
    Some(title) => title,
    None => prompt_title()?,
  };

  let urls = SourceUrls::new(&settings.source_root).context("invalid source_root")?;

  let store = SqliteStore::open(&settings.database_path)
    .await
    .with_context(|| format!("failed to open cache at {:?}", settings.database_path))?;

  let source = WebSource::new(
    urls.clone(),
    &settings.fetch,
    &settings.browser,
    SnapshotDir::new(&settings.snapshot_dir),
  )
  .context("failed to set up page fetching")?;

  match Pipeline::new(store, source, urls).run(&title).await {
    Outcome::Completed(report) => {
      println!("{}", render::summary(&report));
      Ok(())
    }
    Outcome::Aborted(reason) => Err(anyhow::Error::new(reason).context("analysis aborted")),
  }
}

/// Ask for a title on stdin. End of input reads as an empty title, which the
/// pipeline rejects.
fn prompt_title() -> anyhow::Result<String> {
  let mut stdout = io::stdout().lock();
  write!(stdout, "Movie title (e.g. Twilight or Zootopia 2): ")?;
  stdout.flush()?;

  let line = io::stdin()
    .lines()
    .next()
    .transpose()
    .context("failed to read title from stdin")?;
  Ok(line.unwrap_or_default())
}
