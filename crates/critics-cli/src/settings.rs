//! Runtime settings.
//!
//! Layered lowest to highest: built-in defaults, an optional TOML file,
//! `ELITE_CRITICS_*` environment variables, then command-line flags. Nested
//! keys use `__` in variable names, e.g. `ELITE_CRITICS_BROWSER__ENABLED`.

use std::path::{Path, PathBuf};

use critics_core::source::DEFAULT_SOURCE_ROOT;
use critics_fetch::{BrowserSettings, FetchSettings};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "ELITE_CRITICS";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// SQLite cache file.
  pub database_path: PathBuf,
  /// Directory for raw HTML snapshots.
  pub snapshot_dir:  PathBuf,
  pub source_root:   String,
  pub fetch:         FetchSettings,
  pub browser:       BrowserSettings,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      database_path: PathBuf::from("elite_critics.db"),
      snapshot_dir:  PathBuf::from("."),
      source_root:   DEFAULT_SOURCE_ROOT.to_string(),
      fetch:         FetchSettings::default(),
      browser:       BrowserSettings::default(),
    }
  }
}

/// Command-line values that take precedence over every other layer.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
  pub database_path: Option<PathBuf>,
  pub snapshot_dir:  Option<PathBuf>,
  pub no_browser:    bool,
}

impl Settings {
  /// Read the file at `path` if it exists, then the process environment.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    Self::layered(path, environment())
  }

  fn layered(path: &Path, env: config::Environment) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(env)
      .build()?
      .try_deserialize()
  }

  pub fn apply(&mut self, overrides: Overrides) {
    if let Some(path) = overrides.database_path {
      self.database_path = path;
    }
    if let Some(dir) = overrides.snapshot_dir {
      self.snapshot_dir = dir;
    }
    if overrides.no_browser {
      self.browser.enabled = false;
    }
  }

  /// Expand a leading `~/` in every path setting.
  pub fn expand_paths(mut self) -> Self {
    self.database_path = expand_tilde(&self.database_path);
    self.snapshot_dir = expand_tilde(&self.snapshot_dir);
    self.browser.chrome_executable = self.browser.chrome_executable.as_deref().map(expand_tilde);
    self
  }
}

fn environment() -> config::Environment {
  config::Environment::with_prefix(ENV_PREFIX)
    .prefix_separator("_")
    .separator("__")
}

/// Replace a leading `~` component with `$HOME`. `~user` forms are left
/// alone.
pub fn expand_tilde(path: &Path) -> PathBuf {
  under_home(path, std::env::var_os("HOME").map(PathBuf::from).as_deref())
}

fn under_home(path: &Path, home: Option<&Path>) -> PathBuf {
  match (path.strip_prefix("~"), home) {
    (Ok(rest), Some(home)) => home.join(rest),
    _ => path.to_path_buf(),
  }
}
