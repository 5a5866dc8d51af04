//! Runtime configuration: an optional TOML file layered under
//! `NYCSCHOOLS_*` environment variables.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::Context as _;
use nycschools_opendata::{DEFAULT_BASE_URL, OpenDataConfig};
use serde::Deserialize;

/// Settings read from `nycschools.toml` and the environment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  pub base_url:     String,
  pub store_path:   PathBuf,
  pub timeout_secs: u64,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      base_url:     DEFAULT_BASE_URL.to_string(),
      store_path:   PathBuf::from("nyc-schools.db"),
      timeout_secs: 30,
    }
  }
}

impl AppConfig {
  /// Load from `file` (which need not exist), then the environment.
  pub fn load(file: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("NYCSCHOOLS"))
      .build()
      .with_context(|| format!("failed to read config file {}", file.display()))?;

    settings
      .try_deserialize()
      .context("failed to deserialise AppConfig")
  }

  pub fn open_data(&self) -> OpenDataConfig {
    OpenDataConfig {
      base_url: self.base_url.clone(),
      timeout:  Duration::from_secs(self.timeout_secs),
    }
  }

  /// `store_path` with a leading `~` expanded to the home directory.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
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
