//! Configuration loading from TOML files.
//!
//! Lookup order:
//! 1. `$COGTEST_CONFIG` environment variable
//! 2. `~/.config/cogtest/config.toml`
//! 3. Built-in defaults (everything is optional)

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::TimeDelta;
use serde::Deserialize;

use cogtest_core::resolver::DEFAULT_PLACEHOLDER_ENDPOINT;
use cogtest_core::sources::{DEFAULT_ENCYCLOPEDIA_ENDPOINT, DEFAULT_STOCK_ENDPOINT};
use cogtest_core::{Difficulty, ResolverSettings, TestMode};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub images: ImagesConfig,
    pub session: SessionConfig,
}

/// Database storage settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database path. Default: platform-specific data dir.
    pub path: Option<String>,
}

/// Remote image sources and the resolved-image cache.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    /// Pexels key. Falls back to `$PEXELS_API_KEY`; without one the stock
    /// photo tier is skipped.
    pub pexels_api_key: Option<String>,
    pub timeout_secs: u64,
    pub stock_ttl_hours: i64,
    pub encyclopedia_ttl_hours: i64,
    pub encyclopedia_endpoint: String,
    pub stock_endpoint: String,
    pub placeholder_endpoint: String,
    /// Photos fetched when asking for a different image of the same item.
    pub reload_batch: usize,
}

/// Defaults for `cogtest play` and `cogtest select`. Unset fields follow the
/// recommendation for the current progress.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub mode: Option<String>,
    pub count: Option<usize>,
    pub difficulty: Option<String>,
}

// --- Defaults ---

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            pexels_api_key: None,
            timeout_secs: 10,
            stock_ttl_hours: 24,
            encyclopedia_ttl_hours: 48,
            encyclopedia_endpoint: DEFAULT_ENCYCLOPEDIA_ENDPOINT.into(),
            stock_endpoint: DEFAULT_STOCK_ENDPOINT.into(),
            placeholder_endpoint: DEFAULT_PLACEHOLDER_ENDPOINT.into(),
            reload_batch: 15,
        }
    }
}

impl ImagesConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build resolver settings, taking the key from `env_key` when the file
    /// has none.
    pub fn resolver_settings(&self, env_key: Option<String>) -> Result<ResolverSettings> {
        let stock_api_key = self
            .pexels_api_key
            .clone()
            .or(env_key)
            .filter(|k| !k.trim().is_empty());
        Ok(ResolverSettings {
            encyclopedia_endpoint: self.encyclopedia_endpoint.clone(),
            stock_endpoint: self.stock_endpoint.clone(),
            stock_api_key,
            placeholder_endpoint: self.placeholder_endpoint.clone(),
            stock_ttl: ttl_hours("stock_ttl_hours", self.stock_ttl_hours)?,
            encyclopedia_ttl: ttl_hours("encyclopedia_ttl_hours", self.encyclopedia_ttl_hours)?,
            reload_batch: self.reload_batch,
        })
    }
}

fn ttl_hours(field: &str, hours: i64) -> Result<TimeDelta> {
    if hours < 0 {
        bail!("[images] {field} must not be negative, got {hours}");
    }
    TimeDelta::try_hours(hours)
        .with_context(|| format!("[images] {field} is out of range: {hours}"))
}

impl SessionConfig {
    pub fn mode(&self) -> Result<Option<TestMode>> {
        self.mode
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(|e| anyhow::anyhow!("[session] mode: {e}"))
    }

    pub fn difficulty(&self) -> Result<Option<Difficulty>> {
        self.difficulty
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(|e| anyhow::anyhow!("[session] difficulty: {e}"))
    }
}

/// Load config from disk. Returns defaults if no config file exists.
pub fn load_config() -> Result<Config> {
    let path = config_path();

    if let Some(p) = &path {
        if p.exists() {
            let content =
                std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?;
            let config: Config =
                toml::from_str(&content).with_context(|| format!("parsing {}", p.display()))?;
            return Ok(config);
        }
    }

    Ok(Config::default())
}

/// Resolve the config file path.
fn config_path() -> Option<PathBuf> {
    if let Ok(p) = std::env::var("COGTEST_CONFIG") {
        return Some(PathBuf::from(p));
    }

    dirs_home().map(|home| home.join(".config").join("cogtest").join("config.toml"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Show the active config path (for `cogtest config`).
pub fn show_config_path() -> String {
    match config_path() {
        Some(p) if p.exists() => format!("{} (loaded)", p.display()),
        Some(p) => format!("{} (not found, using defaults)", p.display()),
        None => "no config path resolved (using defaults)".into(),
    }
}
