//! Application configuration for ScrapeFlow.
//!
//! User config lives at `~/.scrapeflow/scrapeflow.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrapeFlowError};
use crate::types::{AiProvider, CrawlOptions};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "scrapeflow.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".scrapeflow";

// ---------------------------------------------------------------------------
// Config structs (matching scrapeflow.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default crawl settings applied to new batches.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Submission sink settings.
    #[serde(default)]
    pub submission: SubmissionConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default link-follow depth.
    #[serde(default = "default_depth")]
    pub depth: u8,

    /// Default page cap per URL.
    #[serde(default = "default_max_pages")]
    pub max_pages: u8,

    /// Whether results are auto-saved to the catalog by default.
    #[serde(default = "default_true")]
    pub auto_save: bool,

    /// Default AI analysis provider.
    #[serde(default)]
    pub ai_provider: AiProvider,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            depth: default_depth(),
            max_pages: default_max_pages(),
            auto_save: true,
            ai_provider: AiProvider::Default,
        }
    }
}

fn default_depth() -> u8 {
    2
}
fn default_max_pages() -> u8 {
    10
}
fn default_true() -> bool {
    true
}

/// `[submission]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// Endpoint the crawl sink accepts tasks at.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-task request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:8080/api/crawl".into()
}
fn default_timeout_secs() -> u64 {
    30
}

impl From<&AppConfig> for CrawlOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            depth: config.defaults.depth,
            max_pages: config.defaults.max_pages,
            auto_save: config.defaults.auto_save,
            ai_provider: config.defaults.ai_provider,
            ..Self::default()
        }
        .clamped()
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.scrapeflow/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ScrapeFlowError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.scrapeflow/scrapeflow.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ScrapeFlowError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| ScrapeFlowError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| ScrapeFlowError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| ScrapeFlowError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ScrapeFlowError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
