//! Configuration loading for brave-search-mcp
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. TOML file at `BRAVE_SEARCH_CONFIG_PATH` or `~/.config/brave-search-mcp.toml`
//! 3. Environment variables `BRAVE_SEARCH_API_URL` / `BRAVE_API_KEY` (highest priority)
//!
//! Port, log level, and the stateless response mode are CLI flags, not config
//! file entries; see `main.rs`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Brave Search API configuration
    #[serde(default)]
    pub brave: BraveConfig,
}

/// Brave Search API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BraveConfig {
    /// Base URL of the Brave Search API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Server-wide default subscription token. Per-connection `x-auth-token`
    /// headers take precedence at resolution time.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Outbound request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// User-Agent sent on outbound requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

// Default value functions
fn default_base_url() -> String {
    "https://api.search.brave.com/res/v1".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("brave-search-mcp/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for BraveConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults, then apply environment
    /// overrides.
    pub fn load() -> Result<Self> {
        let mut config = match Self::find_config_path() {
            Some(path) if path.exists() => {
                tracing::info!("Loading config from: {}", path.display());
                Self::load_from(&path)?
            }
            _ => {
                tracing::info!("Config file not found, using defaults");
                Self::default()
            }
        };

        // Environment variables win over file contents
        if let Ok(url) = std::env::var("BRAVE_SEARCH_API_URL") {
            config.brave.base_url = url;
        }
        if let Ok(key) = std::env::var("BRAVE_API_KEY") {
            config.brave.api_key = Some(key);
        }

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Find the configuration file path
    fn find_config_path() -> Option<PathBuf> {
        // 1. Check environment variable
        if let Ok(path) = std::env::var("BRAVE_SEARCH_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        // 2. Check ~/.config/brave-search-mcp.toml
        if let Ok(home) = std::env::var("HOME") {
            let path = PathBuf::from(home)
                .join(".config")
                .join("brave-search-mcp.toml");
            return Some(path);
        }

        None
    }
}
