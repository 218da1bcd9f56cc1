use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const DEFAULT_API_BASE_URL: &str = "https://qiita.com/api/v2";
pub const DEFAULT_TREND_FEED_URL: &str = "https://qiita-api.netlify.com/.netlify/functions/trend";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_trend_feed_url")]
    pub trend_feed_url: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_trend_feed_url() -> String {
    DEFAULT_TREND_FEED_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            trend_feed_url: default_trend_feed_url(),
        }
    }
}

impl Config {
    /// Parse config from a TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load from the user config directory, falling back to defaults.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path())?;

        // Environment variables override config file values
        if let Ok(url) = std::env::var("QIITA_API_BASE_URL") {
            config.api_base_url = url;
        }
        if let Ok(url) = std::env::var("QIITA_TREND_FEED_URL") {
            config.trend_feed_url = url;
        }

        Ok(config)
    }

    /// A missing file is not an error; it yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("qiita-trends")
            .join("config.toml")
    }
}
