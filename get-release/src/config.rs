use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{GetReleaseError, Result};

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub request: RequestConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GitHubConfig {
    /// Override for the API root, e.g. a GitHub Enterprise instance.
    pub api_url: Option<String>,

    pub token: Option<String>,

    #[serde(default = "default_page_size")]
    pub page_size: u8,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            token: None,
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RequestConfig {
    /// Per-call deadline in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
        }
    }
}

impl RequestConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

fn default_page_size() -> u8 {
    100
}

fn default_timeout() -> u64 {
    5
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_error = |message: String| GetReleaseError::Config {
            path: path.display().to_string(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        let config: Config = toml::from_str(&content).map_err(|e| config_error(e.to_string()))?;

        if config.github.page_size == 0 {
            return Err(config_error("github.page_size must be at least 1".to_string()));
        }
        Ok(config)
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("get-release.toml"))
            .unwrap_or_else(|| PathBuf::from("~/.config/get-release.toml"))
    }

    /// Merge configuration with command line arguments
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if args.token.is_some() {
            self.github.token = args.token.clone();
        }

        if args.api_url.is_some() {
            self.github.api_url = args.api_url.clone();
        }

        if let Some(timeout) = args.timeout {
            self.request.timeout = timeout;
        }
    }
}
