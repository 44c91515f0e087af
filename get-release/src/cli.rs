use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{GetReleaseError, Result};

#[derive(Parser, Debug, Clone)]
#[clap(
    name = "get-release",
    version,
    about = "Resolve download URLs for GitHub release assets",
    long_about = None
)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Command,

    /// Configuration file path (defaults to the user config directory)
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// GitHub token used for API requests
    #[clap(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub API root (e.g. for GitHub Enterprise)
    #[clap(long)]
    pub api_url: Option<String>,

    /// Deadline for the whole lookup, in seconds
    #[clap(long)]
    pub timeout: Option<u64>,

    /// Enable verbose output
    #[clap(long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Asset URL from the latest release
    Latest {
        /// Repository, as owner/repo
        #[clap(value_name = "OWNER/REPO")]
        repo: String,
        /// Target operating system (e.g. linux, darwin, windows)
        os: String,
        /// Target architecture (e.g. amd64, arm64)
        arch: String,
    },

    /// Asset URL from the highest release matching a version constraint
    Matching {
        #[clap(value_name = "OWNER/REPO")]
        repo: String,
        os: String,
        arch: String,
        /// Version constraint (e.g. 1.2.3, ^1.2, ">=1 <2", "^1 || ^2")
        constraint: String,
    },

    /// Versions derived from a repository's tags, as a JSON array
    Versions {
        #[clap(value_name = "OWNER/REPO", default_value = "golang/go")]
        repo: String,
        /// Tag prefix to list and strip
        #[clap(long, default_value = "go")]
        prefix: String,
    },

    /// Rate-limit status of the token, as JSON
    Usage,
}

impl Args {
    /// Configuration file to read, falling back to the per-user default.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }
}

/// Split `owner/repo` into its two parts.
pub fn parse_repo(input: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = input.split('/').collect();
    if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
        return Err(GetReleaseError::InvalidRepo {
            input: input.to_string(),
        });
    }

    Ok((parts[0].to_string(), parts[1].to_string()))
}
