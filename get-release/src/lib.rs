//! # get-release
//!
//! Resolve the download URL of a GitHub release asset for a given platform,
//! architecture and optional version constraint.
//!
//! ## Overview
//!
//! Asset file names are classified by the `<os>_<arch>` pair they embed
//! (`tool_linux_amd64.tar.gz`), releases are ordered newest first, and a
//! constraint such as `^1.2` picks the highest satisfying release. All GitHub
//! requests made through one client are serialized behind a single-slot gate
//! so a shared token is never hit by more than one request at a time.
//!
//! ## Usage
//!
//! ```no_run
//! use get_release::{config::Config, gate::deadline_token, resolver::ReleaseResolver};
//! use std::time::Duration;
//!
//! # async fn run() -> get_release::error::Result<()> {
//! let resolver = ReleaseResolver::from_config(&Config::default())?;
//! let cancel = deadline_token(Duration::from_secs(5));
//! if let Some(url) = resolver
//!     .resolve_matching("cli", "cli", "linux", "amd64", "^2", &cancel)
//!     .await?
//! {
//!     println!("{url}");
//! }
//! # Ok(())
//! # }
//! ```

/// Platform/architecture detection from asset file names
pub mod classify;

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Configuration file handling
pub mod config;

/// Error types and error handling utilities
pub mod error;

/// Single-slot, cancellable admission gate for upstream calls
pub mod gate;

/// GitHub API client for releases, tags and rate limits
pub mod github;

/// Releases, assets and ordered release history
pub mod release;

/// Resolution facade combining the GitHub client and release history
pub mod resolver;

/// Lenient version parsing and tag normalization
pub mod version;
