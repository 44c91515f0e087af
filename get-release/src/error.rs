use thiserror::Error;

#[derive(Error, Debug)]
pub enum GetReleaseError {
    #[error("GitHub API error: {0}")]
    Upstream(#[from] octocrab::Error),

    #[error("Repository or release not found: {owner}/{repo}")]
    NotFound { owner: String, repo: String },

    #[error("Invalid version constraint '{input}': {reason}")]
    InvalidConstraint { input: String, reason: String },

    #[error("Request cancelled: deadline exceeded")]
    Cancelled,

    #[error("Invalid repository format '{input}'. Expected format: owner/repo (e.g., cli/cli)")]
    InvalidRepo { input: String },

    #[error("Configuration error at {path}: {message}")]
    Config { path: String, message: String },
}

impl GetReleaseError {
    /// Map an octocrab failure, turning HTTP 404 into [`GetReleaseError::NotFound`].
    pub(crate) fn from_upstream(err: octocrab::Error, owner: &str, repo: &str) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404 => {
                GetReleaseError::NotFound {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                }
            }
            _ => GetReleaseError::Upstream(err),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, GetReleaseError::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, GetReleaseError>;
