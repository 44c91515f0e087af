use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::{GetReleaseError, Result};
use crate::github::{GitHubClient, RateLimit};
use crate::release::{Release, ReleaseHistory};
use crate::version::{normalize_tag, Constraint};

/// Parse a version constraint such as `1.0.0`, `^1.2`, `>=1 <2` or
/// `^1 || ^2`. See [`Constraint`] for the accepted dialect.
pub fn parse_constraint(input: &str) -> Result<Constraint> {
    Constraint::parse(input)
}

/// Answers "which asset should this platform download" for GitHub projects.
///
/// `Ok(None)` means the project exists but nothing matched; errors are
/// reserved for upstream failures, unknown projects, bad constraints and
/// cancellation. Nothing is cached: every call reads fresh data from GitHub.
pub struct ReleaseResolver {
    client: GitHubClient,
}

impl ReleaseResolver {
    pub fn new(client: GitHubClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(GitHubClient::new(&config.github)?))
    }

    pub fn client(&self) -> &GitHubClient {
        &self.client
    }

    /// Download URL for `platform`/`arch` in the project's latest release.
    pub async fn resolve_latest(
        &self,
        owner: &str,
        repo: &str,
        platform: &str,
        arch: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<String>> {
        let raw = self.client.latest_release(owner, repo, cancel).await?;
        let release = Release::from_raw(raw);
        let url = release.find_asset_url(platform, arch).map(str::to_string);

        log_outcome(owner, repo, &release.tag, platform, arch, url.as_deref());
        Ok(url)
    }

    /// Download URL for `platform`/`arch` in the highest release satisfying
    /// `constraint`. The constraint is validated before anything is fetched.
    pub async fn resolve_matching(
        &self,
        owner: &str,
        repo: &str,
        platform: &str,
        arch: &str,
        constraint: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<String>> {
        let constraint = parse_constraint(constraint)?;

        let raw = self.client.list_releases(owner, repo, cancel).await?;
        let history = ReleaseHistory::from_raw(raw);

        let Some(release) = history.find_satisfying(&constraint) else {
            tracing::info!(
                "No release of {}/{} satisfies '{}' ({} releases checked)",
                owner,
                repo,
                constraint,
                history.len()
            );
            return Ok(None);
        };

        let url = release.find_asset_url(platform, arch).map(str::to_string);
        log_outcome(owner, repo, &release.tag, platform, arch, url.as_deref());
        Ok(url)
    }

    /// Every tag starting with `tag_prefix`, rendered as a semantic version.
    ///
    /// Tags that cannot be normalized are skipped. Output follows the order
    /// GitHub listed the tags in.
    pub async fn list_normalized_versions(
        &self,
        tag_prefix: &str,
        owner: &str,
        repo: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>> {
        let tags = self.client.list_tags(owner, repo, tag_prefix, cancel).await?;
        let total = tags.len();

        let versions: Vec<String> = tags
            .iter()
            .filter_map(|tag| {
                let normalized = normalize_tag(tag, tag_prefix);
                if normalized.is_none() {
                    tracing::debug!("Skipping tag '{}': not a version", tag);
                }
                normalized
            })
            .collect();

        if versions.len() < total {
            tracing::debug!(
                "Skipped {} of {} tags for {}/{}",
                total - versions.len(),
                total,
                owner,
                repo
            );
        }
        Ok(versions)
    }

    /// Released Go toolchain versions, from the `go*` tags of golang/go.
    pub async fn go_versions(&self, cancel: &CancellationToken) -> Result<Vec<String>> {
        self.list_normalized_versions("go", "golang", "go", cancel).await
    }

    /// Rate-limit status of the credential the resolver is using.
    pub async fn usage(&self, cancel: &CancellationToken) -> Result<RateLimit> {
        self.client.rate_limit(cancel).await
    }
}

fn log_outcome(
    owner: &str,
    repo: &str,
    tag: &str,
    platform: &str,
    arch: &str,
    url: Option<&str>,
) {
    match url {
        Some(url) => tracing::info!(
            "Resolved {}/{}@{} {}/{} to {}",
            owner,
            repo,
            tag,
            platform,
            arch,
            url
        ),
        None => tracing::info!("No {}/{} asset in {}/{}@{}", platform, arch, owner, repo, tag),
    }
}
