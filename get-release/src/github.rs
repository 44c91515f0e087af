use octocrab::{Octocrab, Page};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::config::GitHubConfig;
use crate::error::{GetReleaseError, Result};
use crate::gate::ConcurrencyGate;

/// Release record as returned by the GitHub releases API.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRelease {
    pub tag_name: String,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub assets: Vec<RawAsset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAsset {
    pub name: String,
    pub browser_download_url: String,
}

#[derive(Debug, Deserialize)]
struct RawRef {
    #[serde(rename = "ref")]
    name: String,
}

/// The `core` bucket of the GitHub rate-limit status.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    #[serde(default)]
    pub used: u64,
    pub reset: u64,
}

#[derive(Debug, Deserialize)]
struct RateLimitResponse {
    resources: RateLimitResources,
}

#[derive(Debug, Deserialize)]
struct RateLimitResources {
    core: RateLimit,
}

#[derive(Debug, Serialize)]
struct PageParams {
    per_page: u8,
    page: u32,
}

/// GitHub API client. All calls are serialized through one [`ConcurrencyGate`]
/// so a shared, rate-limited token never sees more than one request at once.
pub struct GitHubClient {
    octocrab: Octocrab,
    gate: ConcurrencyGate,
    page_size: u8,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let mut builder = Octocrab::builder();
        if let Some(api_url) = &config.api_url {
            builder = builder.base_uri(api_url.as_str())?;
        }
        let octocrab = match &config.token {
            Some(token) => builder.personal_token(token.clone()).build()?,
            None => builder.build()?,
        };

        Ok(Self {
            octocrab,
            gate: ConcurrencyGate::new(),
            page_size: config.page_size,
        })
    }

    pub fn gate(&self) -> &ConcurrencyGate {
        &self.gate
    }

    /// Fetch one page of releases. Later pages are not requested.
    pub async fn list_releases(
        &self,
        owner: &str,
        repo: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<RawRelease>> {
        let route = format!("/repos/{owner}/{repo}/releases");
        let params = PageParams {
            per_page: self.page_size,
            page: 1,
        };
        tracing::debug!("Listing releases for {}/{}", owner, repo);

        self.gate
            .run(cancel, async {
                self.octocrab
                    .get::<Vec<RawRelease>, _, _>(&route, Some(&params))
                    .await
                    .map_err(|e| GetReleaseError::from_upstream(e, owner, repo))
            })
            .await
    }

    /// Fetch the release GitHub considers latest (non-draft, non-prerelease).
    pub async fn latest_release(
        &self,
        owner: &str,
        repo: &str,
        cancel: &CancellationToken,
    ) -> Result<RawRelease> {
        let route = format!("/repos/{owner}/{repo}/releases/latest");
        tracing::debug!("Fetching latest release for {}/{}", owner, repo);

        self.gate
            .run(cancel, async {
                self.octocrab
                    .get::<RawRelease, _, _>(&route, None::<&()>)
                    .await
                    .map_err(|e| GetReleaseError::from_upstream(e, owner, repo))
            })
            .await
    }

    /// List every tag starting with `prefix`, following pagination to the end.
    /// Returned names have the `refs/tags/` prefix removed.
    ///
    /// The gate is held for the whole walk.
    pub async fn list_tags(
        &self,
        owner: &str,
        repo: &str,
        prefix: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>> {
        let route = format!("/repos/{owner}/{repo}/git/matching-refs/tags/{prefix}");
        let params = PageParams {
            per_page: self.page_size,
            page: 1,
        };
        tracing::debug!("Listing tags '{}*' for {}/{}", prefix, owner, repo);

        self.gate
            .run(cancel, self.walk_tag_pages(&route, &params, owner, repo))
            .await
    }

    async fn walk_tag_pages(
        &self,
        route: &str,
        params: &PageParams,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<String>> {
        let upstream = |e| GetReleaseError::from_upstream(e, owner, repo);
        let mut tags = Vec::new();
        let mut page: Page<RawRef> = self
            .octocrab
            .get(route, Some(params))
            .await
            .map_err(upstream)?;

        loop {
            tags.extend(page.items.drain(..).map(|r| match r.name.strip_prefix("refs/tags/") {
                Some(tag) => tag.to_string(),
                None => r.name,
            }));
            match self.octocrab.get_page::<RawRef>(&page.next).await {
                Ok(Some(next)) => page = next,
                Ok(None) => break,
                Err(e) => return Err(upstream(e)),
            }
        }

        Ok(tags)
    }

    /// Current `core` rate-limit status for the configured credential.
    pub async fn rate_limit(&self, cancel: &CancellationToken) -> Result<RateLimit> {
        self.gate.run(cancel, self.fetch_rate_limit()).await
    }

    async fn fetch_rate_limit(&self) -> Result<RateLimit> {
        let response: RateLimitResponse = self.octocrab.get("/rate_limit", None::<&()>).await?;
        Ok(response.resources.core)
    }
}
