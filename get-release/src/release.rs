//! Domain view of GitHub releases: classified assets, parsed versions and an
//! ordered release history that constraint lookups run against.

use std::cmp::Ordering;

use semver::Version;

use crate::classify::classify;
use crate::github::{RawAsset, RawRelease};
use crate::version::{parse_lenient, Constraint};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub file_name: String,
    pub url: String,
    /// Lowercase platform token, empty when the file name carries none.
    pub platform: String,
    /// Lowercase architecture token, empty when the file name carries none.
    pub arch: String,
}

impl Asset {
    pub fn from_raw(raw: RawAsset) -> Self {
        let (platform, arch) = match classify(&raw.name) {
            Some(target) => (target.platform, target.arch),
            None => (String::new(), String::new()),
        };
        Self {
            file_name: raw.name,
            url: raw.browser_download_url,
            platform,
            arch,
        }
    }

    /// Whether this asset was built for `platform`/`arch` (compared
    /// case-insensitively). Unclassified assets never match.
    pub fn is_for(&self, platform: &str, arch: &str) -> bool {
        !self.platform.is_empty()
            && self.platform.eq_ignore_ascii_case(platform)
            && self.arch.eq_ignore_ascii_case(arch)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub tag: String,
    /// `None` when the tag is not version syntax.
    pub version: Option<Version>,
    pub draft: bool,
    pub prerelease: bool,
    pub assets: Vec<Asset>,
}

impl Release {
    pub fn from_raw(raw: RawRelease) -> Self {
        let version = parse_lenient(&raw.tag_name);
        if version.is_none() {
            tracing::debug!("Release tag '{}' is not a version", raw.tag_name);
        }
        Self {
            version,
            draft: raw.draft,
            prerelease: raw.prerelease,
            assets: raw.assets.into_iter().map(Asset::from_raw).collect(),
            tag: raw.tag_name,
        }
    }

    /// URL of the first asset built for `platform`/`arch`, in upstream order.
    pub fn find_asset_url(&self, platform: &str, arch: &str) -> Option<&str> {
        self.assets
            .iter()
            .find(|asset| asset.is_for(platform, arch))
            .map(|asset| asset.url.as_str())
    }

    /// A release without a parsed version satisfies nothing.
    pub fn satisfies(&self, constraint: &Constraint) -> bool {
        self.version
            .as_ref()
            .is_some_and(|version| constraint.matches(version))
    }
}

/// Order releases newest first.
///
/// A strictly greater version sorts before a lesser one, and releases whose
/// tag did not parse sort after every versioned release. Build metadata is
/// not part of precedence, so `1.0.0+a` and `1.0.0+b` are equal. Used with a
/// stable sort, so equal versions keep their upstream order. [`ReleaseHistory`]
/// lookups rely on this: the first satisfying entry is the highest one.
pub fn compare_versions_descending(a: &Release, b: &Release) -> Ordering {
    match (&a.version, &b.version) {
        (Some(a), Some(b)) => b.cmp_precedence(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Releases of one project, kept in [`compare_versions_descending`] order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseHistory {
    releases: Vec<Release>,
}

impl ReleaseHistory {
    pub fn new(releases: Vec<Release>) -> Self {
        let mut history = Self { releases };
        history.sort_descending();
        history
    }

    pub fn from_raw(raw: Vec<RawRelease>) -> Self {
        let history = Self::new(raw.into_iter().map(Release::from_raw).collect());
        let unversioned = history.unversioned();
        if unversioned > 0 {
            tracing::debug!(
                "{} of {} releases have no parseable version and can never match",
                unversioned,
                history.len()
            );
        }
        history
    }

    pub fn sort_descending(&mut self) {
        self.releases.sort_by(compare_versions_descending);
    }

    pub fn without_drafts_or_prereleases(&self) -> Self {
        Self {
            releases: self
                .releases
                .iter()
                .filter(|r| !r.draft && !r.prerelease)
                .cloned()
                .collect(),
        }
    }

    /// Highest release satisfying `constraint`.
    pub fn find_satisfying(&self, constraint: &Constraint) -> Option<&Release> {
        self.releases.iter().find(|r| r.satisfies(constraint))
    }

    /// Number of releases whose tag did not parse as a version.
    pub fn unversioned(&self) -> usize {
        self.releases.iter().filter(|r| r.version.is_none()).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Release> {
        self.releases.iter()
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}

impl<'a> IntoIterator for &'a ReleaseHistory {
    type Item = &'a Release;
    type IntoIter = std::slice::Iter<'a, Release>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
