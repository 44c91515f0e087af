//! Lenient version parsing for release tags, and the version constraint
//! dialect used to pick a release.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use semver::{Version, VersionReq};

use crate::error::{GetReleaseError, Result};

static LENIENT_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^v?(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:-([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?(?:\+([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?$",
    )
    .expect("lenient version pattern is a valid regex")
});

/// Parse a tag as a semantic version, accepting a leading `v` and a
/// shortened core (`1`, `1.2`), with missing components read as zero.
///
/// Returns `None` for anything that is not version syntax.
pub fn parse_lenient(tag: &str) -> Option<Version> {
    let caps = LENIENT_VERSION.captures(tag)?;
    let component = |i: usize| -> Option<u64> {
        match caps.get(i) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };

    let mut normalized = format!("{}.{}.{}", component(1)?, component(2)?, component(3)?);
    if let Some(pre) = caps.get(4) {
        normalized.push('-');
        normalized.push_str(pre.as_str());
    }
    if let Some(build) = caps.get(5) {
        normalized.push('+');
        normalized.push_str(build.as_str());
    }

    Version::parse(&normalized).ok()
}

/// Turn a prefixed tag such as `go1.9rc1` into a semantic version string
/// (`1.9.0-rc1`).
///
/// The prefix is stripped when present and a `-` is inserted ahead of the
/// first `beta` and `rc` markers. Tags that still do not parse give `None`.
pub fn normalize_tag(tag: &str, prefix: &str) -> Option<String> {
    let raw = tag.strip_prefix(prefix).unwrap_or(tag);
    let raw = raw.replacen("beta", "-beta", 1).replacen("rc", "-rc", 1);
    parse_lenient(&raw).map(|v| v.to_string())
}

/// A version constraint such as `1.0.0`, `>=1.0 <2`, `1.2 - 1.4` or
/// `^1 || ^2`.
///
/// `||` separates alternatives; within one alternative comparators may be
/// separated by commas or whitespace and must all hold. A comparator without
/// an operator is exact (`1.0.0` is `=1.0.0`, `1.2` accepts any `1.2.x`),
/// wildcards like `1.0.x` keep their meaning, and a `v` before the version is
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    input: String,
    alternatives: Vec<VersionReq>,
}

impl Constraint {
    pub fn parse(input: &str) -> Result<Self> {
        let alternatives = input
            .split("||")
            .map(parse_alternative)
            .collect::<std::result::Result<Vec<_>, String>>()
            .map_err(|reason| GetReleaseError::InvalidConstraint {
                input: input.to_string(),
                reason,
            })?;

        Ok(Self {
            input: input.to_string(),
            alternatives,
        })
    }

    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|req| req.matches(version))
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.input)
    }
}

fn parse_alternative(group: &str) -> std::result::Result<VersionReq, String> {
    let tokens: Vec<&str> = group
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        return Err("empty constraint".to_string());
    }

    let mut comparators = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let mut token = tokens[i].to_string();
        // Operator written apart from its version: `>= 1.2`.
        if token.chars().all(is_operator_char) {
            let Some(version) = tokens.get(i + 1) else {
                return Err(format!("operator '{token}' has no version"));
            };
            token.push_str(version);
            i += 1;
        }

        // Hyphen range: `1.2 - 1.4`.
        if tokens.get(i + 1) == Some(&"-") {
            let Some(upper) = tokens.get(i + 2) else {
                return Err(format!("range starting at '{token}' has no upper bound"));
            };
            comparators.push(format!(">={}", strip_v(&token)));
            comparators.push(format!("<={}", strip_v(upper)));
            i += 3;
            continue;
        }

        comparators.push(exact_by_default(&token));
        i += 1;
    }

    VersionReq::parse(&comparators.join(", ")).map_err(|e| e.to_string())
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '=' | '>' | '<' | '~' | '^' | '!')
}

fn strip_v(version: &str) -> &str {
    match version.strip_prefix('v') {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => rest,
        _ => version,
    }
}

fn exact_by_default(comparator: &str) -> String {
    let split = comparator
        .find(|c: char| !is_operator_char(c))
        .unwrap_or(comparator.len());
    let (op, version) = comparator.split_at(split);
    let version = strip_v(version);
    let is_wildcard = version.split('.').any(|p| matches!(p, "x" | "X" | "*"));
    let op = if op.is_empty() && !is_wildcard { "=" } else { op };
    format!("{op}{version}")
}
