//! Platform/architecture detection from release asset file names.
//!
//! Release assets rarely carry structured metadata, so the target is read off
//! the file name: the first `<os>_<arch>` or `<os>-<arch>` pair drawn from a
//! fixed vocabulary wins. Names that do not contain such a pair (checksums,
//! READMEs, source archives) are left unclassified.

use once_cell::sync::Lazy;
use regex::Regex;

/// Operating system tokens recognised in asset names.
pub const KNOWN_PLATFORMS: &[&str] = &[
    "android",
    "darwin",
    "dragonfly",
    "freebsd",
    "linux",
    "nacl",
    "netbsd",
    "openbsd",
    "plan9",
    "solaris",
    "windows",
];

/// CPU architecture tokens recognised in asset names (`i?386` covers both
/// `386` and `i386`).
///
/// Longer tokens come before their prefixes (`amd64p32` before `amd64`,
/// `arm64` before `arm`) since the alternation is leftmost-first.
pub const KNOWN_ARCHS: &[&str] = &[
    "i?386", "amd64p32", "amd64", "arm64", "arm", "mips64le", "mips64", "mipsle", "mips",
    "ppc64le", "ppc64", "s390x", "x86_64",
];

static OS_ARCH: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        "(?i)({})(_|-)({})",
        KNOWN_PLATFORMS.join("|"),
        KNOWN_ARCHS.join("|")
    );
    Regex::new(&pattern).expect("os/arch pattern is a valid regex")
});

/// A lowercase platform/architecture pair extracted from a file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsArch {
    pub platform: String,
    pub arch: String,
}

/// Classify an asset file name, case-insensitively.
///
/// Returns `None` when the name has no recognisable pair.
pub fn classify(file_name: &str) -> Option<OsArch> {
    let caps = OS_ARCH.captures(file_name)?;
    Some(OsArch {
        platform: caps[1].to_lowercase(),
        arch: caps[3].to_lowercase(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(name: &str) -> Option<(String, String)> {
        classify(name).map(|t| (t.platform, t.arch))
    }

    #[test]
    fn test_classify_common_names() {
        assert_eq!(
            pair("tool_darwin_amd64"),
            Some(("darwin".to_string(), "amd64".to_string()))
        );
        assert_eq!(
            pair("tool_windows_386.exe"),
            Some(("windows".to_string(), "386".to_string()))
        );
        assert_eq!(
            pair("tool-1.2.0-linux-arm64.tar.gz"),
            Some(("linux".to_string(), "arm64".to_string()))
        );
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(
            pair("TOOL_LINUX_ARM64"),
            Some(("linux".to_string(), "arm64".to_string()))
        );
        assert_eq!(
            pair("tool_Darwin_X86_64.zip"),
            Some(("darwin".to_string(), "x86_64".to_string()))
        );
    }

    #[test]
    fn test_classify_prefers_longest_arch_token() {
        assert_eq!(
            pair("test_nacl_amd64p32.zip"),
            Some(("nacl".to_string(), "amd64p32".to_string()))
        );
        assert_eq!(
            pair("tool_linux_mips64le"),
            Some(("linux".to_string(), "mips64le".to_string()))
        );
        assert_eq!(
            pair("tool_freebsd_i386"),
            Some(("freebsd".to_string(), "i386".to_string()))
        );
    }

    #[test]
    fn test_classify_takes_first_match() {
        assert_eq!(
            pair("linux_arm64-to-windows_amd64.bin"),
            Some(("linux".to_string(), "arm64".to_string()))
        );
    }

    #[test]
    fn test_classify_unrecognised() {
        assert_eq!(pair("checksums.txt"), None);
        assert_eq!(pair("README.md"), None);
        assert_eq!(pair("testfile"), None);
        // Separator is required between the two tokens.
        assert_eq!(pair("tool_linuxamd64"), None);
        assert_eq!(pair("tool_macos_amd64"), None);
    }
}
