use clap::Parser;
use get_release::cli::{parse_repo, Args, Command};
use get_release::config::Config;
use get_release::error::GetReleaseError;
use std::path::PathBuf;

#[test]
fn test_parse_repo() {
    let (owner, repo) = parse_repo("owner/repo").unwrap();
    assert_eq!(owner, "owner");
    assert_eq!(repo, "repo");
}

#[test]
fn test_parse_repo_invalid() {
    for input in ["owner", "owner/repo/extra", "/repo", "owner/", ""] {
        let err = parse_repo(input).unwrap_err();
        assert!(
            matches!(err, GetReleaseError::InvalidRepo { .. }),
            "expected InvalidRepo for {input:?}"
        );
    }
}

#[test]
fn test_latest_command() {
    let args = Args::try_parse_from(["get-release", "latest", "cli/cli", "linux", "amd64"]).unwrap();
    assert_eq!(
        args.command,
        Command::Latest {
            repo: "cli/cli".to_string(),
            os: "linux".to_string(),
            arch: "amd64".to_string(),
        }
    );
    assert!(!args.verbose);
    assert_eq!(args.timeout, None);
}

#[test]
fn test_matching_command_with_options() {
    let args = Args::try_parse_from([
        "get-release",
        "--timeout",
        "10",
        "--api-url",
        "https://github.example.com/api/v3",
        "--verbose",
        "matching",
        "owner/repo",
        "darwin",
        "arm64",
        ">=1, <2",
    ])
    .unwrap();

    assert_eq!(
        args.command,
        Command::Matching {
            repo: "owner/repo".to_string(),
            os: "darwin".to_string(),
            arch: "arm64".to_string(),
            constraint: ">=1, <2".to_string(),
        }
    );
    assert_eq!(args.timeout, Some(10));
    assert!(args.verbose);
}

#[test]
fn test_versions_command_defaults() {
    let args = Args::try_parse_from(["get-release", "versions"]).unwrap();
    assert_eq!(
        args.command,
        Command::Versions {
            repo: "golang/go".to_string(),
            prefix: "go".to_string(),
        }
    );

    let args =
        Args::try_parse_from(["get-release", "versions", "nodejs/node", "--prefix", "v"]).unwrap();
    assert_eq!(
        args.command,
        Command::Versions {
            repo: "nodejs/node".to_string(),
            prefix: "v".to_string(),
        }
    );
}

#[test]
fn test_missing_arguments_rejected() {
    assert!(Args::try_parse_from(["get-release", "latest", "owner/repo", "linux"]).is_err());
    assert!(Args::try_parse_from(["get-release"]).is_err());
}

#[test]
fn test_args_override_config() {
    let args = Args::try_parse_from([
        "get-release",
        "--config",
        "/tmp/get-release-test.toml",
        "--token",
        "cli-token",
        "--timeout",
        "2",
        "usage",
    ])
    .unwrap();
    assert_eq!(args.config_path(), PathBuf::from("/tmp/get-release-test.toml"));

    let mut config = Config::default();
    config.github.token = Some("file-token".to_string());
    config.merge_with_args(&args);

    assert_eq!(config.github.token.as_deref(), Some("cli-token"));
    assert_eq!(config.request.timeout, 2);
    assert!(config.github.api_url.is_none());
}
