use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use get_release::cli::{parse_repo, Args, Command};
use get_release::config::Config;
use get_release::gate::deadline_token;
use get_release::resolver::ReleaseResolver;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("get_release=debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = args.config_path();
    let mut config = Config::load(&config_path).context("Failed to load configuration")?;
    config.merge_with_args(&args);

    let resolver = ReleaseResolver::from_config(&config).context("Failed to create GitHub client")?;
    let cancel = deadline_token(config.request.timeout());

    match &args.command {
        Command::Latest { repo, os, arch } => {
            let (owner, repo) = parse_repo(repo)?;
            let url = resolver
                .resolve_latest(&owner, &repo, os, arch, &cancel)
                .await?;
            print_url(url);
        }
        Command::Matching {
            repo,
            os,
            arch,
            constraint,
        } => {
            let (owner, repo) = parse_repo(repo)?;
            let url = resolver
                .resolve_matching(&owner, &repo, os, arch, constraint, &cancel)
                .await?;
            print_url(url);
        }
        Command::Versions { repo, prefix } => {
            let (owner, repo) = parse_repo(repo)?;
            let versions = resolver
                .list_normalized_versions(prefix, &owner, &repo, &cancel)
                .await?;
            println!("{}", serde_json::to_string(&versions)?);
        }
        Command::Usage => {
            let rate = resolver.usage(&cancel).await?;
            println!("{}", serde_json::to_string(&rate)?);
        }
    }

    cancel.cancel();
    Ok(())
}

fn print_url(url: Option<String>) {
    match url {
        Some(url) => println!("{url}"),
        None => {
            eprintln!("No matching asset found");
            std::process::exit(1);
        }
    }
}
