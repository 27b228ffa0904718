//! gitolite-admin CLI
//!
//! Inspect and reformat the `gitolite.conf` of an admin repository.

use anyhow::Context;
use clap::{Parser, Subcommand};
use gitolite_admin::{
    AccessResolver, Document,
    config::{AppConfig, LogFormat, load_config},
    conf::{ALL_GROUP, parse, serialize},
    util::{IdentifierKind, classify, is_valid_name},
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Query and format a gitolite admin configuration
#[derive(Parser, Debug)]
#[command(name = "gitolite-admin")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "GITOLITE_ADMIN_CONFIG")]
    config: Option<String>,

    /// gitolite.conf to read instead of the configured one
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "GITOLITE_ADMIN_LOG_LEVEL")]
    log_level: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse the file and report suspicious names
    Check,
    /// Print the file in canonical form
    Fmt {
        /// Rewrite the file in place
        #[arg(long)]
        write: bool,
    },
    /// Effective permissions of a user on a repository
    Access { repo: String, user: String },
    /// Whether a user administers the server
    Admin { user: String },
    /// Repositories a user has a rule on
    Repos { user: String },
    /// Groups a user or repository belongs to
    Groups { identifier: String },
    /// Print a repo block
    Show { repo: String },
}

fn init_logging(args: &Args, config: &AppConfig) {
    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

fn print<T: Serialize>(json: bool, value: &T, plain: impl FnOnce(&T)) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        plain(value);
    }
    Ok(())
}

fn check(doc: &Document) -> usize {
    let mut warnings = 0;
    for repo in doc.repos() {
        for alias in &repo.aliases {
            if classify(alias) == IdentifierKind::Literal && !is_valid_name(alias) {
                warn!(alias = %alias, "Repository name is not a valid gitolite name");
                warnings += 1;
            }
        }
    }
    for group in doc.groups() {
        for member in &group.members {
            if member.starts_with('@') && doc.group(member).is_err() && member != ALL_GROUP {
                warn!(group = %group.name, member = %member, "Group member refers to an undefined group");
                warnings += 1;
            }
        }
    }
    warnings
}

fn run(args: &Args, config: &AppConfig) -> anyhow::Result<()> {
    let path = args.file.clone().unwrap_or_else(|| config.conf_path());
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let doc = parse(&text).with_context(|| format!("failed to parse {}", path.display()))?;
    info!(path = %path.display(), entries = doc.entries.len(), "Loaded configuration");

    let resolver = || AccessResolver::with_options(&doc, config.resolver_options());

    match &args.command {
        Command::Check => {
            let warnings = check(&doc);
            println!("{}: ok ({} warnings)", path.display(), warnings);
        }
        Command::Fmt { write } => {
            let out = serialize(&doc);
            if *write {
                std::fs::write(&path, &out)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!(path = %path.display(), "Rewrote configuration");
            } else {
                print!("{out}");
            }
        }
        Command::Access { repo, user } => {
            let grants = resolver()?.resolve_access(repo, user)?;
            print(args.json, &grants, |grants| {
                for grant in grants {
                    println!("{grant}");
                }
            })?;
        }
        Command::Admin { user } => {
            let admin = resolver()?.is_admin(user)?;
            print(args.json, &admin, |admin| println!("{admin}"))?;
        }
        Command::Repos { user } => {
            let repos = resolver()?.list_user_repos(user)?;
            print(args.json, &repos, |repos| {
                for repo in repos {
                    println!("{:<6} {}", repo.perm, repo.name);
                }
            })?;
        }
        Command::Groups { identifier } => {
            let groups = resolver()?.resolve_groups(identifier)?;
            print(args.json, &groups, |groups| {
                for group in groups {
                    println!("{group}");
                }
            })?;
        }
        Command::Show { repo } => {
            let block = doc.repo(repo)?;
            let mut single = Document::new();
            single.push(block.clone());
            print(args.json, block, |_| print!("{single}"))?;
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    init_logging(&args, &config);

    run(&args, &config).inspect_err(|e| error!(error = %e, "Command failed"))
}
