//! CLI for the PR review finder
//!
//! Run `pr-review-finder --help` for usage information.

// CLI binaries legitimately need println! for user output
#![allow(clippy::disallowed_macros)]

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pr_review_finder::{
    compile_repo_pattern, ChannelRegistry, MessageClassification, SearchRequest, CONFIG_ENV_VAR,
    DEFAULT_LOOKBACK_DAYS,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "pr-review-finder")]
#[command(about = "Find PR review requests in Slack channels")]
#[command(version)]
struct Cli {
    /// Channel config file (defaults to ./channels.yaml)
    #[arg(short, long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Output format for list-channels and classify: text, json
    #[arg(short, long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print search instructions (JSON) for finding PR review requests
    Search {
        /// Number of days to look back
        #[arg(long, default_value_t = DEFAULT_LOOKBACK_DAYS)]
        days: u32,

        /// Filter to a specific channel ID or name
        #[arg(long)]
        channel: Option<String>,

        /// Regex pattern to filter GitHub repos (default: github.com/tatari-tv/.*/pull/)
        #[arg(long)]
        repo_pattern: Option<String>,
    },

    /// List configured channels
    ListChannels,

    /// Check whether a message looks like a PR review request
    Classify {
        /// Message text (reads stdin when omitted)
        text: Option<String>,

        /// Only report PR URLs matching this regex
        #[arg(long)]
        repo_pattern: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config_path = ChannelRegistry::resolve_path(cli.config);

    match cli.command {
        Commands::Search {
            days,
            channel,
            repo_pattern,
        } => run_search(&config_path, days, channel, repo_pattern)?,
        Commands::ListChannels => run_list_channels(&config_path, cli.format)?,
        Commands::Classify { text, repo_pattern } => {
            run_classify(text, repo_pattern.as_deref(), cli.format)?;
        }
    }

    Ok(())
}

fn load_registry(config_path: &Path) -> Result<ChannelRegistry> {
    ChannelRegistry::load(config_path).context("Failed to load channel config")
}

fn run_search(
    config_path: &Path,
    days: u32,
    channel: Option<String>,
    repo_pattern: Option<String>,
) -> Result<()> {
    let registry = load_registry(config_path)?;

    let request = SearchRequest {
        days,
        channel_filter: channel,
        repo_pattern,
    };
    let spec = request.build(&registry)?;

    println!("{}", spec.to_json()?);
    Ok(())
}

fn run_list_channels(config_path: &Path, format: OutputFormat) -> Result<()> {
    let registry = load_registry(config_path)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&registry.channels)?);
        }
        OutputFormat::Text => {
            print!("{}", registry.format_listing(config_path));
        }
    }

    Ok(())
}

fn run_classify(
    text: Option<String>,
    repo_pattern: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let text = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read message from stdin")?;
            buf
        }
    };

    let repo_filter = repo_pattern
        .filter(|p| !p.is_empty())
        .map(compile_repo_pattern)
        .transpose()?;
    let result = MessageClassification::classify(&text, repo_filter.as_ref());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Text => {
            if result.is_review_request {
                println!("👀 Looks like a review request");
            } else {
                println!("Not a review request");
            }
            if result.pr_urls.is_empty() {
                println!("No PR URLs found");
            } else {
                println!("PR URLs ({}):", result.pr_urls.len());
                for pr in result.pr_references() {
                    println!("  {} ({})", pr.url, pr.short_name());
                }
            }
        }
    }

    Ok(())
}
