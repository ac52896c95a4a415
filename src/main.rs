use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;

/// Redflag: heuristic bot-likelihood scoring for Reddit accounts.
///
/// Scores accounts 0-100 from their public activity — no API keys, no
/// machine learning. Higher scores mean more bot-like behavior.
#[derive(Parser)]
#[command(name = "redflag", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single account
    Score {
        /// The username to score (with or without the u/ prefix)
        username: String,

        /// Read the activity record from a JSON file instead of Reddit
        #[arg(long)]
        input: Option<PathBuf>,

        /// Save the report as a timestamped JSON file
        #[arg(long)]
        save: bool,

        /// Explicit output path (implies --save)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Score several accounts and summarize the results
    Batch {
        /// Usernames to score
        usernames: Vec<String>,

        /// File with one username per line (merged with the arguments)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Number of accounts to score in parallel (default: 4)
        #[arg(long, default_value = "4")]
        concurrency: usize,

        /// Save the batch report as a timestamped JSON file
        #[arg(long)]
        save: bool,

        /// Explicit output path (implies --save)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Scan a subreddit's recent activity and score its active authors
    Scan {
        /// The subreddit to scan (with or without the r/ prefix)
        subreddit: String,

        /// How many recent posts/comments to pull authors from (default: 25)
        #[arg(long, default_value = "25")]
        posts: u32,

        /// Cap on distinct authors to score (default: 10)
        #[arg(long, default_value = "10")]
        max_users: usize,

        /// Number of accounts to score in parallel (default: 4)
        #[arg(long, default_value = "4")]
        concurrency: usize,

        /// Save the batch report as a timestamped JSON file
        #[arg(long)]
        save: bool,

        /// Explicit output path (implies --save)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("redflag=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = redflag::config::Config::load()?;
    let engine = redflag::scoring::profile::EngineConfig::default();

    match cli.command {
        Commands::Score {
            username,
            input,
            save,
            out,
        } => {
            // Strip a leading u/ if present
            let username = username.strip_prefix("u/").unwrap_or(&username);

            let record = match input {
                Some(path) => read_record(&path)?,
                None => {
                    println!("Fetching activity for u/{username}...");
                    let client = redflag::reddit::client::RedditClient::new(
                        &config.api_url,
                        &config.user_agent,
                        config.fetch_limit,
                    )?;
                    redflag::reddit::user::fetch_user_activity(&client, username).await?
                }
            };

            let report = redflag::scoring::profile::analyze_account(&record, Utc::now(), &engine);
            redflag::output::terminal::display_report(&report);

            if save || out.is_some() {
                let path = out.unwrap_or_else(|| {
                    redflag::output::json::timestamped_path(&format!(
                        "bot_analysis_{}",
                        report.username
                    ))
                });
                let written = redflag::output::json::write_json_report(&report, &path)?;
                println!("Report saved to: {}", written.display());
            }
        }

        Commands::Batch {
            usernames,
            file,
            concurrency,
            save,
            out,
        } => {
            let usernames = gather_usernames(usernames, file.as_deref())?;
            if usernames.is_empty() {
                anyhow::bail!("No usernames given. Pass them as arguments or via --file.");
            }

            println!(
                "Scoring {} accounts ({} concurrent)...",
                usernames.len(),
                concurrency
            );

            let client = redflag::reddit::client::RedditClient::new(
                &config.api_url,
                &config.user_agent,
                config.fetch_limit,
            )?;
            let report =
                redflag::pipeline::batch::run(&client, &usernames, &engine, concurrency, Utc::now())
                    .await;

            redflag::output::terminal::display_batch_list(&report.results);
            redflag::output::terminal::display_batch_summary(&report.stats);

            if save || out.is_some() {
                let path = out
                    .unwrap_or_else(|| redflag::output::json::timestamped_path("bot_analysis"));
                let written = redflag::output::json::write_json_report(&report, &path)?;
                println!("Results saved to: {}", written.display());
            }
        }

        Commands::Scan {
            subreddit,
            posts,
            max_users,
            concurrency,
            save,
            out,
        } => {
            // Strip a leading r/ if present
            let subreddit = subreddit.strip_prefix("r/").unwrap_or(&subreddit);

            println!("Scanning r/{subreddit} for active authors...");

            let client = redflag::reddit::client::RedditClient::new(
                &config.api_url,
                &config.user_agent,
                config.fetch_limit,
            )?;
            let mut authors =
                redflag::reddit::subreddit::collect_authors(&client, subreddit, posts).await?;
            println!("  Found {} distinct authors", authors.len());

            authors.truncate(max_users);
            if authors.is_empty() {
                println!("{}", "Nothing to analyze.".yellow());
                return Ok(());
            }

            println!(
                "Scoring {} accounts ({} concurrent)...",
                authors.len(),
                concurrency
            );
            let report =
                redflag::pipeline::batch::run(&client, &authors, &engine, concurrency, Utc::now())
                    .await;

            redflag::output::terminal::display_batch_list(&report.results);
            redflag::output::terminal::display_batch_summary(&report.stats);

            if save || out.is_some() {
                let path = out.unwrap_or_else(|| {
                    redflag::output::json::timestamped_path(&format!("bot_analysis_r_{subreddit}"))
                });
                let written = redflag::output::json::write_json_report(&report, &path)?;
                println!("Results saved to: {}", written.display());
            }
        }
    }

    Ok(())
}

/// Load an activity record from a JSON file for offline scoring.
fn read_record(path: &Path) -> Result<redflag::scoring::record::ActivityRecord> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&body).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Merge positional usernames with an optional one-per-line file,
/// trimming whitespace, u/ prefixes, and blank lines.
fn gather_usernames(positional: Vec<String>, file: Option<&Path>) -> Result<Vec<String>> {
    let mut raw = positional;
    if let Some(path) = file {
        let body = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        raw.extend(body.lines().map(str::to_string));
    }

    let usernames: Vec<String> = raw
        .iter()
        .map(|name| name.trim())
        .map(|name| name.strip_prefix("u/").unwrap_or(name))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    Ok(usernames)
}
