// Colored terminal output for bot reports and batch summaries.
//
// This module handles all terminal-specific formatting: colors, tables,
// section separators. The main.rs display calls delegate here.

use colored::Colorize;

use crate::pipeline::batch::{BatchEntry, BatchStats};
use crate::scoring::profile::BotReport;

/// Display a single account's full report.
pub fn display_report(report: &BotReport) {
    println!(
        "\n{}",
        format!("=== Bot Analysis: u/{} ===", report.username).bold()
    );
    println!();
    println!(
        "  Bot score: {} / 100",
        format!("{:.2}", report.bot_score).bold()
    );
    println!(
        "  Classification: {}",
        colorize_verdict(report.classification.as_str())
    );
    println!("  Confidence: {}", report.confidence);
    println!("  Risk level: {}", report.risk_level);
    println!("  {}", report.description.dimmed());

    println!("\n  Score breakdown");
    println!("  {}", "-".repeat(40).dimmed());
    let breakdown = &report.breakdown;
    println!("  {:<28} {:>6.2}", "Account age", breakdown.account_age);
    println!(
        "  {:<28} {:>6.2}",
        "Activity pattern", breakdown.activity_pattern
    );
    println!(
        "  {:<28} {:>6.2}",
        "Content quality", breakdown.content_quality
    );
    println!("  {:<28} {:>6.2}", "Engagement", breakdown.engagement);
    println!("  {:<28} {:>6.2}", "Diversity", breakdown.diversity);
    println!("  {:<28} {:>6.2}", "Verification", breakdown.verification);

    println!("\n  Account information");
    println!("  {}", "-".repeat(40).dimmed());
    let info = &report.account_info;
    println!("  {:<28} {:>6.1}", "Age (days)", info.account_age_days);
    println!("  {:<28} {:>6}", "Posts", info.total_posts);
    println!("  {:<28} {:>6}", "Comments", info.total_comments);
    println!("  {:<28} {:>6}", "Total karma", info.total_karma);
    println!("  {:<28} {:>6}", "Subreddits", info.subreddit_count);
    println!(
        "  {:<28} {:>6.2}",
        "Avg karma per item", info.avg_karma_per_item
    );
    println!("  {:<28} {:>6.2}", "Posts per day", info.posts_per_day);

    println!("\n  Red flags");
    println!("  {}", "-".repeat(40).dimmed());
    for flag in &report.red_flags {
        println!("  - {}", flag);
    }

    println!("\n  Recommendation");
    println!("  {}", "-".repeat(40).dimmed());
    println!("  {}", report.recommendation);
    println!();
}

/// Display ranked batch results, highest scores first, with failed
/// lookups listed underneath.
pub fn display_batch_list(entries: &[BatchEntry]) {
    if entries.is_empty() {
        println!("No accounts analyzed.");
        return;
    }

    let mut scored: Vec<&BotReport> = entries.iter().filter_map(BatchEntry::report).collect();
    scored.sort_by(|a, b| {
        b.bot_score
            .partial_cmp(&a.bot_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    println!(
        "\n{}",
        format!("=== Batch Results ({} accounts) ===", entries.len()).bold()
    );
    println!();

    // Header
    println!(
        "  {:>4}  {:<24} {:>6}  {}",
        "Rank".dimmed(),
        "Username".dimmed(),
        "Score".dimmed(),
        "Classification".dimmed(),
    );
    println!("  {}", "-".repeat(64).dimmed());

    for (i, report) in scored.iter().enumerate() {
        println!(
            "  {:>4}. u/{:<22} {:>6.2}  {}",
            i + 1,
            report.username,
            report.bot_score,
            colorize_verdict(report.classification.as_str()),
        );
    }

    for entry in entries {
        if let BatchEntry::Failed { username, error } = entry {
            println!(
                "  {:>4}  u/{:<22} {:>6}  {}",
                "--".dimmed(),
                username,
                "-".dimmed(),
                super::truncate_chars(error, 48).dimmed(),
            );
        }
    }
}

/// Display aggregate statistics for a batch run.
pub fn display_batch_summary(stats: &BatchStats) {
    println!("\n{}", "=== Summary ===".bold());
    println!(
        "  Analyzed: {} ({} scored, {} failed)",
        stats.total_analyzed, stats.successful_analyses, stats.failed_analyses
    );

    if stats.successful_analyses == 0 {
        println!("  No accounts scored successfully.");
        return;
    }

    println!(
        "  Scores: avg {:.2}  median {:.2}  range {:.2}-{:.2}",
        stats.average_bot_score, stats.median_bot_score, stats.min_bot_score, stats.max_bot_score
    );
    println!();

    let successful = stats.successful_analyses as f64;
    let pct = |count: usize| count as f64 / successful * 100.0;

    println!(
        "  {:<22} {:>4}  ({:>5.1}%)",
        "Likely human",
        stats.likely_humans,
        pct(stats.likely_humans)
    );
    println!(
        "  {:<22} {:>4}  ({:>5.1}%)",
        "Possibly suspicious",
        stats.suspicious,
        pct(stats.suspicious)
    );
    println!(
        "  {:<22} {:>4}  ({:>5.1}%)",
        "Likely bot",
        stats.likely_bots,
        pct(stats.likely_bots)
    );
    println!(
        "  {:<22} {:>4}  ({:>5.1}%)",
        "Almost certainly bot",
        stats.almost_certain_bots,
        pct(stats.almost_certain_bots)
    );

    if stats.almost_certain_bots > 0 || stats.likely_bots > 0 {
        println!();
    }
    if stats.almost_certain_bots > 0 {
        println!(
            "  {} {} near-certain bot accounts",
            "!!".red().bold(),
            stats.almost_certain_bots
        );
    }
    if stats.likely_bots > 0 {
        println!(
            "  {} {} likely bot accounts",
            "!".bright_red(),
            stats.likely_bots
        );
    }
    println!();
}

/// Colorize a classification label.
fn colorize_verdict(verdict: &str) -> colored::ColoredString {
    match verdict {
        "Almost Certainly Bot" => verdict.red().bold(),
        "Likely Bot" => verdict.bright_red(),
        "Possibly Suspicious" => verdict.yellow(),
        "Likely Human" => verdict.green(),
        _ => verdict.dimmed(),
    }
}
