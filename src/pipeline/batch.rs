// Batch pipeline: score many accounts concurrently.
//
// Each account is fetched and scored independently — one failure never
// aborts the run. Failures become explicit entries in the results so
// callers can see exactly which usernames were skipped and why, and the
// summary statistics are computed over the successful scores only.

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::warn;

use crate::reddit::traits::ActivitySource;
use crate::scoring::classify::{Verdict, VerdictBins};
use crate::scoring::profile::{self, BotReport, EngineConfig};
use crate::scoring::score;

/// One per-account outcome in a batch run.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Scored(BotReport),
    Failed { username: String, error: String },
}

impl BatchEntry {
    /// The report, when this entry scored successfully.
    pub fn report(&self) -> Option<&BotReport> {
        match self {
            BatchEntry::Scored(report) => Some(report),
            BatchEntry::Failed { .. } => None,
        }
    }
}

/// Aggregate statistics over a batch run. Score fields describe the
/// successful analyses; the counts also track how many accounts failed.
#[derive(Debug, Clone, Serialize)]
pub struct BatchStats {
    pub total_analyzed: usize,
    pub successful_analyses: usize,
    pub failed_analyses: usize,
    pub average_bot_score: f64,
    pub median_bot_score: f64,
    pub min_bot_score: f64,
    pub max_bot_score: f64,
    pub likely_humans: usize,
    pub suspicious: usize,
    pub likely_bots: usize,
    pub almost_certain_bots: usize,
}

/// Full batch output: statistics plus per-account entries in input order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub analysis_date: String,
    #[serde(rename = "statistics")]
    pub stats: BatchStats,
    pub results: Vec<BatchEntry>,
}

/// Score a set of usernames with bounded concurrency.
///
/// `now` is the shared scoring instant, so every account in the batch is
/// judged against the same clock.
pub async fn run(
    source: &dyn ActivitySource,
    usernames: &[String],
    config: &EngineConfig,
    concurrency: usize,
    now: DateTime<Utc>,
) -> BatchReport {
    let pb = ProgressBar::new(usernames.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Scoring [{bar:30}] {pos}/{len} ({eta})")
            .unwrap(),
    );

    let mut entries: Vec<(usize, BatchEntry)> =
        stream::iter(usernames.iter().enumerate().map(|(index, username)| {
            let pb = pb.clone();
            async move {
                let entry = match source.fetch_activity(username).await {
                    Ok(record) => {
                        BatchEntry::Scored(profile::analyze_account(&record, now, config))
                    }
                    Err(e) => {
                        warn!(username = %username, error = %e, "Analysis failed, skipping");
                        BatchEntry::Failed {
                            username: username.clone(),
                            error: e.to_string(),
                        }
                    }
                };
                pb.inc(1);
                (index, entry)
            }
        }))
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;
    pb.finish_and_clear();

    // Completion order is arbitrary; restore input order for the report.
    entries.sort_by_key(|(index, _)| *index);
    let results: Vec<BatchEntry> = entries.into_iter().map(|(_, entry)| entry).collect();

    let scores: Vec<f64> = results
        .iter()
        .filter_map(|entry| entry.report().map(|report| report.bot_score))
        .collect();
    let stats = compute_stats(&scores, usernames.len(), &config.bins);

    BatchReport {
        analysis_date: now.to_rfc3339(),
        stats,
        results,
    }
}

/// Compute summary statistics over the successful scores.
///
/// With zero successes every score field is 0.0, keeping the report free
/// of nullable fields. An even score count takes the mean of the two
/// middle values as the median.
pub fn compute_stats(scores: &[f64], total_requested: usize, bins: &VerdictBins) -> BatchStats {
    let successful = scores.len();
    let failed = total_requested.saturating_sub(successful);

    if scores.is_empty() {
        return BatchStats {
            total_analyzed: total_requested,
            successful_analyses: 0,
            failed_analyses: failed,
            average_bot_score: 0.0,
            median_bot_score: 0.0,
            min_bot_score: 0.0,
            max_bot_score: 0.0,
            likely_humans: 0,
            suspicious: 0,
            likely_bots: 0,
            almost_certain_bots: 0,
        };
    }

    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };
    let average = sorted.iter().sum::<f64>() / sorted.len() as f64;

    let mut likely_humans = 0;
    let mut suspicious = 0;
    let mut likely_bots = 0;
    let mut almost_certain_bots = 0;
    for &score in scores {
        match Verdict::from_score(score, bins) {
            Verdict::LikelyHuman => likely_humans += 1,
            Verdict::PossiblySuspicious => suspicious += 1,
            Verdict::LikelyBot => likely_bots += 1,
            Verdict::AlmostCertainlyBot => almost_certain_bots += 1,
        }
    }

    BatchStats {
        total_analyzed: total_requested,
        successful_analyses: successful,
        failed_analyses: failed,
        average_bot_score: score::round2(average),
        median_bot_score: score::round2(median),
        min_bot_score: sorted[0],
        max_bot_score: sorted[sorted.len() - 1],
        likely_humans,
        suspicious,
        likely_bots,
        almost_certain_bots,
    }
}
