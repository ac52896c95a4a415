// Report builder — orchestrates scoring for a single account.
//
// Given an account's activity record, this module:
// 1. Extracts the behavioral feature set
// 2. Computes the weighted composite score with its breakdown
// 3. Classifies the score into a verdict
// 4. Collects the triggered red flags
// 5. Returns a complete BotReport ready for display or storage

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::scoring::classify::{self, Confidence, RiskLevel, Verdict, VerdictBins};
use crate::scoring::features::{self, FeatureConfig, FeatureSet};
use crate::scoring::record::ActivityRecord;
use crate::scoring::score::{self, ScoreBreakdown, ScoreWeights};

/// Tunables for the whole engine, grouped so callers pass one value.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub features: FeatureConfig,
    pub weights: ScoreWeights,
    pub bins: VerdictBins,
}

/// Descriptive account numbers echoed into every report.
#[derive(Debug, Clone, Serialize)]
pub struct AccountInfo {
    pub account_age_days: f64,
    pub total_posts: usize,
    pub total_comments: usize,
    pub total_karma: i64,
    pub subreddit_count: usize,
    pub avg_karma_per_item: f64,
    pub posts_per_day: f64,
}

impl AccountInfo {
    fn from_features(features: &FeatureSet) -> Self {
        let items = features.total_posts + features.total_comments;
        Self {
            account_age_days: round1(features.age_days),
            total_posts: features.total_posts,
            total_comments: features.total_comments,
            total_karma: features.total_karma,
            subreddit_count: features.subreddit_count,
            avg_karma_per_item: score::round2(features.avg_karma_per_item),
            posts_per_day: score::round2(items as f64 / features.age_days.max(1.0)),
        }
    }
}

/// Full scoring report for one account.
#[derive(Debug, Clone, Serialize)]
pub struct BotReport {
    pub username: String,
    pub analyzed_at: String,
    pub bot_score: f64,
    pub classification: Verdict,
    pub confidence: Confidence,
    pub risk_level: RiskLevel,
    pub description: String,
    pub breakdown: ScoreBreakdown,
    pub account_info: AccountInfo,
    pub red_flags: Vec<String>,
    pub recommendation: String,
}

/// Score a single account.
///
/// This is the core entry point. It runs feature extraction, composite
/// scoring, and classification, then assembles everything into one report.
/// Pure computation: `now` is passed in so results are reproducible.
pub fn analyze_account(
    record: &ActivityRecord,
    now: DateTime<Utc>,
    config: &EngineConfig,
) -> BotReport {
    let features = features::extract(record, now, &config.features);
    let (bot_score, breakdown) = score::compute_bot_score(&features, &config.weights);
    let verdict = Verdict::from_score(bot_score, &config.bins);
    let red_flags = classify::red_flags(&features);

    info!(
        username = %record.username,
        score = format!("{:.2}", bot_score),
        verdict = verdict.as_str(),
        posts = features.total_posts,
        comments = features.total_comments,
        "Scored account"
    );

    BotReport {
        username: record.username.clone(),
        analyzed_at: now.to_rfc3339(),
        bot_score,
        classification: verdict,
        confidence: verdict.confidence(),
        risk_level: verdict.risk_level(),
        description: verdict.description().to_string(),
        breakdown,
        account_info: AccountInfo::from_features(&features),
        red_flags,
        recommendation: verdict.recommendation().to_string(),
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
