// Feature extraction — raw activity record to normalized signals.
//
// Every *_score field lands in [0, 1]; unbounded auxiliaries (age in
// days, counts, karma) ride along for reporting. All computation is
// pure: the clock is injected so repeat runs over the same record give
// identical features.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex_lite::Regex;
use serde::Serialize;

use crate::scoring::record::{ActivityRecord, ContentItem};
use crate::scoring::text;

/// Guard against division by zero in ratio features.
const EPSILON: f64 = 1e-6;

// Auto-generated username shapes: "word_word2024" and "qwertyuiop1234".
static WORD_WORD_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+_\w+\d{4}$").unwrap());
static LETTERS_THEN_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{8,}\d{4,}$").unwrap());

/// Tunables for feature extraction.
#[derive(Debug, Clone)]
pub struct FeatureConfig {
    /// Pairwise similarity above this counts as a near-duplicate pair
    /// (default 0.8 — tolerates minor paraphrases, flags templates).
    pub duplicate_similarity_threshold: f64,
    /// An inter-event gap longer than `ratio × mean` immediately followed
    /// by one shorter than `mean / ratio` reads as a burst-then-silence
    /// spike (default 5.0).
    pub spike_gap_ratio: f64,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            duplicate_similarity_threshold: 0.8,
            spike_gap_ratio: 5.0,
        }
    }
}

/// Normalized signals derived from one activity record.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureSet {
    /// Account age in days, clamped at zero for claimed-future timestamps.
    pub age_days: f64,
    /// exp(-age_days / 180): 1.0 for brand-new accounts, ~0.13 at one year.
    pub age_score: f64,
    /// 1 - comments/posts when the ratio is under 1, else 0. Accounts that
    /// post without ever commenting look automated.
    pub comment_to_post_score: f64,
    pub subreddit_count: usize,
    /// 1 - subreddit_count/10, floored at 0. Few communities, high suspicion.
    pub subreddit_diversity_score: f64,
    /// 1.0 when a burst-then-silence timing spike was detected, else 0.0.
    pub activity_spike_score: f64,
    /// Content volume per unit of received karma, scaled into [0, 1].
    pub post_to_karma_score: f64,
    /// Highest near-duplicate ratio across comment texts and post texts.
    pub duplicate_content_score: f64,
    /// Items per day scaled by 20/day, capped at 1.
    pub posts_per_day_score: f64,
    /// 0.3-0.7 for auto-generated username shapes, 0 otherwise.
    pub username_suspicious_score: f64,
    /// 1.0 when average karma per item is under 2, else 0.0.
    pub low_karma_score: f64,
    /// 1.0 when the account lacks the verified-email flag, else 0.0.
    pub unverified_score: f64,
    pub total_posts: usize,
    pub total_comments: usize,
    pub total_karma: i64,
    pub avg_karma_per_item: f64,
}

/// Derive the full feature set from an activity record.
///
/// `now` is a parameter rather than a clock read so that scoring is
/// reproducible; batch runs share a single `now` across all accounts.
pub fn extract(record: &ActivityRecord, now: DateTime<Utc>, config: &FeatureConfig) -> FeatureSet {
    let age_days = ((now - record.created_at).num_seconds() as f64 / 86_400.0).max(0.0);
    let age_score = (-age_days / 180.0).exp();

    let posts = &record.posts;
    let comments = &record.comments;

    let c_to_p = comments.len() as f64 / (posts.len() as f64 + EPSILON);
    let comment_to_post_score = if c_to_p < 1.0 { 1.0 - c_to_p.min(1.0) } else { 0.0 };

    let subreddit_count = posts
        .iter()
        .chain(comments.iter())
        .map(|item| item.subreddit.as_str())
        .collect::<HashSet<_>>()
        .len();
    let subreddit_diversity_score = 1.0 - (subreddit_count as f64 / 10.0).min(1.0);

    let activity_spike_score = detect_activity_spike(posts, comments, config.spike_gap_ratio);

    let total_items = posts.len() + comments.len();
    let total_karma = record.total_karma();
    // Karma is floored at zero here: a downvoted-to-oblivion account reads
    // as maximally suspicious instead of producing a negative ratio.
    let post_to_karma_ratio = total_items as f64 / (total_karma.max(0) as f64 + EPSILON);
    let post_to_karma_score = (post_to_karma_ratio * 10.0).min(1.0);

    let comment_texts: Vec<&str> = comments.iter().map(|c| c.text.as_str()).collect();
    let post_texts: Vec<&str> = posts.iter().map(|p| p.text.as_str()).collect();
    let duplicate_content_score = text::duplicate_ratio(
        &comment_texts,
        config.duplicate_similarity_threshold,
    )
    .max(text::duplicate_ratio(
        &post_texts,
        config.duplicate_similarity_threshold,
    ));

    let posts_per_day = total_items as f64 / age_days.max(1.0);
    let posts_per_day_score = (posts_per_day / 20.0).min(1.0);

    let username_suspicious_score = score_username(&record.username);

    let avg_karma_per_item = total_karma as f64 / total_items.max(1) as f64;
    let low_karma_score = if avg_karma_per_item < 2.0 { 1.0 } else { 0.0 };

    let unverified_score = if record.verified { 0.0 } else { 1.0 };

    FeatureSet {
        age_days,
        age_score,
        comment_to_post_score,
        subreddit_count,
        subreddit_diversity_score,
        activity_spike_score,
        post_to_karma_score,
        duplicate_content_score,
        posts_per_day_score,
        username_suspicious_score,
        low_karma_score,
        unverified_score,
        total_posts: posts.len(),
        total_comments: comments.len(),
        total_karma,
        avg_karma_per_item,
    }
}

/// Detect the burst-then-silence timing pattern of scripted posting.
///
/// Needs more than 5 timestamped events; with fewer, or with a zero mean
/// gap (all events share a timestamp), there is no evidence and the
/// score is 0.0.
fn detect_activity_spike(posts: &[ContentItem], comments: &[ContentItem], gap_ratio: f64) -> f64 {
    let mut times: Vec<i64> = posts
        .iter()
        .chain(comments.iter())
        .map(|item| item.created_at.timestamp())
        .collect();
    times.sort_unstable();

    if times.len() <= 5 {
        return 0.0;
    }

    let deltas: Vec<f64> = times.windows(2).map(|w| (w[1] - w[0]) as f64).collect();
    let mean_gap = deltas.iter().sum::<f64>() / deltas.len() as f64;
    if mean_gap <= 0.0 {
        return 0.0;
    }

    for pair in deltas.windows(2) {
        if pair[0] > mean_gap * gap_ratio && pair[1] < mean_gap / gap_ratio {
            return 1.0;
        }
    }

    0.0
}

/// Heuristic match against known auto-generated username shapes.
/// Intentionally coarse; a hit is a weak signal, not a verdict.
fn score_username(username: &str) -> f64 {
    if WORD_WORD_YEAR_RE.is_match(username) {
        return 0.5;
    }
    if LETTERS_THEN_DIGITS_RE.is_match(&username.to_lowercase()) {
        return 0.7;
    }

    let char_count = username.chars().count();
    let all_alphabetic = !username.is_empty() && username.chars().all(char::is_alphabetic);
    if char_count > 20 || (char_count < 4 && !all_alphabetic) {
        return 0.3;
    }

    0.0
}
