// Composite bot score — weighted bucket sum on a 0-100 scale.
//
// Five buckets capped at fixed point allocations (age, activity pattern,
// content quality, engagement, diversity) plus a small penalty for
// unverified accounts. Components round to two decimals and the reported
// total is the clamped sum of the rounded components, so a breakdown
// always reconciles with its score.

use serde::Serialize;

use crate::scoring::features::FeatureSet;

/// Point allocations for the composite score.
///
/// The five buckets sum to 100 at saturation; the verification penalty
/// can push the raw sum past that, which the final clamp absorbs.
#[derive(Debug, Clone)]
pub struct ScoreWeights {
    /// Maximum points from account age (default 20.0).
    pub age_points: f64,
    /// Decay constant in days for the age curve (default 90.0). A 90-day
    /// account earns ~7.4 age points; a year-old account under 0.4.
    pub age_decay_days: f64,
    /// Cap on the activity pattern bucket (default 20.0).
    pub activity_cap: f64,
    /// Flat points when a burst-then-silence spike was detected (default 10.0).
    pub spike_points: f64,
    /// Scale for the posting-frequency signal (default 10.0). Applies only
    /// when posts_per_day_score exceeds 0.5.
    pub frequency_points: f64,
    /// Scale for the suspicious-username signal (default 5.0).
    pub username_points: f64,
    /// Cap on the content quality bucket (default 20.0).
    pub content_cap: f64,
    /// Scale for the near-duplicate content ratio (default 15.0).
    pub duplicate_points: f64,
    /// Flat points when average karma per item is under 2 (default 5.0).
    pub low_karma_points: f64,
    /// Maximum points from the engagement bucket (default 20.0).
    pub engagement_points: f64,
    /// Cap on the diversity bucket (default 20.0).
    pub diversity_cap: f64,
    /// Scale for low subreddit diversity (default 15.0).
    pub subreddit_points: f64,
    /// Scale for the comment-to-post imbalance (default 5.0).
    pub comment_ratio_points: f64,
    /// Extra points for accounts without the verified-email flag (default 5.0).
    pub unverified_points: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            age_points: 20.0,
            age_decay_days: 90.0,
            activity_cap: 20.0,
            spike_points: 10.0,
            frequency_points: 10.0,
            username_points: 5.0,
            content_cap: 20.0,
            duplicate_points: 15.0,
            low_karma_points: 5.0,
            engagement_points: 20.0,
            diversity_cap: 20.0,
            subreddit_points: 15.0,
            comment_ratio_points: 5.0,
            unverified_points: 5.0,
        }
    }
}

/// Per-bucket contributions to the composite score, each rounded to two
/// decimals and capped at its allocation.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    pub account_age: f64,
    pub activity_pattern: f64,
    pub content_quality: f64,
    pub engagement: f64,
    pub diversity: f64,
    pub verification: f64,
}

impl ScoreBreakdown {
    /// The reported total: component sum clamped to [0, 100].
    pub fn total(&self) -> f64 {
        (self.account_age
            + self.activity_pattern
            + self.content_quality
            + self.engagement
            + self.diversity
            + self.verification)
            .clamp(0.0, 100.0)
    }
}

/// Combine extracted features into a bot score on the 0-100 scale.
///
/// Returns the clamped total and its per-bucket breakdown. The score is
/// monotonically non-decreasing in every individual feature.
pub fn compute_bot_score(features: &FeatureSet, weights: &ScoreWeights) -> (f64, ScoreBreakdown) {
    let account_age =
        weights.age_points * (-features.age_days / weights.age_decay_days).exp().min(1.0);

    let mut activity = 0.0;
    if features.activity_spike_score > 0.0 {
        activity += weights.spike_points;
    }
    if features.posts_per_day_score > 0.5 {
        activity += weights.frequency_points * features.posts_per_day_score;
    }
    activity += weights.username_points * features.username_suspicious_score;

    let content = weights.duplicate_points * features.duplicate_content_score
        + weights.low_karma_points * features.low_karma_score;

    let engagement = weights.engagement_points * (features.post_to_karma_score * 2.0).min(1.0);

    let diversity = weights.subreddit_points * features.subreddit_diversity_score
        + weights.comment_ratio_points * features.comment_to_post_score;

    let verification = weights.unverified_points * features.unverified_score;

    let breakdown = ScoreBreakdown {
        account_age: round2(account_age),
        activity_pattern: round2(activity.min(weights.activity_cap)),
        content_quality: round2(content.min(weights.content_cap)),
        engagement: round2(engagement),
        diversity: round2(diversity.min(weights.diversity_cap)),
        verification: round2(verification),
    };

    (round2(breakdown.total()), breakdown)
}

/// Round to two decimal places (report precision).
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
