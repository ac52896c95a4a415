// Score classification — bins, labels, red flags, recommendations.
//
// A stateless mapping from the 0-100 score to an ordered verdict with
// fixed confidence, risk, and description strings, plus the per-signal
// red-flag sentences shown in reports.

use serde::{Deserialize, Serialize};

use crate::scoring::features::FeatureSet;

/// Classification bin boundaries. Lower bounds are inclusive, so a score
/// exactly on a boundary lands in the upper bin.
#[derive(Debug, Clone)]
pub struct VerdictBins {
    /// At or above this, at least PossiblySuspicious (default 30.0).
    pub suspicious: f64,
    /// At or above this, at least LikelyBot (default 50.0).
    pub likely_bot: f64,
    /// At or above this, AlmostCertainlyBot (default 70.0).
    pub almost_certain: f64,
}

impl Default for VerdictBins {
    fn default() -> Self {
        Self {
            suspicious: 30.0,
            likely_bot: 50.0,
            almost_certain: 70.0,
        }
    }
}

/// Ordered bot-likelihood verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Likely Human")]
    LikelyHuman,
    #[serde(rename = "Possibly Suspicious")]
    PossiblySuspicious,
    #[serde(rename = "Likely Bot")]
    LikelyBot,
    #[serde(rename = "Almost Certainly Bot")]
    AlmostCertainlyBot,
}

impl Verdict {
    /// Determine the verdict from a bot score (0-100).
    ///
    /// NaN fails every guard and falls through to LikelyHuman.
    pub fn from_score(score: f64, bins: &VerdictBins) -> Self {
        match score {
            s if s >= bins.almost_certain => Verdict::AlmostCertainlyBot,
            s if s >= bins.likely_bot => Verdict::LikelyBot,
            s if s >= bins.suspicious => Verdict::PossiblySuspicious,
            _ => Verdict::LikelyHuman,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::LikelyHuman => "Likely Human",
            Verdict::PossiblySuspicious => "Possibly Suspicious",
            Verdict::LikelyBot => "Likely Bot",
            Verdict::AlmostCertainlyBot => "Almost Certainly Bot",
        }
    }

    /// Confidence label attached to this verdict in reports.
    pub fn confidence(&self) -> Confidence {
        match self {
            Verdict::LikelyHuman => Confidence::High,
            Verdict::PossiblySuspicious => Confidence::Medium,
            Verdict::LikelyBot => Confidence::MediumHigh,
            Verdict::AlmostCertainlyBot => Confidence::VeryHigh,
        }
    }

    /// Operational risk attached to this verdict.
    pub fn risk_level(&self) -> RiskLevel {
        match self {
            Verdict::LikelyHuman => RiskLevel::Low,
            Verdict::PossiblySuspicious => RiskLevel::Medium,
            Verdict::LikelyBot => RiskLevel::High,
            Verdict::AlmostCertainlyBot => RiskLevel::Critical,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Verdict::LikelyHuman => "Normal user behavior patterns detected",
            Verdict::PossiblySuspicious => "Some bot-like characteristics detected",
            Verdict::LikelyBot => "Multiple bot indicators present",
            Verdict::AlmostCertainlyBot => "Strong bot behavior patterns detected",
        }
    }

    /// Actionable recommendation, a function of the verdict alone.
    pub fn recommendation(&self) -> &'static str {
        match self {
            Verdict::LikelyHuman => "Account appears legitimate. No action needed.",
            Verdict::PossiblySuspicious => {
                "Monitor account activity. Consider manual review if behavior persists."
            }
            Verdict::LikelyBot => {
                "High probability of bot activity. Recommend flagging for review and possible restrictions."
            }
            Verdict::AlmostCertainlyBot => {
                "Very high probability of bot activity. Immediate action recommended: ban or severe restrictions."
            }
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How confident the heuristic is in its verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    #[serde(rename = "Medium-High")]
    MediumHigh,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "High",
            Confidence::Medium => "Medium",
            Confidence::MediumHigh => "Medium-High",
            Confidence::VeryHigh => "Very High",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Operational risk level attached to a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One human-readable sentence per triggered indicator, with a fixed
/// fallback line when nothing triggered.
pub fn red_flags(features: &FeatureSet) -> Vec<String> {
    let mut flags = Vec::new();

    if features.age_days < 90.0 {
        flags.push(format!(
            "Very new account ({:.1} days old)",
            features.age_days
        ));
    }
    if features.subreddit_count < 3 {
        flags.push(format!(
            "Limited subreddit activity (only {} subreddit(s))",
            features.subreddit_count
        ));
    }
    if features.activity_spike_score > 0.0 {
        flags.push("Unusual activity spikes detected".to_string());
    }
    if features.duplicate_content_score > 0.3 {
        flags.push(format!(
            "High duplicate content ({:.1}% similarity)",
            features.duplicate_content_score * 100.0
        ));
    }
    if features.posts_per_day_score > 0.7 {
        let per_day = (features.total_posts + features.total_comments) as f64
            / features.age_days.max(1.0);
        flags.push(format!(
            "Extremely high posting frequency ({:.1} posts/day)",
            per_day
        ));
    }
    if features.avg_karma_per_item < 2.0 {
        flags.push(format!(
            "Very low engagement (avg {:.2} karma per post)",
            features.avg_karma_per_item
        ));
    }
    if features.username_suspicious_score > 0.5 {
        flags.push("Username follows auto-generated pattern".to_string());
    }

    if flags.is_empty() {
        flags.push("No major red flags detected".to_string());
    }

    flags
}
