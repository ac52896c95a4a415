// Unit tests for score classification and output helpers.
//
// Tests isolated pure functions: Verdict::from_score boundary conditions,
// the fixed per-verdict label set, red flag triggers with their exact
// report strings, custom score weights, and truncate_chars UTF-8 safety.

use redflag::output::truncate_chars;
use redflag::scoring::classify::{red_flags, Confidence, RiskLevel, Verdict, VerdictBins};
use redflag::scoring::features::FeatureSet;
use redflag::scoring::score::{compute_bot_score, ScoreWeights};

/// Feature set that triggers nothing, with overrides applied on top.
fn features_with(f: impl FnOnce(&mut FeatureSet)) -> FeatureSet {
    let mut features = FeatureSet {
        age_days: 1_000.0,
        age_score: 0.0,
        comment_to_post_score: 0.0,
        subreddit_count: 12,
        subreddit_diversity_score: 0.0,
        activity_spike_score: 0.0,
        post_to_karma_score: 0.0,
        duplicate_content_score: 0.0,
        posts_per_day_score: 0.0,
        username_suspicious_score: 0.0,
        low_karma_score: 0.0,
        unverified_score: 0.0,
        total_posts: 20,
        total_comments: 30,
        total_karma: 10_000,
        avg_karma_per_item: 200.0,
    };
    f(&mut features);
    features
}

// ============================================================
// Verdict::from_score — boundary conditions
// ============================================================

#[test]
fn verdict_exact_boundary_almost_certain() {
    let bins = VerdictBins::default();
    assert_eq!(Verdict::from_score(70.0, &bins), Verdict::AlmostCertainlyBot);
}

#[test]
fn verdict_just_below_almost_certain() {
    let bins = VerdictBins::default();
    assert_eq!(Verdict::from_score(69.999, &bins), Verdict::LikelyBot);
}

#[test]
fn verdict_exact_boundary_likely_bot() {
    let bins = VerdictBins::default();
    assert_eq!(Verdict::from_score(50.0, &bins), Verdict::LikelyBot);
}

#[test]
fn verdict_just_below_likely_bot() {
    let bins = VerdictBins::default();
    assert_eq!(Verdict::from_score(49.999, &bins), Verdict::PossiblySuspicious);
}

#[test]
fn verdict_exact_boundary_suspicious() {
    let bins = VerdictBins::default();
    assert_eq!(Verdict::from_score(30.0, &bins), Verdict::PossiblySuspicious);
}

#[test]
fn verdict_just_below_suspicious() {
    let bins = VerdictBins::default();
    assert_eq!(Verdict::from_score(29.999, &bins), Verdict::LikelyHuman);
}

#[test]
fn verdict_zero() {
    let bins = VerdictBins::default();
    assert_eq!(Verdict::from_score(0.0, &bins), Verdict::LikelyHuman);
}

#[test]
fn verdict_negative() {
    let bins = VerdictBins::default();
    assert_eq!(Verdict::from_score(-5.0, &bins), Verdict::LikelyHuman);
}

#[test]
fn verdict_very_large() {
    let bins = VerdictBins::default();
    assert_eq!(Verdict::from_score(1_000.0, &bins), Verdict::AlmostCertainlyBot);
}

#[test]
fn verdict_nan_falls_to_likely_human() {
    // NaN fails all >= comparisons, so it falls through to the wildcard arm
    let bins = VerdictBins::default();
    assert_eq!(Verdict::from_score(f64::NAN, &bins), Verdict::LikelyHuman);
}

#[test]
fn verdict_custom_bins_shift_the_boundaries() {
    let bins = VerdictBins {
        suspicious: 10.0,
        likely_bot: 20.0,
        almost_certain: 40.0,
    };
    assert_eq!(Verdict::from_score(25.0, &bins), Verdict::LikelyBot);
    assert_eq!(Verdict::from_score(40.0, &bins), Verdict::AlmostCertainlyBot);
    assert_eq!(Verdict::from_score(5.0, &bins), Verdict::LikelyHuman);
}

// ============================================================
// Verdict labels — as_str, Display, serde names
// ============================================================

#[test]
fn verdict_as_str_all_variants() {
    assert_eq!(Verdict::LikelyHuman.as_str(), "Likely Human");
    assert_eq!(Verdict::PossiblySuspicious.as_str(), "Possibly Suspicious");
    assert_eq!(Verdict::LikelyBot.as_str(), "Likely Bot");
    assert_eq!(Verdict::AlmostCertainlyBot.as_str(), "Almost Certainly Bot");
}

#[test]
fn verdict_display_matches_as_str() {
    for verdict in [
        Verdict::LikelyHuman,
        Verdict::PossiblySuspicious,
        Verdict::LikelyBot,
        Verdict::AlmostCertainlyBot,
    ] {
        assert_eq!(verdict.to_string(), verdict.as_str());
    }
}

#[test]
fn verdict_serializes_to_its_display_name() {
    for verdict in [
        Verdict::LikelyHuman,
        Verdict::PossiblySuspicious,
        Verdict::LikelyBot,
        Verdict::AlmostCertainlyBot,
    ] {
        let json = serde_json::to_value(verdict).unwrap();
        assert_eq!(json, serde_json::Value::String(verdict.as_str().to_string()));
    }
}

#[test]
fn verdict_round_trip_score_to_string() {
    let bins = VerdictBins::default();
    let cases = [
        (10.0, "Likely Human"),
        (35.0, "Possibly Suspicious"),
        (60.0, "Likely Bot"),
        (85.0, "Almost Certainly Bot"),
    ];
    for (score, expected_str) in cases {
        let verdict = Verdict::from_score(score, &bins);
        assert_eq!(
            verdict.as_str(),
            expected_str,
            "Score {score} should map to {expected_str}"
        );
    }
}

// ============================================================
// Per-verdict attributes — confidence, risk, wording
// ============================================================

#[test]
fn confidence_mapping_per_verdict() {
    assert_eq!(Verdict::LikelyHuman.confidence(), Confidence::High);
    assert_eq!(Verdict::PossiblySuspicious.confidence(), Confidence::Medium);
    assert_eq!(Verdict::LikelyBot.confidence(), Confidence::MediumHigh);
    assert_eq!(Verdict::AlmostCertainlyBot.confidence(), Confidence::VeryHigh);
}

#[test]
fn confidence_labels() {
    assert_eq!(Confidence::MediumHigh.as_str(), "Medium-High");
    assert_eq!(Confidence::VeryHigh.as_str(), "Very High");
}

#[test]
fn risk_escalates_with_the_verdict() {
    assert_eq!(Verdict::LikelyHuman.risk_level(), RiskLevel::Low);
    assert_eq!(Verdict::PossiblySuspicious.risk_level(), RiskLevel::Medium);
    assert_eq!(Verdict::LikelyBot.risk_level(), RiskLevel::High);
    assert_eq!(Verdict::AlmostCertainlyBot.risk_level(), RiskLevel::Critical);
}

#[test]
fn descriptions_are_fixed_per_verdict() {
    assert_eq!(
        Verdict::LikelyHuman.description(),
        "Normal user behavior patterns detected"
    );
    assert_eq!(
        Verdict::AlmostCertainlyBot.description(),
        "Strong bot behavior patterns detected"
    );
}

#[test]
fn recommendations_are_fixed_per_verdict() {
    assert_eq!(
        Verdict::LikelyHuman.recommendation(),
        "Account appears legitimate. No action needed."
    );
    assert_eq!(
        Verdict::AlmostCertainlyBot.recommendation(),
        "Very high probability of bot activity. Immediate action recommended: ban or severe restrictions."
    );
}

// ============================================================
// red_flags — triggers and exact wording
// ============================================================

#[test]
fn no_triggers_gives_the_fallback_line() {
    let flags = red_flags(&features_with(|_| {}));
    assert_eq!(flags, vec!["No major red flags detected".to_string()]);
}

#[test]
fn young_account_flag() {
    let flags = red_flags(&features_with(|f| f.age_days = 45.0));
    assert_eq!(flags, vec!["Very new account (45.0 days old)".to_string()]);
}

#[test]
fn age_of_exactly_ninety_days_is_not_flagged() {
    let flags = red_flags(&features_with(|f| f.age_days = 90.0));
    assert_eq!(flags, vec!["No major red flags detected".to_string()]);
}

#[test]
fn narrow_subreddit_flag() {
    let flags = red_flags(&features_with(|f| f.subreddit_count = 2));
    assert_eq!(
        flags,
        vec!["Limited subreddit activity (only 2 subreddit(s))".to_string()]
    );
}

#[test]
fn three_subreddits_are_enough() {
    let flags = red_flags(&features_with(|f| f.subreddit_count = 3));
    assert_eq!(flags, vec!["No major red flags detected".to_string()]);
}

#[test]
fn spike_flag() {
    let flags = red_flags(&features_with(|f| f.activity_spike_score = 1.0));
    assert_eq!(flags, vec!["Unusual activity spikes detected".to_string()]);
}

#[test]
fn duplicate_content_flag_reports_a_percentage() {
    let flags = red_flags(&features_with(|f| f.duplicate_content_score = 0.75));
    assert_eq!(
        flags,
        vec!["High duplicate content (75.0% similarity)".to_string()]
    );
}

#[test]
fn duplicate_ratio_of_thirty_percent_is_tolerated() {
    let flags = red_flags(&features_with(|f| f.duplicate_content_score = 0.3));
    assert_eq!(flags, vec!["No major red flags detected".to_string()]);
}

#[test]
fn posting_frequency_flag_reports_items_per_day() {
    let flags = red_flags(&features_with(|f| {
        f.posts_per_day_score = 0.8;
        f.age_days = 10.0;
        f.total_posts = 100;
        f.total_comments = 100;
    }));
    // 200 items over 10 days
    assert!(
        flags.contains(&"Extremely high posting frequency (20.0 posts/day)".to_string()),
        "got {flags:?}"
    );
}

#[test]
fn low_engagement_flag_reports_the_average() {
    let flags = red_flags(&features_with(|f| f.avg_karma_per_item = 0.5));
    assert_eq!(
        flags,
        vec!["Very low engagement (avg 0.50 karma per post)".to_string()]
    );
}

#[test]
fn username_flag_requires_the_strong_pattern() {
    // 0.5 (word_word2024 shape) is a weak hit and stays quiet
    let weak = red_flags(&features_with(|f| f.username_suspicious_score = 0.5));
    assert_eq!(weak, vec!["No major red flags detected".to_string()]);

    let strong = red_flags(&features_with(|f| f.username_suspicious_score = 0.7));
    assert_eq!(
        strong,
        vec!["Username follows auto-generated pattern".to_string()]
    );
}

#[test]
fn multiple_triggers_keep_a_stable_order() {
    let flags = red_flags(&features_with(|f| {
        f.age_days = 5.0;
        f.subreddit_count = 1;
        f.duplicate_content_score = 0.9;
    }));
    assert_eq!(flags.len(), 3);
    assert_eq!(flags[0], "Very new account (5.0 days old)");
    assert_eq!(flags[1], "Limited subreddit activity (only 1 subreddit(s))");
    assert_eq!(flags[2], "High duplicate content (90.0% similarity)");
}

// ============================================================
// compute_bot_score — custom weights
// ============================================================

#[test]
fn zeroed_weights_produce_zero() {
    let weights = ScoreWeights {
        age_points: 0.0,
        age_decay_days: 90.0,
        activity_cap: 0.0,
        spike_points: 0.0,
        frequency_points: 0.0,
        username_points: 0.0,
        content_cap: 0.0,
        duplicate_points: 0.0,
        low_karma_points: 0.0,
        engagement_points: 0.0,
        diversity_cap: 0.0,
        subreddit_points: 0.0,
        comment_ratio_points: 0.0,
        unverified_points: 0.0,
    };
    let saturated = features_with(|f| {
        f.age_days = 0.0;
        f.activity_spike_score = 1.0;
        f.duplicate_content_score = 1.0;
        f.post_to_karma_score = 1.0;
        f.subreddit_diversity_score = 1.0;
        f.unverified_score = 1.0;
    });
    let (score, _) = compute_bot_score(&saturated, &weights);
    assert_eq!(score, 0.0);
    assert_eq!(
        Verdict::from_score(score, &VerdictBins::default()),
        Verdict::LikelyHuman
    );
}

#[test]
fn custom_age_decay_changes_the_curve() {
    let weights = ScoreWeights {
        age_decay_days: 45.0,
        ..ScoreWeights::default()
    };
    let (_, breakdown) = compute_bot_score(&features_with(|f| f.age_days = 45.0), &weights);
    // 20 * exp(-45/45) = 20 * exp(-1) ~ 7.36
    assert!(
        (breakdown.account_age - 7.36).abs() < 0.01,
        "got {}",
        breakdown.account_age
    );
}

#[test]
fn custom_content_cap_limits_the_bucket() {
    let weights = ScoreWeights {
        content_cap: 10.0,
        ..ScoreWeights::default()
    };
    let (_, breakdown) = compute_bot_score(
        &features_with(|f| {
            // Raw: 15 * 1.0 + 5 * 1.0 = 20, capped at 10
            f.duplicate_content_score = 1.0;
            f.low_karma_score = 1.0;
        }),
        &weights,
    );
    assert!(
        (breakdown.content_quality - 10.0).abs() < 0.01,
        "got {}",
        breakdown.content_quality
    );
}

#[test]
fn raising_any_single_signal_never_lowers_the_score() {
    let weights = ScoreWeights::default();
    let baseline = features_with(|f| {
        f.age_days = 300.0;
        f.activity_spike_score = 0.2;
        f.posts_per_day_score = 0.2;
        f.username_suspicious_score = 0.2;
        f.duplicate_content_score = 0.2;
        f.low_karma_score = 0.2;
        f.post_to_karma_score = 0.2;
        f.subreddit_diversity_score = 0.2;
        f.comment_to_post_score = 0.2;
        f.unverified_score = 0.2;
    });
    let (base_score, _) = compute_bot_score(&baseline, &weights);

    let raises: [(&str, fn(&mut FeatureSet)); 10] = [
        ("activity_spike", |f| f.activity_spike_score = 0.9),
        ("posts_per_day", |f| f.posts_per_day_score = 0.9),
        ("username", |f| f.username_suspicious_score = 0.9),
        ("duplicate_content", |f| f.duplicate_content_score = 0.9),
        ("low_karma", |f| f.low_karma_score = 0.9),
        ("post_to_karma", |f| f.post_to_karma_score = 0.9),
        ("subreddit_diversity", |f| f.subreddit_diversity_score = 0.9),
        ("comment_to_post", |f| f.comment_to_post_score = 0.9),
        ("unverified", |f| f.unverified_score = 0.9),
        ("younger_account", |f| f.age_days = 30.0),
    ];

    for (name, raise) in raises {
        let mut raised = baseline.clone();
        raise(&mut raised);
        let (score, _) = compute_bot_score(&raised, &weights);
        assert!(
            score >= base_score,
            "raising {name} dropped the score: {base_score} -> {score}"
        );
    }
}

#[test]
fn default_weights_match_documented_values() {
    let w = ScoreWeights::default();
    assert_eq!(w.age_points, 20.0);
    assert_eq!(w.age_decay_days, 90.0);
    assert_eq!(w.activity_cap, 20.0);
    assert_eq!(w.spike_points, 10.0);
    assert_eq!(w.frequency_points, 10.0);
    assert_eq!(w.username_points, 5.0);
    assert_eq!(w.content_cap, 20.0);
    assert_eq!(w.duplicate_points, 15.0);
    assert_eq!(w.low_karma_points, 5.0);
    assert_eq!(w.engagement_points, 20.0);
    assert_eq!(w.diversity_cap, 20.0);
    assert_eq!(w.subreddit_points, 15.0);
    assert_eq!(w.comment_ratio_points, 5.0);
    assert_eq!(w.unverified_points, 5.0);
}

#[test]
fn default_bins_match_documented_values() {
    let bins = VerdictBins::default();
    assert_eq!(bins.suspicious, 30.0);
    assert_eq!(bins.likely_bot, 50.0);
    assert_eq!(bins.almost_certain, 70.0);
}

// ============================================================
// truncate_chars — UTF-8 safe truncation
// ============================================================

#[test]
fn truncate_empty_string() {
    assert_eq!(truncate_chars("", 10), "");
}

#[test]
fn truncate_within_limit() {
    assert_eq!(truncate_chars("short", 10), "short");
}

#[test]
fn truncate_exactly_at_limit() {
    assert_eq!(truncate_chars("short", 5), "short");
}

#[test]
fn truncate_one_over_limit() {
    assert_eq!(truncate_chars("longer", 5), "longe...");
}

#[test]
fn truncate_max_zero_non_empty() {
    // 0 chars taken + "..." appended
    assert_eq!(truncate_chars("text", 0), "...");
}

#[test]
fn truncate_emoji_safe() {
    // The emoji is 1 char but 4 bytes; cutting after it must not panic
    let text = "status 🤖 ok";
    assert_eq!(text.chars().count(), 11);
    assert_eq!(truncate_chars(text, 8), "status 🤖...");
}

#[test]
fn truncate_accented_usernames() {
    let text = "rené_the_réviewer";
    assert_eq!(truncate_chars(text, 4), "rené...");
}

#[test]
fn truncate_cjk_characters() {
    let text = "日本語テスト";
    assert_eq!(truncate_chars(text, 3), "日本語...");
}

#[test]
fn truncate_long_error_message() {
    let text = "e".repeat(200);
    let result = truncate_chars(&text, 48);
    assert_eq!(result.chars().count(), 51); // 48 + "..."
    assert!(result.ends_with("..."));
}
