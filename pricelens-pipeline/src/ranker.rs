//! The rank aggregator: a flat list of market tags in, an ordered,
//! deduplicated, polarity-balanced display list out.
//!
//! Everything here is pure and total. Numeric parsing failures degrade to
//! zero, empty input produces empty output, and the input slices are never
//! mutated: every returned `Tag` is a fresh record. An all-neutral result
//! is the caller's cue to check its baseline, not an error.

use std::cmp::Ordering;
use std::collections::HashMap;

use pricelens_score::{
    is_excluded, is_verbose, parse_price_label, percent_change, price_impact,
    similarity_penalty, thresholds, MarketTag,
};

use crate::display;
use crate::types::{ExcludedPolicy, PolarityPolicy, RankConfig, ScoreColor, SortMode, Tag, TagState};

/// Number of score-magnitude buckets: S, A, B, C, D.
const BUCKET_COUNT: usize = 5;

/// Rank a candidate tag list against the current selection and baseline.
///
/// This is the engine's whole contract in one call: dedup, composite
/// scoring, mode-dependent ordering, display annotation. `selected` are
/// the user's committed tags (the selection store guarantees they do not
/// overlap the excluded set); only their names matter here.
pub fn rank_tags(
    candidates: &[MarketTag],
    selected: &[MarketTag],
    baseline_price_label: &str,
    sort_mode: SortMode,
    config: &RankConfig,
) -> Vec<Tag> {
    let baseline = parse_price_label(baseline_price_label);
    let selected_names: Vec<&str> = selected.iter().map(|t| t.name.as_str()).collect();

    let tags: Vec<Tag> = candidates
        .iter()
        .map(|market| {
            let mut tag = Tag::from_market(market);
            if selected_names
                .iter()
                .any(|s| s.trim().to_lowercase() == tag.key())
            {
                tag.state = TagState::Included;
            }
            tag
        })
        .collect();

    let (tags, _shadowed) = dedup_tags(tags);

    let scored: Vec<Tag> = tags
        .into_iter()
        .map(|tag| score_tag(tag, baseline, &selected_names, config))
        .collect();

    let ordered = match sort_mode {
        SortMode::Smart => order_smart(scored, config),
        SortMode::ByListingCount => order_by_listing_count(scored, config),
    };

    ordered.iter().map(annotate).collect()
}

/// Clamp a composite score to the legal rank range.
pub fn clamp_score(score: f64) -> f64 {
    let limit = thresholds::RANK_SCORE_LIMIT as f64;
    score.clamp(-limit, limit)
}

/// Compute the composite score fields for one tag.
///
/// `rank_score = clamp(price impact + similarity penalty)`; the penalty
/// only applies when the config asks for it. `price_impact_pct` is the
/// absolute deviation, kept separately for tie-breaking.
pub fn score_tag(tag: Tag, baseline: f64, selected_names: &[&str], config: &RankConfig) -> Tag {
    let impact = price_impact(tag.median_price, baseline);
    // An already-included tag is a 100% match against itself; the penalty
    // only targets lookalikes the user has not committed to.
    let penalty = if config.apply_similarity_penalty && tag.state != TagState::Included {
        similarity_penalty(&tag.name, selected_names)
    } else {
        0
    };
    let pct = if baseline > 0.0 {
        percent_change(tag.median_price, baseline).abs()
    } else {
        0.0
    };

    Tag {
        rank_score: Some(clamp_score((impact + penalty) as f64)),
        price_impact_pct: Some(pct),
        ..tag
    }
}

/// Deduplicate by case-insensitive name, preserving first-seen order.
/// When the same name appears twice the record with the larger market
/// sample wins; the shadowed record goes in the second list.
pub fn dedup_tags(tags: Vec<Tag>) -> (Vec<Tag>, Vec<Tag>) {
    let mut kept: Vec<Tag> = Vec::with_capacity(tags.len());
    let mut shadowed: Vec<Tag> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for tag in tags {
        match index.get(&tag.key()) {
            Some(&i) => {
                if tag.listing_count > kept[i].listing_count {
                    shadowed.push(std::mem::replace(&mut kept[i], tag));
                } else {
                    shadowed.push(tag);
                }
            }
            None => {
                index.insert(tag.key(), kept.len());
                kept.push(tag);
            }
        }
    }

    (kept, shadowed)
}

/// Listing-count ordering: denylisted tags are dropped outright, the rest
/// sort by sample size descending with an alphabetical tie-break. Scores
/// stay annotated but play no part in the order.
pub fn order_by_listing_count(tags: Vec<Tag>, config: &RankConfig) -> Vec<Tag> {
    let mut kept: Vec<Tag> = tags
        .into_iter()
        .filter(|t| !is_excluded(&t.name, &config.denylist))
        .collect();
    kept.sort_by(|a, b| {
        b.listing_count
            .cmp(&a.listing_count)
            .then_with(|| a.key().cmp(&b.key()))
    });
    kept
}

/// Smart ordering: polarity policy, classifier partition, magnitude
/// buckets, epsilon tie-breaks, then S A B C D + verbose + excluded.
pub fn order_smart(tags: Vec<Tag>, config: &RankConfig) -> Vec<Tag> {
    let survivors = match config.polarity {
        PolarityPolicy::Cap => apply_polarity_cap(tags, config),
        PolarityPolicy::Spread | PolarityPolicy::Off => tags,
    };

    // The verbosity test needs the whole surviving set as context.
    let market_view: Vec<MarketTag> = survivors.iter().map(Tag::to_market_tag).collect();

    let mut excluded: Vec<Tag> = Vec::new();
    let mut verbose: Vec<Tag> = Vec::new();
    let mut normal: Vec<Tag> = Vec::new();
    for (i, tag) in survivors.into_iter().enumerate() {
        if is_excluded(&tag.name, &config.denylist) {
            excluded.push(tag);
        } else if is_verbose(&market_view[i], &market_view) {
            verbose.push(tag);
        } else {
            normal.push(tag);
        }
    }

    let spread_negatives = config.polarity == PolarityPolicy::Spread;
    let mut buckets: [Vec<Tag>; BUCKET_COUNT] = Default::default();
    let mut negatives_in = [0usize; BUCKET_COUNT];

    for tag in normal {
        let score = tag.rank_score.unwrap_or(0.0);
        let natural = bucket_index(score.abs());
        let target = if spread_negatives && score < 0.0 {
            // Natural bucket first; when it already holds its share of
            // negatives, demote toward D. D takes the overflow.
            let idx = (natural..BUCKET_COUNT)
                .find(|&i| negatives_in[i] < config.max_negatives_per_bucket)
                .unwrap_or(BUCKET_COUNT - 1);
            negatives_in[idx] += 1;
            idx
        } else {
            natural
        };
        buckets[target].push(tag);
    }

    for bucket in &mut buckets {
        bucket.sort_by(|a, b| compare_ranked(a, b, config));
    }
    verbose.sort_by(|a, b| compare_ranked(a, b, config));
    excluded.sort_by(|a, b| compare_ranked(a, b, config));

    let mut ordered: Vec<Tag> = buckets.into_iter().flatten().collect();
    ordered.extend(verbose);
    if config.excluded_policy == ExcludedPolicy::Demote {
        ordered.extend(excluded);
    }
    ordered
}

/// Tie-break comparator used inside each bucket.
///
/// Differences below the configured epsilons are treated as noise and fall
/// through to the next criterion; the terminal tie-break prefers the
/// shorter (more canonical) name, then alphabetical order so the result is
/// a total order regardless of input order.
pub fn compare_ranked(a: &Tag, b: &Tag, config: &RankConfig) -> Ordering {
    let sa = a.rank_score.unwrap_or(0.0);
    let sb = b.rank_score.unwrap_or(0.0);
    if (sa - sb).abs() > config.score_epsilon {
        return sb.partial_cmp(&sa).unwrap_or(Ordering::Equal);
    }

    let pa = a.price_impact_pct.unwrap_or(0.0);
    let pb = b.price_impact_pct.unwrap_or(0.0);
    if (pa - pb).abs() > config.impact_epsilon {
        return pb.partial_cmp(&pa).unwrap_or(Ordering::Equal);
    }

    if a.listing_count.abs_diff(b.listing_count) > config.count_epsilon {
        return b.listing_count.cmp(&a.listing_count);
    }

    let la = a.name.chars().count();
    let lb = b.name.chars().count();
    la.cmp(&lb).then_with(|| a.key().cmp(&b.key()))
}

/// Attach the display annotations derived from the rank score.
pub fn annotate(tag: &Tag) -> Tag {
    let score = tag.rank_score.unwrap_or(0.0);
    Tag {
        color: Some(ScoreColor::from_score(score)),
        display: Some(display::display_line(tag)),
        ..tag.clone()
    }
}

/// Throttle negative-score tags and cap the output size.
///
/// Negatives survive only with a meaningful market sample, or when they
/// are strongly negative with a relaxed sample bar. At most
/// `max_negative_results` negatives make it through; positives fill the
/// remaining `max_results` slots, best first.
fn apply_polarity_cap(tags: Vec<Tag>, config: &RankConfig) -> Vec<Tag> {
    let (mut negatives, mut positives): (Vec<Tag>, Vec<Tag>) = tags
        .into_iter()
        .partition(|t| t.rank_score.unwrap_or(0.0) < 0.0);

    negatives.retain(|t| {
        t.listing_count >= config.negative_min_listings
            || (t.rank_score.unwrap_or(0.0) <= config.negative_strong_score
                && t.listing_count >= config.negative_strong_min_listings)
    });

    // Most significant negatives first: deepest score, then sample size.
    negatives.sort_by(|a, b| {
        let sa = a.rank_score.unwrap_or(0.0);
        let sb = b.rank_score.unwrap_or(0.0);
        sa.partial_cmp(&sb)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.listing_count.cmp(&a.listing_count))
    });
    negatives.truncate(config.max_negative_results.min(config.max_results));

    positives.sort_by(|a, b| {
        let sa = a.rank_score.unwrap_or(0.0);
        let sb = b.rank_score.unwrap_or(0.0);
        sb.partial_cmp(&sa)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.listing_count.cmp(&a.listing_count))
    });
    positives.truncate(config.max_results - negatives.len());

    positives.extend(negatives);
    positives
}

/// Magnitude band for a (non-negative) absolute score:
/// S(=10) A[8,10) B[5,8) C[2,5) D[0,2).
fn bucket_index(score_abs: f64) -> usize {
    if score_abs >= 10.0 {
        0
    } else if score_abs >= 8.0 {
        1
    } else if score_abs >= 5.0 {
        2
    } else if score_abs >= 2.0 {
        3
    } else {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market(name: &str, listings: u32, median: f64) -> MarketTag {
        MarketTag::new(name, listings, median)
    }

    fn scored(name: &str, listings: u32, score: f64, pct: f64) -> Tag {
        Tag {
            name: name.into(),
            listing_count: listings,
            rank_score: Some(score),
            price_impact_pct: Some(pct),
            ..Tag::default()
        }
    }

    #[test]
    fn empty_candidates_produce_empty_output() {
        let out = rank_tags(&[], &[], "1000 kr", SortMode::Smart, &RankConfig::default());
        assert!(out.is_empty());
    }

    #[test]
    fn ranking_is_deterministic() {
        let candidates = vec![
            market("gore-tex", 400, 1800.0),
            market("vintage", 2500, 1100.0),
            market("cordura", 120, 2200.0),
        ];
        let config = RankConfig::default();
        let a = rank_tags(&candidates, &[], "1000 kr", SortMode::Smart, &config);
        let b = rank_tags(&candidates, &[], "1000 kr", SortMode::Smart, &config);
        let names_a: Vec<&str> = a.iter().map(|t| t.name.as_str()).collect();
        let names_b: Vec<&str> = b.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names_a, names_b);
        assert_eq!(
            a.iter().map(|t| t.display.clone()).collect::<Vec<_>>(),
            b.iter().map(|t| t.display.clone()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn scores_are_always_clamped() {
        // Deep discount (-10) plus heavy similarity penalty (-6) must not
        // escape the [-10, 10] range.
        let config = RankConfig::default();
        let selected = vec![market("goretex", 0, 0.0)];
        let candidates = vec![market("gore-tex", 300, 100.0)];
        let out = rank_tags(&candidates, &selected, "1000 kr", SortMode::Smart, &config);
        // Capped polarity may drop it; rank via Off policy to keep it.
        let config = RankConfig {
            polarity: PolarityPolicy::Off,
            ..RankConfig::default()
        };
        let out2 = rank_tags(&candidates, &selected, "1000 kr", SortMode::Smart, &config);
        for tag in out.iter().chain(out2.iter()) {
            let score = tag.rank_score.unwrap();
            assert!((-10.0..=10.0).contains(&score), "score {} out of range", score);
            assert_eq!(score, -10.0);
        }
    }

    #[test]
    fn inputs_are_not_mutated() {
        let candidates = vec![market("gore-tex", 400, 1800.0)];
        let before = candidates[0].clone();
        let _ = rank_tags(&candidates, &[], "1000 kr", SortMode::Smart, &RankConfig::default());
        assert_eq!(candidates[0].name, before.name);
        assert_eq!(candidates[0].median_price, before.median_price);
    }

    #[test]
    fn listing_count_mode_drops_denylisted_tags() {
        let candidates = vec![market("str 42", 500, 900.0), market("vintage", 200, 1100.0)];
        let out = rank_tags(
            &candidates,
            &[],
            "1000 kr",
            SortMode::ByListingCount,
            &RankConfig::default(),
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "vintage");
    }

    #[test]
    fn listing_count_mode_sorts_by_sample_then_name() {
        let candidates = vec![
            market("bbb", 100, 1000.0),
            market("aaa", 100, 1000.0),
            market("ccc", 900, 1000.0),
        ];
        let out = rank_tags(
            &candidates,
            &[],
            "1000 kr",
            SortMode::ByListingCount,
            &RankConfig::default(),
        );
        let names: Vec<&str> = out.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["ccc", "aaa", "bbb"]);
    }

    #[test]
    fn verbose_variant_sorts_after_normal_tags() {
        // "air jordan 1" shares the core term "jordan" with the shorter
        // "jordan 1" at the same price, so it is the verbose variant.
        let candidates = vec![
            market("air jordan 1", 1000, 1000.0),
            market("jordan 1", 1200, 1000.0),
            market("vintage", 600, 1500.0),
        ];
        let out = rank_tags(&candidates, &[], "1000 kr", SortMode::Smart, &RankConfig::default());
        let names: Vec<&str> = out.iter().map(|t| t.name.as_str()).collect();
        let pos_verbose = names.iter().position(|n| *n == "air jordan 1").unwrap();
        let pos_normal = names.iter().position(|n| *n == "jordan 1").unwrap();
        let pos_vintage = names.iter().position(|n| *n == "vintage").unwrap();
        assert!(pos_verbose > pos_normal);
        assert!(pos_verbose > pos_vintage);
    }

    #[test]
    fn denylisted_tags_are_demoted_to_the_end_in_smart_mode() {
        let candidates = vec![market("str 42", 5000, 4000.0), market("vintage", 200, 1500.0)];
        let out = rank_tags(&candidates, &[], "1000 kr", SortMode::Smart, &RankConfig::default());
        assert_eq!(out.len(), 2);
        assert_eq!(out.last().unwrap().name, "str 42");
    }

    #[test]
    fn drop_policy_removes_denylisted_tags() {
        let config = RankConfig {
            excluded_policy: ExcludedPolicy::Drop,
            ..RankConfig::default()
        };
        let candidates = vec![market("str 42", 5000, 4000.0), market("vintage", 200, 1500.0)];
        let out = rank_tags(&candidates, &[], "1000 kr", SortMode::Smart, &config);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "vintage");
    }

    #[test]
    fn polarity_cap_throttles_thin_negatives() {
        // -2 score with only 80 listings: not enough sample, dropped.
        // -2 score with 300 listings: survives.
        // -10 score with 60 listings: strongly negative, relaxed bar.
        let candidates = vec![
            market("thin-cheap", 80, 700.0),
            market("solid-cheap", 300, 700.0),
            market("deep-discount", 60, 100.0),
            market("premium", 500, 3100.0),
        ];
        let out = rank_tags(&candidates, &[], "1000 kr", SortMode::Smart, &RankConfig::default());
        let names: Vec<&str> = out.iter().map(|t| t.name.as_str()).collect();
        assert!(!names.contains(&"thin-cheap"));
        // Magnitude bucketing: the |10| discount takes the S bucket ahead
        // of the +8 premium; the shallow -2 lands in C behind it.
        assert_eq!(names, vec!["deep-discount", "premium", "solid-cheap"]);
    }

    #[test]
    fn polarity_cap_limits_negative_share() {
        let mut candidates: Vec<MarketTag> = Vec::new();
        for i in 0..30 {
            // All at -85% => score -10, all with big samples.
            candidates.push(market(&format!("cheap-{:02}", i), 1000, 150.0));
        }
        for i in 0..20 {
            candidates.push(market(&format!("rich-{:02}", i), 1000, 2000.0));
        }
        let out = rank_tags(&candidates, &[], "1000 kr", SortMode::Smart, &RankConfig::default());
        let negative_count = out
            .iter()
            .filter(|t| t.rank_score.unwrap_or(0.0) < 0.0)
            .count();
        assert_eq!(negative_count, 10);
        assert_eq!(out.len(), 30);
    }

    #[test]
    fn cap_mode_limits_total_output() {
        let candidates: Vec<MarketTag> = (0..400)
            .map(|i| market(&format!("tag-{:03}", i), 100 + i, 1000.0 + i as f64))
            .collect();
        let out = rank_tags(&candidates, &[], "1000 kr", SortMode::Smart, &RankConfig::default());
        assert!(out.len() <= 150, "got {}", out.len());
    }

    #[test]
    fn spread_mode_caps_negatives_per_bucket() {
        let config = RankConfig {
            polarity: PolarityPolicy::Spread,
            ..RankConfig::default()
        };
        // Five deep discounts all landing in the S band (|score| = 10).
        let candidates: Vec<MarketTag> = (0..5)
            .map(|i| market(&format!("cheap-{}", i), 1000 + i, 100.0))
            .collect();
        let scored: Vec<Tag> = candidates
            .iter()
            .map(|m| score_tag(Tag::from_market(m), 1000.0, &[], &config))
            .collect();
        let out = order_smart(scored, &config);
        assert_eq!(out.len(), 5);
        // Two land in S, two demote to A, one to B. Demotion never
        // reorders among equals, so all five survive in stable order.
        let scores: Vec<f64> = out.iter().map(|t| t.rank_score.unwrap()).collect();
        assert!(scores.iter().all(|s| *s == -10.0));
    }

    #[test]
    fn duplicate_names_are_collapsed_keeping_larger_sample() {
        let candidates = vec![
            market("Vintage", 200, 1100.0),
            market("vintage", 900, 1150.0),
        ];
        let out = rank_tags(&candidates, &[], "1000 kr", SortMode::Smart, &RankConfig::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].listing_count, 900);
    }

    #[test]
    fn selected_candidates_are_marked_included() {
        let candidates = vec![market("gore-tex", 400, 1800.0), market("vintage", 200, 1100.0)];
        let selected = vec![market("Gore-Tex", 0, 0.0)];
        let out = rank_tags(&candidates, &selected, "1000 kr", SortMode::Smart, &RankConfig::default());
        let gore = out.iter().find(|t| t.name == "gore-tex").unwrap();
        let vintage = out.iter().find(|t| t.name == "vintage").unwrap();
        assert_eq!(gore.state, TagState::Included);
        assert_eq!(vintage.state, TagState::Unselected);
    }

    #[test]
    fn included_tags_escape_their_own_penalty() {
        let candidates = vec![market("gore-tex", 400, 2200.0)];
        let selected = vec![market("gore-tex", 0, 0.0)];
        let out = rank_tags(&candidates, &selected, "1000 kr", SortMode::Smart, &RankConfig::default());
        // +120% deviation scores 6; a self-match penalty would drag it to 0.
        assert_eq!(out[0].rank_score, Some(6.0));
    }

    #[test]
    fn missing_baseline_yields_all_neutral_scores() {
        let candidates = vec![market("gore-tex", 400, 1800.0), market("vintage", 200, 300.0)];
        let out = rank_tags(&candidates, &[], "pris saknas", SortMode::Smart, &RankConfig::default());
        assert_eq!(out.len(), 2);
        for tag in &out {
            assert_eq!(tag.rank_score, Some(0.0));
            assert_eq!(tag.price_impact_pct, Some(0.0));
            assert_eq!(tag.color, Some(ScoreColor::Neutral));
        }
    }

    #[test]
    fn every_output_tag_is_annotated() {
        let candidates = vec![market("gore-tex", 400, 1800.0), market("str 42", 90, 500.0)];
        let out = rank_tags(&candidates, &[], "1000 kr", SortMode::Smart, &RankConfig::default());
        for tag in &out {
            assert!(tag.color.is_some(), "{} missing color", tag.name);
            assert!(tag.display.is_some(), "{} missing display", tag.name);
        }
    }

    #[test]
    fn tie_breaks_fall_through_to_shorter_name() {
        let config = RankConfig::default();
        let a = scored("jordan", 100, 6.0, 120.0);
        let b = scored("air jordan", 110, 6.0, 120.5);
        // Scores equal, impact within epsilon, counts within epsilon:
        // the shorter name wins.
        assert_eq!(compare_ranked(&a, &b, &config), Ordering::Less);
        assert_eq!(compare_ranked(&b, &a, &config), Ordering::Greater);
    }

    #[test]
    fn tie_break_uses_impact_pct_before_listing_count() {
        let config = RankConfig::default();
        let a = scored("aaa", 100, 6.0, 150.0);
        let b = scored("bbb", 9000, 6.0, 120.0);
        assert_eq!(compare_ranked(&a, &b, &config), Ordering::Less);
    }

    #[test]
    fn bucket_bands() {
        assert_eq!(bucket_index(10.0), 0);
        assert_eq!(bucket_index(9.0), 1);
        assert_eq!(bucket_index(8.0), 1);
        assert_eq!(bucket_index(7.9), 2);
        assert_eq!(bucket_index(5.0), 2);
        assert_eq!(bucket_index(4.9), 3);
        assert_eq!(bucket_index(2.0), 3);
        assert_eq!(bucket_index(1.9), 4);
        assert_eq!(bucket_index(0.0), 4);
    }

    #[test]
    fn higher_bucket_always_precedes_lower() {
        let candidates = vec![
            market("mid", 300, 1600.0),    // +60% => 4 => bucket C
            market("high", 300, 3200.0),   // +220% => 8 => bucket A
            market("low", 300, 1250.0),    // +25% => 2 => bucket C
            market("top", 300, 5400.0),    // +440% => 10 => bucket S
        ];
        let out = rank_tags(&candidates, &[], "1000 kr", SortMode::Smart, &RankConfig::default());
        let names: Vec<&str> = out.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names[0], "top");
        assert_eq!(names[1], "high");
        assert_eq!(names[2], "mid");
        assert_eq!(names[3], "low");
    }
}
