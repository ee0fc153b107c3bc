use std::fmt;

use serde::Serialize;

use pricelens_score::{thresholds, Denylist, MarketTag};

use crate::candidate_pipeline::HasRequestId;

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// How the final list should be ordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortMode {
    /// Score-driven bucketed ordering with polarity balancing.
    Smart,
    /// Pure listing-count ordering; scores are annotated but do not sort.
    ByListingCount,
}

/// How negative-score tags are balanced against positive ones in smart mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolarityPolicy {
    /// Throttle negatives by sample size and cap their share of the output.
    Cap,
    /// Keep every negative but spread them across buckets, a few per bucket.
    Spread,
    /// No polarity handling at all.
    Off,
}

/// What happens to denylisted tags in smart mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExcludedPolicy {
    /// Keep them, sorted to the very end of the list.
    Demote,
    /// Drop them from the output entirely.
    Drop,
}

/// Tuning knobs for one ranking call. Every default comes from the
/// documented constants in `pricelens_score::thresholds`; the thresholds
/// are product-tuning values, not invariants, which is why they live here
/// as configuration rather than being baked into the engine.
#[derive(Clone, Debug)]
pub struct RankConfig {
    /// Penalize candidates lexically close to an already-selected tag.
    pub apply_similarity_penalty: bool,
    pub polarity: PolarityPolicy,
    pub excluded_policy: ExcludedPolicy,
    /// Rank score differences at or below this are tie-break noise.
    pub score_epsilon: f64,
    /// Price impact percentage differences at or below this are noise.
    pub impact_epsilon: f64,
    /// Listing count differences at or below this are noise.
    pub count_epsilon: u32,
    /// Minimum sample size for a negative tag to survive `Cap`.
    pub negative_min_listings: u32,
    /// Score at or below which a negative tag gets the relaxed sample bar.
    pub negative_strong_score: f64,
    /// The relaxed sample bar for strongly negative tags.
    pub negative_strong_min_listings: u32,
    /// Output cap under `PolarityPolicy::Cap`.
    pub max_results: usize,
    /// Negative-tag cap under `PolarityPolicy::Cap`.
    pub max_negative_results: usize,
    /// Per-bucket negative cap under `PolarityPolicy::Spread`.
    pub max_negatives_per_bucket: usize,
    pub denylist: Denylist,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            apply_similarity_penalty: true,
            polarity: PolarityPolicy::Cap,
            excluded_policy: ExcludedPolicy::Demote,
            score_epsilon: thresholds::SCORE_EPSILON,
            impact_epsilon: thresholds::IMPACT_PCT_EPSILON,
            count_epsilon: thresholds::LISTING_COUNT_EPSILON,
            negative_min_listings: thresholds::NEGATIVE_MIN_LISTINGS,
            negative_strong_score: thresholds::NEGATIVE_STRONG_SCORE,
            negative_strong_min_listings: thresholds::NEGATIVE_STRONG_MIN_LISTINGS,
            max_results: thresholds::MAX_RESULT_TAGS,
            max_negative_results: thresholds::MAX_NEGATIVE_TAGS,
            max_negatives_per_bucket: thresholds::MAX_NEGATIVES_PER_BUCKET,
            denylist: Denylist::default(),
        }
    }
}

/// One ranking request from the rendering layer.
#[derive(Clone, Debug)]
pub struct RankQuery {
    pub request_id: String,
    /// The brand the user is browsing; informational only.
    pub brand: String,
    /// Names of the user's committed (included) tags. The selection store
    /// guarantees these never overlap the excluded set.
    pub selected_tags: Vec<String>,
    /// Baseline price label as shown in the UI, e.g. "1 249 kr".
    pub baseline_price_label: String,
    pub sort_mode: SortMode,
    pub config: RankConfig,
}

impl RankQuery {
    pub fn new(brand: &str, baseline_price_label: &str) -> Self {
        Self {
            request_id: String::new(),
            brand: brand.to_string(),
            selected_tags: Vec::new(),
            baseline_price_label: baseline_price_label.to_string(),
            sort_mode: SortMode::Smart,
            config: RankConfig::default(),
        }
    }
}

impl HasRequestId for RankQuery {
    fn request_id(&self) -> &str {
        &self.request_id
    }
}

// ---------------------------------------------------------------------------
// Candidate types
// ---------------------------------------------------------------------------

/// A tag's relation to the user's current selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TagState {
    Included,
    Excluded,
    Unselected,
}

/// Display category label, a pure function of the rank score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ScoreColor {
    StrongPositive,
    Positive,
    MildPositive,
    Neutral,
    MildNegative,
    Negative,
    StrongNegative,
}

impl ScoreColor {
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            ScoreColor::StrongPositive
        } else if score >= 5.0 {
            ScoreColor::Positive
        } else if score >= 2.0 {
            ScoreColor::MildPositive
        } else if score >= -1.0 {
            ScoreColor::Neutral
        } else if score >= -4.0 {
            ScoreColor::MildNegative
        } else if score >= -7.0 {
            ScoreColor::Negative
        } else {
            ScoreColor::StrongNegative
        }
    }
}

impl fmt::Display for ScoreColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreColor::StrongPositive => write!(f, "strong-positive"),
            ScoreColor::Positive => write!(f, "positive"),
            ScoreColor::MildPositive => write!(f, "mild-positive"),
            ScoreColor::Neutral => write!(f, "neutral"),
            ScoreColor::MildNegative => write!(f, "mild-negative"),
            ScoreColor::Negative => write!(f, "negative"),
            ScoreColor::StrongNegative => write!(f, "strong-negative"),
        }
    }
}

/// A candidate tag flowing through the pipeline.
///
/// The market fields come from the upstream snapshot; everything else is
/// derived by the engine. Derived fields are `Option` until the stage
/// responsible for them has run. The engine constructs fresh `Tag` values
/// and never mutates caller-owned data.
#[derive(Clone, Debug, Serialize)]
pub struct Tag {
    pub name: String,
    pub state: TagState,
    pub listing_count: u32,
    /// Median price over listings with this tag; 0 means unknown.
    pub median_price: f64,
    pub p25_price: f64,
    pub p75_price: f64,

    // Derived fields (populated by scorers)
    /// Composite rank score, always within [-10, 10] once scored.
    pub rank_score: Option<f64>,
    /// Absolute price deviation from the baseline in percent. Used only
    /// for tie-breaking, never for the primary order.
    pub price_impact_pct: Option<f64>,

    // Display annotations (populated post-selection)
    pub color: Option<ScoreColor>,
    pub display: Option<String>,
}

impl Tag {
    /// Build an unscored candidate from an upstream market record.
    pub fn from_market(market: &MarketTag) -> Self {
        Self {
            name: market.name.clone(),
            listing_count: market.listing_count,
            median_price: market.median_price,
            p25_price: market.p25_price,
            p75_price: market.p75_price,
            ..Tag::default()
        }
    }

    /// Project back to the market record shape the classifier operates on.
    pub fn to_market_tag(&self) -> MarketTag {
        MarketTag {
            name: self.name.clone(),
            listing_count: self.listing_count,
            median_price: self.median_price,
            p25_price: self.p25_price,
            p75_price: self.p75_price,
        }
    }

    /// Case-insensitive identity key.
    pub fn key(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

impl Default for Tag {
    fn default() -> Self {
        Self {
            name: String::new(),
            state: TagState::Unselected,
            listing_count: 0,
            median_price: 0.0,
            p25_price: 0.0,
            p75_price: 0.0,
            rank_score: None,
            price_impact_pct: None,
            color: None,
            display: None,
        }
    }
}
