//! Centralized tuning constants for tag ranking.
//!
//! These values are calibrated for the Swedish resale market (Tradera /
//! Plick class listings). They are configuration defaults, not invariants:
//! `RankConfig` in `pricelens-pipeline` reads them and callers can override
//! every one of them per ranking call.

/// Similarity against a selected tag at or above this triggers the heaviest
/// penalty (-6). Near-duplicates of the selection add no information.
pub const SIMILARITY_HEAVY: f64 = 85.0;

/// Similarity band for the -4 penalty.
pub const SIMILARITY_STRONG: f64 = 70.0;

/// Similarity band for the -2 penalty.
pub const SIMILARITY_MODERATE: f64 = 55.0;

/// Similarity band for the -1 penalty.
pub const SIMILARITY_MILD: f64 = 40.0;

/// Rank scores are clamped to [-RANK_SCORE_LIMIT, RANK_SCORE_LIMIT].
pub const RANK_SCORE_LIMIT: i32 = 10;

/// Minimum sample size for a negative-score tag to survive the polarity cap.
pub const NEGATIVE_MIN_LISTINGS: u32 = 200;

/// A strongly negative tag (score at or below this) gets a relaxed sample
/// requirement under the polarity cap.
pub const NEGATIVE_STRONG_SCORE: f64 = -8.0;

/// Relaxed sample requirement for strongly negative tags.
pub const NEGATIVE_STRONG_MIN_LISTINGS: u32 = 50;

/// Maximum tags emitted by smart ranking under the polarity cap.
pub const MAX_RESULT_TAGS: usize = 150;

/// Of those, at most this many may carry a negative rank score.
pub const MAX_NEGATIVE_TAGS: usize = 10;

/// Negative tags allowed per bucket when spreading instead of capping.
pub const MAX_NEGATIVES_PER_BUCKET: usize = 2;

/// Rank score differences at or below this are noise for tie-breaking.
pub const SCORE_EPSILON: f64 = 0.1;

/// Price impact percentage differences at or below this are noise.
pub const IMPACT_PCT_EPSILON: f64 = 1.0;

/// Listing count differences at or below this are noise.
pub const LISTING_COUNT_EPSILON: u32 = 50;

/// Names this short or shorter are never classified as verbose variants.
pub const VERBOSE_MIN_NAME_LEN: usize = 4;

/// Two tags sharing core terms are treated as different products when both
/// median prices are known and diverge by at least this fraction.
pub const VERBOSE_PRICE_DIVERGENCE: f64 = 0.10;

/// Core product terms must be longer than this many characters.
pub const CORE_TERM_MIN_LEN: usize = 2;
