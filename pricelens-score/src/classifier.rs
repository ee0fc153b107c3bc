//! Tag classification: noise exclusion and verbose-variant detection.
//!
//! Two independent, total predicates. Exclusion asks "is this tag worth
//! showing at all"; verbosity asks "is this a longer near-duplicate of a
//! tag we already have" ("air jordan 1" next to "jordan 1"). Verbose tags
//! are demoted, never dropped, so nothing the market knows is lost.

use std::collections::HashSet;

use crate::denylist::Denylist;
use crate::record::MarketTag;
use crate::thresholds;

/// Whether a tag name is denylisted noise.
pub fn is_excluded(name: &str, denylist: &Denylist) -> bool {
    denylist.matches(name)
}

/// Extract the core product terms from a tag name: lower-case, split on
/// whitespace, hyphens and underscores, drop short and purely numeric
/// tokens. "air jordan 1" => {"air", "jordan"}.
fn core_terms(name: &str) -> HashSet<String> {
    name.to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|t| t.chars().count() > thresholds::CORE_TERM_MIN_LEN)
        .filter(|t| !t.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .collect()
}

/// Whether two tags describe the same product family.
///
/// They do when their core term sets intersect, unless both median prices
/// are known and diverge by at least 10% relative to the larger one: same
/// words at clearly different price points means different products
/// ("jordan 1" vs "jordan 1 retro high og"). An unknown price on either
/// side assumes relatedness.
pub fn shares_core_product(a: &MarketTag, b: &MarketTag) -> bool {
    let terms_a = core_terms(&a.name);
    let terms_b = core_terms(&b.name);
    if terms_a.is_disjoint(&terms_b) {
        return false;
    }

    if a.median_price > 0.0 && b.median_price > 0.0 {
        let larger = a.median_price.max(b.median_price);
        let divergence = (a.median_price - b.median_price).abs() / larger;
        if divergence >= thresholds::VERBOSE_PRICE_DIVERGENCE {
            return false;
        }
    }

    true
}

/// Whether `tag` is a verbose variant: longer than the minimum name length
/// and shadowed by a strictly shorter tag for the same product family.
pub fn is_verbose(tag: &MarketTag, all_tags: &[MarketTag]) -> bool {
    if tag.name.chars().count() <= thresholds::VERBOSE_MIN_NAME_LEN {
        return false;
    }

    all_tags.iter().any(|other| {
        !other.name.eq_ignore_ascii_case(&tag.name)
            && other.name.chars().count() < tag.name.chars().count()
            && shares_core_product(tag, other)
    })
}
