use crate::ranker;
use crate::selector::Selector;
use crate::types::{RankQuery, SortMode, Tag};

/// The ordering stage. Dispatches on the query's sort mode: smart mode
/// runs the bucketed, polarity-balanced ordering; listing-count mode
/// orders purely by market presence.
///
/// `select` is overridden wholesale; the trait's default score sort is
/// too coarse for either mode.
pub struct RankSelector;

impl Selector<RankQuery, Tag> for RankSelector {
    fn select(&self, query: &RankQuery, candidates: Vec<Tag>) -> Vec<Tag> {
        match query.sort_mode {
            SortMode::Smart => ranker::order_smart(candidates, &query.config),
            SortMode::ByListingCount => {
                ranker::order_by_listing_count(candidates, &query.config)
            }
        }
    }

    fn score(&self, candidate: &Tag) -> f64 {
        candidate.rank_score.unwrap_or(f64::NAN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn smart_mode_orders_by_bucket() {
        let selector = RankSelector;
        let query = RankQuery::new("arcteryx", "1 000 kr");
        let out = selector.select(
            &query,
            vec![
                scored("mid", 100, 4.0, 60.0),
                scored("top", 100, 9.0, 250.0),
            ],
        );
        assert_eq!(out[0].name, "top");
        assert_eq!(out[1].name, "mid");
    }

    #[test]
    fn listing_count_mode_ignores_scores() {
        let selector = RankSelector;
        let mut query = RankQuery::new("arcteryx", "1 000 kr");
        query.sort_mode = SortMode::ByListingCount;
        let out = selector.select(
            &query,
            vec![
                scored("rare", 40, 9.0, 250.0),
                scored("common", 900, 0.0, 5.0),
            ],
        );
        assert_eq!(out[0].name, "common");
        assert_eq!(out[1].name, "rare");
    }

    #[test]
    fn missing_score_sorts_last_in_default_sort() {
        let selector = RankSelector;
        let unscored = Tag {
            name: "unscored".into(),
            ..Tag::default()
        };
        let out = selector.sort(vec![unscored, scored("scored", 10, 2.0, 30.0)]);
        assert_eq!(out[0].name, "scored");
        assert_eq!(out[1].name, "unscored");
    }
}
