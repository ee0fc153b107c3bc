use async_trait::async_trait;

use pricelens_score::{parse_price_label, percent_change, price_impact};

use crate::ranker::clamp_score;
use crate::scorer::Scorer;
use crate::types::{RankQuery, Tag};

/// Scores each candidate by its median price's deviation from the
/// baseline asking price. This is the base of the composite rank score;
/// later scorers adjust it.
///
/// With no parsable baseline every tag scores 0 (neutral) so ordering
/// degrades to the tie-break chain instead of failing the request.
pub struct PriceImpactScorer;

#[async_trait]
impl Scorer<RankQuery, Tag> for PriceImpactScorer {
    async fn score(&self, query: &RankQuery, candidates: &[Tag]) -> Result<Vec<Tag>, String> {
        let baseline = parse_price_label(&query.baseline_price_label);

        let scored = candidates
            .iter()
            .map(|tag| {
                let impact = price_impact(tag.median_price, baseline);
                let pct = if baseline > 0.0 {
                    percent_change(tag.median_price, baseline).abs()
                } else {
                    0.0
                };
                Tag {
                    rank_score: Some(clamp_score(impact as f64)),
                    price_impact_pct: Some(pct),
                    ..Tag::default()
                }
            })
            .collect();

        Ok(scored)
    }

    fn update(&self, candidate: &mut Tag, scored: Tag) {
        candidate.rank_score = scored.rank_score;
        candidate.price_impact_pct = scored.price_impact_pct;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str, median: f64) -> Tag {
        Tag {
            name: name.into(),
            listing_count: 100,
            median_price: median,
            ..Tag::default()
        }
    }

    #[tokio::test]
    async fn scores_follow_price_deviation() {
        let scorer = PriceImpactScorer;
        let query = RankQuery::new("arcteryx", "1 000 kr");
        let scored = scorer
            .score(&query, &[tag("premium", 3100.0), tag("cheap", 700.0)])
            .await
            .unwrap();
        // +210% deviation and -30% deviation.
        assert_eq!(scored[0].rank_score, Some(8.0));
        assert!((scored[0].price_impact_pct.unwrap() - 210.0).abs() < 0.01);
        assert_eq!(scored[1].rank_score, Some(-2.0));
        assert!((scored[1].price_impact_pct.unwrap() - 30.0).abs() < 0.01);
    }

    #[tokio::test]
    async fn unparsable_baseline_scores_neutral() {
        let scorer = PriceImpactScorer;
        let query = RankQuery::new("arcteryx", "pris saknas");
        let scored = scorer.score(&query, &[tag("vintage", 980.0)]).await.unwrap();
        assert_eq!(scored[0].rank_score, Some(0.0));
        assert_eq!(scored[0].price_impact_pct, Some(0.0));
    }

    #[tokio::test]
    async fn update_copies_only_score_fields() {
        let scorer = PriceImpactScorer;
        let mut candidate = tag("vintage", 980.0);
        let scored = Tag {
            rank_score: Some(4.0),
            price_impact_pct: Some(50.0),
            ..Tag::default()
        };
        scorer.update(&mut candidate, scored);
        assert_eq!(candidate.rank_score, Some(4.0));
        assert_eq!(candidate.name, "vintage");
        assert_eq!(candidate.median_price, 980.0);
    }
}
