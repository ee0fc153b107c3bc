use async_trait::async_trait;

use pricelens_score::similarity_penalty;

use crate::ranker::clamp_score;
use crate::scorer::Scorer;
use crate::types::{RankQuery, Tag, TagState};

/// Penalizes candidates whose names are lexical near-duplicates of an
/// already-selected tag ("goretex" when "gore-tex" is selected). Runs
/// after `PriceImpactScorer` and adjusts the base score downward; the
/// composite stays clamped to the score limit. Included tags are exempt:
/// they would otherwise match themselves at 100%.
pub struct SimilarityPenaltyScorer;

#[async_trait]
impl Scorer<RankQuery, Tag> for SimilarityPenaltyScorer {
    fn enable(&self, query: &RankQuery) -> bool {
        query.config.apply_similarity_penalty && !query.selected_tags.is_empty()
    }

    async fn score(&self, query: &RankQuery, candidates: &[Tag]) -> Result<Vec<Tag>, String> {
        let selected: Vec<&str> = query.selected_tags.iter().map(String::as_str).collect();

        let scored = candidates
            .iter()
            .map(|tag| {
                let penalty = if tag.state == TagState::Included {
                    0
                } else {
                    similarity_penalty(&tag.name, &selected)
                };
                let base = tag.rank_score.unwrap_or(0.0);
                Tag {
                    rank_score: Some(clamp_score(base + penalty as f64)),
                    ..Tag::default()
                }
            })
            .collect();

        Ok(scored)
    }

    fn update(&self, candidate: &mut Tag, scored: Tag) {
        candidate.rank_score = scored.rank_score;
    }
}
