use async_trait::async_trait;

use crate::hydrator::Hydrator;
use crate::ranker;
use crate::types::{RankQuery, Tag};

/// Post-selection hydrator that attaches the display annotations: the
/// color category and the pre-formatted display line. Runs after the
/// selector so it only pays for tags that made the cut.
pub struct DisplayAnnotator;

#[async_trait]
impl Hydrator<RankQuery, Tag> for DisplayAnnotator {
    async fn hydrate(&self, _query: &RankQuery, candidates: &[Tag]) -> Result<Vec<Tag>, String> {
        Ok(candidates.iter().map(ranker::annotate).collect())
    }

    fn update(&self, candidate: &mut Tag, hydrated: Tag) {
        candidate.color = hydrated.color;
        candidate.display = hydrated.display;
    }
}
