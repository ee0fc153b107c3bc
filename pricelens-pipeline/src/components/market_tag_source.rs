use async_trait::async_trait;
use std::collections::HashSet;

use crate::market_loader::MarketSnapshot;
use crate::source::Source;
use crate::types::{RankQuery, Tag, TagState};

/// Source that produces `Tag` candidates from a brand's market snapshot.
///
/// The snapshot is fetched (or loaded from disk) before the pipeline runs;
/// this source only projects its records into candidates and marks the
/// ones the user has already committed to as `Included`.
pub struct MarketTagSource {
    snapshot: MarketSnapshot,
}

impl MarketTagSource {
    pub fn new(snapshot: MarketSnapshot) -> Self {
        Self { snapshot }
    }
}

#[async_trait]
impl Source<RankQuery, Tag> for MarketTagSource {
    fn enable(&self, _query: &RankQuery) -> bool {
        !self.snapshot.tags.is_empty()
    }

    async fn get_candidates(&self, query: &RankQuery) -> Result<Vec<Tag>, String> {
        let selected: HashSet<String> = query
            .selected_tags
            .iter()
            .map(|name| name.trim().to_lowercase())
            .collect();

        let candidates = self
            .snapshot
            .tags
            .iter()
            .map(|market| {
                let mut tag = Tag::from_market(market);
                if selected.contains(&tag.key()) {
                    tag.state = TagState::Included;
                }
                tag
            })
            .collect();

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricelens_score::MarketTag;

    fn snapshot() -> MarketSnapshot {
        MarketSnapshot::new(
            "arcteryx",
            vec![
                MarketTag::new("gore-tex", 412, 1450.0),
                MarketTag::new("vintage", 96, 980.0),
            ],
        )
    }

    #[tokio::test]
    async fn projects_all_snapshot_tags() {
        let source = MarketTagSource::new(snapshot());
        let query = RankQuery::new("arcteryx", "1 200 kr");
        let candidates = source.get_candidates(&query).await.unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].name, "gore-tex");
        assert!(candidates[0].rank_score.is_none());
    }

    #[tokio::test]
    async fn marks_selected_tags_included() {
        let source = MarketTagSource::new(snapshot());
        let mut query = RankQuery::new("arcteryx", "1 200 kr");
        query.selected_tags = vec!["Gore-Tex ".into()];
        let candidates = source.get_candidates(&query).await.unwrap();
        assert_eq!(candidates[0].state, TagState::Included);
        assert_eq!(candidates[1].state, TagState::Unselected);
    }

    #[test]
    fn disabled_for_empty_snapshot() {
        let source = MarketTagSource::new(MarketSnapshot::new("arcteryx", vec![]));
        let query = RankQuery::new("arcteryx", "1 200 kr");
        assert!(!source.enable(&query));
    }
}
