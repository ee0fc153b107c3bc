use async_trait::async_trait;

use crate::filter::{Filter, FilterResult};
use crate::ranker;
use crate::types::{RankQuery, Tag};

/// Collapses case-insensitive duplicate names, keeping the record with
/// the larger listing count. Upstream exports occasionally carry the
/// same tag with different casing and diverging counts.
pub struct DuplicateNameFilter;

#[async_trait]
impl Filter<RankQuery, Tag> for DuplicateNameFilter {
    async fn filter(
        &self,
        _query: &RankQuery,
        candidates: Vec<Tag>,
    ) -> Result<FilterResult<Tag>, String> {
        let (kept, removed) = ranker::dedup_tags(candidates);
        Ok(FilterResult { kept, removed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str, listings: u32) -> Tag {
        Tag {
            name: name.into(),
            listing_count: listings,
            ..Tag::default()
        }
    }

    #[tokio::test]
    async fn keeps_larger_sample_for_duplicates() {
        let filter = DuplicateNameFilter;
        let query = RankQuery::new("arcteryx", "1 200 kr");
        let result = filter
            .filter(&query, vec![tag("Vintage", 120), tag("vintage", 800)])
            .await
            .unwrap();
        assert_eq!(result.kept.len(), 1);
        assert_eq!(result.kept[0].listing_count, 800);
        assert_eq!(result.removed.len(), 1);
        assert_eq!(result.removed[0].listing_count, 120);
    }

    #[tokio::test]
    async fn distinct_names_pass_through() {
        let filter = DuplicateNameFilter;
        let query = RankQuery::new("arcteryx", "1 200 kr");
        let result = filter
            .filter(&query, vec![tag("gore-tex", 400), tag("vintage", 90)])
            .await
            .unwrap();
        assert_eq!(result.kept.len(), 2);
        assert!(result.removed.is_empty());
    }
}
