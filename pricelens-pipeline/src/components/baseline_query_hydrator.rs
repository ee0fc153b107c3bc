use async_trait::async_trait;

use crate::query_hydrator::QueryHydrator;
use crate::types::RankQuery;

/// Fills in a missing baseline price label from the snapshot's own label.
///
/// The rendering layer usually passes the asking price it displays; when
/// it doesn't, the snapshot's exported label is the best available
/// stand-in. If neither exists the engine scores everything neutral,
/// which is the intended degraded behavior.
pub struct BaselineQueryHydrator {
    snapshot_label: String,
}

impl BaselineQueryHydrator {
    pub fn new(snapshot_label: impl Into<String>) -> Self {
        Self {
            snapshot_label: snapshot_label.into(),
        }
    }
}

#[async_trait]
impl QueryHydrator<RankQuery> for BaselineQueryHydrator {
    fn enable(&self, query: &RankQuery) -> bool {
        query.baseline_price_label.trim().is_empty() && !self.snapshot_label.trim().is_empty()
    }

    async fn hydrate(&self, query: &RankQuery) -> Result<RankQuery, String> {
        let mut hydrated = query.clone();
        hydrated.baseline_price_label = self.snapshot_label.clone();
        Ok(hydrated)
    }

    fn update(&self, query: &mut RankQuery, hydrated: RankQuery) {
        query.baseline_price_label = hydrated.baseline_price_label;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fills_empty_baseline() {
        let hydrator = BaselineQueryHydrator::new("1 450 kr");
        let mut query = RankQuery::new("arcteryx", "");
        assert!(hydrator.enable(&query));
        let hydrated = hydrator.hydrate(&query).await.unwrap();
        hydrator.update(&mut query, hydrated);
        assert_eq!(query.baseline_price_label, "1 450 kr");
    }

    #[test]
    fn skips_when_caller_provided_a_baseline() {
        let hydrator = BaselineQueryHydrator::new("1 450 kr");
        let query = RankQuery::new("arcteryx", "999 kr");
        assert!(!hydrator.enable(&query));
    }

    #[test]
    fn skips_when_snapshot_has_no_label() {
        let hydrator = BaselineQueryHydrator::new("");
        let query = RankQuery::new("arcteryx", "");
        assert!(!hydrator.enable(&query));
    }
}
