use async_trait::async_trait;
use std::sync::Arc;

use crate::candidate_pipeline::CandidatePipeline;
use crate::components::baseline_query_hydrator::BaselineQueryHydrator;
use crate::components::display_annotator::DisplayAnnotator;
use crate::components::duplicate_name_filter::DuplicateNameFilter;
use crate::components::market_tag_source::MarketTagSource;
use crate::components::price_impact_scorer::PriceImpactScorer;
use crate::components::rank_log_side_effect::RankLogSideEffect;
use crate::components::rank_selector::RankSelector;
use crate::components::similarity_penalty_scorer::SimilarityPenaltyScorer;
use crate::filter::Filter;
use crate::hydrator::Hydrator;
use crate::market_loader::MarketSnapshot;
use crate::query_hydrator::QueryHydrator;
use crate::scorer::Scorer;
use crate::selector::Selector;
use crate::side_effect::SideEffect;
use crate::source::Source;
use crate::types::{RankQuery, Tag};

/// The tag ranking pipeline.
///
/// Pipeline flow:
/// 1. BaselineQueryHydrator fills in a missing baseline price label
/// 2. MarketTagSource projects the snapshot into candidates
/// 3. DuplicateNameFilter collapses case-insensitive duplicates
/// 4. PriceImpactScorer assigns the base score from price deviation
/// 5. SimilarityPenaltyScorer demotes near-duplicates of selected tags
/// 6. RankSelector orders per the query's sort mode
/// 7. DisplayAnnotator attaches color and display line post-selection
/// 8. RankLogSideEffect logs a result summary
pub struct TagRankPipeline {
    query_hydrators: Vec<Box<dyn QueryHydrator<RankQuery>>>,
    sources: Vec<Box<dyn Source<RankQuery, Tag>>>,
    hydrators: Vec<Box<dyn Hydrator<RankQuery, Tag>>>,
    filters: Vec<Box<dyn Filter<RankQuery, Tag>>>,
    scorers: Vec<Box<dyn Scorer<RankQuery, Tag>>>,
    selector: RankSelector,
    post_selection_hydrators: Vec<Box<dyn Hydrator<RankQuery, Tag>>>,
    post_selection_filters: Vec<Box<dyn Filter<RankQuery, Tag>>>,
    side_effects: Arc<Vec<Box<dyn SideEffect<RankQuery, Tag>>>>,
    result_size: Option<usize>,
}

impl TagRankPipeline {
    /// Create a pipeline over a brand's market snapshot.
    ///
    /// This is the primary constructor for production use.
    pub fn with_snapshot(snapshot: MarketSnapshot) -> Self {
        Self::with_snapshot_and_size(snapshot, None)
    }

    /// Create a pipeline with an explicit final result cap. The selector
    /// already bounds output in smart mode; the cap here additionally
    /// bounds listing-count mode, which is otherwise unbounded.
    pub fn with_snapshot_and_size(snapshot: MarketSnapshot, result_size: Option<usize>) -> Self {
        let query_hydrators: Vec<Box<dyn QueryHydrator<RankQuery>>> = vec![Box::new(
            BaselineQueryHydrator::new(snapshot.baseline_price_label.clone()),
        )];

        let sources: Vec<Box<dyn Source<RankQuery, Tag>>> =
            vec![Box::new(MarketTagSource::new(snapshot))];

        let filters: Vec<Box<dyn Filter<RankQuery, Tag>>> = vec![Box::new(DuplicateNameFilter)];

        let scorers: Vec<Box<dyn Scorer<RankQuery, Tag>>> = vec![
            Box::new(PriceImpactScorer),
            Box::new(SimilarityPenaltyScorer),
        ];

        let post_selection_hydrators: Vec<Box<dyn Hydrator<RankQuery, Tag>>> =
            vec![Box::new(DisplayAnnotator)];

        let side_effects: Arc<Vec<Box<dyn SideEffect<RankQuery, Tag>>>> =
            Arc::new(vec![Box::new(RankLogSideEffect)]);

        Self {
            query_hydrators,
            sources,
            hydrators: Vec::new(),
            filters,
            scorers,
            selector: RankSelector,
            post_selection_hydrators,
            post_selection_filters: Vec::new(),
            side_effects,
            result_size,
        }
    }
}

#[async_trait]
impl CandidatePipeline<RankQuery, Tag> for TagRankPipeline {
    fn query_hydrators(&self) -> &[Box<dyn QueryHydrator<RankQuery>>] {
        &self.query_hydrators
    }

    fn sources(&self) -> &[Box<dyn Source<RankQuery, Tag>>] {
        &self.sources
    }

    fn hydrators(&self) -> &[Box<dyn Hydrator<RankQuery, Tag>>] {
        &self.hydrators
    }

    fn filters(&self) -> &[Box<dyn Filter<RankQuery, Tag>>] {
        &self.filters
    }

    fn scorers(&self) -> &[Box<dyn Scorer<RankQuery, Tag>>] {
        &self.scorers
    }

    fn selector(&self) -> &dyn Selector<RankQuery, Tag> {
        &self.selector
    }

    fn post_selection_hydrators(&self) -> &[Box<dyn Hydrator<RankQuery, Tag>>] {
        &self.post_selection_hydrators
    }

    fn post_selection_filters(&self) -> &[Box<dyn Filter<RankQuery, Tag>>] {
        &self.post_selection_filters
    }

    fn side_effects(&self) -> Arc<Vec<Box<dyn SideEffect<RankQuery, Tag>>>> {
        Arc::clone(&self.side_effects)
    }

    fn result_size(&self) -> Option<usize> {
        self.result_size
    }
}
