//! The staged candidate pipeline that drives a ranking request end to end.
//!
//! Stage order is fixed: query hydration → sources → hydrators → filters →
//! scorers → selector → post-selection hydrators and filters → side
//! effects. A failing stage is logged and skipped rather than failing the
//! request: a degraded ranked list always beats a failed render pass.

use async_trait::async_trait;
use std::sync::Arc;

use crate::filter::{Filter, FilterResult};
use crate::hydrator::Hydrator;
use crate::query_hydrator::QueryHydrator;
use crate::scorer::Scorer;
use crate::selector::Selector;
use crate::side_effect::{SideEffect, SideEffectInput};
use crate::source::Source;

/// Queries carry a request id for log correlation.
pub trait HasRequestId {
    fn request_id(&self) -> &str;
}

/// Everything a pipeline run produced, including what it threw away.
#[derive(Clone)]
pub struct PipelineResult<Q, C> {
    pub query: Q,
    /// All candidates the sources produced, before any filtering.
    pub retrieved_candidates: Vec<C>,
    /// Candidates removed by filter stages.
    pub filtered_candidates: Vec<C>,
    /// The final ordered result.
    pub selected_candidates: Vec<C>,
}

#[async_trait]
pub trait CandidatePipeline<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + HasRequestId + 'static,
    C: Clone + Send + Sync + 'static,
{
    fn query_hydrators(&self) -> &[Box<dyn QueryHydrator<Q>>];
    fn sources(&self) -> &[Box<dyn Source<Q, C>>];
    fn hydrators(&self) -> &[Box<dyn Hydrator<Q, C>>];
    fn filters(&self) -> &[Box<dyn Filter<Q, C>>];
    fn scorers(&self) -> &[Box<dyn Scorer<Q, C>>];
    fn selector(&self) -> &dyn Selector<Q, C>;
    fn post_selection_hydrators(&self) -> &[Box<dyn Hydrator<Q, C>>];
    fn post_selection_filters(&self) -> &[Box<dyn Filter<Q, C>>];
    fn side_effects(&self) -> Arc<Vec<Box<dyn SideEffect<Q, C>>>>;

    /// Optional final truncation applied after post-selection stages.
    fn result_size(&self) -> Option<usize> {
        None
    }

    /// Run the full pipeline for one query.
    async fn execute(&self, query: Q) -> PipelineResult<Q, C> {
        let mut query = query;

        for hydrator in self.query_hydrators() {
            if !hydrator.enable(&query) {
                continue;
            }
            match hydrator.hydrate(&query).await {
                Ok(hydrated) => hydrator.update(&mut query, hydrated),
                Err(e) => log::warn!(
                    "request_id={} query hydrator {} failed: {}",
                    query.request_id(),
                    hydrator.name(),
                    e
                ),
            }
        }

        let mut retrieved: Vec<C> = Vec::new();
        for source in self.sources() {
            if !source.enable(&query) {
                continue;
            }
            match source.get_candidates(&query).await {
                Ok(candidates) => retrieved.extend(candidates),
                Err(e) => log::warn!(
                    "request_id={} source {} failed: {}",
                    query.request_id(),
                    source.name(),
                    e
                ),
            }
        }

        let mut candidates = retrieved.clone();

        run_hydrators(self.hydrators(), &query, &mut candidates).await;

        let mut filtered_out: Vec<C> = Vec::new();
        run_filters(self.filters(), &query, &mut candidates, &mut filtered_out).await;

        for scorer in self.scorers() {
            if !scorer.enable(&query) {
                continue;
            }
            match scorer.score(&query, &candidates).await {
                Ok(scored) => {
                    for (candidate, scored) in candidates.iter_mut().zip(scored) {
                        scorer.update(candidate, scored);
                    }
                }
                Err(e) => log::warn!(
                    "request_id={} scorer {} failed: {}",
                    query.request_id(),
                    scorer.name(),
                    e
                ),
            }
        }

        let mut selected = self.selector().select(&query, candidates);

        run_hydrators(self.post_selection_hydrators(), &query, &mut selected).await;
        run_filters(
            self.post_selection_filters(),
            &query,
            &mut selected,
            &mut filtered_out,
        )
        .await;

        if let Some(limit) = self.result_size() {
            selected.truncate(limit);
        }

        let input = Arc::new(SideEffectInput {
            query: Arc::new(query.clone()),
            selected_candidates: selected.clone(),
        });
        for side_effect in self.side_effects().iter() {
            if !side_effect.enable(Arc::clone(&input.query)) {
                continue;
            }
            if let Err(e) = side_effect.run(Arc::clone(&input)).await {
                log::warn!(
                    "request_id={} side effect {} failed: {}",
                    query.request_id(),
                    side_effect.name(),
                    e
                );
            }
        }

        PipelineResult {
            query,
            retrieved_candidates: retrieved,
            filtered_candidates: filtered_out,
            selected_candidates: selected,
        }
    }
}

async fn run_hydrators<Q, C>(hydrators: &[Box<dyn Hydrator<Q, C>>], query: &Q, candidates: &mut [C])
where
    Q: Clone + Send + Sync + HasRequestId + 'static,
    C: Clone + Send + Sync + 'static,
{
    for hydrator in hydrators {
        if !hydrator.enable(query) {
            continue;
        }
        match hydrator.hydrate(query, candidates).await {
            Ok(hydrated) => {
                for (candidate, hydrated) in candidates.iter_mut().zip(hydrated) {
                    hydrator.update(candidate, hydrated);
                }
            }
            Err(e) => log::warn!(
                "request_id={} hydrator {} failed: {}",
                query.request_id(),
                hydrator.name(),
                e
            ),
        }
    }
}

async fn run_filters<Q, C>(
    filters: &[Box<dyn Filter<Q, C>>],
    query: &Q,
    candidates: &mut Vec<C>,
    filtered_out: &mut Vec<C>,
) where
    Q: Clone + Send + Sync + HasRequestId + 'static,
    C: Clone + Send + Sync + 'static,
{
    for filter in filters {
        if !filter.enable(query) {
            continue;
        }
        // Pass a clone so a failing filter leaves the list intact.
        match filter.filter(query, candidates.clone()).await {
            Ok(FilterResult { kept, removed }) => {
                *candidates = kept;
                filtered_out.extend(removed);
            }
            Err(e) => log::warn!(
                "request_id={} filter {} failed: {}",
                query.request_id(),
                filter.name(),
                e
            ),
        }
    }
}
