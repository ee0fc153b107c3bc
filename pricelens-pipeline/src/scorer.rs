use async_trait::async_trait;

use crate::util;

/// Scorers compute derived score fields for every candidate.
///
/// A scorer never mutates the candidates it is given: `score` returns
/// fresh records carrying only the fields this scorer is responsible for,
/// and the pipeline copies them back through `update`. Scorers run in
/// order, so a later scorer may read what an earlier one wrote.
#[async_trait]
pub trait Scorer<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Decide if this scorer should run for the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Compute scores for the candidates. The returned vector must be
    /// index-aligned with the input.
    async fn score(&self, query: &Q, candidates: &[C]) -> Result<Vec<C>, String>;

    /// Copy this scorer's fields from the scored record onto the candidate.
    fn update(&self, candidate: &mut C, scored: C);

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
