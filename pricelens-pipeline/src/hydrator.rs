use async_trait::async_trait;

use crate::util;

/// Hydrators enrich candidates with derived or contextual fields without
/// changing their order. Same copy-back discipline as scorers: `hydrate`
/// returns index-aligned records carrying only this hydrator's fields.
#[async_trait]
pub trait Hydrator<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Decide if this hydrator should run for the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Enrich the candidates. The returned vector must be index-aligned
    /// with the input.
    async fn hydrate(&self, query: &Q, candidates: &[C]) -> Result<Vec<C>, String>;

    /// Copy this hydrator's fields onto the candidate.
    fn update(&self, candidate: &mut C, hydrated: C);

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
