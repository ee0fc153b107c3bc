use async_trait::async_trait;

use crate::util;

/// Sources produce candidate tags for a ranking query.
///
/// A source owns its upstream data (an already-fetched market snapshot, a
/// cached brand index); fetching that data over the network is the serving
/// layer's problem, not the pipeline's.
#[async_trait]
pub trait Source<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Decide if this source should run for the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Fetch candidates for the given query.
    async fn get_candidates(&self, query: &Q) -> Result<Vec<C>, String>;

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
