use async_trait::async_trait;
use std::sync::Arc;

use crate::side_effect::{SideEffect, SideEffectInput};
use crate::types::{RankQuery, Tag};

/// How many top entries to include in the summary line.
const LOG_TOP_N: usize = 5;

/// Logs a one-line summary of each ranked list, keyed by request id.
pub struct RankLogSideEffect;

#[async_trait]
impl SideEffect<RankQuery, Tag> for RankLogSideEffect {
    async fn run(&self, input: Arc<SideEffectInput<RankQuery, Tag>>) -> Result<(), String> {
        let top: Vec<String> = input
            .selected_candidates
            .iter()
            .take(LOG_TOP_N)
            .map(|t| format!("{}={:+.1}", t.name, t.rank_score.unwrap_or(0.0)))
            .collect();

        log::info!(
            "request_id={} brand={} ranked {} tags, top: [{}]",
            input.query.request_id,
            input.query.brand,
            input.selected_candidates.len(),
            top.join(", ")
        );
        Ok(())
    }
}
