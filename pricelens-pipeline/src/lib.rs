//! Tag ranking for resale-market price analytics.
//!
//! The crate has two faces over one engine:
//!
//! - [`ranker::rank_tags`], the pure, synchronous ranking function: market
//!   tags in, an ordered and annotated display list out. Deterministic and
//!   side-effect free; safe to call from any request context.
//! - [`pipelines::tag_rank::TagRankPipeline`], the same engine wired into
//!   the staged candidate-pipeline architecture (source → filters → scorers
//!   → selector → side effects) that the serving layer drives.
//!
//! Both paths share the ordering and annotation helpers in [`ranker`], so
//! they cannot drift apart.

pub mod candidate_pipeline;
pub mod components;
pub mod display;
pub mod error;
pub mod filter;
pub mod hydrator;
pub mod market_loader;
pub mod pipelines;
pub mod query_hydrator;
pub mod ranker;
pub mod scorer;
pub mod selector;
pub mod side_effect;
pub mod source;
pub mod types;
pub mod util;
