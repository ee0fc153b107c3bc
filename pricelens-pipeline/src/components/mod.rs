pub mod baseline_query_hydrator;
pub mod display_annotator;
pub mod duplicate_name_filter;
pub mod market_tag_source;
pub mod price_impact_scorer;
pub mod rank_log_side_effect;
pub mod rank_selector;
pub mod similarity_penalty_scorer;
