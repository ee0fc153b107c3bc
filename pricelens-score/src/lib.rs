pub mod classifier;
pub mod denylist;
pub mod price_impact;
pub mod record;
pub mod similarity;
pub mod thresholds;

pub use classifier::{is_excluded, is_verbose, shares_core_product};
pub use denylist::Denylist;
pub use price_impact::{parse_price_label, percent_change, price_impact};
pub use record::MarketTag;
pub use similarity::{levenshtein, name_similarity, similarity_penalty};
