//! JSON market snapshot loader.
//!
//! Parses exported tag statistics into a `MarketSnapshot`. Expected shape:
//!
//! ```json
//! {
//!   "brand": "arcteryx",
//!   "baseline_price_label": "1 200 kr",
//!   "tags": [
//!     { "name": "gore-tex", "listing_count": 412, "median_price": 1450.0,
//!       "p25_price": 1100.0, "p75_price": 1900.0 }
//!   ]
//! }
//! ```
//!
//! Rows with negative prices come from scraping glitches; they are
//! sanitized to zero (price unknown) rather than rejected, so one bad
//! row never sinks a whole snapshot.

use pricelens_score::MarketTag;
use serde::{Deserialize, Serialize};
use std::io::Read;

use crate::error::{MarketDataError, MarketDataResult};

/// A brand's market statistics at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub brand: String,
    /// Asking-price label for the listing being ranked against, e.g. "1 200 kr".
    #[serde(default)]
    pub baseline_price_label: String,
    pub tags: Vec<MarketTag>,
}

impl MarketSnapshot {
    pub fn new(brand: impl Into<String>, tags: Vec<MarketTag>) -> Self {
        Self {
            brand: brand.into(),
            baseline_price_label: String::new(),
            tags,
        }
    }
}

/// Load a market snapshot from a JSON reader.
pub fn load_snapshot<R: Read>(reader: R) -> MarketDataResult<MarketSnapshot> {
    let mut snapshot: MarketSnapshot = serde_json::from_reader(reader)?;
    sanitize(&mut snapshot);
    Ok(snapshot)
}

/// Load a market snapshot from a JSON file path.
pub fn load_snapshot_file(path: &str) -> MarketDataResult<MarketSnapshot> {
    let file = std::fs::File::open(path).map_err(|e| MarketDataError::Io {
        path: path.to_string(),
        source: e,
    })?;
    load_snapshot(std::io::BufReader::new(file))
}

fn sanitize(snapshot: &mut MarketSnapshot) {
    for tag in &mut snapshot.tags {
        for price in [
            &mut tag.median_price,
            &mut tag.p25_price,
            &mut tag.p75_price,
        ] {
            if *price < 0.0 || !price.is_finite() {
                log::warn!(
                    "snapshot '{}': tag '{}' has invalid price {}, treating as unknown",
                    snapshot.brand,
                    tag.name,
                    price
                );
                *price = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_JSON: &str = r#"{
        "brand": "arcteryx",
        "baseline_price_label": "1 200 kr",
        "tags": [
            { "name": "gore-tex", "listing_count": 412, "median_price": 1450.0,
              "p25_price": 1100.0, "p75_price": 1900.0 },
            { "name": "vintage", "listing_count": 96, "median_price": 980.0 },
            { "name": "skal", "listing_count": 33, "median_price": -1.0 }
        ]
    }"#;

    #[test]
    fn load_sample_snapshot() {
        let snapshot = load_snapshot(SAMPLE_JSON.as_bytes()).unwrap();
        assert_eq!(snapshot.brand, "arcteryx");
        assert_eq!(snapshot.baseline_price_label, "1 200 kr");
        assert_eq!(snapshot.tags.len(), 3);
        assert_eq!(snapshot.tags[0].name, "gore-tex");
        assert_eq!(snapshot.tags[0].listing_count, 412);
        assert!((snapshot.tags[0].p75_price - 1900.0).abs() < 0.01);
    }

    #[test]
    fn missing_quartiles_default_to_zero() {
        let snapshot = load_snapshot(SAMPLE_JSON.as_bytes()).unwrap();
        assert_eq!(snapshot.tags[1].p25_price, 0.0);
        assert_eq!(snapshot.tags[1].p75_price, 0.0);
    }

    #[test]
    fn negative_prices_are_sanitized() {
        let snapshot = load_snapshot(SAMPLE_JSON.as_bytes()).unwrap();
        assert_eq!(snapshot.tags[2].median_price, 0.0);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let result = load_snapshot("{ not json".as_bytes());
        assert!(matches!(result, Err(MarketDataError::Json(_))));
    }
}
