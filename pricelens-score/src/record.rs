use serde::{Deserialize, Serialize};

/// A single market tag as delivered by the upstream data provider.
///
/// Prices are medians/quartiles over the listings carrying the tag; a value
/// of 0 means "unknown" and every consumer treats it that way rather than
/// as a real price.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarketTag {
    pub name: String,
    #[serde(default)]
    pub listing_count: u32,
    #[serde(default)]
    pub median_price: f64,
    #[serde(default)]
    pub p25_price: f64,
    #[serde(default)]
    pub p75_price: f64,
}

impl MarketTag {
    pub fn new(name: &str, listing_count: u32, median_price: f64) -> Self {
        Self {
            name: name.to_string(),
            listing_count,
            median_price,
            p25_price: 0.0,
            p75_price: 0.0,
        }
    }

    /// Case-insensitive identity key for this tag.
    pub fn key(&self) -> String {
        self.name.trim().to_lowercase()
    }
}
