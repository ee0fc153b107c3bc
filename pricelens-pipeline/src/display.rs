//! Display-string formatting for ranked tags.
//!
//! The rendering layer shows one line per tag: signed score, price range,
//! listing count. Parts that are unknown are omitted rather than shown as
//! zeros.

use crate::types::Tag;

/// Signed score with one decimal: "+8.0", "-4.0", "+0.0".
pub fn format_score(score: f64) -> String {
    format!("{:+.1}", score)
}

/// Quartile price range, "250-480kr". None when both ends are unknown.
pub fn format_price_range(p25: f64, p75: f64) -> Option<String> {
    if p25 <= 0.0 && p75 <= 0.0 {
        return None;
    }
    Some(format!("{}-{}kr", p25.round() as i64, p75.round() as i64))
}

/// Human-readable listing count: "2.0k listings" from 1000 up, the raw
/// integer below that.
pub fn format_listing_count(count: u32) -> String {
    if count >= 1000 {
        format!("{:.1}k listings", count as f64 / 1000.0)
    } else {
        format!("{} listings", count)
    }
}

/// Compose the full display line for a tag, joining the available parts.
pub fn display_line(tag: &Tag) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(3);
    if let Some(score) = tag.rank_score {
        parts.push(format_score(score));
    }
    if let Some(range) = format_price_range(tag.p25_price, tag.p75_price) {
        parts.push(range);
    }
    parts.push(format_listing_count(tag.listing_count));
    parts.join(" \u{b7} ")
}
