//! Price impact scoring: how much pricier or cheaper listings with a tag
//! are versus the baseline price for the current selection.
//!
//! The threshold table is asymmetric on purpose. Premium tags are rare and
//! worth surfacing aggressively, so the positive side has coarse bands that
//! reach +10 only at a 5x price. The negative side can never go below -100%,
//! so it uses fine 10-point bands near the floor instead.

/// Extract the numeric portion of a baseline price label such as
/// "1 249 kr" or "1,249.50 kr". Every non-digit, non-dot character is
/// stripped before parsing; an unparsable remainder degrades to 0.0
/// (meaning "no baseline") rather than failing a render pass.
pub fn parse_price_label(label: &str) -> f64 {
    let numeric: String = label
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    numeric.parse::<f64>().unwrap_or(0.0)
}

/// Percentage change of `price` relative to `baseline`. Zero when the
/// baseline is missing (0 or negative), since relative change is undefined.
pub fn percent_change(price: f64, baseline: f64) -> f64 {
    if baseline <= 0.0 {
        return 0.0;
    }
    (price - baseline) / baseline * 100.0
}

/// Map a tag's median price deviation from the baseline into a bounded
/// integer score in [-10, 10]. Total and pure: a missing baseline yields
/// the neutral score.
pub fn price_impact(price: f64, baseline: f64) -> i32 {
    if baseline <= 0.0 {
        return 0;
    }
    let pct = percent_change(price, baseline);

    if pct >= 400.0 {
        10
    } else if pct >= 200.0 {
        8
    } else if pct >= 100.0 {
        6
    } else if pct >= 50.0 {
        4
    } else if pct >= 20.0 {
        2
    } else if pct >= -20.0 {
        0
    } else if pct >= -50.0 {
        -2
    } else if pct >= -60.0 {
        -4
    } else if pct >= -70.0 {
        -6
    } else if pct >= -80.0 {
        -8
    } else {
        -10
    }
}
