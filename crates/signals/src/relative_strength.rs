// In crates/signals/src/relative_strength.rs

use chrono::{DateTime, Utc};
use core_types::{PricePoint, Series};
use itertools::{EitherOrBoth, Itertools};

use crate::error::{Error, Result};

/// Inner join of two series on timestamp, in ascending order.
pub fn align(a: &Series, b: &Series) -> Vec<(DateTime<Utc>, f64, f64)> {
    a.points()
        .iter()
        .merge_join_by(b.points().iter(), |x, y| x.timestamp.cmp(&y.timestamp))
        .filter_map(|pair| match pair {
            EitherOrBoth::Both(x, y) => Some((x.timestamp, x.close, y.close)),
            _ => None,
        })
        .collect()
}

/// Divides `a` by `b` at every shared timestamp.
///
/// Prices are not filtered. A zero denominator produces a non-finite value,
/// which the MACD engine rejects for this series only.
pub fn relative_strength(a: &Series, b: &Series) -> Result<Series> {
    let aligned = align(a, b);
    if aligned.is_empty() {
        return Err(Error::AlignmentEmpty);
    }

    let points = aligned
        .into_iter()
        .map(|(timestamp, numerator, denominator)| {
            PricePoint::new(timestamp, numerator / denominator)
        })
        .collect();

    // Both inputs are strictly ascending, so the join is as well.
    Series::new(points).map_err(|_| Error::AlignmentEmpty)
}

/// Absent-propagating form: no ratio unless both legs exist and overlap.
pub fn ratio(a: Option<&Series>, b: Option<&Series>) -> Option<Series> {
    match (a, b) {
        (Some(a), Some(b)) => relative_strength(a, b).ok(),
        _ => None,
    }
}
