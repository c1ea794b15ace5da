// In crates/core-types/src/series.rs

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single observation of a time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    /// The closing price, or a derived ratio value.
    pub close: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, close: f64) -> Self {
        Self { timestamp, close }
    }
}

/// An immutable, strictly ascending sequence of `PricePoint`s.
///
/// Closing-price series and relative-strength series share this type, so
/// anything that consumes one can consume the other.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    points: Vec<PricePoint>,
}

impl Series {
    /// Builds a series, rejecting out-of-order or duplicate timestamps.
    pub fn new(points: Vec<PricePoint>) -> Result<Self> {
        for (index, window) in points.windows(2).enumerate() {
            let (prev, next) = (&window[0], &window[1]);
            if next.timestamp == prev.timestamp {
                return Err(Error::DuplicateTimestamp {
                    timestamp: next.timestamp,
                });
            }
            if next.timestamp < prev.timestamp {
                return Err(Error::UnorderedSeries { index: index + 1 });
            }
        }
        Ok(Self { points })
    }

    /// Builds a series from evenly spaced closes starting at `start`.
    pub fn from_closes(start: DateTime<Utc>, step: Duration, closes: &[f64]) -> Self {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint::new(start + step * i as i32, close))
            .collect();
        // Timestamps are strictly increasing by construction.
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }
}
