// In crates/signals/src/macd.rs

use core_types::{Classification, Crossing, CrossingWindow, Series};
use ta::indicators::ExponentialMovingAverage as Ema;
use ta::Next;

use crate::error::{Error, Result};
use crate::types::{DEFAULT_MIN_HISTORY, MacdSettings};
use crate::Classifier;

/// Classifies MACD zero-line crossings near the end of a series.
///
/// The MACD line is `EMA(fast) - EMA(slow)` over the whole series, with both
/// averages seeded from the first observation and smoothed with
/// `alpha = 2 / (span + 1)`.
#[derive(Debug, Clone)]
pub struct MacdEngine {
    settings: MacdSettings,
}

impl MacdEngine {
    /// Creates an engine, validating spans and the history requirement.
    pub fn new(settings: MacdSettings) -> Result<Self> {
        if settings.fast_span == 0 || settings.fast_span >= settings.slow_span {
            return Err(Error::InvalidSettings(format!(
                "fast span ({}) must be positive and below slow span ({})",
                settings.fast_span, settings.slow_span
            )));
        }
        // The gate can be raised but never lowered below the default.
        if settings.min_history < DEFAULT_MIN_HISTORY {
            return Err(Error::InvalidSettings(format!(
                "min_history ({}) must be at least {DEFAULT_MIN_HISTORY}",
                settings.min_history
            )));
        }
        Ok(Self { settings })
    }

    /// Computes the MACD line, index-aligned with `values`.
    pub fn macd_line(&self, values: &[f64]) -> Result<Vec<f64>> {
        let mut fast = Ema::new(self.settings.fast_span)
            .map_err(|e| Error::Indicator(format!("{e:?}")))?;
        let mut slow = Ema::new(self.settings.slow_span)
            .map_err(|e| Error::Indicator(format!("{e:?}")))?;

        Ok(values
            .iter()
            .map(|&value| fast.next(value) - slow.next(value))
            .collect())
    }
}

/// Sign change between two consecutive MACD values. Zero on either side is not a cross.
pub fn zero_cross(prev: f64, last: f64) -> Crossing {
    if prev < 0.0 && last > 0.0 {
        Crossing::CrossUp
    } else if prev > 0.0 && last < 0.0 {
        Crossing::CrossDown
    } else {
        Crossing::None
    }
}

impl Classifier for MacdEngine {
    fn name(&self) -> &'static str {
        "MacdZeroCross"
    }

    fn evaluate(&self, series: &Series) -> Result<Classification> {
        let closes = series.closes();
        if closes.len() < self.settings.min_history {
            return Err(Error::InsufficientHistory {
                len: closes.len(),
                required: self.settings.min_history,
            });
        }
        if let Some(index) = closes.iter().position(|v| !v.is_finite()) {
            return Err(Error::NonFinite { index });
        }

        let macd = self.macd_line(&closes)?;
        let n = macd.len();

        // The latest bar may still be forming, so the confirmed comparison stops one short.
        let confirmed = zero_cross(macd[n - 3], macd[n - 2]);

        Ok(match self.settings.window {
            CrossingWindow::Confirmed => Classification::Confirmed(confirmed),
            CrossingWindow::Extended => Classification::Extended {
                one_period_ago: confirmed,
                current_period: zero_cross(macd[n - 2], macd[n - 1]),
            },
        })
    }

    fn classify(&self, series: Option<&Series>) -> Classification {
        let Some(series) = series else {
            return Classification::none(self.settings.window);
        };
        match self.evaluate(series) {
            Ok(classification) => classification,
            Err(Error::InsufficientHistory { len, required }) => {
                tracing::debug!(len, required, "Series too short to classify.");
                Classification::none(self.settings.window)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Series could not be classified.");
                Classification::none(self.settings.window)
            }
        }
    }
}
