// In crates/engine/src/task.rs

use std::time::Duration;

use api_client::PriceHistoryProvider;
use core_types::{Instrument, ScanRecord, Series, Symbol, Timeframe};
use signals::{Classifier, Error as SignalError, relative_strength};

/// Everything a single fetch-and-classify unit needs. Cheap to share by reference.
pub struct ScanTask<'a> {
    pub provider: &'a (dyn PriceHistoryProvider + 'a),
    pub classifier: &'a (dyn Classifier + Send + Sync + 'a),
    pub timeframe: Timeframe,
    pub fetch_timeout: Duration,
}

impl ScanTask<'_> {
    /// Fetches one series. Failures are logged and reported as `None`.
    pub async fn fetch(&self, symbol: &Symbol) -> Option<Series> {
        let request = self
            .provider
            .fetch(symbol, self.timeframe.interval(), self.timeframe.period());

        match tokio::time::timeout(self.fetch_timeout, request).await {
            Ok(Ok(series)) => Some(series),
            Ok(Err(err)) => {
                tracing::warn!(symbol = %symbol, error = %err, "Price history unavailable.");
                None
            }
            Err(_) => {
                tracing::warn!(symbol = %symbol, timeout = ?self.fetch_timeout, "Price history request timed out.");
                None
            }
        }
    }

    /// Direct scan of one instrument. Always yields a record.
    pub async fn direct(&self, instrument: &Instrument) -> ScanRecord {
        let series = self.fetch(&instrument.symbol).await;
        ScanRecord::new(instrument.label(), self.classifier.classify(series.as_ref()))
    }

    /// Classifies `numerator / denominator`. Yields nothing unless the ratio exists.
    pub fn ratio_record(
        &self,
        label: String,
        numerator: Option<&Series>,
        denominator: Option<&Series>,
    ) -> Option<ScanRecord> {
        let (numerator, denominator) = (numerator?, denominator?);
        match relative_strength(numerator, denominator) {
            Ok(series) => Some(ScanRecord::new(label, self.classifier.classify(Some(&series)))),
            Err(SignalError::AlignmentEmpty) => {
                tracing::debug!(pair = %label, "No overlapping bars. Omitting pair.");
                None
            }
            Err(err) => {
                tracing::warn!(pair = %label, error = %err, "Relative strength failed. Omitting pair.");
                None
            }
        }
    }

    /// Relative-strength scan of one instrument against an already fetched base.
    pub async fn relative(
        &self,
        instrument: &Instrument,
        base: &Instrument,
        base_series: &Series,
    ) -> Option<ScanRecord> {
        let series = self.fetch(&instrument.symbol).await;
        let label = format!("{}/{}", instrument.label(), base.label());
        self.ratio_record(label, series.as_ref(), Some(base_series))
    }

    /// Scan of an explicit pair. The legs are fetched one after the other, so a
    /// unit never holds more than one request.
    pub async fn pair(&self, numerator: &Instrument, denominator: &Instrument) -> Option<ScanRecord> {
        let label = format!("{}/{}", numerator.label(), denominator.label());
        let a = self.fetch(&numerator.symbol).await?;
        let b = self.fetch(&denominator.symbol).await;
        self.ratio_record(label, Some(&a), b.as_ref())
    }
}
