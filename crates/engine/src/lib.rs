// In crates/engine/src/lib.rs

pub mod task;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use api_client::PriceHistoryProvider;
use app_config::Settings;
use core_types::{
    GroupReport, Instrument, ScanGroup, ScanMode, ScanRecord, ScanTarget, Timeframe,
};
use futures::stream::{self, StreamExt};
use signals::{Classifier, MacdEngine, MacdSettings};

use crate::task::ScanTask;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// The scan orchestrator.
///
/// Fetch-and-classify units run with at most `max_concurrency` in flight and
/// their records come back in configured order, whatever order they finish
/// in. A failing symbol only affects its own record.
pub struct Scanner {
    provider: Arc<dyn PriceHistoryProvider>,
    classifier: Box<dyn Classifier + Send + Sync>,
    max_concurrency: usize,
    fetch_timeout: Duration,
}

impl Scanner {
    pub fn new(
        provider: Arc<dyn PriceHistoryProvider>,
        classifier: Box<dyn Classifier + Send + Sync>,
        max_concurrency: usize,
    ) -> Self {
        Self {
            provider,
            classifier,
            max_concurrency: max_concurrency.max(1),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Builds a MACD scanner from the loaded settings.
    pub fn from_settings(
        settings: &Settings,
        macd: MacdSettings,
        provider: Arc<dyn PriceHistoryProvider>,
    ) -> Result<Self> {
        let engine = MacdEngine::new(macd)?;
        Ok(Self::new(provider, Box::new(engine), settings.scanner.max_concurrency)
            .with_fetch_timeout(Duration::from_secs(settings.scanner.fetch_timeout_secs)))
    }

    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    fn task(&self, timeframe: Timeframe) -> ScanTask<'_> {
        ScanTask {
            provider: self.provider.as_ref(),
            classifier: self.classifier.as_ref(),
            timeframe,
            fetch_timeout: self.fetch_timeout,
        }
    }

    /// Scans one group and returns its records in configured order.
    pub async fn scan(&self, group: &ScanGroup, timeframe: Timeframe) -> Vec<ScanRecord> {
        tracing::info!(
            group = %group.name,
            kind = group.target.kind(),
            size = group.target.len(),
            %timeframe,
            "Scanning group."
        );

        let records = match &group.target {
            ScanTarget::Universe {
                instruments,
                mode: ScanMode::Direct,
            }
            | ScanTarget::Custom(instruments) => self.scan_direct(instruments, timeframe).await,
            ScanTarget::Universe {
                instruments,
                mode: ScanMode::RelativeStrength { base },
            } => self.scan_relative(instruments, base, timeframe).await,
            ScanTarget::Pairs(pairs) => self.scan_pairs(pairs, timeframe).await,
        };

        let crossings = records.iter().filter(|r| !r.classification.is_none()).count();
        tracing::info!(group = %group.name, records = records.len(), crossings, "Group scan finished.");
        records
    }

    /// Scans several groups one after another.
    pub async fn scan_all(&self, groups: &[ScanGroup], timeframe: Timeframe) -> Vec<GroupReport> {
        let mut reports = Vec::with_capacity(groups.len());
        for group in groups {
            let records = self.scan(group, timeframe).await;
            reports.push(GroupReport {
                group: group.name.clone(),
                timeframe,
                records,
            });
        }
        reports
    }

    async fn scan_direct(&self, instruments: &[Instrument], timeframe: Timeframe) -> Vec<ScanRecord> {
        let task = self.task(timeframe);
        let units: Vec<_> = instruments.iter().map(|instrument| task.direct(instrument)).collect();
        stream::iter(units).buffered(self.max_concurrency).collect().await
    }

    async fn scan_relative(
        &self,
        instruments: &[Instrument],
        base: &Instrument,
        timeframe: Timeframe,
    ) -> Vec<ScanRecord> {
        let task = self.task(timeframe);

        // One base fetch serves the whole group.
        let Some(base_series) = task.fetch(&base.symbol).await else {
            tracing::warn!(base = %base.symbol, "Base instrument unavailable. Omitting every pair.");
            return Vec::new();
        };

        let units: Vec<_> = instruments
            .iter()
            .filter(|instrument| {
                let is_base = instrument.symbol == base.symbol;
                if is_base {
                    tracing::debug!(symbol = %instrument.symbol, "Skipping the base against itself.");
                }
                !is_base
            })
            .map(|instrument| task.relative(instrument, base, &base_series))
            .collect();

        let records: Vec<Option<ScanRecord>> =
            stream::iter(units).buffered(self.max_concurrency).collect().await;
        records.into_iter().flatten().collect()
    }

    async fn scan_pairs(
        &self,
        pairs: &[(Instrument, Instrument)],
        timeframe: Timeframe,
    ) -> Vec<ScanRecord> {
        let task = self.task(timeframe);
        let units: Vec<_> = pairs
            .iter()
            .map(|(numerator, denominator)| task.pair(numerator, denominator))
            .collect();

        let records: Vec<Option<ScanRecord>> =
            stream::iter(units).buffered(self.max_concurrency).collect().await;
        records.into_iter().flatten().collect()
    }
}
