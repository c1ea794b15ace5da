// In crates/api-client/src/lib.rs

use std::time::Duration;

use app_config::types::ProviderSettings;
use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, Utc};
use core_types::{Interval, Period, PricePoint, Series, Symbol};

pub mod error;
pub mod memory;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use memory::InMemoryProvider;
pub use types::*;

/// The universal interface for a source of closing-price history.
///
/// Implementations must report unknown symbols and network failures as an
/// `Err`, never by panicking, so that one bad symbol cannot stop a scan.
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// The name of the provider (e.g., "Yahoo", "InMemory").
    fn name(&self) -> &'static str;

    /// Fetches closing prices for `symbol`, oldest first.
    async fn fetch(&self, symbol: &Symbol, interval: Interval, period: Period) -> Result<Series>;
}

fn interval_param(interval: Interval) -> &'static str {
    match interval {
        Interval::Daily => "1d",
        Interval::Weekly => "1wk",
    }
}

fn range_param(period: Period) -> &'static str {
    match period {
        Period::SixMonths => "6mo",
        Period::TwoYears => "2y",
    }
}

impl YahooClient {
    /// Constructs a new YahooClient from ProviderSettings.
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(YahooClient {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PriceHistoryProvider for YahooClient {
    fn name(&self) -> &'static str {
        "Yahoo"
    }

    /// Fetches bars from `GET /v8/finance/chart/{symbol}`.
    async fn fetch(&self, symbol: &Symbol, interval: Interval, period: Period) -> Result<Series> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol.0);

        let response_body = self
            .http_client
            .get(&url)
            .query(&[
                ("interval", interval_param(interval)),
                ("range", range_param(period)),
            ])
            .send()
            .await
            .map_err(Error::RequestFailed)?
            .text()
            .await
            .map_err(Error::RequestFailed)?;

        let series = parse_chart(symbol, &response_body)?;
        tracing::debug!(symbol = %symbol, bars = series.len(), "Fetched price history.");
        Ok(series)
    }
}

/// Converts a chart response body into a daily-dated closing series.
///
/// Each bar is stamped with midnight UTC of its exchange-local calendar date,
/// so series from exchanges in different time zones line up by date. Bars
/// without a close are skipped; a repeated date keeps the later bar.
pub fn parse_chart(symbol: &Symbol, body: &str) -> Result<Series> {
    let response: ChartResponse = serde_json::from_str(body)?;

    if let Some(error) = response.chart.error {
        return Err(Error::ApiError {
            code: error.code,
            msg: error.description,
        });
    }

    let no_data = || Error::NoData {
        symbol: symbol.0.clone(),
    };

    let result = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(no_data)?;
    let gmtoffset = result.meta.as_ref().map(|m| m.gmtoffset).unwrap_or(0);
    let quote = result.indicators.quote.into_iter().next().ok_or_else(no_data)?;

    let mut points: Vec<PricePoint> = Vec::with_capacity(result.timestamp.len());
    for (&ts, close) in result.timestamp.iter().zip(quote.close) {
        let Some(close) = close else { continue };
        let Some(local) = DateTime::<Utc>::from_timestamp(ts + gmtoffset, 0) else {
            continue;
        };
        let timestamp = local.date_naive().and_time(NaiveTime::MIN).and_utc();

        match points.last_mut() {
            Some(last) if last.timestamp == timestamp => last.close = close,
            Some(last) if last.timestamp > timestamp => continue,
            _ => points.push(PricePoint::new(timestamp, close)),
        }
    }

    if points.is_empty() {
        return Err(no_data());
    }
    Ok(Series::new(points)?)
}

// Free function to allow api_client::new usage
pub fn new(settings: &ProviderSettings) -> Result<YahooClient> {
    YahooClient::new(settings)
}
