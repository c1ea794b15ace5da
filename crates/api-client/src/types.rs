// In crates/api-client/src/types.rs

use reqwest::Client;
use serde::Deserialize;

/// Client for the Yahoo Finance v8 chart endpoint.
#[derive(Debug, Clone)]
pub struct YahooClient {
    /// The persistent HTTP client.
    pub http_client: Client,
    /// The base URL of the chart API (e.g. "https://query1.finance.yahoo.com").
    pub base_url: String,
}

/// Top-level chart response.
#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub meta: Option<ChartMeta>,
    /// Bar open times in epoch seconds. Absent when the symbol has no bars.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
pub struct ChartMeta {
    pub symbol: Option<String>,
    /// Exchange offset from UTC in seconds.
    #[serde(default)]
    pub gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
pub struct Quote {
    /// Closing prices; `null` for bars without a trade.
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}
