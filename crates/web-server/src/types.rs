// In crates/web-server/src/types.rs

use core_types::{Crossing, CrossingWindow, Timeframe};
use serde::{Deserialize, Serialize};

/// Query parameters for `GET /api/scan`.
#[derive(Debug, Default, Deserialize)]
pub struct ScanParams {
    /// Comma-separated group names. Unknown names are ignored.
    pub groups: Option<String>,
    /// Free-form custom symbol list.
    pub custom: Option<String>,
    pub timeframe: Option<Timeframe>,
    pub window: Option<CrossingWindow>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct GroupSummary {
    pub name: String,
    pub kind: String,
    pub size: usize,
    pub enabled: bool,
}

/// One line of the results table.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ResultRow {
    pub group: String,
    pub symbol: String,
    /// Display label of the classification (e.g. "CrossUp (current)").
    pub status: String,
    /// The crossing the row is colored by.
    pub crossing: Crossing,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScanResponse {
    pub timeframe: Timeframe,
    pub rows: Vec<ResultRow>,
}
