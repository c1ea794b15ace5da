// In crates/app-config/src/types.rs

use serde::Deserialize;

use core_types::{CrossingWindow, Timeframe};
use signals::types::{DEFAULT_FAST_SPAN, DEFAULT_MIN_HISTORY, DEFAULT_SLOW_SPAN};

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// Settings for the price history provider.
    pub provider: ProviderSettings,
    #[serde(default)]
    pub scanner: ScannerSettings,
    pub server: ServerSettings,
    /// Named symbol universes, in display order.
    #[serde(default)]
    pub universes: Vec<UniverseConfig>,
    /// Scan groups built on top of the universes, in display order.
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ProviderSettings {
    /// The base URL of the chart API.
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Upper bound for a single history request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ScannerSettings {
    #[serde(default = "default_fast_span")]
    pub fast_span: usize,
    #[serde(default = "default_slow_span")]
    pub slow_span: usize,
    #[serde(default = "default_min_history")]
    pub min_history: usize,
    #[serde(default)]
    pub window: CrossingWindow,
    /// How many symbols may be fetched at the same time. Each pair fetches
    /// its two legs in turn, so pairs honor the same limit.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// Upper bound for one symbol's fetch, whatever the provider.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    #[serde(default)]
    pub timeframe: Timeframe,
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            fast_span: DEFAULT_FAST_SPAN,
            slow_span: DEFAULT_SLOW_SPAN,
            min_history: DEFAULT_MIN_HISTORY,
            window: CrossingWindow::default(),
            max_concurrency: default_max_concurrency(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            timeframe: Timeframe::default(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

// --- Universes and groups ---

#[derive(Deserialize, Debug, Clone)]
pub struct UniverseConfig {
    pub name: String,
    pub instruments: Vec<InstrumentConfig>,
}

/// Either a bare symbol or a symbol with a display name.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum InstrumentConfig {
    Symbol(String),
    Named { symbol: String, name: String },
}

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GroupConfig {
    /// Scan every member of a universe directly.
    Universe {
        name: String,
        universe: String,
        #[serde(default)]
        enabled: bool,
    },
    /// Scan every member of a universe against a fixed base instrument.
    RelativeStrength {
        name: String,
        universe: String,
        base: String,
        base_label: Option<String>,
        #[serde(default)]
        enabled: bool,
    },
    /// Scan explicit numerator/denominator ratios.
    Pairs {
        name: String,
        pairs: Vec<(String, String)>,
        #[serde(default)]
        enabled: bool,
    },
}

impl GroupConfig {
    pub fn name(&self) -> &str {
        match self {
            GroupConfig::Universe { name, .. }
            | GroupConfig::RelativeStrength { name, .. }
            | GroupConfig::Pairs { name, .. } => name,
        }
    }

    /// Whether the group is selected when the user picks nothing.
    pub fn enabled(&self) -> bool {
        match self {
            GroupConfig::Universe { enabled, .. }
            | GroupConfig::RelativeStrength { enabled, .. }
            | GroupConfig::Pairs { enabled, .. } => *enabled,
        }
    }
}

/// Helper functions for serde defaults
fn default_user_agent() -> String { "Mozilla/5.0".to_string() }
fn default_request_timeout_secs() -> u64 { 10 }
fn default_fast_span() -> usize { DEFAULT_FAST_SPAN }
fn default_slow_span() -> usize { DEFAULT_SLOW_SPAN }
fn default_min_history() -> usize { DEFAULT_MIN_HISTORY }
fn default_max_concurrency() -> usize { 4 }
fn default_fetch_timeout_secs() -> u64 { 30 }
