// In crates/core-types/src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Error, Result};

/// A ticker as understood by the price history provider (e.g. "PTT.BK", "BTC-USD").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(symbol: impl Into<String>) -> Result<Self> {
        let symbol = symbol.into().trim().to_string();
        if symbol.is_empty() {
            return Err(Error::EmptySymbol);
        }
        Ok(Self(symbol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A symbol with an optional human-readable name used as its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instrument {
    pub symbol: Symbol,
    pub name: Option<String>,
}

impl Instrument {
    pub fn new(symbol: Symbol) -> Self {
        Self { symbol, name: None }
    }

    pub fn named(symbol: Symbol, name: impl Into<String>) -> Self {
        Self {
            symbol,
            name: Some(name.into()),
        }
    }

    /// The name if one is configured, otherwise the symbol itself.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(self.symbol.as_str())
    }
}

/// Bar size requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Daily,
    Weekly,
}

/// How far back the provider should look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    SixMonths,
    TwoYears,
}

/// The user-facing timeframe choice, which fixes both interval and period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    #[default]
    Daily,
    Weekly,
}

impl Timeframe {
    pub fn interval(self) -> Interval {
        match self {
            Timeframe::Daily => Interval::Daily,
            Timeframe::Weekly => Interval::Weekly,
        }
    }

    pub fn period(self) -> Period {
        match self {
            Timeframe::Daily => Period::SixMonths,
            Timeframe::Weekly => Period::TwoYears,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeframe::Daily => f.write_str("daily"),
            Timeframe::Weekly => f.write_str("weekly"),
        }
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "d" | "1d" => Ok(Timeframe::Daily),
            "weekly" | "w" | "1wk" => Ok(Timeframe::Weekly),
            other => Err(format!("unknown timeframe '{other}', expected daily or weekly")),
        }
    }
}

/// Which MACD comparisons are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossingWindow {
    /// Compare the two bars before the latest one. The latest bar is ignored.
    #[default]
    Confirmed,
    /// Report both the confirmed comparison and the one ending on the latest bar.
    Extended,
}

impl FromStr for CrossingWindow {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "confirmed" => Ok(CrossingWindow::Confirmed),
            "extended" => Ok(CrossingWindow::Extended),
            other => Err(format!("unknown window '{other}', expected confirmed or extended")),
        }
    }
}

/// The direction of a MACD zero-line crossing between two bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Crossing {
    #[default]
    None,
    CrossUp,
    CrossDown,
}

impl Crossing {
    pub fn is_none(self) -> bool {
        self == Crossing::None
    }
}

impl fmt::Display for Crossing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Crossing::None => f.write_str("None"),
            Crossing::CrossUp => f.write_str("CrossUp"),
            Crossing::CrossDown => f.write_str("CrossDown"),
        }
    }
}

/// The outcome of classifying a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Confirmed(Crossing),
    Extended {
        one_period_ago: Crossing,
        current_period: Crossing,
    },
}

impl Classification {
    /// The "nothing happened" value for a given window.
    pub fn none(window: CrossingWindow) -> Self {
        match window {
            CrossingWindow::Confirmed => Classification::Confirmed(Crossing::None),
            CrossingWindow::Extended => Classification::Extended {
                one_period_ago: Crossing::None,
                current_period: Crossing::None,
            },
        }
    }

    pub fn is_none(&self) -> bool {
        self.headline().is_none()
    }

    /// The single crossing a presenter should color by. The current period wins
    /// over the one before it.
    pub fn headline(&self) -> Crossing {
        match *self {
            Classification::Confirmed(crossing) => crossing,
            Classification::Extended {
                one_period_ago,
                current_period,
            } => {
                if current_period.is_none() {
                    one_period_ago
                } else {
                    current_period
                }
            }
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Classification::Confirmed(crossing) => crossing.fmt(f),
            Classification::Extended {
                one_period_ago,
                current_period,
            } => {
                let mut parts = Vec::with_capacity(2);
                if !one_period_ago.is_none() {
                    parts.push(format!("{one_period_ago} (1 period ago)"));
                }
                if !current_period.is_none() {
                    parts.push(format!("{current_period} (current)"));
                }
                if parts.is_empty() {
                    f.write_str("None")
                } else {
                    f.write_str(&parts.join(" + "))
                }
            }
        }
    }
}

impl Serialize for Classification {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How members of a universe are scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanMode {
    /// Each member's own closing prices.
    Direct,
    /// Each member's closes divided by the base instrument's closes.
    RelativeStrength { base: Instrument },
}

/// What a scan group iterates over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanTarget {
    Universe {
        instruments: Vec<Instrument>,
        mode: ScanMode,
    },
    /// Explicit numerator/denominator ratios.
    Pairs(Vec<(Instrument, Instrument)>),
    /// A user-supplied list, scanned directly.
    Custom(Vec<Instrument>),
}

impl ScanTarget {
    /// Number of records a fully successful scan would produce.
    pub fn len(&self) -> usize {
        match self {
            ScanTarget::Universe { instruments, .. } => instruments.len(),
            ScanTarget::Pairs(pairs) => pairs.len(),
            ScanTarget::Custom(instruments) => instruments.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ScanTarget::Universe {
                mode: ScanMode::Direct,
                ..
            } => "universe",
            ScanTarget::Universe {
                mode: ScanMode::RelativeStrength { .. },
                ..
            } => "relative_strength",
            ScanTarget::Pairs(_) => "pairs",
            ScanTarget::Custom(_) => "custom",
        }
    }
}

/// A named unit of work for the scan orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanGroup {
    pub name: String,
    pub target: ScanTarget,
}

impl ScanGroup {
    pub fn new(name: impl Into<String>, target: ScanTarget) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }

    pub fn custom(symbols: Vec<Symbol>) -> Self {
        Self::new(
            "Custom",
            ScanTarget::Custom(symbols.into_iter().map(Instrument::new).collect()),
        )
    }
}

/// One classified line of scan output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanRecord {
    pub label: String,
    pub classification: Classification,
}

impl ScanRecord {
    pub fn new(label: impl Into<String>, classification: Classification) -> Self {
        Self {
            label: label.into(),
            classification,
        }
    }
}

/// All records produced for one group in one scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupReport {
    pub group: String,
    pub timeframe: Timeframe,
    pub records: Vec<ScanRecord>,
}
