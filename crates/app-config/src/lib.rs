// In crates/app-config/src/lib.rs

use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use core_types::{Instrument, ScanGroup, ScanMode, ScanTarget, Symbol};
use signals::{MacdEngine, MacdSettings};

pub mod custom;
pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use custom::parse_custom_symbols;
pub use error::{Error, Result};
pub use types::{GroupConfig, InstrumentConfig, Settings, UniverseConfig};

/// Loads the application settings from the `config/` directory.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
pub fn load_settings() -> Result<Settings> {
    load_settings_from(Path::new("config"))
}

/// Same as [`load_settings`], reading the files from `dir`.
pub fn load_settings_from(dir: &Path) -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    // Settings from environment variables (e.g., `APP__SERVER__PORT=9000`).
    load_layered(dir, &environment, Environment::with_prefix("APP").separator("__"))
}

fn load_layered(dir: &Path, environment: &str, overrides: Environment) -> Result<Settings> {
    let settings = Config::builder()
        .add_source(File::from(dir.join("base")))
        .add_source(File::from(dir.join(environment)).required(false))
        .add_source(overrides)
        .build()?;

    let settings: Settings = settings.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}

/// Loads settings from a single in-memory TOML document.
pub fn settings_from_str(toml: &str) -> Result<Settings> {
    let settings: Settings = Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}

impl Settings {
    /// Rejects settings that would make every scan fail.
    pub fn validate(&self) -> Result<()> {
        if self.scanner.max_concurrency == 0 {
            return Err(Error::InvalidSetting(
                "scanner.max_concurrency must be at least 1".into(),
            ));
        }
        MacdEngine::new(self.macd_settings()).map_err(|e| Error::InvalidSetting(e.to_string()))?;
        self.scan_groups()?;
        Ok(())
    }

    pub fn macd_settings(&self) -> MacdSettings {
        MacdSettings {
            fast_span: self.scanner.fast_span,
            slow_span: self.scanner.slow_span,
            min_history: self.scanner.min_history,
            window: self.scanner.window,
        }
    }

    pub fn universe(&self, name: &str) -> Option<&UniverseConfig> {
        self.universes.iter().find(|u| u.name == name)
    }

    /// Resolves every configured group, in configuration order.
    pub fn scan_groups(&self) -> Result<Vec<ScanGroup>> {
        self.groups.iter().map(|g| self.resolve_group(g)).collect()
    }

    /// Resolves the named groups, in configuration order. Unknown names are skipped.
    pub fn select_groups(&self, names: &[String]) -> Result<Vec<ScanGroup>> {
        for name in names {
            if !self.groups.iter().any(|g| g.name().eq_ignore_ascii_case(name)) {
                tracing::warn!(group = %name, "Ignoring unknown group.");
            }
        }
        self.groups
            .iter()
            .filter(|g| names.iter().any(|n| g.name().eq_ignore_ascii_case(n)))
            .map(|g| self.resolve_group(g))
            .collect()
    }

    /// Resolves the groups marked `enabled`.
    pub fn default_groups(&self) -> Result<Vec<ScanGroup>> {
        self.groups
            .iter()
            .filter(|g| g.enabled())
            .map(|g| self.resolve_group(g))
            .collect()
    }

    fn resolve_group(&self, group: &GroupConfig) -> Result<ScanGroup> {
        let target = match group {
            GroupConfig::Universe { name, universe, .. } => ScanTarget::Universe {
                instruments: self.universe_instruments(name, universe)?,
                mode: ScanMode::Direct,
            },
            GroupConfig::RelativeStrength {
                name,
                universe,
                base,
                base_label,
                ..
            } => {
                let base_symbol = symbol(base)?;
                let base = match base_label {
                    Some(label) => Instrument::named(base_symbol, label.clone()),
                    None => Instrument::new(base_symbol),
                };
                ScanTarget::Universe {
                    instruments: self.universe_instruments(name, universe)?,
                    mode: ScanMode::RelativeStrength { base },
                }
            }
            GroupConfig::Pairs { pairs, .. } => ScanTarget::Pairs(
                pairs
                    .iter()
                    .map(|(a, b)| Ok((Instrument::new(symbol(a)?), Instrument::new(symbol(b)?))))
                    .collect::<Result<Vec<_>>>()?,
            ),
        };
        Ok(ScanGroup::new(group.name(), target))
    }

    fn universe_instruments(&self, group: &str, universe: &str) -> Result<Vec<Instrument>> {
        let config = self.universe(universe).ok_or_else(|| Error::UnknownUniverse {
            group: group.to_string(),
            universe: universe.to_string(),
        })?;
        config.instruments.iter().map(InstrumentConfig::to_instrument).collect()
    }
}

impl InstrumentConfig {
    pub fn to_instrument(&self) -> Result<Instrument> {
        match self {
            InstrumentConfig::Symbol(s) => Ok(Instrument::new(symbol(s)?)),
            InstrumentConfig::Named { symbol: s, name } => {
                Ok(Instrument::named(symbol(s)?, name.clone()))
            }
        }
    }
}

fn symbol(raw: &str) -> Result<Symbol> {
    Symbol::new(raw).map_err(|e| Error::InvalidSetting(format!("{e}: '{raw}'")))
}
