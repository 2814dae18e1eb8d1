//! Application configuration management.

use std::collections::HashMap;

use rust_decimal::RoundingStrategy;
use serde::Deserialize;

use crate::error::AppResult;
use crate::types::PrecisionTable;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Settlement engine configuration.
    #[serde(default)]
    pub settlement: SettlementConfig,
    /// Currency precision configuration.
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How a share that falls exactly between two minimal units is rounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Round half to nearest even number (banker's rounding).
    #[default]
    HalfEven,
    /// Round half away from zero (e.g., 0.125 -> 0.13).
    HalfUp,
}

impl RoundingMode {
    /// Returns the matching `rust_decimal` strategy.
    #[must_use]
    pub const fn strategy(self) -> RoundingStrategy {
        match self {
            Self::HalfEven => RoundingStrategy::MidpointNearestEven,
            Self::HalfUp => RoundingStrategy::MidpointAwayFromZero,
        }
    }
}

/// What happens to the rounding residue of an equal or weighted split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResiduePolicy {
    /// Keep each participant's independently rounded share; the residue is
    /// reported on the settlement view but belongs to no one.
    #[default]
    Retain,
    /// Hand leftover minimal units out so shares sum exactly to the amount.
    Distribute,
}

/// Settlement engine configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SettlementConfig {
    /// Rounding mode applied to every computed share.
    #[serde(default)]
    pub rounding: RoundingMode,
    /// Residue handling for equal and weighted splits.
    #[serde(default)]
    pub residue: ResiduePolicy,
}

/// Currency precision configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrencyConfig {
    /// Decimal places per currency code, overriding ISO 4217.
    #[serde(default)]
    pub precision: HashMap<String, u32>,
}

impl CurrencyConfig {
    /// Builds the precision lookup from the configured overrides.
    pub fn precision_table(&self) -> AppResult<PrecisionTable> {
        PrecisionTable::from_overrides(&self.precision)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "tripsettle=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TRIPSETTLE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
