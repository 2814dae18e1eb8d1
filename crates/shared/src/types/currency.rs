//! Currency codes and minor-unit precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts live in `rust_decimal::Decimal`; this module only answers
//! "how many decimal places does this currency settle in".

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Largest scale `Decimal` can represent.
pub const MAX_DECIMAL_PLACES: u32 = 28;

/// Decimal places used for codes missing from the ISO 4217 table.
pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

/// ISO 4217 currency code (e.g., "USD", "VND").
///
/// Always three ASCII letters, stored upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parses and normalizes a currency code.
    pub fn parse(code: &str) -> AppResult<Self> {
        let code = code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AppError::Validation(format!(
                "Invalid currency code: {code:?}"
            )));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lookup of decimal places per currency.
///
/// The settlement engine rounds every share to this precision and uses one
/// minimal unit of it as the rounding epsilon.
pub trait CurrencyPrecision {
    /// Number of decimal places for the currency's minimal unit.
    fn decimal_places(&self, currency: &CurrencyCode) -> u32;
}

impl<T: CurrencyPrecision + ?Sized> CurrencyPrecision for &T {
    fn decimal_places(&self, currency: &CurrencyCode) -> u32 {
        (**self).decimal_places(currency)
    }
}

/// Returns one minimal currency unit for the given precision (`10^-dp`).
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tripsettle_shared::types::minimal_unit;
///
/// assert_eq!(minimal_unit(2), dec!(0.01));
/// assert_eq!(minimal_unit(0), dec!(1));
/// ```
#[must_use]
pub fn minimal_unit(decimal_places: u32) -> Decimal {
    Decimal::new(1, decimal_places.min(MAX_DECIMAL_PLACES))
}

/// ISO 4217 minor units for currencies that do not use two decimals.
fn iso_decimal_places(code: &str) -> Option<u32> {
    match code {
        "BIF" | "CLP" | "DJF" | "GNF" | "ISK" | "JPY" | "KMF" | "KRW" | "PYG" | "RWF"
        | "UGX" | "UYI" | "VND" | "VUV" | "XAF" | "XOF" | "XPF" => Some(0),
        "BHD" | "IQD" | "JOD" | "KWD" | "LYD" | "OMR" | "TND" => Some(3),
        "CLF" | "UYW" => Some(4),
        _ => None,
    }
}

/// Precision table backed by ISO 4217 with per-code overrides.
#[derive(Debug, Clone, Default)]
pub struct PrecisionTable {
    overrides: HashMap<CurrencyCode, u32>,
}

impl PrecisionTable {
    /// Creates a table with only the built-in ISO 4217 data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table from configured overrides keyed by raw currency code.
    pub fn from_overrides<'a, I>(overrides: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a u32)>,
    {
        let mut table = Self::new();
        for (code, places) in overrides {
            table = table.with_override(CurrencyCode::parse(code)?, *places)?;
        }
        Ok(table)
    }

    /// Adds or replaces the precision for one currency.
    pub fn with_override(mut self, currency: CurrencyCode, decimal_places: u32) -> AppResult<Self> {
        if decimal_places > MAX_DECIMAL_PLACES {
            return Err(AppError::Validation(format!(
                "Decimal places for {currency} must be at most {MAX_DECIMAL_PLACES}, got {decimal_places}"
            )));
        }
        self.overrides.insert(currency, decimal_places);
        Ok(self)
    }
}

impl CurrencyPrecision for PrecisionTable {
    fn decimal_places(&self, currency: &CurrencyCode) -> u32 {
        self.overrides
            .get(currency)
            .copied()
            .or_else(|| iso_decimal_places(currency.as_str()))
            .unwrap_or(DEFAULT_DECIMAL_PLACES)
    }
}
