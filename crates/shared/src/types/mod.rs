//! Common types used across the application.

pub mod currency;
pub mod id;

pub use currency::{CurrencyCode, CurrencyPrecision, PrecisionTable, minimal_unit};
pub use id::*;
