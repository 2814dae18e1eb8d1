//! Settlement engine for Tripsettle.
//!
//! This crate contains pure computation with ZERO I/O dependencies.
//! Callers fetch expenses and persist or display the results.
//!
//! # Modules
//!
//! - `expense` - Expense model, share computation and split validation
//! - `settlement` - Person summaries, pairwise netting and minimal transfers
//! - `error` - Validation errors
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tripsettle_core::{Expense, SettlementCalculator};
//! use tripsettle_shared::types::{CurrencyCode, PrecisionTable};
//!
//! let usd = CurrencyCode::parse("USD").unwrap();
//! let expenses = vec![
//!     Expense::equal("e1", "alice", dec!(90), usd.clone(), ["alice", "bob", "carol"]),
//!     Expense::equal("e2", "bob", dec!(30), usd, ["bob", "carol"]),
//! ];
//!
//! let view = SettlementCalculator::new(PrecisionTable::new()).compute_settlement(&expenses);
//! assert_eq!(view.transfers.len(), 2);
//! assert_eq!(view.transfers[0].from_id.as_str(), "carol");
//! assert_eq!(view.transfers[0].amount, dec!(45));
//! ```

pub mod error;
pub mod expense;
pub mod settlement;

pub use error::SettlementError;
pub use expense::{Expense, ExpenseShareCalculator, Shares, SplitType};
pub use settlement::{
    MinimalTransfer, PairwiseDebt, PersonSummary, SettlementCalculator, SettlementView,
};
