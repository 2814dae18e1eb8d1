//! Expense model and per-expense share computation.
//!
//! - `types` - Expense input records and split types
//! - `shares` - Share calculator (equal / weighted / itemized)
//! - `allocation` - Residue distribution for the stricter residue policy
//! - `validation` - Split-type invariants checked before settlement

pub mod allocation;
pub mod shares;
pub mod types;
pub mod validation;

pub use shares::ExpenseShareCalculator;
pub use types::{Expense, Shares, SplitType};
pub use validation::validate_expense;
