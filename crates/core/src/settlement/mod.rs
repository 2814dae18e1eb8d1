//! Settlement of a trip's expenses.
//!
//! This module implements the settlement engine:
//! - Per-person paid / owed / net summaries
//! - Pairwise netting of direct debts
//! - Greedy minimal transfer plan
//! - Settlement calculator facade, checked and per-currency entry points

pub mod pairwise;
pub mod service;
pub mod summary;
pub mod transfers;
pub mod types;

#[cfg(test)]
mod service_props;

pub use pairwise::net_pairwise;
pub use service::SettlementCalculator;
pub use summary::summarize;
pub use transfers::minimal_transfers;
pub use types::{MinimalTransfer, PairwiseDebt, PersonSummary, ResolvedExpense, SettlementView};
