//! Settlement calculator.
//!
//! Data flow: expenses -> shares (per expense) -> summaries and pairwise
//! netting -> minimal transfers. Each call owns its accumulators, so the
//! calculator can be shared across threads and trips freely.

use std::collections::BTreeMap;

use tracing::{debug, trace};
use tripsettle_shared::config::SettlementConfig;
use tripsettle_shared::types::{CurrencyCode, CurrencyPrecision};

use super::pairwise::net_pairwise;
use super::summary::{residue, summarize};
use super::transfers::minimal_transfers;
use super::types::{ResolvedExpense, SettlementView};
use crate::error::SettlementError;
use crate::expense::{Expense, ExpenseShareCalculator, Shares};

/// Computes complete settlement views from expense lists.
#[derive(Debug, Clone)]
pub struct SettlementCalculator<P> {
    shares: ExpenseShareCalculator<P>,
}

impl<P: CurrencyPrecision> SettlementCalculator<P> {
    /// Creates a calculator with default rounding and residue handling.
    pub fn new(precision: P) -> Self {
        Self {
            shares: ExpenseShareCalculator::new(precision),
        }
    }

    /// Creates a calculator from the settlement configuration.
    pub fn from_config(precision: P, config: &SettlementConfig) -> Self {
        Self {
            shares: ExpenseShareCalculator::from_config(precision, config),
        }
    }

    /// Wraps an already configured share calculator.
    pub fn with_share_calculator(shares: ExpenseShareCalculator<P>) -> Self {
        Self { shares }
    }

    /// The share calculator used for every expense.
    pub fn share_calculator(&self) -> &ExpenseShareCalculator<P> {
        &self.shares
    }

    /// Computes each participant's share of one expense.
    pub fn compute_shares(&self, expense: &Expense) -> Shares {
        self.shares.compute_shares(expense)
    }

    /// Settles a list of expenses that all share one currency.
    ///
    /// Input must already be validated and single-currency; use
    /// [`Self::compute_settlement_checked`] to have that enforced. An empty
    /// list yields an empty view.
    pub fn compute_settlement(&self, expenses: &[Expense]) -> SettlementView {
        self.settle(expenses.iter())
    }

    /// Validates every expense and the single-currency precondition, then
    /// settles.
    pub fn compute_settlement_checked(
        &self,
        expenses: &[Expense],
    ) -> Result<SettlementView, SettlementError> {
        self.check(expenses.iter())?;
        Ok(self.compute_settlement(expenses))
    }

    /// Settles each currency independently. No exchange rates are applied.
    pub fn settle_by_currency(
        &self,
        expenses: &[Expense],
    ) -> Result<BTreeMap<CurrencyCode, SettlementView>, SettlementError> {
        let groups = expenses.iter().fold(
            BTreeMap::<&CurrencyCode, Vec<&Expense>>::new(),
            |mut acc, expense| {
                acc.entry(&expense.currency).or_default().push(expense);
                acc
            },
        );
        debug!(currencies = groups.len(), expenses = expenses.len(), "Settling by currency");

        groups
            .into_iter()
            .map(|(currency, group)| {
                self.check(group.iter().copied())?;
                Ok((currency.clone(), self.settle(group.into_iter())))
            })
            .collect()
    }

    fn check<'a>(&self, expenses: impl Iterator<Item = &'a Expense>) -> Result<(), SettlementError> {
        let mut expected: Option<&CurrencyCode> = None;
        for expense in expenses {
            match expected {
                None => expected = Some(&expense.currency),
                Some(currency) if *currency != expense.currency => {
                    return Err(SettlementError::MixedCurrencies {
                        expense_id: expense.id.clone(),
                        expected: currency.clone(),
                        found: expense.currency.clone(),
                    });
                }
                Some(_) => {}
            }
            self.shares.validate(expense)?;
        }
        Ok(())
    }

    fn settle<'a>(&self, expenses: impl Iterator<Item = &'a Expense>) -> SettlementView {
        let resolved: Vec<ResolvedExpense> = expenses
            .map(|expense| {
                let shares = self.shares.compute_shares(expense);
                trace!(expense_id = %expense.id, participants = shares.len(), "Resolved expense shares");
                ResolvedExpense {
                    payer_id: expense.payer_id.clone(),
                    amount: expense.amount,
                    shares,
                }
            })
            .collect();

        let summaries = summarize(&resolved);
        let pairwise_debts = net_pairwise(&resolved);
        let transfers = minimal_transfers(&summaries);
        let residue = residue(&summaries);

        debug!(
            expenses = resolved.len(),
            participants = summaries.len(),
            pairwise_debts = pairwise_debts.len(),
            transfers = transfers.len(),
            %residue,
            "Computed settlement"
        );

        SettlementView {
            summaries,
            pairwise_debts,
            transfers,
            residue,
        }
    }
}
