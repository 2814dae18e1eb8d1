//! Per-expense share computation.
//!
//! Turns one expense into `participant -> share` in the expense currency.
//! Pure function of its inputs; validation lives in [`super::validation`].

use rust_decimal::Decimal;
use tripsettle_shared::config::{ResiduePolicy, RoundingMode, SettlementConfig};
use tripsettle_shared::types::{CurrencyCode, CurrencyPrecision};

use super::allocation;
use super::types::{Expense, Shares, SplitType};
use super::validation;
use crate::error::SettlementError;

/// Computes each participant's share of an expense.
///
/// Rounds with the configured [`RoundingMode`] to the currency's decimal
/// places. With [`ResiduePolicy::Retain`] every share is rounded
/// independently and the residue is left alone.
#[derive(Debug, Clone)]
pub struct ExpenseShareCalculator<P> {
    precision: P,
    rounding: RoundingMode,
    residue: ResiduePolicy,
}

impl<P: CurrencyPrecision> ExpenseShareCalculator<P> {
    /// Creates a calculator with banker's rounding and the `Retain` policy.
    pub fn new(precision: P) -> Self {
        Self {
            precision,
            rounding: RoundingMode::default(),
            residue: ResiduePolicy::default(),
        }
    }

    /// Creates a calculator from the settlement configuration.
    pub fn from_config(precision: P, config: &SettlementConfig) -> Self {
        Self {
            precision,
            rounding: config.rounding,
            residue: config.residue,
        }
    }

    /// Sets the rounding mode.
    #[must_use]
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// Sets the residue policy.
    #[must_use]
    pub fn with_residue(mut self, residue: ResiduePolicy) -> Self {
        self.residue = residue;
        self
    }

    /// Residue policy in effect.
    pub fn residue_policy(&self) -> ResiduePolicy {
        self.residue
    }

    /// Decimal places used for the given currency.
    pub fn decimal_places(&self, currency: &CurrencyCode) -> u32 {
        self.precision.decimal_places(currency)
    }

    /// Checks the expense against its split-type invariants.
    pub fn validate(&self, expense: &Expense) -> Result<(), SettlementError> {
        validation::validate_expense(expense, self.decimal_places(&expense.currency))
    }

    /// Computes the share owed by each participant.
    ///
    /// Returns an empty mapping when there is nothing to split: no
    /// participants, a weighted split whose weights sum to zero or less (or
    /// past `Decimal::MAX`), or an itemized split without amounts. Callers must treat an empty
    /// mapping as an invalid expense.
    pub fn compute_shares(&self, expense: &Expense) -> Shares {
        let decimal_places = self.decimal_places(&expense.currency);
        match expense.split_type {
            SplitType::Equal => self.equal_shares(expense, decimal_places),
            SplitType::Weighted => self.weighted_shares(expense, decimal_places),
            SplitType::Itemized => expense.participant_amounts.clone().unwrap_or_default(),
        }
    }

    fn round(&self, value: Decimal, decimal_places: u32) -> Decimal {
        value.round_dp_with_strategy(decimal_places, self.rounding.strategy())
    }

    fn equal_shares(&self, expense: &Expense, decimal_places: u32) -> Shares {
        let participants = &expense.participant_weights;
        if participants.is_empty() {
            return Shares::new();
        }

        match self.residue {
            ResiduePolicy::Retain => {
                let share = self.round(
                    expense.amount / Decimal::from(participants.len()),
                    decimal_places,
                );
                participants.keys().map(|id| (id.clone(), share)).collect()
            }
            ResiduePolicy::Distribute => {
                let shares = allocation::allocate_equal(
                    expense.amount,
                    participants.len(),
                    decimal_places,
                    self.rounding.strategy(),
                );
                participants.keys().cloned().zip(shares).collect()
            }
        }
    }

    fn weighted_shares(&self, expense: &Expense, decimal_places: u32) -> Shares {
        let weights = &expense.participant_weights;
        let Some(total_weight) = allocation::total_weight(weights.values()) else {
            return Shares::new();
        };
        if weights.is_empty() || total_weight <= Decimal::ZERO {
            return Shares::new();
        }

        match self.residue {
            ResiduePolicy::Retain => weights
                .iter()
                .map(|(id, weight)| {
                    let raw = allocation::proportional_share(expense.amount, *weight, total_weight);
                    (id.clone(), self.round(raw, decimal_places))
                })
                .collect(),
            ResiduePolicy::Distribute => {
                let ordered: Vec<Decimal> = weights.values().copied().collect();
                let shares = allocation::allocate_by_weights(
                    expense.amount,
                    &ordered,
                    decimal_places,
                    self.rounding.strategy(),
                );
                weights.keys().cloned().zip(shares).collect()
            }
        }
    }
}
