//! Settlement error types.
//!
//! Every variant is a caller-input error. Nothing is retried or recovered
//! internally; errors propagate synchronously to the immediate caller.

use rust_decimal::Decimal;
use thiserror::Error;
use tripsettle_shared::types::{CurrencyCode, ExpenseId, ParticipantId};

/// Errors raised while validating expenses for settlement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError {
    // ========== Invalid Split Configuration ==========
    /// Equal split where some weight is not exactly 1.
    #[error("Expense {expense_id}: equal split requires every weight to be 1, {participant} has {weight}")]
    NonUniformEqualWeights {
        /// The offending expense.
        expense_id: ExpenseId,
        /// First participant found with a weight other than 1.
        participant: ParticipantId,
        /// The weight found.
        weight: Decimal,
    },

    /// Weighted split with a zero or negative weight.
    #[error("Expense {expense_id}: weight for {participant} must be positive, got {weight}")]
    NonPositiveWeight {
        /// The offending expense.
        expense_id: ExpenseId,
        /// Participant carrying the weight.
        participant: ParticipantId,
        /// The weight found.
        weight: Decimal,
    },

    /// Weighted split whose weights sum to zero.
    #[error("Expense {0}: total weight must be greater than zero")]
    ZeroTotalWeight(ExpenseId),

    /// Itemized split without precomputed participant amounts.
    #[error("Expense {0}: itemized split requires participant amounts")]
    MissingItemizedAmounts(ExpenseId),

    /// Itemized split with a negative participant amount.
    #[error("Expense {expense_id}: itemized amount for {participant} cannot be negative, got {amount}")]
    NegativeItemizedAmount {
        /// The offending expense.
        expense_id: ExpenseId,
        /// Participant carrying the amount.
        participant: ParticipantId,
        /// The amount found.
        amount: Decimal,
    },

    /// Itemized amounts do not add up to the expense amount.
    #[error("Expense {expense_id}: itemized amounts sum to {declared}, expected {expected}")]
    ItemizedSumMismatch {
        /// The offending expense.
        expense_id: ExpenseId,
        /// Sum of the declared participant amounts.
        declared: Decimal,
        /// The expense amount.
        expected: Decimal,
    },

    // ========== Expense Errors ==========
    /// Expense with no participants to split between.
    #[error("Expense {0} has no participants")]
    EmptyParticipantSet(ExpenseId),

    /// Expense amount must be strictly positive.
    #[error("Expense {expense_id}: amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The offending expense.
        expense_id: ExpenseId,
        /// The amount found.
        amount: Decimal,
    },

    /// Expense amount carries more decimal places than its currency allows.
    #[error("Expense {expense_id}: amount {amount} exceeds {decimal_places} decimal places")]
    AmountPrecisionExceeded {
        /// The offending expense.
        expense_id: ExpenseId,
        /// The amount found.
        amount: Decimal,
        /// Decimal places of the expense currency.
        decimal_places: u32,
    },

    // ========== Currency Errors ==========
    /// Expense list spans more than one currency.
    #[error("Expense {expense_id} is in {found}, but this settlement is in {expected}")]
    MixedCurrencies {
        /// The offending expense.
        expense_id: ExpenseId,
        /// Currency of the first expense in the list.
        expected: CurrencyCode,
        /// Currency of the offending expense.
        found: CurrencyCode,
    },
}

impl SettlementError {
    /// Returns the error code for machine-readable output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonUniformEqualWeights { .. }
            | Self::NonPositiveWeight { .. }
            | Self::ZeroTotalWeight(_)
            | Self::MissingItemizedAmounts(_)
            | Self::NegativeItemizedAmount { .. }
            | Self::ItemizedSumMismatch { .. } => "INVALID_SPLIT_CONFIGURATION",
            Self::EmptyParticipantSet(_) => "EMPTY_PARTICIPANT_SET",
            Self::NonPositiveAmount { .. } => "NON_POSITIVE_AMOUNT",
            Self::AmountPrecisionExceeded { .. } => "INVALID_AMOUNT_PRECISION",
            Self::MixedCurrencies { .. } => "MIXED_CURRENCIES",
        }
    }

    /// Returns true for errors in the split-configuration family.
    #[must_use]
    pub fn is_invalid_split_configuration(&self) -> bool {
        self.error_code() == "INVALID_SPLIT_CONFIGURATION"
    }

    /// Returns the expense the error refers to.
    #[must_use]
    pub fn expense_id(&self) -> &ExpenseId {
        match self {
            Self::NonUniformEqualWeights { expense_id, .. }
            | Self::NonPositiveWeight { expense_id, .. }
            | Self::NegativeItemizedAmount { expense_id, .. }
            | Self::ItemizedSumMismatch { expense_id, .. }
            | Self::NonPositiveAmount { expense_id, .. }
            | Self::AmountPrecisionExceeded { expense_id, .. }
            | Self::MixedCurrencies { expense_id, .. }
            | Self::ZeroTotalWeight(expense_id)
            | Self::MissingItemizedAmounts(expense_id)
            | Self::EmptyParticipantSet(expense_id) => expense_id,
        }
    }
}
