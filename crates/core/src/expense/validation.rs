//! Split-type invariants for expenses.
//!
//! Settlement assumes validated input. These checks are what callers run
//! before [`crate::settlement::SettlementCalculator::compute_settlement`], and
//! what the checked entry points run on their behalf.

use rust_decimal::Decimal;
use tripsettle_shared::types::minimal_unit;

use super::types::{Expense, SplitType};
use crate::error::SettlementError;

/// Validates one expense, returning the first violation found.
///
/// Checks, in order: positive amount, amount precision, then the rules of
/// the split type. Itemized amounts may differ from the expense amount by at
/// most one minimal unit of the currency.
pub fn validate_expense(expense: &Expense, decimal_places: u32) -> Result<(), SettlementError> {
    if expense.amount <= Decimal::ZERO {
        return Err(SettlementError::NonPositiveAmount {
            expense_id: expense.id.clone(),
            amount: expense.amount,
        });
    }
    // Trailing zeros do not count: 10.500 is a valid USD amount.
    if expense.amount.normalize().scale() > decimal_places {
        return Err(SettlementError::AmountPrecisionExceeded {
            expense_id: expense.id.clone(),
            amount: expense.amount,
            decimal_places,
        });
    }

    match expense.split_type {
        SplitType::Equal => validate_equal(expense),
        SplitType::Weighted => validate_weighted(expense),
        SplitType::Itemized => validate_itemized(expense, decimal_places),
    }
}

fn validate_equal(expense: &Expense) -> Result<(), SettlementError> {
    if expense.participant_weights.is_empty() {
        return Err(SettlementError::EmptyParticipantSet(expense.id.clone()));
    }
    match expense
        .participant_weights
        .iter()
        .find(|(_, weight)| **weight != Decimal::ONE)
    {
        Some((participant, weight)) => Err(SettlementError::NonUniformEqualWeights {
            expense_id: expense.id.clone(),
            participant: participant.clone(),
            weight: *weight,
        }),
        None => Ok(()),
    }
}

fn validate_weighted(expense: &Expense) -> Result<(), SettlementError> {
    if expense.participant_weights.is_empty() {
        return Err(SettlementError::EmptyParticipantSet(expense.id.clone()));
    }
    if let Some((participant, weight)) = expense
        .participant_weights
        .iter()
        .find(|(_, weight)| **weight <= Decimal::ZERO)
    {
        // All-zero weights are reported as a zero total.
        if expense.participant_weights.values().all(Decimal::is_zero) {
            return Err(SettlementError::ZeroTotalWeight(expense.id.clone()));
        }
        return Err(SettlementError::NonPositiveWeight {
            expense_id: expense.id.clone(),
            participant: participant.clone(),
            weight: *weight,
        });
    }
    Ok(())
}

fn validate_itemized(expense: &Expense, decimal_places: u32) -> Result<(), SettlementError> {
    let Some(amounts) = expense.participant_amounts.as_ref() else {
        return Err(SettlementError::MissingItemizedAmounts(expense.id.clone()));
    };
    if amounts.is_empty() {
        return Err(SettlementError::EmptyParticipantSet(expense.id.clone()));
    }
    if let Some((participant, amount)) = amounts.iter().find(|(_, a)| **a < Decimal::ZERO) {
        return Err(SettlementError::NegativeItemizedAmount {
            expense_id: expense.id.clone(),
            participant: participant.clone(),
            amount: *amount,
        });
    }

    let declared: Decimal = amounts.values().copied().sum();
    if (declared - expense.amount).abs() > minimal_unit(decimal_places) {
        return Err(SettlementError::ItemizedSumMismatch {
            expense_id: expense.id.clone(),
            declared,
            expected: expense.amount,
        });
    }
    Ok(())
}
