//! Expense input types.
//!
//! Expenses are produced by collaborators (repositories, forms) and arrive
//! here already resolved to a single payer, currency and split rule.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tripsettle_shared::types::{CurrencyCode, ExpenseId, ParticipantId};

/// Per-participant share of one expense, ordered by participant id.
pub type Shares = BTreeMap<ParticipantId, Decimal>;

/// Rule governing how an expense amount is divided among participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitType {
    /// Every participant owes the same amount; all weights are 1.
    Equal,
    /// Each participant owes `amount * weight / total_weight`.
    Weighted,
    /// Shares were computed elsewhere and are supplied directly.
    Itemized,
}

/// A single trip expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Opaque identifier.
    pub id: ExpenseId,
    /// Participant who paid.
    pub payer_id: ParticipantId,
    /// Amount paid, strictly positive.
    pub amount: Decimal,
    /// Currency the expense was paid in.
    pub currency: CurrencyCode,
    /// How the amount is split.
    pub split_type: SplitType,
    /// Participant weights for equal and weighted splits.
    #[serde(default)]
    pub participant_weights: BTreeMap<ParticipantId, Decimal>,
    /// Authoritative shares for itemized splits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_amounts: Option<Shares>,
}

impl Expense {
    /// Creates an equal split between the given participants.
    pub fn equal<I>(
        id: impl Into<ExpenseId>,
        payer_id: impl Into<ParticipantId>,
        amount: Decimal,
        currency: CurrencyCode,
        participants: I,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ParticipantId>,
    {
        Self {
            id: id.into(),
            payer_id: payer_id.into(),
            amount,
            currency,
            split_type: SplitType::Equal,
            participant_weights: participants
                .into_iter()
                .map(|p| (p.into(), Decimal::ONE))
                .collect(),
            participant_amounts: None,
        }
    }

    /// Creates a weighted split.
    pub fn weighted<I, K>(
        id: impl Into<ExpenseId>,
        payer_id: impl Into<ParticipantId>,
        amount: Decimal,
        currency: CurrencyCode,
        weights: I,
    ) -> Self
    where
        I: IntoIterator<Item = (K, Decimal)>,
        K: Into<ParticipantId>,
    {
        Self {
            id: id.into(),
            payer_id: payer_id.into(),
            amount,
            currency,
            split_type: SplitType::Weighted,
            participant_weights: weights.into_iter().map(|(p, w)| (p.into(), w)).collect(),
            participant_amounts: None,
        }
    }

    /// Creates an itemized split from precomputed participant amounts.
    pub fn itemized<I, K>(
        id: impl Into<ExpenseId>,
        payer_id: impl Into<ParticipantId>,
        amount: Decimal,
        currency: CurrencyCode,
        amounts: I,
    ) -> Self
    where
        I: IntoIterator<Item = (K, Decimal)>,
        K: Into<ParticipantId>,
    {
        Self {
            id: id.into(),
            payer_id: payer_id.into(),
            amount,
            currency,
            split_type: SplitType::Itemized,
            participant_weights: BTreeMap::new(),
            participant_amounts: Some(amounts.into_iter().map(|(p, a)| (p.into(), a)).collect()),
        }
    }

    /// Number of participants the expense is split between.
    #[must_use]
    pub fn participant_count(&self) -> usize {
        match self.split_type {
            SplitType::Equal | SplitType::Weighted => self.participant_weights.len(),
            SplitType::Itemized => self.participant_amounts.as_ref().map_or(0, BTreeMap::len),
        }
    }
}
