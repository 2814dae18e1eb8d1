//! Pairwise netting of direct debts.
//!
//! Every participant owes the payer of each expense their share of it.
//! Opposite directions between the same two people cancel, leaving at most
//! one debt per unordered pair.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tripsettle_shared::types::ParticipantId;

use super::types::{PairwiseDebt, ResolvedExpense};

/// Nets direct debts between every pair of participants.
///
/// The result is ordered by the unordered pair `(min id, max id)` and does
/// not depend on the order of `expenses`.
#[must_use]
pub fn net_pairwise(expenses: &[ResolvedExpense]) -> Vec<PairwiseDebt> {
    // (low, high) -> amount low owes high; negative means high owes low.
    let balances = expenses.iter().fold(
        BTreeMap::<(ParticipantId, ParticipantId), Decimal>::new(),
        |mut acc, expense| {
            let payer = &expense.payer_id;
            for (participant, share) in &expense.shares {
                if participant == payer || share.is_zero() {
                    continue;
                }
                if participant < payer {
                    *acc.entry((participant.clone(), payer.clone())).or_default() += *share;
                } else {
                    *acc.entry((payer.clone(), participant.clone())).or_default() -= *share;
                }
            }
            acc
        },
    );

    balances
        .into_iter()
        .filter_map(|((low, high), amount)| match amount.cmp(&Decimal::ZERO) {
            Ordering::Greater => Some(PairwiseDebt {
                from_id: low,
                to_id: high,
                amount,
            }),
            Ordering::Less => Some(PairwiseDebt {
                from_id: high,
                to_id: low,
                amount: -amount,
            }),
            Ordering::Equal => None,
        })
        .collect()
}
