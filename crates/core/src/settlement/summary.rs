//! Per-person paid / owed / net aggregation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tripsettle_shared::types::ParticipantId;

use super::types::{PersonSummary, ResolvedExpense};

#[derive(Default)]
struct Totals {
    paid: Decimal,
    owed: Decimal,
}

/// Builds one summary per participant appearing in any expense, as payer or
/// as participant, ascending by id.
#[must_use]
pub fn summarize(expenses: &[ResolvedExpense]) -> Vec<PersonSummary> {
    let totals = expenses.iter().fold(
        BTreeMap::<ParticipantId, Totals>::new(),
        |mut acc, expense| {
            acc.entry(expense.payer_id.clone()).or_default().paid += expense.amount;
            for (participant, share) in &expense.shares {
                acc.entry(participant.clone()).or_default().owed += *share;
            }
            acc
        },
    );

    totals
        .into_iter()
        .map(|(id, t)| PersonSummary::new(id, t.paid, t.owed))
        .collect()
}

/// Sum of all nets; zero when money is conserved exactly.
#[must_use]
pub fn residue(summaries: &[PersonSummary]) -> Decimal {
    summaries.iter().map(|s| s.net).sum()
}
