//! Greedy minimal transfer plan.
//!
//! Works only from net balances; who originally owed whom is discarded.
//! Each step matches the largest remaining debtor with the largest remaining
//! creditor (ties to the smaller id), so every transfer clears at least one
//! party and the plan has at most `K - 1` transfers for `K` non-zero nets.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use tripsettle_shared::types::ParticipantId;

use super::types::{MinimalTransfer, PersonSummary};

struct Party {
    id: ParticipantId,
    remaining: Decimal,
}

/// Index of the party with the largest remainder, smaller id on ties.
fn largest(parties: &[Party]) -> Option<usize> {
    parties
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| {
            a.remaining
                .cmp(&b.remaining)
                .then_with(|| b.id.cmp(&a.id))
        })
        .map(|(idx, _)| idx)
}

/// Builds the minimal transfer plan from net balances.
///
/// Stops as soon as either side is exhausted. If the nets do not sum to
/// zero, the difference stays with whichever side is left over.
#[must_use]
pub fn minimal_transfers(summaries: &[PersonSummary]) -> Vec<MinimalTransfer> {
    let mut creditors = Vec::new();
    let mut debtors = Vec::new();
    for summary in summaries {
        match summary.net.cmp(&Decimal::ZERO) {
            Ordering::Greater => creditors.push(Party {
                id: summary.participant_id.clone(),
                remaining: summary.net,
            }),
            Ordering::Less => debtors.push(Party {
                id: summary.participant_id.clone(),
                remaining: -summary.net,
            }),
            Ordering::Equal => {}
        }
    }

    let mut transfers = Vec::with_capacity((creditors.len() + debtors.len()).saturating_sub(1));
    while let (Some(d), Some(c)) = (largest(&debtors), largest(&creditors)) {
        let amount = debtors[d].remaining.min(creditors[c].remaining);
        transfers.push(MinimalTransfer {
            from_id: debtors[d].id.clone(),
            to_id: creditors[c].id.clone(),
            amount,
        });

        debtors[d].remaining -= amount;
        creditors[c].remaining -= amount;
        if debtors[d].remaining.is_zero() {
            debtors.swap_remove(d);
        }
        if creditors[c].remaining.is_zero() {
            creditors.swap_remove(c);
        }
    }

    transfers
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn nets(values: &[(&str, Decimal)]) -> Vec<PersonSummary> {
        values
            .iter()
            .map(|(id, net)| PersonSummary {
                participant_id: ParticipantId::new(*id),
                total_paid: Decimal::ZERO,
                total_owed: Decimal::ZERO,
                net: *net,
            })
            .collect()
    }

    fn as_tuples(transfers: &[MinimalTransfer]) -> Vec<(&str, &str, Decimal)> {
        transfers
            .iter()
            .map(|t| (t.from_id.as_str(), t.to_id.as_str(), t.amount))
            .collect()
    }

    #[rstest]
    #[case::alice_bob_carol(
        &[("alice", dec!(60)), ("bob", dec!(-15)), ("carol", dec!(-45))],
        vec![("carol", "alice", dec!(45)), ("bob", "alice", dec!(15))]
    )]
    #[case::one_debtor_many_creditors(
        &[("a", dec!(10)), ("b", dec!(30)), ("c", dec!(-40))],
        vec![("c", "b", dec!(30)), ("c", "a", dec!(10))]
    )]
    #[case::ties_go_to_smaller_id(
        &[("a", dec!(10)), ("b", dec!(10)), ("c", dec!(-10)), ("d", dec!(-10))],
        vec![("c", "a", dec!(10)), ("d", "b", dec!(10))]
    )]
    #[case::remainder_is_rematched(
        &[("a", dec!(50)), ("b", dec!(-30)), ("c", dec!(-20)), ("d", dec!(0))],
        vec![("b", "a", dec!(30)), ("c", "a", dec!(20))]
    )]
    #[case::all_zero(&[("a", dec!(0)), ("b", dec!(0))], vec![])]
    #[case::empty(&[], vec![])]
    fn test_minimal_transfers(
        #[case] input: &[(&str, Decimal)],
        #[case] expected: Vec<(&str, &str, Decimal)>,
    ) {
        let transfers = minimal_transfers(&nets(input));
        assert_eq!(as_tuples(&transfers), expected);
    }

    #[test]
    fn test_lone_nonzero_net_produces_nothing() {
        // Only possible when shares do not sum to amounts.
        let transfers = minimal_transfers(&nets(&[("a", dec!(0.01)), ("b", dec!(0))]));
        assert!(transfers.is_empty());
    }

    #[test]
    fn test_residue_stays_with_creditor() {
        let summaries = nets(&[("alice", dec!(66.67)), ("bob", dec!(-33.33)), ("carol", dec!(-33.33))]);
        let transfers = minimal_transfers(&summaries);
        assert_eq!(
            as_tuples(&transfers),
            vec![("bob", "alice", dec!(33.33)), ("carol", "alice", dec!(33.33))]
        );
    }

    #[test]
    fn test_transfers_zero_every_balance() {
        let summaries = nets(&[
            ("a", dec!(25.50)),
            ("b", dec!(-10.25)),
            ("c", dec!(40)),
            ("d", dec!(-55.25)),
            ("e", dec!(0)),
        ]);
        let transfers = minimal_transfers(&summaries);
        assert!(transfers.len() <= 3);

        for summary in &summaries {
            let received: Decimal = transfers
                .iter()
                .filter(|t| t.to_id == summary.participant_id)
                .map(|t| t.amount)
                .sum();
            let paid: Decimal = transfers
                .iter()
                .filter(|t| t.from_id == summary.participant_id)
                .map(|t| t.amount)
                .sum();
            assert_eq!(summary.net - received + paid, Decimal::ZERO);
        }
    }
}
