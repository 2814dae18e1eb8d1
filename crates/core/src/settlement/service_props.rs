//! Property-based tests for the settlement calculator.
//!
//! - Conservation of money (exact under `Distribute`, bounded under `Retain`)
//! - Transfer count bound of `K - 1`
//! - Transfers zero every balance
//! - Pairwise debts agree with net balances
//! - Determinism and reorder invariance

use std::collections::BTreeMap;

use proptest::prelude::*;
use rust_decimal::Decimal;
use tripsettle_shared::config::ResiduePolicy;
use tripsettle_shared::types::{CurrencyCode, ParticipantId, PrecisionTable};

use super::service::SettlementCalculator;
use super::types::SettlementView;
use crate::expense::{Expense, ExpenseShareCalculator};

const POOL: [&str; 6] = ["ana", "ben", "cho", "dev", "eli", "fay"];

fn usd() -> CurrencyCode {
    CurrencyCode::parse("USD").unwrap()
}

/// Strategy to generate positive amounts in cents (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a non-empty subset of the participant pool.
fn participants() -> impl Strategy<Value = Vec<&'static str>> {
    prop::sample::subsequence(POOL.to_vec(), 1..=POOL.len())
}

/// Strategy to generate one valid equal or weighted expense.
fn expense(index: usize) -> impl Strategy<Value = Expense> {
    (
        prop::sample::select(POOL.to_vec()),
        positive_amount(),
        participants(),
        prop::collection::vec(1u32..5, POOL.len()),
        any::<bool>(),
    )
        .prop_map(move |(payer, amount, members, weights, weighted)| {
            let id = format!("exp-{index}");
            if weighted {
                let weights = members
                    .iter()
                    .zip(weights)
                    .map(|(m, w)| (*m, Decimal::from(w)));
                Expense::weighted(id.as_str(), payer, amount, usd(), weights)
            } else {
                Expense::equal(id.as_str(), payer, amount, usd(), members)
            }
        })
}

/// Strategy to generate a list of 0 to 12 expenses with unique ids.
fn expenses() -> impl Strategy<Value = Vec<Expense>> {
    (0usize..=12).prop_flat_map(|len| (0..len).map(expense).collect::<Vec<_>>())
}

fn retaining() -> SettlementCalculator<PrecisionTable> {
    SettlementCalculator::new(PrecisionTable::new())
}

fn distributing() -> SettlementCalculator<PrecisionTable> {
    SettlementCalculator::with_share_calculator(
        ExpenseShareCalculator::new(PrecisionTable::new()).with_residue(ResiduePolicy::Distribute),
    )
}

/// Net balance of everyone after executing the transfer plan.
fn balances_after_transfers(view: &SettlementView) -> BTreeMap<ParticipantId, Decimal> {
    let mut balances: BTreeMap<ParticipantId, Decimal> = view
        .summaries
        .iter()
        .map(|s| (s.participant_id.clone(), s.net))
        .collect();
    for transfer in &view.transfers {
        *balances.entry(transfer.from_id.clone()).or_default() += transfer.amount;
        *balances.entry(transfer.to_id.clone()).or_default() -= transfer.amount;
    }
    balances
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// With residue distribution, every cent is accounted for.
    #[test]
    fn prop_conservation_is_exact_when_distributing(expenses in expenses()) {
        let view = distributing().compute_settlement(&expenses);
        let total: Decimal = view.summaries.iter().map(|s| s.net).sum();
        prop_assert_eq!(total, Decimal::ZERO);
        prop_assert_eq!(view.residue, Decimal::ZERO);
    }

    /// Retained residue is at most half a cent per participant per expense.
    #[test]
    fn prop_conservation_is_bounded_when_retaining(expenses in expenses()) {
        let view = retaining().compute_settlement(&expenses);
        let half_cent = Decimal::new(5, 3);
        let bound: Decimal = expenses
            .iter()
            .map(|e| half_cent * Decimal::from(e.participant_count()))
            .sum();
        let total: Decimal = view.summaries.iter().map(|s| s.net).sum();
        prop_assert_eq!(total, view.residue);
        prop_assert!(view.residue.abs() <= bound, "{} > {}", view.residue, bound);
    }

    /// The plan never needs more than K - 1 transfers.
    #[test]
    fn prop_transfer_count_bound(expenses in expenses()) {
        for view in [retaining().compute_settlement(&expenses), distributing().compute_settlement(&expenses)] {
            let k = view.unsettled_participants();
            prop_assert!(view.transfers.len() <= k.saturating_sub(1));
            prop_assert!(view.transfers.iter().all(|t| t.amount > Decimal::ZERO));
            prop_assert!(view.transfers.iter().all(|t| t.from_id != t.to_id));
        }
    }

    /// Executing the plan zeroes everyone when money is conserved exactly.
    #[test]
    fn prop_transfers_zero_every_balance(expenses in expenses()) {
        let view = distributing().compute_settlement(&expenses);
        for (id, balance) in balances_after_transfers(&view) {
            prop_assert_eq!(balance, Decimal::ZERO, "{} left with {}", id, balance);
        }
    }

    /// Under retention only the residue is left over.
    #[test]
    fn prop_transfers_leave_only_residue(expenses in expenses()) {
        let view = retaining().compute_settlement(&expenses);
        let balances = balances_after_transfers(&view);
        let left: Decimal = balances.values().copied().sum();
        prop_assert_eq!(left, view.residue);
        // Leftovers sit on one side only.
        let all_credit = balances.values().all(|b| *b >= Decimal::ZERO);
        let all_debit = balances.values().all(|b| *b <= Decimal::ZERO);
        prop_assert!(all_credit || all_debit);
    }

    /// Incoming minus outgoing pairwise debt equals each participant's net.
    #[test]
    fn prop_pairwise_debts_agree_with_nets(expenses in expenses()) {
        let view = distributing().compute_settlement(&expenses);
        let mut flow: BTreeMap<ParticipantId, Decimal> = BTreeMap::new();
        for debt in &view.pairwise_debts {
            prop_assert!(debt.amount > Decimal::ZERO);
            *flow.entry(debt.to_id.clone()).or_default() += debt.amount;
            *flow.entry(debt.from_id.clone()).or_default() -= debt.amount;
        }
        for summary in &view.summaries {
            let net_flow = flow.get(&summary.participant_id).copied().unwrap_or_default();
            prop_assert_eq!(net_flow, summary.net);
        }
    }

    /// At most one pairwise debt per unordered pair.
    #[test]
    fn prop_one_debt_per_pair(expenses in expenses()) {
        let view = retaining().compute_settlement(&expenses);
        let mut pairs: Vec<(ParticipantId, ParticipantId)> = view
            .pairwise_debts
            .iter()
            .map(|d| {
                if d.from_id < d.to_id {
                    (d.from_id.clone(), d.to_id.clone())
                } else {
                    (d.to_id.clone(), d.from_id.clone())
                }
            })
            .collect();
        let before = pairs.len();
        pairs.sort();
        pairs.dedup();
        prop_assert_eq!(pairs.len(), before);
    }

    /// Same input, same output, down to ordering.
    #[test]
    fn prop_settlement_is_deterministic(expenses in expenses()) {
        let calculator = retaining();
        let first = calculator.compute_settlement(&expenses);
        let second = calculator.compute_settlement(&expenses);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    /// Permuting the expense list changes nothing.
    #[test]
    fn prop_settlement_ignores_expense_order(
        (original, shuffled) in expenses().prop_flat_map(|e| {
            (Just(e.clone()), Just(e).prop_shuffle())
        })
    ) {
        let calculator = retaining();
        let view = calculator.compute_settlement(&original);
        let permuted = calculator.compute_settlement(&shuffled);
        prop_assert_eq!(view.summaries, permuted.summaries);
        prop_assert_eq!(view.pairwise_debts, permuted.pairwise_debts);
        prop_assert_eq!(view.transfers, permuted.transfers);
    }
}
