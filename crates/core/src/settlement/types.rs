//! Settlement output types.
//!
//! Everything here is recomputed from scratch on each settlement request and
//! is never the source of truth.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tripsettle_shared::types::ParticipantId;

use crate::expense::Shares;

/// An expense reduced to what settlement needs: who paid, how much, and
/// each participant's share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedExpense {
    /// Participant who paid.
    pub payer_id: ParticipantId,
    /// Amount paid.
    pub amount: Decimal,
    /// Share owed by each participant, payer included.
    pub shares: Shares,
}

/// Aggregate position of one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSummary {
    /// The participant.
    pub participant_id: ParticipantId,
    /// Sum of amounts this participant paid.
    pub total_paid: Decimal,
    /// Sum of this participant's shares.
    pub total_owed: Decimal,
    /// `total_paid - total_owed`. Positive means the group owes them.
    pub net: Decimal,
}

impl PersonSummary {
    /// Creates a summary, deriving `net`.
    #[must_use]
    pub fn new(participant_id: ParticipantId, total_paid: Decimal, total_owed: Decimal) -> Self {
        Self {
            participant_id,
            total_paid,
            total_owed,
            net: total_paid - total_owed,
        }
    }

    /// Returns true if the group owes this participant money.
    #[must_use]
    pub fn is_creditor(&self) -> bool {
        self.net > Decimal::ZERO
    }

    /// Returns true if this participant owes the group money.
    #[must_use]
    pub fn is_debtor(&self) -> bool {
        self.net < Decimal::ZERO
    }
}

/// Netted direct debt: `from_id` owes `to_id` `amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairwiseDebt {
    /// Participant who owes.
    pub from_id: ParticipantId,
    /// Participant who is owed.
    pub to_id: ParticipantId,
    /// Positive amount owed.
    pub amount: Decimal,
}

/// One payment instruction in the minimal settlement plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimalTransfer {
    /// Participant who pays.
    pub from_id: ParticipantId,
    /// Participant who receives.
    pub to_id: ParticipantId,
    /// Positive amount to pay.
    pub amount: Decimal,
}

/// Complete settlement of one currency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementView {
    /// One entry per participant, ascending by id.
    pub summaries: Vec<PersonSummary>,
    /// One entry per indebted pair, ascending by `(min id, max id)`.
    pub pairwise_debts: Vec<PairwiseDebt>,
    /// Greedy minimal transfer plan, in emission order.
    pub transfers: Vec<MinimalTransfer>,
    /// Sum of all nets. Non-zero only when rounded shares do not add up to
    /// their expense amounts; this part is never transferred.
    pub residue: Decimal,
}

impl SettlementView {
    /// Returns the summary of a participant, if they appear in any expense.
    #[must_use]
    pub fn summary_for(&self, participant: &ParticipantId) -> Option<&PersonSummary> {
        self.summaries
            .binary_search_by(|s| s.participant_id.cmp(participant))
            .ok()
            .map(|idx| &self.summaries[idx])
    }

    /// Returns true if nobody needs to pay anybody.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Number of participants with a non-zero net balance.
    #[must_use]
    pub fn unsettled_participants(&self) -> usize {
        self.summaries.iter().filter(|s| !s.net.is_zero()).count()
    }

    /// Fractional reduction in payment count from settling every pairwise
    /// debt directly to following the minimal plan.
    ///
    /// `0.5` means half as many payments. Zero when there are no pairwise
    /// debts.
    #[must_use]
    pub fn transfer_reduction(&self) -> Decimal {
        if self.pairwise_debts.is_empty() {
            return Decimal::ZERO;
        }
        let pairwise = Decimal::from(self.pairwise_debts.len());
        let minimal = Decimal::from(self.transfers.len());
        (pairwise - minimal) / pairwise
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn id(s: &str) -> ParticipantId {
        ParticipantId::new(s)
    }

    fn debt(from: &str, to: &str, amount: Decimal) -> PairwiseDebt {
        PairwiseDebt {
            from_id: id(from),
            to_id: id(to),
            amount,
        }
    }

    fn transfer(from: &str, to: &str, amount: Decimal) -> MinimalTransfer {
        MinimalTransfer {
            from_id: id(from),
            to_id: id(to),
            amount,
        }
    }

    #[test]
    fn test_person_summary_net() {
        let summary = PersonSummary::new(id("alice"), dec!(90), dec!(30));
        assert_eq!(summary.net, dec!(60));
        assert!(summary.is_creditor());
        assert!(!summary.is_debtor());

        let summary = PersonSummary::new(id("carol"), dec!(0), dec!(45));
        assert_eq!(summary.net, dec!(-45));
        assert!(summary.is_debtor());
    }

    #[test]
    fn test_summary_for() {
        let view = SettlementView {
            summaries: vec![
                PersonSummary::new(id("alice"), dec!(90), dec!(30)),
                PersonSummary::new(id("bob"), dec!(0), dec!(60)),
            ],
            ..SettlementView::default()
        };
        assert_eq!(view.summary_for(&id("bob")).unwrap().net, dec!(-60));
        assert!(view.summary_for(&id("zed")).is_none());
        assert_eq!(view.unsettled_participants(), 2);
    }

    #[test]
    fn test_transfer_reduction() {
        let view = SettlementView {
            pairwise_debts: vec![
                debt("a", "b", dec!(10)),
                debt("b", "c", dec!(10)),
                debt("a", "c", dec!(5)),
                debt("c", "d", dec!(5)),
            ],
            transfers: vec![transfer("a", "d", dec!(15)), transfer("b", "c", dec!(5))],
            ..SettlementView::default()
        };
        assert_eq!(view.transfer_reduction(), dec!(0.5));
    }

    #[test]
    fn test_empty_view() {
        let view = SettlementView::default();
        assert!(view.is_settled());
        assert_eq!(view.transfer_reduction(), Decimal::ZERO);
        assert_eq!(view.residue, Decimal::ZERO);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(transfer("bob", "alice", dec!(15))).unwrap();
        assert_eq!(json["fromId"], "bob");
        assert_eq!(json["toId"], "alice");
        assert_eq!(json["amount"], "15");
    }
}
