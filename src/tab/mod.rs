pub mod fairness;
pub mod redistribution;
pub mod settlement;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::money::Money;
use crate::types::{ParticipantId, SplitMode, TabKind};

pub use fairness::{
    compute_actual_paid, compute_balances, compute_fair_shares, FairShareOutcome,
};
pub use redistribution::{
    redistribute_overpayment, Redistribution, Reduction, RemainingShare,
};
pub use settlement::{
    generate_settlements, global_fairness_score, Settlement, SETTLEMENT_EPSILON,
};

/// a shared bill or running group tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub kind: TabKind,
    /// explicit bill total; a trip tab may leave this unset and derive it
    pub total: Option<Money>,
    pub split_mode: SplitMode,
    pub expenses: Vec<Expense>,
}

impl Tab {
    /// total the split applies to: the explicit amount, else the expense sum
    pub fn effective_total(&self) -> Result<Money> {
        match (self.kind, self.total) {
            (_, Some(total)) => Ok(total),
            (TabKind::Trip, None) => Ok(self.expenses.iter().map(|e| e.amount).sum()),
            (TabKind::OneBill, None) => Err(ValidationError::MissingTotal),
        }
    }
}

/// an expense one participant covered for the group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub payer: ParticipantId,
    pub amount: Money,
    pub description: String,
}

/// a recorded transfer between participants
///
/// Only approved payments count toward paid-to-date. The recipient side is
/// netted out: receiving money lowers what you have effectively paid in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerPayment {
    pub from: ParticipantId,
    /// absent when paying into the tab rather than to a person
    pub to: Option<ParticipantId>,
    pub amount: Money,
    pub approved: bool,
}

/// one participant of a tab, supplied complete by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    /// tiered split weight
    pub multiplier: Decimal,
    /// seats taken for seat-based splits
    pub seats: u32,
    /// fixed price for price-group splits
    pub group_price: Option<Money>,
    /// pinned amount for linked-slider splits
    pub custom_amount: Option<Money>,
}

impl Participant {
    pub fn new(id: ParticipantId) -> Self {
        Self {
            id,
            multiplier: Decimal::ONE,
            seats: 1,
            group_price: None,
            custom_amount: None,
        }
    }
}

/// where one participant stands against their fair share
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub participant_id: ParticipantId,
    pub fair_share: Money,
    pub actual_paid: Money,
    /// actual paid minus fair share; positive = creditor, negative = debtor
    pub balance: Money,
}

impl Balance {
    /// what is still owed toward the fair share, floored at zero
    pub fn remaining(&self) -> Money {
        (self.fair_share - self.actual_paid).max(Money::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_one_bill_requires_a_total() {
        let tab = Tab {
            kind: TabKind::OneBill,
            total: None,
            split_mode: SplitMode::Equal,
            expenses: Vec::new(),
        };
        assert!(matches!(
            tab.effective_total(),
            Err(ValidationError::MissingTotal)
        ));
    }

    #[test]
    fn test_trip_total_derives_from_expenses() {
        let payer = Uuid::new_v4();
        let tab = Tab {
            kind: TabKind::Trip,
            total: None,
            split_mode: SplitMode::Equal,
            expenses: vec![
                Expense {
                    payer,
                    amount: Money::from_cents(4_200),
                    description: "groceries".into(),
                },
                Expense {
                    payer,
                    amount: Money::from_cents(1_800),
                    description: "fuel".into(),
                },
            ],
        };
        assert_eq!(tab.effective_total().unwrap(), Money::from_cents(6_000));
    }

    #[test]
    fn test_empty_trip_total_is_zero() {
        let tab = Tab {
            kind: TabKind::Trip,
            total: None,
            split_mode: SplitMode::Equal,
            expenses: Vec::new(),
        };
        assert_eq!(tab.effective_total().unwrap(), Money::ZERO);
    }

    #[test]
    fn test_explicit_total_wins() {
        let tab = Tab {
            kind: TabKind::Trip,
            total: Some(Money::from_cents(9_999)),
            split_mode: SplitMode::Equal,
            expenses: Vec::new(),
        };
        assert_eq!(tab.effective_total().unwrap(), Money::from_cents(9_999));
    }

    #[test]
    fn test_balance_remaining_floors_at_zero() {
        let balance = Balance {
            participant_id: Uuid::new_v4(),
            fair_share: Money::from_cents(1_000),
            actual_paid: Money::from_cents(1_500),
            balance: Money::from_cents(500),
        };
        assert_eq!(balance.remaining(), Money::ZERO);

        let balance = Balance {
            actual_paid: Money::from_cents(400),
            balance: Money::from_cents(-600),
            ..balance
        };
        assert_eq!(balance.remaining(), Money::from_cents(600));
    }
}
