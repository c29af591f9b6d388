use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::tab::Balance;
use crate::types::ParticipantId;

/// balances within this many cents of even are treated as settled
pub const SETTLEMENT_EPSILON: Money = Money::from_cents(50);

/// a suggested transfer between two participants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Money,
}

/// how close the group is to everyone having paid their fair share
///
/// 100 means every balance is exactly zero; 0 is the theoretical maximum
/// imbalance, one participant having paid everything. The score is
/// 100 × (1 − Σ|balance| / (2 × Σfair_share)), clamped into 0..=100.
pub fn global_fairness_score(balances: &[Balance]) -> u8 {
    let fair_total: i64 = balances.iter().map(|b| b.fair_share.cents()).sum();
    if fair_total <= 0 {
        return 100;
    }
    let imbalance: i64 = balances.iter().map(|b| b.balance.cents().abs()).sum();

    let ratio = Decimal::from(imbalance) / (dec!(2) * Decimal::from(fair_total));
    let score = (Decimal::ONE_HUNDRED * (Decimal::ONE - ratio))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);

    score.to_u8().unwrap_or(0)
}

/// greedy minimal-transfer suggestions that zero out the group's balances
///
/// Debtors are worked most-negative-first against creditors
/// most-positive-first; each step transfers the smaller of the two open
/// amounts and drops whoever falls within the settlement epsilon. The result
/// is deterministic (ties break on participant id), O(n) transfers, and
/// always terminates; it is not guaranteed minimal in every case.
pub fn generate_settlements(balances: &[Balance]) -> Vec<Settlement> {
    let eps = SETTLEMENT_EPSILON.cents();

    let mut debtors: Vec<(ParticipantId, i64)> = balances
        .iter()
        .filter(|b| b.balance.cents() < -eps)
        .map(|b| (b.participant_id, b.balance.cents()))
        .collect();
    let mut creditors: Vec<(ParticipantId, i64)> = balances
        .iter()
        .filter(|b| b.balance.cents() > eps)
        .map(|b| (b.participant_id, b.balance.cents()))
        .collect();

    debtors.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
    creditors.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut settlements = Vec::new();
    let mut d = 0;
    let mut c = 0;
    while d < debtors.len() && c < creditors.len() {
        let amount = (-debtors[d].1).min(creditors[c].1);
        settlements.push(Settlement {
            from: debtors[d].0,
            to: creditors[c].0,
            amount: Money::from_cents(amount),
        });

        debtors[d].1 += amount;
        creditors[c].1 -= amount;
        if debtors[d].1.abs() <= eps {
            d += 1;
        }
        if creditors[c].1.abs() <= eps {
            c += 1;
        }
    }

    debug!("{} settlement transfers suggested", settlements.len());
    settlements
}
