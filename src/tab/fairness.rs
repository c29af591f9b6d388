use std::collections::BTreeMap;

use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::money::Money;
use crate::tab::{Balance, Participant, PeerPayment, Tab};
use crate::types::{ParticipantId, SplitMode, TabKind};

/// fair shares for one tab, plus the explicit coverage report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FairShareOutcome {
    pub shares: BTreeMap<ParticipantId, Money>,
    /// Σshares minus the effective total; nonzero only for split modes whose
    /// shares are not forced to cover it (price groups, pinned sliders)
    pub shortfall_or_surplus: Money,
}

/// each participant's fair share under the tab's split mode
pub fn compute_fair_shares(tab: &Tab, participants: &[Participant]) -> Result<FairShareOutcome> {
    if participants.is_empty() {
        return Ok(FairShareOutcome {
            shares: BTreeMap::new(),
            shortfall_or_surplus: Money::ZERO,
        });
    }

    let total = tab.effective_total()?;
    if total.is_negative() {
        return Err(ValidationError::NegativeAmount { amount: total });
    }

    let shares: Vec<Money> = match tab.split_mode {
        SplitMode::Equal => total.split_into(participants.len() as u32),
        SplitMode::Tiered => {
            let weights: Vec<Decimal> = participants.iter().map(|p| p.multiplier).collect();
            apportion(total, &weights, participants)?
        }
        SplitMode::Seats => {
            let weights: Vec<Decimal> = participants
                .iter()
                .map(|p| Decimal::from(p.seats))
                .collect();
            apportion(total, &weights, participants)?
        }
        SplitMode::PriceGroups => participants
            .iter()
            .map(|p| {
                p.group_price
                    .ok_or(ValidationError::MissingGroupPrice { id: p.id })
            })
            .collect::<Result<Vec<_>>>()?,
        SplitMode::LinkedSliders => linked_sliders(total, participants),
    };

    let assigned: Money = shares.iter().sum();
    let shortfall_or_surplus = match tab.split_mode {
        SplitMode::PriceGroups | SplitMode::LinkedSliders => assigned - total,
        SplitMode::Equal | SplitMode::Tiered | SplitMode::Seats => Money::ZERO,
    };

    debug!(
        "fair shares for {} participants, coverage delta {}",
        participants.len(),
        shortfall_or_surplus
    );

    Ok(FairShareOutcome {
        shares: participants.iter().map(|p| p.id).zip(shares).collect(),
        shortfall_or_surplus,
    })
}

/// what each participant has effectively paid in so far
///
/// Approved peer payments count for the sender and against the recipient;
/// on trip tabs, expenses a participant personally covered count as paid.
pub fn compute_actual_paid(
    tab: &Tab,
    participants: &[Participant],
    payments: &[PeerPayment],
) -> BTreeMap<ParticipantId, Money> {
    let mut paid: BTreeMap<ParticipantId, Money> =
        participants.iter().map(|p| (p.id, Money::ZERO)).collect();

    if tab.kind == TabKind::Trip {
        for expense in &tab.expenses {
            if let Some(slot) = paid.get_mut(&expense.payer) {
                *slot += expense.amount;
            }
        }
    }

    for payment in payments.iter().filter(|p| p.approved) {
        if let Some(slot) = paid.get_mut(&payment.from) {
            *slot += payment.amount;
        }
        if let Some(to) = payment.to {
            if let Some(slot) = paid.get_mut(&to) {
                *slot -= payment.amount;
            }
        }
    }

    paid
}

/// balances from fair shares and paid-to-date, in participant order
pub fn compute_balances(
    outcome: &FairShareOutcome,
    paid: &BTreeMap<ParticipantId, Money>,
    participants: &[Participant],
) -> Vec<Balance> {
    participants
        .iter()
        .map(|p| {
            let fair_share = outcome.shares.get(&p.id).copied().unwrap_or(Money::ZERO);
            let actual_paid = paid.get(&p.id).copied().unwrap_or(Money::ZERO);
            Balance {
                participant_id: p.id,
                fair_share,
                actual_paid,
                balance: actual_paid - fair_share,
            }
        })
        .collect()
}

/// weighted apportionment that conserves the total in integer cents
///
/// Floors every share, then hands leftover cents to the largest fractional
/// remainders (input order breaks ties), so Σshares == total exactly.
fn apportion(total: Money, weights: &[Decimal], participants: &[Participant]) -> Result<Vec<Money>> {
    for (weight, participant) in weights.iter().zip(participants) {
        if weight.is_sign_negative() && !weight.is_zero() {
            return Err(ValidationError::NegativeSplitWeight {
                id: participant.id,
            });
        }
    }
    let weight_sum: Decimal = weights.iter().copied().sum();
    if weight_sum.is_zero() {
        return Err(ValidationError::ZeroSplitWeights);
    }

    let total_cents = Decimal::from(total.cents());
    let exact: Vec<Decimal> = weights
        .iter()
        .map(|w| total_cents * w / weight_sum)
        .collect();
    let mut cents: Vec<i64> = exact
        .iter()
        .map(|d| d.floor().to_i64().unwrap_or(0))
        .collect();

    let mut leftover = total.cents() - cents.iter().sum::<i64>();
    let mut order: Vec<usize> = (0..cents.len()).collect();
    order.sort_by(|&a, &b| {
        let frac_a = exact[a] - exact[a].floor();
        let frac_b = exact[b] - exact[b].floor();
        frac_b.cmp(&frac_a).then(a.cmp(&b))
    });
    for index in order {
        if leftover == 0 {
            break;
        }
        cents[index] += 1;
        leftover -= 1;
    }

    Ok(cents.into_iter().map(Money::from_cents).collect())
}

/// pinned amounts stay, the rest split the remainder evenly
fn linked_sliders(total: Money, participants: &[Participant]) -> Vec<Money> {
    let pinned: Money = participants.iter().filter_map(|p| p.custom_amount).sum();
    let free: Vec<usize> = participants
        .iter()
        .enumerate()
        .filter(|(_, p)| p.custom_amount.is_none())
        .map(|(index, _)| index)
        .collect();

    let mut shares: Vec<Money> = participants
        .iter()
        .map(|p| p.custom_amount.unwrap_or(Money::ZERO))
        .collect();
    if free.is_empty() {
        // everyone pinned; the caller reads the coverage report
        return shares;
    }

    let remainder = (total - pinned).max(Money::ZERO);
    for (slot, part) in free.iter().zip(remainder.split_into(free.len() as u32)) {
        shares[*slot] = part;
    }
    shares
}
