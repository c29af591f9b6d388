use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::money::Money;
use crate::types::ParticipantId;

/// one participant's remaining share going into a redistribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainingShare {
    pub participant_id: ParticipantId,
    /// fair share minus paid so far, floored at zero
    pub remaining: Money,
}

/// reduction applied to one participant's remaining share
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reduction {
    pub participant_id: ParticipantId,
    pub reduction: Money,
}

/// outcome of redistributing one overpayment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redistribution {
    pub reductions: Vec<Reduction>,
    /// overpay exceeding every other remaining share; stays with the payer
    pub undistributed: Money,
}

impl Redistribution {
    pub fn total_reduced(&self) -> Money {
        self.reductions.iter().map(|r| r.reduction).sum()
    }
}

/// spread an overpayment across the other participants' remaining shares
///
/// Each reduction is floor(overpay × remaining / Σremaining); the cents lost
/// to flooring are handed out one at a time in the original participant
/// order, capped at each participant's remaining. Σreductions plus
/// `undistributed` always equals the overpay exactly, and `undistributed`
/// is zero whenever the overpay fits inside Σremaining.
pub fn redistribute_overpayment(
    overpay: Money,
    others: &[RemainingShare],
) -> Result<Redistribution> {
    if overpay.is_negative() {
        return Err(ValidationError::NegativeAmount { amount: overpay });
    }
    for share in others {
        if share.remaining.is_negative() {
            return Err(ValidationError::NegativeAmount {
                amount: share.remaining,
            });
        }
    }

    let pool: i64 = others.iter().map(|s| s.remaining.cents()).sum();
    if overpay.is_zero() || pool == 0 {
        return Ok(Redistribution {
            reductions: Vec::new(),
            undistributed: overpay,
        });
    }

    let target = overpay.cents().min(pool);
    let mut cuts: Vec<i64> = others
        .iter()
        .map(|s| {
            // i128 keeps the cross product from overflowing on large tabs
            (i128::from(target) * i128::from(s.remaining.cents()) / i128::from(pool)) as i64
        })
        .collect();

    let mut leftover = target - cuts.iter().sum::<i64>();
    for (cut, share) in cuts.iter_mut().zip(others) {
        if leftover == 0 {
            break;
        }
        if *cut < share.remaining.cents() {
            *cut += 1;
            leftover -= 1;
        }
    }

    let reductions = others
        .iter()
        .zip(&cuts)
        .filter(|(_, &cut)| cut > 0)
        .map(|(share, &cut)| Reduction {
            participant_id: share.participant_id,
            reduction: Money::from_cents(cut),
        })
        .collect();

    debug!("redistributed {} of {} overpay", target, overpay);

    Ok(Redistribution {
        reductions,
        undistributed: overpay - Money::from_cents(target),
    })
}
