use thiserror::Error;

use crate::money::Money;
use crate::types::ParticipantId;

/// caller contract violations
///
/// Every error in this crate means the input was malformed; nothing here is
/// transient or retryable. Numeric edge cases (zero rate, zero participants,
/// zero total) are defined branches, not errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("non-positive principal: {amount}")]
    NonPositivePrincipal { amount: Money },

    #[error("negative annual rate: {percent}%")]
    NegativeRate { percent: rust_decimal::Decimal },

    #[error("installment count must be at least 1, got {count}")]
    InvalidInstallmentCount { count: u32 },

    #[error("one-off loans take exactly one installment, got {count}")]
    OneOffInstallmentCount { count: u32 },

    #[error("expected {expected} due dates, got {actual}")]
    DateCountMismatch { expected: u32, actual: usize },

    #[error("due dates must be strictly increasing from the start date")]
    UnorderedDates,

    #[error("installment {row} is out of range for a {rows}-row schedule")]
    RowOutOfRange { row: u32, rows: usize },

    #[error("no future installment can absorb the skipped payment")]
    NothingToSpreadAcross,

    #[error("tab has no total amount and no expenses to derive one from")]
    MissingTotal,

    #[error("split weights sum to zero")]
    ZeroSplitWeights,

    #[error("negative split weight for participant {id}")]
    NegativeSplitWeight { id: ParticipantId },

    #[error("participant {id} has no price group assigned")]
    MissingGroupPrice { id: ParticipantId },

    #[error("negative amount: {amount}")]
    NegativeAmount { amount: Money },
}

pub type Result<T> = std::result::Result<T, ValidationError>;
