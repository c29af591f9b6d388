pub mod calendar;
pub mod errors;
pub mod money;
pub mod schedule;
pub mod tab;
pub mod types;

// re-export key types
pub use errors::{Result, ValidationError};
pub use money::{Money, Rate};
pub use schedule::{
    generate_payment_dates, resolve_display_mode, DueDateDisplay, LoanTerms, PaymentDates,
    RelativeLabel, ResolvedDisplay, Schedule, ScheduleRow,
};
pub use tab::{
    compute_actual_paid, compute_balances, compute_fair_shares, generate_settlements,
    global_fairness_score, redistribute_overpayment, Balance, Expense, FairShareOutcome,
    Participant, PeerPayment, Redistribution, Reduction, RemainingShare, Settlement, Tab,
    SETTLEMENT_EPSILON,
};
pub use types::{
    CallerContext, EffectiveMode, FirstDue, Frequency, LoanStartMode, ParticipantId,
    SkippedPaymentMode, SplitMode, TabKind,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
