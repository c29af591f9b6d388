use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::calendar::{add_days, add_months_clamped, add_years_leap_aware};

/// unique identifier for a tab participant
pub type ParticipantId = Uuid;

/// payment cadence for a loan schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    /// every 3 calendar days
    EveryThreeDays,
    /// every 7 calendar days
    Weekly,
    /// every calendar month, day-of-month clamped
    Monthly,
    /// every calendar year, leap-day aware
    Yearly,
    /// single payment
    Once,
}

impl Frequency {
    /// `origin` advanced by `periods` whole periods, anchored at `origin`
    ///
    /// Anchoring matters for month and year steps: a schedule starting on
    /// Jan 31 lands on Feb 28 and then Mar 31, not Mar 28.
    pub fn advance_by(&self, origin: NaiveDate, periods: u32) -> NaiveDate {
        match self {
            Frequency::EveryThreeDays => add_days(origin, 3 * i64::from(periods)),
            Frequency::Weekly => add_days(origin, 7 * i64::from(periods)),
            Frequency::Monthly => add_months_clamped(origin, periods as i32),
            Frequency::Yearly => add_years_leap_aware(origin, periods as i32),
            // a one-off payment has no cadence of its own; when a period is
            // still needed (first-due normalization) it falls back to a month
            Frequency::Once => add_months_clamped(origin, periods as i32),
        }
    }

    pub fn is_once(&self) -> bool {
        matches!(self, Frequency::Once)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::EveryThreeDays => "every 3 days",
            Frequency::Weekly => "every week",
            Frequency::Monthly => "every month",
            Frequency::Yearly => "every year",
            Frequency::Once => "once",
        };
        write!(f, "{name}")
    }
}

/// requested first due date for a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirstDue {
    /// concrete calendar date
    On(NaiveDate),
    /// days after the transfer date, for loans whose clock starts on acceptance
    OffsetDays(i64),
}

impl FirstDue {
    /// candidate first due date relative to the transfer date
    pub fn resolve(&self, transfer_date: NaiveDate) -> NaiveDate {
        match self {
            FirstDue::On(date) => *date,
            FirstDue::OffsetDays(days) => add_days(transfer_date, *days),
        }
    }
}

/// when a loan's clock starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStartMode {
    /// agreed calendar start date
    FixedDate(NaiveDate),
    /// starts whenever the borrower accepts
    UponAcceptance,
}

/// who is asking for the schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallerContext {
    /// drafting or reviewing an offer
    Preview,
    /// tracking a live agreement
    Actual,
}

/// how due dates render after resolving start mode against context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectiveMode {
    /// relative labels only, no fabricated calendar dates
    Preview,
    /// concrete calendar dates
    Actual,
}

/// what to do with a skipped installment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkippedPaymentMode {
    /// spread the skipped amount over the remaining installments
    SpreadAcrossFuture,
    /// append one extra installment at the end of the schedule
    AppendFinalInstallment,
}

/// tab flavors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TabKind {
    /// single bill with a fixed total
    OneBill,
    /// running tab whose total derives from its expenses
    Trip,
}

/// split strategy for a tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitMode {
    /// total divided evenly
    Equal,
    /// weighted by each participant's multiplier
    Tiered,
    /// weighted by seats taken
    Seats,
    /// fixed price per participant's group, independent of the total
    PriceGroups,
    /// pinned custom amounts, remainder split evenly among the rest
    LinkedSliders,
}
