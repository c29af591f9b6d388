use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{CallerContext, EffectiveMode, Frequency, LoanStartMode};

/// resolved rendering decision for a loan's due dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDisplay {
    pub effective_mode: EffectiveMode,
    /// concrete start date when one exists or immediate acceptance is simulated
    pub start_date: Option<NaiveDate>,
}

/// decide how a loan's due dates should render
///
/// A fixed start date always renders actual dates regardless of context. An
/// upon-acceptance loan renders relative labels in preview, and simulates
/// immediate acceptance with today's date when a live view asks for actual
/// dates. Preview of an unaccepted, undated loan never fabricates a
/// calendar date.
pub fn resolve_display_mode(
    start_mode: LoanStartMode,
    context: CallerContext,
    time: &SafeTimeProvider,
) -> ResolvedDisplay {
    match (start_mode, context) {
        (LoanStartMode::FixedDate(date), _) => ResolvedDisplay {
            effective_mode: EffectiveMode::Actual,
            start_date: Some(date),
        },
        (LoanStartMode::UponAcceptance, CallerContext::Preview) => ResolvedDisplay {
            effective_mode: EffectiveMode::Preview,
            start_date: None,
        },
        (LoanStartMode::UponAcceptance, CallerContext::Actual) => ResolvedDisplay {
            effective_mode: EffectiveMode::Actual,
            start_date: Some(time.now().date_naive()),
        },
    }
}

impl ResolvedDisplay {
    /// how installment `number` should render its due date
    pub fn row_display(
        &self,
        frequency: Frequency,
        due_date: NaiveDate,
        number: u32,
    ) -> DueDateDisplay {
        match self.effective_mode {
            EffectiveMode::Actual => DueDateDisplay::On(due_date),
            EffectiveMode::Preview => {
                DueDateDisplay::Relative(RelativeLabel::new(frequency, number))
            }
        }
    }
}

/// a due date as it should be shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DueDateDisplay {
    /// concrete calendar date
    On(NaiveDate),
    /// offset from a loan start that is not known yet
    Relative(RelativeLabel),
}

/// "N days/months/years after loan start"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelativeLabel {
    pub frequency: Frequency,
    /// whole periods after the loan start
    pub periods: u32,
}

impl RelativeLabel {
    pub fn new(frequency: Frequency, periods: u32) -> Self {
        Self { frequency, periods }
    }
}

impl fmt::Display for RelativeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (n, unit) = match self.frequency {
            Frequency::EveryThreeDays => (3 * self.periods, "day"),
            Frequency::Weekly => (7 * self.periods, "day"),
            Frequency::Monthly => (self.periods, "month"),
            Frequency::Yearly => (self.periods, "year"),
            Frequency::Once => (1, "month"),
        };
        if n == 1 {
            write!(f, "{n} {unit} after loan start")
        } else {
            write!(f, "{n} {unit}s after loan start")
        }
    }
}
