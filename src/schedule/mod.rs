pub mod amortization;
pub mod dates;
pub mod display;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::money::{Money, Rate};
use crate::types::{FirstDue, Frequency};

pub use amortization::{Schedule, ScheduleRow};
pub use dates::{generate_payment_dates, PaymentDates};
pub use display::{
    resolve_display_mode, DueDateDisplay, RelativeLabel, ResolvedDisplay,
};

/// terms of one loan agreement, immutable per calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate: Rate,
    /// number of installments
    pub count: u32,
    pub frequency: Frequency,
    /// date the money changes hands; interest accrues from here
    pub start_date: NaiveDate,
    pub first_due: FirstDue,
}

impl LoanTerms {
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(ValidationError::NonPositivePrincipal {
                amount: self.principal,
            });
        }
        if self.annual_rate.is_negative() {
            return Err(ValidationError::NegativeRate {
                percent: self.annual_rate.as_percent(),
            });
        }
        if self.count < 1 {
            return Err(ValidationError::InvalidInstallmentCount { count: self.count });
        }
        if self.frequency.is_once() && self.count != 1 {
            return Err(ValidationError::OneOffInstallmentCount { count: self.count });
        }
        Ok(())
    }
}
