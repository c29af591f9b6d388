use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::days_between;
use crate::errors::{Result, ValidationError};
use crate::money::Money;
use crate::schedule::dates::generate_payment_dates;
use crate::schedule::LoanTerms;
use crate::types::{Frequency, SkippedPaymentMode};

/// one scheduled installment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based installment number
    pub number: u32,
    pub due_date: NaiveDate,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub payment_total: Money,
    pub balance_after: Money,
}

/// full repayment schedule, derived from loan terms
///
/// Equal-principal amortization with simple daily interest on the
/// outstanding balance. Interest per row uses the actual calendar days
/// elapsed since the previous row, so two schedules with the same count but
/// different calendar placement yield different interest totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub rows: Vec<ScheduleRow>,
    /// exact sum of the stored per-row interest portions
    pub total_interest: Money,
    pub total_to_repay: Money,
    /// whether the requested first due date was moved forward one period
    pub first_due_shifted: bool,
}

impl Schedule {
    /// build the repayment schedule for `terms`
    pub fn build(terms: &LoanTerms) -> Result<Self> {
        terms.validate()?;

        let candidate = terms.first_due.resolve(terms.start_date);
        let payment_dates =
            generate_payment_dates(terms.start_date, candidate, terms.frequency, terms.count)?;

        Self::from_dates(terms, &payment_dates.dates, payment_dates.shifted)
    }

    /// build against an explicit due-date list
    ///
    /// The list length must match the installment count and every date must
    /// fall strictly after the previous one (row 0 is the start date).
    pub fn from_dates(
        terms: &LoanTerms,
        dates: &[NaiveDate],
        first_due_shifted: bool,
    ) -> Result<Self> {
        terms.validate()?;
        if dates.len() != terms.count as usize {
            return Err(ValidationError::DateCountMismatch {
                expected: terms.count,
                actual: dates.len(),
            });
        }

        let portions = terms.principal.split_into(terms.count);
        let zero_rate = terms.annual_rate.is_zero();
        let daily_rate = terms.annual_rate.daily();

        let mut rows = Vec::with_capacity(dates.len());
        let mut outstanding = terms.principal;
        let mut previous_date = terms.start_date;
        let mut total_interest = Money::ZERO;

        for (i, (&due_date, &principal_portion)) in dates.iter().zip(portions.iter()).enumerate() {
            let interest_portion = if zero_rate {
                Money::ZERO
            } else {
                let days = days_between(previous_date, due_date);
                if days <= 0 {
                    return Err(ValidationError::UnorderedDates);
                }
                accrue(outstanding, daily_rate, days)
            };

            let mut balance_after = outstanding - principal_portion;
            if balance_after.abs() <= Money::CENT {
                balance_after = Money::ZERO;
            }

            total_interest += interest_portion;
            rows.push(ScheduleRow {
                number: i as u32 + 1,
                due_date,
                principal_portion,
                interest_portion,
                payment_total: principal_portion + interest_portion,
                balance_after,
            });

            outstanding = balance_after;
            previous_date = due_date;
        }

        debug!(
            "built {}-row schedule, total interest {}",
            rows.len(),
            total_interest
        );

        Ok(Schedule {
            rows,
            total_interest,
            total_to_repay: terms.principal + total_interest,
            first_due_shifted,
        })
    }

    /// reschedule a skipped installment without changing the amount owed
    ///
    /// The skipped row stays in place collecting nothing; its amount either
    /// spreads over the remaining rows or lands in one extra installment a
    /// single period after the current last row. Both modes conserve
    /// `total_to_repay` exactly.
    pub fn reschedule_skipped(
        &self,
        row_number: u32,
        mode: SkippedPaymentMode,
        frequency: Frequency,
    ) -> Result<Schedule> {
        let idx = row_number as usize;
        if row_number == 0 || idx > self.rows.len() {
            return Err(ValidationError::RowOutOfRange {
                row: row_number,
                rows: self.rows.len(),
            });
        }
        let idx = idx - 1;

        let mut rows = self.rows.clone();
        let skipped = rows[idx];
        rows[idx].principal_portion = Money::ZERO;
        rows[idx].interest_portion = Money::ZERO;
        rows[idx].payment_total = Money::ZERO;

        match mode {
            SkippedPaymentMode::SpreadAcrossFuture => {
                let future = rows.len() - idx - 1;
                if future == 0 {
                    return Err(ValidationError::NothingToSpreadAcross);
                }
                let principal_parts = skipped.principal_portion.split_into(future as u32);
                let interest_parts = skipped.interest_portion.split_into(future as u32);
                for (j, row) in rows[idx + 1..].iter_mut().enumerate() {
                    row.principal_portion += principal_parts[j];
                    row.interest_portion += interest_parts[j];
                    row.payment_total = row.principal_portion + row.interest_portion;
                }
            }
            SkippedPaymentMode::AppendFinalInstallment => {
                let last = rows[rows.len() - 1];
                rows.push(ScheduleRow {
                    number: last.number + 1,
                    due_date: frequency.advance_by(last.due_date, 1),
                    principal_portion: skipped.principal_portion,
                    interest_portion: skipped.interest_portion,
                    payment_total: skipped.payment_total,
                    balance_after: Money::ZERO,
                });
            }
        }

        let principal = self.total_to_repay - self.total_interest;
        let mut outstanding = principal;
        for row in rows.iter_mut() {
            let mut balance_after = outstanding - row.principal_portion;
            if balance_after.abs() <= Money::CENT {
                balance_after = Money::ZERO;
            }
            row.balance_after = balance_after;
            outstanding = balance_after;
        }

        Ok(Schedule {
            rows,
            total_interest: self.total_interest,
            total_to_repay: self.total_to_repay,
            first_due_shifted: self.first_due_shifted,
        })
    }

    /// serialize for the embedding system to persist
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// restore a previously serialized schedule
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// simple daily interest on the outstanding balance, rounded once for storage
fn accrue(outstanding: Money, daily_rate: Decimal, days: i64) -> Money {
    Money::from_decimal(outstanding.as_decimal() * daily_rate * Decimal::from(days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Rate;
    use crate::types::FirstDue;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn monthly_terms(principal_cents: i64, percent: u32, count: u32) -> LoanTerms {
        LoanTerms {
            principal: Money::from_cents(principal_cents),
            annual_rate: Rate::from_percentage(percent),
            count,
            frequency: Frequency::Monthly,
            start_date: ymd(2025, 1, 1),
            first_due: FirstDue::OffsetDays(0),
        }
    }

    #[test]
    fn test_end_to_end_monthly_schedule() {
        // 6000.00 at 5% over 12 monthly installments from 2025-01-01; the
        // candidate first due equals the start date, so the first row lands
        // on 2025-02-01 and each row accrues over real month lengths
        let schedule = Schedule::build(&monthly_terms(600_000, 5, 12)).unwrap();

        assert!(schedule.first_due_shifted);
        assert_eq!(schedule.rows.len(), 12);
        assert_eq!(schedule.rows[0].due_date, ymd(2025, 2, 1));
        assert_eq!(schedule.rows[11].due_date, ymd(2026, 1, 1));

        // every row pays down the same principal
        for row in &schedule.rows {
            assert_eq!(row.principal_portion, Money::from_cents(50_000));
        }

        // 31 days on the full balance, then 28 days on 5500.00
        assert_eq!(schedule.rows[0].interest_portion, Money::from_cents(2_548));
        assert_eq!(schedule.rows[1].interest_portion, Money::from_cents(2_110));

        // not a flat 5%/12 per row: totals come from actual day counts
        assert_eq!(schedule.total_interest, Money::from_cents(16_185));
        assert_eq!(schedule.total_to_repay, Money::from_cents(616_185));
        assert_eq!(schedule.rows[11].balance_after, Money::ZERO);
    }

    #[test]
    fn test_row_sum_invariants() {
        // 1000.01 over 7 rows forces a remainder spread
        let schedule = Schedule::build(&monthly_terms(100_001, 7, 7)).unwrap();

        let principal_sum: Money = schedule.rows.iter().map(|r| r.principal_portion).sum();
        let interest_sum: Money = schedule.rows.iter().map(|r| r.interest_portion).sum();

        assert_eq!(principal_sum, Money::from_cents(100_001));
        assert_eq!(interest_sum, schedule.total_interest);
        assert_eq!(
            schedule.total_to_repay,
            Money::from_cents(100_001) + schedule.total_interest
        );
        assert_eq!(schedule.rows.last().unwrap().balance_after, Money::ZERO);
    }

    #[test]
    fn test_build_is_idempotent() {
        let terms = monthly_terms(123_456, 9, 10);
        assert_eq!(Schedule::build(&terms).unwrap(), Schedule::build(&terms).unwrap());
    }

    #[test]
    fn test_zero_rate_shortcut() {
        let schedule = Schedule::build(&monthly_terms(90_000, 0, 4)).unwrap();

        for row in &schedule.rows {
            assert_eq!(row.interest_portion, Money::ZERO);
            assert_eq!(row.payment_total, row.principal_portion);
        }
        assert_eq!(schedule.total_interest, Money::ZERO);
        assert_eq!(schedule.total_to_repay, Money::from_cents(90_000));
    }

    #[test]
    fn test_calendar_placement_changes_interest() {
        // same principal, rate and count; one schedule crosses the 2024 leap
        // February, the other the ordinary 2025 one
        let mut leap = monthly_terms(600_000, 5, 2);
        leap.start_date = ymd(2024, 1, 1);
        let mut plain = monthly_terms(600_000, 5, 2);
        plain.start_date = ymd(2025, 1, 1);

        let leap = Schedule::build(&leap).unwrap();
        let plain = Schedule::build(&plain).unwrap();

        assert_ne!(leap.total_interest, plain.total_interest);
    }

    #[test]
    fn test_from_dates_rejects_mismatched_list() {
        let terms = monthly_terms(100_000, 5, 3);
        let dates = vec![ymd(2025, 2, 1), ymd(2025, 3, 1)];
        assert!(matches!(
            Schedule::from_dates(&terms, &dates, false),
            Err(ValidationError::DateCountMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_from_dates_rejects_unordered_dates() {
        let terms = monthly_terms(100_000, 5, 3);
        let dates = vec![ymd(2025, 2, 1), ymd(2025, 1, 15), ymd(2025, 3, 1)];
        assert!(matches!(
            Schedule::from_dates(&terms, &dates, false),
            Err(ValidationError::UnorderedDates)
        ));
    }

    #[test]
    fn test_once_schedule_has_single_row() {
        let terms = LoanTerms {
            principal: Money::from_cents(50_000),
            annual_rate: Rate::from_percentage(10),
            count: 1,
            frequency: Frequency::Once,
            start_date: ymd(2025, 1, 1),
            first_due: FirstDue::On(ymd(2025, 3, 1)),
        };
        let schedule = Schedule::build(&terms).unwrap();

        assert_eq!(schedule.rows.len(), 1);
        // 59 days at 10%/365 on 500.00 = 8.0821..., stored as 8.08
        assert_eq!(schedule.rows[0].interest_portion, Money::from_cents(808));
        assert_eq!(schedule.rows[0].balance_after, Money::ZERO);
    }

    #[test]
    fn test_reschedule_spread_conserves_totals() {
        let original = Schedule::build(&monthly_terms(600_000, 5, 12)).unwrap();
        let spread = original
            .reschedule_skipped(3, SkippedPaymentMode::SpreadAcrossFuture, Frequency::Monthly)
            .unwrap();

        assert_eq!(spread.rows.len(), 12);
        assert_eq!(spread.rows[2].payment_total, Money::ZERO);
        assert_eq!(spread.total_to_repay, original.total_to_repay);
        assert_eq!(spread.total_interest, original.total_interest);

        let paid: Money = spread.rows.iter().map(|r| r.payment_total).sum();
        assert_eq!(paid, original.total_to_repay);
        assert_eq!(spread.rows.last().unwrap().balance_after, Money::ZERO);
    }

    #[test]
    fn test_reschedule_append_adds_final_installment() {
        let original = Schedule::build(&monthly_terms(600_000, 5, 12)).unwrap();
        let appended = original
            .reschedule_skipped(5, SkippedPaymentMode::AppendFinalInstallment, Frequency::Monthly)
            .unwrap();

        assert_eq!(appended.rows.len(), 13);
        assert_eq!(appended.rows[4].payment_total, Money::ZERO);

        let extra = appended.rows.last().unwrap();
        assert_eq!(extra.number, 13);
        assert_eq!(extra.due_date, ymd(2026, 2, 1));
        assert_eq!(extra.payment_total, original.rows[4].payment_total);
        assert_eq!(extra.balance_after, Money::ZERO);

        let paid: Money = appended.rows.iter().map(|r| r.payment_total).sum();
        assert_eq!(paid, original.total_to_repay);
    }

    #[test]
    fn test_reschedule_rejects_bad_rows() {
        let schedule = Schedule::build(&monthly_terms(600_000, 5, 12)).unwrap();

        assert!(matches!(
            schedule.reschedule_skipped(0, SkippedPaymentMode::SpreadAcrossFuture, Frequency::Monthly),
            Err(ValidationError::RowOutOfRange { row: 0, rows: 12 })
        ));
        assert!(matches!(
            schedule.reschedule_skipped(13, SkippedPaymentMode::SpreadAcrossFuture, Frequency::Monthly),
            Err(ValidationError::RowOutOfRange { row: 13, rows: 12 })
        ));
        // the last row has no future rows to spread across
        assert!(matches!(
            schedule.reschedule_skipped(12, SkippedPaymentMode::SpreadAcrossFuture, Frequency::Monthly),
            Err(ValidationError::NothingToSpreadAcross)
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let schedule = Schedule::build(&monthly_terms(600_000, 5, 12)).unwrap();
        let json = schedule.to_json().unwrap();
        assert_eq!(Schedule::from_json(&json).unwrap(), schedule);
    }
}
