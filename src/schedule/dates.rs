use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::types::Frequency;

/// generated due dates for one schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDates {
    /// ordered due dates, one per installment
    pub dates: Vec<NaiveDate>,
    /// first due date after normalization
    pub first_due: NaiveDate,
    /// whether normalization moved the requested first due date
    pub shifted: bool,
}

/// due dates from the transfer date, candidate first due, frequency and count
///
/// A candidate on or before the transfer date would give the first
/// installment a zero or negative interest period, so it is normalized to
/// the transfer date advanced by exactly one period. Subsequent dates are
/// anchored at the first due date, which keeps a schedule starting on the
/// 31st on each month's last valid day instead of drifting to the 28th.
pub fn generate_payment_dates(
    transfer_date: NaiveDate,
    candidate_first_due: NaiveDate,
    frequency: Frequency,
    count: u32,
) -> Result<PaymentDates> {
    if count < 1 {
        return Err(ValidationError::InvalidInstallmentCount { count });
    }
    if frequency.is_once() && count != 1 {
        return Err(ValidationError::OneOffInstallmentCount { count });
    }

    let shifted = candidate_first_due <= transfer_date;
    let first_due = if shifted {
        frequency.advance_by(transfer_date, 1)
    } else {
        candidate_first_due
    };

    let dates = (0..count).map(|i| frequency.advance_by(first_due, i)).collect();

    Ok(PaymentDates {
        dates,
        first_due,
        shifted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_valid_candidate_passes_through() {
        let out = generate_payment_dates(
            ymd(2025, 1, 1),
            ymd(2025, 1, 15),
            Frequency::Monthly,
            3,
        )
        .unwrap();

        assert!(!out.shifted);
        assert_eq!(out.first_due, ymd(2025, 1, 15));
        assert_eq!(
            out.dates,
            vec![ymd(2025, 1, 15), ymd(2025, 2, 15), ymd(2025, 3, 15)]
        );
    }

    #[test]
    fn test_candidate_on_transfer_date_is_normalized() {
        let out = generate_payment_dates(
            ymd(2025, 1, 1),
            ymd(2025, 1, 1),
            Frequency::Monthly,
            3,
        )
        .unwrap();

        assert!(out.shifted);
        assert_eq!(out.first_due, ymd(2025, 2, 1));
        assert_eq!(
            out.dates,
            vec![ymd(2025, 2, 1), ymd(2025, 3, 1), ymd(2025, 4, 1)]
        );
    }

    #[test]
    fn test_candidate_before_transfer_date_is_normalized() {
        let out = generate_payment_dates(
            ymd(2025, 3, 10),
            ymd(2025, 2, 1),
            Frequency::Weekly,
            2,
        )
        .unwrap();

        assert!(out.shifted);
        assert_eq!(out.first_due, ymd(2025, 3, 17));
        assert_eq!(out.dates, vec![ymd(2025, 3, 17), ymd(2025, 3, 24)]);
    }

    #[test]
    fn test_month_end_schedule_clamps_each_month() {
        let out = generate_payment_dates(
            ymd(2025, 1, 15),
            ymd(2025, 1, 31),
            Frequency::Monthly,
            4,
        )
        .unwrap();

        assert_eq!(
            out.dates,
            vec![
                ymd(2025, 1, 31),
                ymd(2025, 2, 28),
                ymd(2025, 3, 31),
                ymd(2025, 4, 30),
            ]
        );
    }

    #[test]
    fn test_three_day_cadence() {
        let out = generate_payment_dates(
            ymd(2025, 1, 1),
            ymd(2025, 1, 2),
            Frequency::EveryThreeDays,
            3,
        )
        .unwrap();

        assert_eq!(
            out.dates,
            vec![ymd(2025, 1, 2), ymd(2025, 1, 5), ymd(2025, 1, 8)]
        );
    }

    #[test]
    fn test_yearly_cadence_across_leap_day() {
        let out = generate_payment_dates(
            ymd(2024, 1, 1),
            ymd(2024, 2, 29),
            Frequency::Yearly,
            3,
        )
        .unwrap();

        assert_eq!(
            out.dates,
            vec![ymd(2024, 2, 29), ymd(2025, 2, 28), ymd(2026, 2, 28)]
        );
    }

    #[test]
    fn test_once_normalizes_to_one_month() {
        let out = generate_payment_dates(
            ymd(2025, 1, 31),
            ymd(2025, 1, 1),
            Frequency::Once,
            1,
        )
        .unwrap();

        assert!(out.shifted);
        assert_eq!(out.dates, vec![ymd(2025, 2, 28)]);
    }

    #[test]
    fn test_rejects_bad_counts() {
        assert!(matches!(
            generate_payment_dates(ymd(2025, 1, 1), ymd(2025, 2, 1), Frequency::Monthly, 0),
            Err(ValidationError::InvalidInstallmentCount { count: 0 })
        ));
        assert!(matches!(
            generate_payment_dates(ymd(2025, 1, 1), ymd(2025, 2, 1), Frequency::Once, 2),
            Err(ValidationError::OneOffInstallmentCount { count: 2 })
        ));
    }
}
