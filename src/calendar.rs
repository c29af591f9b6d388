use chrono::{Datelike, Duration, NaiveDate};

/// shift a date by whole calendar days
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// shift a date by whole months, clamping the day into the target month
///
/// Day-of-month is preserved unless the target month is shorter, in which
/// case the result lands on that month's last valid day (Jan 31 + 1 month
/// is Feb 28, or Feb 29 in a leap year). The clamp uses the real day count
/// of the target month, never a fixed 30 or 31.
pub fn add_months_clamped(date: NaiveDate, months: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 + months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).expect("clamped day fits the target month")
}

/// shift a date by whole years, aware of leap days
///
/// Feb 29 in a non-leap target year becomes Feb 28; every other
/// day-of-month is preserved.
pub fn add_years_leap_aware(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    let day = date.day().min(days_in_month(year, date.month()));
    NaiveDate::from_ymd_opt(year, date.month(), day).expect("clamped day fits the target month")
}

/// actual calendar days from `from` to `to`, negative when `to` is earlier
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// real day count of a month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
