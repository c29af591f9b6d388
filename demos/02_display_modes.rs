/// preview an undated loan offer, then view it as if accepted today
use lendtab_rs::chrono::NaiveDate;
use lendtab_rs::{
    resolve_display_mode, CallerContext, DueDateDisplay, FirstDue, Frequency, LoanStartMode,
    LoanTerms, Money, Rate, SafeTimeProvider, Schedule, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);

    // the offer has no start date until the borrower accepts
    let preview = resolve_display_mode(
        LoanStartMode::UponAcceptance,
        CallerContext::Preview,
        &time,
    );

    let mut terms = LoanTerms {
        principal: Money::from_cents(120_000),
        annual_rate: Rate::from_percentage(8),
        count: 6,
        frequency: Frequency::Monthly,
        start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        first_due: FirstDue::OffsetDays(0),
    };

    let schedule = Schedule::build(&terms)?;
    println!("-- preview (no dates are real yet) --");
    for row in &schedule.rows {
        match preview.row_display(terms.frequency, row.due_date, row.number) {
            DueDateDisplay::Relative(label) => {
                println!("#{} due {}: {}", row.number, label, row.payment_total)
            }
            DueDateDisplay::On(date) => {
                println!("#{} due {}: {}", row.number, date, row.payment_total)
            }
        }
    }

    // a live view simulates acceptance today and rebuilds with real dates
    let actual = resolve_display_mode(
        LoanStartMode::UponAcceptance,
        CallerContext::Actual,
        &time,
    );
    if let Some(start_date) = actual.start_date {
        terms.start_date = start_date;
    }

    let schedule = Schedule::build(&terms)?;
    println!("-- as if accepted today --");
    for row in &schedule.rows {
        println!("#{} due {}: {}", row.number, row.due_date, row.payment_total);
    }

    Ok(())
}
