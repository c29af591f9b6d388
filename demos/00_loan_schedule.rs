/// build a repayment schedule and reschedule a skipped installment
use lendtab_rs::chrono::NaiveDate;
use lendtab_rs::{
    FirstDue, Frequency, LoanTerms, Money, Rate, Schedule, SkippedPaymentMode,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 6000.00 at 5% over 12 monthly installments
    let terms = LoanTerms {
        principal: Money::from_cents(600_000),
        annual_rate: Rate::from_percentage(5),
        count: 12,
        frequency: Frequency::Monthly,
        start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        first_due: FirstDue::OffsetDays(0),
    };

    let schedule = Schedule::build(&terms)?;
    if schedule.first_due_shifted {
        println!("first due date moved to {}", schedule.rows[0].due_date);
    }

    for row in &schedule.rows {
        println!(
            "#{:<2} {}  principal {:>8}  interest {:>6}  payment {:>8}  balance {:>8}",
            row.number,
            row.due_date,
            row.principal_portion,
            row.interest_portion,
            row.payment_total,
            row.balance_after,
        );
    }
    println!(
        "total interest {}  total to repay {}",
        schedule.total_interest, schedule.total_to_repay
    );

    // borrower skips installment 3; spread it over the remaining rows
    let rescheduled =
        schedule.reschedule_skipped(3, SkippedPaymentMode::SpreadAcrossFuture, terms.frequency)?;
    println!(
        "after skip: row 3 pays {}, row 4 pays {}",
        rescheduled.rows[2].payment_total, rescheduled.rows[3].payment_total
    );

    Ok(())
}
