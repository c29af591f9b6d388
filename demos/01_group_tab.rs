/// split a shared bill, net out payments, and suggest settlements
use lendtab_rs::{
    compute_actual_paid, compute_balances, compute_fair_shares, generate_settlements,
    global_fairness_score, redistribute_overpayment, Money, Participant, PeerPayment,
    RemainingShare, SplitMode, Tab, TabKind, Uuid,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // a 90.00 dinner bill split evenly across three people
    let tab = Tab {
        kind: TabKind::OneBill,
        total: Some(Money::from_cents(9_000)),
        split_mode: SplitMode::Equal,
        expenses: Vec::new(),
    };
    let participants: Vec<Participant> =
        (0..3).map(|_| Participant::new(Uuid::new_v4())).collect();

    // one participant has already paid the restaurant
    let payments = vec![PeerPayment {
        from: participants[0].id,
        to: None,
        amount: Money::from_cents(9_000),
        approved: true,
    }];

    let outcome = compute_fair_shares(&tab, &participants)?;
    let paid = compute_actual_paid(&tab, &participants, &payments);
    let balances = compute_balances(&outcome, &paid, &participants);

    println!("fairness score: {}", global_fairness_score(&balances));
    for settlement in generate_settlements(&balances) {
        println!(
            "{} pays {} -> {}",
            settlement.from, settlement.amount, settlement.to
        );
    }

    // a 10.00 overpayment spreads across whoever still owes
    let others: Vec<RemainingShare> = balances
        .iter()
        .skip(1)
        .map(|b| RemainingShare {
            participant_id: b.participant_id,
            remaining: b.remaining(),
        })
        .collect();
    let redistribution = redistribute_overpayment(Money::from_cents(1_000), &others)?;
    for reduction in &redistribution.reductions {
        println!(
            "{} owes {} less",
            reduction.participant_id, reduction.reduction
        );
    }

    Ok(())
}
