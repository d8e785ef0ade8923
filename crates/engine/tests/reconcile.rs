use engine::{
    Balances, Expense, Member, Money, ParticipantId, Settlement, Split, SplitMode, Transaction,
    compute_balances, compute_splits, reconcile, simplify_debts, summarize,
};

fn group(n: usize) -> Vec<ParticipantId> {
    (0..n).map(|_| ParticipantId::random()).collect()
}

fn tx(from: ParticipantId, to: ParticipantId, cents: i64) -> Transaction {
    Transaction {
        from,
        to,
        amount: Money::new(cents),
    }
}

#[test]
fn meal_split_three_ways() {
    let p = group(3);
    let (a, b, c) = (p[0], p[1], p[2]);

    let splits = compute_splits(
        Money::new(3000),
        &SplitMode::Equal {
            participants: p.clone(),
        },
    )
    .unwrap();
    assert!(splits.iter().all(|s| s.owed_amount == Money::new(1000)));

    let meal = Expense {
        payer: Member::Active(a),
        total_amount: Money::new(3000),
        splits,
    };
    let balances = compute_balances(&[meal.clone()], &[]);
    assert_eq!(balances.get(a), Money::new(2000));
    assert_eq!(balances.get(b), Money::new(-1000));
    assert_eq!(balances.get(c), Money::new(-1000));

    assert_eq!(simplify_debts(&balances), vec![tx(b, a, 1000), tx(c, a, 1000)]);
    assert_eq!(reconcile(&[meal], &[]), vec![tx(b, a, 1000), tx(c, a, 1000)]);
}

#[test]
fn ten_dollars_among_three() {
    let p = group(3);
    let splits = compute_splits(Money::new(1000), &SplitMode::Equal { participants: p }).unwrap();
    let cents: Vec<i64> = splits.iter().map(|s| s.owed_amount.cents()).collect();
    assert_eq!(cents, vec![334, 333, 333]);
    assert_eq!(splits.iter().map(|s| s.owed_amount).sum::<Money>(), Money::new(1000));
}

#[test]
fn deleted_participant_leaves_payer_short() {
    let p = group(2);
    let (a, b) = (p[0], p[1]);
    let expense = Expense {
        payer: Member::Active(a),
        total_amount: Money::new(3000),
        splits: vec![
            Split::new(a, Money::new(1000)),
            Split::new(b, Money::new(1000)),
            Split::new(Member::Deleted, Money::new(1000)),
        ],
    };

    let balances = compute_balances(&[expense], &[]);
    // A paid 30.00 but only B's 10.00 is recoverable; the deleted
    // participant's 10.00 is forgiven.
    assert_eq!(balances.get(a), Money::new(1000));
    assert_eq!(balances.get(b), Money::new(-1000));
    assert_eq!(balances.total(), Money::ZERO);
    assert_eq!(balances.forgiven(), Money::new(1000));
    assert_eq!(simplify_debts(&balances), vec![tx(b, a, 1000)]);
}

#[test]
fn settlements_reduce_suggestions() {
    let p = group(3);
    let (a, b, c) = (p[0], p[1], p[2]);
    let trip = Expense::new(
        a,
        vec![
            Split::new(a, Money::new(4000)),
            Split::new(b, Money::new(4000)),
            Split::new(c, Money::new(4000)),
        ],
    );
    let taxi = Expense::new(b, vec![Split::new(a, Money::new(500)), Split::new(c, Money::new(500))]);
    let settled = Settlement::new(c, a, Money::new(2000));

    let summary = summarize(&[trip, taxi], &[settled], Some(a));
    // a: +8000 - 500 - 2000 = 5500; b: -4000 + 1000 = -3000; c: -4000 - 500 + 2000 = -2500
    assert_eq!(summary.my_balance, Some(Money::new(5500)));
    assert_eq!(summary.transactions, vec![tx(b, a, 3000), tx(c, a, 2500)]);
}

#[test]
fn recomputation_is_idempotent() {
    let p = group(4);
    let expenses = vec![
        Expense::new(p[0], vec![Split::new(p[1], Money::new(777)), Split::new(p[2], Money::new(123))]),
        Expense::new(p[3], vec![Split::new(p[0], Money::new(500)), Split::new(p[1], Money::new(500))]),
    ];
    let settlements = vec![Settlement::new(p[1], p[0], Money::new(100))];

    let first = compute_balances(&expenses, &settlements);
    let second = compute_balances(&expenses, &settlements);
    assert_eq!(first, second);
    assert_eq!(simplify_debts(&first), simplify_debts(&second));
}

#[test]
fn balances_from_plain_map_are_accepted() {
    let p = group(3);
    let balances: Balances = vec![(p[0], Money::new(-300)), (p[1], Money::new(100)), (p[2], Money::new(200))]
        .into_iter()
        .collect();
    let payments = simplify_debts(&balances);
    assert_eq!(payments, vec![tx(p[0], p[2], 200), tx(p[0], p[1], 100)]);
    assert_eq!(balances.apply(&payments).outstanding(), 0);
}
