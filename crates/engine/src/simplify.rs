//! Debt simplification.
//!
//! Greedy largest-first matching: the largest debtor pays the largest
//! creditor as much as either side allows, then whichever side is exhausted
//! moves on. For `n` unsettled participants this produces at most `n - 1`
//! payments. It is not guaranteed to be the fewest payments possible (that
//! is a much harder combinatorial problem).
//!
//! Balances within half a cent of zero count as settled. With balances in
//! integer cents that is exactly a zero balance, and every transfer is
//! already a whole number of cents.

use crate::{Balances, Money, ParticipantId, Transaction};

struct Position {
    participant: ParticipantId,
    remaining: Money,
}

/// Suggests payments that bring every balance to zero.
///
/// Creditors and debtors are each sorted by amount, largest first; equal
/// amounts keep the iteration order of `balances`. The result is in the
/// order payments were produced.
///
/// # Examples
///
/// ```rust
/// use engine::{Balances, Money, ParticipantId, simplify_debts};
///
/// let (a, b, c) = (ParticipantId::random(), ParticipantId::random(), ParticipantId::random());
/// let balances: Balances = [(a, Money::new(2000)), (b, Money::new(-1000)), (c, Money::new(-1000))]
///     .into_iter()
///     .collect();
/// let payments = simplify_debts(&balances);
/// assert_eq!(payments.len(), 2);
/// assert_eq!((payments[0].from, payments[0].to), (b, a));
/// assert_eq!((payments[1].from, payments[1].to), (c, a));
/// ```
pub fn simplify_debts(balances: &Balances) -> Vec<Transaction> {
    let mut creditors = Vec::new();
    let mut debtors = Vec::new();
    for (participant, balance) in balances.iter() {
        if balance.is_positive() {
            creditors.push(Position {
                participant,
                remaining: balance,
            });
        } else if balance.is_negative() {
            debtors.push(Position {
                participant,
                remaining: balance.abs(),
            });
        }
    }

    // `sort_by` is stable: ties keep their input order.
    creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
    debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

    let mut transactions = Vec::with_capacity(creditors.len().max(debtors.len()));
    let (mut ci, mut di) = (0, 0);

    while ci < creditors.len() && di < debtors.len() {
        let creditor = &mut creditors[ci];
        let debtor = &mut debtors[di];
        let transfer = creditor.remaining.min(debtor.remaining);

        if transfer.is_positive() {
            transactions.push(Transaction {
                from: debtor.participant,
                to: creditor.participant,
                amount: transfer,
            });
        }

        creditor.remaining -= transfer;
        debtor.remaining -= transfer;

        if creditor.remaining.is_zero() {
            ci += 1;
        }
        if debtor.remaining.is_zero() {
            di += 1;
        }
    }

    tracing::debug!(
        creditors = creditors.len(),
        debtors = debtors.len(),
        transactions = transactions.len(),
        "simplified debts"
    );
    transactions
}
