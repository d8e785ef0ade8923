//! Net balances.
//!
//! Balances are derived from the ledger on every read and never stored.
//! Positive means the participant is owed money, negative means they owe.
//!
//! Records referencing deleted accounts are skipped rather than rejected:
//! - an expense whose payer was deleted moves nothing (their credits are
//!   dropped);
//! - a split whose participant was deleted moves nothing (their debt is
//!   forgiven);
//! - a settlement with a deleted payer or payee moves nothing.
//!
//! Each skip removes both sides of the movement, so the balances still sum to
//! zero. The skipped amounts are reported by [`Balances::forgiven`].
//!
//! Accumulation saturates at the bounds of [`Money`] instead of failing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Expense, Member, Money, ParticipantId, Settlement, Transaction};

/// Net balance per participant, in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Balances {
    entries: Vec<(ParticipantId, Money)>,
    positions: HashMap<ParticipantId, usize>,
    forgiven: Money,
}

impl Balances {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` (signed) to `participant`'s balance.
    pub fn add(&mut self, participant: ParticipantId, amount: Money) {
        match self.positions.get(&participant) {
            Some(&idx) => {
                let balance = &mut self.entries[idx].1;
                *balance = balance.saturating_add(amount);
            }
            None => {
                self.positions.insert(participant, self.entries.len());
                self.entries.push((participant, amount));
            }
        }
    }

    /// Balance of `participant`; zero if they never appeared.
    #[must_use]
    pub fn get(&self, participant: ParticipantId) -> Money {
        self.positions
            .get(&participant)
            .map_or(Money::ZERO, |&idx| self.entries[idx].1)
    }

    /// Iterates balances in the order participants first appeared.
    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, Money)> + '_ {
        self.entries.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all balances. Zero for any ledger.
    #[must_use]
    pub fn total(&self) -> Money {
        self.entries
            .iter()
            .fold(Money::ZERO, |sum, (_, amount)| sum.saturating_add(*amount))
    }

    /// Amount that left circulation because a deleted account was involved.
    #[must_use]
    pub fn forgiven(&self) -> Money {
        self.forgiven
    }

    /// Number of participants whose balance is not settled.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.entries.iter().filter(|(_, amount)| !amount.is_zero()).count()
    }

    /// Balances after every transaction has been paid.
    #[must_use]
    pub fn apply(&self, transactions: &[Transaction]) -> Balances {
        let mut next = self.clone();
        for tx in transactions {
            next.add(tx.from, tx.amount);
            next.add(tx.to, tx.amount.saturating_neg());
        }
        next
    }

    fn forgive(&mut self, amount: Money) {
        self.forgiven = self.forgiven.saturating_add(amount);
    }
}

impl FromIterator<(ParticipantId, Money)> for Balances {
    fn from_iter<T: IntoIterator<Item = (ParticipantId, Money)>>(iter: T) -> Self {
        let mut balances = Balances::new();
        for (participant, amount) in iter {
            balances.add(participant, amount);
        }
        balances
    }
}

/// How a participant stands in the group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    /// Others owe them money.
    Owed,
    /// They owe money.
    Owes,
    Settled,
}

impl Standing {
    #[must_use]
    pub fn of(balance: Money) -> Self {
        if balance.is_positive() {
            Standing::Owed
        } else if balance.is_negative() {
            Standing::Owes
        } else {
            Standing::Settled
        }
    }
}

/// Folds expenses and settlements into one net balance per participant.
///
/// The result does not depend on the order of the records, except for the
/// iteration order of [`Balances`] (first appearance).
///
/// # Examples
///
/// ```rust
/// use engine::{Expense, Money, ParticipantId, Split, compute_balances};
///
/// let (a, b) = (ParticipantId::random(), ParticipantId::random());
/// let dinner = Expense::new(a, vec![Split::new(a, Money::new(1000)), Split::new(b, Money::new(1000))]);
/// let balances = compute_balances(&[dinner], &[]);
/// assert_eq!(balances.get(a), Money::new(1000));
/// assert_eq!(balances.get(b), Money::new(-1000));
/// ```
pub fn compute_balances(expenses: &[Expense], settlements: &[Settlement]) -> Balances {
    let mut balances = Balances::new();

    for expense in expenses {
        let Member::Active(payer) = expense.payer else {
            tracing::debug!(total = %expense.total_amount, "skipping expense paid by a deleted account");
            for split in expense.splits.iter().filter(|split| !split.participant.is_deleted()) {
                balances.forgive(split.owed_amount);
            }
            continue;
        };

        for split in &expense.splits {
            match split.participant {
                Member::Active(participant) if participant == payer => {}
                Member::Active(participant) => {
                    balances.add(payer, split.owed_amount);
                    balances.add(participant, split.owed_amount.saturating_neg());
                }
                Member::Deleted => {
                    tracing::debug!(amount = %split.owed_amount, "skipping split of a deleted account");
                    balances.forgive(split.owed_amount);
                }
            }
        }
    }

    for settlement in settlements {
        match (settlement.payer, settlement.payee) {
            (Member::Active(payer), Member::Active(payee)) => {
                balances.add(payer, settlement.amount);
                balances.add(payee, settlement.amount.saturating_neg());
            }
            _ => {
                tracing::debug!(amount = %settlement.amount, "skipping settlement with a deleted party");
                balances.forgive(settlement.amount);
            }
        }
    }

    tracing::debug!(
        expenses = expenses.len(),
        settlements = settlements.len(),
        participants = balances.len(),
        "computed balances"
    );
    balances
}
