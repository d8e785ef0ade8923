//! Ledger records.
//!
//! [`Expense`] and [`Settlement`] are the only durable facts of a group.
//! Balances and suggested [`Transaction`]s are projections recomputed from
//! them on every read.

use serde::{Deserialize, Serialize};

use crate::{Member, Money, ParticipantId};

/// One participant's share of an expense, the payer's own share included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pub participant: Member,
    pub owed_amount: Money,
}

impl Split {
    pub fn new(participant: impl Into<Member>, owed_amount: Money) -> Self {
        Self {
            participant: participant.into(),
            owed_amount,
        }
    }
}

/// A shared cost paid by one participant.
///
/// The owed amounts of `splits` sum to `total_amount`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub payer: Member,
    pub total_amount: Money,
    pub splits: Vec<Split>,
}

impl Expense {
    /// Builds an expense whose total is the sum of its splits.
    pub fn new(payer: impl Into<Member>, splits: Vec<Split>) -> Self {
        let total_amount = splits
            .iter()
            .fold(Money::ZERO, |sum, split| sum.saturating_add(split.owed_amount));
        Self {
            payer: payer.into(),
            total_amount,
            splits,
        }
    }

    /// Returns `true` if the splits add up to the total to the cent.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.splits
            .iter()
            .try_fold(Money::ZERO, |sum, split| sum.checked_add(split.owed_amount))
            == Some(self.total_amount)
    }
}

/// A real-world payment from `payer` to `payee` that reduces outstanding
/// debt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub payer: Member,
    pub payee: Member,
    pub amount: Money,
}

impl Settlement {
    pub fn new(payer: impl Into<Member>, payee: impl Into<Member>, amount: Money) -> Self {
        Self {
            payer: payer.into(),
            payee: payee.into(),
            amount,
        }
    }
}

/// A suggested payment that moves balances toward zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Money,
}

impl Transaction {
    /// Turns the suggestion into the settlement recorded once it is paid.
    #[must_use]
    pub fn into_settlement(self) -> Settlement {
        Settlement::new(self.from, self.to, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expense_total_is_sum_of_splits() {
        let (a, b) = (ParticipantId::random(), ParticipantId::random());
        let expense = Expense::new(a, vec![Split::new(a, Money::new(500)), Split::new(b, Money::new(250))]);
        assert_eq!(expense.total_amount, Money::new(750));
        assert!(expense.is_balanced());
    }

    #[test]
    fn stored_total_that_disagrees_with_splits_is_unbalanced() {
        let a = ParticipantId::random();
        let expense = Expense {
            payer: a.into(),
            total_amount: Money::new(600),
            splits: vec![Split::new(a, Money::new(500))],
        };
        assert!(!expense.is_balanced());

        let max = Money::new(i64::MAX);
        let overflowing = Expense {
            payer: a.into(),
            total_amount: max,
            splits: vec![Split::new(a, max), Split::new(a, max)],
        };
        assert!(!overflowing.is_balanced());
    }
}
