use crate::{
    Balances, Expense, Money, ParticipantId, Settlement, Transaction, compute_balances,
    simplify_debts,
};

/// Everything a group ledger view needs, computed in one pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerSummary {
    pub balances: Balances,
    pub transactions: Vec<Transaction>,
    /// Balance of the viewer, when one was given.
    pub my_balance: Option<Money>,
}

/// Expenses and settlements in, suggested payments out.
pub fn reconcile(expenses: &[Expense], settlements: &[Settlement]) -> Vec<Transaction> {
    simplify_debts(&compute_balances(expenses, settlements))
}

/// Computes balances and suggested payments, plus the balance of `viewer`.
pub fn summarize(
    expenses: &[Expense],
    settlements: &[Settlement],
    viewer: Option<ParticipantId>,
) -> LedgerSummary {
    let balances = compute_balances(expenses, settlements);
    let transactions = simplify_debts(&balances);
    let my_balance = viewer.map(|participant| balances.get(participant));

    LedgerSummary {
        balances,
        transactions,
        my_balance,
    }
}
