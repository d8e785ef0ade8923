//! Ledger reconciliation engine for shared expenses.
//!
//! The engine is a set of pure functions over in-memory records:
//!
//! - [`compute_splits`] allocates an expense total among participants under
//!   one of five policies, exactly to the cent;
//! - [`compute_balances`] folds expenses and settlements into one net balance
//!   per participant;
//! - [`simplify_debts`] reduces balances to a short list of suggested
//!   payments;
//! - [`reconcile`] and [`summarize`] chain the last two.
//!
//! All amounts are integer cents ([`Money`]). Nothing here performs I/O or
//! keeps state, so calls can run in parallel freely and identical inputs give
//! identical outputs.

pub use balances::{Balances, Standing, compute_balances};
pub use currency::Currency;
pub use error::{EngineError, SplitError};
pub use ledger::{Expense, Settlement, Split, Transaction};
pub use money::Money;
pub use participant::{Member, ParticipantId};
pub use reconcile::{LedgerSummary, reconcile, summarize};
pub use simplify::simplify_debts;
pub use splits::{
    ExactAmount, LineItem, Percentage, ShareCount, SplitMode, compute_splits,
};

mod balances;
mod currency;
mod error;
mod ledger;
mod money;
mod participant;
mod reconcile;
mod simplify;
mod splits;
