//! Wire types exchanged with collaborators (files, HTTP handlers, UIs).
//!
//! Money travels as decimal strings with at most two fractional digits
//! (`"12.50"`), never as floating point. Percentages and share counts are
//! decimal strings too. A `null` participant id is an account that has been
//! deleted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod split {
    use super::*;

    /// Request body for computing the splits of an expense.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SplitRequest {
        pub total: String,
        #[serde(flatten)]
        pub mode: SplitMode,
    }

    /// Allocation policy, tagged by `mode`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(tag = "mode", rename_all = "snake_case")]
    pub enum SplitMode {
        Equal { participants: Vec<Uuid> },
        Exact { amounts: Vec<ExactAmount> },
        Percentage { percentages: Vec<PercentageShare> },
        Shares { shares: Vec<ShareCount> },
        LineItem { items: Vec<LineItem> },
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExactAmount {
        pub user_id: Uuid,
        pub amount: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PercentageShare {
        pub user_id: Uuid,
        pub percentage: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ShareCount {
        pub user_id: Uuid,
        pub shares: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LineItem {
        pub name: String,
        pub amount: String,
        pub assignments: Vec<ItemAssignment>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ItemAssignment {
        pub user_id: Uuid,
        /// Defaults to one share.
        #[serde(default)]
        pub share_count: Option<String>,
    }

    /// Response body: the owed amount of each participant.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SplitResponse {
        pub splits: Vec<SplitView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SplitView {
        pub user_id: Option<Uuid>,
        pub owed_amount: String,
    }
}

pub mod ledger {
    use super::*;

    /// A group's recorded facts.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct Ledger {
        /// ISO 4217 code; the configured default applies when absent.
        #[serde(default)]
        pub currency: Option<String>,
        #[serde(default)]
        pub expenses: Vec<ExpenseRecord>,
        #[serde(default)]
        pub settlements: Vec<SettlementRecord>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseRecord {
        #[serde(default)]
        pub description: Option<String>,
        pub paid_by: Option<Uuid>,
        pub amount: String,
        pub splits: Vec<super::split::SplitView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementRecord {
        pub paid_by: Option<Uuid>,
        pub paid_to: Option<Uuid>,
        pub amount: String,
    }
}

pub mod balance {
    use super::*;

    /// How a participant stands in the group.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Standing {
        Owed,
        Owes,
        Settled,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceView {
        pub user_id: Uuid,
        /// Signed: positive is owed money, negative owes money.
        pub balance: String,
        pub standing: Standing,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub from: Uuid,
        pub to: Uuid,
        pub amount: String,
    }

    /// Response body for a ledger view.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct LedgerResponse {
        pub currency: String,
        pub balances: Vec<BalanceView>,
        pub transactions: Vec<TransactionView>,
        /// Amount dropped because of deleted accounts.
        pub forgiven: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub my_balance: Option<String>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_request_is_tagged_by_mode() {
        let json = r#"{
            "total": "30.00",
            "mode": "line_item",
            "items": [
                {"name": "pasta", "amount": "20", "assignments": [
                    {"user_id": "67e55044-10b1-426f-9247-bb680e5fe0c8", "share_count": "2"},
                    {"user_id": "67e55044-10b1-426f-9247-bb680e5fe0c9"}
                ]}
            ]
        }"#;
        let request: split::SplitRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.total, "30.00");
        let split::SplitMode::LineItem { items } = request.mode else {
            panic!("expected line items");
        };
        assert_eq!(items[0].assignments[0].share_count.as_deref(), Some("2"));
        assert_eq!(items[0].assignments[1].share_count, None);
    }

    #[test]
    fn ledger_accepts_null_participants() {
        let json = r#"{
            "expenses": [
                {"paid_by": null, "amount": "10", "splits": [{"user_id": null, "owed_amount": "10"}]}
            ],
            "settlements": [
                {"paid_by": "67e55044-10b1-426f-9247-bb680e5fe0c8", "paid_to": null, "amount": "5"}
            ]
        }"#;
        let ledger: ledger::Ledger = serde_json::from_str(json).unwrap();
        assert!(ledger.currency.is_none());
        assert!(ledger.expenses[0].paid_by.is_none());
        assert!(ledger.settlements[0].paid_to.is_none());
    }
}
