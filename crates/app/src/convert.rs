//! Mapping between wire types and engine types.

use std::str::FromStr;

use api_types::{
    balance::{self, BalanceView, LedgerResponse, TransactionView},
    ledger::{ExpenseRecord, Ledger, SettlementRecord},
    split::{self, SplitResponse, SplitView},
};
use engine::{
    Currency, ExactAmount, Expense, LedgerSummary, LineItem, Member, Money, ParticipantId,
    Percentage, Settlement, ShareCount, Split, SplitMode, Standing,
};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{AppError, Result};

fn money(raw: &str) -> Result<Money> {
    Ok(Money::from_str(raw)?)
}

fn decimal(raw: &str, what: &str) -> Result<Decimal> {
    Decimal::from_str(raw.trim()).map_err(|_| AppError::Input(format!("invalid {what}: {raw}")))
}

fn member(id: Option<Uuid>) -> Member {
    Member::from(id.map(ParticipantId::new))
}

pub fn split_mode(mode: split::SplitMode) -> Result<SplitMode> {
    Ok(match mode {
        split::SplitMode::Equal { participants } => SplitMode::Equal {
            participants: participants.into_iter().map(ParticipantId::new).collect(),
        },
        split::SplitMode::Exact { amounts } => SplitMode::Exact {
            amounts: amounts
                .iter()
                .map(|a| -> Result<ExactAmount> {
                    Ok(ExactAmount::new(ParticipantId::new(a.user_id), money(&a.amount)?))
                })
                .collect::<Result<_>>()?,
        },
        split::SplitMode::Percentage { percentages } => SplitMode::Percentage {
            percentages: percentages
                .iter()
                .map(|p| -> Result<Percentage> {
                    Ok(Percentage::new(
                        ParticipantId::new(p.user_id),
                        decimal(&p.percentage, "percentage")?,
                    ))
                })
                .collect::<Result<_>>()?,
        },
        split::SplitMode::Shares { shares } => SplitMode::Shares {
            shares: shares
                .iter()
                .map(|s| -> Result<ShareCount> {
                    Ok(ShareCount::new(
                        ParticipantId::new(s.user_id),
                        decimal(&s.shares, "share count")?,
                    ))
                })
                .collect::<Result<_>>()?,
        },
        split::SplitMode::LineItem { items } => SplitMode::LineItems {
            items: items
                .into_iter()
                .map(|item| -> Result<LineItem> {
                    let assignments = item
                        .assignments
                        .iter()
                        .map(|a| -> Result<ShareCount> {
                            let shares = match a.share_count.as_deref() {
                                Some(raw) => decimal(raw, "share count")?,
                                None => Decimal::ONE,
                            };
                            Ok(ShareCount::new(ParticipantId::new(a.user_id), shares))
                        })
                        .collect::<Result<_>>()?;
                    Ok(LineItem {
                        amount: money(&item.amount)?,
                        label: item.name,
                        assignments,
                    })
                })
                .collect::<Result<_>>()?,
        },
    })
}

pub fn parse_total(raw: &str) -> Result<Money> {
    money(raw)
}

pub fn expense(record: &ExpenseRecord) -> Result<Expense> {
    let splits = record
        .splits
        .iter()
        .map(|split| -> Result<Split> {
            Ok(Split::new(member(split.user_id), money(&split.owed_amount)?))
        })
        .collect::<Result<Vec<_>>>()?;
    let expense = Expense {
        payer: member(record.paid_by),
        total_amount: money(&record.amount)?,
        splits,
    };
    if !expense.is_balanced() {
        tracing::warn!(
            description = record.description.as_deref().unwrap_or(""),
            total = %expense.total_amount,
            "expense splits do not add up to its total"
        );
    }
    Ok(expense)
}

pub fn settlement(record: &SettlementRecord) -> Result<Settlement> {
    Ok(Settlement::new(
        member(record.paid_by),
        member(record.paid_to),
        money(&record.amount)?,
    ))
}

/// Converts every record of a ledger, failing on the first malformed one.
pub fn ledger(ledger: &Ledger) -> Result<(Vec<Expense>, Vec<Settlement>)> {
    let expenses = ledger.expenses.iter().map(expense).collect::<Result<_>>()?;
    let settlements = ledger.settlements.iter().map(settlement).collect::<Result<_>>()?;
    Ok((expenses, settlements))
}

pub fn currency(ledger: &Ledger, default: &str) -> Result<Currency> {
    Ok(Currency::try_from(ledger.currency.as_deref().unwrap_or(default))?)
}

pub fn split_response(splits: &[Split]) -> SplitResponse {
    SplitResponse {
        splits: splits
            .iter()
            .map(|split| SplitView {
                user_id: split.participant.active().map(ParticipantId::uuid),
                owed_amount: split.owed_amount.to_string(),
            })
            .collect(),
    }
}

fn standing(amount: Money) -> balance::Standing {
    match Standing::of(amount) {
        Standing::Owed => balance::Standing::Owed,
        Standing::Owes => balance::Standing::Owes,
        Standing::Settled => balance::Standing::Settled,
    }
}

pub fn ledger_response(summary: &LedgerSummary, currency: Currency) -> LedgerResponse {
    LedgerResponse {
        currency: currency.code().to_string(),
        balances: summary
            .balances
            .iter()
            .map(|(participant, amount)| BalanceView {
                user_id: participant.uuid(),
                balance: amount.to_string(),
                standing: standing(amount),
            })
            .collect(),
        transactions: summary
            .transactions
            .iter()
            .map(|tx| TransactionView {
                from: tx.from.uuid(),
                to: tx.to.uuid(),
                amount: tx.amount.to_string(),
            })
            .collect(),
        forgiven: summary.balances.forgiven().to_string(),
        my_balance: summary.my_balance.map(|amount| amount.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &str = "67e55044-10b1-426f-9247-bb680e5fe0c8";
    const B: &str = "67e55044-10b1-426f-9247-bb680e5fe0c9";

    #[test]
    fn converts_split_request_and_computes() {
        let json = format!(
            r#"{{"total": "10", "mode": "percentage", "percentages": [
                {{"user_id": "{A}", "percentage": "70"}},
                {{"user_id": "{B}", "percentage": "30"}}
            ]}}"#
        );
        let request: split::SplitRequest = serde_json::from_str(&json).unwrap();
        let total = parse_total(&request.total).unwrap();
        let mode = split_mode(request.mode).unwrap();
        let splits = engine::compute_splits(total, &mode).unwrap();
        let response = split_response(&splits);
        let owed: Vec<&str> = response.splits.iter().map(|s| s.owed_amount.as_str()).collect();
        assert_eq!(owed, vec!["7.00", "3.00"]);
    }

    #[test]
    fn rejects_float_like_amounts() {
        let json = format!(
            r#"{{"total": "10.005", "mode": "equal", "participants": ["{A}"]}}"#
        );
        let request: split::SplitRequest = serde_json::from_str(&json).unwrap();
        assert!(matches!(parse_total(&request.total), Err(AppError::Engine(_))));
    }

    #[test]
    fn ledger_round_trip_through_engine() {
        let json = format!(
            r#"{{
                "currency": "usd",
                "expenses": [{{"paid_by": "{A}", "amount": "30", "splits": [
                    {{"user_id": "{A}", "owed_amount": "10"}},
                    {{"user_id": "{B}", "owed_amount": "10"}},
                    {{"user_id": null, "owed_amount": "10"}}
                ]}}],
                "settlements": []
            }}"#
        );
        let parsed: Ledger = serde_json::from_str(&json).unwrap();
        let (expenses, settlements) = ledger(&parsed).unwrap();
        let summary = engine::summarize(&expenses, &settlements, None);
        let response = ledger_response(&summary, currency(&parsed, "SGD").unwrap());

        assert_eq!(response.currency, "USD");
        assert_eq!(response.forgiven, "10.00");
        assert_eq!(response.transactions.len(), 1);
        assert_eq!(response.transactions[0].amount, "10.00");
        assert_eq!(response.balances[0].standing, balance::Standing::Owed);
        assert!(response.my_balance.is_none());
    }
}
