//! Plain text output.

use std::fmt::Write;

use engine::{Currency, LedgerSummary, Split, Standing};

pub fn splits(splits: &[Split], currency: Currency) -> String {
    let mut out = String::new();
    for split in splits {
        let who = split
            .participant
            .active()
            .map_or_else(|| "(deleted)".to_string(), |id| id.to_string());
        let _ = writeln!(out, "{who}  {}", currency.format(split.owed_amount));
    }
    out
}

pub fn balances(summary: &LedgerSummary, currency: Currency) -> String {
    let mut out = String::new();
    for (participant, amount) in summary.balances.iter() {
        let label = match Standing::of(amount) {
            Standing::Owed => "is owed",
            Standing::Owes => "owes",
            Standing::Settled => "settled up",
        };
        let _ = writeln!(out, "{participant}  {label}  {}", currency.format(amount.abs()));
    }
    if !summary.balances.forgiven().is_zero() {
        let _ = writeln!(
            out,
            "forgiven (deleted accounts): {}",
            currency.format(summary.balances.forgiven())
        );
    }
    if let Some(mine) = summary.my_balance {
        let _ = writeln!(out, "your balance: {}", currency.format(mine));
    }
    out
}

pub fn transactions(summary: &LedgerSummary, currency: Currency) -> String {
    if summary.transactions.is_empty() {
        return "all settled up\n".to_string();
    }
    let mut out = String::new();
    for tx in &summary.transactions {
        let _ = writeln!(out, "{} pays {} {}", tx.from, tx.to, currency.format(tx.amount));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{Expense, Money, ParticipantId, summarize};

    #[test]
    fn lists_payments_or_settled() {
        let summary = summarize(&[], &[], None);
        assert_eq!(transactions(&summary, Currency::Sgd), "all settled up\n");

        let (a, b) = (ParticipantId::random(), ParticipantId::random());
        let expense = Expense::new(a, vec![Split::new(b, Money::new(450))]);
        let summary = summarize(&[expense], &[], Some(b));
        assert_eq!(transactions(&summary, Currency::Sgd), format!("{b} pays {a} 4.50 SGD\n"));

        let text = balances(&summary, Currency::Sgd);
        assert!(text.contains(&format!("{a}  is owed  4.50 SGD")));
        assert!(text.contains(&format!("{b}  owes  4.50 SGD")));
        assert!(text.ends_with("your balance: -4.50 SGD\n"));
    }
}
