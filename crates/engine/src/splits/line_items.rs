//! Itemized (receipt style) splits.
//!
//! Each item is shared by its assignees in proportion to their share counts.
//! Whatever the total adds on top of the items (tax, tip, service charge) is
//! spread in proportion to each person's item subtotal.

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::{
    LineItem,
    rounding::{checked_decimal_sum, checked_sum, out_of_range, proportion, round_to_target},
};
use crate::{Money, ParticipantId, SplitError};

pub(super) fn split_line_items(
    total: Money,
    items: &[LineItem],
) -> Result<Vec<(ParticipantId, Money)>, SplitError> {
    let item_subtotal = checked_sum(items.iter().map(|item| item.amount))?;
    if !item_subtotal.is_positive() {
        return Err(SplitError::InvalidInput(
            "items must have a positive total".to_string(),
        ));
    }

    // Participants in first-seen order with their item subtotal in cents.
    let mut subtotals: Vec<(ParticipantId, Decimal)> = Vec::new();
    let mut positions: HashMap<ParticipantId, usize> = HashMap::new();

    for item in items {
        let item_shares = checked_decimal_sum(item.assignments.iter().map(|a| a.shares))?;
        if item_shares.is_zero() {
            return Err(SplitError::UnassignedItem {
                item: item.label.clone(),
            });
        }

        for assignment in &item.assignments {
            let share = proportion(item.amount.to_decimal_cents(), assignment.shares, item_shares)?;
            match positions.get(&assignment.participant) {
                Some(&idx) => {
                    let subtotal = &mut subtotals[idx].1;
                    *subtotal = subtotal.checked_add(share).ok_or_else(out_of_range)?;
                }
                None => {
                    positions.insert(assignment.participant, subtotals.len());
                    subtotals.push((assignment.participant, share));
                }
            }
        }
    }

    let extras = total
        .checked_sub(item_subtotal)
        .ok_or_else(out_of_range)?
        .to_decimal_cents();
    let item_subtotal = item_subtotal.to_decimal_cents();
    let raw = subtotals
        .into_iter()
        .map(|(participant, subtotal)| {
            let owed = proportion(extras, subtotal, item_subtotal)?
                .checked_add(subtotal)
                .ok_or_else(out_of_range)?;
            Ok((participant, owed))
        })
        .collect::<Result<Vec<_>, SplitError>>()?;

    round_to_target(raw, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splits::ShareCount;

    fn item(label: &str, cents: i64, assignments: &[(ParticipantId, i64)]) -> LineItem {
        LineItem {
            label: label.to_string(),
            amount: Money::new(cents),
            assignments: assignments
                .iter()
                .map(|(participant, shares)| ShareCount::new(*participant, Decimal::from(*shares)))
                .collect(),
        }
    }

    #[test]
    fn extras_follow_item_subtotals() {
        let (a, b) = (ParticipantId::random(), ParticipantId::random());
        // 30.00 of items (A 20, B 10) plus 3.00 service charge.
        let items = vec![item("pasta", 2000, &[(a, 1)]), item("salad", 1000, &[(b, 1)])];
        let splits = split_line_items(Money::new(3300), &items).unwrap();
        assert_eq!(splits, vec![(a, Money::new(2200)), (b, Money::new(1100))]);
    }

    #[test]
    fn shared_item_uses_share_counts() {
        let (a, b) = (ParticipantId::random(), ParticipantId::random());
        let items = vec![item("pizza", 900, &[(a, 2), (b, 1)]), item("drink", 300, &[(b, 1)])];
        let splits = split_line_items(Money::new(1200), &items).unwrap();
        assert_eq!(splits, vec![(a, Money::new(600)), (b, Money::new(600))]);
    }

    #[test]
    fn discount_below_item_total_is_spread_too() {
        let (a, b) = (ParticipantId::random(), ParticipantId::random());
        let items = vec![item("x", 1000, &[(a, 1)]), item("y", 1000, &[(b, 1)])];
        let splits = split_line_items(Money::new(1800), &items).unwrap();
        assert_eq!(splits, vec![(a, Money::new(900)), (b, Money::new(900))]);
    }

    #[test]
    fn rejects_item_without_assignees() {
        let a = ParticipantId::random();
        let items = vec![item("pasta", 2000, &[(a, 1)]), item("bread", 300, &[])];
        assert_eq!(
            split_line_items(Money::new(2300), &items),
            Err(SplitError::UnassignedItem {
                item: "bread".to_string()
            })
        );
    }

    #[test]
    fn rejects_empty_or_free_items() {
        assert!(matches!(
            split_line_items(Money::new(100), &[]),
            Err(SplitError::InvalidInput(_))
        ));
        let a = ParticipantId::random();
        assert!(matches!(
            split_line_items(Money::new(100), &[item("free", 0, &[(a, 1)])]),
            Err(SplitError::InvalidInput(_))
        ));
    }

    #[test]
    fn large_receipts_are_split_without_overflow() {
        let (a, b) = (ParticipantId::random(), ParticipantId::random());
        let items = vec![
            item("x", 1_000_000_000_000_000_000, &[(a, 1)]),
            item("y", 1_000_000_000_000_000_000, &[(b, 1)]),
        ];
        let splits = split_line_items(Money::new(9_000_000_000_000_000_000), &items).unwrap();
        assert_eq!(
            splits,
            vec![
                (a, Money::new(4_500_000_000_000_000_000)),
                (b, Money::new(4_500_000_000_000_000_000)),
            ]
        );
    }

    #[test]
    fn item_amounts_too_large_to_add_are_rejected() {
        let a = ParticipantId::random();
        let items = vec![item("x", i64::MAX, &[(a, 1)]), item("y", i64::MAX, &[(a, 1)])];
        assert!(matches!(
            split_line_items(Money::new(100), &items),
            Err(SplitError::InvalidInput(_))
        ));
    }
}
