//! Split calculators.
//!
//! A [`SplitMode`] describes how an expense total is allocated among
//! participants. [`compute_splits`] turns it into owed amounts that always
//! sum to the total to the cent. The payer's own share is included: they
//! "owe" it to themselves.
//!
//! Rounding policy:
//! - equal splits hand leftover cents, one each, to the first participants
//!   in input order;
//! - percentage, shares and line-item splits round every share to the
//!   nearest cent and give the residual to the largest share (first one on
//!   ties).

use rust_decimal::Decimal;

use crate::{Money, ParticipantId, Split, SplitError};

mod line_items;
mod rounding;

use rounding::{
    absorb_difference, checked_decimal_sum, checked_sum, out_of_range, proportion,
    round_to_target,
};

/// Exact amounts may be off by this much (caller-side rounding) before the
/// request is rejected.
const EXACT_TOLERANCE: Money = Money::new(1);

/// Percentages may miss 100 by this much.
const PERCENTAGE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExactAmount {
    pub participant: ParticipantId,
    pub amount: Money,
}

impl ExactAmount {
    pub fn new(participant: ParticipantId, amount: Money) -> Self {
        Self {
            participant,
            amount,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Percentage {
    pub participant: ParticipantId,
    /// Percent of the total, e.g. `33.5`.
    pub percentage: Decimal,
}

impl Percentage {
    pub fn new(participant: ParticipantId, percentage: Decimal) -> Self {
        Self {
            participant,
            percentage,
        }
    }
}

/// A number of shares held by a participant, in a shares split or within a
/// line item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShareCount {
    pub participant: ParticipantId,
    pub shares: Decimal,
}

impl ShareCount {
    pub fn new(participant: ParticipantId, shares: Decimal) -> Self {
        Self {
            participant,
            shares,
        }
    }
}

/// An item of an itemized bill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineItem {
    /// Shown in errors, e.g. `"Item \"wine\" has no assignments"`.
    pub label: String,
    pub amount: Money,
    pub assignments: Vec<ShareCount>,
}

/// Allocation policy together with its per-participant data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SplitMode {
    Equal { participants: Vec<ParticipantId> },
    Exact { amounts: Vec<ExactAmount> },
    Percentage { percentages: Vec<Percentage> },
    Shares { shares: Vec<ShareCount> },
    LineItems { items: Vec<LineItem> },
}

impl SplitMode {
    /// Canonical mode name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equal { .. } => "equal",
            Self::Exact { .. } => "exact",
            Self::Percentage { .. } => "percentage",
            Self::Shares { .. } => "shares",
            Self::LineItems { .. } => "line_item",
        }
    }
}

/// Allocates `total` according to `mode`.
///
/// The returned owed amounts sum to `total` exactly.
///
/// # Errors
///
/// - [`SplitError::InvalidInput`] for a zero or negative total, no
///   participants, zero total shares or a non-positive item subtotal.
/// - [`SplitError::SplitMismatch`] when exact amounts miss the total by more
///   than one cent.
/// - [`SplitError::PercentageMismatch`] when percentages miss 100 by more
///   than 0.01.
/// - [`SplitError::UnassignedItem`] when a line item has no shares assigned.
///
/// # Examples
///
/// ```rust
/// use engine::{Money, ParticipantId, SplitMode, compute_splits};
///
/// let people: Vec<ParticipantId> = (0..3).map(|_| ParticipantId::random()).collect();
/// let splits = compute_splits(Money::new(1000), &SplitMode::Equal { participants: people }).unwrap();
/// let cents: Vec<i64> = splits.iter().map(|s| s.owed_amount.cents()).collect();
/// assert_eq!(cents, vec![334, 333, 333]);
/// ```
pub fn compute_splits(total: Money, mode: &SplitMode) -> Result<Vec<Split>, SplitError> {
    if !total.is_positive() {
        return Err(SplitError::InvalidInput(format!(
            "total must be greater than 0, got {total}"
        )));
    }

    let owed = match mode {
        SplitMode::Equal { participants } => split_equal(total, participants)?,
        SplitMode::Exact { amounts } => split_exact(total, amounts)?,
        SplitMode::Percentage { percentages } => split_percentage(total, percentages)?,
        SplitMode::Shares { shares } => split_shares(total, shares)?,
        SplitMode::LineItems { items } => line_items::split_line_items(total, items)?,
    };

    tracing::debug!(
        mode = mode.as_str(),
        total = %total,
        participants = owed.len(),
        "computed splits"
    );

    Ok(owed
        .into_iter()
        .map(|(participant, amount)| Split::new(participant, amount))
        .collect())
}

fn split_equal(
    total: Money,
    participants: &[ParticipantId],
) -> Result<Vec<(ParticipantId, Money)>, SplitError> {
    if participants.is_empty() {
        return Err(SplitError::InvalidInput(
            "at least one participant is required".to_string(),
        ));
    }

    let n = i64::try_from(participants.len())
        .map_err(|_| SplitError::InvalidInput("too many participants".to_string()))?;
    let base = total.cents() / n;
    let remainder = total.cents() - base * n;

    Ok(participants
        .iter()
        .zip(0..)
        .map(|(participant, idx)| {
            let cents = if idx < remainder { base + 1 } else { base };
            (*participant, Money::new(cents))
        })
        .collect())
}

fn split_exact(
    total: Money,
    amounts: &[ExactAmount],
) -> Result<Vec<(ParticipantId, Money)>, SplitError> {
    if amounts.is_empty() {
        return Err(SplitError::InvalidInput(
            "at least one participant is required".to_string(),
        ));
    }

    let sum = checked_sum(amounts.iter().map(|a| a.amount))?;
    let diff = total.checked_sub(sum).ok_or_else(out_of_range)?;
    if diff.abs() > EXACT_TOLERANCE {
        return Err(SplitError::SplitMismatch {
            sum,
            target: total,
            diff: diff.abs(),
        });
    }

    let mut owed: Vec<_> = amounts.iter().map(|a| (a.participant, a.amount)).collect();
    absorb_difference(&mut owed, diff)?;
    Ok(owed)
}

fn split_percentage(
    total: Money,
    percentages: &[Percentage],
) -> Result<Vec<(ParticipantId, Money)>, SplitError> {
    let sum = checked_decimal_sum(percentages.iter().map(|p| p.percentage))?;
    if sum
        .checked_sub(Decimal::ONE_HUNDRED)
        .is_none_or(|off| off.abs() > PERCENTAGE_TOLERANCE)
    {
        return Err(SplitError::PercentageMismatch { sum });
    }

    let total_cents = total.to_decimal_cents();
    let raw = percentages
        .iter()
        .map(|p| {
            let cents = proportion(total_cents, p.percentage, Decimal::ONE_HUNDRED)?;
            Ok((p.participant, cents))
        })
        .collect::<Result<Vec<_>, SplitError>>()?;
    round_to_target(raw, total)
}

fn split_shares(
    total: Money,
    shares: &[ShareCount],
) -> Result<Vec<(ParticipantId, Money)>, SplitError> {
    let total_shares = checked_decimal_sum(shares.iter().map(|s| s.shares))?;
    if total_shares <= Decimal::ZERO {
        return Err(SplitError::InvalidInput(
            "total shares must be greater than 0".to_string(),
        ));
    }

    let total_cents = total.to_decimal_cents();
    let raw = shares
        .iter()
        .map(|s| Ok((s.participant, proportion(total_cents, s.shares, total_shares)?)))
        .collect::<Result<Vec<_>, SplitError>>()?;
    round_to_target(raw, total)
}
