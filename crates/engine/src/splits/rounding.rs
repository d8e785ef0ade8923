//! Cent rounding and overflow-checked arithmetic shared by the split modes.

use rust_decimal::Decimal;

use crate::{Money, ParticipantId, SplitError};

pub(crate) fn out_of_range() -> SplitError {
    SplitError::InvalidInput("amount out of range".to_string())
}

/// Sums amounts, failing instead of wrapping on overflow.
pub(crate) fn checked_sum(amounts: impl IntoIterator<Item = Money>) -> Result<Money, SplitError> {
    amounts
        .into_iter()
        .try_fold(Money::ZERO, Money::checked_add)
        .ok_or_else(out_of_range)
}

pub(crate) fn checked_decimal_sum(
    values: impl IntoIterator<Item = Decimal>,
) -> Result<Decimal, SplitError> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, Decimal::checked_add)
        .ok_or_else(out_of_range)
}

/// `amount * part / whole`.
///
/// The product is taken first for precision. When it does not fit in a
/// `Decimal` the ratio `part / whole` is taken first instead.
pub(crate) fn proportion(
    amount: Decimal,
    part: Decimal,
    whole: Decimal,
) -> Result<Decimal, SplitError> {
    amount
        .checked_mul(part)
        .and_then(|product| product.checked_div(whole))
        .or_else(|| part.checked_div(whole)?.checked_mul(amount))
        .ok_or_else(out_of_range)
}

/// Rounds each raw amount (in fractional cents) to the nearest cent, then
/// hands the whole residual to the largest share so the result sums to
/// `target` exactly.
pub(crate) fn round_to_target(
    raw: Vec<(ParticipantId, Decimal)>,
    target: Money,
) -> Result<Vec<(ParticipantId, Money)>, SplitError> {
    let mut rounded = raw
        .into_iter()
        .map(|(participant, cents)| {
            Money::from_decimal_cents(cents)
                .map(|amount| (participant, amount))
                .ok_or_else(out_of_range)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let sum = checked_sum(rounded.iter().map(|(_, amount)| *amount))?;
    let diff = target.checked_sub(sum).ok_or_else(out_of_range)?;
    absorb_difference(&mut rounded, diff)?;
    Ok(rounded)
}

/// Adds `diff` (positive or negative) to the largest owed amount. Ties go to
/// the first one seen.
pub(crate) fn absorb_difference(
    amounts: &mut [(ParticipantId, Money)],
    diff: Money,
) -> Result<(), SplitError> {
    if diff.is_zero() {
        return Ok(());
    }
    let mut largest: Option<usize> = None;
    for (idx, (_, amount)) in amounts.iter().enumerate() {
        match largest {
            Some(best) if *amount <= amounts[best].1 => {}
            _ => largest = Some(idx),
        }
    }
    if let Some(idx) = largest {
        amounts[idx].1 = amounts[idx].1.checked_add(diff).ok_or_else(out_of_range)?;
    }
    Ok(())
}
