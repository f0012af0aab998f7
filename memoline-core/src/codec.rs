//! Integer-only card encoding for storage without floating point.
//!
//! Stability keeps two decimal digits, the day counts and difficulty keep
//! one. Counters saturate at 255.

use serde::{Deserialize, Serialize};

use crate::{Card, CoreError, State};

const STABILITY_SCALE: f64 = 100.0;
const DIFFICULTY_SCALE: f64 = 10.0;
const DAYS_SCALE: f64 = 10.0;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct IntegerCard {
    pub due: i64,
    pub stability: u64,
    pub difficulty: u16,
    pub elapsed_days: u32,
    pub scheduled_days: u32,
    pub reps: u8,
    pub lapses: u8,
    pub state: u8,
    pub last_review: i64,
}

/// Largest `n` with `n / scale <= value`.
///
/// Same as `floor(value * scale)` in exact arithmetic, but stays consistent
/// with the division in [`from_fixed`] so decoded values encode back to the
/// same integer.
fn to_fixed(value: f64, scale: f64) -> f64 {
    if value.is_nan() || value <= 0.0 {
        return 0.0;
    }
    let mut n = (value * scale).floor();
    if (n + 1.0) / scale <= value {
        n += 1.0;
    } else if n / scale > value {
        n -= 1.0;
    }
    n
}

fn from_fixed(n: f64, scale: f64) -> f64 {
    n / scale
}

fn saturate_u8(n: u32) -> u8 {
    u8::try_from(n).unwrap_or(u8::MAX)
}

impl From<&Card> for IntegerCard {
    fn from(card: &Card) -> Self {
        Self {
            due: card.due,
            stability: to_fixed(card.stability, STABILITY_SCALE) as u64,
            difficulty: to_fixed(card.difficulty, DIFFICULTY_SCALE) as u16,
            elapsed_days: to_fixed(card.elapsed_days, DAYS_SCALE) as u32,
            scheduled_days: to_fixed(card.scheduled_days, DAYS_SCALE) as u32,
            reps: saturate_u8(card.reps),
            lapses: saturate_u8(card.lapses),
            state: card.state.ordinal(),
            last_review: card.last_review,
        }
    }
}

impl TryFrom<IntegerCard> for Card {
    type Error = CoreError;

    fn try_from(i: IntegerCard) -> Result<Self, Self::Error> {
        Ok(Card {
            due: i.due,
            stability: from_fixed(i.stability as f64, STABILITY_SCALE),
            difficulty: from_fixed(f64::from(i.difficulty), DIFFICULTY_SCALE),
            elapsed_days: from_fixed(f64::from(i.elapsed_days), DAYS_SCALE),
            scheduled_days: from_fixed(f64::from(i.scheduled_days), DAYS_SCALE),
            reps: u32::from(i.reps),
            lapses: u32::from(i.lapses),
            state: State::try_from(i.state)?,
            last_review: i.last_review,
        })
    }
}

/// Truncates each scaled field to the largest `n` with `n / scale <= value`,
/// where the division is IEEE `f64`. This differs from a naive
/// `floor(value * scale)` on values like `0.29` (29, not 28). Any other
/// encoder that must agree with this one, such as an integer-only contract,
/// has to apply the same rule.
pub fn encode_card_for_storage(card: Card) -> IntegerCard {
    IntegerCard::from(&card)
}

/// # Panics
///
/// Panics if `i.state` is not a known state ordinal. Use
/// `Card::try_from` to handle that case instead.
pub fn decode_card_from_storage(i: IntegerCard) -> Card {
    match Card::try_from(i) {
        Ok(card) => card,
        Err(e) => panic!("corrupt stored card: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_instead_of_rounding() {
        assert_eq!(to_fixed(1.239, STABILITY_SCALE), 123.0);
        assert_eq!(to_fixed(4.99, DIFFICULTY_SCALE), 49.0);
    }

    #[test]
    fn exact_decimals_survive_division() {
        // 0.29 * 100.0 is 28.999999999999996 in f64.
        assert_eq!(to_fixed(0.29, STABILITY_SCALE), 29.0);
        for n in 0..10_000u32 {
            let n = f64::from(n);
            assert_eq!(to_fixed(from_fixed(n, STABILITY_SCALE), STABILITY_SCALE), n);
            assert_eq!(to_fixed(from_fixed(n, DAYS_SCALE), DAYS_SCALE), n);
        }
    }

    #[test]
    fn negative_and_nan_encode_as_zero() {
        assert_eq!(to_fixed(-3.5, DAYS_SCALE), 0.0);
        assert_eq!(to_fixed(f64::NAN, DAYS_SCALE), 0.0);
    }

    #[test]
    fn counters_saturate() {
        assert_eq!(saturate_u8(254), 254);
        assert_eq!(saturate_u8(255), 255);
        assert_eq!(saturate_u8(100_000), 255);
    }
}
