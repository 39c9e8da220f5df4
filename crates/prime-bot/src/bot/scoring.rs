use super::PenaltyParams;
use prime_core::model::hand::Hand;

/// Bonus for a play that empties the hand.
pub const EMPTY_HAND_BONUS: i64 = 100_000_000;
/// Bonus for leaving nothing but 3s and 7s, each a prime on its own.
pub const SINGLE_PRIME_DIGITS_BONUS: i64 = 50_000_000;

/// Digits that can end a multi-digit prime.
pub const fn is_odd_tail(digit: u8) -> bool {
    matches!(digit, 1 | 3 | 7 | 9)
}

/// Preference for playing `used` out of `hand`; lower is better.
///
/// Panics if `used` is not feasible against `hand`.
pub fn score(params: &PenaltyParams, hand: &Hand, used: &Hand) -> i64 {
    let next = hand.residual(used);

    let mut odd = 0i64;
    let mut even = 0i64;
    for digit in 0..10u8 {
        let count = next.count(digit) as i64;
        if is_odd_tail(digit) {
            odd += count;
        } else {
            even += count;
        }
    }

    let mut score = 0i64;
    if odd * 3 < even * 2 {
        score += params.even_overflow;
    }

    for (count, weight) in next.counts().iter().zip(params.weakness.iter()) {
        score += *count as i64 * weight;
    }

    let remaining = next.total();
    if remaining == 0 {
        score -= EMPTY_HAND_BONUS;
    }
    // An empty hand also counts here.
    if remaining == (next.count(3) + next.count(7)) as u32 {
        score -= SINGLE_PRIME_DIGITS_BONUS;
    }

    score
}
