use super::general::solve_general;
use super::massive::{MASSIVE_THRESHOLD, solve_massive};
use super::{Best, TurnContext, pow10};
use prime_core::model::hand::Hand;
use prime_core::model::play::Play;
use prime_core::prime::catalog::special_primes;
use prime_core::prime::is_prime_small;
use rand::Rng;
use tracing::{Level, event};

/// Longest length scanned value by value; longer answers use the
/// constructive solvers.
pub const EXACT_SCAN_DIGITS: usize = 7;

/// Answer a single number on the table with a `length`-digit prime above it.
pub fn solve_follow<R: Rng + ?Sized>(
    ctx: &TurnContext<'_>,
    previous: &Play,
    length: usize,
    rng: &mut R,
) -> Option<Play> {
    if length == 0 || length > ctx.hand.total() as usize {
        return None;
    }

    if length != 1 {
        let bound = previous.value();
        let mut best = Best::new();
        for value in special_primes(length, &ctx.hand, Some(&bound)) {
            best.offer(value, ctx.score(&Hand::of_u64(value)));
        }
        if let Some(value) = best.into_inner() {
            return Some(Play::from_u64(value));
        }
    }

    if length > EXACT_SCAN_DIGITS {
        event!(
            target: "prime_bot::solver",
            Level::DEBUG,
            length,
            "follow length too long to scan; constructing instead"
        );
        return if length > MASSIVE_THRESHOLD {
            solve_massive(ctx, length, rng)
        } else {
            solve_general(ctx, length, rng)
        };
    }

    let upper = pow10(length) - 1;
    let floor = match previous.to_u64() {
        Some(value) => value.max(pow10(length - 1).saturating_sub(1)),
        None => return None,
    };
    if floor >= upper {
        return None;
    }

    let mut best = Best::new();
    for value in ((floor + 1)..=upper).rev() {
        let used = Hand::of_u64(value);
        if !ctx.hand.contains(&used) {
            continue;
        }
        let score = ctx.score(&used);
        if !best.beats(score) {
            continue;
        }
        if !is_prime_small(value) {
            continue;
        }
        best.offer(value, score);
    }
    best.into_inner().map(Play::from_u64)
}
