use super::reward::MAX_OPENING_LENGTH;
use super::{Best, TurnContext, pow10};
use prime_core::model::hand::Hand;
use prime_core::model::play::Play;
use prime_core::prime::catalog::special_primes;
use prime_core::prime::is_prime_small;
use tracing::{Level, event};

/// Lead a round: best-scoring prime of up to five digits.
///
/// Catalog primes are scored as-is; enumerated values also collect the
/// turn-order reward for their length.
pub fn solve_opening(ctx: &TurnContext<'_>) -> Option<Play> {
    let n_max = (ctx.hand.total() as usize).min(MAX_OPENING_LENGTH);
    if n_max == 0 {
        return None;
    }

    let mut best = Best::new();
    for length in (1..=n_max).rev() {
        for value in special_primes(length, &ctx.hand, None) {
            best.offer(value, ctx.score(&Hand::of_u64(value)));
        }
    }

    for value in (1..pow10(n_max)).rev() {
        let used = Hand::of_u64(value);
        if !ctx.hand.contains(&used) {
            continue;
        }
        let score = ctx.score(&used) - ctx.rewards.reward(used.total() as usize);
        if !best.beats(score) {
            continue;
        }
        if !is_prime_small(value) {
            continue;
        }
        best.offer(value, score);
    }

    event!(
        target: "prime_bot::solver",
        Level::DEBUG,
        regime = "opening",
        n_max,
        best_score = ?best.score(),
        "opening scan finished"
    );
    best.into_inner().map(Play::from_u64)
}
