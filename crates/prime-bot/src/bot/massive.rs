use super::TurnContext;
use super::general::{Layout, arrange_digits};
use super::scoring::is_odd_tail;
use prime_core::model::play::Play;
use prime_core::prime::is_prime_large;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{Level, event};

/// Lengths above this go to the arbitrary-precision solver.
pub const MASSIVE_THRESHOLD: usize = 12;

/// Odd-tail runs longer than this are reshuffled instead of brute-forced.
const SHUFFLE_RUN: usize = 3;

/// Arbitrary-precision answer for long plays.
///
/// With a long run of odd tail digits the run is reshuffled until the number
/// is prime or the budget runs out; otherwise the last three digits are
/// replaced by each odd suffix in turn and the first hit is returned.
pub fn solve_massive<R: Rng + ?Sized>(
    ctx: &TurnContext<'_>,
    length: usize,
    rng: &mut R,
) -> Option<Play> {
    if length < SHUFFLE_RUN || length > ctx.hand.total() as usize {
        return None;
    }

    let mut atoms = arrange_digits(&ctx.hand, length, ctx.params, Layout::Massive, rng)?;
    let odd_run = atoms
        .iter()
        .rev()
        .take_while(|&&digit| is_odd_tail(digit))
        .count();

    if odd_run > SHUFFLE_RUN {
        let tail = length - odd_run;
        for attempt in 0..=ctx.limits.shuffle_budget {
            if let Some(play) = accept(ctx, &atoms) {
                event!(
                    target: "prime_bot::solver",
                    Level::DEBUG,
                    regime = "massive",
                    length,
                    attempt,
                    "odd tail shuffle hit"
                );
                return Some(play);
            }
            atoms[tail..].shuffle(rng);
        }
        return None;
    }

    for suffix in (1..1000u32).step_by(2) {
        let mut rest = suffix;
        for slot in atoms.iter_mut().rev().take(SHUFFLE_RUN) {
            *slot = (rest % 10) as u8;
            rest /= 10;
        }
        let Some(play) = Play::from_digits(&atoms) else {
            continue;
        };
        if !ctx.hand.contains(&play.counts()) {
            continue;
        }
        if let Some(play) = accept(ctx, play.digits()) {
            event!(
                target: "prime_bot::solver",
                Level::DEBUG,
                regime = "massive",
                length,
                suffix,
                "suffix search hit"
            );
            return Some(play);
        }
    }
    None
}

fn accept(ctx: &TurnContext<'_>, digits: &[u8]) -> Option<Play> {
    let play = Play::from_digits(digits)?;
    if play.len() != digits.len() || !ctx.exceeds_previous(&play) || !is_prime_large(&play.value()) {
        return None;
    }
    Some(play)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::{PenaltyParams, SearchLimits, TurnRewards};
    use prime_core::model::hand::Hand;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn context<'a>(
        hand: Hand,
        previous: Option<&'a Play>,
        params: &'a PenaltyParams,
        rewards: &'a TurnRewards,
    ) -> TurnContext<'a> {
        TurnContext::new(hand, false, previous, params, rewards, SearchLimits::default())
    }

    #[test]
    fn long_play_is_prime_feasible_and_higher() {
        let params = PenaltyParams::default();
        let rewards = TurnRewards::default();
        let previous: Play = "1000000000000".parse().unwrap();
        let hand = Hand::from_counts([4; 10]);
        let ctx = context(hand, Some(&previous), &params, &rewards);
        let mut found = 0;
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            if let Some(play) = solve_massive(&ctx, 13, &mut rng) {
                found += 1;
                assert_eq!(play.len(), 13);
                assert!(play > previous);
                assert!(play.is_prime());
                assert!(hand.contains(&play.counts()));
            }
        }
        assert!(found > 0, "no seed produced a 13-digit prime");
    }

    #[test]
    fn odd_heavy_hand_reshuffles_the_tail() {
        let params = PenaltyParams::default();
        let rewards = TurnRewards::default();
        let previous: Play = "10000000000000".parse().unwrap();
        let hand = Hand::from_counts([0, 4, 2, 4, 0, 0, 0, 4, 2, 4]);
        let ctx = context(hand, Some(&previous), &params, &rewards);
        let mut found = 0;
        for seed in 0..5 {
            let atoms = arrange_digits(
                &hand,
                14,
                &params,
                Layout::Massive,
                &mut StdRng::seed_from_u64(seed),
            )
            .unwrap();
            let odd_run = atoms.iter().rev().take_while(|&&d| is_odd_tail(d)).count();
            assert!(odd_run > SHUFFLE_RUN, "odd run {odd_run} in {atoms:?}");

            let mut rng = StdRng::seed_from_u64(seed);
            if let Some(play) = solve_massive(&ctx, 14, &mut rng) {
                found += 1;
                assert_eq!(play.len(), 14);
                assert!(play > previous);
                assert!(play.is_prime());
                assert!(hand.contains(&play.counts()));
                assert_eq!(play.digits()[..14 - odd_run], atoms[..14 - odd_run]);
            }
        }
        assert!(found > 0, "no seed produced a 14-digit prime");
    }

    #[test]
    fn refuses_lengths_beyond_hand() {
        let params = PenaltyParams::default();
        let rewards = TurnRewards::default();
        let ctx = context(Hand::from_counts([1; 10]), None, &params, &rewards);
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(solve_massive(&ctx, 13, &mut rng), None);
    }

    #[test]
    fn even_only_hand_cannot_end_a_prime() {
        let params = PenaltyParams::default();
        let rewards = TurnRewards::default();
        let ctx = context(
            Hand::from_counts([5, 0, 5, 0, 5, 0, 5, 0, 5, 0]),
            None,
            &params,
            &rewards,
        );
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(solve_massive(&ctx, 14, &mut rng), None);
    }
}
