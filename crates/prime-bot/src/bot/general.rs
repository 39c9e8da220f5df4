use super::{Best, PenaltyParams, TurnContext, pow10};
use num_bigint::BigUint;
use prime_core::model::hand::Hand;
use prime_core::model::play::Play;
use prime_core::prime::catalog::special_primes;
use prime_core::prime::is_prime_large;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{Level, event};

/// Longest length scanned with machine-word arithmetic.
pub const WORD_DIGITS: usize = 16;

/// Catalog primes shorter than this are played without scanning.
pub const CATALOG_SHORTCUT_BELOW: usize = 8;

const NON_TERMINAL_BONUS: i64 = 1_000_000;

/// Where each constructed digit may go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Only the leading position excludes zero.
    Word,
    /// Leading position excludes zero and the final position takes an odd tail.
    Massive,
}

/// Greedy digit arrangement used as the starting point of a scan.
///
/// Each position takes the most plentiful digit, with digits that cannot end
/// a prime (even digits and 5) preferred so they land away from the tail.
/// The front half is then shuffled and the back half ordered by descending
/// weakness. Returns `None` when the hand cannot fill `length` positions.
pub fn arrange_digits<R: Rng + ?Sized>(
    hand: &Hand,
    length: usize,
    params: &PenaltyParams,
    layout: Layout,
    rng: &mut R,
) -> Option<Vec<u8>> {
    if length == 0 {
        return None;
    }

    let mut counts = *hand;
    let mut atoms = Vec::with_capacity(length);
    for position in 0..length {
        let allowed: &[u8] = match layout {
            Layout::Massive if position + 1 == length => &[1, 3, 7, 9],
            _ if position == 0 => &[1, 2, 3, 4, 5, 6, 7, 8, 9],
            _ => &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
        };
        let scored: Vec<(u8, i64)> = allowed
            .iter()
            .filter(|&&digit| counts.count(digit) > 0)
            .map(|&digit| (digit, acquisition_score(&counts, digit)))
            .collect();
        let max = scored.iter().map(|(_, score)| *score).max()?;
        let tied: Vec<u8> = scored
            .iter()
            .filter(|(_, score)| *score == max)
            .map(|(digit, _)| *digit)
            .collect();
        let selected = *tied.choose(rng)?;
        counts.remove(&Hand::from_digits(&[selected]));
        atoms.push(selected);
    }

    let half = length / 2;
    atoms[..half].shuffle(rng);
    atoms[half..].sort_by(|a, b| params.weakness[*b as usize].cmp(&params.weakness[*a as usize]));
    if atoms[0] == 0
        && let Some(index) = atoms.iter().position(|&digit| digit > 0)
    {
        atoms.swap(0, index);
    }
    Some(atoms)
}

fn acquisition_score(counts: &Hand, digit: u8) -> i64 {
    let mut score = counts.count(digit) as i64;
    if score > 0 && (digit % 2 == 0 || digit == 5) {
        score += NON_TERMINAL_BONUS;
    }
    score
}

/// Answer two or more numbers on the table with a `length`-digit prime.
///
/// Scans upward from a constructed origin and stops once the distance
/// squared exceeds twice the origin.
pub fn solve_general<R: Rng + ?Sized>(
    ctx: &TurnContext<'_>,
    length: usize,
    rng: &mut R,
) -> Option<Play> {
    let total = ctx.hand.total() as usize;
    if length == 0 || length > total.min(WORD_DIGITS) {
        return None;
    }

    let bound = ctx.previous.map(Play::value);
    if length < CATALOG_SHORTCUT_BELOW
        && let Some(&value) = special_primes(length, &ctx.hand, bound.as_ref()).last()
    {
        return Some(Play::from_u64(value));
    }

    let atoms = arrange_digits(&ctx.hand, length, ctx.params, Layout::Word, rng)?;
    let origin = atoms.iter().fold(0u64, |acc, &digit| acc * 10 + digit as u64);
    let upper = pow10(length) - 1;
    let start = match ctx.previous {
        None => origin,
        Some(previous) => match previous.to_u64() {
            Some(value) if value < upper => origin.max(value + 1),
            _ => return None,
        },
    };

    let mut best = Best::new();
    let mut scanned = 0u64;
    for value in start..=upper {
        let distance = (value - start) as u128;
        if distance * distance > 2 * start as u128 {
            break;
        }
        scanned += 1;
        let used = Hand::of_u64(value);
        if !ctx.hand.contains(&used) {
            continue;
        }
        let score = ctx.score(&used);
        if !best.beats(score) {
            continue;
        }
        if !is_prime_large(&BigUint::from(value)) {
            continue;
        }
        best.offer(value, score);
    }

    event!(
        target: "prime_bot::solver",
        Level::DEBUG,
        regime = "general",
        length,
        origin,
        start,
        scanned,
        best_score = ?best.score(),
        "window scan finished"
    );
    best.into_inner().map(Play::from_u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::{SearchLimits, TurnRewards};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn every_digit(times: u16) -> Hand {
        Hand::from_counts([times; 10])
    }

    #[test]
    fn arrangement_spends_only_hand_cards() {
        let params = PenaltyParams::default();
        let hand = Hand::from_digits(&[0, 0, 0, 1, 2, 3, 5, 7, 8]);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let atoms = arrange_digits(&hand, 6, &params, Layout::Word, &mut rng).unwrap();
            assert_eq!(atoms.len(), 6);
            assert_ne!(atoms[0], 0);
            assert!(hand.contains(&Hand::from_digits(&atoms)));
            let tail = &atoms[3..];
            assert!(tail.windows(2).all(|w| {
                params.weakness[w[0] as usize] >= params.weakness[w[1] as usize]
            }));
        }
    }

    #[test]
    fn massive_arrangement_ends_on_odd_tail() {
        let params = PenaltyParams::default();
        let hand = every_digit(3);
        let mut rng = StdRng::seed_from_u64(11);
        let atoms = arrange_digits(&hand, 14, &params, Layout::Massive, &mut rng).unwrap();
        assert!(matches!(atoms.last(), Some(1 | 3 | 7 | 9)));
        assert!(hand.contains(&Hand::from_digits(&atoms)));
    }

    #[test]
    fn arrangement_fails_without_leading_digit() {
        let params = PenaltyParams::default();
        let mut rng = StdRng::seed_from_u64(1);
        let hand = Hand::from_digits(&[0, 0, 0]);
        assert!(arrange_digits(&hand, 3, &params, Layout::Word, &mut rng).is_none());
    }

    #[test]
    fn catalog_shortcut_takes_last_entry() {
        let params = PenaltyParams::default();
        let rewards = TurnRewards::default();
        let previous = Play::from_u64(100_000);
        let hand = Hand::from_digits(&[0, 1, 1, 1, 3, 7, 2, 2, 4, 5, 8, 7]);
        let ctx = TurnContext::new(
            hand,
            false,
            Some(&previous),
            &params,
            &rewards,
            SearchLimits::default(),
        );
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(solve_general(&ctx, 6, &mut rng), Some(Play::from_u64(524_287)));
    }

    #[test]
    fn window_scan_finds_prime_above_previous() {
        let params = PenaltyParams::default();
        let rewards = TurnRewards::default();
        let previous = Play::from_u64(10_000);
        let hand = every_digit(3);
        let ctx = TurnContext::new(
            hand,
            false,
            Some(&previous),
            &params,
            &rewards,
            SearchLimits::default(),
        );
        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            let play = solve_general(&ctx, 5, &mut rng).expect("dense hand yields a prime");
            assert_eq!(play.len(), 5);
            assert!(play > previous);
            assert!(play.is_prime());
            assert!(hand.contains(&play.counts()));
        }
    }

    #[test]
    fn too_long_for_hand_is_none() {
        let params = PenaltyParams::default();
        let rewards = TurnRewards::default();
        let ctx = TurnContext::new(
            Hand::from_digits(&[1, 3]),
            false,
            None,
            &params,
            &rewards,
            SearchLimits::default(),
        );
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(solve_general(&ctx, 3, &mut rng), None);
    }
}
