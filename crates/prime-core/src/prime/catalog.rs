//! Known primes whose decimal forms need few, low-multiplicity digits.
//!
//! The Mersenne primes below 2^32 are cheap to hold and often playable, so
//! solvers consult them before any enumeration. The 31-digit Belphegor prime
//! needs so many zeros that it is handled as a standing reservation instead.

use crate::model::hand::Hand;
use crate::model::play::Play;
use num_bigint::BigUint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialPrime {
    pub length: usize,
    pub value: u64,
    pub required: Hand,
}

impl SpecialPrime {
    const fn new(length: usize, value: u64, counts: [u16; 10]) -> Self {
        Self {
            length,
            value,
            required: Hand::from_counts(counts),
        }
    }
}

pub const SPECIAL_PRIMES: [SpecialPrime; 8] = [
    SpecialPrime::new(1, 3, [0, 0, 0, 1, 0, 0, 0, 0, 0, 0]),
    SpecialPrime::new(1, 7, [0, 0, 0, 0, 0, 0, 0, 1, 0, 0]),
    SpecialPrime::new(2, 31, [0, 1, 0, 1, 0, 0, 0, 0, 0, 0]),
    SpecialPrime::new(3, 127, [0, 1, 1, 0, 0, 0, 0, 1, 0, 0]),
    SpecialPrime::new(4, 8_191, [0, 2, 0, 0, 0, 0, 0, 0, 1, 1]),
    SpecialPrime::new(6, 131_071, [1, 3, 0, 1, 0, 0, 0, 1, 0, 0]),
    SpecialPrime::new(6, 524_287, [0, 0, 2, 0, 1, 1, 0, 1, 1, 0]),
    SpecialPrime::new(10, 2_147_483_647, [0, 1, 1, 1, 3, 0, 1, 2, 1, 0]),
];

/// Decimal form of the Belphegor prime 10^30 + 666 * 10^14 + 1.
pub const RARE_PRIME: &str = "1000000000000066600000000000001";

/// Cards the rare prime consumes: 26 zeros, 2 ones and 3 sixes.
pub const RARE_PRIME_CARDS: Hand = Hand::from_counts([26, 2, 0, 0, 0, 0, 3, 0, 0, 0]);

/// Catalog entries of exactly `length` digits that `hand` can pay for and that
/// exceed `above` when a lower bound is given. Catalog order is preserved.
pub fn special_primes(length: usize, hand: &Hand, above: Option<&BigUint>) -> Vec<u64> {
    SPECIAL_PRIMES
        .iter()
        .filter(|entry| entry.length == length)
        .filter(|entry| hand.contains(&entry.required))
        .filter(|entry| above.is_none_or(|bound| BigUint::from(entry.value) > *bound))
        .map(|entry| entry.value)
        .collect()
}

pub fn rare_prime() -> Play {
    Play::from_digits(&RARE_PRIME.bytes().map(|b| b - b'0').collect::<Vec<_>>())
        .unwrap_or_else(|| unreachable!("rare prime literal is decimal"))
}

pub fn is_rare_prime(play: &Play) -> bool {
    play.len() == RARE_PRIME.len() && play.to_string() == RARE_PRIME
}

/// True when the hand holds every card the rare prime needs.
pub fn holds_rare_reservation(hand: &Hand) -> bool {
    hand.contains(&RARE_PRIME_CARDS)
}
