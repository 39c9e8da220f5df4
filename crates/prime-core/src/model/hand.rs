use num_bigint::BigUint;
use num_traits::Zero;

/// Number of distinct digit cards (0 through 9).
pub const DIGITS: usize = 10;

/// Multiset of digit cards, stored as one counter per digit value.
///
/// The same shape describes both a player's hand and the digits a candidate
/// number needs, so feasibility is a per-digit comparison of two `Hand`s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hand {
    counts: [u16; DIGITS],
}

impl Hand {
    pub const fn new() -> Self {
        Self {
            counts: [0; DIGITS],
        }
    }

    pub const fn from_counts(counts: [u16; DIGITS]) -> Self {
        Self { counts }
    }

    /// Builds a hand from individual cards.
    ///
    /// Panics if a card is not a decimal digit.
    pub fn from_digits(digits: &[u8]) -> Self {
        let mut hand = Self::new();
        for &digit in digits {
            hand.add(digit);
        }
        hand
    }

    /// Digit multiset of a machine-word value. Zero is the single digit `0`.
    pub fn of_u64(mut value: u64) -> Self {
        let mut hand = Self::new();
        if value == 0 {
            hand.add(0);
            return hand;
        }
        while value > 0 {
            hand.add((value % 10) as u8);
            value /= 10;
        }
        hand
    }

    /// Digit multiset of an arbitrary-precision value.
    pub fn of_biguint(value: &BigUint) -> Self {
        if value.is_zero() {
            return Self::from_digits(&[0]);
        }
        Self::from_digits(&value.to_radix_le(10))
    }

    pub fn add(&mut self, digit: u8) {
        assert!((digit as usize) < DIGITS, "card {digit} is not a digit");
        self.counts[digit as usize] += 1;
    }

    pub fn count(&self, digit: u8) -> u16 {
        self.counts[digit as usize]
    }

    pub fn counts(&self) -> &[u16; DIGITS] {
        &self.counts
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&c| c as u32).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// True when every digit `required` asks for is available in this hand.
    pub fn contains(&self, required: &Hand) -> bool {
        feasible(required, self)
    }

    /// The hand left over after spending `used`.
    ///
    /// Panics if `used` is not feasible against this hand.
    pub fn residual(&self, used: &Hand) -> Hand {
        let mut next = *self;
        next.remove(used);
        next
    }

    /// Panics if `used` is not feasible against this hand.
    pub fn remove(&mut self, used: &Hand) {
        for (digit, (slot, need)) in self.counts.iter_mut().zip(used.counts).enumerate() {
            let have = *slot;
            *slot = have
                .checked_sub(need)
                .unwrap_or_else(|| panic!("digit {digit} overdrawn: need {need}, have {have}"));
        }
    }

    /// Cards in ascending digit order.
    pub fn digits(&self) -> Vec<u8> {
        let mut cards = Vec::with_capacity(self.total() as usize);
        for (digit, &count) in self.counts.iter().enumerate() {
            cards.extend(std::iter::repeat_n(digit as u8, count as usize));
        }
        cards
    }
}

/// `required` is feasible against `hand` iff no digit is asked for more often
/// than the hand holds it.
pub fn feasible(required: &Hand, hand: &Hand) -> bool {
    required
        .counts
        .iter()
        .zip(hand.counts.iter())
        .all(|(need, have)| need <= have)
}

#[cfg(test)]
mod tests {
    use super::{Hand, feasible};
    use num_bigint::BigUint;

    #[test]
    fn multiset_of_value_counts_each_digit() {
        let hand = Hand::of_u64(1_000_066_601);
        assert_eq!(hand.count(0), 5);
        assert_eq!(hand.count(1), 2);
        assert_eq!(hand.count(6), 3);
        assert_eq!(hand.total(), 10);
        assert_eq!(Hand::of_u64(0), Hand::from_digits(&[0]));
    }

    #[test]
    fn bigint_multiset_matches_machine_word() {
        let value = 2_147_483_647u64;
        assert_eq!(Hand::of_biguint(&BigUint::from(value)), Hand::of_u64(value));
    }

    #[test]
    fn feasibility_is_per_digit() {
        let hand = Hand::from_digits(&[1, 1, 8, 9, 3]);
        assert!(feasible(&Hand::of_u64(8191), &hand));
        assert!(!feasible(&Hand::of_u64(8181), &hand));
        assert!(hand.contains(&Hand::new()));
    }

    #[test]
    fn residual_spends_cards() {
        let hand = Hand::from_digits(&[3, 1, 2, 7, 0, 0]);
        let rest = hand.residual(&Hand::of_u64(127));
        assert_eq!(rest.digits(), vec![0, 0, 3]);
    }

    #[test]
    #[should_panic(expected = "overdrawn")]
    fn residual_panics_when_overdrawn() {
        let hand = Hand::from_digits(&[1, 3]);
        let _ = hand.residual(&Hand::of_u64(33));
    }
}
