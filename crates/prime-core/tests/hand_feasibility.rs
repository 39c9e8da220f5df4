use num_bigint::BigUint;
use prime_core::model::hand::{Hand, feasible};
use prime_core::model::play::Play;
use prime_core::prime::catalog::{SPECIAL_PRIMES, special_primes};
use prime_core::prime::{is_prime_large, is_prime_small};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn random_hand(rng: &mut SmallRng, cards: usize) -> Hand {
    let digits: Vec<u8> = (0..cards).map(|_| rng.gen_range(0..10)).collect();
    Hand::from_digits(&digits)
}

#[test]
fn feasibility_matches_digit_counts() {
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    for _ in 0..500 {
        let hand = random_hand(&mut rng, 12);
        let value: u64 = rng.gen_range(1..10_000_000);
        let used = Hand::of_u64(value);
        let expected = (0..10u8).all(|digit| used.count(digit) <= hand.count(digit));
        assert_eq!(feasible(&used, &hand), expected, "value {value}");
        if expected {
            let rest = hand.residual(&used);
            assert_eq!(rest.total() + used.total(), hand.total());
        }
    }
}

#[test]
fn catalog_answers_are_feasible_and_prime() {
    let mut rng = SmallRng::seed_from_u64(31);
    for _ in 0..200 {
        let hand = random_hand(&mut rng, 20);
        for entry in SPECIAL_PRIMES {
            for value in special_primes(entry.length, &hand, None) {
                assert!(hand.contains(&Hand::of_u64(value)));
                assert!(is_prime_small(value));
            }
        }
    }
}

#[test]
fn word_and_bignum_oracles_agree() {
    let mut rng = SmallRng::seed_from_u64(97);
    for _ in 0..2_000 {
        let value: u64 = rng.gen_range(2..1_000_000_000);
        assert_eq!(
            is_prime_small(value),
            is_prime_large(&BigUint::from(value)),
            "value {value}"
        );
    }
}

#[test]
fn play_digits_describe_the_value() {
    let play: Play = "8191".parse().unwrap();
    assert_eq!(play.counts(), Hand::from_digits(&[8, 1, 9, 1]));
    assert_eq!(play.to_u64(), Some(8191));
    assert!(play.is_prime());
}
