pub mod catalog;

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Longest number still tested exactly by trial division.
pub const EXACT_TEST_DIGITS: usize = 12;

/// Witness rounds for the probabilistic test.
pub const MILLER_RABIN_ROUNDS: usize = 25;

const WITNESSES: [u32; MILLER_RABIN_ROUNDS] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// Exact primality by trial division over odd divisors up to the square root.
pub fn is_prime_small(n: u64) -> bool {
    if n <= 1 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut x = 3u64;
    while x <= n / x {
        if n % x == 0 {
            return false;
        }
        x += 2;
    }
    true
}

/// Miller-Rabin over the first 25 primes as witnesses.
///
/// "Probably prime" is reported as prime.
pub fn is_prime_large(n: &BigUint) -> bool {
    let two = BigUint::from(2u32);
    if *n < two {
        return false;
    }
    for &p in WITNESSES.iter() {
        let p = BigUint::from(p);
        if *n == p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    let n_minus_one = n - BigUint::one();
    let shift = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> shift;

    'witness: for &a in WITNESSES.iter() {
        let mut x = BigUint::from(a).modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..shift {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::{is_prime_large, is_prime_small};
    use num_bigint::BigUint;

    #[test]
    fn small_rejects_trivial_values() {
        assert!(!is_prime_small(0));
        assert!(!is_prime_small(1));
        assert!(is_prime_small(2));
        assert!(!is_prime_small(4));
        assert!(is_prime_small(97));
        assert!(!is_prime_small(91));
    }

    #[test]
    fn small_handles_mersenne_exponents() {
        for exp in [2u32, 3, 5, 7, 13, 17, 19, 31] {
            assert!(is_prime_small((1u64 << exp) - 1), "2^{exp}-1");
        }
        for exp in [4u32, 6, 8, 9, 10, 11, 12] {
            assert!(!is_prime_small((1u64 << exp) - 1), "2^{exp}-1");
        }
    }

    #[test]
    fn large_agrees_with_small_on_word_range() {
        for n in 0u64..5_000 {
            assert_eq!(is_prime_large(&BigUint::from(n)), is_prime_small(n), "{n}");
        }
        assert!(is_prime_large(&BigUint::from(999_999_999_989u64)));
        assert!(!is_prime_large(&BigUint::from(999_999_999_987u64)));
    }

    #[test]
    fn large_rejects_carmichael_numbers() {
        for n in [561u64, 1105, 1729, 2465, 2821, 6601, 8911, 3_215_031_751] {
            assert!(!is_prime_large(&BigUint::from(n)), "{n}");
        }
    }

    #[test]
    fn large_accepts_belphegor_prime() {
        let n: BigUint = "1000000000000066600000000000001".parse().unwrap();
        assert!(is_prime_large(&n));
        assert!(!is_prime_large(&(&n * 7u32)));
    }
}
