use crate::model::hand::Hand;
use crate::prime::{EXACT_TEST_DIGITS, is_prime_large, is_prime_small};
use core::fmt;
use num_bigint::BigUint;
use std::cmp::Ordering;
use std::str::FromStr;

/// Largest digit count whose values always fit in a `u64`.
pub const WORD_SAFE_DIGITS: usize = 19;

/// A non-negative number as the ordered decimal digits of its cards.
///
/// Digits are stored most significant first with no leading zero (except for
/// the value zero itself), so comparing two plays compares their values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Play {
    digits: Vec<u8>,
}

impl Play {
    pub fn from_u64(value: u64) -> Self {
        Self {
            digits: value.to_string().bytes().map(|b| b - b'0').collect(),
        }
    }

    pub fn from_biguint(value: &BigUint) -> Self {
        Self {
            digits: value.to_radix_be(10),
        }
    }

    /// Wraps a digit sequence, stripping leading zeros.
    ///
    /// Returns `None` for an empty sequence or a non-digit entry.
    pub fn from_digits(digits: &[u8]) -> Option<Self> {
        if digits.is_empty() || digits.iter().any(|&d| d > 9) {
            return None;
        }
        let start = digits
            .iter()
            .position(|&d| d != 0)
            .unwrap_or(digits.len() - 1);
        Some(Self {
            digits: digits[start..].to_vec(),
        })
    }

    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// The cards this number consumes.
    pub fn counts(&self) -> Hand {
        Hand::from_digits(&self.digits)
    }

    pub fn value(&self) -> BigUint {
        BigUint::from_radix_be(&self.digits, 10).unwrap_or_default()
    }

    pub fn to_u64(&self) -> Option<u64> {
        if self.digits.len() > WORD_SAFE_DIGITS + 1 {
            return None;
        }
        self.digits.iter().try_fold(0u64, |acc, &d| {
            acc.checked_mul(10).and_then(|v| v.checked_add(d as u64))
        })
    }

    /// Exact trial division for short numbers, Miller-Rabin beyond that.
    pub fn is_prime(&self) -> bool {
        match self.to_u64() {
            Some(value) if self.len() <= EXACT_TEST_DIGITS => is_prime_small(value),
            _ => is_prime_large(&self.value()),
        }
    }
}

impl Ord for Play {
    fn cmp(&self, other: &Self) -> Ordering {
        self.digits
            .len()
            .cmp(&other.digits.len())
            .then_with(|| self.digits.cmp(&other.digits))
    }
}

impl PartialOrd for Play {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Play {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in &self.digits {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePlayError(pub String);

impl fmt::Display for ParsePlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a decimal number", self.0)
    }
}

impl std::error::Error for ParsePlayError {}

impl FromStr for Play {
    type Err = ParsePlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParsePlayError(s.to_string()));
        }
        let digits: Vec<u8> = trimmed.bytes().map(|b| b - b'0').collect();
        Play::from_digits(&digits).ok_or_else(|| ParsePlayError(s.to_string()))
    }
}
