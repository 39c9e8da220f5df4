mod follow;
mod general;
mod massive;
mod opening;
mod params;
mod player;
mod reward;
mod scoring;
mod win;

pub use follow::{EXACT_SCAN_DIGITS, solve_follow};
pub use general::{CATALOG_SHORTCUT_BELOW, Layout, WORD_DIGITS, arrange_digits, solve_general};
pub use massive::{MASSIVE_THRESHOLD, solve_massive};
pub use opening::solve_opening;
pub use params::{
    DEFAULT_SHUFFLE_BUDGET, DEFAULT_WIN_NODE_LIMIT, ParamsError, PenaltyParams, SearchLimits,
};
pub use player::{Decision, PrimePlayer, TurnInput, TurnInputError};
pub use reward::{MAX_OPENING_LENGTH, TurnRewards};
pub use scoring::{EMPTY_HAND_BONUS, SINGLE_PRIME_DIGITS_BONUS, is_odd_tail, score};
pub use win::{MAX_CUT_PRIMES, WinPlan, WinSearch};

use prime_core::model::hand::Hand;
use prime_core::model::play::Play;

/// Everything a solver needs for one turn.
///
/// Built by the player at the start of a turn and dropped when the decision
/// is made. `hand` already excludes cards held back for the rare prime.
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'a> {
    pub hand: Hand,
    pub reserved: bool,
    pub previous: Option<&'a Play>,
    pub params: &'a PenaltyParams,
    pub rewards: &'a TurnRewards,
    pub limits: SearchLimits,
}

impl<'a> TurnContext<'a> {
    pub fn new(
        hand: Hand,
        reserved: bool,
        previous: Option<&'a Play>,
        params: &'a PenaltyParams,
        rewards: &'a TurnRewards,
        limits: SearchLimits,
    ) -> Self {
        Self {
            hand,
            reserved,
            previous,
            params,
            rewards,
            limits,
        }
    }

    pub fn score(&self, used: &Hand) -> i64 {
        score(self.params, &self.hand, used)
    }

    pub fn exceeds_previous(&self, play: &Play) -> bool {
        self.previous.is_none_or(|previous| play > previous)
    }
}

/// Lowest-score candidate seen so far; the first of equal scores is kept.
#[derive(Debug)]
pub(crate) struct Best<T> {
    entry: Option<(T, i64)>,
}

impl<T> Best<T> {
    pub(crate) fn new() -> Self {
        Self { entry: None }
    }

    pub(crate) fn beats(&self, score: i64) -> bool {
        self.entry.as_ref().is_none_or(|(_, best)| score < *best)
    }

    pub(crate) fn offer(&mut self, item: T, score: i64) {
        if self.beats(score) {
            self.entry = Some((item, score));
        }
    }

    pub(crate) fn score(&self) -> Option<i64> {
        self.entry.as_ref().map(|(_, score)| *score)
    }

    pub(crate) fn into_inner(self) -> Option<T> {
        self.entry.map(|(item, _)| item)
    }
}

pub(crate) fn pow10(exp: usize) -> u64 {
    10u64.pow(exp as u32)
}
