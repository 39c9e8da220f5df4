use super::TurnContext;
use super::follow::solve_follow;
use super::general::solve_general;
use super::massive::{MASSIVE_THRESHOLD, solve_massive};
use super::opening::solve_opening;
use super::params::{PenaltyParams, SearchLimits};
use super::reward::TurnRewards;
use super::win::{WinPlan, WinSearch};
use prime_core::game::message::PlayRequest;
use prime_core::model::hand::{DIGITS, Hand};
use prime_core::model::play::{ParsePlayError, Play};
use prime_core::prime::catalog::{
    RARE_PRIME_CARDS, holds_rare_reservation, is_rare_prime, rare_prime,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{Level, event};

/// One `play` request reduced to what the solvers read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnInput {
    pub name: String,
    pub hand: Vec<u8>,
    pub numbers: Vec<Play>,
    pub hands: Vec<(String, u32)>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TurnInputError {
    #[error("card {0} is not a decimal digit")]
    InvalidCard(u8),
    #[error("number on the table is malformed: {0}")]
    InvalidNumber(#[from] ParsePlayError),
}

impl TurnInput {
    pub fn from_request(request: &PlayRequest) -> Result<Self, TurnInputError> {
        if let Some(&card) = request.hand.iter().find(|&&card| card as usize >= DIGITS) {
            return Err(TurnInputError::InvalidCard(card));
        }
        let numbers = request
            .numbers
            .iter()
            .map(|raw| raw.parse::<Play>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: request.name.clone(),
            hand: request.hand.clone(),
            numbers,
            hands: request.hands.clone(),
        })
    }

    /// Digits the answer must have: the combined length of everything on the table.
    pub fn required_length(&self) -> usize {
        self.numbers.iter().map(Play::len).sum()
    }

    pub fn previous(&self) -> Option<&Play> {
        self.numbers.last()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Number(Play),
    Pass,
}

impl Decision {
    pub fn play(&self) -> Option<&Play> {
        match self {
            Decision::Number(play) => Some(play),
            Decision::Pass => None,
        }
    }
}

/// Turn loop state: tuning, the cached winning line, and the random source
/// used by the constructive solvers.
#[derive(Debug)]
pub struct PrimePlayer<R = StdRng> {
    params: PenaltyParams,
    limits: SearchLimits,
    plan: WinPlan,
    rng: R,
}

impl PrimePlayer<StdRng> {
    pub fn with_seed(params: PenaltyParams, limits: SearchLimits, seed: u64) -> Self {
        Self::new(params, limits, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PrimePlayer<R> {
    pub fn new(params: PenaltyParams, limits: SearchLimits, rng: R) -> Self {
        Self {
            params,
            limits,
            plan: WinPlan::new(),
            rng,
        }
    }

    pub fn plan(&self) -> &WinPlan {
        &self.plan
    }

    pub fn plan_mut(&mut self) -> &mut WinPlan {
        &mut self.plan
    }

    /// Pick this turn's answer.
    ///
    /// Panics if a solver hands back a number that is not prime or cannot be
    /// built from the hand; sending it would corrupt the game.
    pub fn decide(&mut self, input: &TurnInput) -> Decision {
        let full = Hand::from_digits(&input.hand);
        let rewards = TurnRewards::estimate(&input.hands, &input.name);
        let length = input.required_length();
        let previous = input.previous();
        let reserved = holds_rare_reservation(&full);
        let hand = if reserved {
            full.residual(&RARE_PRIME_CARDS)
        } else {
            full
        };
        let params = self.params;
        let ctx = TurnContext::new(hand, reserved, previous, &params, &rewards, self.limits);

        let (choice, source) = if let Some(play) = self.follow_plan(&ctx, length) {
            (Some(play), "plan")
        } else {
            match self.solve(&ctx, input.numbers.len(), length) {
                Some(play) => (Some(play), "solver"),
                None if reserved && ctx.exceeds_previous(&rare_prime()) => {
                    (Some(rare_prime()), "rare")
                }
                None => (None, "none"),
            }
        };

        let decision = match choice {
            Some(play) => {
                self.check_legal(&full, reserved, previous, &play);
                Decision::Number(play)
            }
            None => Decision::Pass,
        };
        event!(
            target: "prime_bot::turn",
            Level::DEBUG,
            cards = full.total(),
            numbers = input.numbers.len(),
            length,
            reserved,
            source,
            decision = ?decision.play().map(ToString::to_string),
            plan_left = self.plan.len(),
            "turn decided"
        );
        decision
    }

    fn follow_plan(&mut self, ctx: &TurnContext<'_>, length: usize) -> Option<Play> {
        if !self.plan.is_empty()
            && !self
                .plan
                .next_is_playable(&ctx.hand, ctx.reserved, ctx.previous)
        {
            event!(
                target: "prime_bot::win",
                Level::DEBUG,
                dropped = self.plan.len(),
                "cached plan no longer playable"
            );
            self.plan.clear();
        }
        if self.plan.is_empty() {
            let search = WinSearch::new(self.limits.win_node_limit);
            let opening = ctx.previous.map(|previous| (length, previous));
            if let Some(actions) = search.find(&ctx.hand, ctx.reserved, opening) {
                self.plan = WinPlan::from_actions(actions);
            }
            if !self
                .plan
                .next_is_playable(&ctx.hand, ctx.reserved, ctx.previous)
            {
                self.plan.clear();
            }
        }
        self.plan.pop_next()
    }

    fn solve(&mut self, ctx: &TurnContext<'_>, numbers: usize, length: usize) -> Option<Play> {
        match (numbers, ctx.previous) {
            (0, _) | (_, None) => solve_opening(ctx),
            (1, Some(previous)) => solve_follow(ctx, previous, length, &mut self.rng),
            _ if length > MASSIVE_THRESHOLD => solve_massive(ctx, length, &mut self.rng),
            _ => solve_general(ctx, length, &mut self.rng),
        }
    }

    fn check_legal(&self, full: &Hand, reserved: bool, previous: Option<&Play>, play: &Play) {
        if is_rare_prime(play) {
            assert!(reserved, "rare prime chosen without its reservation");
        } else {
            assert!(
                full.contains(&play.counts()),
                "chosen number {play} is not in hand {:?}",
                full.digits()
            );
            assert!(play.is_prime(), "chosen number {play} is not prime");
        }
        if let Some(previous) = previous {
            assert!(play > previous, "chosen number {play} does not beat {previous}");
        }
    }
}
