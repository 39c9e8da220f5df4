pub mod bot;

pub use bot::{
    Decision, PenaltyParams, PrimePlayer, SearchLimits, TurnContext, TurnInput, TurnInputError,
    TurnRewards, WinPlan, WinSearch,
};
