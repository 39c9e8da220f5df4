/// Longest opening play the reward table covers.
pub const MAX_OPENING_LENGTH: usize = 5;

/// Reward when the lap ends on our own removal.
pub const LAST_REMOVAL_REWARD: i64 = 5_000_000;
/// Reward when we finish the lap holding (one of) the smallest piles.
pub const SMALLEST_PILE_REWARD: i64 = 10_000_000;

/// Per-length opening rewards derived from the elimination lap model.
///
/// Starting from our seat, each player in turn removes the current stake
/// from their pile if they can; the stake doubles after every removal. The
/// lap ends once a pile is emptied or a full lap passes with no removal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnRewards {
    table: [i64; MAX_OPENING_LENGTH + 1],
}

impl TurnRewards {
    /// Builds the table for `me` given every player's hand size in seating
    /// order. Unknown players and empty tables get no reward.
    pub fn estimate(hands: &[(String, u32)], me: &str) -> Self {
        let mut rewards = Self::default();
        let Some(seat) = hands.iter().position(|(name, _)| name == me) else {
            return rewards;
        };

        for start in 1..=MAX_OPENING_LENGTH {
            let (piles, last) = simulate_lap(hands, seat, start as u64);
            if last == Some(seat) {
                rewards.table[start] += LAST_REMOVAL_REWARD;
            }
            let smallest = piles.iter().copied().min().unwrap_or(0);
            if piles[seat] == smallest {
                rewards.table[start] += SMALLEST_PILE_REWARD;
            }
        }
        rewards
    }

    pub fn reward(&self, length: usize) -> i64 {
        self.table.get(length).copied().unwrap_or(0)
    }

    pub fn table(&self) -> &[i64; MAX_OPENING_LENGTH + 1] {
        &self.table
    }
}

fn simulate_lap(hands: &[(String, u32)], seat: usize, start: u64) -> (Vec<u64>, Option<usize>) {
    let mut piles: Vec<u64> = hands.iter().map(|(_, size)| *size as u64).collect();
    let players = piles.len();
    let mut stake = start;
    let mut last = None;
    let mut idle = 0usize;
    let mut index = seat;

    while idle < players {
        if piles[index] >= stake {
            piles[index] -= stake;
            stake = stake.saturating_mul(2);
            last = Some(index);
            idle = 0;
            if piles[index] == 0 {
                break;
            }
        } else {
            idle += 1;
        }
        index = (index + 1) % players;
    }
    (piles, last)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats(sizes: &[(&str, u32)]) -> Vec<(String, u32)> {
        sizes
            .iter()
            .map(|(name, size)| (name.to_string(), *size))
            .collect()
    }

    #[test]
    fn missing_player_gets_no_reward() {
        let hands = seats(&[("a", 10), ("b", 10)]);
        assert_eq!(TurnRewards::estimate(&hands, "me"), TurnRewards::default());
        assert_eq!(TurnRewards::estimate(&[], "me").reward(3), 0);
    }

    #[test]
    fn lap_stops_when_a_pile_empties() {
        // stake 1: me 3->2, b 3->1, then nobody can pay 4 for a full lap
        let hands = seats(&[("me", 3), ("b", 3), ("c", 3)]);
        let (piles, last) = simulate_lap(&hands, 0, 1);
        assert_eq!(piles, vec![2, 1, 3]);
        assert_eq!(last, Some(1));

        // stake 3 empties my pile immediately
        let (piles, last) = simulate_lap(&hands, 0, 3);
        assert_eq!(piles, vec![0, 3, 3]);
        assert_eq!(last, Some(0));
    }

    #[test]
    fn rewards_favor_lengths_that_leave_me_smallest() {
        let hands = seats(&[("me", 3), ("b", 3), ("c", 3)]);
        let rewards = TurnRewards::estimate(&hands, "me");
        // length 3 ends the lap on my removal and leaves me with the smallest pile
        assert_eq!(rewards.reward(3), LAST_REMOVAL_REWARD + SMALLEST_PILE_REWARD);
        assert_eq!(rewards.reward(0), 0);
        assert_eq!(rewards.reward(MAX_OPENING_LENGTH + 1), 0);
    }

    #[test]
    fn lap_without_any_removal_terminates() {
        let hands = seats(&[("me", 1), ("b", 2)]);
        let (piles, last) = simulate_lap(&hands, 0, 5);
        assert_eq!(piles, vec![1, 2]);
        assert_eq!(last, None);
    }
}
