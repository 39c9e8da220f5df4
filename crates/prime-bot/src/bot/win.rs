//! Best-first search for a sequence of plays that empties the hand.
//!
//! Nodes live in an arena and point at their parent by index. The frontier
//! prefers fewer remaining cards, then a spent rare-prime reservation, then
//! insertion order.

use prime_core::model::hand::Hand;
use prime_core::model::play::Play;
use prime_core::prime::catalog::{SPECIAL_PRIMES, is_rare_prime, rare_prime, special_primes};
use prime_core::prime::is_prime_small;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet, VecDeque};
use tracing::{Level, event};

/// Near-repdigit primes that shed many 9s in one play.
pub const MAX_CUT_PRIMES: [u64; 5] = [7, 97, 997, 9_973, 99_991];

/// Catalog lengths tried at every node.
const CATALOG_EXPANSION_LENGTH: usize = 5;
/// Longest catalog entry usable as the first, constrained play.
const OPENING_CATALOG_LENGTH: usize = 10;
/// Hands this small are enumerated exhaustively.
const EXHAUSTIVE_REMAINDER: u32 = 5;

#[derive(Debug, Clone)]
struct Node {
    hand: Hand,
    remain: u32,
    rare_available: bool,
    action: Option<Play>,
    parent: Option<usize>,
}

impl Node {
    fn is_finished(&self) -> bool {
        self.remain == 0 && !self.rare_available
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frontier {
    remain: u32,
    rare_available: bool,
    order: usize,
    index: usize,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .remain
            .cmp(&self.remain)
            .then_with(|| other.rare_available.cmp(&self.rare_available))
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default)]
struct Tree {
    nodes: Vec<Node>,
    frontier: BinaryHeap<Frontier>,
    inserted: usize,
}

impl Tree {
    fn enqueue(&mut self, index: usize) {
        let node = &self.nodes[index];
        self.frontier.push(Frontier {
            remain: node.remain,
            rare_available: node.rare_available,
            order: self.inserted,
            index,
        });
        self.inserted += 1;
    }

    fn add(&mut self, node: Node) {
        self.nodes.push(node);
        self.enqueue(self.nodes.len() - 1);
    }

    fn play(&mut self, parent: usize, action: Play) {
        let from = &self.nodes[parent];
        let used = action.counts();
        let node = Node {
            hand: from.hand.residual(&used),
            remain: from.remain - used.total(),
            rare_available: from.rare_available,
            action: Some(action),
            parent: Some(parent),
        };
        self.add(node);
    }

    /// The reserved cards are already outside `hand`, so only the flag flips.
    fn play_rare(&mut self, parent: usize) {
        let from = &self.nodes[parent];
        let node = Node {
            hand: from.hand,
            remain: from.remain,
            rare_available: false,
            action: Some(rare_prime()),
            parent: Some(parent),
        };
        self.add(node);
    }

    fn expand(&mut self, index: usize) {
        let Node {
            hand,
            remain,
            rare_available,
            ..
        } = self.nodes[index].clone();

        // 7 also comes out of the catalog below.
        for value in MAX_CUT_PRIMES
            .into_iter()
            .filter(|&value| SPECIAL_PRIMES.iter().all(|entry| entry.value != value))
        {
            if hand.contains(&Hand::of_u64(value)) {
                self.play(index, Play::from_u64(value));
            }
        }
        for length in 1..=CATALOG_EXPANSION_LENGTH {
            for value in special_primes(length, &hand, None) {
                self.play(index, Play::from_u64(value));
            }
        }
        if rare_available {
            self.play_rare(index);
        }

        if remain == 0 || remain > EXHAUSTIVE_REMAINDER {
            return;
        }
        let mut cards = hand.digits();
        if let [digit] = cards[..] {
            if is_prime_small(digit as u64) {
                self.play(index, Play::from_u64(digit as u64));
            }
            return;
        }
        loop {
            let value = cards.iter().fold(0u64, |acc, &d| acc * 10 + d as u64);
            if is_prime_small(value) {
                self.play(index, Play::from_u64(value));
            }
            if !next_permutation(&mut cards) {
                break;
            }
        }
    }

    fn path_to(&self, mut index: usize) -> Vec<Play> {
        let mut actions = Vec::new();
        while let Some(parent) = self.nodes[index].parent {
            if let Some(action) = &self.nodes[index].action {
                actions.push(action.clone());
            }
            index = parent;
        }
        actions.reverse();
        actions
    }
}

/// Lexicographic successor; false once the slice is in descending order.
fn next_permutation(values: &mut [u8]) -> bool {
    let Some(pivot) = values.windows(2).rposition(|w| w[0] < w[1]) else {
        return false;
    };
    let Some(successor) = values.iter().rposition(|&v| v > values[pivot]) else {
        return false;
    };
    values.swap(pivot, successor);
    values[pivot + 1..].reverse();
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinSearch {
    node_limit: usize,
}

impl WinSearch {
    pub const fn new(node_limit: usize) -> Self {
        Self { node_limit }
    }

    pub const fn node_limit(&self) -> usize {
        self.node_limit
    }

    /// Looks for plays that use every card in `hand` and the rare prime if it
    /// is still reserved.
    ///
    /// `opening` carries the required length and the number to beat when the
    /// first play must answer one; only catalog primes (or the rare prime)
    /// are tried for that first play.
    pub fn find(
        &self,
        hand: &Hand,
        rare_available: bool,
        opening: Option<(usize, &Play)>,
    ) -> Option<Vec<Play>> {
        let mut tree = Tree::default();
        tree.nodes.push(Node {
            hand: *hand,
            remain: hand.total(),
            rare_available,
            action: None,
            parent: None,
        });

        match opening {
            Some((length, previous)) => {
                let bound = previous.value();
                let specials = if length <= OPENING_CATALOG_LENGTH {
                    special_primes(length, hand, Some(&bound))
                } else {
                    Vec::new()
                };
                if !specials.is_empty() {
                    for value in specials {
                        tree.play(0, Play::from_u64(value));
                    }
                } else if rare_available && rare_prime() > *previous {
                    tree.play_rare(0);
                } else {
                    return None;
                }
            }
            None => tree.enqueue(0),
        }

        let mut visited: HashSet<(bool, Hand)> = HashSet::new();
        let mut finished = None;
        let mut pops = 0usize;
        while pops < self.node_limit {
            let Some(entry) = tree.frontier.pop() else {
                break;
            };
            pops += 1;
            let node = &tree.nodes[entry.index];
            if node.is_finished() {
                finished = Some(entry.index);
                break;
            }
            if !visited.insert((node.rare_available, node.hand)) {
                continue;
            }
            tree.expand(entry.index);
        }

        event!(
            target: "prime_bot::win",
            Level::DEBUG,
            pops,
            nodes = tree.nodes.len(),
            found = finished.is_some(),
            "win search finished"
        );

        let actions = tree.path_to(finished?);
        if actions.is_empty() {
            None
        } else {
            Some(actions)
        }
    }
}

/// A winning line found on an earlier turn, played one action per turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WinPlan {
    actions: VecDeque<Play>,
}

impl WinPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_actions(actions: Vec<Play>) -> Self {
        Self {
            actions: actions.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn pop_next(&mut self) -> Option<Play> {
        self.actions.pop_front()
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }

    /// True when the next action is affordable from `hand` (the rare prime is
    /// affordable while `reserved`) and beats `previous`.
    pub fn next_is_playable(&self, hand: &Hand, reserved: bool, previous: Option<&Play>) -> bool {
        let Some(next) = self.actions.front() else {
            return false;
        };
        let affordable = (reserved && is_rare_prime(next)) || hand.contains(&next.counts());
        affordable && previous.is_none_or(|previous| next > previous)
    }
}
