use serde::{Deserialize, Serialize};

/// One line received from the game server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Inbound {
    Init {
        uid: usize,
        names: Vec<String>,
        #[serde(default)]
        hand: Vec<u8>,
        #[serde(default)]
        time: f64,
    },
    Play(PlayRequest),
    Pass {
        #[serde(default)]
        draw: serde_json::Value,
    },
    Quit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayRequest {
    pub name: String,
    pub hand: Vec<u8>,
    /// Numbers already on the table this round, as exact decimal strings.
    #[serde(default)]
    pub numbers: Vec<String>,
    /// Every player's hand size in seating order.
    #[serde(default)]
    pub hands: Vec<(String, u32)>,
}

/// The player's answer to a `play` line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Outbound {
    Number { cards: Vec<u8> },
    Pass,
}

impl Inbound {
    pub fn from_json(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }
}

impl Outbound {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
