//! Line-delimited JSON conversation with the game server.
//!
//! Every inbound line gets exactly one outbound line: the player's answer for
//! `play`, an empty line otherwise. The loop ends after `quit` or at end of
//! input.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use prime_bot::{Decision, PrimePlayer, TurnInput, TurnInputError};
use prime_core::game::message::{Inbound, Outbound, PlayRequest};
use rand::Rng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::{Level, event};

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("line is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),
    #[error("message has no action")]
    MissingAction,
    #[error("unknown action {0:?}")]
    UnknownAction(String),
    #[error("malformed {action} message: {source}")]
    Malformed {
        action: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid play request: {0}")]
    InvalidTurn(#[from] TurnInputError),
    #[error("failed to encode answer: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ProtocolError {
    fn concerns_play(&self) -> bool {
        match self {
            ProtocolError::Malformed { action, .. } => action == "play",
            ProtocolError::InvalidTurn(_) => true,
            _ => false,
        }
    }
}

const KNOWN_ACTIONS: [&str; 4] = ["init", "play", "pass", "quit"];

/// One outbound line and whether the conversation is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub line: String,
    pub quit: bool,
}

impl Reply {
    fn empty() -> Self {
        Self {
            line: String::new(),
            quit: false,
        }
    }

    fn answer(answer: &Outbound) -> Result<Self, ProtocolError> {
        let line = answer.to_json().map_err(ProtocolError::Encode)?;
        Ok(Self { line, quit: false })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub numbers: usize,
    pub passes: usize,
    pub errors: usize,
    pub quit: bool,
}

#[derive(Debug)]
pub struct Session<R = StdRng> {
    player: PrimePlayer<R>,
    name: Option<String>,
    time_budget: Option<f64>,
    stats: SessionStats,
}

impl<R: Rng> Session<R> {
    pub fn new(player: PrimePlayer<R>) -> Self {
        Self {
            player,
            name: None,
            time_budget: None,
            stats: SessionStats::default(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Seconds per turn announced by `init`; recorded but not enforced.
    pub fn time_budget(&self) -> Option<f64> {
        self.time_budget
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Answer one inbound line.
    pub fn respond(&mut self, line: &str) -> Result<Reply, ProtocolError> {
        let value: serde_json::Value = serde_json::from_str(line).map_err(ProtocolError::Json)?;
        let action = value
            .get("action")
            .and_then(serde_json::Value::as_str)
            .ok_or(ProtocolError::MissingAction)?
            .to_string();
        if !KNOWN_ACTIONS.contains(&action.as_str()) {
            return Err(ProtocolError::UnknownAction(action));
        }
        event!(target: "prime_client::session", Level::TRACE, %action, "message received");

        let message: Inbound = serde_json::from_value(value)
            .map_err(|source| ProtocolError::Malformed { action, source })?;
        match message {
            Inbound::Init {
                uid, names, time, ..
            } => {
                self.name = names.get(uid).cloned();
                self.time_budget = Some(time);
                event!(
                    target: "prime_client::session",
                    Level::INFO,
                    uid,
                    name = ?self.name,
                    players = names.len(),
                    time,
                    "game initialised"
                );
                Ok(Reply::empty())
            }
            Inbound::Play(request) => self.play(&request),
            Inbound::Pass { .. } => Ok(Reply::empty()),
            Inbound::Quit => {
                self.stats.quit = true;
                Ok(Reply {
                    line: String::new(),
                    quit: true,
                })
            }
        }
    }

    fn play(&mut self, request: &PlayRequest) -> Result<Reply, ProtocolError> {
        let mut input = TurnInput::from_request(request)?;
        if let Some(name) = &self.name {
            input.name = name.clone();
        }
        let answer = match self.player.decide(&input) {
            Decision::Number(play) => {
                self.stats.numbers += 1;
                Outbound::Number {
                    cards: play.digits().to_vec(),
                }
            }
            Decision::Pass => {
                self.stats.passes += 1;
                Outbound::Pass
            }
        };
        Reply::answer(&answer)
    }

    /// Drive the conversation until `quit` or end of input.
    pub fn run<I: BufRead, O: Write>(&mut self, input: I, mut output: O) -> Result<SessionStats> {
        for line in input.lines() {
            let line = line.context("reading protocol line")?;
            if line.trim().is_empty() {
                continue;
            }
            let reply = match self.respond(&line) {
                Ok(reply) => reply,
                Err(err) => {
                    self.stats.errors += 1;
                    event!(
                        target: "prime_client::session",
                        Level::WARN,
                        error = %err,
                        "unusable message"
                    );
                    if err.concerns_play() {
                        self.stats.passes += 1;
                        Reply::answer(&Outbound::Pass).context("encoding fallback pass")?
                    } else {
                        Reply::empty()
                    }
                }
            };
            writeln!(output, "{}", reply.line).context("writing protocol line")?;
            output.flush().context("flushing protocol output")?;
            if reply.quit {
                break;
            }
        }
        Ok(self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prime_bot::{PenaltyParams, SearchLimits};

    fn session() -> Session {
        Session::new(PrimePlayer::with_seed(
            PenaltyParams::default(),
            SearchLimits::default(),
            8,
        ))
    }

    #[test]
    fn init_records_name_and_budget() {
        let mut session = session();
        let reply = session
            .respond(r#"{"action":"init","uid":1,"names":["rival","akemi"],"hand":[],"time":2.5}"#)
            .unwrap();
        assert_eq!(reply, Reply::empty());
        assert_eq!(session.name(), Some("akemi"));
        assert_eq!(session.time_budget(), Some(2.5));
    }

    #[test]
    fn play_answers_with_digits() {
        let mut session = session();
        let reply = session
            .respond(r#"{"action":"play","name":"akemi","hand":[3,7],"numbers":["3"]}"#)
            .unwrap();
        assert_eq!(reply.line, r#"{"action":"number","cards":[7]}"#);
    }

    #[test]
    fn pass_reply_matches_the_wire_format() {
        let reply = Reply::answer(&Outbound::Pass).unwrap();
        assert_eq!(reply.line, r#"{"action":"pass"}"#);
        assert!(!reply.quit);
    }

    #[test]
    fn unknown_action_is_rejected() {
        let err = session().respond(r#"{"action":"dance"}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::UnknownAction(action) if action == "dance"));
    }

    #[test]
    fn malformed_play_falls_back_to_pass() {
        let mut session = session();
        let input = concat!(
            r#"{"action":"play","name":"akemi","hand":"nope"}"#,
            "\n",
            r#"{"action":"play","name":"akemi","hand":[1,13]}"#,
            "\n",
            "not json\n",
        );
        let mut output = Vec::new();
        let stats = session.run(input.as_bytes(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![r#"{"action":"pass"}"#, r#"{"action":"pass"}"#, ""]);
        assert_eq!(stats.errors, 3);
        assert!(!stats.quit);
    }
}
