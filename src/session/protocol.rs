//! Peer message protocol for the two-player duel.
//!
//! Exactly three tagged records cross the wire. No acknowledgement, retry,
//! or ordering guarantee is layered on top of what the channel provides.

use crate::words::WordEntry;
use serde::{Deserialize, Serialize};

/// A message exchanged between the two peers of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PeerMessage {
    /// Host → guest: the agreed round list; play begins.
    StartGame {
        /// Full ordered round list the guest adopts verbatim.
        rounds: Vec<WordEntry>,
    },
    /// Either direction: the sender's current total score.
    ScoreUpdate {
        /// The sender's own score. Each peer is the sole writer of its own.
        score: i32,
    },
    /// Either direction: the sender finished its round list.
    GameOver,
}

/// Wire codec failure.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
#[display("protocol codec error: {}", _0)]
pub struct ProtocolError(serde_json::Error);

/// Serializes a message for the wire.
pub fn encode(message: &PeerMessage) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(message)?)
}

/// Deserializes a message from the wire.
pub fn decode(raw: &str) -> Result<PeerMessage, ProtocolError> {
    Ok(serde_json::from_str(raw)?)
}
