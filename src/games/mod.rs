//! Single-player puzzle engines.

mod dictation;
mod placement;

pub use dictation::{
    DEFINITION_PENALTY, DictationEngine, DictationRound, LETTER_PENALTY, Panel,
};
pub use placement::{HINT_PENALTY, PlacementEngine, PlacementRound};

use serde::{Deserialize, Serialize};

/// How many previously seen target words are kept for repeat avoidance.
pub const RECENT_CAP: usize = 20;

/// Lifecycle of a single round.
///
/// Transitions are one-directional within a round: `Loading` → `Playing` →
/// (`Won` | `Error`). Only an explicit new-round action re-enters `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RoundStatus {
    /// Waiting for round data.
    Loading,
    /// Round is live and accepting player actions.
    Playing,
    /// Target word matched; terminal for the round.
    Won,
    /// Irrecoverable provider failure; reserved, unused in normal play.
    Error,
}
