//! Two-player real-time duel session.
//!
//! Both peers play the same fixed round list simultaneously; there are no
//! turns. Each peer owns its local state and broadcasts only its own score;
//! the opponent's score is a read-only mirror updated from inbound messages.
//! The model is peer-trusting: no server arbitrates.

mod channel;
mod protocol;

pub use channel::{ChannelError, LoopbackEnd, PeerChannel, PeerEvent, loopback};
pub use protocol::{PeerMessage, ProtocolError, decode, encode};

use crate::effects::{Feedback, Signal};
use crate::games::DEFINITION_PENALTY;
use crate::notice::{Notice, NoticeToken};
use crate::words::{Difficulty, FallbackWords, WordEntry};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Number of rounds in every match. The host draws this many.
pub const ROUNDS_PER_MATCH: usize = 5;

/// Points for a correct duel submission, before the reveal deduction.
pub const DUEL_WIN_POINTS: i32 = 10;

/// Connectivity status of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SessionStatus {
    /// Not yet hosting or joining.
    Lobby,
    /// Waiting for a guest; this peer generated the round list.
    Hosting,
    /// Waiting for the host's start message.
    Joining,
    /// Match in progress.
    Playing,
    /// Match finished; terminal.
    GameOver,
}

/// Which side of the match this peer is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// Generates and sends the round list.
    Host,
    /// Adopts the received round list verbatim.
    Guest,
}

/// Local verdict when the session reaches game-over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum MatchOutcome {
    /// Local score strictly greater than the opponent's last report.
    Win,
    /// Local score strictly less.
    Loss,
    /// Scores equal.
    Draw,
}

/// Session-level failure. Wrong answers are not errors; this only surfaces
/// transport send failures.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
#[display("session error: {}", _0)]
pub struct SessionError(ChannelError);

/// State machine for one two-player match.
#[derive(Debug)]
pub struct MatchSession {
    role: Role,
    status: SessionStatus,
    rounds: Vec<WordEntry>,
    index: usize,
    local_score: i32,
    opponent_score: i32,
    input: String,
    definition_revealed: bool,
    notice: Notice,
    connection_lost: bool,
}

impl MatchSession {
    /// Creates a hosting session with a freshly drawn round list.
    ///
    /// Rounds are drawn from the difficulty-scoped fallback pool with
    /// replacement; the list is fixed for the whole match.
    #[instrument(skip(rng))]
    pub fn host(difficulty: Difficulty, rng: &mut impl Rng) -> Self {
        let rounds = (0..ROUNDS_PER_MATCH)
            .map(|_| FallbackWords.draw(difficulty, &[], rng))
            .collect();
        info!(%difficulty, "hosting a new match");
        Self::with_rounds(Role::Host, SessionStatus::Hosting, rounds)
    }

    /// Creates a joining session that waits for the host's start message.
    pub fn join() -> Self {
        Self::with_rounds(Role::Guest, SessionStatus::Joining, Vec::new())
    }

    fn with_rounds(role: Role, status: SessionStatus, rounds: Vec<WordEntry>) -> Self {
        Self {
            role,
            status,
            rounds,
            index: 0,
            local_score: 0,
            opponent_score: 0,
            input: String::new(),
            definition_revealed: false,
            notice: Notice::default(),
            connection_lost: false,
        }
    }

    /// This peer's role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Current connectivity status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// The agreed round list (empty for a guest before the start message).
    pub fn rounds(&self) -> &[WordEntry] {
        &self.rounds
    }

    /// Index of the round currently being played. Never exceeds the list
    /// length; only advances forward.
    pub fn round_index(&self) -> usize {
        self.index
    }

    /// The word entry for the active round.
    pub fn current_round(&self) -> Option<&WordEntry> {
        self.rounds.get(self.index)
    }

    /// This peer's own score.
    pub fn local_score(&self) -> i32 {
        self.local_score
    }

    /// The opponent's last reported score. Never inferred locally.
    pub fn opponent_score(&self) -> i32 {
        self.opponent_score
    }

    /// The free-text input buffer for the active round.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whether the definition was revealed for the active round.
    pub fn definition_revealed(&self) -> bool {
        self.definition_revealed
    }

    /// Current transient or sticky message, if any.
    pub fn message(&self) -> Option<&str> {
        self.notice.text()
    }

    /// True when the session ended because the channel closed.
    pub fn connection_lost(&self) -> bool {
        self.connection_lost
    }

    /// Handles one inbound transport event.
    ///
    /// Connection close is terminal for the match with no recovery: the
    /// session moves straight to game-over and [`Self::connection_lost`] is
    /// set, so the UI can present a forfeit instead of a score comparison.
    #[instrument(skip(self, channel), fields(role = %self.role, status = %self.status))]
    pub fn handle_event(
        &mut self,
        event: PeerEvent,
        channel: &mut impl PeerChannel,
    ) -> Result<(), SessionError> {
        match event {
            PeerEvent::Open => self.on_open(channel),
            PeerEvent::Message(message) => {
                self.on_message(message);
                Ok(())
            }
            PeerEvent::Closed => {
                if self.status != SessionStatus::GameOver {
                    warn!("peer channel closed mid-match");
                    self.connection_lost = true;
                    self.status = SessionStatus::GameOver;
                }
                Ok(())
            }
        }
    }

    fn on_open(&mut self, channel: &mut impl PeerChannel) -> Result<(), SessionError> {
        match (self.role, self.status) {
            (Role::Host, SessionStatus::Hosting) => {
                channel.send(&PeerMessage::StartGame {
                    rounds: self.rounds.clone(),
                })?;
                self.index = 0;
                self.status = SessionStatus::Playing;
                info!(rounds = self.rounds.len(), "match started, list sent");
                Ok(())
            }
            // The guest stays in Joining until the start message arrives.
            _ => Ok(()),
        }
    }

    fn on_message(&mut self, message: PeerMessage) {
        match message {
            PeerMessage::StartGame { rounds } => {
                if self.role == Role::Guest && self.status == SessionStatus::Joining {
                    info!(rounds = rounds.len(), "adopted host round list");
                    self.rounds = rounds;
                    self.index = 0;
                    self.status = SessionStatus::Playing;
                } else {
                    warn!(role = %self.role, status = %self.status, "unexpected start message");
                }
            }
            PeerMessage::ScoreUpdate { score } => {
                // Last value wins; the opponent is the sole writer.
                self.opponent_score = score;
            }
            PeerMessage::GameOver => {
                // A finished peer force-terminates a lagging one; asymmetric
                // round completion is accepted.
                if self.status != SessionStatus::GameOver {
                    info!("peer finished, ending match");
                    self.status = SessionStatus::GameOver;
                }
            }
        }
    }

    /// Replaces the input buffer verbatim. Playing only.
    pub fn set_input(&mut self, text: &str) {
        if self.status == SessionStatus::Playing {
            self.input = text.to_string();
        }
    }

    /// Reveals the active round's definition. Costs [`DEFINITION_PENALTY`]
    /// points off a subsequent correct submission; monotonic per round.
    pub fn reveal_definition(&mut self) {
        if self.status == SessionStatus::Playing {
            self.definition_revealed = true;
        }
    }

    /// Submits the current input against the active round.
    ///
    /// A correct answer recomputes and broadcasts the local score, then
    /// either advances to the next round or, on the last round, sends
    /// `game-over` and terminates the session exactly once. A wrong answer
    /// stays in the round with error/shake cues and a transient message.
    #[instrument(skip(self, channel, feedback), fields(round = self.index))]
    pub fn submit(
        &mut self,
        channel: &mut impl PeerChannel,
        feedback: &mut impl Feedback,
    ) -> Result<Option<NoticeToken>, SessionError> {
        if self.status != SessionStatus::Playing {
            return Ok(None);
        }
        let Some(round) = self.rounds.get(self.index) else {
            return Ok(None);
        };

        if self.input.trim().to_uppercase() != round.word {
            debug!("duel submission did not match");
            feedback.signal(Signal::Error);
            feedback.signal(Signal::Shake);
            return Ok(Some(self.notice.set_transient("Try again")));
        }

        let points = DUEL_WIN_POINTS
            - if self.definition_revealed {
                DEFINITION_PENALTY
            } else {
                0
            };
        self.local_score += points;
        feedback.signal(Signal::Win);
        channel.send(&PeerMessage::ScoreUpdate {
            score: self.local_score,
        })?;

        if self.index + 1 == self.rounds.len() {
            channel.send(&PeerMessage::GameOver)?;
            self.status = SessionStatus::GameOver;
            info!(score = self.local_score, "finished own round list");
        } else {
            self.index += 1;
            self.input.clear();
            self.definition_revealed = false;
            self.notice.clear();
            debug!(next = self.index, "advancing to next round");
        }
        Ok(None)
    }

    /// Local verdict after game-over.
    ///
    /// Compares against the opponent's last reported score; if the final
    /// `score-update` is still in flight, the comparison is stale and the
    /// two peers may disagree. Accepted consistency gap.
    pub fn outcome(&self) -> Option<MatchOutcome> {
        if self.status != SessionStatus::GameOver {
            return None;
        }
        Some(match self.local_score.cmp(&self.opponent_score) {
            std::cmp::Ordering::Greater => MatchOutcome::Win,
            std::cmp::Ordering::Less => MatchOutcome::Loss,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        })
    }

    /// Timer callback for a previously returned notice token.
    pub fn expire_notice(&mut self, token: NoticeToken) {
        self.notice.expire(token);
    }
}
