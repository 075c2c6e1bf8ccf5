//! Spellplay - a word-game suite.
//!
//! Three modes share one core: a tile-placement definition puzzle, a
//! dictation-style spelling puzzle, and a two-player duel variant of the
//! spelling puzzle synchronized over a direct peer connection.
//!
//! # Architecture
//!
//! - **Tiles**: scored letter tiles and unbiased shuffling
//! - **Words**: the external provider boundary plus static fallback pools
//! - **Effects**: injected capabilities (score, audio cues, speech, images)
//! - **Games**: the placement and dictation round state machines
//! - **Session**: the peer-synchronized duel and its three-message protocol
//!
//! Everything runs on a single cooperative event queue: engine operations
//! complete atomically, and asynchronous arrivals (peer messages, notice
//! timers) are delivered as discrete events by the host environment.
//!
//! # Example
//!
//! ```
//! use spellplay::{
//!     Difficulty, DictationEngine, FallbackWords, NullFeedback, RecordingSink, RoundStatus,
//! };
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let mut engine = DictationEngine::new();
//! let mut score = RecordingSink::default();
//!
//! let entry = FallbackWords.draw(Difficulty::Easy, &engine.recent_words(), &mut rng);
//! let word = entry.word.clone();
//! engine.start_round(entry);
//! engine.set_input(&word);
//! engine.submit(&mut score, &mut NullFeedback::default());
//! assert_eq!(engine.status(), RoundStatus::Won);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod effects;
mod games;
mod notice;
mod session;
mod tiles;
mod words;

pub use effects::{
    Feedback, ImageError, ImageRef, ImageSource, NullFeedback, RecordingFeedback, RecordingSink,
    ScoreSink, Signal, SilentSpeech, Speech, image_or_placeholder,
};
pub use games::{
    DEFINITION_PENALTY, DictationEngine, DictationRound, HINT_PENALTY, LETTER_PENALTY, Panel,
    PlacementEngine, PlacementRound, RECENT_CAP, RoundStatus,
};
pub use notice::{NOTICE_TTL, Notice, NoticeToken};
pub use session::{
    ChannelError, DUEL_WIN_POINTS, LoopbackEnd, MatchOutcome, MatchSession, PeerChannel, PeerEvent,
    PeerMessage, ProtocolError, ROUNDS_PER_MATCH, Role, SessionError, SessionStatus, decode,
    encode, loopback,
};
pub use tiles::{Tile, TileId, letter_value, shuffle, tiles_for, word_value};
pub use words::{
    Difficulty, FALLBACK_DELAY, FallbackWords, GameMode, Provenance, WordEntry, WordRequest,
    WordSource, WordSourceError, fetch_or_fallback,
};
