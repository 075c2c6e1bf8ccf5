//! Tile-placement definition puzzle.
//!
//! The player reconstructs a target word by moving scored tiles from a rack
//! onto a board of slots, guided by the word's definition and an
//! illustration. Wrong arrangements are never fatal; the board simply stays
//! in play until the letters line up.

use super::{RECENT_CAP, RoundStatus};
use crate::effects::{Feedback, ImageRef, ScoreSink, Signal};
use crate::notice::{Notice, NoticeToken};
use crate::tiles::{self, Tile, TileId};
use rand::Rng;
use std::collections::VecDeque;
use tracing::{debug, info, instrument};

/// Points deducted from the accumulator for each hint request.
pub const HINT_PENALTY: i32 = 5;

/// One live placement round.
#[derive(Debug, Clone)]
pub struct PlacementRound {
    word: String,
    definition: String,
    image: ImageRef,
    slots: Vec<Option<Tile>>,
    rack: Vec<Tile>,
    status: RoundStatus,
    notice: Notice,
}

impl PlacementRound {
    /// The target word, uppercase. Immutable for the round.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// The word's definition shown as the clue.
    pub fn definition(&self) -> &str {
        &self.definition
    }

    /// Display-only illustration reference.
    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    /// Board slots, left to right; `None` is an empty slot.
    pub fn slots(&self) -> &[Option<Tile>] {
        &self.slots
    }

    /// Tiles still on the rack.
    pub fn rack(&self) -> &[Tile] {
        &self.rack
    }

    /// Round lifecycle status.
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    /// Current transient or sticky message, if any.
    pub fn message(&self) -> Option<&str> {
        self.notice.text()
    }

    /// Sum of the values of currently placed tiles.
    pub fn board_score(&self) -> u32 {
        self.slots
            .iter()
            .flatten()
            .map(|tile| tile.value)
            .sum()
    }

    /// Letters currently on the board, with `.` for empty slots.
    pub fn board_letters(&self) -> String {
        self.slots
            .iter()
            .map(|slot| slot.as_ref().map_or('.', |t| t.letter))
            .collect()
    }

    fn first_empty_slot(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }
}

/// State machine for the placement puzzle.
///
/// Randomness is injected so rack shuffles are reproducible in tests; score
/// and feedback capabilities are passed per operation.
#[derive(Debug)]
pub struct PlacementEngine<R: Rng> {
    rng: R,
    recent: VecDeque<String>,
    round: Option<PlacementRound>,
}

impl<R: Rng> PlacementEngine<R> {
    /// Creates an engine with no active round (status reads `Loading`).
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            recent: VecDeque::new(),
            round: None,
        }
    }

    /// The active round, if one has started.
    pub fn round(&self) -> Option<&PlacementRound> {
        self.round.as_ref()
    }

    /// Round status; `Loading` while no round data has arrived.
    pub fn status(&self) -> RoundStatus {
        self.round
            .as_ref()
            .map_or(RoundStatus::Loading, PlacementRound::status)
    }

    /// Recently seen target words, newest last, for provider dedupe.
    pub fn recent_words(&self) -> Vec<String> {
        self.recent.iter().cloned().collect()
    }

    /// Starts a fresh round, replacing any previous one.
    ///
    /// The board resets to empty slots of word length, the rack to a shuffled
    /// set of the word's tiles, and the word joins the seen-history ring.
    #[instrument(skip(self, definition, image))]
    pub fn start_round(&mut self, word: &str, definition: &str, image: ImageRef) {
        let word = word.to_uppercase();
        let mut rack = tiles::tiles_for(&word);
        tiles::shuffle(&mut rack, &mut self.rng);

        self.recent.push_back(word.clone());
        while self.recent.len() > RECENT_CAP {
            self.recent.pop_front();
        }

        info!(%word, "starting placement round");
        self.round = Some(PlacementRound {
            slots: vec![None; word.chars().count()],
            rack,
            word,
            definition: definition.to_string(),
            image,
            status: RoundStatus::Playing,
            notice: Notice::default(),
        });
    }

    /// Moves the named rack tile to the first empty slot, then evaluates the
    /// board. Silent no-op when the round is not playing, the tile is not on
    /// the rack, or the board is already full.
    ///
    /// Returns the notice token for a "not quite" message when the move
    /// filled a mismatched board.
    #[instrument(skip(self, score, feedback))]
    pub fn place_from_rack(
        &mut self,
        tile: TileId,
        score: &mut impl ScoreSink,
        feedback: &mut impl Feedback,
    ) -> Option<NoticeToken> {
        let round = self.playing_round()?;
        let Some(slot) = round.first_empty_slot() else {
            debug!("board full, ignoring placement");
            return None;
        };
        let Some(index) = round.rack.iter().position(|t| t.id == tile) else {
            debug!(?tile, "tile not on rack, ignoring placement");
            return None;
        };
        round.slots[slot] = Some(round.rack.remove(index));
        Self::evaluate(round, score, feedback)
    }

    /// Returns the tile in `slot` to the rack. No-op (returning `false`)
    /// when the slot is empty, holds a hint-placed tile, or the round is not
    /// playing.
    #[instrument(skip(self))]
    pub fn pick_up(&mut self, slot: usize) -> bool {
        let Some(round) = self.playing_round() else {
            return false;
        };
        let Some(tile) = round.slots.get(slot).cloned().flatten() else {
            return false;
        };
        if tile.hinted {
            debug!(slot, "hint tile is immovable, ignoring pick up");
            return false;
        }
        round.slots[slot] = None;
        round.rack.push(tile);
        true
    }

    /// Re-permutes the rack order. Board and score are untouched.
    pub fn shuffle_rack(&mut self) {
        if let Some(round) = self.round.as_mut()
            && round.status == RoundStatus::Playing
        {
            tiles::shuffle(&mut round.rack, &mut self.rng);
        }
    }

    /// Places one correct letter for the player.
    ///
    /// Always charges [`HINT_PENALTY`], even when nothing can be placed. The
    /// target is the first slot that is empty or holds a wrong letter; the
    /// source tile comes from the rack, or failing that from a misplaced
    /// correct-letter tile elsewhere on the board. A displaced occupant of
    /// the target slot goes back to the rack. The placed tile is flagged
    /// hinted and becomes immovable by the player.
    #[instrument(skip(self, score, feedback))]
    pub fn use_hint(
        &mut self,
        score: &mut impl ScoreSink,
        feedback: &mut impl Feedback,
    ) -> Option<NoticeToken> {
        if self.playing_round().is_none() {
            return None;
        }
        score.report(-HINT_PENALTY);
        let round = self.playing_round()?;

        let letters: Vec<char> = round.word.chars().collect();
        let target_slot = round.slots.iter().enumerate().position(|(i, slot)| {
            slot.as_ref().is_none_or(|tile| tile.letter != letters[i])
        })?;
        let target_letter = letters[target_slot];

        let from_rack = round.rack.iter().position(|t| t.letter == target_letter);
        let mut source = from_rack.map(|i| round.rack.remove(i));
        if source.is_none() {
            // A correct letter may already be on the board, just misplaced.
            let misplaced = round.slots.iter().enumerate().position(|(i, slot)| {
                i != target_slot
                    && slot
                        .as_ref()
                        .is_some_and(|t| t.letter == target_letter && t.letter != letters[i])
            });
            source = misplaced.and_then(|i| round.slots[i].take());
        }
        let mut tile = source?;
        tile.hinted = true;

        if let Some(mut displaced) = round.slots[target_slot].take() {
            displaced.hinted = false;
            round.rack.push(displaced);
        }
        debug!(slot = target_slot, letter = %target_letter, "hint placed");
        round.slots[target_slot] = Some(tile);
        Self::evaluate(round, score, feedback)
    }

    /// Timer callback for a previously returned notice token.
    pub fn expire_notice(&mut self, token: NoticeToken) {
        if let Some(round) = self.round.as_mut() {
            round.notice.expire(token);
        }
    }

    /// Access to the random source, for drawing the next word.
    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    fn playing_round(&mut self) -> Option<&mut PlacementRound> {
        self.round
            .as_mut()
            .filter(|round| round.status == RoundStatus::Playing)
    }

    /// Win check after any placement-affecting operation.
    fn evaluate(
        round: &mut PlacementRound,
        score: &mut impl ScoreSink,
        feedback: &mut impl Feedback,
    ) -> Option<NoticeToken> {
        if !round.is_full() {
            return None;
        }
        if round.board_letters() == round.word {
            round.status = RoundStatus::Won;
            feedback.signal(Signal::Win);
            score.report(round.board_score() as i32);
            round.notice.set_sticky(format!("You spelled {}!", round.word));
            info!(word = %round.word, score = round.board_score(), "placement round won");
            None
        } else {
            feedback.signal(Signal::Error);
            Some(round.notice.set_transient("Not quite - keep rearranging"))
        }
    }
}
