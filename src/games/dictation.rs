//! Dictation-style spelling puzzle.
//!
//! The player hears the target word and types it. The definition and example
//! sentence can be revealed for a cost; letter hints repair the input one
//! character at a time.

use super::{RECENT_CAP, RoundStatus};
use crate::effects::{Feedback, ScoreSink, Signal, Speech};
use crate::notice::{Notice, NoticeToken};
use crate::words::WordEntry;
use std::collections::VecDeque;
use tracing::{debug, info, instrument};

/// Points deducted for revealing the definition (once per round).
pub const DEFINITION_PENALTY: i32 = 5;

/// Points deducted for each letter hint.
pub const LETTER_PENALTY: i32 = 3;

/// Which helper panel the UI should show. Definition wins when both flags
/// are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    /// Show the word's definition.
    Definition,
    /// Show the example sentence.
    Sentence,
}

/// One live dictation round.
#[derive(Debug, Clone)]
pub struct DictationRound {
    entry: WordEntry,
    input: String,
    definition_revealed: bool,
    sentence_revealed: bool,
    status: RoundStatus,
    notice: Notice,
}

impl DictationRound {
    /// The word record for this round. Immutable while the round lives.
    pub fn entry(&self) -> &WordEntry {
        &self.entry
    }

    /// The free-text input buffer, verbatim.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whether the definition has been revealed (monotonic).
    pub fn definition_revealed(&self) -> bool {
        self.definition_revealed
    }

    /// Whether the example sentence has been revealed (monotonic).
    pub fn sentence_revealed(&self) -> bool {
        self.sentence_revealed
    }

    /// Round lifecycle status.
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    /// Current transient or sticky message, if any.
    pub fn message(&self) -> Option<&str> {
        self.notice.text()
    }

    /// Helper panel to display, definition taking precedence.
    pub fn visible_panel(&self) -> Option<Panel> {
        if self.definition_revealed {
            Some(Panel::Definition)
        } else if self.sentence_revealed {
            Some(Panel::Sentence)
        } else {
            None
        }
    }
}

/// Normalizes player input for comparison against the target.
fn normalize(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Points awarded for a correct submission.
pub(crate) fn win_score(word_len: usize, definition_revealed: bool) -> i32 {
    let penalty = if definition_revealed {
        DEFINITION_PENALTY
    } else {
        0
    };
    (2 * word_len as i32 - penalty).max(10)
}

/// State machine for the spelling puzzle.
#[derive(Debug, Default)]
pub struct DictationEngine {
    recent: VecDeque<String>,
    round: Option<DictationRound>,
}

impl DictationEngine {
    /// Creates an engine with no active round (status reads `Loading`).
    pub fn new() -> Self {
        Self::default()
    }

    /// The active round, if one has started.
    pub fn round(&self) -> Option<&DictationRound> {
        self.round.as_ref()
    }

    /// Round status; `Loading` while no round data has arrived.
    pub fn status(&self) -> RoundStatus {
        self.round
            .as_ref()
            .map_or(RoundStatus::Loading, DictationRound::status)
    }

    /// Recently seen target words, newest last, for provider dedupe.
    pub fn recent_words(&self) -> Vec<String> {
        self.recent.iter().cloned().collect()
    }

    /// Starts a fresh round, replacing any previous one.
    #[instrument(skip(self, entry), fields(word = %entry.word))]
    pub fn start_round(&mut self, entry: WordEntry) {
        self.recent.push_back(entry.word.clone());
        while self.recent.len() > RECENT_CAP {
            self.recent.pop_front();
        }
        info!(word = %entry.word, "starting dictation round");
        self.round = Some(DictationRound {
            entry,
            input: String::new(),
            definition_revealed: false,
            sentence_revealed: false,
            status: RoundStatus::Playing,
            notice: Notice::default(),
        });
    }

    /// Vocalizes the target word. Fire and forget.
    pub fn speak_word(&self, speech: &mut impl Speech) {
        if let Some(round) = self.round.as_ref() {
            speech.say(&round.entry.word);
        }
    }

    /// Replaces the input buffer verbatim. No normalization until submit.
    pub fn set_input(&mut self, text: &str) {
        if let Some(round) = self.playing_round() {
            round.input = text.to_string();
        }
    }

    /// Normalizes the buffer and compares it to the target word.
    ///
    /// A match wins the round and reports `max(10, 2*len - 5)` (the 5 only
    /// when the definition was revealed). A mismatch stays in play with
    /// error and shake cues and a transient message, whose token is
    /// returned for the auto-clear timer.
    #[instrument(skip(self, score, feedback))]
    pub fn submit(
        &mut self,
        score: &mut impl ScoreSink,
        feedback: &mut impl Feedback,
    ) -> Option<NoticeToken> {
        let round = self.playing_round()?;
        if normalize(&round.input) == round.entry.word {
            round.status = RoundStatus::Won;
            feedback.signal(Signal::Win);
            let points = win_score(round.entry.word.chars().count(), round.definition_revealed);
            score.report(points);
            round
                .notice
                .set_sticky(format!("Correct! {} it is.", round.entry.word));
            info!(word = %round.entry.word, points, "dictation round won");
            None
        } else {
            debug!("submission did not match");
            feedback.signal(Signal::Error);
            feedback.signal(Signal::Shake);
            Some(round.notice.set_transient("Try again"))
        }
    }

    /// Reveals the definition, charging [`DEFINITION_PENALTY`] on the first
    /// call only. Idempotent afterwards.
    pub fn reveal_definition(&mut self, score: &mut impl ScoreSink) {
        if let Some(round) = self.playing_round()
            && !round.definition_revealed
        {
            round.definition_revealed = true;
            score.report(-DEFINITION_PENALTY);
        }
    }

    /// Reveals the example sentence. Informational, no penalty.
    pub fn reveal_sentence(&mut self) {
        if let Some(round) = self.playing_round() {
            round.sentence_revealed = true;
        }
    }

    /// Repairs the first wrong or missing character of the input.
    ///
    /// Scans for the first index where the normalized input diverges from
    /// the target (a correct-but-short prefix diverges at its own length).
    /// No-op when there is no divergence below the target length; otherwise
    /// the character at that index is overwritten (or appended) and
    /// [`LETTER_PENALTY`] is charged.
    #[instrument(skip(self, score))]
    pub fn letter_hint(&mut self, score: &mut impl ScoreSink) -> Option<NoticeToken> {
        let round = self.playing_round()?;
        let target: Vec<char> = round.entry.word.chars().collect();
        let current: Vec<char> = normalize(&round.input).chars().collect();

        let divergence = current
            .iter()
            .zip(target.iter())
            .position(|(a, b)| a != b)
            .unwrap_or(current.len().min(target.len()));
        if divergence >= target.len() {
            debug!("input already matches target up to full length");
            return None;
        }

        let mut repaired = current;
        if divergence < repaired.len() {
            repaired[divergence] = target[divergence];
        } else {
            repaired.push(target[divergence]);
        }
        round.input = repaired.into_iter().collect();
        score.report(-LETTER_PENALTY);
        Some(
            round
                .notice
                .set_transient(format!("Letter {} is given", divergence + 1)),
        )
    }

    /// Timer callback for a previously returned notice token.
    pub fn expire_notice(&mut self, token: NoticeToken) {
        if let Some(round) = self.round.as_mut() {
            round.notice.expire(token);
        }
    }

    fn playing_round(&mut self) -> Option<&mut DictationRound> {
        self.round
            .as_mut()
            .filter(|round| round.status == RoundStatus::Playing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{NullFeedback, RecordingFeedback, RecordingSink};

    fn tiger() -> WordEntry {
        WordEntry {
            word: "TIGER".to_string(),
            phonetic: "/ˈtaɪɡər/".to_string(),
            definition: "A large striped wild cat.".to_string(),
            sentence: "The tiger prowled.".to_string(),
        }
    }

    fn apple() -> WordEntry {
        WordEntry {
            word: "APPLE".to_string(),
            phonetic: "/ˈæpəl/".to_string(),
            definition: "A round fruit.".to_string(),
            sentence: "She bit into the apple.".to_string(),
        }
    }

    #[test]
    fn test_submit_normalizes_and_wins() {
        let mut engine = DictationEngine::new();
        let mut sink = RecordingSink::default();
        let mut feedback = RecordingFeedback::default();
        engine.start_round(tiger());
        engine.set_input(" tiger ");
        engine.submit(&mut sink, &mut feedback);

        assert_eq!(engine.status(), RoundStatus::Won);
        assert_eq!(sink.deltas, vec![10]);
        assert_eq!(feedback.signals, vec![Signal::Win]);
    }

    #[test]
    fn test_wrong_submit_shakes_and_stays() {
        let mut engine = DictationEngine::new();
        let mut sink = RecordingSink::default();
        let mut feedback = RecordingFeedback::default();
        engine.start_round(tiger());
        engine.set_input("tigger");
        let token = engine.submit(&mut sink, &mut feedback);

        assert_eq!(engine.status(), RoundStatus::Playing);
        assert!(sink.deltas.is_empty());
        assert_eq!(feedback.signals, vec![Signal::Error, Signal::Shake]);
        assert_eq!(engine.round().unwrap().message(), Some("Try again"));
        engine.expire_notice(token.unwrap());
        assert_eq!(engine.round().unwrap().message(), None);
    }

    #[test]
    fn test_win_score_floor() {
        assert_eq!(win_score(5, false), 10);
        assert_eq!(win_score(5, true), 10);
        assert_eq!(win_score(9, false), 18);
        assert_eq!(win_score(9, true), 13);
    }

    #[test]
    fn test_reveal_definition_charges_once() {
        let mut engine = DictationEngine::new();
        let mut sink = RecordingSink::default();
        engine.start_round(tiger());
        engine.reveal_definition(&mut sink);
        engine.reveal_definition(&mut sink);
        assert_eq!(sink.deltas, vec![-DEFINITION_PENALTY]);
        assert!(engine.round().unwrap().definition_revealed());
    }

    #[test]
    fn test_reveal_affects_win_score() {
        let mut engine = DictationEngine::new();
        let mut sink = RecordingSink::default();
        engine.start_round(WordEntry {
            word: "QUARANTINE".to_string(),
            phonetic: String::new(),
            definition: "isolation".to_string(),
            sentence: String::new(),
        });
        engine.reveal_definition(&mut sink);
        engine.set_input("quarantine");
        engine.submit(&mut sink, &mut NullFeedback);
        // 10 letters: 2*10 - 5 = 15, on top of the -5 reveal.
        assert_eq!(sink.deltas, vec![-5, 15]);
    }

    #[test]
    fn test_sentence_reveal_free_and_definition_precedence() {
        let mut engine = DictationEngine::new();
        let mut sink = RecordingSink::default();
        engine.start_round(tiger());
        engine.reveal_sentence();
        assert!(sink.deltas.is_empty());
        assert_eq!(engine.round().unwrap().visible_panel(), Some(Panel::Sentence));
        engine.reveal_definition(&mut sink);
        assert_eq!(
            engine.round().unwrap().visible_panel(),
            Some(Panel::Definition)
        );
    }

    #[test]
    fn test_letter_hint_extends_correct_prefix() {
        let mut engine = DictationEngine::new();
        let mut sink = RecordingSink::default();
        engine.start_round(apple());
        engine.set_input("AP");
        engine.letter_hint(&mut sink);
        assert_eq!(engine.round().unwrap().input(), "APP");
        assert_eq!(sink.deltas, vec![-LETTER_PENALTY]);
    }

    #[test]
    fn test_letter_hint_corrects_divergence() {
        let mut engine = DictationEngine::new();
        let mut sink = RecordingSink::default();
        engine.start_round(apple());
        engine.set_input("AX");
        engine.letter_hint(&mut sink);
        assert_eq!(engine.round().unwrap().input(), "AP");
    }

    #[test]
    fn test_letter_hint_on_complete_input_is_noop() {
        let mut engine = DictationEngine::new();
        let mut sink = RecordingSink::default();
        engine.start_round(apple());
        engine.set_input("apple");
        assert!(engine.letter_hint(&mut sink).is_none());
        assert!(sink.deltas.is_empty());
        assert_eq!(engine.round().unwrap().input(), "apple");
    }

    #[test]
    fn test_letter_hint_on_overlong_correct_input_is_noop() {
        let mut engine = DictationEngine::new();
        let mut sink = RecordingSink::default();
        engine.start_round(apple());
        engine.set_input("APPLES");
        assert!(engine.letter_hint(&mut sink).is_none());
        assert!(sink.deltas.is_empty());
    }

    #[test]
    fn test_letter_hints_alone_can_spell_word() {
        let mut engine = DictationEngine::new();
        let mut sink = RecordingSink::default();
        engine.start_round(tiger());
        for _ in 0..5 {
            engine.letter_hint(&mut sink);
        }
        assert_eq!(engine.round().unwrap().input(), "TIGER");
        engine.submit(&mut sink, &mut NullFeedback);
        assert_eq!(engine.status(), RoundStatus::Won);
        assert_eq!(sink.total(), 10 - 5 * LETTER_PENALTY);
    }

    #[test]
    fn test_operations_after_win_are_ignored() {
        let mut engine = DictationEngine::new();
        let mut sink = RecordingSink::default();
        engine.start_round(tiger());
        engine.set_input("TIGER");
        engine.submit(&mut sink, &mut NullFeedback);
        assert_eq!(engine.status(), RoundStatus::Won);

        engine.set_input("changed");
        engine.reveal_definition(&mut sink);
        assert!(engine.letter_hint(&mut sink).is_none());
        assert_eq!(engine.round().unwrap().input(), "TIGER");
        assert_eq!(sink.deltas, vec![10]);
    }
}
