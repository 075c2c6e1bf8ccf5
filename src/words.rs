//! Word provider boundary and static fallback lists.
//!
//! The live generative provider is an external collaborator; this module
//! defines the seam ([`WordSource`]) and the difficulty-scoped static pool
//! the engines fall back to when the provider fails.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Delay the UI applies before presenting fallback content, so a provider
/// failure is not visually distinguishable from a slow fetch. The core never
/// sleeps; this is published for the host environment.
pub const FALLBACK_DELAY: Duration = Duration::from_millis(600);

/// Word difficulty tier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    clap::ValueEnum,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Short, common words.
    Easy,
    /// Everyday vocabulary.
    Medium,
    /// Longer or less common words.
    Hard,
}

/// Which engine the word is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Tile-placement definition puzzle.
    Placement,
    /// Dictation-style spelling puzzle.
    Dictation,
}

/// A complete word record as produced by the provider.
///
/// Placement rounds consume only `word` and `definition`; dictation and duel
/// rounds use all four fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    /// The target word, uppercase.
    pub word: String,
    /// Phonetic transcription, e.g. "/ˈtaɪɡər/".
    pub phonetic: String,
    /// Short definition.
    pub definition: String,
    /// Example sentence using the word.
    pub sentence: String,
}

impl WordEntry {
    fn new(word: &str, phonetic: &str, definition: &str, sentence: &str) -> Self {
        Self {
            word: word.to_string(),
            phonetic: phonetic.to_string(),
            definition: definition.to_string(),
            sentence: sentence.to_string(),
        }
    }
}

/// Request passed to a [`WordSource`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordRequest {
    /// Which engine is asking.
    pub mode: GameMode,
    /// Requested difficulty tier.
    pub difficulty: Difficulty,
    /// Recently seen words, so the provider can avoid immediate repeats.
    pub recent: Vec<String>,
}

/// Error from a live word provider.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("word provider failed: {}", reason)]
pub struct WordSourceError {
    /// Human-readable failure description.
    pub reason: String,
}

/// The external generative word-and-definition provider, specified only at
/// its boundary. This crate ships no live implementation.
pub trait WordSource {
    /// Produces a word record for the request, or fails.
    fn fetch(&mut self, request: &WordRequest) -> Result<WordEntry, WordSourceError>;
}

/// Where a word record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// The live provider answered.
    Live,
    /// The static fallback pool was used.
    Fallback,
}

/// Difficulty-scoped static word pool.
///
/// Infallible: every difficulty has a non-empty list, and every entry carries
/// the full dictation payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackWords;

impl FallbackWords {
    /// The static pool for a difficulty tier.
    pub fn pool(difficulty: Difficulty) -> &'static [WordEntry] {
        match difficulty {
            Difficulty::Easy => easy_pool(),
            Difficulty::Medium => medium_pool(),
            Difficulty::Hard => hard_pool(),
        }
    }

    /// Draws one entry uniformly, avoiding words in `recent` whenever at
    /// least one alternative exists.
    pub fn draw(
        &self,
        difficulty: Difficulty,
        recent: &[String],
        rng: &mut impl Rng,
    ) -> WordEntry {
        let pool = Self::pool(difficulty);
        let fresh: Vec<&WordEntry> = pool
            .iter()
            .filter(|e| !recent.iter().any(|r| r.eq_ignore_ascii_case(&e.word)))
            .collect();
        if fresh.is_empty() {
            pool[rng.random_range(0..pool.len())].clone()
        } else {
            fresh[rng.random_range(0..fresh.len())].clone()
        }
    }
}

impl WordSource for FallbackWords {
    fn fetch(&mut self, request: &WordRequest) -> Result<WordEntry, WordSourceError> {
        // The pool needs randomness; sources used through this trait draw
        // with a thread-local source. Deterministic callers use `draw`.
        let mut rng = rand::rng();
        Ok(self.draw(request.difficulty, &request.recent, &mut rng))
    }
}

/// Fetches from the live source, falling back to the static pool on failure.
///
/// Provider failure is recoverable and never blocks play: it is logged for
/// diagnostics and the caller receives [`Provenance::Fallback`] so the UI can
/// apply [`FALLBACK_DELAY`].
pub fn fetch_or_fallback(
    source: &mut impl WordSource,
    request: &WordRequest,
    rng: &mut impl Rng,
) -> (WordEntry, Provenance) {
    match source.fetch(request) {
        Ok(entry) => (entry, Provenance::Live),
        Err(err) => {
            warn!(%err, mode = %request.mode, "word provider failed, using fallback pool");
            (
                FallbackWords.draw(request.difficulty, &request.recent, rng),
                Provenance::Fallback,
            )
        }
    }
}

fn easy_pool() -> &'static [WordEntry] {
    static POOL: std::sync::OnceLock<Vec<WordEntry>> = std::sync::OnceLock::new();
    POOL.get_or_init(|| {
        vec![
            WordEntry::new(
                "CHAIR",
                "/tʃɛər/",
                "A seat for one person, with a back and four legs.",
                "She pulled up a chair and joined the table.",
            ),
            WordEntry::new(
                "TIGER",
                "/ˈtaɪɡər/",
                "A large striped wild cat of Asia.",
                "The tiger prowled silently through the tall grass.",
            ),
            WordEntry::new(
                "BREAD",
                "/brɛd/",
                "A staple food baked from flour and water.",
                "Fresh bread was cooling on the windowsill.",
            ),
            WordEntry::new(
                "CLOUD",
                "/klaʊd/",
                "A visible mass of water droplets in the sky.",
                "A single cloud drifted across the summer sky.",
            ),
            WordEntry::new(
                "RIVER",
                "/ˈrɪvər/",
                "A large natural stream of water flowing to the sea.",
                "The village grew up on the bend of the river.",
            ),
            WordEntry::new(
                "HOUSE",
                "/haʊs/",
                "A building for people to live in.",
                "They painted the house a cheerful yellow.",
            ),
        ]
    })
}

fn medium_pool() -> &'static [WordEntry] {
    static POOL: std::sync::OnceLock<Vec<WordEntry>> = std::sync::OnceLock::new();
    POOL.get_or_init(|| {
        vec![
            WordEntry::new(
                "JOURNEY",
                "/ˈdʒɜːrni/",
                "An act of travelling from one place to another.",
                "The journey across the mountains took three days.",
            ),
            WordEntry::new(
                "WHISPER",
                "/ˈwɪspər/",
                "To speak very softly using one's breath.",
                "She leaned in to whisper the answer.",
            ),
            WordEntry::new(
                "HARVEST",
                "/ˈhɑːrvɪst/",
                "The gathering of ripened crops.",
                "The whole family helped with the autumn harvest.",
            ),
            WordEntry::new(
                "LANTERN",
                "/ˈlæntərn/",
                "A portable case holding a light.",
                "A paper lantern swayed above the doorway.",
            ),
            WordEntry::new(
                "COMPASS",
                "/ˈkʌmpəs/",
                "An instrument showing magnetic north.",
                "He checked the compass before entering the forest.",
            ),
            WordEntry::new(
                "GLACIER",
                "/ˈɡleɪʃər/",
                "A slowly moving mass of ice.",
                "The glacier carved the valley over millennia.",
            ),
        ]
    })
}

fn hard_pool() -> &'static [WordEntry] {
    static POOL: std::sync::OnceLock<Vec<WordEntry>> = std::sync::OnceLock::new();
    POOL.get_or_init(|| {
        vec![
            WordEntry::new(
                "LABYRINTH",
                "/ˈlæbərɪnθ/",
                "A complicated network of winding passages.",
                "The old city was a labyrinth of narrow alleys.",
            ),
            WordEntry::new(
                "EPHEMERAL",
                "/ɪˈfɛmərəl/",
                "Lasting for a very short time.",
                "The desert bloom is ephemeral, gone within a week.",
            ),
            WordEntry::new(
                "QUARANTINE",
                "/ˈkwɒrəntiːn/",
                "A period of isolation to prevent the spread of disease.",
                "The ship sat in quarantine for forty days.",
            ),
            WordEntry::new(
                "SILHOUETTE",
                "/ˌsɪluˈɛt/",
                "A dark outline seen against a lighter background.",
                "Her silhouette appeared briefly in the lit window.",
            ),
            WordEntry::new(
                "XYLOPHONE",
                "/ˈzaɪləfoʊn/",
                "A percussion instrument of tuned wooden bars.",
                "The xylophone rang out over the school orchestra.",
            ),
            WordEntry::new(
                "RHYTHM",
                "/ˈrɪðəm/",
                "A strong, regular repeated pattern of sound.",
                "The drummers kept a steady rhythm all night.",
            ),
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct FailingSource;

    impl WordSource for FailingSource {
        fn fetch(&mut self, _request: &WordRequest) -> Result<WordEntry, WordSourceError> {
            Err(WordSourceError {
                reason: "network unreachable".to_string(),
            })
        }
    }

    #[test]
    fn test_pools_are_complete() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let pool = FallbackWords::pool(difficulty);
            assert!(!pool.is_empty());
            for entry in pool {
                assert!(!entry.word.is_empty());
                assert!(!entry.phonetic.is_empty());
                assert!(!entry.definition.is_empty());
                assert!(!entry.sentence.is_empty());
                assert_eq!(entry.word, entry.word.to_uppercase());
            }
        }
    }

    #[test]
    fn test_draw_avoids_recent() {
        let mut rng = StdRng::seed_from_u64(1);
        let recent = vec!["CHAIR".to_string(), "TIGER".to_string()];
        for _ in 0..50 {
            let entry = FallbackWords.draw(Difficulty::Easy, &recent, &mut rng);
            assert!(!recent.contains(&entry.word));
        }
    }

    #[test]
    fn test_draw_with_everything_recent_still_yields() {
        let mut rng = StdRng::seed_from_u64(2);
        let recent: Vec<String> = FallbackWords::pool(Difficulty::Easy)
            .iter()
            .map(|e| e.word.clone())
            .collect();
        let entry = FallbackWords.draw(Difficulty::Easy, &recent, &mut rng);
        assert!(recent.contains(&entry.word));
    }

    #[test]
    fn test_fetch_or_fallback_recovers() {
        let mut rng = StdRng::seed_from_u64(3);
        let request = WordRequest {
            mode: GameMode::Dictation,
            difficulty: Difficulty::Medium,
            recent: Vec::new(),
        };
        let (entry, provenance) = fetch_or_fallback(&mut FailingSource, &request, &mut rng);
        assert_eq!(provenance, Provenance::Fallback);
        assert!(
            FallbackWords::pool(Difficulty::Medium)
                .iter()
                .any(|e| e.word == entry.word)
        );
    }
}
