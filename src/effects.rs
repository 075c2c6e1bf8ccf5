//! Capability interfaces for side effects.
//!
//! Audio, speech, image fetching, and score reporting are injected into the
//! engines rather than called inline, so the state machines are testable
//! without a rendering environment. Test doubles live alongside the traits.

use tracing::debug;

/// The external score accumulator.
///
/// Receives positive deltas for wins and negative deltas for penalties. The
/// core never reads the running total back.
pub trait ScoreSink {
    /// Reports a point delta to the accumulator.
    fn report(&mut self, delta: i32);
}

/// Audio/visual cue kinds the engines emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Signal {
    /// Round was won.
    Win,
    /// Wrong answer or misfilled board.
    Error,
    /// Visual shake on a rejected submission.
    Shake,
}

/// Fire-and-forget audio/visual feedback.
pub trait Feedback {
    /// Emits a cue. The engine does not consume any return value.
    fn signal(&mut self, signal: Signal);
}

/// Fire-and-forget text-to-speech playback.
pub trait Speech {
    /// Vocalizes the text asynchronously; nothing is returned to the core.
    fn say(&mut self, text: &str);
}

/// Display-only reference to an illustration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef(pub String);

impl ImageRef {
    /// The substitute shown when the image provider fails.
    pub fn placeholder() -> Self {
        Self("placeholder".to_string())
    }
}

/// Error from the external image provider.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("image provider failed: {}", reason)]
pub struct ImageError {
    /// Human-readable failure description.
    pub reason: String,
}

/// The external illustrative image provider.
pub trait ImageSource {
    /// Returns a display-only image reference for the word.
    fn image_for(&mut self, word: &str) -> Result<ImageRef, ImageError>;
}

/// Fetches an image, substituting a placeholder on failure (non-fatal).
pub fn image_or_placeholder(source: &mut impl ImageSource, word: &str) -> ImageRef {
    match source.image_for(word) {
        Ok(image) => image,
        Err(err) => {
            debug!(%err, word, "image provider failed, substituting placeholder");
            ImageRef::placeholder()
        }
    }
}

/// Score sink that records every reported delta, for tests and the demo.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    /// All reported deltas, in order.
    pub deltas: Vec<i32>,
}

impl RecordingSink {
    /// Running total of all deltas so far.
    pub fn total(&self) -> i32 {
        self.deltas.iter().sum()
    }
}

impl ScoreSink for RecordingSink {
    fn report(&mut self, delta: i32) {
        self.deltas.push(delta);
    }
}

/// Feedback that records emitted signals, for tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingFeedback {
    /// All emitted signals, in order.
    pub signals: Vec<Signal>,
}

impl Feedback for RecordingFeedback {
    fn signal(&mut self, signal: Signal) {
        self.signals.push(signal);
    }
}

/// Feedback that discards all signals.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFeedback;

impl Feedback for NullFeedback {
    fn signal(&mut self, _signal: Signal) {}
}

/// Speech playback that discards all text.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSpeech;

impl Speech for SilentSpeech {
    fn say(&mut self, _text: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingImages;

    impl ImageSource for FailingImages {
        fn image_for(&mut self, _word: &str) -> Result<ImageRef, ImageError> {
            Err(ImageError {
                reason: "offline".to_string(),
            })
        }
    }

    #[test]
    fn test_recording_sink_totals() {
        let mut sink = RecordingSink::default();
        sink.report(10);
        sink.report(-5);
        assert_eq!(sink.deltas, vec![10, -5]);
        assert_eq!(sink.total(), 5);
    }

    #[test]
    fn test_image_failure_is_nonfatal() {
        let image = image_or_placeholder(&mut FailingImages, "CHAIR");
        assert_eq!(image, ImageRef::placeholder());
    }
}
