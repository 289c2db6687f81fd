//! Speech capability seams: single-shot speech-to-text capture and
//! fire-and-forget text-to-speech playback. Hosts inject implementations; a
//! host without the capability reports `Unavailable` and the session leaves
//! its state untouched.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Events emitted by an active capture, in order:
/// `Started`, zero or more `Partial`, at most one `Final`, then `Ended`.
/// `Ended` arrives whether the capture completed, timed out on silence, or
/// was stopped by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEvent {
    Started,
    /// Interim transcript; may be surfaced to the input field as it arrives.
    Partial(String),
    /// Best transcript for the first recognized segment.
    Final(String),
    Ended,
}

#[derive(Debug)]
pub enum SpeechError {
    /// The host has no speech capability.
    Unavailable,
    Failed(String),
}

impl std::fmt::Display for SpeechError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpeechError::Unavailable => write!(f, "speech capability unavailable on this host"),
            SpeechError::Failed(msg) => write!(f, "speech capture failed: {msg}"),
        }
    }
}

/// A running capture: the event stream plus a stop token. Cancelling `stop`
/// asks the host to end the capture; the host still emits `Ended`.
pub struct CaptureSession {
    pub events: mpsc::UnboundedReceiver<TranscriptEvent>,
    pub stop: CancellationToken,
}

/// Single-utterance speech-to-text. `continuous = false` semantics: the host
/// recognizes one segment and ends the capture on its own.
pub trait SpeechCapture: Send + Sync {
    fn start_capture(&self, locale: &str) -> Result<CaptureSession, SpeechError>;
}

/// Text-to-speech playback. Fire-and-forget: callers never observe playback
/// completion, and overlapping calls may pre-empt or queue per host.
/// Never called with empty text (the session filters that out).
pub trait SpeechPlayer: Send + Sync {
    fn speak(&self, text: &str, locale: &str);
}

/// Host with no speech support: capture is `Unavailable`, playback is a
/// silent no-op. The default for embedding shells that only do text.
pub struct UnsupportedSpeech;

impl SpeechCapture for UnsupportedSpeech {
    fn start_capture(&self, _locale: &str) -> Result<CaptureSession, SpeechError> {
        Err(SpeechError::Unavailable)
    }
}

impl SpeechPlayer for UnsupportedSpeech {
    fn speak(&self, _text: &str, _locale: &str) {}
}
