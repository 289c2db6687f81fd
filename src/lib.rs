//! LinguaFlow: bidirectional English–Tamil text/voice translation core.
//! An in-process library driven by a UI shell: the shell feeds user events
//! through a [`SessionHandle`] and renders each published [`SessionState`]
//! snapshot. Translation, speech, and clipboard are reached through injected
//! capability traits, never referenced globally.

pub mod cancellation;
pub mod clipboard;
pub mod language;
pub mod predict;
pub mod session;
pub mod speech;
pub mod state_machine;
pub mod translate;

use std::sync::Arc;

pub use clipboard::{ClipboardWriter, MemoryClipboard, XclipClipboard};
pub use language::Language;
pub use predict::PredictionIndex;
pub use session::{SessionConfig, SessionHandle, SessionState, TranslationSession};
pub use speech::{SpeechCapture, SpeechPlayer, TranscriptEvent, UnsupportedSpeech};
pub use state_machine::SessionPhase;
pub use translate::mymemory::MyMemoryClient;
pub use translate::{ServiceFault, TranslationBackend, TranslationOutcome};

/// Initialize tracing for an embedding shell. Honors `RUST_LOG`; defaults to
/// debug-level output for this crate.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "linguaflow=debug".parse().expect("static filter parses")),
        )
        .with_target(true)
        .init();
}

/// Spawn a session wired to the real MyMemory backend and the given host
/// capabilities, with default configuration.
pub fn start_session(
    capture: Arc<dyn SpeechCapture>,
    player: Arc<dyn SpeechPlayer>,
    clipboard: Arc<dyn ClipboardWriter>,
) -> Result<SessionHandle, reqwest::Error> {
    let backend = Arc::new(MyMemoryClient::new()?);
    Ok(TranslationSession::spawn(
        SessionConfig::default(),
        backend,
        capture,
        player,
        clipboard,
    ))
}
