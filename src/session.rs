//! Translation session orchestrator.
//! A single actor task owns the mutable `SessionState` and reacts to discrete
//! events: text changes, debounce fires, translation completions, speech
//! events, and user actions. Snapshots are published on a watch channel; the
//! embedding shell renders them and never mutates state directly.
//!
//! Staleness: every dispatched translation carries a sequence number and only
//! the latest issued one may write its result back, so a slow early response
//! cannot overwrite a fresher one.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cancellation::{Debounce, RequestSequencer};
use crate::clipboard::ClipboardWriter;
use crate::language::{self, Language};
use crate::predict::PredictionIndex;
use crate::speech::{SpeechCapture, SpeechPlayer, TranscriptEvent};
use crate::state_machine::{transition, SessionPhase};
use crate::translate::cache::TranslationCache;
use crate::translate::{TranslateRequest, TranslationBackend, TranslationOutcome};

/// Everything the UI needs to render, published as one atomic snapshot.
/// Invariant: `source_lang != target_lang`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    pub input_text: String,
    pub output_text: String,
    pub source_lang: Language,
    pub target_lang: Language,
    pub is_translating: bool,
    pub is_listening: bool,
    pub suggestions: Vec<String>,
    pub show_suggestions: bool,
    pub phase: SessionPhase,
}

impl SessionState {
    fn new() -> Self {
        Self {
            input_text: String::new(),
            output_text: String::new(),
            source_lang: Language::English,
            target_lang: Language::Tamil,
            is_translating: false,
            is_listening: false,
            suggestions: Vec::new(),
            show_suggestions: false,
            phase: SessionPhase::Idle,
        }
    }
}

/// Tunables for a session. No env vars, no files — the shell passes these in.
pub struct SessionConfig {
    /// Quiet period after the last keystroke before auto-translate fires.
    pub debounce: Duration,
    pub cache_capacity: usize,
    pub cache_ttl: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(800),
            cache_capacity: 512,
            cache_ttl: Duration::from_secs(600),
        }
    }
}

/// Events driving the session actor.
enum SessionEvent {
    InputChanged(String),
    DebounceElapsed,
    TranslateNow,
    SuggestionChosen(String),
    SwapLanguages,
    StartListening,
    StopListening,
    Speech(TranscriptEvent),
    TranslationFinished {
        seq: u64,
        key: [u8; 32],
        outcome: TranslationOutcome,
    },
    SpeakOutput,
    CopyOutput,
    Shutdown,
}

/// Cloneable handle the UI shell drives the session through.
#[derive(Clone)]
pub struct SessionHandle {
    events: mpsc::UnboundedSender<SessionEvent>,
    state: watch::Receiver<SessionState>,
}

impl SessionHandle {
    /// Current snapshot.
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Watch channel for reactive rendering.
    pub fn watch_state(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }

    /// Input text changed (every keystroke). Restarts the debounce window.
    pub fn input_changed(&self, text: impl Into<String>) {
        let _ = self.events.send(SessionEvent::InputChanged(text.into()));
    }

    /// Clear the input field (the ✕ control). Output clears once the
    /// debounce window elapses, same as typing everything away.
    pub fn clear_input(&self) {
        let _ = self.events.send(SessionEvent::InputChanged(String::new()));
    }

    /// Manual "Translate" action: bypasses the debounce window.
    pub fn translate_now(&self) {
        let _ = self.events.send(SessionEvent::TranslateNow);
    }

    /// A suggestion was picked: becomes the input and translates immediately.
    pub fn choose_suggestion(&self, suggestion: impl Into<String>) {
        let _ = self
            .events
            .send(SessionEvent::SuggestionChosen(suggestion.into()));
    }

    /// Exchange source/target languages and input/output texts atomically.
    pub fn swap_languages(&self) {
        let _ = self.events.send(SessionEvent::SwapLanguages);
    }

    /// Begin a single-shot speech capture in the source language.
    pub fn start_listening(&self) {
        let _ = self.events.send(SessionEvent::StartListening);
    }

    /// Ask the host to end the active capture, if any.
    pub fn stop_listening(&self) {
        let _ = self.events.send(SessionEvent::StopListening);
    }

    /// Speak the current output text in the target language.
    pub fn speak_output(&self) {
        let _ = self.events.send(SessionEvent::SpeakOutput);
    }

    /// Copy the current output text to the host clipboard.
    pub fn copy_output(&self) {
        let _ = self.events.send(SessionEvent::CopyOutput);
    }

    /// End the session. Pending debounce and capture are cancelled.
    pub fn shutdown(&self) {
        let _ = self.events.send(SessionEvent::Shutdown);
    }
}

/// The orchestrator actor. Owns all mutable session state.
pub struct TranslationSession {
    state: SessionState,
    predictions: PredictionIndex,
    cache: TranslationCache,
    sequencer: RequestSequencer,
    debounce: Debounce,

    backend: Arc<dyn TranslationBackend>,
    capture: Arc<dyn SpeechCapture>,
    player: Arc<dyn SpeechPlayer>,
    clipboard: Arc<dyn ClipboardWriter>,

    events: mpsc::UnboundedReceiver<SessionEvent>,
    self_tx: mpsc::UnboundedSender<SessionEvent>,
    state_tx: watch::Sender<SessionState>,
    capture_stop: Option<CancellationToken>,
}

impl TranslationSession {
    /// Spawn a session actor onto the current tokio runtime and return the
    /// handle the shell drives it through.
    pub fn spawn(
        config: SessionConfig,
        backend: Arc<dyn TranslationBackend>,
        capture: Arc<dyn SpeechCapture>,
        player: Arc<dyn SpeechPlayer>,
        clipboard: Arc<dyn ClipboardWriter>,
    ) -> SessionHandle {
        let (self_tx, events) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(SessionState::new());

        let session = Self {
            state: SessionState::new(),
            predictions: PredictionIndex::new(),
            cache: TranslationCache::new(config.cache_capacity, config.cache_ttl),
            sequencer: RequestSequencer::new(),
            debounce: Debounce::new(config.debounce),
            backend,
            capture,
            player,
            clipboard,
            events,
            self_tx: self_tx.clone(),
            state_tx,
            capture_stop: None,
        };

        tokio::spawn(session.run());

        SessionHandle {
            events: self_tx,
            state: state_rx,
        }
    }

    async fn run(mut self) {
        info!("translation session started");
        while let Some(event) = self.events.recv().await {
            if matches!(event, SessionEvent::Shutdown) {
                break;
            }
            self.handle_event(event);
            self.publish();
        }
        // Teardown: nothing scheduled may outlive the session.
        self.debounce.cancel();
        if let Some(token) = self.capture_stop.take() {
            token.cancel();
        }
        info!("translation session ended");
    }

    fn publish(&self) {
        debug_assert_ne!(self.state.source_lang, self.state.target_lang);
        self.state_tx.send_replace(self.state.clone());
    }

    fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::InputChanged(text) => self.on_input_changed(text),
            SessionEvent::DebounceElapsed => self.begin_translation("debounce"),
            SessionEvent::TranslateNow => {
                self.debounce.cancel();
                self.begin_translation("manual");
            }
            SessionEvent::SuggestionChosen(text) => {
                self.state.input_text = text;
                self.state.suggestions.clear();
                self.state.show_suggestions = false;
                self.debounce.cancel();
                self.begin_translation("suggestion");
            }
            SessionEvent::SwapLanguages => self.on_swap_languages(),
            SessionEvent::StartListening => self.on_start_listening(),
            SessionEvent::StopListening => {
                if let Some(token) = self.capture_stop.take() {
                    token.cancel();
                }
            }
            SessionEvent::Speech(ev) => self.on_speech_event(ev),
            SessionEvent::TranslationFinished { seq, key, outcome } => {
                self.on_translation_finished(seq, key, outcome)
            }
            SessionEvent::SpeakOutput => {
                // Empty output is a no-op, per the playback contract.
                if !self.state.output_text.is_empty() {
                    self.player
                        .speak(&self.state.output_text, self.state.target_lang.speech_locale());
                }
            }
            SessionEvent::CopyOutput => {
                if let Err(e) = self.clipboard.write(&self.state.output_text) {
                    warn!(error = %e, "copy to clipboard failed");
                }
            }
            // run() intercepts Shutdown before dispatch; tolerate it anyway.
            SessionEvent::Shutdown => warn!("shutdown reached the event dispatcher, ignored"),
        }
    }

    fn on_input_changed(&mut self, text: String) {
        self.state.input_text = text;
        self.refresh_suggestions();
        transition(&mut self.state.phase, SessionPhase::Editing);
        self.debounce
            .restart(self.self_tx.clone(), SessionEvent::DebounceElapsed);
    }

    fn refresh_suggestions(&mut self) {
        let suggestions = self
            .predictions
            .suggest(&self.state.input_text, self.state.source_lang);
        self.state.show_suggestions = !suggestions.is_empty();
        self.state.suggestions = suggestions;
    }

    /// Swap the pair and the two texts in one update; the intermediate state
    /// is never published. Applying this twice restores the original tuple.
    fn on_swap_languages(&mut self) {
        std::mem::swap(&mut self.state.source_lang, &mut self.state.target_lang);
        std::mem::swap(&mut self.state.input_text, &mut self.state.output_text);
        // Input and active language both changed; the suggestion list follows.
        self.refresh_suggestions();
        info!(
            source = %self.state.source_lang,
            target = %self.state.target_lang,
            "languages swapped"
        );
    }

    fn on_start_listening(&mut self) {
        // One capture at a time: a second start is rejected, not pre-empted.
        // `capture_stop` covers the window before the host's Started event.
        if self.state.is_listening || self.capture_stop.is_some() {
            warn!("speech capture already active, start ignored");
            return;
        }
        let locale = self.state.source_lang.speech_locale();
        match self.capture.start_capture(locale) {
            Ok(mut session) => {
                self.capture_stop = Some(session.stop.clone());
                let tx = self.self_tx.clone();
                tokio::spawn(async move {
                    while let Some(ev) = session.events.recv().await {
                        if tx.send(SessionEvent::Speech(ev)).is_err() {
                            break;
                        }
                    }
                });
                debug!(locale, "speech capture started");
            }
            Err(e) => {
                // Surface to the user as a no-op action; state is unchanged.
                warn!(error = %e, locale, "speech capture not started");
            }
        }
    }

    fn on_speech_event(&mut self, event: TranscriptEvent) {
        match event {
            TranscriptEvent::Started => {
                self.state.is_listening = true;
                transition(&mut self.state.phase, SessionPhase::Listening);
            }
            TranscriptEvent::Partial(text) => {
                // Interim transcript goes straight to the input field, but the
                // debounce only starts on the terminal transcript.
                self.state.input_text = text;
                self.refresh_suggestions();
            }
            TranscriptEvent::Final(text) => {
                self.state.input_text = text;
                self.refresh_suggestions();
                transition(&mut self.state.phase, SessionPhase::Editing);
                self.debounce
                    .restart(self.self_tx.clone(), SessionEvent::DebounceElapsed);
            }
            TranscriptEvent::Ended => {
                self.state.is_listening = false;
                self.capture_stop = None;
                if self.state.phase == SessionPhase::Listening {
                    let next = if self.state.input_text.trim().is_empty() {
                        SessionPhase::Idle
                    } else {
                        SessionPhase::Editing
                    };
                    transition(&mut self.state.phase, next);
                }
            }
        }
    }

    /// Detect the script, dispatch a translation for the current input, and
    /// mark every earlier in-flight request stale.
    fn begin_translation(&mut self, reason: &'static str) {
        if self.state.input_text.trim().is_empty() {
            // No attempt; the output clears immediately.
            self.state.output_text.clear();
            self.state.is_translating = false;
            transition(&mut self.state.phase, SessionPhase::Idle);
            return;
        }

        transition(&mut self.state.phase, SessionPhase::Detecting);
        if let Some((source, target)) =
            language::detect(&self.state.input_text, self.state.source_lang)
        {
            info!(source = %source, target = %target, "script heuristic flipped language pair");
            self.state.source_lang = source;
            self.state.target_lang = target;
            self.refresh_suggestions();
        }

        let request = TranslateRequest::new(
            self.state.input_text.clone(),
            self.state.source_lang,
            self.state.target_lang,
        );
        let seq = self.sequencer.issue();
        let key =
            TranslationCache::compute_key(request.source, request.target, &request.text);

        transition(&mut self.state.phase, SessionPhase::AwaitingTranslation);

        if let Some(hit) = self.cache.get(&key) {
            debug!(seq, reason, "translation cache hit");
            self.state.output_text = hit;
            self.state.is_translating = false;
            transition(&mut self.state.phase, SessionPhase::Translated);
            return;
        }

        self.state.is_translating = true;
        info!(
            request_id = %request.request_id,
            seq,
            reason,
            pair = %request.pair_code(),
            "translation dispatched"
        );

        let backend = Arc::clone(&self.backend);
        let tx = self.self_tx.clone();
        tokio::spawn(async move {
            let outcome = backend.translate(&request).await;
            let _ = tx.send(SessionEvent::TranslationFinished { seq, key, outcome });
        });
    }

    fn on_translation_finished(
        &mut self,
        seq: u64,
        key: [u8; 32],
        outcome: TranslationOutcome,
    ) {
        if !self.sequencer.is_current(seq) {
            info!(
                seq,
                latest = self.sequencer.latest(),
                "stale translation response discarded"
            );
            return;
        }

        match outcome {
            TranslationOutcome::Success { text } => {
                self.cache.insert(key, text.clone());
                self.state.output_text = text;
            }
            TranslationOutcome::EmptyInput => {
                self.state.output_text.clear();
            }
            TranslationOutcome::ServiceError { fault } => {
                // Displayed where the output normally appears, never thrown.
                self.state.output_text = fault.to_string();
            }
        }
        self.state.is_translating = false;
        transition(&mut self.state.phase, SessionPhase::Translated);
    }
}
