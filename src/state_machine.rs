//! Session phase machine: Idle → Editing → Detecting → AwaitingTranslation →
//! Translated, with Listening reachable from anywhere for voice capture.
//! Transitions are validated so a misbehaving event source cannot put the
//! session into a nonsensical phase.

use serde::Serialize;
use tracing::warn;

/// Phases of a translation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SessionPhase {
    /// No meaningful input; output is clear.
    Idle,
    /// Input is changing; the debounce window is open.
    Editing,
    /// Debounce elapsed; the script heuristic is deciding the pair.
    Detecting,
    /// A translation request is outstanding.
    AwaitingTranslation,
    /// A translation result (or its error string) is displayed.
    Translated,
    /// Speech capture is active.
    Listening,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionPhase::Idle => write!(f, "Idle"),
            SessionPhase::Editing => write!(f, "Editing"),
            SessionPhase::Detecting => write!(f, "Detecting"),
            SessionPhase::AwaitingTranslation => write!(f, "AwaitingTranslation"),
            SessionPhase::Translated => write!(f, "Translated"),
            SessionPhase::Listening => write!(f, "Listening"),
        }
    }
}

impl SessionPhase {
    /// Returns whether transitioning from `self` to `next` is valid.
    pub fn can_transition_to(self, next: SessionPhase) -> bool {
        matches!(
            (self, next),
            (SessionPhase::Idle, SessionPhase::Editing)
                | (SessionPhase::Idle, SessionPhase::Detecting) // manual translate
                | (SessionPhase::Editing, SessionPhase::Editing) // keystroke restarts debounce
                | (SessionPhase::Editing, SessionPhase::Detecting)
                | (SessionPhase::Detecting, SessionPhase::AwaitingTranslation)
                | (SessionPhase::AwaitingTranslation, SessionPhase::Translated)
                | (SessionPhase::AwaitingTranslation, SessionPhase::Editing) // typing while in flight
                | (SessionPhase::Translated, SessionPhase::Editing)
                | (SessionPhase::Translated, SessionPhase::Detecting) // manual re-translate
                | (SessionPhase::Listening, SessionPhase::Editing) // terminal transcript
                // Voice capture can start from anywhere
                | (_, SessionPhase::Listening)
                // Empty input, teardown, or cleared output from any phase
                | (_, SessionPhase::Idle)
        )
    }
}

/// Apply a phase transition in place, logging and refusing invalid ones.
/// Returns true if the transition was applied.
pub fn transition(phase: &mut SessionPhase, next: SessionPhase) -> bool {
    if *phase == next {
        return true;
    }
    if !phase.can_transition_to(next) {
        warn!(from = %phase, to = %next, "invalid phase transition refused");
        return false;
    }
    *phase = next;
    true
}
