//! Translation types and backend seam.
//! The session talks to a `TranslationBackend` trait object; the shipped
//! implementation is the MyMemory HTTP client in `mymemory`. Results are a
//! tagged outcome rather than a Result: an empty input is a no-op signal, not
//! an error, and service faults are recovered locally as display strings.

pub mod cache;
pub mod mymemory;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::language::Language;

/// One debounced (or manual) translation attempt. Built per attempt and not
/// retained after the call resolves.
#[derive(Debug, Clone, Serialize)]
pub struct TranslateRequest {
    pub request_id: String,
    pub text: String,
    pub source: Language,
    pub target: Language,
}

impl TranslateRequest {
    pub fn new(text: impl Into<String>, source: Language, target: Language) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            text: text.into(),
            source,
            target,
        }
    }

    /// Two-letter pair code understood by the backend, e.g. "en|ta".
    pub fn pair_code(&self) -> String {
        format!("{}|{}", self.source.code(), self.target.code())
    }
}

/// Why the service could not produce a translation. Rendered in place of the
/// output text, never thrown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceFault {
    /// The backend answered but without the expected payload shape.
    Busy,
    /// Transport failure: unreachable, timed out, or malformed response.
    Connection,
}

impl std::fmt::Display for ServiceFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceFault::Busy => write!(f, "Translation busy. Try again."),
            ServiceFault::Connection => write!(f, "Connection error. Check your internet."),
        }
    }
}

/// Outcome of one translation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    Success { text: String },
    /// Empty or whitespace-only input; no request was made.
    EmptyInput,
    ServiceError { fault: ServiceFault },
}

/// Backend seam. Implementations must be at-most-once per call: no retries.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    async fn translate(&self, request: &TranslateRequest) -> TranslationOutcome;
}
