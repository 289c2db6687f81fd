//! Stale-work suppression: request sequence numbers + cancellable debounce.
//! A translation response is applied only if its sequence number is still the
//! latest issued, so a slow early request can never overwrite the result of a
//! later one. The debounce is a cancel-and-restart scheduled callback; it is
//! always cancelled on session teardown.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Issues monotonically increasing sequence numbers for translation requests
/// and answers whether a given number is still the latest.
pub struct RequestSequencer {
    current: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self {
            current: AtomicU64::new(0),
        }
    }

    /// Issue the next sequence number. The previous one becomes stale.
    pub fn issue(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Returns true if `seq` is the most recently issued number.
    #[inline]
    pub fn is_current(&self, seq: u64) -> bool {
        self.current.load(Ordering::SeqCst) == seq
    }

    /// The most recently issued number (0 if none yet).
    pub fn latest(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }
}

impl Default for RequestSequencer {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancel-and-restart debounce timer. Each `restart` cancels the previous
/// pending fire and schedules a new one; `cancel` (and drop) guarantees no
/// fire after teardown.
pub struct Debounce {
    delay: Duration,
    pending: Option<CancellationToken>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Cancel any pending fire and schedule `msg` to be sent after the delay.
    pub fn restart<T: Send + 'static>(&mut self, tx: mpsc::UnboundedSender<T>, msg: T) {
        self.cancel();
        let token = CancellationToken::new();
        let child = token.child_token();
        let delay = self.delay;
        self.pending = Some(token);
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    let _ = tx.send(msg);
                }
                _ = child.cancelled() => {}
            }
        });
    }

    /// Cancel the pending fire, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

impl Drop for Debounce {
    fn drop(&mut self) {
        self.cancel();
    }
}
