//! Clipboard capability seam: write-only, used to copy the current output
//! text on demand. Ships an `xclip`-backed Linux implementation with startup
//! capability probing, and an in-memory writer for tests and headless hosts.

use std::process::Command;

use parking_lot::Mutex;
use tracing::{debug, warn};

#[derive(Debug)]
pub enum ClipboardError {
    /// The host has no clipboard capability.
    Unavailable,
    Failed(String),
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::Unavailable => write!(f, "clipboard unavailable on this host"),
            ClipboardError::Failed(msg) => write!(f, "clipboard write failed: {msg}"),
        }
    }
}

/// Write-only clipboard access.
pub trait ClipboardWriter: Send + Sync {
    fn write(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard writer backed by `xclip` for Linux/WSL hosts.
/// Probes for the tool once at construction time.
pub struct XclipClipboard {
    tool_available: bool,
}

impl XclipClipboard {
    pub fn new() -> Self {
        let tool_available = probe_command("xclip");
        if !tool_available {
            warn!("xclip not found — clipboard copy will be unavailable");
        }
        Self { tool_available }
    }
}

impl Default for XclipClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardWriter for XclipClipboard {
    fn write(&self, text: &str) -> Result<(), ClipboardError> {
        // Fast fail if the tool was not found at startup
        if !self.tool_available {
            return Err(ClipboardError::Unavailable);
        }

        use std::io::Write;
        let mut child = Command::new("xclip")
            .args(["-selection", "clipboard", "-i"])
            .stdin(std::process::Stdio::piped())
            .spawn()
            .map_err(|e| ClipboardError::Failed(format!("xclip spawn: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| ClipboardError::Failed(format!("xclip write: {e}")))?;
        }

        child
            .wait()
            .map_err(|e| ClipboardError::Failed(format!("xclip wait: {e}")))?;

        debug!(len = text.len(), "clipboard_written");
        Ok(())
    }
}

/// In-memory clipboard for tests and headless hosts.
pub struct MemoryClipboard {
    contents: Mutex<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self {
            contents: Mutex::new(String::new()),
        }
    }

    pub fn contents(&self) -> String {
        self.contents.lock().clone()
    }
}

impl Default for MemoryClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardWriter for MemoryClipboard {
    fn write(&self, text: &str) -> Result<(), ClipboardError> {
        *self.contents.lock() = text.to_string();
        Ok(())
    }
}

/// Probe whether a command is available on PATH.
fn probe_command(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_stores_last_write() {
        let clip = MemoryClipboard::new();
        clip.write("first").expect("write");
        clip.write("second").expect("write");
        assert_eq!(clip.contents(), "second");
    }

    #[test]
    fn unavailable_xclip_fails_fast() {
        let clip = XclipClipboard {
            tool_available: false,
        };
        match clip.write("text") {
            Err(ClipboardError::Unavailable) => {}
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }
}
