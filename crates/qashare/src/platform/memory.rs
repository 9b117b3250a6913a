use std::cell::Cell;

use super::{AppLauncher, Clipboard, ClipboardError, LaunchError, NativeShare, ShareHint, SharePayload};

/// Clipboard that keeps everything written to it. Useful for headless hosts
/// and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    writes: Vec<String>,
    fail: bool,
}

impl MemoryClipboard {
    /// A clipboard whose writes always fail
    pub fn failing() -> Self {
        Self {
            writes: vec![],
            fail: true,
        }
    }

    pub fn last(&self) -> Option<&str> {
        self.writes.last().map(|s| s.as_str())
    }
}

impl Clipboard for MemoryClipboard {
    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::Unavailable("memory clipboard disabled".to_owned()));
        }

        self.writes.push(text.to_owned());
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingLauncher {
    opened: Vec<String>,
    fail: bool,
}

impl RecordingLauncher {
    pub fn failing() -> Self {
        Self {
            opened: vec![],
            fail: true,
        }
    }

    pub fn opened(&self) -> &[String] {
        &self.opened
    }
}

impl AppLauncher for RecordingLauncher {
    fn open_in_new_context(&mut self, url: &str) -> Result<(), LaunchError> {
        if self.fail {
            return Err(LaunchError::NoHandler(url.to_owned()));
        }

        self.opened.push(url.to_owned());
        Ok(())
    }
}

/// Share surface that claims support (or not) and records payloads
#[derive(Debug, Clone, Default)]
pub struct RecordingShare {
    supported: bool,
    probes: Cell<usize>,
    shared: Vec<SharePayload>,
}

impl RecordingShare {
    pub fn new(supported: bool) -> Self {
        Self {
            supported,
            probes: Cell::new(0),
            shared: vec![],
        }
    }

    pub fn shared(&self) -> &[SharePayload] {
        &self.shared
    }

    pub fn probes(&self) -> usize {
        self.probes.get()
    }
}

impl NativeShare for RecordingShare {
    fn supports_share(&self, _hint: &ShareHint) -> bool {
        self.probes.set(self.probes.get() + 1);
        self.supported
    }

    fn share(&mut self, payload: SharePayload) {
        self.shared.push(payload);
    }
}
