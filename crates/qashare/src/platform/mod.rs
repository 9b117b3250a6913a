//! Host capabilities a share menu calls through: clipboard, opening other
//! apps and the platform share surface.

mod memory;

pub use memory::{MemoryClipboard, RecordingLauncher, RecordingShare};

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard write failed: {0}")]
    Write(String),
}

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum LaunchError {
    #[error("no handler for '{0}'")]
    NoHandler(String),

    #[error("failed to open '{url}': {reason}")]
    Failed { url: String, reason: String },
}

pub trait Clipboard {
    fn write(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Opens a URL (usually a custom app scheme) outside of the current view
pub trait AppLauncher {
    fn open_in_new_context(&mut self, url: &str) -> Result<(), LaunchError>;
}

/// Sample content used to ask the platform whether it can share at all
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ShareHint {
    pub text: String,
}

impl Default for ShareHint {
    fn default() -> Self {
        Self {
            text: "can_share".to_owned(),
        }
    }
}

/// What gets handed to the platform share surface
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

/// The operating system's share sheet. The platform owns the resulting UI;
/// completion and cancellation are never reported back.
pub trait NativeShare {
    fn supports_share(&self, hint: &ShareHint) -> bool;

    fn share(&mut self, payload: SharePayload);
}

/// For platforms without a share sheet
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNativeShare;

impl NativeShare for NoNativeShare {
    fn supports_share(&self, _hint: &ShareHint) -> bool {
        false
    }

    fn share(&mut self, payload: SharePayload) {
        tracing::debug!("native share unsupported, dropping share of {}", payload.url);
    }
}
