//! Desktop collaborators: the system clipboard, the OS url handler and a
//! mail draft standing in for a share sheet.

use qashare::{
    AppLauncher, Clipboard, ClipboardError, LaunchError, NativeShare, ShareHint, SharePayload,
};
use tracing::{error, info};

/// The OS clipboard through arboard
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let inner = arboard::Clipboard::new()
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Clipboard for SystemClipboard {
    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner.set_text(text.to_owned()).map_err(|e| {
            error!("clipboard write failed: {e}");
            ClipboardError::Write(e.to_string())
        })
    }
}

/// Hands urls, including custom app schemes, to the OS
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenerLauncher;

impl AppLauncher for OpenerLauncher {
    fn open_in_new_context(&mut self, url: &str) -> Result<(), LaunchError> {
        opener::open(url).map_err(|e| {
            error!("could not open {url}: {e}");
            LaunchError::Failed {
                url: url.to_owned(),
                reason: e.to_string(),
            }
        })
    }
}

/// Desktops have no share sheet. When enabled, sharing opens a mail draft
/// holding the payload instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct MailShare {
    enabled: bool,
}

impl MailShare {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn mailto(payload: &SharePayload) -> String {
        format!(
            "mailto:?subject={}&body={}",
            encode(&payload.title),
            encode(&format!("{} {}", payload.text, payload.url)),
        )
    }
}

// mail clients do not all read `+` as a space
fn encode(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

impl NativeShare for MailShare {
    fn supports_share(&self, _hint: &ShareHint) -> bool {
        self.enabled
    }

    fn share(&mut self, payload: SharePayload) {
        let mailto = Self::mailto(&payload);
        info!("sharing {} through a mail draft", payload.url);

        if let Err(e) = opener::open(&mailto) {
            error!("could not open mail draft: {e}");
        }
    }
}
