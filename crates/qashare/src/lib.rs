mod args;
mod error;
pub mod i18n;
mod options;
pub mod platform;
pub mod qr;
mod result;
mod session;
mod settings;
mod share_url;
mod storage;
mod target;
mod timer;
mod widget;

pub use args::ShareArgs;
pub use error::{Error, TargetError};
pub use i18n::{IntlError, IntlKey, IntlKeyBuf, LanguageIdentifier, Localization, Translate};
pub use options::ShareOptions;
pub use platform::{
    AppLauncher, Clipboard, ClipboardError, LaunchError, NativeShare, NoNativeShare, ShareHint,
    SharePayload,
};
pub use qr::{QrCodeGenerator, QrError, QrGenerator, QrImage, QrOptions, QrRequests};
pub use result::Result;
pub use session::{AnonymousSession, Session, SessionUser, SharedSession};
pub use settings::{SettingsHandler, ShareSettings};
pub use share_url::{ShareOrigin, ShareUrl};
pub use storage::{DataPath, DataPathType, Directory};
pub use target::{ShareKind, ShareMode, ShareProps, ShareTarget};
pub use timer::OneShotTimer;
pub use widget::{MenuItem, ShareLayout, ShareWidget, UiState, COPIED_TOOLTIP_DURATION};
