//! Localized labels for the share menu.
//!
//! Translations are Fluent bundles baked into the binary. Callers look
//! labels up with dotted keys (`share.copy`), see [`keys`].

mod error;
mod key;
mod manager;

pub use error::IntlError;
pub use key::{fixup_key, IntlKey, IntlKeyBuf};
pub use manager::{CacheStats, Localization};

pub use unic_langid::LanguageIdentifier;

/// Keys used by the share menu
pub mod keys {
    use super::IntlKey;

    /// Toggle that opens the menu
    pub const SHARE_NAME: IntlKey<'static> = IntlKey::new("share.name");
    pub const SHARE_COPY: IntlKey<'static> = IntlKey::new("share.copy");
    /// Tooltip after a successful copy
    pub const SHARE_COPIED: IntlKey<'static> = IntlKey::new("share.copied");
    pub const SHARE_WECHAT_APP: IntlKey<'static> = IntlKey::new("share.wechat_app");
    /// Native share sheet item
    pub const SHARE_VIA: IntlKey<'static> = IntlKey::new("share.via");
    /// QR code alt text
    pub const SHARE_WECHAT: IntlKey<'static> = IntlKey::new("share.wechat");
}

/// Anything that can turn a key into a user visible label. Lookups never
/// fail; an unknown key comes back as itself.
pub trait Translate {
    fn translate(&mut self, key: IntlKey<'_>) -> String;
}
