use super::IntlKeyBuf;
use unic_langid::LanguageIdentifier;

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum IntlError {
    #[error("message not found: {0}")]
    NotFound(IntlKeyBuf),

    #[error("message has no value: {0}")]
    NoValue(IntlKeyBuf),

    #[error("Locale({0}) parse error: {1}")]
    LocaleParse(String, String),

    #[error("locale not available: {0}")]
    LocaleNotAvailable(LanguageIdentifier),

    #[error("FTL for '{0}' is not available")]
    NoFtl(LanguageIdentifier),
}
