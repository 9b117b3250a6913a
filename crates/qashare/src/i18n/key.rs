use std::fmt;

/// An owned key used to lookup i18n translations. Mostly used for errors
#[derive(Eq, PartialEq, Clone, Debug, Hash)]
pub struct IntlKeyBuf(String);

/// A dotted translation key, e.g. `share.copy`
#[derive(Eq, PartialEq, Clone, Copy, Debug, Hash)]
pub struct IntlKey<'a>(&'a str);

impl fmt::Display for IntlKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for IntlKeyBuf {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", &self.0)
    }
}

impl IntlKeyBuf {
    pub fn new(string: impl Into<String>) -> Self {
        IntlKeyBuf(string.into())
    }
}

impl<'a> IntlKey<'a> {
    pub const fn new(string: &'a str) -> IntlKey<'a> {
        IntlKey(string)
    }

    pub fn to_owned(&self) -> IntlKeyBuf {
        IntlKeyBuf::new(self.0)
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// The Fluent message id for this key. Fluent ids only allow
    /// `[a-zA-Z0-9_-]`, so anything else (the dots) becomes a dash.
    pub fn ftl_id(&self) -> String {
        fixup_key(self.0)
    }
}

pub fn fixup_key(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' => out.push(ch),
            _ => out.push('-'),
        }
    }
    out.trim_matches('-').to_owned()
}
