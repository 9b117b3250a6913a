use std::fmt;

use url::Url;

use crate::{Error, SessionUser, ShareTarget};

/// Query parameter carrying the sharing user's name, used for referral credit
const SHARE_QUERY_PARAM: &str = "share";

/// The `scheme://host[:port]` part of every share link
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ShareOrigin(String);

impl ShareOrigin {
    /// Parse a configured site address. Anything after the authority (path,
    /// query, fragment, trailing slash) is dropped.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let parsed = Url::parse(s.trim()).map_err(|e| Error::invalid_origin(s, e))?;
        let origin = parsed.origin();
        if !origin.is_tuple() {
            return Err(Error::invalid_origin(s, "origin has no host"));
        }

        Ok(ShareOrigin(origin.ascii_serialization()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ShareOrigin {
    fn default() -> Self {
        ShareOrigin("http://localhost".to_owned())
    }
}

impl fmt::Display for ShareOrigin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fully composed link to a question or answer
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ShareUrl(String);

impl ShareUrl {
    /// Compose the link for `target`. A signed in user adds `?share=<username>`.
    pub fn compose(origin: &ShareOrigin, target: &ShareTarget, user: Option<&SessionUser>) -> Self {
        let mut url = format!("{}{}", origin.as_str(), target.path());

        if let Some(user) = user.filter(|u| u.is_signed_in()) {
            url.push('?');
            url.push_str(SHARE_QUERY_PARAM);
            url.push('=');
            url.push_str(&user.username);
        }

        ShareUrl(url)
    }

    /// Clipboard text: the title followed by the link, or just the link when
    /// there is no title.
    pub fn copy_text(&self, title: &str) -> String {
        if title.is_empty() {
            self.0.clone()
        } else {
            format!("{title} {}", self.0)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShareUrl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShareUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
