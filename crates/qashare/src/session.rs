//! Read-only access to the signed in user.
//!
//! Share menus never reach into a global store; the host hands them a
//! [`Session`] when they are created.

use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct SessionUser {
    pub id: String,
    pub username: String,
}

impl SessionUser {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }

    /// A user record without an id is what the session store holds for
    /// anonymous visitors.
    pub fn is_signed_in(&self) -> bool {
        !self.id.is_empty()
    }
}

pub trait Session {
    fn current_user(&self) -> Option<SessionUser>;
}

/// A session nobody is signed in to
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousSession;

impl Session for AnonymousSession {
    fn current_user(&self) -> Option<SessionUser> {
        None
    }
}

/// A cloneable handle to the host's session. The host signs in and out
/// through any clone; share menus only read.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    user: Arc<RwLock<Option<SessionUser>>>,
}

impl SharedSession {
    pub fn new(user: Option<SessionUser>) -> Self {
        Self {
            user: Arc::new(RwLock::new(user)),
        }
    }

    pub fn sign_in(&self, user: SessionUser) {
        tracing::info!("session: signed in as '{}'", user.username);
        if let Ok(mut cur) = self.user.write() {
            *cur = Some(user);
        }
    }

    pub fn sign_out(&self) {
        tracing::info!("session: signed out");
        if let Ok(mut cur) = self.user.write() {
            *cur = None;
        }
    }
}

impl Session for SharedSession {
    fn current_user(&self) -> Option<SessionUser> {
        self.user
            .read()
            .ok()
            .and_then(|u| u.clone())
            .filter(SessionUser::is_signed_in)
    }
}
