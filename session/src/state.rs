//! Session value observed by guards and identity-aware components.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use crate::identity::Identity;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionStatus {
    /// The provider has not reported its initial state yet.
    #[default]
    Loading,
    Resolved,
}

/// The current identity paired with whether it is known yet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub identity: Option<Identity>,
    pub status: SessionStatus,
}

impl Session {
    #[must_use]
    pub fn loading() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn resolved(identity: Option<Identity>) -> Self {
        Self { identity, status: SessionStatus::Resolved }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == SessionStatus::Loading
    }

    /// True only once resolved with an identity present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Resolved && self.identity.is_some()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }
}
