//! Identity-provider seam.
//!
//! ARCHITECTURE
//! ============
//! The provider is the source of truth for "who is signed in". It reports
//! identity changes to subscribers and mints bearer tokens on demand. The
//! coordinator never stores identities of its own beyond the last value the
//! provider reported.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

/// A signed-in user as reported by the identity provider.
///
/// Tokens are not part of the value: a token refresh leaves the identity equal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Provider-assigned user id; also keys the backend user record.
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
}

impl Identity {
    /// Name shown in navigation chrome: display name, falling back to email.
    #[must_use]
    pub fn greeting_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

/// Classified provider rejection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentityErrorKind {
    EmailAlreadyInUse,
    WeakCredential,
    InvalidEmail,
    UserNotFound,
    WrongCredential,
    RateLimited,
    Unknown,
}

impl IdentityErrorKind {
    /// Classify a provider error code.
    ///
    /// Accepts both SDK-style codes (`auth/wrong-password`) and Identity
    /// Toolkit REST codes, including REST messages carrying a ` : detail`
    /// suffix (`WEAK_PASSWORD : Password should be at least 6 characters`).
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match normalize_code(code) {
            "auth/email-already-in-use" | "EMAIL_EXISTS" => Self::EmailAlreadyInUse,
            "auth/weak-password" | "WEAK_PASSWORD" => Self::WeakCredential,
            "auth/invalid-email" | "auth/missing-email" | "INVALID_EMAIL" | "MISSING_EMAIL" => Self::InvalidEmail,
            "auth/user-not-found" | "EMAIL_NOT_FOUND" => Self::UserNotFound,
            "auth/wrong-password" | "auth/invalid-credential" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
                Self::WrongCredential
            }
            "auth/too-many-requests" | "TOO_MANY_ATTEMPTS_TRY_LATER" => Self::RateLimited,
            _ => Self::Unknown,
        }
    }
}

fn normalize_code(code: &str) -> &str {
    code.split(" : ")
        .next()
        .unwrap_or(code)
        .trim()
}

/// Provider-side failure of an identity operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("identity provider rejected request: {code}")]
pub struct IdentityError {
    pub kind: IdentityErrorKind,
    /// Provider code with any detail suffix stripped.
    pub code: String,
}

impl IdentityError {
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        Self { kind: IdentityErrorKind::from_code(code), code: normalize_code(code).to_owned() }
    }

    /// The provider could not be reached or answered with something unparseable.
    pub fn transport(detail: impl Into<String>) -> Self {
        Self { kind: IdentityErrorKind::Unknown, code: detail.into() }
    }
}

/// Callback invoked with the new identity (`None` = signed out).
pub type IdentityListener = Arc<dyn Fn(Option<Identity>) + Send + Sync>;

/// Handle returned by `IdentityProvider::subscribe`; dropping it unsubscribes.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }

    /// A subscription with nothing to cancel.
    #[must_use]
    pub fn detached() -> Self {
        Self { cancel: None }
    }

    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

#[derive(Default)]
struct ListenerRegistry {
    next_id: u64,
    entries: Vec<(u64, IdentityListener)>,
}

/// Listener registry shared by provider adapters.
#[derive(Clone, Default)]
pub struct Listeners {
    inner: Arc<Mutex<ListenerRegistry>>,
}

impl Listeners {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: IdentityListener) -> Subscription {
        let id = {
            let mut registry = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push((id, listener));
            id
        };
        let registry = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .entries
                    .retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Invoke every listener with `identity`.
    ///
    /// The listener list is snapshotted first, so listeners may subscribe or
    /// unsubscribe from inside the callback.
    pub fn notify(&self, identity: Option<&Identity>) {
        let snapshot: Vec<IdentityListener> = self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in snapshot {
            listener(identity.cloned());
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// External identity service: credentials in, identities and tokens out.
#[async_trait::async_trait(?Send)]
pub trait IdentityProvider: Send + Sync {
    /// Create an account and sign it in.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, IdentityError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, IdentityError>;

    async fn sign_out(&self) -> Result<(), IdentityError>;

    async fn update_display_name(&self, identity: &Identity, name: &str) -> Result<(), IdentityError>;

    /// Register for identity changes. The listener fires once the provider
    /// knows the initial state (immediately, if it already does) and then on
    /// every sign-in, sign-out or profile change. Token refreshes do not fire.
    fn subscribe(&self, listener: IdentityListener) -> Subscription;

    /// Bearer token for `identity`, refreshed first if it is about to expire.
    async fn get_token(&self, identity: &Identity) -> Result<String, IdentityError>;
}
