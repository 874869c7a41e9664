//! Session coordinator: reconciles the identity provider with the backend.
//!
//! ARCHITECTURE
//! ============
//! One coordinator is built at startup and shared (the client provides it via
//! Leptos context). It subscribes to the identity provider for its whole
//! lifetime and republishes identity changes as `Session` values on
//! `observe_session()` streams. Commands (`signup`, `login`, `logout`) go to
//! the provider, and successful sign-ins are followed by one idempotent
//! ensure-user call so the backend always has a record for the identity.
//!
//! ORDERING
//! ========
//! Provider callbacks fire inside the provider's sign-in call, before the
//! backend knows the user. While `signup`/`login` runs, the coordinator holds
//! identity reports back and publishes the latest one only after ensure-user
//! has finished (successfully or not). Observers therefore never see
//! `Resolved(identity)` before the `POST /api/users`, and the command's
//! future resolves right after the item is queued.
//!
//! TRADE-OFFS
//! ==========
//! A failed ensure-user after a successful provider signup is not rolled back.
//! The provider stays the source of truth; the next login repeats ensure-user,
//! and `retry_backend_sync` lets the UI do so explicitly.

#[cfg(test)]
#[path = "coordinator_test.rs"]
mod coordinator_test;

use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};

use futures::Stream;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::ApiClient;
use crate::error::AuthError;
use crate::identity::{Identity, IdentityProvider, Subscription};
use crate::state::Session;

struct Shared {
    session: Session,
    observers: Vec<UnboundedSender<Session>>,
    /// Sign-in commands in flight; reports wait in `deferred` until zero.
    holds: usize,
    deferred: Option<Option<Identity>>,
}

impl Shared {
    /// Apply a provider callback, or defer it while a sign-in is running.
    fn apply(&mut self, identity: Option<Identity>) {
        if self.holds > 0 {
            self.deferred = Some(identity);
            return;
        }
        self.publish(identity);
    }

    fn release(&mut self) {
        self.holds = self.holds.saturating_sub(1);
        if self.holds == 0 {
            if let Some(identity) = self.deferred.take() {
                self.publish(identity);
            }
        }
    }

    /// Repeated reports of an unchanged identity (token refreshes, duplicate
    /// callbacks) publish nothing.
    fn publish(&mut self, identity: Option<Identity>) {
        let next = Session::resolved(identity);
        if self.session == next {
            return;
        }
        self.session = next;
        let session = &self.session;
        self.observers
            .retain(|tx| tx.unbounded_send(session.clone()).is_ok());
    }
}

pub struct SessionCoordinator {
    provider: Arc<dyn IdentityProvider>,
    api: ApiClient,
    shared: Arc<Mutex<Shared>>,
    _subscription: Subscription,
}

impl SessionCoordinator {
    /// Build the coordinator and subscribe to `provider`.
    ///
    /// The session starts `Loading` unless the provider replays a known
    /// identity from inside `subscribe`.
    pub fn new(provider: Arc<dyn IdentityProvider>, api: ApiClient) -> Self {
        let shared = Arc::new(Mutex::new(Shared {
            session: Session::loading(),
            observers: Vec::new(),
            holds: 0,
            deferred: None,
        }));
        let sink = Arc::downgrade(&shared);
        let subscription = provider.subscribe(Arc::new(move |identity: Option<Identity>| {
            if let Some(shared) = sink.upgrade() {
                shared
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .apply(identity);
            }
        }));
        Self { provider, api, shared, _subscription: subscription }
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn current(&self) -> Session {
        self.lock().session.clone()
    }

    /// Stream of session values.
    ///
    /// The first item is the session at subscription time (`Loading` or
    /// already `Resolved`); later items arrive only when the identity
    /// changes. The stream ends only when the coordinator is dropped, and a
    /// finished stream cannot be restarted; call `observe_session` again.
    #[must_use]
    pub fn observe_session(&self) -> SessionStream {
        let (tx, rx) = mpsc::unbounded();
        let mut shared = self.lock();
        // Unbounded send only fails when the receiver is gone; it is held below.
        let _ = tx.unbounded_send(shared.session.clone());
        shared.observers.push(tx);
        SessionStream { rx }
    }

    /// Create an account, set its display name, and ensure the backend user.
    ///
    /// # Errors
    ///
    /// `AuthError::Identity` when the provider rejects sign-up, the profile
    /// update, or token issuance; `AuthError::BackendSync` when ensure-user
    /// fails. The provider account is left in place in both cases.
    pub async fn signup(&self, email: &str, password: &str, display_name: &str) -> Result<Identity, AuthError> {
        let _hold = self.hold();
        let identity = self
            .provider
            .sign_up(email, password)
            .await
            .inspect_err(|e| log::error!("signup error: {e}"))?;
        self.provider
            .update_display_name(&identity, display_name)
            .await
            .inspect_err(|e| log::error!("signup profile update error: {e}"))?;
        let identity = Identity { display_name: Some(display_name.to_owned()), ..identity };
        self.ensure_backend_user(&identity).await?;
        Ok(identity)
    }

    /// Sign in and ensure the backend user (idempotent, on every login).
    ///
    /// # Errors
    ///
    /// `AuthError::Identity` for rejected credentials; `AuthError::BackendSync`
    /// when ensure-user fails after a successful sign-in.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let _hold = self.hold();
        let identity = self
            .provider
            .sign_in(email, password)
            .await
            .inspect_err(|e| log::error!("login error: {e}"))?;
        self.ensure_backend_user(&identity).await?;
        Ok(identity)
    }

    /// Sign out of the provider and drop the cached bearer token.
    ///
    /// # Errors
    ///
    /// `AuthError::Identity` if the provider refuses to sign out; the token
    /// is cleared regardless.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let result = self.provider.sign_out().await;
        self.api.tokens().clear();
        result.inspect_err(|e| log::error!("logout error: {e}"))?;
        Ok(())
    }

    /// API client primed with a freshly minted token for the current identity.
    ///
    /// # Errors
    ///
    /// `AuthError::SignedOut` without an identity; `AuthError::Identity` if
    /// the provider cannot issue a token.
    pub async fn authorized_api(&self) -> Result<&ApiClient, AuthError> {
        let Some(identity) = self.current().identity else {
            self.api.tokens().clear();
            return Err(AuthError::SignedOut);
        };
        self.refresh_token(&identity).await?;
        Ok(&self.api)
    }

    /// Repeat ensure-user for the current identity.
    ///
    /// # Errors
    ///
    /// Same as `authorized_api`, plus `AuthError::BackendSync`.
    pub async fn retry_backend_sync(&self) -> Result<(), AuthError> {
        let Some(identity) = self.current().identity else {
            return Err(AuthError::SignedOut);
        };
        self.ensure_backend_user(&identity).await
    }

    async fn ensure_backend_user(&self, identity: &Identity) -> Result<(), AuthError> {
        self.refresh_token(identity).await?;
        self.api.ensure_user().await.map_err(|e| {
            log::error!("backend user sync failed for {}: {e}", identity.id);
            AuthError::BackendSync(e)
        })
    }

    async fn refresh_token(&self, identity: &Identity) -> Result<(), AuthError> {
        let token = self.provider.get_token(identity).await?;
        self.api.tokens().set(&token);
        Ok(())
    }

    fn hold(&self) -> PublishHold {
        self.lock().holds += 1;
        PublishHold { shared: self.shared.clone() }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Defers session publication until dropped, including on early `?` returns.
struct PublishHold {
    shared: Arc<Mutex<Shared>>,
}

impl Drop for PublishHold {
    fn drop(&mut self) {
        self.shared
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .release();
    }
}

/// Session values published by a `SessionCoordinator`.
pub struct SessionStream {
    rx: UnboundedReceiver<Session>,
}

impl Stream for SessionStream {
    type Item = Session;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Session>> {
        Pin::new(&mut self.rx).poll_next(cx)
    }
}
