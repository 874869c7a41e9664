//! Firebase Authentication adapter over the Identity Toolkit REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser talks to Firebase directly through `HttpTransport`; no SDK is
//! loaded. Credentials (identity, ID token, refresh token, expiry) are
//! persisted as JSON under `identityCredential` so a reload can resume the
//! session through `restore()`.
//!
//! DESIGN
//! ======
//! - `restore()` is the provider's initial check. Until it finishes the
//!   adapter is "unrestored" and subscribers hear nothing, which keeps the
//!   session `Loading`.
//! - ID tokens are reused until they are within `REFRESH_MARGIN_MS` of
//!   expiry, then exchanged at the Secure Token endpoint. A refresh changes
//!   tokens only, so listeners are not notified.
//! - State lives behind a `Mutex` that is never held across an `.await`.
//!
//! ERROR HANDLING
//! ==============
//! REST errors arrive as `{"error":{"message":"CODE : detail"}}` and are
//! classified by `IdentityError::from_code`. Transport and decode failures
//! become `IdentityErrorKind::Unknown`.

#[cfg(test)]
#[path = "firebase_test.rs"]
mod firebase_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::http::{HttpRequest, HttpResponse, HttpTransport, Method};
use crate::identity::{Identity, IdentityError, IdentityListener, IdentityProvider, Listeners, Subscription};
use crate::storage::Storage;

pub const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const SECURE_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1/token";

/// Storage key of the persisted credential.
pub const CREDENTIAL_KEY: &str = "identityCredential";

/// Tokens expiring within this window are refreshed before use.
pub const REFRESH_MARGIN_MS: i64 = 60_000;

/// Milliseconds since the Unix epoch.
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// Clock backed by `SystemTime`. Not usable on `wasm32-unknown-unknown`;
/// the browser build supplies its own.
#[must_use]
pub fn system_clock() -> Clock {
    Arc::new(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or_default()
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub identity_url: String,
    pub token_url: String,
}

impl FirebaseConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            identity_url: IDENTITY_TOOLKIT_URL.to_owned(),
            token_url: SECURE_TOKEN_URL.to_owned(),
        }
    }

    fn account_url(&self, action: &str) -> String {
        format!("{}/accounts:{action}?key={}", self.identity_url, self.api_key)
    }

    fn refresh_url(&self) -> String {
        format!("{}?key={}", self.token_url, self.api_key)
    }
}

/// Persisted form of a signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Credential {
    identity: Identity,
    id_token: String,
    refresh_token: String,
    expires_at_ms: i64,
}

// ---- REST payloads ----

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    email: String,
    #[serde(default)]
    display_name: Option<String>,
    id_token: String,
    refresh_token: String,
    expires_in: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateResponse {
    #[serde(default)]
    id_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<String>,
}

#[derive(Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Default)]
struct State {
    credential: Option<Credential>,
    restored: bool,
}

pub struct FirebaseIdentity {
    config: FirebaseConfig,
    transport: Arc<dyn HttpTransport>,
    storage: Arc<dyn Storage>,
    clock: Clock,
    state: Mutex<State>,
    listeners: Listeners,
}

impl FirebaseIdentity {
    pub fn new(config: FirebaseConfig, transport: Arc<dyn HttpTransport>, storage: Arc<dyn Storage>, clock: Clock) -> Self {
        Self { config, transport, storage, clock, state: Mutex::new(State::default()), listeners: Listeners::new() }
    }

    /// Resume a persisted session and report the initial identity.
    ///
    /// A stored credential is refreshed once; if that fails it is discarded
    /// and the user is reported signed out. Calling this again after the
    /// adapter is restored does nothing.
    pub async fn restore(&self) {
        if self.lock().restored {
            return;
        }
        let stored = self
            .storage
            .get(CREDENTIAL_KEY)
            .and_then(|raw| match serde_json::from_str::<Credential>(&raw) {
                Ok(credential) => Some(credential),
                Err(e) => {
                    log::warn!("discarding unreadable stored credential: {e}");
                    None
                }
            });

        let credential = match stored {
            Some(credential) => match self.refresh(&credential).await {
                Ok(fresh) => Some(fresh),
                Err(e) => {
                    log::warn!("stored session could not be refreshed: {e}");
                    None
                }
            },
            None => None,
        };

        let identity = credential.as_ref().map(|c| c.identity.clone());
        {
            let mut state = self.lock();
            if state.restored {
                // A sign-in completed while the refresh was in flight.
                return;
            }
            state.restored = true;
            state.credential.clone_from(&credential);
        }
        self.persist(credential.as_ref());
        log::info!("identity restored: {}", identity.as_ref().map_or("none", |i| i.id.as_str()));
        self.listeners.notify(identity.as_ref());
    }

    #[must_use]
    pub fn is_restored(&self) -> bool {
        self.lock().restored
    }

    #[must_use]
    pub fn current_identity(&self) -> Option<Identity> {
        self.lock()
            .credential
            .as_ref()
            .map(|c| c.identity.clone())
    }

    async fn authenticate(&self, action: &str, email: &str, password: &str) -> Result<Identity, IdentityError> {
        let body = json!({ "email": email, "password": password, "returnSecureToken": true });
        let resp: AccountResponse = self.post(self.config.account_url(action), body).await?;
        let credential = Credential {
            identity: Identity {
                id: resp.local_id,
                email: resp.email,
                display_name: resp.display_name.filter(|name| !name.is_empty()),
            },
            expires_at_ms: self.expiry(&resp.expires_in)?,
            id_token: resp.id_token,
            refresh_token: resp.refresh_token,
        };
        let identity = credential.identity.clone();
        self.establish(Some(credential));
        Ok(identity)
    }

    /// Exchange the refresh token for a new ID token.
    async fn refresh(&self, credential: &Credential) -> Result<Credential, IdentityError> {
        let body = json!({ "grant_type": "refresh_token", "refresh_token": credential.refresh_token });
        let resp: RefreshResponse = self.post(self.config.refresh_url(), body).await?;
        Ok(Credential {
            identity: credential.identity.clone(),
            expires_at_ms: self.expiry(&resp.expires_in)?,
            id_token: resp.id_token,
            refresh_token: resp.refresh_token,
        })
    }

    async fn post<T: DeserializeOwned>(&self, url: String, body: serde_json::Value) -> Result<T, IdentityError> {
        let resp = self
            .transport
            .send(HttpRequest::new(Method::Post, url).with_json(body))
            .await
            .map_err(IdentityError::transport)?;
        if !resp.is_success() {
            return Err(rest_error(&resp));
        }
        resp.json::<T>()
            .map_err(|e| IdentityError::transport(e.to_string()))
    }

    fn expiry(&self, expires_in: &str) -> Result<i64, IdentityError> {
        let secs: i64 = expires_in
            .trim()
            .parse()
            .map_err(|_| IdentityError::transport(format!("invalid expiresIn: {expires_in}")))?;
        Ok((self.clock)().saturating_add(secs.saturating_mul(1000)))
    }

    /// Replace the credential, persist it, and notify listeners.
    fn establish(&self, credential: Option<Credential>) {
        let identity = credential.as_ref().map(|c| c.identity.clone());
        {
            let mut state = self.lock();
            state.restored = true;
            state.credential.clone_from(&credential);
        }
        self.persist(credential.as_ref());
        self.listeners.notify(identity.as_ref());
    }

    fn persist(&self, credential: Option<&Credential>) {
        match credential.map(serde_json::to_string) {
            Some(Ok(raw)) => self.storage.set(CREDENTIAL_KEY, &raw),
            Some(Err(e)) => log::error!("failed to persist credential: {e}"),
            None => self.storage.remove(CREDENTIAL_KEY),
        }
    }

    /// Current credential if it belongs to `identity`.
    fn credential_for(&self, identity: &Identity) -> Result<Credential, IdentityError> {
        self.lock()
            .credential
            .clone()
            .filter(|c| c.identity.id == identity.id)
            .ok_or_else(|| IdentityError::from_code("USER_NOT_SIGNED_IN"))
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn rest_error(resp: &HttpResponse) -> IdentityError {
    match resp.json::<ErrorEnvelope>() {
        Ok(envelope) => IdentityError::from_code(&envelope.error.message),
        Err(_) => IdentityError::transport(format!("identity service returned status {}", resp.status)),
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityProvider for FirebaseIdentity {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, IdentityError> {
        self.authenticate("signUp", email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, IdentityError> {
        self.authenticate("signInWithPassword", email, password)
            .await
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        self.establish(None);
        Ok(())
    }

    async fn update_display_name(&self, identity: &Identity, name: &str) -> Result<(), IdentityError> {
        let id_token = self.get_token(identity).await?;
        let body = json!({ "idToken": id_token, "displayName": name, "returnSecureToken": true });
        let resp: UpdateResponse = self
            .post(self.config.account_url("update"), body)
            .await?;

        let mut credential = self.credential_for(identity)?;
        credential.identity.display_name = Some(name.to_owned());
        if let (Some(id_token), Some(refresh_token)) = (resp.id_token, resp.refresh_token) {
            credential.expires_at_ms = match resp.expires_in {
                Some(expires_in) => self.expiry(&expires_in)?,
                None => credential.expires_at_ms,
            };
            credential.id_token = id_token;
            credential.refresh_token = refresh_token;
        }
        self.establish(Some(credential));
        Ok(())
    }

    fn subscribe(&self, listener: IdentityListener) -> Subscription {
        let replay = {
            let state = self.lock();
            state
                .restored
                .then(|| state.credential.as_ref().map(|c| c.identity.clone()))
        };
        let subscription = self.listeners.subscribe(listener.clone());
        if let Some(identity) = replay {
            listener(identity);
        }
        subscription
    }

    async fn get_token(&self, identity: &Identity) -> Result<String, IdentityError> {
        let credential = self.credential_for(identity)?;
        if credential.expires_at_ms - (self.clock)() > REFRESH_MARGIN_MS {
            return Ok(credential.id_token);
        }

        log::debug!("refreshing id token for {}", identity.id);
        let fresh = self.refresh(&credential).await?;
        {
            let mut state = self.lock();
            // Only store it if the same user is still signed in.
            match state.credential.as_ref() {
                Some(current) if current.identity.id == identity.id => {
                    state.credential = Some(fresh.clone());
                }
                _ => return Err(IdentityError::from_code("USER_NOT_SIGNED_IN")),
            }
        }
        self.persist(Some(&fresh));
        Ok(fresh.id_token)
    }
}
