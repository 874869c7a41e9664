//! Scripted fakes for the transport, navigator and identity-provider seams.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::api::{ApiClient, Navigator};
use crate::http::{HttpRequest, HttpResponse, HttpTransport, Method};
use crate::identity::{Identity, IdentityError, IdentityListener, IdentityProvider, Listeners, Subscription};
use crate::storage::{MemoryStorage, TokenStore};

pub const TEST_API_URL: &str = "http://api.test";

// =========================================================================
// MockTransport
// =========================================================================

type SendHook = Box<dyn Fn(&HttpRequest) + Send>;

/// Replays queued responses in order; answers `200 {}` once the queue is empty.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, String>>>,
    requests: Mutex<Vec<HttpRequest>>,
    on_send: Mutex<Option<SendHook>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    pub fn push_json(&self, status: u16, body: &serde_json::Value) {
        self.push(status, &body.to_string());
    }

    pub fn push_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_owned()));
    }

    /// Run `hook` for every request as it arrives, before it is answered.
    pub fn on_send(&self, hook: impl Fn(&HttpRequest) + Send + 'static) {
        *self.on_send.lock().unwrap() = Some(Box::new(hook));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }
}

#[async_trait::async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        if let Some(hook) = self.on_send.lock().unwrap().as_ref() {
            hook(&request);
        }
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(200, "{}")))
    }
}

// =========================================================================
// RecordingNavigator
// =========================================================================

#[derive(Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn hard_navigate(&self, path: &str) {
        self.visits.lock().unwrap().push(path.to_owned());
    }
}

// =========================================================================
// ApiClient fixture
// =========================================================================

pub struct ApiFixture {
    pub transport: Arc<MockTransport>,
    pub navigator: Arc<RecordingNavigator>,
    pub storage: Arc<MemoryStorage>,
    pub tokens: TokenStore,
}

impl ApiFixture {
    pub fn new() -> Self {
        let storage = Arc::new(MemoryStorage::new());
        Self {
            transport: MockTransport::new(),
            navigator: RecordingNavigator::new(),
            tokens: TokenStore::new(storage.clone()),
            storage,
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(TEST_API_URL, self.transport.clone(), self.tokens.clone(), self.navigator.clone())
    }

    pub fn ensure_user_calls(&self) -> usize {
        self.transport
            .count(Method::Post, &format!("{TEST_API_URL}/api/users"))
    }
}

// =========================================================================
// MockIdentity
// =========================================================================

struct Account {
    password: String,
    identity: Identity,
}

#[derive(Default)]
struct MockIdentityState {
    accounts: HashMap<String, Account>,
    current: Option<Identity>,
    restored: bool,
}

/// In-memory identity provider with Firebase-like error codes.
#[derive(Default)]
pub struct MockIdentity {
    state: Mutex<MockIdentityState>,
    listeners: Listeners,
    next_uid: AtomicUsize,
    tokens_issued: AtomicUsize,
}

impl MockIdentity {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Provider whose initial check already completed with no user.
    pub fn restored() -> Arc<Self> {
        let provider = Self::new();
        provider.state.lock().unwrap().restored = true;
        provider
    }

    pub fn with_account(self: Arc<Self>, email: &str, password: &str, name: Option<&str>) -> Arc<Self> {
        let identity = Identity {
            id: format!("uid-{email}"),
            email: email.to_owned(),
            display_name: name.map(str::to_owned),
        };
        self.state
            .lock()
            .unwrap()
            .accounts
            .insert(email.to_owned(), Account { password: password.to_owned(), identity });
        self
    }

    /// Finish the initial check with `identity` and notify subscribers.
    pub fn resolve_initial(&self, identity: Option<Identity>) {
        {
            let mut state = self.state.lock().unwrap();
            state.current = identity.clone();
            state.restored = true;
        }
        self.listeners.notify(identity.as_ref());
    }

    /// Re-announce the current identity, as providers do after a token refresh.
    pub fn reannounce(&self) {
        let current = self.state.lock().unwrap().current.clone();
        self.listeners.notify(current.as_ref());
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn tokens_issued(&self) -> usize {
        self.tokens_issued.load(Ordering::SeqCst)
    }

    fn establish(&self, identity: Identity) -> Identity {
        self.state.lock().unwrap().current = Some(identity.clone());
        self.listeners.notify(Some(&identity));
        identity
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityProvider for MockIdentity {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, IdentityError> {
        let identity = {
            let mut state = self.state.lock().unwrap();
            if !email.contains('@') {
                return Err(IdentityError::from_code("INVALID_EMAIL"));
            }
            if state.accounts.contains_key(email) {
                return Err(IdentityError::from_code("EMAIL_EXISTS"));
            }
            if password.len() < 6 {
                return Err(IdentityError::from_code("WEAK_PASSWORD : Password should be at least 6 characters"));
            }
            let n = self.next_uid.fetch_add(1, Ordering::SeqCst);
            let identity = Identity { id: format!("new-{n}"), email: email.to_owned(), display_name: None };
            state
                .accounts
                .insert(email.to_owned(), Account { password: password.to_owned(), identity: identity.clone() });
            identity
        };
        Ok(self.establish(identity))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, IdentityError> {
        let identity = {
            let state = self.state.lock().unwrap();
            let Some(account) = state.accounts.get(email) else {
                return Err(IdentityError::from_code("EMAIL_NOT_FOUND"));
            };
            if account.password != password {
                return Err(IdentityError::from_code("INVALID_PASSWORD"));
            }
            account.identity.clone()
        };
        Ok(self.establish(identity))
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        self.state.lock().unwrap().current = None;
        self.listeners.notify(None);
        Ok(())
    }

    async fn update_display_name(&self, identity: &Identity, name: &str) -> Result<(), IdentityError> {
        let renamed = Identity { display_name: Some(name.to_owned()), ..identity.clone() };
        {
            let mut state = self.state.lock().unwrap();
            if let Some(account) = state.accounts.get_mut(&identity.email) {
                account.identity = renamed.clone();
            }
            state.current = Some(renamed.clone());
        }
        self.listeners.notify(Some(&renamed));
        Ok(())
    }

    fn subscribe(&self, listener: IdentityListener) -> Subscription {
        let replay = {
            let state = self.state.lock().unwrap();
            state.restored.then(|| state.current.clone())
        };
        let subscription = self.listeners.subscribe(listener.clone());
        if let Some(current) = replay {
            listener(current);
        }
        subscription
    }

    async fn get_token(&self, identity: &Identity) -> Result<String, IdentityError> {
        let current = self.state.lock().unwrap().current.clone();
        if current.as_ref().map(|c| &c.id) != Some(&identity.id) {
            return Err(IdentityError::from_code("USER_NOT_SIGNED_IN"));
        }
        let n = self.tokens_issued.fetch_add(1, Ordering::SeqCst);
        Ok(format!("token-{}-{n}", identity.id))
    }
}
