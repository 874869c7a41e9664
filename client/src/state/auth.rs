//! Session context: one coordinator per app, mirrored into a signal.
//!
//! ARCHITECTURE
//! ============
//! `SessionHandle::install` builds the Firebase adapter and API client over
//! the browser adapters, wraps them in a `SessionCoordinator`, and provides
//! the handle as context. In the browser a local task drains
//! `observe_session()` into `RwSignal<Session>` and a second task runs the
//! adapter's `restore()`. On the server neither task runs, so SSR always
//! renders the `Loading` state and hydration starts from the same markup.

use std::sync::Arc;

use leptos::prelude::*;
use session::firebase::{FirebaseConfig, FirebaseIdentity};
use session::storage::TokenStore;
use session::{ApiClient, Session, SessionCoordinator};

use crate::config;
use crate::net::browser::{BrowserNavigator, BrowserTransport, browser_clock, browser_storage};

#[derive(Clone)]
pub struct SessionHandle {
    pub coordinator: Arc<SessionCoordinator>,
    pub session: RwSignal<Session>,
}

impl SessionHandle {
    /// Build the coordinator, start mirroring it, and provide it as context.
    pub fn install() -> Self {
        let transport = Arc::new(BrowserTransport);
        let storage = browser_storage();
        let provider = Arc::new(FirebaseIdentity::new(
            FirebaseConfig::new(config::firebase_api_key()),
            transport.clone(),
            storage.clone(),
            browser_clock(),
        ));
        let api = ApiClient::new(&config::api_base_url(), transport, TokenStore::new(storage), Arc::new(BrowserNavigator));
        let coordinator = Arc::new(SessionCoordinator::new(provider.clone(), api));
        let session = RwSignal::new(coordinator.current());

        #[cfg(feature = "hydrate")]
        {
            use futures::StreamExt;

            let mut stream = coordinator.observe_session();
            leptos::task::spawn_local(async move {
                while let Some(next) = stream.next().await {
                    session.set(next);
                }
            });
            leptos::task::spawn_local(async move {
                provider.restore().await;
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = provider;
        }

        let handle = Self { coordinator, session };
        provide_context(handle.clone());
        handle
    }
}

/// The handle provided by `App`.
pub fn use_session() -> SessionHandle {
    expect_context::<SessionHandle>()
}
