//! `HttpTransport`, `Storage` and `Navigator` for the browser.
//!
//! Client-side (hydrate): `gloo-net` fetch, `window.localStorage`, and
//! `window.location`.
//! Server-side (SSR): requests fail with "not available on server", storage
//! is empty, navigation is logged and dropped.
//!
//! TRADE-OFFS
//! ==========
//! `web_sys` handles are not `Send`, so each call looks the window up again
//! instead of caching it in the adapter.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "browser_test.rs"]
mod browser_test;

use std::sync::Arc;

use session::api::Navigator;
use session::firebase::Clock;
use session::http::{HttpRequest, HttpResponse, HttpTransport};
use session::storage::Storage;

/// Fetch-based transport.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[async_trait::async_trait(?Send)]
impl HttpTransport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::{Method, RequestBuilder};

            let method = match request.method {
                session::http::Method::Get => Method::GET,
                session::http::Method::Post => Method::POST,
                session::http::Method::Put => Method::PUT,
                session::http::Method::Delete => Method::DELETE,
            };
            let mut builder = RequestBuilder::new(&request.url).method(method);
            if let Some(authorization) = request.authorization() {
                builder = builder.header("Authorization", &authorization);
            }
            let req = match &request.body {
                Some(body) => builder.json(body).map_err(|e| e.to_string())?,
                None => builder.build().map_err(|e| e.to_string())?,
            };
            let resp = req.send().await.map_err(|e| e.to_string())?;
            let status = resp.status();
            let body = resp.text().await.map_err(|e| e.to_string())?;
            Ok(HttpResponse::new(status, body))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err("not available on server".to_owned())
        }
    }
}

/// `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                warn_on_err(&format!("localStorage write of {key}"), storage.set_item(key, value));
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            match local_storage() {
                Some(storage) => {
                    warn_on_err(&format!("localStorage removal of {key}"), storage.remove_item(key));
                }
                None => log::warn!("localStorage unavailable; {key} not removed"),
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// Full page loads through `window.location`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn hard_navigate(&self, path: &str) {
        #[cfg(feature = "hydrate")]
        {
            match web_sys::window() {
                Some(window) => {
                    warn_on_err(&format!("navigation to {path}"), window.location().set_href(path));
                }
                None => log::warn!("no window; navigation to {path} dropped"),
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            log::debug!("ignoring navigation to {path} outside the browser");
        }
    }
}

/// Log a failed browser call. Returns whether it succeeded.
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
pub(crate) fn warn_on_err<E: std::fmt::Debug>(what: &str, result: Result<(), E>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            log::warn!("{what} failed: {e:?}");
            false
        }
    }
}

/// Wall clock for token expiry checks.
#[cfg_attr(feature = "hydrate", allow(clippy::cast_possible_truncation))]
pub fn browser_clock() -> Clock {
    #[cfg(feature = "hydrate")]
    {
        Arc::new(|| js_sys::Date::now() as i64)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        session::firebase::system_clock()
    }
}

/// Storage handle shared by the token store and the identity adapter.
pub fn browser_storage() -> Arc<dyn Storage> {
    Arc::new(LocalStorage)
}
