//! Build-time client configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The WASM bundle cannot read the process environment at runtime, so values
//! are captured when the crate is compiled (`TRIPS_API_URL=... cargo leptos
//! build`). Missing values fall back to local-development defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Backend base URL, trailing slash removed.
pub fn api_base_url() -> String {
    session::api::resolve_base_url(option_env!("TRIPS_API_URL"))
}

/// Firebase Web API key; empty when not configured.
pub fn firebase_api_key() -> String {
    firebase_key_from(option_env!("FIREBASE_API_KEY"))
}

fn firebase_key_from(raw: Option<&str>) -> String {
    let key = raw.map(str::trim).unwrap_or_default();
    if key.is_empty() {
        log::warn!("FIREBASE_API_KEY was not set at build time; sign-in will fail");
    }
    key.to_owned()
}
