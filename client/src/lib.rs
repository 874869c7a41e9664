//! # client
//!
//! Leptos + WASM frontend for Travel Companion.
//!
//! Pages, guard components, and browser adapters live here; the auth state
//! machine, API client and form logic come from the `session` crate. The
//! browser implementations in `net::browser` are plugged into its trait
//! seams when `App` builds the session coordinator.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
