//! Browser networking and persistence adapters.
//!
//! SYSTEM CONTEXT
//! ==============
//! `browser` implements the `session` crate's transport, storage and
//! navigation seams on top of `gloo-net` and `web-sys`; `trips` wraps the
//! authorized API calls the pages make. Under SSR the browser adapters
//! compile to inert stubs so the app tree can render on the server.

pub mod browser;
pub mod trips;
