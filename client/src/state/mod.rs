//! Shared client state provided through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` wires the coordinator to browser adapters and mirrors its
//! session stream into a signal. `trips` holds screen-local list and form
//! state for the trip pages.

pub mod auth;
pub mod trips;
