//! Router navigation requested from async tasks.
//!
//! SYSTEM CONTEXT
//! ==============
//! Login, logout and save handlers finish inside `spawn_local` tasks. They
//! write the target path into a signal, and an effect owned by the
//! component performs the client-side navigation.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

/// Signal that navigates to its value whenever it is set to `Some`.
pub fn navigation_request() -> RwSignal<Option<String>> {
    let target = RwSignal::new(None::<String>);
    let navigate = use_navigate();
    Effect::new(move || {
        if let Some(path) = target.get() {
            target.set(None);
            navigate(&path, NavigateOptions::default());
        }
    });
    target
}
