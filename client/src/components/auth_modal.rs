//! Sign-in / sign-up modal.
//!
//! DESIGN
//! ======
//! The modal binds inputs to signals and renders labels from `AuthMode`.
//! Validation, submission and error wording are `session::form`, so what
//! the user sees on failure is decided outside the view code.
//!
//! It is mounted once by `App`, outside the routes. A login whose backend
//! sync fails still signs the user in, and the anonymous guard then leaves
//! the landing page; the modal stays open over the next route so its inline
//! message remains visible.

use leptos::prelude::*;
use session::form::{AuthFields, AuthFormState, AuthMode, submit_auth};
use session::guard::DASHBOARD_ROUTE;

use crate::state::auth::use_session;
use crate::util::nav::navigation_request;

/// Visibility and mode of the app-wide auth modal, provided as context.
#[derive(Clone, Copy)]
pub struct AuthDialog {
    pub show: RwSignal<bool>,
    pub mode: RwSignal<AuthMode>,
}

impl AuthDialog {
    pub fn provide() -> Self {
        let dialog = Self { show: RwSignal::new(false), mode: RwSignal::new(AuthMode::default()) };
        provide_context(dialog);
        dialog
    }

    pub fn open(self, mode: AuthMode) {
        self.mode.set(mode);
        self.show.set(true);
    }
}

pub fn use_auth_dialog() -> AuthDialog {
    expect_context::<AuthDialog>()
}

#[component]
pub fn AuthModal() -> impl IntoView {
    let AuthDialog { show, mode } = use_auth_dialog();
    let handle = use_session();
    let go_to = navigation_request();

    let fields = RwSignal::new(AuthFields::new(mode.get_untracked()));
    let form = RwSignal::new(AuthFormState::default());

    let reset = move || {
        fields.set(AuthFields::new(mode.get_untracked()));
        form.set(AuthFormState::default());
    };

    let close = move |_| {
        reset();
        show.set(false);
    };

    let switch_mode = move |_| {
        mode.update(|m| *m = m.toggled());
        reset();
    };

    let coordinator = handle.coordinator.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if form.get_untracked().busy {
            return;
        }
        let submitted = AuthFields { mode: mode.get_untracked(), ..fields.get_untracked() };
        form.update(AuthFormState::begin);

        let coordinator = coordinator.clone();
        leptos::task::spawn_local(async move {
            let result = submit_auth(&coordinator, &submitted).await;
            let succeeded = form.try_update(|f| f.finish(result)).unwrap_or(false);
            if succeeded {
                reset();
                show.set(false);
                go_to.set(Some(DASHBOARD_ROUTE.to_owned()));
            }
        });
    };

    let busy = move || form.get().busy;
    let is_signup = move || mode.get() == AuthMode::Signup;

    view! {
        <Show when=move || show.get()>
            <div class="dialog-backdrop">
                <div class="dialog auth-modal" role="dialog" aria-modal="true">
                    <header class="dialog__header">
                        <h2>{move || mode.get().title()}</h2>
                        <button class="dialog__close" aria-label="Close" on:click=close disabled=busy>
                            "✕"
                        </button>
                    </header>

                    <Show when=move || form.get().error.is_some()>
                        <p class="alert alert--danger">{move || form.get().error.unwrap_or_default()}</p>
                    </Show>

                    <form class="auth-form" on:submit=on_submit.clone()>
                        <Show when=is_signup>
                            <label class="dialog__label">
                                "Full Name"
                                <input
                                    class="dialog__input"
                                    type="text"
                                    placeholder="Enter your full name"
                                    required
                                    disabled=busy
                                    prop:value=move || fields.get().name
                                    on:input=move |ev| fields.update(|f| f.name = event_target_value(&ev))
                                />
                            </label>
                        </Show>
                        <label class="dialog__label">
                            "Email Address"
                            <input
                                class="dialog__input"
                                type="email"
                                placeholder="Enter your email"
                                required
                                disabled=busy
                                prop:value=move || fields.get().email
                                on:input=move |ev| fields.update(|f| f.email = event_target_value(&ev))
                            />
                        </label>
                        <label class="dialog__label">
                            "Password"
                            <input
                                class="dialog__input"
                                type="password"
                                placeholder="Enter your password"
                                required
                                disabled=busy
                                prop:value=move || fields.get().password
                                on:input=move |ev| fields.update(|f| f.password = event_target_value(&ev))
                            />
                        </label>
                        <Show when=is_signup>
                            <small class="dialog__hint">"Password must be at least 6 characters long."</small>
                            <label class="dialog__label">
                                "Confirm Password"
                                <input
                                    class="dialog__input"
                                    type="password"
                                    placeholder="Confirm your password"
                                    required
                                    disabled=busy
                                    prop:value=move || fields.get().confirm_password
                                    on:input=move |ev| {
                                        fields.update(|f| f.confirm_password = event_target_value(&ev));
                                    }
                                />
                            </label>
                        </Show>
                        <button class="btn btn--primary btn--block" type="submit" disabled=busy>
                            {move || {
                                let mode = mode.get();
                                if busy() { mode.busy_label() } else { mode.submit_label() }
                            }}
                        </button>
                    </form>

                    <footer class="dialog__footer">
                        {move || mode.get().switch_prompt().0}
                        " "
                        <button class="btn btn--link" on:click=switch_mode disabled=busy>
                            {move || mode.get().switch_prompt().1}
                        </button>
                    </footer>
                </div>
            </div>
        </Show>
    }
}
