//! Create (`/trips/new`) and edit (`/trips/:id/edit`) trip form.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;
use session::types::TripInput;

use crate::components::guard::LoadingScreen;
use crate::net::trips::{load_trip, save_trip};
use crate::state::auth::use_session;
use crate::state::trips::TripFormState;
use crate::util::nav::navigation_request;

#[component]
pub fn TripFormPage() -> impl IntoView {
    let handle = use_session();
    let params = use_params_map();
    let go_to = navigation_request();

    let trip_id = params.read_untracked().get("id");
    let form = RwSignal::new(TripFormState::default());
    let loading = RwSignal::new(trip_id.is_some());

    if let Some(id) = trip_id.clone() {
        let coordinator = handle.coordinator.clone();
        Effect::new(move || {
            let coordinator = coordinator.clone();
            let id = id.clone();
            leptos::task::spawn_local(async move {
                match load_trip(&coordinator, &id).await {
                    Ok(trip) => form.set(TripFormState::editing(&trip)),
                    Err(message) => form.update(|f| f.error = Some(message)),
                }
                loading.set(false);
            });
        });
    }

    let coordinator = handle.coordinator.clone();
    let submit_id = trip_id.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if form.get_untracked().saving {
            return;
        }
        let Some(input) = form
            .try_update(TripFormState::begin_submit)
            .and_then(Result::ok)
        else {
            return;
        };
        let coordinator = coordinator.clone();
        let id = submit_id.clone();
        leptos::task::spawn_local(async move {
            let result = save_trip(&coordinator, id.as_deref(), &input).await;
            if let Some(saved) = form.try_update(|f| f.finish_submit(result)).flatten() {
                go_to.set(Some(format!("/trips/{}", saved.id)));
            }
        });
    };

    let editing = trip_id.is_some();
    let cancel_href = trip_id.map_or_else(|| "/dashboard".to_owned(), |id| format!("/trips/{id}"));
    let saving = move || form.get().saving;

    view! {
        <div class="trip-form-page">
            <h2>{if editing { "Edit Trip" } else { "Create New Trip" }}</h2>
            <Show when=move || !loading.get() fallback=|| view! { <LoadingScreen/> }>
                <Show when=move || form.get().error.is_some()>
                    <p class="alert alert--danger">{move || form.get().error.unwrap_or_default()}</p>
                </Show>
                <form class="trip-form" on:submit=on_submit.clone()>
                    <TripField form=form label="Title" read=|i| i.title.clone() write=|i, v| i.title = v/>
                    <TripField form=form label="City" read=|i| i.city.clone() write=|i, v| i.city = v/>
                    <TripField form=form label="Country" read=|i| i.country.clone() write=|i, v| i.country = v/>
                    <TripField
                        form=form
                        label="Start Date"
                        kind="date"
                        read=|i| i.start_date.clone()
                        write=|i, v| i.start_date = v
                    />
                    <TripField
                        form=form
                        label="End Date"
                        kind="date"
                        read=|i| i.end_date.clone()
                        write=|i, v| i.end_date = v
                    />
                    <TripField
                        form=form
                        label="Image URL"
                        kind="url"
                        read=|i| i.image_url.clone().unwrap_or_default()
                        write=|i, v| i.image_url = Some(v)
                    />
                    <div class="trip-form__actions">
                        <A href=cancel_href.clone() attr:class="btn">"Cancel"</A>
                        <button class="btn btn--primary" type="submit" disabled=saving>
                            {move || if saving() { "Saving..." } else { "Save Trip" }}
                        </button>
                    </div>
                </form>
            </Show>
        </div>
    }
}

#[component]
fn TripField(
    form: RwSignal<TripFormState>,
    label: &'static str,
    #[prop(default = "text")] kind: &'static str,
    read: fn(&TripInput) -> String,
    write: fn(&mut TripInput, String),
) -> impl IntoView {
    view! {
        <label class="dialog__label">
            {label}
            <input
                class="dialog__input"
                type=kind
                disabled=move || form.get().saving
                prop:value=move || read(&form.get().input)
                on:input=move |ev| form.update(|f| write(&mut f.input, event_target_value(&ev)))
            />
        </label>
    }
}
