//! Trip detail page (`/trips/:id`).
//!
//! SYSTEM CONTEXT
//! ==============
//! Shows one trip with its destinations. Destinations are added, edited and
//! removed inline; the trip itself is edited on its own form page and can be
//! deleted from here after a second confirming click.
//!
//! ERROR HANDLING
//! ==============
//! A failed load replaces the page body with the message. Failed mutations
//! leave the loaded data in place and show the message above the list.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;
use session::types::format_trip_date;

use crate::components::guard::LoadingScreen;
use crate::net::trips::{delete_destination, delete_trip, load_trip_details, save_destination};
use crate::state::auth::use_session;
use crate::state::trips::{DestinationFormState, TripDetailState};
use crate::util::nav::navigation_request;

#[component]
pub fn TripDetailPage() -> impl IntoView {
    let handle = use_session();
    let params = use_params_map();
    let go_to = navigation_request();

    let trip_id = params.read_untracked().get("id").unwrap_or_default();
    let detail = RwSignal::new(TripDetailState { loading: true, ..TripDetailState::default() });
    let dest_form = RwSignal::new(DestinationFormState::default());
    let action_error = RwSignal::new(None::<String>);
    let confirm_delete = RwSignal::new(false);

    {
        let coordinator = handle.coordinator.clone();
        let id = trip_id.clone();
        Effect::new(move || {
            let coordinator = coordinator.clone();
            let id = id.clone();
            leptos::task::spawn_local(async move {
                let result = load_trip_details(&coordinator, &id).await;
                detail.update(|d| d.finish_load(result));
            });
        });
    }

    let on_save_destination = {
        let coordinator = handle.coordinator.clone();
        let trip_id = trip_id.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let form = dest_form.get_untracked();
            let input = match form.to_input(&trip_id) {
                Ok(input) => input,
                Err(message) => {
                    dest_form.update(|f| f.error = Some(message));
                    return;
                }
            };
            let coordinator = coordinator.clone();
            leptos::task::spawn_local(async move {
                match save_destination(&coordinator, form.editing.as_deref(), &input).await {
                    Ok(saved) => {
                        detail.update(|d| d.upsert_destination(saved));
                        dest_form.set(DestinationFormState::default());
                    }
                    Err(message) => dest_form.update(|f| f.error = Some(message)),
                }
            });
        }
    };

    let on_delete_destination = {
        let coordinator = handle.coordinator.clone();
        move |id: String| {
            let coordinator = coordinator.clone();
            leptos::task::spawn_local(async move {
                match delete_destination(&coordinator, &id).await {
                    Ok(()) => {
                        detail.update(|d| d.remove_destination(&id));
                        action_error.set(None);
                    }
                    Err(message) => action_error.set(Some(message)),
                }
            });
        }
    };

    let on_delete_trip = {
        let coordinator = handle.coordinator.clone();
        let id = trip_id.clone();
        move |_: leptos::ev::MouseEvent| {
            if !confirm_delete.get_untracked() {
                confirm_delete.set(true);
                return;
            }
            let coordinator = coordinator.clone();
            let id = id.clone();
            leptos::task::spawn_local(async move {
                match delete_trip(&coordinator, &id).await {
                    Ok(()) => go_to.set(Some("/dashboard".to_owned())),
                    Err(message) => {
                        confirm_delete.set(false);
                        action_error.set(Some(message));
                    }
                }
            });
        }
    };

    let edit_href = format!("/trips/{trip_id}/edit");

    view! {
        <div class="trip-detail-page">
            {move || {
                let state = detail.get();
                if state.loading {
                    return view! { <LoadingScreen/> }.into_any();
                }
                let Some(trip) = state.trip else {
                    let message = state.error.unwrap_or_else(|| "Not found.".to_owned());
                    return view! {
                        <div class="trip-detail-page__error">
                            <p class="alert alert--danger">{message}</p>
                            <A href="/dashboard" attr:class="btn">"Back to Dashboard"</A>
                        </div>
                    }
                        .into_any();
                };
                let dates = format!("{} - {}", format_trip_date(&trip.start_date), format_trip_date(&trip.end_date));
                let remove = on_delete_destination.clone();
                view! {
                    <header class="trip-detail-page__header">
                        {trip
                            .image_url
                            .clone()
                            .map(|src| view! { <img class="trip-detail-page__image" src=src alt=trip.title.clone()/> })}
                        <h2>{trip.title.clone()}</h2>
                        <p>"📍 " {format!("{}, {}", trip.city, trip.country)}</p>
                        <p>"📅 " {dates}</p>
                    </header>
                    <section class="trip-detail-page__destinations">
                        <h3>"Destinations"</h3>
                        {state
                            .destinations
                            .is_empty()
                            .then(|| view! { <p class="muted">"No destinations yet. Add one below."</p> })}
                        <ul class="destination-list">
                            {state
                                .destinations
                                .into_iter()
                                .map(|destination| {
                                    let remove = remove.clone();
                                    let id = destination.id.clone();
                                    let editing = destination.clone();
                                    view! {
                                        <li class="destination-list__item">
                                            <div>
                                                <strong>{destination.name}</strong>
                                                <p>{destination.description}</p>
                                            </div>
                                            <div class="destination-list__actions">
                                                <button
                                                    class="btn btn--small"
                                                    on:click=move |_| dest_form.set(DestinationFormState::edit(&editing))
                                                >
                                                    "Edit"
                                                </button>
                                                <button
                                                    class="btn btn--small btn--danger"
                                                    on:click=move |_| remove(id.clone())
                                                >
                                                    "Remove"
                                                </button>
                                            </div>
                                        </li>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </ul>
                    </section>
                }
                    .into_any()
            }}

            <Show when=move || action_error.get().is_some()>
                <p class="alert alert--danger">{move || action_error.get().unwrap_or_default()}</p>
            </Show>

            <Show when=move || detail.with(|d| d.trip.is_some())>
                <form class="destination-form" on:submit=on_save_destination.clone()>
                    <h4>
                        {move || {
                            if dest_form.with(|f| f.editing.is_some()) { "Edit Destination" } else { "Add Destination" }
                        }}
                    </h4>
                    <Show when=move || dest_form.with(|f| f.error.is_some())>
                        <p class="alert alert--danger">{move || dest_form.get().error.unwrap_or_default()}</p>
                    </Show>
                    <input
                        class="dialog__input"
                        type="text"
                        placeholder="Name"
                        prop:value=move || dest_form.get().name
                        on:input=move |ev| dest_form.update(|f| f.name = event_target_value(&ev))
                    />
                    <textarea
                        class="dialog__input"
                        placeholder="Description"
                        prop:value=move || dest_form.get().description
                        on:input=move |ev| dest_form.update(|f| f.description = event_target_value(&ev))
                    ></textarea>
                    <div class="destination-form__actions">
                        <Show when=move || dest_form.with(|f| f.editing.is_some())>
                            <button
                                class="btn"
                                type="button"
                                on:click=move |_| dest_form.set(DestinationFormState::default())
                            >
                                "Cancel"
                            </button>
                        </Show>
                        <button class="btn btn--primary" type="submit">
                            {move || if dest_form.with(|f| f.editing.is_some()) { "Update" } else { "Add" }}
                        </button>
                    </div>
                </form>
                <div class="trip-detail-page__actions">
                    <A href=edit_href.clone() attr:class="btn">"Edit Trip"</A>
                    <button class="btn btn--danger" on:click=on_delete_trip.clone()>
                        {move || if confirm_delete.get() { "Click again to delete" } else { "Delete Trip" }}
                    </button>
                </div>
            </Show>
        </div>
    }
}
