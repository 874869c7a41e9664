//! Dashboard page listing the signed-in user's trips.
//!
//! SYSTEM CONTEXT
//! ==============
//! The authenticated landing route. Trips load once on mount through an
//! authorized API client. "Try again" after a failure repeats ensure-user
//! before reloading, which repairs a backend record that a failed signup
//! sync left missing.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::guard::LoadingScreen;
use crate::components::trip_card::TripCard;
use crate::net::trips::load_trips;
use crate::state::auth::use_session;
use crate::state::trips::TripsState;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let handle = use_session();
    let trips = RwSignal::new(TripsState { loading: true, ..TripsState::default() });

    let load = {
        let coordinator = handle.coordinator.clone();
        move |resync: bool| {
            let coordinator = coordinator.clone();
            trips.update(TripsState::begin_load);
            leptos::task::spawn_local(async move {
                if resync {
                    if let Err(e) = coordinator.retry_backend_sync().await {
                        log::warn!("backend sync retry failed: {e}");
                    }
                }
                let result = load_trips(&coordinator).await;
                trips.update(|s| s.finish_load(result));
            });
        }
    };

    // Effects only run in the browser, so SSR never issues the request.
    let initial = load.clone();
    Effect::new(move || initial(false));

    view! {
        <div class="dashboard-page">
            <h2 class="dashboard-page__title">"My Trips"</h2>
            {move || {
                let state = trips.get();
                if state.loading {
                    return view! { <LoadingScreen/> }.into_any();
                }
                if let Some(error) = state.error {
                    let retry = load.clone();
                    return view! {
                        <div class="dashboard-page__error">
                            <p class="alert alert--danger">{error}</p>
                            <button class="btn" on:click=move |_| retry(true)>
                                "Try again"
                            </button>
                        </div>
                    }
                        .into_any();
                }
                if state.items.is_empty() {
                    return view! {
                        <div class="dashboard-page__empty">
                            <p>"You haven't created any trips yet."</p>
                            <A href="/trips/new" attr:class="btn btn--primary">
                                "Create Your First Trip"
                            </A>
                        </div>
                    }
                        .into_any();
                }
                view! {
                    <div class="trip-grid">
                        {state
                            .items
                            .into_iter()
                            .map(|trip| {
                                let href = format!("/trips/{}", trip.id);
                                view! { <TripCard trip=trip href=href/> }
                            })
                            .collect::<Vec<_>>()}
                    </div>
                }
                    .into_any()
            }}
        </div>
    }
}
