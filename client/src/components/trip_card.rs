//! Card for a trip on the dashboard and the landing-page demo grid.

use leptos::prelude::*;
use session::types::{Trip, format_trip_date};

#[component]
pub fn TripCard(
    trip: Trip,
    /// Link target for "View Details"; demo cards have none.
    #[prop(optional)]
    href: Option<String>,
    /// Extra content below the dates (the demo grid lists destinations).
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView {
    let duration = trip
        .duration_days()
        .map(|days| format!("{days} days"));
    let dates = format!("{} - {}", format_trip_date(&trip.start_date), format_trip_date(&trip.end_date));
    let place = format!("{}, {}", trip.city, trip.country);

    view! {
        <article class="trip-card">
            <div class="trip-card__media">
                {trip
                    .image_url
                    .clone()
                    .map(|src| view! { <img class="trip-card__image" src=src alt=trip.title.clone()/> })}
                {duration.map(|text| view! { <span class="badge trip-card__duration">{text}</span> })}
            </div>
            <div class="trip-card__body">
                <h3 class="trip-card__title">{trip.title.clone()}</h3>
                <p class="trip-card__place">"📍 " {place}</p>
                <p class="trip-card__dates">"📅 " {dates}</p>
                {children.map(|children| children())}
                {href
                    .map(|href| {
                        view! {
                            <a class="btn btn--outline btn--small" href=href>
                                "View Details"
                            </a>
                        }
                    })}
            </div>
        </article>
    }
}
