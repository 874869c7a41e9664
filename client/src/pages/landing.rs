//! Public landing page: hero, how-it-works, demo trips, and the auth modal.
//!
//! `/login` and `/register` render this same page and open the app-wide
//! auth modal in the matching mode once hydrated.

#[cfg(test)]
#[path = "landing_test.rs"]
mod landing_test;

use leptos::prelude::*;
use session::form::AuthMode;
use session::types::Trip;

use crate::components::auth_modal::use_auth_dialog;
use crate::components::trip_card::TripCard;

/// Sample trip shown to signed-out visitors.
pub(crate) struct DemoTrip {
    pub trip: Trip,
    pub destinations: [(&'static str, &'static str); 3],
}

fn demo(id: &str, title: &str, city: &str, country: &str, dates: (&str, &str), image: &str) -> Trip {
    Trip {
        id: id.to_owned(),
        title: title.to_owned(),
        country: country.to_owned(),
        city: city.to_owned(),
        start_date: dates.0.to_owned(),
        end_date: dates.1.to_owned(),
        image_url: Some(image.to_owned()),
    }
}

pub(crate) fn demo_trips() -> Vec<DemoTrip> {
    vec![
        DemoTrip {
            trip: demo(
                "demo-1",
                "Tokyo Adventure",
                "Tokyo",
                "Japan",
                ("2024-04-15", "2024-04-22"),
                "https://images.unsplash.com/photo-1540959733332-eab4deabeeaf?w=500&h=300&fit=crop",
            ),
            destinations: [
                ("Shibuya Crossing", "Famous intersection"),
                ("Tokyo Tower", "Iconic landmark"),
                ("Tsukiji Fish Market", "Fresh sushi experience"),
            ],
        },
        DemoTrip {
            trip: demo(
                "demo-2",
                "European Getaway",
                "Paris",
                "France",
                ("2024-06-10", "2024-06-17"),
                "https://images.unsplash.com/photo-1502602898536-47ad22581b52?w=500&h=300&fit=crop",
            ),
            destinations: [
                ("Eiffel Tower", "Iron lattice tower"),
                ("Louvre Museum", "World's largest art museum"),
                ("Notre-Dame Cathedral", "Gothic architecture"),
            ],
        },
        DemoTrip {
            trip: demo(
                "demo-3",
                "Tropical Paradise",
                "Phuket",
                "Thailand",
                ("2024-08-05", "2024-08-12"),
                "https://images.unsplash.com/photo-1589394815804-964ed0be2eb5?w=500&h=300&fit=crop",
            ),
            destinations: [
                ("Phi Phi Islands", "Crystal clear waters"),
                ("Big Buddha", "Massive statue overlooking the island"),
                ("Patong Beach", "Vibrant nightlife and beach"),
            ],
        },
    ]
}

const FEATURES: [(&str, &str, &str); 3] = [
    ("📅", "Plan Your Trip", "Set dates, destinations, and create your travel timeline"),
    ("🗺", "Add Destinations", "Build your itinerary with places you want to visit"),
    ("📷", "Capture Memories", "Save photos and notes from your adventures"),
];

#[component]
pub fn LandingPage(
    /// Open the auth modal immediately in this mode.
    #[prop(optional)]
    mode: Option<AuthMode>,
) -> impl IntoView {
    let dialog = use_auth_dialog();
    if let Some(mode) = mode {
        Effect::new(move || dialog.open(mode));
    }
    let open = move |next: AuthMode| dialog.open(next);

    view! {
        <div class="landing-page">
            <section class="hero">
                <div class="hero__text">
                    <h1>"Your Perfect Trip Companion"</h1>
                    <p class="lead">
                        "Plan, organize, and track your adventures with ease. Create detailed itineraries, save destinations, and capture memories all in one place."
                    </p>
                    <div class="hero__actions">
                        <button class="btn btn--light btn--large" on:click=move |_| open(AuthMode::Signup)>
                            "+ Start Planning"
                        </button>
                        <button class="btn btn--outline-light btn--large" on:click=move |_| open(AuthMode::Login)>
                            "Sign In"
                        </button>
                    </div>
                </div>
                <img
                    class="hero__image"
                    src="https://images.unsplash.com/photo-1488646953014-85cb44e25828?w=600&h=400&fit=crop"
                    alt="Travel planning"
                />
            </section>

            <section class="features">
                <h2>"How It Works"</h2>
                <p class="lead">"See how easy it is to plan your perfect trip"</p>
                <div class="features__grid">
                    {FEATURES
                        .iter()
                        .map(|(icon, title, text)| {
                            view! {
                                <div class="feature">
                                    <div class="feature__icon">{*icon}</div>
                                    <h4>{*title}</h4>
                                    <p>{*text}</p>
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()}
                </div>
            </section>

            <section class="demo">
                <h2>"See It In Action"</h2>
                <p class="lead">"Here's what your travel dashboard could look like"</p>
                <div class="trip-grid">
                    {demo_trips()
                        .into_iter()
                        .map(|demo| {
                            view! {
                                <TripCard trip=demo.trip>
                                    <h6>"Destinations:"</h6>
                                    <ul class="trip-card__destinations">
                                        {demo
                                            .destinations
                                            .iter()
                                            .map(|(name, description)| {
                                                view! {
                                                    <li>
                                                        <span class="badge badge--light">{*name}</span>
                                                        <small>{*description}</small>
                                                    </li>
                                                }
                                            })
                                            .collect::<Vec<_>>()}
                                    </ul>
                                </TripCard>
                            }
                        })
                        .collect::<Vec<_>>()}
                </div>
            </section>

        </div>
    }
}
