//! Trip and destination calls for the pages.
//!
//! Every call first asks the coordinator for an authorized client, so the
//! request carries a token minted for the current identity.
//!
//! ERROR HANDLING
//! ==============
//! Failures are already logged by the API client; callers get a short
//! user-facing string. A 401 has also triggered the global redirect to
//! `/login` by the time the string arrives.

#[cfg(test)]
#[path = "trips_test.rs"]
mod trips_test;

use session::error::{ApiError, AuthError};
use session::types::{Destination, DestinationInput, Trip, TripInput};
use session::{ApiClient, SessionCoordinator};

const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";

/// User-facing message for a failed trip or destination call.
pub fn failure_message(action: &str, err: &AuthError) -> String {
    match err {
        AuthError::SignedOut | AuthError::Api(ApiError::Unauthorized) => SESSION_EXPIRED.to_owned(),
        AuthError::Api(ApiError::Status { status: 404, .. }) => "Not found.".to_owned(),
        AuthError::Api(ApiError::Network(_)) => format!("Could not {action}. Check your connection and try again."),
        _ => format!("Could not {action}. Please try again."),
    }
}

async fn authorized<'a>(coordinator: &'a SessionCoordinator, action: &str) -> Result<&'a ApiClient, String> {
    coordinator
        .authorized_api()
        .await
        .map_err(|e| failure_message(action, &e))
}

fn api_failure(action: &str, err: ApiError) -> String {
    failure_message(action, &AuthError::Api(err))
}

/// # Errors
///
/// A message describing the failure.
pub async fn load_trips(coordinator: &SessionCoordinator) -> Result<Vec<Trip>, String> {
    const ACTION: &str = "load your trips";
    authorized(coordinator, ACTION)
        .await?
        .list_trips()
        .await
        .map_err(|e| api_failure(ACTION, e))
}

/// Trip plus its destinations for the detail page.
///
/// # Errors
///
/// A message describing the failure.
pub async fn load_trip_details(coordinator: &SessionCoordinator, id: &str) -> Result<(Trip, Vec<Destination>), String> {
    const ACTION: &str = "load this trip";
    let api = authorized(coordinator, ACTION).await?;
    let trip = api.get_trip(id).await.map_err(|e| api_failure(ACTION, e))?;
    let destinations = api
        .list_destinations(id)
        .await
        .map_err(|e| api_failure(ACTION, e))?;
    Ok((trip, destinations))
}

/// # Errors
///
/// A message describing the failure.
pub async fn load_trip(coordinator: &SessionCoordinator, id: &str) -> Result<Trip, String> {
    const ACTION: &str = "load this trip";
    authorized(coordinator, ACTION)
        .await?
        .get_trip(id)
        .await
        .map_err(|e| api_failure(ACTION, e))
}

/// Create (`id == None`) or update a trip.
///
/// # Errors
///
/// A message describing the failure.
pub async fn save_trip(coordinator: &SessionCoordinator, id: Option<&str>, input: &TripInput) -> Result<Trip, String> {
    const ACTION: &str = "save this trip";
    let api = authorized(coordinator, ACTION).await?;
    let result = match id {
        Some(id) => api.update_trip(id, input).await,
        None => api.create_trip(input).await,
    };
    result.map_err(|e| api_failure(ACTION, e))
}

/// # Errors
///
/// A message describing the failure.
pub async fn delete_trip(coordinator: &SessionCoordinator, id: &str) -> Result<(), String> {
    const ACTION: &str = "delete this trip";
    authorized(coordinator, ACTION)
        .await?
        .delete_trip(id)
        .await
        .map_err(|e| api_failure(ACTION, e))
}

/// Create (`id == None`) or update a destination.
///
/// # Errors
///
/// A message describing the failure.
pub async fn save_destination(
    coordinator: &SessionCoordinator,
    id: Option<&str>,
    input: &DestinationInput,
) -> Result<Destination, String> {
    const ACTION: &str = "save this destination";
    let api = authorized(coordinator, ACTION).await?;
    let result = match id {
        Some(id) => api.update_destination(id, input).await,
        None => api.create_destination(input).await,
    };
    result.map_err(|e| api_failure(ACTION, e))
}

/// # Errors
///
/// A message describing the failure.
pub async fn delete_destination(coordinator: &SessionCoordinator, id: &str) -> Result<(), String> {
    const ACTION: &str = "delete this destination";
    authorized(coordinator, ACTION)
        .await?
        .delete_destination(id)
        .await
        .map_err(|e| api_failure(ACTION, e))
}
