//! REST client for the trips backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every call reads the bearer token from `TokenStore`. Any 401 clears the
//! store and hard-navigates to `/login` before the error is returned, so
//! callers still observe the failure after the global redirect fires.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, HttpTransport, Method};
use crate::storage::TokenStore;
use crate::types::{Destination, DestinationInput, Trip, TripInput};

pub const DEFAULT_API_URL: &str = "http://localhost:4000";

/// Route the browser is sent to after a 401.
pub const LOGIN_PATH: &str = "/login";

/// Full-page navigation, bypassing the client-side router.
pub trait Navigator: Send + Sync {
    fn hard_navigate(&self, path: &str);
}

fn trip_endpoint(id: &str) -> String {
    format!("/api/trips/{id}")
}

fn trip_destinations_endpoint(trip_id: &str) -> String {
    format!("/api/destinations/{trip_id}")
}

fn destination_endpoint(id: &str) -> String {
    format!("/api/destinations/{id}")
}

/// Resolve the configured backend URL, falling back to the local default.
#[must_use]
pub fn resolve_base_url(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_API_URL)
        .trim_end_matches('/')
        .to_owned()
}

pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    tokens: TokenStore,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        transport: Arc<dyn HttpTransport>,
        tokens: TokenStore,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self { base_url: resolve_base_url(Some(base_url)), transport, tokens, navigator }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// `POST /api/users` — create the backend record for the current token's
    /// user if it does not exist yet. The response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the failed request.
    pub async fn ensure_user(&self) -> Result<(), ApiError> {
        self.send("creating user", Method::Post, "/api/users", None)
            .await
            .map(|_| ())
    }

    /// `GET /api/trips`
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the failed request.
    pub async fn list_trips(&self) -> Result<Vec<Trip>, ApiError> {
        self.fetch("fetching trips", Method::Get, "/api/trips", None)
            .await
    }

    /// `GET /api/trips/:id`
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the failed request.
    pub async fn get_trip(&self, id: &str) -> Result<Trip, ApiError> {
        self.fetch("fetching trip", Method::Get, &trip_endpoint(id), None)
            .await
    }

    /// `POST /api/trips`
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the failed request.
    pub async fn create_trip(&self, input: &TripInput) -> Result<Trip, ApiError> {
        self.fetch("creating trip", Method::Post, "/api/trips", Some(to_body(input)?))
            .await
    }

    /// `PUT /api/trips/:id`
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the failed request.
    pub async fn update_trip(&self, id: &str, input: &TripInput) -> Result<Trip, ApiError> {
        self.fetch("updating trip", Method::Put, &trip_endpoint(id), Some(to_body(input)?))
            .await
    }

    /// `DELETE /api/trips/:id`
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the failed request.
    pub async fn delete_trip(&self, id: &str) -> Result<(), ApiError> {
        self.send("deleting trip", Method::Delete, &trip_endpoint(id), None)
            .await
            .map(|_| ())
    }

    /// `GET /api/destinations/:tripId`
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the failed request.
    pub async fn list_destinations(&self, trip_id: &str) -> Result<Vec<Destination>, ApiError> {
        self.fetch("fetching destinations", Method::Get, &trip_destinations_endpoint(trip_id), None)
            .await
    }

    /// `POST /api/destinations`
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the failed request.
    pub async fn create_destination(&self, input: &DestinationInput) -> Result<Destination, ApiError> {
        self.fetch("creating destination", Method::Post, "/api/destinations", Some(to_body(input)?))
            .await
    }

    /// `PUT /api/destinations/:id`
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the failed request.
    pub async fn update_destination(&self, id: &str, input: &DestinationInput) -> Result<Destination, ApiError> {
        self.fetch("updating destination", Method::Put, &destination_endpoint(id), Some(to_body(input)?))
            .await
    }

    /// `DELETE /api/destinations/:id`
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the failed request.
    pub async fn delete_destination(&self, id: &str) -> Result<(), ApiError> {
        self.send("deleting destination", Method::Delete, &destination_endpoint(id), None)
            .await
            .map(|_| ())
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        action: &str,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let resp = self.send(action, method, path, body).await?;
        resp.json::<T>().map_err(|e| {
            log::error!("error {action}: {e}");
            ApiError::Decode(e.to_string())
        })
    }

    async fn send(
        &self,
        action: &str,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse, ApiError> {
        let mut request = HttpRequest::new(method, format!("{}{path}", self.base_url)).with_bearer(self.tokens.get());
        if let Some(body) = body {
            request = request.with_json(body);
        }

        let resp = self.transport.send(request).await.map_err(|e| {
            log::error!("error {action}: {e}");
            ApiError::Network(e)
        })?;

        if resp.status == 401 {
            log::warn!("{} {path} returned 401; clearing token and redirecting to login", method.as_str());
            self.tokens.clear();
            self.navigator.hard_navigate(LOGIN_PATH);
            return Err(ApiError::Unauthorized);
        }
        if !resp.is_success() {
            log::error!("error {action}: status {}", resp.status);
            return Err(ApiError::Status { status: resp.status, body: resp.body });
        }
        Ok(resp)
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}
