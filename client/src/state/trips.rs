//! Screen state for the trip pages.
//!
//! DESIGN
//! ======
//! Plain structs held in page-local `RwSignal`s. The async loaders in
//! `net::trips` produce `Result<_, String>` values that these types fold in,
//! so the reducers are testable without a reactive runtime.

#[cfg(test)]
#[path = "trips_test.rs"]
mod trips_test;

use session::types::{Destination, DestinationInput, Trip, TripInput};

/// Dashboard trip list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TripsState {
    pub items: Vec<Trip>,
    pub loading: bool,
    pub error: Option<String>,
}

impl TripsState {
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish_load(&mut self, result: Result<Vec<Trip>, String>) {
        self.loading = false;
        match result {
            Ok(items) => self.items = items,
            Err(message) => self.error = Some(message),
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.items.retain(|trip| trip.id != id);
    }
}

/// Trip detail page: the trip and its destinations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TripDetailState {
    pub trip: Option<Trip>,
    pub destinations: Vec<Destination>,
    pub loading: bool,
    pub error: Option<String>,
}

impl TripDetailState {
    pub fn finish_load(&mut self, result: Result<(Trip, Vec<Destination>), String>) {
        self.loading = false;
        match result {
            Ok((trip, destinations)) => {
                self.trip = Some(trip);
                self.destinations = destinations;
                self.error = None;
            }
            Err(message) => self.error = Some(message),
        }
    }

    /// Insert a created destination or replace an updated one.
    pub fn upsert_destination(&mut self, destination: Destination) {
        match self
            .destinations
            .iter_mut()
            .find(|d| d.id == destination.id)
        {
            Some(existing) => *existing = destination,
            None => self.destinations.push(destination),
        }
    }

    pub fn remove_destination(&mut self, id: &str) {
        self.destinations.retain(|d| d.id != id);
    }
}

/// Create/edit trip form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TripFormState {
    pub input: TripInput,
    pub saving: bool,
    pub error: Option<String>,
}

impl TripFormState {
    #[must_use]
    pub fn editing(trip: &Trip) -> Self {
        Self { input: trip.to_input(), ..Self::default() }
    }

    /// Validate the inputs and enter the saving state.
    ///
    /// # Errors
    ///
    /// The validation message; the form stays editable.
    pub fn begin_submit(&mut self) -> Result<TripInput, String> {
        let input = self.input.normalized();
        if let Err(message) = input.validate() {
            self.error = Some(message.to_owned());
            return Err(message.to_owned());
        }
        self.saving = true;
        self.error = None;
        Ok(input)
    }

    pub fn finish_submit(&mut self, result: Result<Trip, String>) -> Option<Trip> {
        self.saving = false;
        match result {
            Ok(trip) => Some(trip),
            Err(message) => {
                self.error = Some(message);
                None
            }
        }
    }
}

/// Inline add/edit destination form on the detail page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DestinationFormState {
    /// `Some(id)` while editing an existing destination.
    pub editing: Option<String>,
    pub name: String,
    pub description: String,
    pub error: Option<String>,
}

impl DestinationFormState {
    #[must_use]
    pub fn edit(destination: &Destination) -> Self {
        Self {
            editing: Some(destination.id.clone()),
            name: destination.name.clone(),
            description: destination.description.clone(),
            error: None,
        }
    }

    /// Build the request body.
    ///
    /// # Errors
    ///
    /// "Destination name is required" when the name is blank.
    pub fn to_input(&self, trip_id: &str) -> Result<DestinationInput, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Destination name is required".to_owned());
        }
        Ok(DestinationInput {
            name: name.to_owned(),
            description: self.description.trim().to_owned(),
            trip_id: trip_id.to_owned(),
        })
    }
}
