//! Wire types for the trips backend.
//!
//! DESIGN
//! ======
//! The backend is opaque, so ids are accepted as either JSON strings or
//! integers and carried as strings. Dates travel as `YYYY-MM-DD`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use time::Date;
use time::macros::format_description;

/// A trip as returned by `GET /api/trips` and `GET /api/trips/:id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    pub country: String,
    pub city: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Trip {
    /// Whole days between start and end, if both dates parse.
    #[must_use]
    pub fn duration_days(&self) -> Option<i64> {
        let start = parse_date(&self.start_date)?;
        let end = parse_date(&self.end_date)?;
        Some((end - start).whole_days())
    }

    /// Editable copy of this trip's fields.
    #[must_use]
    pub fn to_input(&self) -> TripInput {
        TripInput {
            title: self.title.clone(),
            country: self.country.clone(),
            city: self.city.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

/// Body of `POST /api/trips` and `PUT /api/trips/:id`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripInput {
    pub title: String,
    pub country: String,
    pub city: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl TripInput {
    /// Check required fields and date order before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns the first user-facing problem found.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("Title is required");
        }
        if self.country.trim().is_empty() || self.city.trim().is_empty() {
            return Err("City and country are required");
        }
        let Some(start) = parse_date(&self.start_date) else {
            return Err("Start date must be a valid date");
        };
        let Some(end) = parse_date(&self.end_date) else {
            return Err("End date must be a valid date");
        };
        if end < start {
            return Err("End date cannot be before start date");
        }
        Ok(())
    }

    /// Trimmed copy; a blank image URL becomes `None`.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            title: self.title.trim().to_owned(),
            country: self.country.trim().to_owned(),
            city: self.city.trim().to_owned(),
            start_date: self.start_date.trim().to_owned(),
            end_date: self.end_date.trim().to_owned(),
            image_url: self
                .image_url
                .as_deref()
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_owned),
        }
    }
}

/// A place within a trip, from `GET /api/destinations/:tripId`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub trip_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Body of `POST /api/destinations` and `PUT /api/destinations/:id`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationInput {
    pub name: String,
    pub description: String,
    pub trip_id: String,
}

/// Parse a `YYYY-MM-DD` date.
#[must_use]
pub fn parse_date(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).ok()
}

/// Render a `YYYY-MM-DD` date as `Apr 15, 2024`; unparseable input is
/// returned unchanged.
#[must_use]
pub fn format_trip_date(raw: &str) -> String {
    parse_date(raw)
        .and_then(|date| {
            date.format(format_description!("[month repr:short] [day padding:none], [year]"))
                .ok()
        })
        .unwrap_or_else(|| raw.to_owned())
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(id) => Ok(id),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        _ => Err(D::Error::custom("expected string or number id")),
    }
}
