use super::*;

// =============================================================
// Helpers
// =============================================================

fn make_trip() -> Trip {
    Trip {
        id: "1".to_owned(),
        title: "Tokyo Adventure".to_owned(),
        country: "Japan".to_owned(),
        city: "Tokyo".to_owned(),
        start_date: "2024-04-15".to_owned(),
        end_date: "2024-04-22".to_owned(),
        image_url: None,
    }
}

fn make_input() -> TripInput {
    make_trip().to_input()
}

// =============================================================
// Trip serde
// =============================================================

#[test]
fn trip_accepts_numeric_id() {
    let trip: Trip = serde_json::from_value(serde_json::json!({
        "id": 42,
        "title": "Paris",
        "country": "France",
        "city": "Paris",
        "start_date": "2024-06-10",
        "end_date": "2024-06-17"
    }))
    .unwrap();
    assert_eq!(trip.id, "42");
    assert_eq!(trip.image_url, None);
}

#[test]
fn trip_accepts_string_id_and_image() {
    let trip: Trip = serde_json::from_value(serde_json::json!({
        "id": "a1b2",
        "title": "Phuket",
        "country": "Thailand",
        "city": "Phuket",
        "start_date": "2024-08-05",
        "end_date": "2024-08-12",
        "image_url": "https://example.com/p.jpg"
    }))
    .unwrap();
    assert_eq!(trip.id, "a1b2");
    assert_eq!(trip.image_url.as_deref(), Some("https://example.com/p.jpg"));
}

#[test]
fn trip_rejects_object_id() {
    let result = serde_json::from_value::<Trip>(serde_json::json!({
        "id": { "nested": true },
        "title": "x",
        "country": "x",
        "city": "x",
        "start_date": "2024-01-01",
        "end_date": "2024-01-02"
    }));
    assert!(result.is_err());
}

#[test]
fn destination_accepts_numeric_ids_and_missing_description() {
    let dest: Destination = serde_json::from_value(serde_json::json!({
        "id": 7,
        "trip_id": 42,
        "name": "Tokyo Tower"
    }))
    .unwrap();
    assert_eq!(dest.id, "7");
    assert_eq!(dest.trip_id, "42");
    assert_eq!(dest.description, "");
}

#[test]
fn trip_input_omits_missing_image_url() {
    let value = serde_json::to_value(make_input()).unwrap();
    assert!(value.get("image_url").is_none());
    assert_eq!(value["title"], "Tokyo Adventure");
}

// =============================================================
// Dates
// =============================================================

#[test]
fn duration_days_counts_whole_days() {
    assert_eq!(make_trip().duration_days(), Some(7));
}

#[test]
fn duration_days_none_for_bad_dates() {
    let trip = Trip { end_date: "soon".to_owned(), ..make_trip() };
    assert_eq!(trip.duration_days(), None);
}

#[test]
fn format_trip_date_is_short_month() {
    assert_eq!(format_trip_date("2024-04-15"), "Apr 15, 2024");
    assert_eq!(format_trip_date("2024-06-05"), "Jun 5, 2024");
}

#[test]
fn format_trip_date_passes_through_garbage() {
    assert_eq!(format_trip_date("someday"), "someday");
}

// =============================================================
// TripInput::validate
// =============================================================

#[test]
fn validate_accepts_complete_input() {
    assert_eq!(make_input().validate(), Ok(()));
}

#[test]
fn validate_accepts_same_day_trip() {
    let input = TripInput { end_date: "2024-04-15".to_owned(), ..make_input() };
    assert_eq!(input.validate(), Ok(()));
}

#[test]
fn validate_requires_title() {
    let input = TripInput { title: "   ".to_owned(), ..make_input() };
    assert_eq!(input.validate(), Err("Title is required"));
}

#[test]
fn validate_requires_place() {
    let input = TripInput { city: String::new(), ..make_input() };
    assert_eq!(input.validate(), Err("City and country are required"));
}

#[test]
fn validate_rejects_bad_dates() {
    let input = TripInput { start_date: "2024-13-01".to_owned(), ..make_input() };
    assert_eq!(input.validate(), Err("Start date must be a valid date"));
    let input = TripInput { end_date: String::new(), ..make_input() };
    assert_eq!(input.validate(), Err("End date must be a valid date"));
}

#[test]
fn validate_rejects_end_before_start() {
    let input = TripInput { end_date: "2024-04-01".to_owned(), ..make_input() };
    assert_eq!(input.validate(), Err("End date cannot be before start date"));
}

#[test]
fn normalized_trims_and_drops_blank_image() {
    let input = TripInput {
        title: "  Tokyo  ".to_owned(),
        image_url: Some("   ".to_owned()),
        ..make_input()
    };
    let normalized = input.normalized();
    assert_eq!(normalized.title, "Tokyo");
    assert_eq!(normalized.image_url, None);
}
