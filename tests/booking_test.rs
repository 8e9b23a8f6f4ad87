use mongodb::bson::oid::ObjectId;

use travelsage_api::models::booking::{BookingStatus, BookingType};
use travelsage_api::services::booking_service;

#[test]
fn confirmation_codes_are_short_uppercase_tokens() {
    let code = booking_service::generate_confirmation_code();

    assert_eq!(code.len(), 8);
    assert!(code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));

    // Codes are random; two draws colliding would be astronomically unlikely
    assert_ne!(code, booking_service::generate_confirmation_code());
}

#[test]
fn confirmed_bookings_always_carry_a_code() {
    let booking = booking_service::build_booking(
        ObjectId::new(),
        BookingType::Restaurant,
        "rest-1".to_string(),
        "2025-06-01".to_string(),
        Some("19:00".to_string()),
        Some(2),
        None,
        BookingStatus::Confirmed,
    );

    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert!(!booking.confirmation_code.as_deref().unwrap().is_empty());
    assert!(booking.created_at.is_some());
}

#[test]
fn pending_bookings_have_no_code() {
    let booking = booking_service::build_booking(
        ObjectId::new(),
        BookingType::Activity,
        "act-1".to_string(),
        "2025-06-01".to_string(),
        None,
        None,
        None,
        BookingStatus::Pending,
    );

    assert_eq!(booking.status, BookingStatus::Pending);
    assert!(booking.confirmation_code.is_none());
}

#[test]
fn booking_type_parses_wire_names() {
    assert_eq!(BookingType::parse("restaurant"), Some(BookingType::Restaurant));
    assert_eq!(BookingType::parse("activity"), Some(BookingType::Activity));
    assert_eq!(
        BookingType::parse("accommodation"),
        Some(BookingType::Accommodation)
    );
    assert_eq!(BookingType::parse("hotel"), None);
    assert_eq!(BookingType::Restaurant.as_str(), "restaurant");
}

#[test]
fn booking_status_parses_wire_names() {
    assert_eq!(BookingStatus::parse("confirmed"), Some(BookingStatus::Confirmed));
    assert_eq!(BookingStatus::parse("pending"), Some(BookingStatus::Pending));
    assert_eq!(BookingStatus::parse("cancelled"), Some(BookingStatus::Cancelled));
    assert_eq!(BookingStatus::parse("canceled"), None);
}

#[test]
fn booking_serializes_with_camel_case_fields() {
    let booking = booking_service::build_booking(
        ObjectId::new(),
        BookingType::Restaurant,
        "rest-1".to_string(),
        "2025-06-01".to_string(),
        Some("19:00".to_string()),
        Some(4),
        Some("window seat".to_string()),
        BookingStatus::Confirmed,
    );

    let value = serde_json::to_value(&booking).unwrap();
    assert_eq!(value["type"], "restaurant");
    assert_eq!(value["itemId"], "rest-1");
    assert_eq!(value["partySize"], 4);
    assert!(value["confirmationCode"].is_string());
}
