use mongodb::bson::{oid::ObjectId, DateTime};
use rand::Rng;

use crate::models::booking::{Booking, BookingStatus, BookingType};

const CODE_LEN: usize = 8;
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Short random token handed to the customer as proof of reservation.
pub fn generate_confirmation_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Confirmed bookings always get a confirmation code; pending ones go out
/// without until they are confirmed.
pub fn build_booking(
    user_id: ObjectId,
    booking_type: BookingType,
    item_id: String,
    date: String,
    time: Option<String>,
    party_size: Option<u32>,
    notes: Option<String>,
    status: BookingStatus,
) -> Booking {
    let confirmation_code = match status {
        BookingStatus::Confirmed => Some(generate_confirmation_code()),
        _ => None,
    };

    Booking {
        id: None,
        user_id,
        booking_type,
        item_id,
        date,
        time,
        party_size,
        notes,
        status,
        confirmation_code,
        created_at: Some(DateTime::now()),
    }
}
