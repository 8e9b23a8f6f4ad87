use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum BookingType {
    #[serde(rename = "restaurant")]
    Restaurant,
    #[serde(rename = "activity")]
    Activity,
    #[serde(rename = "accommodation")]
    Accommodation,
}

impl BookingType {
    pub fn parse(value: &str) -> Option<BookingType> {
        match value {
            "restaurant" => Some(BookingType::Restaurant),
            "activity" => Some(BookingType::Activity),
            "accommodation" => Some(BookingType::Accommodation),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingType::Restaurant => "restaurant",
            BookingType::Activity => "activity",
            BookingType::Accommodation => "accommodation",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    #[serde(rename = "confirmed")]
    Confirmed,
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl BookingStatus {
    pub fn parse(value: &str) -> Option<BookingStatus> {
        match value {
            "confirmed" => Some(BookingStatus::Confirmed),
            "pending" => Some(BookingStatus::Pending),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    #[serde(rename = "type")]
    pub booking_type: BookingType,
    // Foreign reference into the catalog; only checked for restaurant bookings
    pub item_id: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_code: Option<String>,
    pub created_at: Option<DateTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRestaurantInput {
    #[serde(default)]
    pub restaurant_id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    pub party_size: Option<u32>,
    pub notes: Option<String>,
}
