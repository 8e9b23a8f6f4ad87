use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use crate::models::itinerary::{
    DayDraft, ItemDraft, ItemStatus, ItemType, Itinerary, ItineraryDay, ItineraryItem,
};

/// Synthesizes `number_of_days` empty days titled "Day N in <destination>",
/// dated consecutively from `start`.
pub fn build_empty_days(destination: &str, start: NaiveDate, number_of_days: u32) -> Vec<ItineraryDay> {
    (0..number_of_days)
        .map(|i| ItineraryDay {
            id: Uuid::new_v4().to_string(),
            title: format!("Day {} in {}", i + 1, destination),
            date: (start + Duration::days(i as i64))
                .format("%Y-%m-%d")
                .to_string(),
            items: Vec::new(),
        })
        .collect()
}

/// Fills in ids and defaults for client-supplied days. Existing ids are kept
/// so updates round-trip without re-keying every item.
pub fn materialize_days(drafts: Vec<DayDraft>, destination: &str) -> Vec<ItineraryDay> {
    drafts
        .into_iter()
        .map(|draft| ItineraryDay {
            id: draft.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: draft
                .title
                .unwrap_or_else(|| format!("Day in {}", destination)),
            date: draft.date.unwrap_or_default(),
            items: draft.items.into_iter().map(materialize_item).collect(),
        })
        .collect()
}

pub fn materialize_item(draft: ItemDraft) -> ItineraryItem {
    ItineraryItem {
        id: draft.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        title: draft.title,
        description: draft.description,
        item_type: draft.item_type.unwrap_or(ItemType::Activity),
        start_time: draft.start_time.unwrap_or_else(|| "09:00".to_string()),
        end_time: draft.end_time.unwrap_or_else(|| "10:00".to_string()),
        location: draft.location,
        distance: draft.distance,
        price: draft.price,
        image_url: draft.image_url,
        status: draft.status.unwrap_or(ItemStatus::None),
        booking_reference: draft.booking_reference,
    }
}

pub fn find_item<'a>(itinerary: &'a Itinerary, item_id: &str) -> Option<&'a ItineraryItem> {
    itinerary
        .days
        .iter()
        .flat_map(|day| day.items.iter())
        .find(|item| item.id == item_id)
}

/// Assigns the status directly; any state may be overwritten, including
/// writing the same status twice. Returns the updated item.
pub fn set_item_status(
    itinerary: &mut Itinerary,
    item_id: &str,
    status: ItemStatus,
) -> Option<ItineraryItem> {
    for day in itinerary.days.iter_mut() {
        for item in day.items.iter_mut() {
            if item.id == item_id {
                item.status = status;
                return Some(item.clone());
            }
        }
    }
    None
}

pub fn item_count(itinerary: &Itinerary) -> usize {
    itinerary.days.iter().map(|day| day.items.len()).sum()
}
