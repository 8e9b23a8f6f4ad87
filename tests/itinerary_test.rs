use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;

use travelsage_api::models::itinerary::{DayDraft, ItemDraft, ItemStatus, ItemType, Itinerary};
use travelsage_api::services::itinerary_service;

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn sample_itinerary() -> Itinerary {
    let drafts = vec![
        DayDraft {
            items: vec![
                ItemDraft {
                    id: Some("item-1".to_string()),
                    title: "Morning walk".to_string(),
                    ..Default::default()
                },
                ItemDraft {
                    id: Some("item-2".to_string()),
                    title: "Lunch".to_string(),
                    item_type: Some(ItemType::Food),
                    ..Default::default()
                },
            ],
            ..Default::default()
        },
        DayDraft {
            items: vec![ItemDraft {
                id: Some("item-3".to_string()),
                title: "Museum".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        },
    ];

    Itinerary {
        id: None,
        user_id: ObjectId::new(),
        name: "Weekend away".to_string(),
        destination: "Lisbon".to_string(),
        start_date: "2025-06-01".to_string(),
        end_date: Some("2025-06-02".to_string()),
        days: itinerary_service::materialize_days(drafts, "Lisbon"),
        created_at: None,
        updated_at: None,
    }
}

#[test]
fn empty_days_are_dated_consecutively_from_start() {
    let days = itinerary_service::build_empty_days("Paris", start_date(), 3);

    assert_eq!(days.len(), 3);
    assert_eq!(days[0].date, "2025-06-01");
    assert_eq!(days[1].date, "2025-06-02");
    assert_eq!(days[2].date, "2025-06-03");
    assert_eq!(days[0].title, "Day 1 in Paris");
    assert_eq!(days[2].title, "Day 3 in Paris");
    assert!(days.iter().all(|day| day.items.is_empty()));
    assert_ne!(days[0].id, days[1].id);
}

#[test]
fn empty_days_roll_over_month_boundaries() {
    let start = NaiveDate::from_ymd_opt(2025, 1, 30).unwrap();
    let days = itinerary_service::build_empty_days("Tokyo", start, 4);

    assert_eq!(days[3].date, "2025-02-02");
}

#[test]
fn materialized_items_get_defaults_and_ids() {
    let item = itinerary_service::materialize_item(ItemDraft::default());

    assert!(!item.id.is_empty());
    assert_eq!(item.item_type, ItemType::Activity);
    assert_eq!(item.start_time, "09:00");
    assert_eq!(item.end_time, "10:00");
    assert_eq!(item.status, ItemStatus::None);
}

#[test]
fn materialized_days_keep_supplied_ids_and_fill_titles() {
    let drafts = vec![DayDraft {
        id: Some("day-1".to_string()),
        items: vec![ItemDraft {
            id: Some("item-1".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    }];

    let days = itinerary_service::materialize_days(drafts, "Lisbon");
    assert_eq!(days[0].id, "day-1");
    assert_eq!(days[0].title, "Day in Lisbon");
    assert_eq!(days[0].items[0].id, "item-1");
}

#[test]
fn set_item_status_is_idempotent() {
    let mut itinerary = sample_itinerary();

    let first = itinerary_service::set_item_status(&mut itinerary, "item-2", ItemStatus::Confirmed)
        .unwrap();
    let second = itinerary_service::set_item_status(&mut itinerary, "item-2", ItemStatus::Confirmed)
        .unwrap();

    assert_eq!(first.status, ItemStatus::Confirmed);
    assert_eq!(second.status, ItemStatus::Confirmed);
    assert_eq!(first.id, second.id);
    assert_eq!(
        itinerary_service::find_item(&itinerary, "item-2").unwrap().status,
        ItemStatus::Confirmed
    );
}

#[test]
fn set_item_status_for_unknown_item_is_none() {
    let mut itinerary = sample_itinerary();
    assert!(itinerary_service::set_item_status(&mut itinerary, "missing", ItemStatus::Pending)
        .is_none());
}

#[test]
fn every_item_is_reachable_by_id_lookup() {
    let itinerary = sample_itinerary();

    let ids: Vec<String> = itinerary
        .days
        .iter()
        .flat_map(|day| day.items.iter().map(|item| item.id.clone()))
        .collect();

    assert_eq!(ids.len(), itinerary_service::item_count(&itinerary));
    for id in ids {
        assert!(itinerary_service::find_item(&itinerary, &id).is_some());
    }
}

#[test]
fn item_status_parse_accepts_only_known_values() {
    assert_eq!(ItemStatus::parse("confirmed"), Some(ItemStatus::Confirmed));
    assert_eq!(ItemStatus::parse("pending"), Some(ItemStatus::Pending));
    assert_eq!(ItemStatus::parse("cancelled"), Some(ItemStatus::Cancelled));
    assert_eq!(ItemStatus::parse("none"), Some(ItemStatus::None));
    assert_eq!(ItemStatus::parse("done"), None);
}

#[test]
fn item_status_serializes_to_wire_names() {
    assert_eq!(
        serde_json::to_string(&ItemStatus::None).unwrap(),
        "\"none\""
    );
    assert_eq!(
        serde_json::to_string(&ItemType::Accommodation).unwrap(),
        "\"accommodation\""
    );
}
