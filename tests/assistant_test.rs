use chrono::NaiveDate;

use travelsage_api::models::itinerary::ItemStatus;
use travelsage_api::services::assistant_service::{
    RuleBasedAssistant, VoiceIntent, GENERIC_RESPONSE,
};

#[test]
fn reply_with_no_recognized_keyword_is_the_generic_template() {
    let assistant = RuleBasedAssistant;
    assert_eq!(assistant.reply("xyzzy"), GENERIC_RESPONSE);
}

#[test]
fn reply_topic_priority_prefers_destinations_over_restaurants() {
    let assistant = RuleBasedAssistant;
    let reply = assistant.reply("What destination has the best restaurants?");
    assert!(reply.starts_with("Popular travel destinations"));
}

#[test]
fn reply_matches_each_topic_keyword() {
    let assistant = RuleBasedAssistant;

    assert!(assistant
        .reply("Suggest restaurants in Barcelona")
        .contains("local cuisine"));
    assert!(assistant
        .reply("Help me plan my trip")
        .contains("balances sightseeing"));
    assert!(assistant
        .reply("How much does it cost?")
        .contains("Travel costs vary"));
    assert!(assistant
        .reply("Any advice before I leave?")
        .contains("Some travel tips"));
}

#[test]
fn itinerary_template_matches_detected_destination() {
    let assistant = RuleBasedAssistant;

    let generated = assistant.itinerary("One week in Tokyo please");
    assert_eq!(generated.destination, "Tokyo");
    assert_eq!(generated.name, "Trip to Tokyo");
    assert_eq!(generated.days.len(), 3);

    for day in &generated.days {
        assert!(!day.items.is_empty());
        for item in &day.items {
            assert_eq!(item.status, ItemStatus::None);
            assert!(!item.id.is_empty());
        }
    }
}

#[test]
fn itinerary_template_dates_are_consecutive() {
    let assistant = RuleBasedAssistant;
    let generated = assistant.itinerary("Somewhere warm");

    let dates: Vec<NaiveDate> = generated
        .days
        .iter()
        .map(|day| NaiveDate::parse_from_str(&day.date, "%Y-%m-%d").unwrap())
        .collect();
    assert_eq!(dates[1], dates[0].succ_opt().unwrap());
    assert_eq!(dates[2], dates[1].succ_opt().unwrap());
}

#[test]
fn itinerary_falls_back_to_paris() {
    let assistant = RuleBasedAssistant;
    let generated = assistant.itinerary("Plan something for me");
    assert_eq!(generated.destination, "Paris");
    assert!(generated.days[0]
        .items
        .iter()
        .any(|item| item.title.contains("Eiffel Tower")));
}

#[test]
fn recommendations_detect_cuisine_and_price_tier() {
    let assistant = RuleBasedAssistant;
    let recs = assistant.recommendations("cheap italian pizza for the family", None);

    assert_eq!(recs[0].name, "Italian Delight");
    assert_eq!(recs[0].price_range, "$");
    assert!(recs[0].recommendation_reason.contains("family dining"));
    assert_eq!(recs.last().unwrap().name, "Local Flavors");
}

#[test]
fn recommendations_add_vegetarian_option_when_asked() {
    let assistant = RuleBasedAssistant;
    let recs = assistant.recommendations("vegan fine dining", Some("Bali"));

    assert!(recs.iter().any(|r| r.name == "Green Palette"));
    assert_eq!(recs[0].price_range, "$$$$");
    assert_eq!(recs[0].location, "bali");
}

#[test]
fn preferences_extraction_covers_all_fields() {
    let assistant = RuleBasedAssistant;
    let profile =
        assistant.preferences("10 days in Bali and Kyoto, luxury resort, sushi and hiking");

    assert!(profile.destinations.contains(&"Bali".to_string()));
    assert!(profile.destinations.contains(&"Kyoto".to_string()));
    assert!(profile.cuisines.contains(&"Japanese".to_string()));
    assert!(profile.interests.contains(&"Hiking".to_string()));
    assert_eq!(profile.budget, "high");
    assert_eq!(profile.travel_duration.as_deref(), Some("10 days"));
    assert!(profile.accommodation.contains(&"Resort".to_string()));
}

#[test]
fn preferences_default_to_medium_budget() {
    let assistant = RuleBasedAssistant;
    let profile = assistant.preferences("a quiet week somewhere");
    assert_eq!(profile.budget, "medium");
    assert!(profile.destinations.is_empty());
}

#[test]
fn voice_classifies_restaurant_search_with_destination() {
    let assistant = RuleBasedAssistant;
    let analysis = assistant.voice("Suggest restaurants in Barcelona");

    assert_eq!(analysis.intent, VoiceIntent::RestaurantSearch);
    assert_eq!(analysis.entities.destination.as_deref(), Some("Barcelona"));
    assert!(!analysis.response.is_empty());
}

#[test]
fn voice_classifies_booking_and_extracts_entities() {
    let assistant = RuleBasedAssistant;
    let analysis =
        assistant.voice("Book a table for 4 at an Italian restaurant in Rome tomorrow at 7 pm");

    assert_eq!(analysis.intent, VoiceIntent::RestaurantBooking);
    assert_eq!(analysis.entities.cuisine.as_deref(), Some("Italian"));
    assert_eq!(analysis.entities.destination.as_deref(), Some("Rome"));
    assert_eq!(analysis.entities.date.as_deref(), Some("tomorrow"));
    assert_eq!(analysis.entities.time.as_deref(), Some("7 pm"));
    assert_eq!(analysis.entities.party_size, Some(4));
}

#[test]
fn voice_extracts_weekday_and_clock_time() {
    let assistant = RuleBasedAssistant;
    let analysis = assistant.voice("Reserve dinner for 2 people on friday at 8:30 pm, book it");

    assert_eq!(analysis.entities.date.as_deref(), Some("friday"));
    assert_eq!(analysis.entities.time.as_deref(), Some("8:30 pm"));
    assert_eq!(analysis.entities.party_size, Some(2));
}

#[test]
fn voice_without_keywords_is_general_with_generic_response() {
    let assistant = RuleBasedAssistant;
    let analysis = assistant.voice("Hello!");

    assert_eq!(analysis.intent, VoiceIntent::General);
    assert_eq!(analysis.response, GENERIC_RESPONSE);
    assert!(analysis.entities.destination.is_none());
}
