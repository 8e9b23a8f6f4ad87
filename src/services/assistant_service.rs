use async_trait::async_trait;
use chrono::{Duration, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::itinerary::{ItemStatus, ItemType, ItineraryDay, ItineraryItem};
use crate::services::openai_service::OpenAiAssistant;

pub type AssistantError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt: u32,
    pub completion: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedItinerary {
    pub name: String,
    pub destination: String,
    pub days: Vec<ItineraryDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantRecommendation {
    pub name: String,
    pub cuisine: Vec<String>,
    pub description: String,
    pub price_range: String,
    pub location: String,
    pub recommendation_reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferenceProfile {
    pub destinations: Vec<String>,
    pub interests: Vec<String>,
    pub cuisines: Vec<String>,
    pub budget: String,
    pub travel_style: Vec<String>,
    pub travel_duration: Option<String>,
    pub accommodation: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoiceIntent {
    #[serde(rename = "restaurant_search")]
    RestaurantSearch,
    #[serde(rename = "restaurant_booking")]
    RestaurantBooking,
    #[serde(rename = "itinerary")]
    Itinerary,
    #[serde(rename = "destination")]
    Destination,
    #[serde(rename = "general")]
    General,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VoiceEntities {
    pub destination: Option<String>,
    pub cuisine: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub party_size: Option<u32>,
    pub preferences: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceAnalysis {
    pub intent: VoiceIntent,
    #[serde(default)]
    pub entities: VoiceEntities,
    #[serde(default)]
    pub response: String,
}

/// Common interface for answering travel queries. The rule-based responder
/// and the hosted-model client are interchangeable behind it.
#[async_trait]
pub trait AssistantProvider: Send + Sync {
    async fn respond(&self, query: &str) -> Result<(String, TokenUsage), AssistantError>;

    async fn generate_itinerary(
        &self,
        prompt: &str,
    ) -> Result<(GeneratedItinerary, TokenUsage), AssistantError>;

    async fn restaurant_recommendations(
        &self,
        preferences: &str,
        location: Option<&str>,
    ) -> Result<(Vec<RestaurantRecommendation>, TokenUsage), AssistantError>;

    async fn analyze_preferences(
        &self,
        input: &str,
    ) -> Result<(PreferenceProfile, TokenUsage), AssistantError>;

    async fn voice_query(
        &self,
        transcript: &str,
    ) -> Result<(VoiceAnalysis, TokenUsage), AssistantError>;
}

pub const GENERIC_RESPONSE: &str = "I'm TravelSage, your travel assistant. I can help with destination information, restaurant recommendations, itinerary planning, and travel tips. What would you like to know about?";

const KNOWN_DESTINATIONS: &[(&str, &str)] = &[
    ("paris", "Paris"),
    ("tokyo", "Tokyo"),
    ("new york", "New York"),
    ("rome", "Rome"),
    ("bali", "Bali"),
    ("barcelona", "Barcelona"),
    ("london", "London"),
    ("sydney", "Sydney"),
    ("dubai", "Dubai"),
    ("bangkok", "Bangkok"),
    ("santorini", "Santorini"),
    ("amsterdam", "Amsterdam"),
    ("lisbon", "Lisbon"),
    ("istanbul", "Istanbul"),
    ("singapore", "Singapore"),
    ("kyoto", "Kyoto"),
    ("venice", "Venice"),
    ("prague", "Prague"),
    ("marrakech", "Marrakech"),
    ("cape town", "Cape Town"),
];

const CUISINE_KEYWORDS: &[(&[&str], &str)] = &[
    (&["italian", "pasta", "pizza"], "Italian"),
    (&["japanese", "sushi"], "Japanese"),
    (&["chinese"], "Chinese"),
    (&["indian", "curry"], "Indian"),
    (&["mexican", "taco"], "Mexican"),
    (&["french"], "French"),
    (&["thai"], "Thai"),
    (&["vegetarian", "vegan"], "Vegetarian/Vegan"),
];

const INTEREST_KEYWORDS: &[(&str, &str)] = &[
    ("beach", "Beach"),
    ("hiking", "Hiking"),
    ("museum", "Museums"),
    ("culture", "Culture"),
    ("history", "History"),
    ("art", "Art"),
    ("nightlife", "Nightlife"),
    ("shopping", "Shopping"),
    ("nature", "Nature"),
    ("wellness", "Wellness"),
    ("food", "Food"),
    ("adventure", "Adventure"),
];

const STYLE_KEYWORDS: &[(&str, &str)] = &[
    ("luxury", "Luxury"),
    ("adventure", "Adventure"),
    ("cultur", "Cultural"),
    ("romantic", "Romantic"),
    ("family", "Family"),
    ("backpack", "Backpacking"),
    ("relax", "Relaxation"),
];

const ACCOMMODATION_KEYWORDS: &[(&str, &str)] = &[
    ("hotel", "Hotel"),
    ("hostel", "Hostel"),
    ("airbnb", "Airbnb"),
    ("resort", "Resort"),
    ("villa", "Villa"),
    ("apartment", "Apartment"),
];

struct CityGuide {
    city: &'static str,
    keywords: &'static [&'static str],
    landmark: &'static str,
    landmark_location: &'static str,
    cultural_visit: &'static str,
    cultural_location: &'static str,
    evening_area: &'static str,
    district_walk: &'static str,
    district_location: &'static str,
    shopping: &'static str,
    water_tour: &'static str,
    day_trip: &'static str,
    day_trip_location: &'static str,
    farewell: &'static str,
}

const PARIS_GUIDE: CityGuide = CityGuide {
    city: "Paris",
    keywords: &["paris", "france"],
    landmark: "Visit the Eiffel Tower",
    landmark_location: "Eiffel Tower",
    cultural_visit: "Louvre Museum Tour",
    cultural_location: "Louvre Museum",
    evening_area: "Seine River area",
    district_walk: "Montmartre Walk",
    district_location: "Montmartre",
    shopping: "Galeries Lafayette",
    water_tour: "Seine River Cruise",
    day_trip: "Visit Versailles",
    day_trip_location: "Palace of Versailles",
    farewell: "Moulin Rouge Show",
};

const CITY_GUIDES: &[CityGuide] = &[
    CityGuide {
        city: "Tokyo",
        keywords: &["tokyo", "japan"],
        landmark: "Visit Tokyo Skytree",
        landmark_location: "Tokyo Skytree",
        cultural_visit: "Senso-ji Temple Visit",
        cultural_location: "Senso-ji Temple",
        evening_area: "Shibuya",
        district_walk: "Harajuku Exploration",
        district_location: "Harajuku",
        shopping: "Takeshita Street",
        water_tour: "Tokyo Bay Cruise",
        day_trip: "Day trip to Kamakura",
        day_trip_location: "Kamakura",
        farewell: "Karaoke in Shinjuku",
    },
    CityGuide {
        city: "New York City",
        keywords: &["new york", "nyc"],
        landmark: "Visit Empire State Building",
        landmark_location: "Empire State Building",
        cultural_visit: "Metropolitan Museum of Art",
        cultural_location: "Metropolitan Museum",
        evening_area: "Times Square",
        district_walk: "Central Park Walk",
        district_location: "Central Park",
        shopping: "Fifth Avenue",
        water_tour: "Hudson River Cruise",
        day_trip: "Brooklyn Bridge & DUMBO",
        day_trip_location: "Brooklyn",
        farewell: "Broadway Show",
    },
    CityGuide {
        city: "Rome",
        keywords: &["rome", "italy"],
        landmark: "Visit the Colosseum",
        landmark_location: "Colosseum",
        cultural_visit: "Vatican Museums",
        cultural_location: "Vatican City",
        evening_area: "Trastevere",
        district_walk: "Spanish Steps and Trevi Fountain",
        district_location: "Historic Center",
        shopping: "Via del Corso",
        water_tour: "Tiber River Walk",
        day_trip: "Ostia Antica Archaeological Park",
        day_trip_location: "Ostia Antica",
        farewell: "Evening Piazza Walk",
    },
    CityGuide {
        city: "Bali",
        keywords: &["bali", "indonesia"],
        landmark: "Visit Beach",
        landmark_location: "Famous Beach",
        cultural_visit: "Cultural Tour",
        cultural_location: "Cultural Center",
        evening_area: "Downtown",
        district_walk: "Nature Hike",
        district_location: "Natural Area",
        shopping: "Shopping District",
        water_tour: "Boat Tour",
        day_trip: "Day Trip",
        day_trip_location: "Nearby Attraction",
        farewell: "Entertainment Venue",
    },
];

/// Ordered keyword tables and canned templates; no model, no ranking, no
/// state between calls.
pub struct RuleBasedAssistant;

impl RuleBasedAssistant {
    pub fn reply(&self, query: &str) -> String {
        let q = query.to_lowercase();

        // First matching topic wins; order matters.
        if q.contains("destination") || q.contains("where") {
            "Popular travel destinations include Paris, Tokyo, New York, Rome, and Bali. Each offers unique cultural experiences, cuisine, and attractions. Where would you like to know more about?".to_string()
        } else if q.contains("restaurant") || q.contains("food") || q.contains("eat") {
            "When traveling, try local cuisine and restaurants recommended by locals. Food markets and family-owned establishments often provide authentic experiences. Would you like recommendations for a specific location?".to_string()
        } else if q.contains("itinerary") || q.contains("plan") {
            "A good travel itinerary balances sightseeing, relaxation, and free time for unexpected discoveries. Consider 2-3 major activities per day and leave room for spontaneity.".to_string()
        } else if q.contains("budget") || q.contains("cost") || q.contains("price") {
            "Travel costs vary widely by destination, season, and style. Southeast Asia and parts of Latin America are budget-friendly, while Western Europe and Japan tend to be more expensive.".to_string()
        } else if q.contains("tip") || q.contains("advice") {
            "Some travel tips: research local customs before you go, learn a few phrases in the local language, keep digital copies of important documents, and pack less than you think you need.".to_string()
        } else {
            GENERIC_RESPONSE.to_string()
        }
    }

    pub fn itinerary(&self, prompt: &str) -> GeneratedItinerary {
        let p = prompt.to_lowercase();
        let guide = CITY_GUIDES
            .iter()
            .find(|guide| guide.keywords.iter().any(|k| p.contains(k)))
            .unwrap_or(&PARIS_GUIDE);

        let start = Utc::now().date_naive();
        let date = |i: i64| (start + Duration::days(i)).format("%Y-%m-%d").to_string();

        let days = vec![
            ItineraryDay {
                id: Uuid::new_v4().to_string(),
                title: format!("Day 1: Exploring {}", guide.city),
                date: date(0),
                items: vec![
                    canned_item(
                        "Breakfast at hotel",
                        "Start your day with a delicious breakfast at your hotel.",
                        ItemType::Food,
                        "08:00",
                        "09:00",
                        Some("Hotel"),
                        None,
                        Some("$"),
                    ),
                    canned_item(
                        guide.landmark,
                        "Explore one of the most iconic landmarks in the city.",
                        ItemType::Activity,
                        "10:00",
                        "12:00",
                        Some(guide.landmark_location),
                        Some("2 km from hotel"),
                        Some("$$"),
                    ),
                    canned_item(
                        "Lunch at local restaurant",
                        "Enjoy authentic local cuisine at a popular restaurant.",
                        ItemType::Food,
                        "12:30",
                        "14:00",
                        Some("City Center"),
                        None,
                        Some("$$"),
                    ),
                    canned_item(
                        guide.cultural_visit,
                        "Immerse yourself in the local culture and history.",
                        ItemType::Activity,
                        "14:30",
                        "17:00",
                        Some(guide.cultural_location),
                        Some("3 km from lunch spot"),
                        Some("$$"),
                    ),
                    canned_item(
                        "Dinner and evening stroll",
                        "Enjoy a relaxing dinner followed by an evening walk in a scenic area.",
                        ItemType::Food,
                        "19:00",
                        "21:00",
                        Some(guide.evening_area),
                        None,
                        Some("$$$"),
                    ),
                ],
            },
            ItineraryDay {
                id: Uuid::new_v4().to_string(),
                title: format!("Day 2: More {} Adventures", guide.city),
                date: date(1),
                items: vec![
                    canned_item(
                        "Breakfast at local café",
                        "Try a different breakfast spot today.",
                        ItemType::Food,
                        "08:30",
                        "09:30",
                        Some("Local Café"),
                        None,
                        Some("$"),
                    ),
                    canned_item(
                        guide.district_walk,
                        "Explore a different part of the city.",
                        ItemType::Activity,
                        "10:00",
                        "13:00",
                        Some(guide.district_location),
                        Some("4 km from hotel"),
                        Some("$"),
                    ),
                    canned_item(
                        "Lunch and shopping",
                        "Enjoy lunch and then shop for souvenirs or local products.",
                        ItemType::Food,
                        "13:00",
                        "16:00",
                        Some(guide.shopping),
                        None,
                        Some("$$"),
                    ),
                    canned_item(
                        guide.water_tour,
                        "Relax and see the city from a different perspective.",
                        ItemType::Activity,
                        "17:00",
                        "19:00",
                        Some("River/Bay Area"),
                        None,
                        Some("$$"),
                    ),
                    canned_item(
                        "Fine dining experience",
                        "Treat yourself to a special dinner tonight.",
                        ItemType::Food,
                        "20:00",
                        "22:00",
                        Some("Upscale Restaurant"),
                        None,
                        Some("$$$$"),
                    ),
                ],
            },
            ItineraryDay {
                id: Uuid::new_v4().to_string(),
                title: format!("Day 3: Final Day in {}", guide.city),
                date: date(2),
                items: vec![
                    canned_item(
                        "Leisurely breakfast",
                        "Take your time with breakfast today.",
                        ItemType::Food,
                        "09:00",
                        "10:30",
                        Some("Hotel or nearby café"),
                        None,
                        Some("$$"),
                    ),
                    canned_item(
                        guide.day_trip,
                        "Take a short trip outside the main city center.",
                        ItemType::Activity,
                        "11:00",
                        "16:00",
                        Some(guide.day_trip_location),
                        Some("30-60 minutes from city center"),
                        Some("$$"),
                    ),
                    canned_item(
                        "Last dinner in the city",
                        "Enjoy your final evening meal with local specialties.",
                        ItemType::Food,
                        "19:00",
                        "21:00",
                        Some("Local Restaurant"),
                        None,
                        Some("$$$"),
                    ),
                    canned_item(
                        "Evening farewell activity",
                        "Make the most of your last night with a special activity.",
                        ItemType::Activity,
                        "21:30",
                        "23:00",
                        Some(guide.farewell),
                        None,
                        Some("$$$"),
                    ),
                ],
            },
        ];

        GeneratedItinerary {
            name: format!("Trip to {}", guide.city),
            destination: guide.city.to_string(),
            days,
        }
    }

    pub fn recommendations(
        &self,
        preferences: &str,
        location: Option<&str>,
    ) -> Vec<RestaurantRecommendation> {
        let prefs = preferences.to_lowercase();
        let spot = location
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.to_lowercase())
            .unwrap_or_else(|| "city center".to_string());

        let cuisine = detect_cuisine(&prefs).unwrap_or("International");

        let price_range = if prefs.contains("cheap") || prefs.contains("budget") || prefs.contains("affordable") {
            "$"
        } else if prefs.contains("luxury") || prefs.contains("fine dining") || prefs.contains("expensive") {
            "$$$$"
        } else {
            "$$"
        };

        let occasion = if prefs.contains("family") {
            "family dining"
        } else if prefs.contains("romantic") {
            "a romantic evening"
        } else {
            "a casual meal"
        };

        let mut recommendations = vec![
            RestaurantRecommendation {
                name: format!("{} Delight", cuisine),
                cuisine: vec![cuisine.to_string()],
                description: format!(
                    "A charming {} restaurant known for authentic flavors and welcoming atmosphere.",
                    cuisine.to_lowercase()
                ),
                price_range: price_range.to_string(),
                location: spot.clone(),
                recommendation_reason: format!(
                    "Perfect for {} with excellent {} cuisine.",
                    occasion,
                    cuisine.to_lowercase()
                ),
            },
            RestaurantRecommendation {
                name: format!("{} House", cuisine),
                cuisine: vec![cuisine.to_string()],
                description: format!(
                    "Popular spot offering traditional and modern {} dishes in a stylish setting.",
                    cuisine.to_lowercase()
                ),
                price_range: match price_range {
                    "$" => "$$",
                    "$$$$" => "$$$",
                    _ => "$$",
                }
                .to_string(),
                location: spot.clone(),
                recommendation_reason: format!(
                    "Known for its exceptional service and {} approach to {} cooking.",
                    if prefs.contains("authentic") { "authentic" } else { "creative" },
                    cuisine.to_lowercase()
                ),
            },
            RestaurantRecommendation {
                name: format!("The {} Experience", cuisine),
                cuisine: vec![cuisine.to_string(), "Fusion".to_string()],
                description: format!(
                    "Innovative restaurant blending {} traditions with modern culinary techniques.",
                    cuisine.to_lowercase()
                ),
                price_range: match price_range {
                    "$" => "$$",
                    "$$" => "$$$",
                    _ => "$$$$",
                }
                .to_string(),
                location: spot.clone(),
                recommendation_reason: format!(
                    "Offers a unique dining experience with {}inventive dishes that surprise and delight.",
                    if prefs.contains("view") { "beautiful views and " } else { "" }
                ),
            },
        ];

        if prefs.contains("vegetarian") || prefs.contains("vegan") {
            recommendations.push(RestaurantRecommendation {
                name: "Green Palette".to_string(),
                cuisine: vec![
                    "Vegetarian".to_string(),
                    "Vegan".to_string(),
                    "Health Food".to_string(),
                ],
                description: "Specializing in plant-based cuisine that satisfies even non-vegetarians."
                    .to_string(),
                price_range: price_range.to_string(),
                location: spot.clone(),
                recommendation_reason:
                    "Perfect for those seeking delicious vegetarian and vegan options with locally-sourced ingredients."
                        .to_string(),
            });
        }

        recommendations.push(RestaurantRecommendation {
            name: "Local Flavors".to_string(),
            cuisine: vec!["Regional".to_string(), "Traditional".to_string()],
            description: "A beloved restaurant showcasing the best local and regional specialties."
                .to_string(),
            price_range: "$$".to_string(),
            location: spot,
            recommendation_reason:
                "Offers an authentic taste of local cuisine with recipes passed down through generations."
                    .to_string(),
        });

        recommendations
    }

    pub fn preferences(&self, input: &str) -> PreferenceProfile {
        let text = input.to_lowercase();

        let budget = if text.contains("cheap") || text.contains("budget") || text.contains("affordable") {
            "low"
        } else if text.contains("luxury") || text.contains("expensive") || text.contains("fine dining") {
            "high"
        } else {
            "medium"
        };

        let duration_re = Regex::new(r"(\d+)\s*(?:days?|nights?)\b").unwrap();
        let travel_duration = duration_re
            .captures(&text)
            .map(|caps| format!("{} days", &caps[1]));

        PreferenceProfile {
            destinations: KNOWN_DESTINATIONS
                .iter()
                .filter(|(keyword, _)| text.contains(keyword))
                .map(|(_, label)| label.to_string())
                .collect(),
            interests: collect_labels(&text, INTEREST_KEYWORDS),
            cuisines: CUISINE_KEYWORDS
                .iter()
                .filter(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
                .map(|(_, label)| label.to_string())
                .collect(),
            budget: budget.to_string(),
            travel_style: collect_labels(&text, STYLE_KEYWORDS),
            travel_duration,
            accommodation: collect_labels(&text, ACCOMMODATION_KEYWORDS),
        }
    }

    pub fn voice(&self, transcript: &str) -> VoiceAnalysis {
        let t = transcript.to_lowercase();

        let intent = if t.contains("book")
            && (t.contains("restaurant") || t.contains("table") || t.contains("dinner") || t.contains("lunch"))
        {
            VoiceIntent::RestaurantBooking
        } else if t.contains("restaurant") || t.contains("food") || t.contains("eat") || t.contains("dining") {
            VoiceIntent::RestaurantSearch
        } else if t.contains("itinerary") || t.contains("plan") || t.contains("schedule") || t.contains("trip") {
            VoiceIntent::Itinerary
        } else if t.contains("destination") || t.contains("where") || t.contains("visit") || t.contains("travel") {
            VoiceIntent::Destination
        } else {
            VoiceIntent::General
        };

        let destination = KNOWN_DESTINATIONS
            .iter()
            .find(|(keyword, _)| t.contains(keyword))
            .map(|(_, label)| label.to_string());
        let cuisine = detect_cuisine(&t).map(|c| c.to_string());

        let entities = VoiceEntities {
            destination: destination.clone(),
            cuisine: cuisine.clone(),
            date: extract_date(&t),
            time: extract_time(&t),
            party_size: extract_party_size(&t),
            preferences: collect_labels(&t, STYLE_KEYWORDS),
        };

        let response = match intent {
            VoiceIntent::RestaurantBooking => match (&cuisine, &destination) {
                (Some(c), Some(d)) => format!(
                    "I'd be happy to help you book a {} restaurant in {}. Let me check availability.",
                    c, d
                ),
                (Some(c), None) => format!(
                    "I'd be happy to help you book a {} restaurant. Let me check availability.",
                    c
                ),
                (None, Some(d)) => format!(
                    "I'd be happy to help you book a restaurant in {}. Let me check availability.",
                    d
                ),
                (None, None) => {
                    "I'd be happy to help you book a restaurant. Let me check availability.".to_string()
                }
            },
            VoiceIntent::RestaurantSearch => match &destination {
                Some(d) => format!("Here are some restaurants worth trying in {}.", d),
                None => "Here are some restaurants worth trying nearby.".to_string(),
            },
            VoiceIntent::Itinerary => match &destination {
                Some(d) => format!("Let's plan your trip to {}. I can draft a day-by-day itinerary for you.", d),
                None => "Let's plan your trip. I can draft a day-by-day itinerary for you.".to_string(),
            },
            VoiceIntent::Destination => match &destination {
                Some(d) => format!(
                    "{} is a great choice. Would you like sightseeing highlights or restaurant suggestions?",
                    d
                ),
                None => "Popular travel destinations include Paris, Tokyo, New York, Rome, and Bali. Where would you like to go?".to_string(),
            },
            VoiceIntent::General => GENERIC_RESPONSE.to_string(),
        };

        VoiceAnalysis {
            intent,
            entities,
            response,
        }
    }
}

#[async_trait]
impl AssistantProvider for RuleBasedAssistant {
    async fn respond(&self, query: &str) -> Result<(String, TokenUsage), AssistantError> {
        Ok((self.reply(query), TokenUsage::default()))
    }

    async fn generate_itinerary(
        &self,
        prompt: &str,
    ) -> Result<(GeneratedItinerary, TokenUsage), AssistantError> {
        Ok((self.itinerary(prompt), TokenUsage::default()))
    }

    async fn restaurant_recommendations(
        &self,
        preferences: &str,
        location: Option<&str>,
    ) -> Result<(Vec<RestaurantRecommendation>, TokenUsage), AssistantError> {
        Ok((self.recommendations(preferences, location), TokenUsage::default()))
    }

    async fn analyze_preferences(
        &self,
        input: &str,
    ) -> Result<(PreferenceProfile, TokenUsage), AssistantError> {
        Ok((self.preferences(input), TokenUsage::default()))
    }

    async fn voice_query(
        &self,
        transcript: &str,
    ) -> Result<(VoiceAnalysis, TokenUsage), AssistantError> {
        Ok((self.voice(transcript), TokenUsage::default()))
    }
}

/// Tries the hosted model when one is configured and falls back to the rule
/// tables on any failure. No retries.
pub struct AssistantEngine {
    hosted: Option<Box<dyn AssistantProvider>>,
    rules: RuleBasedAssistant,
}

impl AssistantEngine {
    pub fn from_env() -> Self {
        let hosted: Option<Box<dyn AssistantProvider>> = match std::env::var("OPENAI_API_KEY") {
            Ok(key) if !key.is_empty() => {
                println!("Assistant: hosted model enabled");
                Some(Box::new(OpenAiAssistant::new(key)))
            }
            _ => {
                println!("Assistant: rule-based responder only");
                None
            }
        };

        AssistantEngine {
            hosted,
            rules: RuleBasedAssistant,
        }
    }

    pub fn rule_based_only() -> Self {
        AssistantEngine {
            hosted: None,
            rules: RuleBasedAssistant,
        }
    }

    pub async fn respond(&self, query: &str) -> (String, TokenUsage) {
        if let Some(hosted) = &self.hosted {
            match hosted.respond(query).await {
                Ok(reply) => return reply,
                Err(err) => eprintln!("Hosted assistant failed, using canned response: {:?}", err),
            }
        }
        (self.rules.reply(query), TokenUsage::default())
    }

    pub async fn generate_itinerary(&self, prompt: &str) -> (GeneratedItinerary, TokenUsage) {
        if let Some(hosted) = &self.hosted {
            match hosted.generate_itinerary(prompt).await {
                Ok(generated) => return generated,
                Err(err) => eprintln!("Hosted itinerary generation failed, using template: {:?}", err),
            }
        }
        (self.rules.itinerary(prompt), TokenUsage::default())
    }

    pub async fn restaurant_recommendations(
        &self,
        preferences: &str,
        location: Option<&str>,
    ) -> (Vec<RestaurantRecommendation>, TokenUsage) {
        if let Some(hosted) = &self.hosted {
            match hosted.restaurant_recommendations(preferences, location).await {
                Ok(recommendations) => return recommendations,
                Err(err) => eprintln!("Hosted recommendations failed, using templates: {:?}", err),
            }
        }
        (self.rules.recommendations(preferences, location), TokenUsage::default())
    }

    pub async fn analyze_preferences(&self, input: &str) -> (PreferenceProfile, TokenUsage) {
        if let Some(hosted) = &self.hosted {
            match hosted.analyze_preferences(input).await {
                Ok(profile) => return profile,
                Err(err) => eprintln!("Hosted preference analysis failed, using keywords: {:?}", err),
            }
        }
        (self.rules.preferences(input), TokenUsage::default())
    }

    pub async fn voice_query(&self, transcript: &str) -> (VoiceAnalysis, TokenUsage) {
        if let Some(hosted) = &self.hosted {
            match hosted.voice_query(transcript).await {
                Ok(analysis) => return analysis,
                Err(err) => eprintln!("Hosted voice analysis failed, using rules: {:?}", err),
            }
        }
        (self.rules.voice(transcript), TokenUsage::default())
    }
}

fn canned_item(
    title: &str,
    description: &str,
    item_type: ItemType,
    start_time: &str,
    end_time: &str,
    location: Option<&str>,
    distance: Option<&str>,
    price: Option<&str>,
) -> ItineraryItem {
    ItineraryItem {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        description: description.to_string(),
        item_type,
        start_time: start_time.to_string(),
        end_time: end_time.to_string(),
        location: location.map(|s| s.to_string()),
        distance: distance.map(|s| s.to_string()),
        price: price.map(|s| s.to_string()),
        image_url: None,
        status: ItemStatus::None,
        booking_reference: None,
    }
}

fn detect_cuisine(text: &str) -> Option<&'static str> {
    CUISINE_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
        .map(|(_, label)| *label)
}

fn collect_labels(text: &str, table: &[(&str, &'static str)]) -> Vec<String> {
    table
        .iter()
        .filter(|(keyword, _)| text.contains(keyword))
        .map(|(_, label)| label.to_string())
        .collect()
}

fn extract_date(text: &str) -> Option<String> {
    if text.contains("today") {
        return Some("today".to_string());
    }
    if text.contains("tomorrow") {
        return Some("tomorrow".to_string());
    }
    if text.contains("next week") {
        return Some("next week".to_string());
    }
    let weekday_re =
        Regex::new(r"\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b").unwrap();
    weekday_re.find(text).map(|m| m.as_str().to_string())
}

fn extract_time(text: &str) -> Option<String> {
    let time_re = Regex::new(r"\b(\d{1,2})(?::(\d{2}))?\s*(am|pm)\b").unwrap();
    time_re.find(text).map(|m| m.as_str().to_string())
}

fn extract_party_size(text: &str) -> Option<u32> {
    let phrase_re = Regex::new(r"(?:party of|table for)\s+(\d+)").unwrap();
    if let Some(caps) = phrase_re.captures(text) {
        return caps[1].parse().ok();
    }
    let count_re = Regex::new(r"(\d+)\s+(?:people|persons|guests|adults)").unwrap();
    count_re.captures(text).and_then(|caps| caps[1].parse().ok())
}
