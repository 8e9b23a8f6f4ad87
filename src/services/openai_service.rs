use async_trait::async_trait;
use serde_json::{json, Value};

use crate::models::itinerary::DayDraft;
use crate::services::assistant_service::{
    AssistantError, AssistantProvider, GeneratedItinerary, PreferenceProfile,
    RestaurantRecommendation, TokenUsage, VoiceAnalysis,
};
use crate::services::itinerary_service;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-4o";

const RESPOND_SYSTEM: &str = "You are a helpful travel assistant named TravelSage. You provide concise, informative responses about travel destinations, restaurants, activities, and general travel advice. Be friendly and conversational.";

const ITINERARY_SYSTEM: &str = r#"You are an AI travel planner that creates detailed itineraries.
Generate a travel itinerary based on user preferences.
The output should be a JSON object with the following structure:
{
  "name": "Trip name",
  "destination": "Main destination",
  "days": [
    {
      "title": "Day 1: Title",
      "date": "YYYY-MM-DD",
      "items": [
        {
          "title": "Activity name",
          "description": "Detailed description",
          "type": "activity|food|transportation|accommodation",
          "startTime": "HH:MM",
          "endTime": "HH:MM",
          "location": "Location name",
          "distance": "Distance from previous or hotel",
          "price": "Price range or exact amount",
          "status": "none"
        }
      ]
    }
  ]
}"#;

const RECOMMEND_SYSTEM: &str = r#"You are a restaurant recommendation system. Based on the user's preferences and location (if provided),
generate a list of restaurant recommendations.
The output should be a JSON object with a "recommendations" array with the following structure for each restaurant:
{
  "name": "Restaurant name",
  "cuisine": ["Cuisine type"],
  "description": "Brief description",
  "priceRange": "$/$$/$$$/$$$$",
  "location": "Location/address",
  "recommendationReason": "Why you recommend this"
}"#;

const PREFERENCES_SYSTEM: &str = r#"Analyze the user's text input and extract travel preferences.
The output should be a JSON object with the following structure:
{
  "destinations": ["List of mentioned destinations"],
  "interests": ["List of activities or interests"],
  "cuisines": ["Food preferences"],
  "budget": "Budget level (low/medium/high)",
  "travelStyle": ["Adventure/luxury/cultural/etc"],
  "travelDuration": "Number of days if mentioned",
  "accommodation": ["Preferences like hotel/hostel/etc"]
}"#;

const VOICE_SYSTEM: &str = r#"Analyze the voice transcript and identify the intent of the query. Determine if it's:
1. A restaurant search/booking
2. An itinerary request
3. A destination query
4. A general travel question
The output should be a JSON object with the following structure:
{
  "intent": "restaurant_search|restaurant_booking|itinerary|destination|general",
  "entities": {
    "destination": "Extracted destination",
    "cuisine": "For restaurant searches",
    "date": "Extracted date if any",
    "time": "Extracted time if any",
    "partySize": "Number of people if mentioned",
    "preferences": ["Any other preferences mentioned"]
  },
  "response": "A natural language response to the query"
}"#;

/// Chat-completions client implementing the same interface as the rule-based
/// responder. Callers fall back to the rules when a request here fails.
pub struct OpenAiAssistant {
    api_key: String,
    http: reqwest::Client,
}

impl OpenAiAssistant {
    pub fn new(api_key: String) -> Self {
        OpenAiAssistant {
            api_key,
            http: reqwest::Client::new(),
        }
    }

    async fn chat(
        &self,
        system: &str,
        user: &str,
        json_mode: bool,
    ) -> Result<(String, TokenUsage), AssistantError> {
        let mut body = json!({
            "model": MODEL,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user }
            ]
        });
        if json_mode {
            body["response_format"] = json!({ "type": "json_object" });
        }

        let response = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(format!("chat completion failed with status {}", response.status()).into());
        }

        let payload: Value = response.json().await?;
        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or("completion response had no content")?
            .to_string();

        let usage = TokenUsage {
            prompt: payload["usage"]["prompt_tokens"].as_u64().unwrap_or(0) as u32,
            completion: payload["usage"]["completion_tokens"].as_u64().unwrap_or(0) as u32,
            total: payload["usage"]["total_tokens"].as_u64().unwrap_or(0) as u32,
        };

        Ok((content, usage))
    }
}

#[async_trait]
impl AssistantProvider for OpenAiAssistant {
    async fn respond(&self, query: &str) -> Result<(String, TokenUsage), AssistantError> {
        self.chat(RESPOND_SYSTEM, query, false).await
    }

    async fn generate_itinerary(
        &self,
        prompt: &str,
    ) -> Result<(GeneratedItinerary, TokenUsage), AssistantError> {
        let (content, usage) = self.chat(ITINERARY_SYSTEM, prompt, true).await?;
        let value: Value = serde_json::from_str(&content)?;

        let destination = value["destination"].as_str().unwrap_or("").to_string();
        let name = value["name"]
            .as_str()
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("Trip to {}", destination));
        let drafts: Vec<DayDraft> =
            serde_json::from_value(value.get("days").cloned().unwrap_or_else(|| json!([])))?;

        Ok((
            GeneratedItinerary {
                name,
                destination: destination.clone(),
                days: itinerary_service::materialize_days(drafts, &destination),
            },
            usage,
        ))
    }

    async fn restaurant_recommendations(
        &self,
        preferences: &str,
        location: Option<&str>,
    ) -> Result<(Vec<RestaurantRecommendation>, TokenUsage), AssistantError> {
        let user = match location {
            Some(location) => format!("Preferences: {}\nLocation: {}", preferences, location),
            None => format!("Preferences: {}", preferences),
        };
        let (content, usage) = self.chat(RECOMMEND_SYSTEM, &user, true).await?;
        let value: Value = serde_json::from_str(&content)?;

        // The model sometimes returns a bare array instead of the wrapped form.
        let recommendations = if value.is_array() {
            serde_json::from_value(value)?
        } else {
            serde_json::from_value(
                value
                    .get("recommendations")
                    .cloned()
                    .unwrap_or_else(|| json!([])),
            )?
        };

        Ok((recommendations, usage))
    }

    async fn analyze_preferences(
        &self,
        input: &str,
    ) -> Result<(PreferenceProfile, TokenUsage), AssistantError> {
        let (content, usage) = self.chat(PREFERENCES_SYSTEM, input, true).await?;
        let profile: PreferenceProfile = serde_json::from_str(&content)?;
        Ok((profile, usage))
    }

    async fn voice_query(
        &self,
        transcript: &str,
    ) -> Result<(VoiceAnalysis, TokenUsage), AssistantError> {
        let (content, usage) = self.chat(VOICE_SYSTEM, transcript, true).await?;
        let analysis: VoiceAnalysis = serde_json::from_str(&content)?;
        Ok((analysis, usage))
    }
}
