use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::services::assistant_service::AssistantEngine;

#[derive(Debug, Deserialize)]
pub struct QueryInput {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct PromptInput {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct PreferencesInput {
    #[serde(default)]
    pub preferences: String,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeInput {
    #[serde(default)]
    pub input: String,
}

#[derive(Debug, Deserialize)]
pub struct TranscriptInput {
    #[serde(default)]
    pub transcript: String,
}

/*
    POST /api/ai/query
*/
pub async fn query(
    engine: web::Data<AssistantEngine>,
    input: web::Json<QueryInput>,
) -> impl Responder {
    if input.query.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({ "message": "Query is required" }));
    }

    let (response, tokens) = engine.respond(&input.query).await;
    HttpResponse::Ok().json(json!({ "response": response, "tokens": tokens }))
}

/*
    POST /api/ai/generate-itinerary
*/
pub async fn generate_itinerary(
    engine: web::Data<AssistantEngine>,
    input: web::Json<PromptInput>,
) -> impl Responder {
    if input.prompt.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({ "message": "Prompt is required" }));
    }

    let (itinerary, tokens) = engine.generate_itinerary(&input.prompt).await;
    HttpResponse::Ok().json(json!({ "itinerary": itinerary, "tokens": tokens }))
}

/*
    POST /api/ai/restaurant-recommendations
*/
pub async fn restaurant_recommendations(
    engine: web::Data<AssistantEngine>,
    input: web::Json<PreferencesInput>,
) -> impl Responder {
    if input.preferences.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({ "message": "Preferences are required" }));
    }

    let (recommendations, tokens) = engine
        .restaurant_recommendations(&input.preferences, input.location.as_deref())
        .await;
    HttpResponse::Ok().json(json!({ "recommendations": recommendations, "tokens": tokens }))
}

/*
    POST /api/ai/analyze-preferences
*/
pub async fn analyze_preferences(
    engine: web::Data<AssistantEngine>,
    input: web::Json<AnalyzeInput>,
) -> impl Responder {
    if input.input.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({ "message": "Input is required" }));
    }

    let (preferences, tokens) = engine.analyze_preferences(&input.input).await;
    HttpResponse::Ok().json(json!({ "preferences": preferences, "tokens": tokens }))
}

/*
    POST /api/ai/voice-query
*/
pub async fn voice_query(
    engine: web::Data<AssistantEngine>,
    input: web::Json<TranscriptInput>,
) -> impl Responder {
    if input.transcript.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({ "message": "Transcript is required" }));
    }

    let (analysis, tokens) = engine.voice_query(&input.transcript).await;
    HttpResponse::Ok().json(json!({
        "intent": analysis.intent,
        "entities": analysis.entities,
        "response": analysis.response,
        "tokens": tokens
    }))
}
