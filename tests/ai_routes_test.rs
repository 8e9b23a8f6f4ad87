mod common;

use actix_web::test;
use serde_json::json;
use serial_test::serial;

use common::TestApp;

#[actix_rt::test]
#[serial]
async fn test_ai_query_returns_response_and_tokens() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/ai/query")
        .set_json(&json!({ "query": "Where should I go this summer?" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(!body["response"].as_str().unwrap().is_empty());
    assert_eq!(body["tokens"]["total"], 0);
}

#[actix_rt::test]
#[serial]
async fn test_ai_query_requires_query() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/ai/query")
        .set_json(&json!({}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Query is required");
}

#[actix_rt::test]
#[serial]
async fn test_voice_query_classifies_restaurant_search() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/ai/voice-query")
        .set_json(&json!({ "transcript": "Suggest restaurants in Barcelona" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["intent"], "restaurant_search");
    assert_eq!(body["entities"]["destination"], "Barcelona");
    assert!(!body["response"].as_str().unwrap().is_empty());
}

#[actix_rt::test]
#[serial]
async fn test_voice_query_extracts_booking_details() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/ai/voice-query")
        .set_json(&json!({
            "transcript": "Book a table for 4 at an Italian restaurant in Rome tomorrow at 7 pm"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["intent"], "restaurant_booking");
    assert_eq!(body["entities"]["cuisine"], "Italian");
    assert_eq!(body["entities"]["destination"], "Rome");
    assert_eq!(body["entities"]["date"], "tomorrow");
    assert_eq!(body["entities"]["time"], "7 pm");
    assert_eq!(body["entities"]["partySize"], 4);
}

#[actix_rt::test]
#[serial]
async fn test_generate_itinerary_detects_destination() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/ai/generate-itinerary")
        .set_json(&json!({ "prompt": "Three days in Tokyo with temples and sushi" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["itinerary"]["destination"], "Tokyo");
    assert_eq!(body["itinerary"]["days"].as_array().unwrap().len(), 3);

    for day in body["itinerary"]["days"].as_array().unwrap() {
        assert!(!day["items"].as_array().unwrap().is_empty());
        for item in day["items"].as_array().unwrap() {
            assert_eq!(item["status"], "none");
        }
    }
}

#[actix_rt::test]
#[serial]
async fn test_generate_itinerary_requires_prompt() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/ai/generate-itinerary")
        .set_json(&json!({ "prompt": "" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn test_restaurant_recommendations_detect_cuisine_and_budget() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/ai/restaurant-recommendations")
        .set_json(&json!({ "preferences": "cheap italian pizza", "location": "Rome" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    let recommendations = body["recommendations"].as_array().unwrap();
    assert!(recommendations.len() >= 4);
    assert_eq!(recommendations[0]["name"], "Italian Delight");
    assert_eq!(recommendations[0]["priceRange"], "$");
}

#[actix_rt::test]
#[serial]
async fn test_analyze_preferences_extracts_profile() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/ai/analyze-preferences")
        .set_json(&json!({
            "input": "I want 5 days in Paris with sushi and a luxury hotel"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    let preferences = &body["preferences"];
    assert!(preferences["destinations"]
        .as_array()
        .unwrap()
        .iter()
        .any(|d| d == "Paris"));
    assert!(preferences["cuisines"]
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c == "Japanese"));
    assert_eq!(preferences["budget"], "high");
    assert_eq!(preferences["travelDuration"], "5 days");
}
