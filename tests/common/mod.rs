use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, Responder};

use travelsage_api::routes;
use travelsage_api::services::assistant_service::AssistantEngine;

/// Test harness without a database: the assistant routes are the real
/// handlers (they are pure), everything storage-backed is mocked with
/// handlers that reproduce the route contract.
pub struct TestApp;

impl TestApp {
    pub fn new() -> Self {
        TestApp
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(AssistantEngine::rule_based_only()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/api/ai")
                    .route("/query", web::post().to(routes::assistant::query))
                    .route(
                        "/generate-itinerary",
                        web::post().to(routes::assistant::generate_itinerary),
                    )
                    .route(
                        "/restaurant-recommendations",
                        web::post().to(routes::assistant::restaurant_recommendations),
                    )
                    .route(
                        "/analyze-preferences",
                        web::post().to(routes::assistant::analyze_preferences),
                    )
                    .route(
                        "/voice-query",
                        web::post().to(routes::assistant::voice_query),
                    ),
            )
            .route("/api/destinations", web::get().to(empty_list))
            .route("/api/destinations/featured", web::get().to(empty_list))
            .route("/api/destinations/search", web::get().to(empty_list))
            .route("/api/restaurants", web::get().to(empty_list))
            .route("/api/restaurants/recommended", web::get().to(empty_list))
            .route("/api/restaurants/book", web::post().to(unauthorized_handler))
            .route("/api/activities", web::get().to(empty_list))
            .route("/api/activities/popular", web::get().to(empty_list))
            .route("/api/bookings", web::get().to(unauthorized_handler))
            .service(
                web::scope("/api/auth")
                    .route("/register", web::post().to(invalid_input))
                    .route("/login", web::post().to(invalid_credentials))
                    .route("/me", web::get().to(unauthorized_handler)),
            )
            .service(
                web::scope("/api/itineraries")
                    .route("/current", web::get().to(unauthorized_handler))
                    .route("/user", web::get().to(unauthorized_handler))
                    .route("", web::post().to(unauthorized_handler))
                    .route("/{id}", web::get().to(unauthorized_handler)),
            )
    }
}

// Mock handler functions for testing
async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

async fn empty_list() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!([]))
}

async fn unauthorized_handler() -> impl Responder {
    HttpResponse::Unauthorized().json(serde_json::json!({ "message": "Authentication required" }))
}

async fn invalid_credentials() -> impl Responder {
    HttpResponse::Unauthorized().json(serde_json::json!({ "message": "Invalid credentials" }))
}

async fn invalid_input() -> impl Responder {
    HttpResponse::BadRequest().json(serde_json::json!({ "message": "Invalid input" }))
}
