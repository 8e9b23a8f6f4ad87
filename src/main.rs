use std::env;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use travelsage_api::db;
use travelsage_api::middleware::auth::SessionAuth;
use travelsage_api::routes;
use travelsage_api::services::assistant_service::AssistantEngine;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("TravelSage API starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    let host = env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);

    let mongo_uri = env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    let client = db::mongo::create_mongo_client(&mongo_uri).await;

    if let Err(err) = db::seed::seed_catalog(&client).await {
        eprintln!("Catalog seeding failed: {:?}", err);
    }

    let assistant = web::Data::new(AssistantEngine::from_env());

    println!("Listening on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(web::Data::new(client.clone()))
            .app_data(assistant.clone())
            .route("/health", web::get().to(|| async { "OK" }))
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/auth")
                            .route("/register", web::post().to(routes::auth::register))
                            .route("/login", web::post().to(routes::auth::login))
                            .route("/logout", web::post().to(routes::auth::logout))
                            .service(
                                web::scope("")
                                    .wrap(SessionAuth)
                                    .route("/me", web::get().to(routes::auth::me))
                                    .route("/profile", web::put().to(routes::auth::update_profile))
                                    .route(
                                        "/password",
                                        web::put().to(routes::auth::change_password),
                                    ),
                            ),
                    )
                    .service(
                        web::scope("/destinations")
                            .route("", web::get().to(routes::destination::get_destinations))
                            .route("/featured", web::get().to(routes::destination::get_featured))
                            .route("/search", web::get().to(routes::destination::search))
                            .route(
                                "/{id}/activities",
                                web::get().to(routes::destination::get_activities_for_destination),
                            )
                            .route("/{id}", web::get().to(routes::destination::get_by_id)),
                    )
                    .service(
                        web::scope("/restaurants")
                            .route("", web::get().to(routes::restaurant::get_restaurants))
                            .route(
                                "/recommended",
                                web::get().to(routes::restaurant::get_recommended),
                            )
                            .route("/search", web::get().to(routes::restaurant::search))
                            .service(
                                web::scope("/book")
                                    .wrap(SessionAuth)
                                    .route("", web::post().to(routes::booking::book_restaurant)),
                            )
                            .route("/{id}", web::get().to(routes::restaurant::get_by_id)),
                    )
                    .service(
                        web::scope("/activities")
                            .route("", web::get().to(routes::activity::get_activities))
                            .route("/popular", web::get().to(routes::activity::get_popular)),
                    )
                    .service(
                        web::scope("/bookings")
                            .wrap(SessionAuth)
                            .route("", web::get().to(routes::booking::get_bookings))
                            .route(
                                "/{id}/status",
                                web::patch().to(routes::booking::update_booking_status),
                            ),
                    )
                    .service(
                        web::scope("/itineraries")
                            .wrap(SessionAuth)
                            .route("/current", web::get().to(routes::itinerary::get_current))
                            .route(
                                "/user",
                                web::get().to(routes::itinerary::get_user_itineraries),
                            )
                            .route("", web::post().to(routes::itinerary::create_itinerary))
                            .route(
                                "/items/{itemId}/status",
                                web::patch().to(routes::itinerary::update_item_status),
                            )
                            .route("/{id}", web::get().to(routes::itinerary::get_by_id))
                            .route("/{id}", web::patch().to(routes::itinerary::update_itinerary))
                            .route(
                                "/{id}",
                                web::delete().to(routes::itinerary::delete_itinerary),
                            ),
                    )
                    .service(
                        web::scope("/ai")
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
                    .configure(routes::admin::config),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
