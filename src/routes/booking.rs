use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Client,
};
use serde::Deserialize;
use serde_json::json;

use crate::db::mongo::DB_NAME;
use crate::middleware::auth::AuthContext;
use crate::models::booking::{BookRestaurantInput, Booking, BookingStatus, BookingType};
use crate::models::restaurant::Restaurant;
use crate::services::booking_service;

#[derive(Debug, Deserialize)]
pub struct BookingListParams {
    #[serde(rename = "type")]
    pub booking_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BookingStatusInput {
    #[serde(default)]
    pub status: String,
}

/*
    POST /api/restaurants/book
*/
pub async fn book_restaurant(
    data: web::Data<Arc<Client>>,
    ctx: AuthContext,
    input: web::Json<BookRestaurantInput>,
) -> impl Responder {
    let client = data.into_inner();
    let input = input.into_inner();

    let mut errors = Vec::new();
    if input.restaurant_id.trim().is_empty() {
        errors.push(json!({ "field": "restaurantId", "message": "Restaurant ID is required" }));
    }
    if input.date.trim().is_empty() {
        errors.push(json!({ "field": "date", "message": "Date is required" }));
    }
    if input.time.trim().is_empty() {
        errors.push(json!({ "field": "time", "message": "Time is required" }));
    }
    if !errors.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "message": "Restaurant ID, date, and time are required",
            "errors": errors
        }));
    }

    // Restaurant bookings verify the referenced catalog entry; other booking
    // types keep their itemId unchecked.
    let restaurants: mongodb::Collection<Restaurant> =
        client.database(DB_NAME).collection("Restaurants");
    let restaurant_id = match ObjectId::parse_str(&input.restaurant_id) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::NotFound().json(json!({ "message": "Restaurant not found" }))
        }
    };
    match restaurants.find_one(doc! { "_id": restaurant_id }).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return HttpResponse::NotFound().json(json!({ "message": "Restaurant not found" }))
        }
        Err(err) => {
            eprintln!("Failed to fetch restaurant: {:?}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to book restaurant" }));
        }
    }

    let booking = booking_service::build_booking(
        ctx.user_id,
        BookingType::Restaurant,
        input.restaurant_id,
        input.date,
        Some(input.time),
        Some(input.party_size.unwrap_or(2)),
        input.notes,
        BookingStatus::Confirmed,
    );

    let collection: mongodb::Collection<Booking> =
        client.database(DB_NAME).collection("Bookings");
    match collection.insert_one(&booking).await {
        Ok(result) => {
            let mut created = booking;
            created.id = result.inserted_id.as_object_id();
            HttpResponse::Created().json(created)
        }
        Err(err) => {
            eprintln!("Failed to insert booking: {:?}", err);
            HttpResponse::InternalServerError().json(json!({ "message": "Failed to book restaurant" }))
        }
    }
}

/*
    GET /api/bookings?type=restaurant
*/
pub async fn get_bookings(
    data: web::Data<Arc<Client>>,
    ctx: AuthContext,
    params: web::Query<BookingListParams>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Booking> =
        client.database(DB_NAME).collection("Bookings");

    let mut filter = doc! { "userId": ctx.user_id };
    if let Some(kind) = &params.booking_type {
        match BookingType::parse(kind) {
            Some(kind) => {
                filter.insert("type", kind.as_str());
            }
            None => {
                return HttpResponse::BadRequest().json(json!({ "message": "Invalid booking type" }))
            }
        }
    }

    match collection
        .find(filter)
        .sort(doc! { "createdAt": -1 })
        .await
    {
        Ok(cursor) => match cursor.try_collect::<Vec<Booking>>().await {
            Ok(bookings) => HttpResponse::Ok().json(bookings),
            Err(err) => {
                eprintln!("Error retrieving bookings: {:?}", err);
                HttpResponse::InternalServerError()
                    .json(json!({ "message": "Failed to retrieve bookings" }))
            }
        },
        Err(err) => {
            eprintln!("Error fetching bookings: {:?}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to retrieve bookings" }))
        }
    }
}

/*
    PATCH /api/bookings/{id}/status
*/
pub async fn update_booking_status(
    data: web::Data<Arc<Client>>,
    ctx: AuthContext,
    path: web::Path<String>,
    input: web::Json<BookingStatusInput>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Booking> =
        client.database(DB_NAME).collection("Bookings");

    let booking_id = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest()
                .json(json!({ "message": "Invalid booking ID format" }))
        }
    };

    if BookingStatus::parse(&input.status).is_none() {
        return HttpResponse::BadRequest().json(json!({ "message": "Valid status is required" }));
    }

    let filter = doc! { "_id": booking_id, "userId": ctx.user_id };
    let update = doc! { "$set": { "status": &input.status } };

    match collection.update_one(filter.clone(), update).await {
        Ok(result) if result.matched_count == 0 => {
            HttpResponse::NotFound().json(json!({ "message": "Booking not found" }))
        }
        Ok(_) => match collection.find_one(filter).await {
            Ok(Some(booking)) => HttpResponse::Ok().json(booking),
            Ok(None) => HttpResponse::NotFound().json(json!({ "message": "Booking not found" })),
            Err(err) => {
                eprintln!("Failed to fetch booking: {:?}", err);
                HttpResponse::InternalServerError()
                    .json(json!({ "message": "Failed to update booking" }))
            }
        },
        Err(err) => {
            eprintln!("Failed to update booking: {:?}", err);
            HttpResponse::InternalServerError().json(json!({ "message": "Failed to update booking" }))
        }
    }
}
