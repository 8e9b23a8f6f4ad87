use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use chrono::{Duration, NaiveDate};
use futures::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, DateTime};
use mongodb::Client;
use serde_json::json;

use crate::db::mongo::DB_NAME;
use crate::middleware::auth::AuthContext;
use crate::models::itinerary::{
    CreateItineraryInput, CurrentItinerary, ItemStatus, Itinerary, StatusInput,
    UpdateItineraryInput,
};
use crate::services::assistant_service::AssistantEngine;
use crate::services::itinerary_service;

/*
    POST /api/itineraries
*/
pub async fn create_itinerary(
    data: web::Data<Arc<Client>>,
    engine: web::Data<AssistantEngine>,
    ctx: AuthContext,
    input: web::Json<CreateItineraryInput>,
) -> impl Responder {
    let client = data.into_inner();
    let input = input.into_inner();

    let mut errors = Vec::new();
    if input.name.trim().is_empty() {
        errors.push(json!({ "field": "name", "message": "Name is required" }));
    }
    if input.destination.trim().is_empty() {
        errors.push(json!({ "field": "destination", "message": "Destination is required" }));
    }
    if input.start_date.trim().is_empty() {
        errors.push(json!({ "field": "startDate", "message": "Start date is required" }));
    }
    if input.number_of_days.is_none() && input.days.is_none() {
        errors.push(json!({ "field": "numberOfDays", "message": "Number of days is required" }));
    }
    if !errors.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "message": "Name, destination, number of days, and start date are required",
            "errors": errors
        }));
    }

    let start = match NaiveDate::parse_from_str(&input.start_date, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => {
            return HttpResponse::BadRequest()
                .json(json!({ "message": "startDate must be formatted as YYYY-MM-DD" }))
        }
    };

    let mut days = match input.days {
        Some(drafts) => itinerary_service::materialize_days(drafts, &input.destination),
        None => itinerary_service::build_empty_days(
            &input.destination,
            start,
            input.number_of_days.unwrap_or(0),
        ),
    };

    // An optional free-text prompt fills the days through the assistant; the
    // empty frame is kept if generation comes back blank.
    if let Some(prompt) = input.prompt.as_deref().filter(|p| !p.trim().is_empty()) {
        let (generated, _tokens) = engine.generate_itinerary(prompt).await;
        if !generated.days.is_empty() {
            days = generated.days;
        }
    }

    let end_offset = (days.len() as i64 - 1).max(0);
    let end_date = (start + Duration::days(end_offset))
        .format("%Y-%m-%d")
        .to_string();

    let now = DateTime::now();
    let itinerary = Itinerary {
        id: None,
        user_id: ctx.user_id,
        name: input.name,
        destination: input.destination,
        start_date: input.start_date,
        end_date: Some(end_date),
        days,
        created_at: Some(now),
        updated_at: Some(now),
    };

    let collection: mongodb::Collection<Itinerary> =
        client.database(DB_NAME).collection("Itineraries");
    match collection.insert_one(&itinerary).await {
        Ok(result) => {
            let itinerary_id = match result.inserted_id.as_object_id() {
                Some(id) => id,
                None => {
                    return HttpResponse::InternalServerError()
                        .json(json!({ "message": "Failed to create itinerary" }))
                }
            };

            if let Err(err) = touch_current(&client, ctx.user_id, itinerary_id).await {
                eprintln!("Failed to update current itinerary pointer: {:?}", err);
            }

            let mut created = itinerary;
            created.id = Some(itinerary_id);
            HttpResponse::Created().json(created)
        }
        Err(err) => {
            eprintln!("Failed to insert itinerary: {:?}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to create itinerary" }))
        }
    }
}

/*
    GET /api/itineraries/current
*/
pub async fn get_current(data: web::Data<Arc<Client>>, ctx: AuthContext) -> impl Responder {
    let client = data.into_inner();
    let pointers: mongodb::Collection<CurrentItinerary> =
        client.database(DB_NAME).collection("CurrentItineraries");

    let pointer = match pointers.find_one(doc! { "userId": ctx.user_id }).await {
        Ok(Some(pointer)) => pointer,
        Ok(None) => {
            return HttpResponse::NotFound().json(json!({ "message": "No active itinerary found" }))
        }
        Err(err) => {
            eprintln!("Failed to fetch current itinerary pointer: {:?}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to retrieve current itinerary" }));
        }
    };

    let collection: mongodb::Collection<Itinerary> =
        client.database(DB_NAME).collection("Itineraries");
    match collection
        .find_one(doc! { "_id": pointer.itinerary_id, "userId": ctx.user_id })
        .await
    {
        Ok(Some(itinerary)) => HttpResponse::Ok().json(itinerary),
        Ok(None) => HttpResponse::NotFound().json(json!({ "message": "No active itinerary found" })),
        Err(err) => {
            eprintln!("Failed to retrieve itinerary: {:?}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to retrieve current itinerary" }))
        }
    }
}

/*
    GET /api/itineraries/user
*/
pub async fn get_user_itineraries(data: web::Data<Arc<Client>>, ctx: AuthContext) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Itinerary> =
        client.database(DB_NAME).collection("Itineraries");

    match collection
        .find(doc! { "userId": ctx.user_id })
        .sort(doc! { "updatedAt": -1 })
        .await
    {
        Ok(cursor) => match cursor.try_collect::<Vec<Itinerary>>().await {
            Ok(itineraries) => HttpResponse::Ok().json(itineraries),
            Err(err) => {
                eprintln!("Failed to collect itineraries: {:?}", err);
                HttpResponse::InternalServerError()
                    .json(json!({ "message": "Failed to retrieve user itineraries" }))
            }
        },
        Err(err) => {
            eprintln!("Failed to retrieve itineraries: {:?}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to retrieve user itineraries" }))
        }
    }
}

/*
    GET /api/itineraries/{id}
*/
pub async fn get_by_id(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    ctx: AuthContext,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Itinerary> =
        client.database(DB_NAME).collection("Itineraries");

    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().json(json!({ "message": "Invalid ID" })),
    };

    match collection.find_one(doc! { "_id": id }).await {
        Ok(Some(itinerary)) => {
            if itinerary.user_id != ctx.user_id {
                return HttpResponse::Forbidden().json(json!({ "message": "Access denied" }));
            }
            HttpResponse::Ok().json(itinerary)
        }
        Ok(None) => HttpResponse::NotFound().json(json!({ "message": "Itinerary not found" })),
        Err(err) => {
            eprintln!("Failed to retrieve itinerary: {:?}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to retrieve itinerary" }))
        }
    }
}

/*
    PATCH /api/itineraries/{id}
*/
pub async fn update_itinerary(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    ctx: AuthContext,
    input: web::Json<UpdateItineraryInput>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Itinerary> =
        client.database(DB_NAME).collection("Itineraries");

    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().json(json!({ "message": "Invalid ID" })),
    };

    let existing = match collection.find_one(doc! { "_id": id }).await {
        Ok(Some(itinerary)) => itinerary,
        Ok(None) => {
            return HttpResponse::NotFound().json(json!({ "message": "Itinerary not found" }))
        }
        Err(err) => {
            eprintln!("Failed to retrieve itinerary: {:?}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to update itinerary" }));
        }
    };

    if existing.user_id != ctx.user_id {
        return HttpResponse::Forbidden().json(json!({ "message": "Access denied" }));
    }

    let input = input.into_inner();
    let destination = input
        .destination
        .clone()
        .unwrap_or_else(|| existing.destination.clone());

    let mut update_doc = doc! { "updatedAt": DateTime::now() };
    if let Some(name) = input.name {
        update_doc.insert("name", name);
    }
    if let Some(new_destination) = input.destination {
        update_doc.insert("destination", new_destination);
    }
    if let Some(start_date) = input.start_date {
        update_doc.insert("startDate", start_date);
    }
    if let Some(end_date) = input.end_date {
        update_doc.insert("endDate", end_date);
    }
    if let Some(drafts) = input.days {
        let days = itinerary_service::materialize_days(drafts, &destination);
        match bson::to_bson(&days) {
            Ok(days) => {
                update_doc.insert("days", days);
            }
            Err(err) => {
                eprintln!("Failed to serialize days: {:?}", err);
                return HttpResponse::InternalServerError()
                    .json(json!({ "message": "Failed to update itinerary" }));
            }
        }
    }

    match collection
        .update_one(doc! { "_id": id }, doc! { "$set": update_doc })
        .await
    {
        Ok(_) => {
            if let Err(err) = touch_current(&client, ctx.user_id, id).await {
                eprintln!("Failed to update current itinerary pointer: {:?}", err);
            }
            match collection.find_one(doc! { "_id": id }).await {
                Ok(Some(updated)) => HttpResponse::Ok().json(updated),
                Ok(None) => {
                    HttpResponse::NotFound().json(json!({ "message": "Itinerary not found" }))
                }
                Err(err) => {
                    eprintln!("Failed to retrieve itinerary: {:?}", err);
                    HttpResponse::InternalServerError()
                        .json(json!({ "message": "Failed to update itinerary" }))
                }
            }
        }
        Err(err) => {
            eprintln!("Failed to update itinerary: {:?}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to update itinerary" }))
        }
    }
}

/*
    DELETE /api/itineraries/{id}
*/
pub async fn delete_itinerary(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    ctx: AuthContext,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Itinerary> =
        client.database(DB_NAME).collection("Itineraries");

    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().json(json!({ "message": "Invalid ID" })),
    };

    let existing = match collection.find_one(doc! { "_id": id }).await {
        Ok(Some(itinerary)) => itinerary,
        Ok(None) => {
            return HttpResponse::NotFound().json(json!({ "message": "Itinerary not found" }))
        }
        Err(err) => {
            eprintln!("Failed to retrieve itinerary: {:?}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to delete itinerary" }));
        }
    };

    if existing.user_id != ctx.user_id {
        return HttpResponse::Forbidden().json(json!({ "message": "Access denied" }));
    }

    match collection.delete_one(doc! { "_id": id }).await {
        Ok(_) => {
            // Drop the pointer if it referenced the deleted itinerary
            let pointers: mongodb::Collection<CurrentItinerary> =
                client.database(DB_NAME).collection("CurrentItineraries");
            if let Err(err) = pointers
                .delete_one(doc! { "userId": ctx.user_id, "itineraryId": id })
                .await
            {
                eprintln!("Failed to clear current itinerary pointer: {:?}", err);
            }

            HttpResponse::Ok().json(json!({ "message": "Itinerary deleted successfully" }))
        }
        Err(err) => {
            eprintln!("Failed to delete itinerary: {:?}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to delete itinerary" }))
        }
    }
}

/*
    PATCH /api/itineraries/items/{itemId}/status
*/
pub async fn update_item_status(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    ctx: AuthContext,
    input: web::Json<StatusInput>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Itinerary> =
        client.database(DB_NAME).collection("Itineraries");

    let item_id = path.into_inner();
    let status = match ItemStatus::parse(&input.status) {
        Some(status) => status,
        None => {
            return HttpResponse::BadRequest().json(json!({ "message": "Valid status is required" }))
        }
    };

    // Unindexed walk of every itinerary's embedded days and items to find the
    // owner of this item id; linear in itineraries × days × items.
    let mut itinerary = match collection.find_one(doc! { "days.items.id": &item_id }).await {
        Ok(Some(itinerary)) => itinerary,
        Ok(None) => {
            return HttpResponse::NotFound()
                .json(json!({ "message": "Item not found in any itinerary" }))
        }
        Err(err) => {
            eprintln!("Failed to locate item: {:?}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to update item status" }));
        }
    };

    if itinerary.user_id != ctx.user_id {
        return HttpResponse::Forbidden().json(json!({ "message": "Access denied" }));
    }

    let itinerary_id = match itinerary.id {
        Some(id) => id,
        None => {
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to update item status" }))
        }
    };

    let updated = match itinerary_service::set_item_status(&mut itinerary, &item_id, status) {
        Some(item) => item,
        None => {
            return HttpResponse::NotFound()
                .json(json!({ "message": "Item not found in any itinerary" }))
        }
    };

    let days = match bson::to_bson(&itinerary.days) {
        Ok(days) => days,
        Err(err) => {
            eprintln!("Failed to serialize days: {:?}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to update item status" }));
        }
    };

    match collection
        .update_one(
            doc! { "_id": itinerary_id },
            doc! { "$set": { "days": days, "updatedAt": DateTime::now() } },
        )
        .await
    {
        Ok(_) => HttpResponse::Ok().json(updated),
        Err(err) => {
            eprintln!("Failed to update item status: {:?}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to update item status" }))
        }
    }
}

async fn touch_current(
    client: &Client,
    user_id: ObjectId,
    itinerary_id: ObjectId,
) -> Result<(), mongodb::error::Error> {
    let collection: mongodb::Collection<CurrentItinerary> =
        client.database(DB_NAME).collection("CurrentItineraries");
    collection
        .update_one(
            doc! { "userId": user_id },
            doc! { "$set": { "itineraryId": itinerary_id, "updatedAt": DateTime::now() } },
        )
        .upsert(true)
        .await?;
    Ok(())
}
