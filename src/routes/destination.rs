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
use crate::models::activity::Activity;
use crate::models::destination::Destination;
use crate::services::catalog_service;

const FEATURED_LIMIT: i64 = 6;

#[derive(Debug, Deserialize)]
pub struct DestinationSearchParams {
    pub query: Option<String>,
    pub continent: Option<String>,
    pub interest: Option<String>,
}

/*
    /api/destinations
*/
pub async fn get_destinations(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Destination> =
        client.database(DB_NAME).collection("Destinations");

    match collection.find(doc! {}).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Destination>>().await {
            Ok(destinations) => HttpResponse::Ok().json(destinations),
            Err(err) => {
                eprintln!("Failed to collect documents: {:?}", err);
                HttpResponse::InternalServerError()
                    .json(json!({ "message": "Failed to retrieve destinations" }))
            }
        },
        Err(err) => {
            eprintln!("Failed to find documents: {:?}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to retrieve destinations" }))
        }
    }
}

/*
    /api/destinations/featured
*/
pub async fn get_featured(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Destination> =
        client.database(DB_NAME).collection("Destinations");

    match collection
        .find(doc! { "isFeatured": true })
        .limit(FEATURED_LIMIT)
        .await
    {
        Ok(cursor) => match cursor.try_collect::<Vec<Destination>>().await {
            Ok(destinations) => HttpResponse::Ok().json(destinations),
            Err(err) => {
                eprintln!("Failed to collect documents: {:?}", err);
                HttpResponse::InternalServerError()
                    .json(json!({ "message": "Failed to retrieve featured destinations" }))
            }
        },
        Err(err) => {
            eprintln!("Failed to find documents: {:?}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to retrieve featured destinations" }))
        }
    }
}

/*
    /api/destinations/search?query=&continent=&interest=
*/
pub async fn search(
    data: web::Data<Arc<Client>>,
    params: web::Query<DestinationSearchParams>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Destination> =
        client.database(DB_NAME).collection("Destinations");

    let mut filter = doc! {};
    if let Some(clauses) = catalog_service::text_filter(
        params.query.as_deref().unwrap_or(""),
        &["name", "country", "description"],
    ) {
        filter.insert("$or", clauses);
    }
    if let Some(continent) = catalog_service::exact_filter(params.continent.as_deref().unwrap_or(""))
    {
        filter.insert("continent", continent);
    }
    if let Some(interest) = catalog_service::tag_filter(params.interest.as_deref().unwrap_or("")) {
        filter.insert("interests", interest);
    }

    match collection.find(filter).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Destination>>().await {
            Ok(destinations) => HttpResponse::Ok().json(destinations),
            Err(err) => {
                eprintln!("Failed to collect documents: {:?}", err);
                HttpResponse::InternalServerError()
                    .json(json!({ "message": "Failed to search destinations" }))
            }
        },
        Err(err) => {
            eprintln!("Failed to find documents: {:?}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to search destinations" }))
        }
    }
}

/*
    /api/destinations/{id}
*/
pub async fn get_by_id(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Destination> =
        client.database(DB_NAME).collection("Destinations");

    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().json(json!({ "message": "Invalid ID" })),
    };

    match collection.find_one(doc! { "_id": id }).await {
        Ok(Some(destination)) => HttpResponse::Ok().json(destination),
        Ok(None) => HttpResponse::NotFound().json(json!({ "message": "Destination not found" })),
        Err(err) => {
            eprintln!("Failed to retrieve destination: {:?}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to retrieve destination" }))
        }
    }
}

/*
    /api/destinations/{id}/activities
*/
pub async fn get_activities_for_destination(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let client = data.into_inner();
    let destinations: mongodb::Collection<Destination> =
        client.database(DB_NAME).collection("Destinations");

    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().json(json!({ "message": "Invalid ID" })),
    };

    let destination = match destinations.find_one(doc! { "_id": id }).await {
        Ok(Some(destination)) => destination,
        Ok(None) => {
            return HttpResponse::NotFound().json(json!({ "message": "Destination not found" }))
        }
        Err(err) => {
            eprintln!("Failed to retrieve destination: {:?}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to retrieve activities" }));
        }
    };

    // Activities carry a free-text location, so match it against the
    // destination's name or country.
    let activities: mongodb::Collection<Activity> =
        client.database(DB_NAME).collection("Activities");
    let filter = doc! {
        "$or": [
            { "location": { "$regex": regex::escape(&destination.name), "$options": "i" } },
            { "location": { "$regex": regex::escape(&destination.country), "$options": "i" } },
        ]
    };

    match activities.find(filter).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Activity>>().await {
            Ok(activities) => HttpResponse::Ok().json(activities),
            Err(err) => {
                eprintln!("Failed to collect documents: {:?}", err);
                HttpResponse::InternalServerError()
                    .json(json!({ "message": "Failed to retrieve activities" }))
            }
        },
        Err(err) => {
            eprintln!("Failed to find documents: {:?}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to retrieve activities" }))
        }
    }
}
