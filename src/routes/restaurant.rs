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
use crate::models::restaurant::Restaurant;
use crate::services::catalog_service;

const RECOMMENDED_LIMIT: i64 = 4;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSearchParams {
    pub query: Option<String>,
    pub cuisine: Option<String>,
    pub price_range: Option<String>,
}

/*
    /api/restaurants
*/
pub async fn get_restaurants(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Restaurant> =
        client.database(DB_NAME).collection("Restaurants");

    match collection.find(doc! {}).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Restaurant>>().await {
            Ok(restaurants) => HttpResponse::Ok().json(restaurants),
            Err(err) => {
                eprintln!("Failed to collect documents: {:?}", err);
                HttpResponse::InternalServerError()
                    .json(json!({ "message": "Failed to retrieve restaurants" }))
            }
        },
        Err(err) => {
            eprintln!("Failed to find documents: {:?}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to retrieve restaurants" }))
        }
    }
}

/*
    /api/restaurants/recommended
*/
pub async fn get_recommended(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Restaurant> =
        client.database(DB_NAME).collection("Restaurants");

    match collection
        .find(doc! { "isRecommended": true })
        .limit(RECOMMENDED_LIMIT)
        .await
    {
        Ok(cursor) => match cursor.try_collect::<Vec<Restaurant>>().await {
            Ok(restaurants) => HttpResponse::Ok().json(restaurants),
            Err(err) => {
                eprintln!("Failed to collect documents: {:?}", err);
                HttpResponse::InternalServerError()
                    .json(json!({ "message": "Failed to retrieve restaurant recommendations" }))
            }
        },
        Err(err) => {
            eprintln!("Failed to find documents: {:?}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to retrieve restaurant recommendations" }))
        }
    }
}

/*
    /api/restaurants/search?query=&cuisine=&priceRange=
*/
pub async fn search(
    data: web::Data<Arc<Client>>,
    params: web::Query<RestaurantSearchParams>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Restaurant> =
        client.database(DB_NAME).collection("Restaurants");

    let mut filter = doc! {};
    if let Some(clauses) = catalog_service::text_filter(
        params.query.as_deref().unwrap_or(""),
        &["name", "description", "location"],
    ) {
        filter.insert("$or", clauses);
    }
    if let Some(cuisine) = catalog_service::tag_filter(params.cuisine.as_deref().unwrap_or("")) {
        filter.insert("cuisine", cuisine);
    }
    if let Some(price_range) =
        catalog_service::exact_filter(params.price_range.as_deref().unwrap_or(""))
    {
        filter.insert("priceRange", price_range);
    }

    match collection.find(filter).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Restaurant>>().await {
            Ok(restaurants) => HttpResponse::Ok().json(restaurants),
            Err(err) => {
                eprintln!("Failed to collect documents: {:?}", err);
                HttpResponse::InternalServerError()
                    .json(json!({ "message": "Failed to search restaurants" }))
            }
        },
        Err(err) => {
            eprintln!("Failed to find documents: {:?}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to search restaurants" }))
        }
    }
}

/*
    /api/restaurants/{id}
*/
pub async fn get_by_id(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Restaurant> =
        client.database(DB_NAME).collection("Restaurants");

    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().json(json!({ "message": "Invalid ID" })),
    };

    match collection.find_one(doc! { "_id": id }).await {
        Ok(Some(restaurant)) => HttpResponse::Ok().json(restaurant),
        Ok(None) => HttpResponse::NotFound().json(json!({ "message": "Restaurant not found" })),
        Err(err) => {
            eprintln!("Failed to retrieve restaurant: {:?}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to retrieve restaurant" }))
        }
    }
}
