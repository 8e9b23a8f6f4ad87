use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use futures::TryStreamExt;
use mongodb::{bson::doc, Client};
use serde_json::json;

use crate::db::mongo::DB_NAME;
use crate::models::activity::Activity;

const POPULAR_LIMIT: i64 = 4;

/*
    /api/activities
*/
pub async fn get_activities(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Activity> =
        client.database(DB_NAME).collection("Activities");

    match collection.find(doc! {}).await {
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

/*
    /api/activities/popular
*/
pub async fn get_popular(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Activity> =
        client.database(DB_NAME).collection("Activities");

    match collection
        .find(doc! {})
        .sort(doc! { "rating": -1 })
        .limit(POPULAR_LIMIT)
        .await
    {
        Ok(cursor) => match cursor.try_collect::<Vec<Activity>>().await {
            Ok(activities) => HttpResponse::Ok().json(activities),
            Err(err) => {
                eprintln!("Failed to collect documents: {:?}", err);
                HttpResponse::InternalServerError()
                    .json(json!({ "message": "Failed to retrieve popular activities" }))
            }
        },
        Err(err) => {
            eprintln!("Failed to find documents: {:?}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to retrieve popular activities" }))
        }
    }
}
