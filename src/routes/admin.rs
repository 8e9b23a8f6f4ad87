use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use futures::TryStreamExt;
use mongodb::{bson::doc, Client};
use serde_json::json;

use crate::db::mongo::DB_NAME;
use crate::middleware::auth::{RequireAdmin, SessionAuth};
use crate::models::user::{User, UserProfile};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(RequireAdmin)
            .wrap(SessionAuth)
            .route("/users", web::get().to(list_users)),
    );
}

/*
    GET /api/admin/users
*/
pub async fn list_users(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<User> = client.database(DB_NAME).collection("Users");

    match collection.find(doc! {}).await {
        Ok(cursor) => match cursor.try_collect::<Vec<User>>().await {
            Ok(users) => {
                let profiles: Vec<UserProfile> = users.into_iter().map(UserProfile::from).collect();
                HttpResponse::Ok().json(profiles)
            }
            Err(err) => {
                eprintln!("Failed to collect users: {:?}", err);
                HttpResponse::InternalServerError()
                    .json(json!({ "message": "Failed to retrieve users" }))
            }
        },
        Err(err) => {
            eprintln!("Failed to find users: {:?}", err);
            HttpResponse::InternalServerError().json(json!({ "message": "Failed to retrieve users" }))
        }
    }
}
