use std::sync::Arc;

use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie},
    web, HttpRequest, HttpResponse, Responder,
};
use chrono::{Duration, Utc};
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Client;
use serde_json::json;
use uuid::Uuid;

use crate::db::mongo::DB_NAME;
use crate::middleware::auth::{AuthContext, SESSION_COOKIE};
use crate::models::session::Session;
use crate::models::user::{
    LoginInput, PasswordInput, ProfileInput, RegisterInput, User, UserProfile,
};

/*
    POST /api/auth/register
*/
pub async fn register(
    data: web::Data<Arc<Client>>,
    input: web::Json<RegisterInput>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<User> = client.database(DB_NAME).collection("Users");

    let input = input.into_inner();

    let mut errors = Vec::new();
    if input.username.trim().is_empty() {
        errors.push(json!({ "field": "username", "message": "Username is required" }));
    }
    if input.password.is_empty() {
        errors.push(json!({ "field": "password", "message": "Password is required" }));
    }
    if let Some(email) = &input.email {
        if !is_valid_email(email) {
            errors.push(json!({ "field": "email", "message": "Invalid email address" }));
        }
    }
    if !errors.is_empty() {
        return HttpResponse::BadRequest().json(json!({ "message": "Invalid input", "errors": errors }));
    }

    match collection.find_one(doc! { "username": &input.username }).await {
        Ok(Some(_)) => {
            return HttpResponse::Conflict().json(json!({ "message": "Username already taken" }))
        }
        Ok(None) => {}
        Err(err) => {
            eprintln!("Database error: {:?}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to register user" }));
        }
    }

    if let Some(email) = &input.email {
        match collection.find_one(doc! { "email": email }).await {
            Ok(Some(_)) => {
                return HttpResponse::Conflict()
                    .json(json!({ "message": "Email already registered" }))
            }
            Ok(None) => {}
            Err(err) => {
                eprintln!("Database error: {:?}", err);
                return HttpResponse::InternalServerError()
                    .json(json!({ "message": "Failed to register user" }));
            }
        }
    }

    let hashed = match bcrypt::hash(&input.password, bcrypt::DEFAULT_COST) {
        Ok(hash) => hash,
        Err(err) => {
            eprintln!("Password hashing failed: {:?}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to register user" }));
        }
    };

    let curr_time = Utc::now();
    let user = User {
        id: None,
        username: input.username,
        password: hashed,
        email: input.email,
        first_name: input.first_name,
        last_name: input.last_name,
        is_admin: Some(false),
        created_at: Some(curr_time),
        updated_at: Some(curr_time),
    };

    let user_id = match collection.insert_one(&user).await {
        Ok(result) => match result.inserted_id.as_object_id() {
            Some(id) => id,
            None => {
                return HttpResponse::InternalServerError()
                    .json(json!({ "message": "Failed to register user" }))
            }
        },
        Err(err) => {
            eprintln!("Failed to insert user: {:?}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to create user" }));
        }
    };

    match start_session(&client, user_id).await {
        Ok(cookie) => {
            let mut profile = UserProfile::from(user);
            profile.id = user_id;
            HttpResponse::Created().cookie(cookie).json(profile)
        }
        Err(err) => {
            eprintln!("Failed to create session: {:?}", err);
            HttpResponse::InternalServerError().json(json!({ "message": "Failed to register user" }))
        }
    }
}

/*
    POST /api/auth/login
*/
pub async fn login(data: web::Data<Arc<Client>>, input: web::Json<LoginInput>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<User> = client.database(DB_NAME).collection("Users");

    let input = input.into_inner();
    if input.username.is_empty() || input.password.is_empty() {
        return HttpResponse::BadRequest()
            .json(json!({ "message": "Username and password are required" }));
    }

    match collection.find_one(doc! { "username": &input.username }).await {
        Ok(Some(user)) => {
            if !bcrypt::verify(&input.password, &user.password).unwrap_or(false) {
                return HttpResponse::Unauthorized().json(json!({ "message": "Invalid credentials" }));
            }

            let user_id = match user.id {
                Some(id) => id,
                None => {
                    return HttpResponse::InternalServerError()
                        .json(json!({ "message": "Failed to sign in" }))
                }
            };

            match start_session(&client, user_id).await {
                Ok(cookie) => HttpResponse::Ok().cookie(cookie).json(UserProfile::from(user)),
                Err(err) => {
                    eprintln!("Failed to create session: {:?}", err);
                    HttpResponse::InternalServerError().json(json!({ "message": "Failed to sign in" }))
                }
            }
        }
        // Same response as a wrong password so usernames cannot be probed
        Ok(None) => HttpResponse::Unauthorized().json(json!({ "message": "Invalid credentials" })),
        Err(err) => {
            eprintln!("Database error: {:?}", err);
            HttpResponse::InternalServerError().json(json!({ "message": "Failed to sign in" }))
        }
    }
}

/*
    POST /api/auth/logout
*/
pub async fn logout(data: web::Data<Arc<Client>>, req: HttpRequest) -> impl Responder {
    let client = data.into_inner();

    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        let sessions: mongodb::Collection<Session> =
            client.database(DB_NAME).collection("Sessions");
        if let Err(err) = sessions.delete_one(doc! { "token": cookie.value() }).await {
            eprintln!("Failed to delete session: {:?}", err);
            return HttpResponse::InternalServerError().json(json!({ "message": "Failed to logout" }));
        }
    }

    let mut removal = Cookie::new(SESSION_COOKIE, "");
    removal.set_path("/");
    removal.make_removal();

    HttpResponse::Ok()
        .cookie(removal)
        .json(json!({ "message": "Logged out successfully" }))
}

/*
    GET /api/auth/me
*/
pub async fn me(data: web::Data<Arc<Client>>, ctx: AuthContext) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<User> = client.database(DB_NAME).collection("Users");

    match collection.find_one(doc! { "_id": ctx.user_id }).await {
        Ok(Some(user)) => HttpResponse::Ok().json(UserProfile::from(user)),
        Ok(None) => HttpResponse::NotFound().json(json!({ "message": "User not found" })),
        Err(err) => {
            eprintln!("Failed to fetch user: {:?}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to retrieve user information" }))
        }
    }
}

/*
    PUT /api/auth/profile
*/
pub async fn update_profile(
    data: web::Data<Arc<Client>>,
    ctx: AuthContext,
    input: web::Json<ProfileInput>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<User> = client.database(DB_NAME).collection("Users");

    let input = input.into_inner();
    if let Some(email) = &input.email {
        if !is_valid_email(email) {
            return HttpResponse::BadRequest().json(json!({ "message": "Invalid email address" }));
        }
    }

    let mut update_doc = doc! { "updatedAt": Utc::now().to_rfc3339() };
    if let Some(email) = input.email {
        update_doc.insert("email", email);
    }
    if let Some(first_name) = input.first_name {
        update_doc.insert("firstName", first_name);
    }
    if let Some(last_name) = input.last_name {
        update_doc.insert("lastName", last_name);
    }

    match collection
        .update_one(doc! { "_id": ctx.user_id }, doc! { "$set": update_doc })
        .await
    {
        Ok(_) => HttpResponse::Ok().json(json!({ "message": "Profile updated" })),
        Err(err) => {
            eprintln!("Failed to update profile: {:?}", err);
            HttpResponse::InternalServerError().json(json!({ "message": "Failed to update profile" }))
        }
    }
}

/*
    PUT /api/auth/password
*/
pub async fn change_password(
    data: web::Data<Arc<Client>>,
    ctx: AuthContext,
    input: web::Json<PasswordInput>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<User> = client.database(DB_NAME).collection("Users");

    let input = input.into_inner();
    if input.new_password.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "message": "Invalid input",
            "errors": [{ "field": "newPassword", "message": "New password is required" }]
        }));
    }

    let user = match collection.find_one(doc! { "_id": ctx.user_id }).await {
        Ok(Some(user)) => user,
        Ok(None) => return HttpResponse::NotFound().json(json!({ "message": "User not found" })),
        Err(err) => {
            eprintln!("Failed to fetch user: {:?}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to change password" }));
        }
    };

    if !bcrypt::verify(&input.current_password, &user.password).unwrap_or(false) {
        return HttpResponse::Unauthorized()
            .json(json!({ "message": "Current password is incorrect" }));
    }

    let hashed = match bcrypt::hash(&input.new_password, bcrypt::DEFAULT_COST) {
        Ok(hash) => hash,
        Err(err) => {
            eprintln!("Password hashing failed: {:?}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to change password" }));
        }
    };

    match collection
        .update_one(
            doc! { "_id": ctx.user_id },
            doc! { "$set": { "password": hashed, "updatedAt": Utc::now().to_rfc3339() } },
        )
        .await
    {
        Ok(_) => HttpResponse::Ok().json(json!({ "message": "Password updated" })),
        Err(err) => {
            eprintln!("Failed to update password: {:?}", err);
            HttpResponse::InternalServerError().json(json!({ "message": "Failed to change password" }))
        }
    }
}

fn is_valid_email(email: &str) -> bool {
    let re = regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?)*$",
    );
    re.unwrap().is_match(email)
}

async fn start_session(
    client: &Client,
    user_id: ObjectId,
) -> Result<Cookie<'static>, mongodb::error::Error> {
    let ttl_hours: i64 = std::env::var("SESSION_TTL_HOURS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(24);

    let now = Utc::now();
    let session = Session {
        id: None,
        token: Uuid::new_v4().simple().to_string(),
        user_id,
        created_at: Some(now),
        expires_at: now + Duration::hours(ttl_hours),
    };

    let collection: mongodb::Collection<Session> = client.database(DB_NAME).collection("Sessions");
    collection.insert_one(&session).await?;

    Ok(Cookie::build(SESSION_COOKIE, session.token)
        .path("/")
        .http_only(true)
        .max_age(CookieDuration::hours(ttl_hours))
        .finish())
}
