use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    web, Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use chrono::Utc;
use futures::future::{ready, LocalBoxFuture, Ready};
use mongodb::{
    bson::{doc, oid::ObjectId},
    Client,
};

use crate::db::mongo::DB_NAME;
use crate::models::session::Session;
use crate::models::user::User;

pub const SESSION_COOKIE: &str = "travelsage_session";

/// Resolved identity of the caller, inserted into request extensions by
/// `SessionAuth` and injected into handlers via `FromRequest`.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: ObjectId,
    pub username: String,
    pub is_admin: bool,
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(ctx) = req.extensions().get::<AuthContext>() {
            ready(Ok(ctx.clone()))
        } else {
            ready(Err(unauthorized("Authentication required")))
        }
    }
}

fn unauthorized(message: &str) -> Error {
    InternalError::from_response(
        message.to_string(),
        HttpResponse::Unauthorized().json(serde_json::json!({ "message": message })),
    )
    .into()
}

fn forbidden(message: &str) -> Error {
    InternalError::from_response(
        message.to_string(),
        HttpResponse::Forbidden().json(serde_json::json!({ "message": message })),
    )
    .into()
}

/// Looks up the session cookie against the `Sessions` collection and loads
/// the owning user. Expired sessions are removed on sight.
pub async fn resolve_session(
    client: &Client,
    token: &str,
) -> Result<Option<AuthContext>, mongodb::error::Error> {
    let sessions: mongodb::Collection<Session> = client.database(DB_NAME).collection("Sessions");

    let session = match sessions.find_one(doc! { "token": token }).await? {
        Some(session) => session,
        None => return Ok(None),
    };

    if session.expires_at < Utc::now() {
        sessions.delete_one(doc! { "token": token }).await?;
        return Ok(None);
    }

    let users: mongodb::Collection<User> = client.database(DB_NAME).collection("Users");
    match users.find_one(doc! { "_id": session.user_id }).await? {
        Some(user) => Ok(Some(AuthContext {
            user_id: session.user_id,
            username: user.username,
            is_admin: user.is_admin.unwrap_or(false),
        })),
        None => Ok(None),
    }
}

pub struct SessionAuth;

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SessionAuthService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthService {
            service: Rc::new(service),
        }))
    }
}

pub struct SessionAuthService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let token = req
            .cookie(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string());

        Box::pin(async move {
            let token = match token {
                Some(token) => token,
                None => return Err(unauthorized("Authentication required")),
            };

            let client = match req.app_data::<web::Data<Arc<Client>>>() {
                Some(data) => data.get_ref().clone(),
                None => {
                    return Err(InternalError::from_response(
                        "missing database handle",
                        HttpResponse::InternalServerError()
                            .json(serde_json::json!({ "message": "Authentication error" })),
                    )
                    .into())
                }
            };

            match resolve_session(&client, &token).await {
                Ok(Some(ctx)) => {
                    req.extensions_mut().insert(ctx);
                    service.call(req).await
                }
                Ok(None) => Err(unauthorized("Invalid session")),
                Err(err) => {
                    eprintln!("Session lookup failed: {:?}", err);
                    Err(unauthorized("Invalid session"))
                }
            }
        })
    }
}

/// Rejects authenticated callers whose user record does not carry the admin
/// flag. Must run inside a `SessionAuth` scope.
pub struct RequireAdmin;

impl<S, B> Transform<S, ServiceRequest> for RequireAdmin
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequireAdminService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAdminService { service }))
    }
}

pub struct RequireAdminService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequireAdminService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let ctx = req.extensions().get::<AuthContext>().cloned();

        match ctx {
            Some(ctx) if ctx.is_admin => Box::pin(self.service.call(req)),
            Some(_) => Box::pin(ready(Err(forbidden("Admin access required")))),
            None => Box::pin(ready(Err(unauthorized("Authentication required")))),
        }
    }
}
