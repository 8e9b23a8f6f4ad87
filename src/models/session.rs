use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Server-side session record. The opaque `token` travels in an HttpOnly
/// cookie; nothing user-identifying is stored client-side.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub token: String,
    pub user_id: ObjectId,
    pub created_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
}
