use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const ACTIVITY_COLLECTION: &str = "activity_logs";

/// Audit entry. Actor name and role are copied in at write time and are not
/// kept in sync with the account afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub actor_id: ObjectId,
    pub actor_name: String,
    pub actor_role: String,
    pub action: String,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogView {
    #[serde(rename = "_id")]
    pub id: String,
    pub actor_id: String,
    pub actor_name: String,
    pub actor_role: String,
    pub action: String,
    pub created_at: String,
}

impl From<ActivityLog> for ActivityLogView {
    fn from(log: ActivityLog) -> Self {
        Self {
            id: log.id.map(|id| id.to_hex()).unwrap_or_default(),
            actor_id: log.actor_id.to_hex(),
            actor_name: log.actor_name,
            actor_role: log.actor_role,
            action: log.action,
            created_at: log.created_at.try_to_rfc3339_string().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityRequest {
    #[validate(required, length(min = 1))]
    pub actor_id: Option<String>,
    #[validate(required, length(min = 1))]
    pub actor_name: Option<String>,
    #[validate(required, length(min = 1))]
    pub actor_role: Option<String>,
    #[validate(required, length(min = 1))]
    pub action: Option<String>,
}
