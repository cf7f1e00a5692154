use crate::{
    database::Store,
    models::{ActivityLog, ActivityLogView, CreateActivityRequest},
    services::{non_blank, parse_object_id},
    utils::error::AppError,
};
use mongodb::bson::DateTime as BsonDateTime;
use validator::Validate;

pub async fn create_activity(
    store: &dyn Store,
    request: CreateActivityRequest,
) -> Result<ActivityLogView, AppError> {
    if request.validate().is_err() {
        return Err(AppError::InvalidRequest("Missing required parameters".to_string()));
    }

    let missing = || AppError::InvalidRequest("Missing required parameters".to_string());
    let actor_id = parse_object_id(request.actor_id.as_deref().ok_or_else(missing)?, "actor")?;
    let now = BsonDateTime::now();

    let entry = ActivityLog {
        id: None,
        actor_id,
        actor_name: non_blank(request.actor_name).ok_or_else(missing)?,
        actor_role: non_blank(request.actor_role).ok_or_else(missing)?,
        action: non_blank(request.action).ok_or_else(missing)?,
        created_at: now,
        updated_at: now,
    };

    let stored = store.insert_activity(entry).await?;
    Ok(ActivityLogView::from(stored))
}

pub async fn fetch_activity(store: &dyn Store) -> Result<Vec<ActivityLogView>, AppError> {
    let entries = store.list_activity().await?;
    Ok(entries.into_iter().map(ActivityLogView::from).collect())
}
