use crate::api::failure;
use crate::models::{ActivityLogView, ApiResponse, CreateActivityRequest};
use crate::services::activity_service;
use crate::state::AppState;
use actix_web::{web, HttpResponse};

#[utoipa::path(
    get,
    path = "/api/activity/fetch",
    tag = "Activity",
    responses(
        (status = 200, description = "Every log entry, oldest first", body = [ActivityLogView])
    )
)]
pub async fn fetch_activity_logs(state: web::Data<AppState>) -> HttpResponse {
    match activity_service::fetch_activity(state.store.as_ref()).await {
        Ok(entries) => HttpResponse::Ok().json(ApiResponse::list(entries)),
        Err(e) => failure("Failed to fetch activity logs", e),
    }
}

#[utoipa::path(
    post,
    path = "/api/activity/create",
    tag = "Activity",
    request_body = CreateActivityRequest,
    responses(
        (status = 201, description = "Entry appended", body = ActivityLogView),
        (status = 400, description = "Missing required parameters or invalid actor id")
    )
)]
pub async fn create_activity_log(
    state: web::Data<AppState>,
    request: web::Json<CreateActivityRequest>,
) -> HttpResponse {
    match activity_service::create_activity(state.store.as_ref(), request.into_inner()).await {
        Ok(entry) => {
            log::info!("📝 Activity: {} ({}) - {}", entry.actor_name, entry.actor_role, entry.action);
            HttpResponse::Created().json(ApiResponse::data(entry))
        }
        Err(e) => failure("Failed to create user activity", e),
    }
}
