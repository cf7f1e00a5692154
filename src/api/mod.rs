pub mod activity;
pub mod admins;
pub mod health;
pub mod metrics;
pub mod modules;
pub mod swagger;
pub mod users;

use crate::state::AppState;
use crate::utils::error::AppError;
use actix_web::{error::InternalError, web, HttpResponse, ResponseError};

/// Logs a failed call and renders the `{success: false, message}` envelope.
pub fn failure(context: &str, e: AppError) -> HttpResponse {
    if e.status_code().is_server_error() {
        log::error!("❌ {}: {}", context, e);
    } else {
        log::warn!("⚠️  {}: {}", context, e);
    }

    e.error_response()
}

/// Bodies that are not valid JSON for the target type become 400 envelopes.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("⚠️  Rejected request body: {}", err);
        let response = AppError::InvalidRequest(format!("Invalid request body: {}", err)).error_response();
        InternalError::from_response(err, response).into()
    })
}

/// Registers every route. Shared by `main` and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig, state: AppState) {
    cfg.app_data(web::Data::new(state))
        .app_data(json_config())
        .route("/", web::get().to(health::root))
        .route("/health", web::get().to(health::health_check))
        .route("/metrics", web::get().to(metrics::get_metrics))
        .service(
            web::scope("/api/user")
                .route("/create-user-account", web::post().to(users::create_user_account))
                .route("/login", web::post().to(users::login))
                .route("/logout/{id}", web::post().to(users::logout))
                .route("/get-all-user", web::get().to(users::get_all_users))
                .route("/delete/{id}", web::delete().to(users::delete_user)),
        )
        .service(
            web::scope("/api/admin")
                .route("/create-admin-account", web::post().to(admins::create_admin_account))
                .route("/get-all-admin", web::get().to(admins::get_all_admins)),
        )
        .service(
            web::scope("/api/module")
                .route("/create-module", web::post().to(modules::create_module))
                .route("/fetch-services-data", web::get().to(modules::fetch_services_data))
                .route("/category/{category}", web::get().to(modules::fetch_category_modules)),
        )
        .service(
            web::scope("/api/activity")
                .route("/fetch", web::get().to(activity::fetch_activity_logs))
                .route("/create", web::post().to(activity::create_activity_log)),
        );
}
