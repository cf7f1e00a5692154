use crate::api::failure;
use crate::models::{ApiResponse, CreateAdminRequest, Role, UserView};
use crate::services::account_service;
use crate::state::AppState;
use actix_web::{web, HttpResponse};

#[utoipa::path(
    post,
    path = "/api/admin/create-admin-account",
    tag = "Admins",
    request_body = CreateAdminRequest,
    responses(
        (status = 201, description = "Admin account created", body = UserView),
        (status = 400, description = "Missing required fields or non-admin role"),
        (status = 409, description = "Account already exists")
    )
)]
pub async fn create_admin_account(
    state: web::Data<AppState>,
    request: web::Json<CreateAdminRequest>,
) -> HttpResponse {
    let email = request.email.as_deref().unwrap_or("N/A");
    log::info!("📝 POST /admin/create-admin-account - email: {}", email);

    match account_service::create_admin_account(state.store.as_ref(), state.bcrypt_cost, &request).await {
        Ok(admin) => {
            log::info!("✅ Admin account created: {} ({})", admin.email, admin.role);
            HttpResponse::Created()
                .json(ApiResponse::data(admin).with_message("Admin account created successfully!"))
        }
        Err(e) => failure("Failed to create admin account", e),
    }
}

#[utoipa::path(
    get,
    path = "/api/admin/get-all-admin",
    tag = "Admins",
    responses(
        (status = 200, description = "All admin and super_admin accounts", body = [UserView])
    )
)]
pub async fn get_all_admins(state: web::Data<AppState>) -> HttpResponse {
    match account_service::list_accounts(state.store.as_ref(), &[Role::Admin, Role::SuperAdmin]).await {
        Ok(admins) => HttpResponse::Ok().json(ApiResponse::list(admins)),
        Err(e) => failure("Failed to fetch admins", e),
    }
}
