use crate::api::failure;
use crate::models::{ApiResponse, AuthenticatedUser, CreateUserRequest, LoginRequest, Role, UserView};
use crate::services::account_service;
use crate::state::AppState;
use actix_web::{web, HttpResponse};

#[utoipa::path(
    post,
    path = "/api/user/create-user-account",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Account created", body = UserView),
        (status = 400, description = "Missing required fields"),
        (status = 409, description = "Account already exists")
    )
)]
pub async fn create_user_account(
    state: web::Data<AppState>,
    request: web::Json<CreateUserRequest>,
) -> HttpResponse {
    let email = request.email.as_deref().unwrap_or("N/A");
    log::info!("📝 POST /user/create-user-account - email: {}", email);

    match account_service::create_user_account(state.store.as_ref(), state.bcrypt_cost, &request).await {
        Ok(user) => {
            log::info!("✅ Account created: {}", user.email);
            HttpResponse::Created()
                .json(ApiResponse::data(user).with_message("Account created successfully!"))
        }
        Err(e) => failure("Failed to create account", e),
    }
}

#[utoipa::path(
    post,
    path = "/api/user/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthenticatedUser),
        (status = 400, description = "email and password are required"),
        (status = 401, description = "Invalid email or password"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn login(state: web::Data<AppState>, request: web::Json<LoginRequest>) -> HttpResponse {
    let email = request.email.as_deref().unwrap_or("N/A");
    log::info!("🔐 POST /user/login - email: {}", email);

    match account_service::login(state.store.as_ref(), &request).await {
        Ok(user) => {
            log::info!("✅ Login successful: {}", user.email);
            HttpResponse::Ok().json(ApiResponse::data(user).with_message("Logged in successfully!"))
        }
        Err(e) => failure("Login failed", e),
    }
}

#[utoipa::path(
    post,
    path = "/api/user/logout/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId")),
    responses(
        (status = 200, description = "Account marked inactive", body = UserView),
        (status = 400, description = "Invalid user id"),
        (status = 404, description = "User not found")
    )
)]
pub async fn logout(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    log::info!("👋 POST /user/logout/{}", id);

    match account_service::logout(state.store.as_ref(), &id).await {
        Ok(user) => HttpResponse::Ok().json(ApiResponse::data(user).with_message("Logged out successfully!")),
        Err(e) => failure("Logout failed", e),
    }
}

#[utoipa::path(
    get,
    path = "/api/user/get-all-user",
    tag = "Users",
    responses(
        (status = 200, description = "All employee accounts", body = [UserView])
    )
)]
pub async fn get_all_users(state: web::Data<AppState>) -> HttpResponse {
    match account_service::list_accounts(state.store.as_ref(), &[Role::User]).await {
        Ok(users) => HttpResponse::Ok().json(ApiResponse::list(users)),
        Err(e) => failure("Failed to fetch users", e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/user/delete/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId")),
    responses(
        (status = 200, description = "User deleted", body = UserView),
        (status = 400, description = "Invalid user id"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    log::info!("🗑️  DELETE /user/delete/{}", id);

    match account_service::delete_user(state.store.as_ref(), &id).await {
        Ok(user) => {
            log::info!("✅ User deleted: {}", user.email);
            HttpResponse::Ok().json(ApiResponse::data(user).with_message("User deleted successfully"))
        }
        Err(e) => failure("Failed to delete user", e),
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{create_user, test_app};
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_create_user_account() {
        let (app, _) = test_app().await;

        let req = test::TestRequest::post()
            .uri("/api/user/create-user-account")
            .set_json(json!({
                "fullname": "Jane Doe",
                "email": "jane@example.com",
                "phone": "555-0101",
                "password": "hunter22",
                "serviceFocus": "customer-service"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Account created successfully!");
        assert_eq!(body["data"]["role"], "user");
        assert_eq!(body["data"]["active"], false);
        assert_eq!(body["data"]["serviceFocus"], "customer-service");
        assert!(body["data"].get("password").is_none());
    }

    #[actix_web::test]
    async fn test_duplicate_email_is_rejected_without_second_write() {
        let (app, state) = test_app().await;
        create_user(&app, "Jane Doe", "jane@example.com", "hunter22").await;

        let req = test::TestRequest::post()
            .uri("/api/user/create-user-account")
            .set_json(json!({
                "fullname": "Someone Else",
                "email": "jane@example.com",
                "password": "other"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"success": false, "message": "Account already exists"}));

        let users = state
            .store
            .list_users_by_roles(&[crate::models::Role::User])
            .await
            .unwrap();
        assert_eq!(users.iter().filter(|u| u.email == "jane@example.com").count(), 1);
    }

    #[actix_web::test]
    async fn test_duplicate_fullname_is_rejected() {
        let (app, _) = test_app().await;
        create_user(&app, "Jane Doe", "jane@example.com", "hunter22").await;

        let req = test::TestRequest::post()
            .uri("/api/user/create-user-account")
            .set_json(json!({"fullname": "Jane Doe", "email": "other@example.com", "password": "x"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_create_user_missing_fields() {
        let (app, _) = test_app().await;

        let req = test::TestRequest::post()
            .uri("/api/user/create-user-account")
            .set_json(json!({"fullname": "Jane Doe", "password": "hunter22"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Missing required fields");
    }

    #[actix_web::test]
    async fn test_malformed_json_is_a_bad_request() {
        let (app, _) = test_app().await;

        let req = test::TestRequest::post()
            .uri("/api/user/login")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn test_login_marks_account_active() {
        let (app, state) = test_app().await;
        create_user(&app, "Jane Doe", "jane@example.com", "hunter22").await;

        let req = test::TestRequest::post()
            .uri("/api/user/login")
            .set_json(json!({"email": "jane@example.com", "password": "hunter22"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Logged in successfully!");
        assert_eq!(body["data"]["fullname"], "Jane Doe");
        assert_eq!(body["data"]["role"], "user");

        let user = state.store.find_user_by_email("jane@example.com").await.unwrap().unwrap();
        assert!(user.active);
    }

    #[actix_web::test]
    async fn test_login_wrong_password_leaves_account_inactive() {
        let (app, state) = test_app().await;
        create_user(&app, "Jane Doe", "jane@example.com", "hunter22").await;

        let req = test::TestRequest::post()
            .uri("/api/user/login")
            .set_json(json!({"email": "jane@example.com", "password": "wrong"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let user = state.store.find_user_by_email("jane@example.com").await.unwrap().unwrap();
        assert!(!user.active);
    }

    #[actix_web::test]
    async fn test_login_unknown_account() {
        let (app, _) = test_app().await;

        let req = test::TestRequest::post()
            .uri("/api/user/login")
            .set_json(json!({"email": "ghost@example.com", "password": "x"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri("/api/user/login")
            .set_json(json!({"email": "ghost@example.com"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_logout_marks_account_inactive() {
        let (app, state) = test_app().await;
        let id = create_user(&app, "Jane Doe", "jane@example.com", "hunter22").await;

        let req = test::TestRequest::post()
            .uri("/api/user/login")
            .set_json(json!({"email": "jane@example.com", "password": "hunter22"}))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/user/logout/{}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let user = state.store.find_user_by_email("jane@example.com").await.unwrap().unwrap();
        assert!(!user.active);
    }

    #[actix_web::test]
    async fn test_get_all_users_excludes_admins_and_passwords() {
        let (app, _) = test_app().await;
        create_user(&app, "Jane Doe", "jane@example.com", "hunter22").await;
        create_user(&app, "John Roe", "john@example.com", "hunter22").await;

        let req = test::TestRequest::get().uri("/api/user/get-all-user").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["count"], 2);
        let users = body["data"].as_array().unwrap();
        assert!(users.iter().all(|u| u.get("password").is_none()));
        assert!(users.iter().all(|u| u["role"] == "user"));
    }

    #[actix_web::test]
    async fn test_delete_user() {
        let (app, _) = test_app().await;
        let id = create_user(&app, "Jane Doe", "jane@example.com", "hunter22").await;

        let req = test::TestRequest::delete()
            .uri(&format!("/api/user/delete/{}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["id"], id);
    }

    #[actix_web::test]
    async fn test_delete_missing_user_leaves_collection_unchanged() {
        let (app, state) = test_app().await;
        create_user(&app, "Jane Doe", "jane@example.com", "hunter22").await;

        let missing = mongodb::bson::oid::ObjectId::new().to_hex();
        let req = test::TestRequest::delete()
            .uri(&format!("/api/user/delete/{}", missing))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete()
            .uri("/api/user/delete/not-an-id")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let users = state
            .store
            .list_users_by_roles(&[crate::models::Role::User])
            .await
            .unwrap();
        assert_eq!(users.len(), 1);
    }
}
