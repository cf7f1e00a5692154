use crate::api::failure;
use crate::models::{ApiResponse, CreateModuleRequest, ServicesView, TrainingModule};
use crate::services::module_service;
use crate::state::AppState;
use actix_web::{web, HttpResponse};

#[utoipa::path(
    post,
    path = "/api/module/create-module",
    tag = "Modules",
    request_body = CreateModuleRequest,
    responses(
        (status = 201, description = "Module appended to its category", body = TrainingModule),
        (status = 400, description = "Missing required fields or unknown category")
    )
)]
pub async fn create_module(
    state: web::Data<AppState>,
    request: web::Json<CreateModuleRequest>,
) -> HttpResponse {
    log::info!("📚 POST /module/create-module");

    match module_service::create_module(state.store.as_ref(), request.into_inner()).await {
        Ok((category, module)) => {
            log::info!("✅ Module '{}' added to {}", module.title, category.label());
            HttpResponse::Created().json(
                ApiResponse::data(module)
                    .with_message(format!("Training module added to {}.", category))
                    .with_category(category.key()),
            )
        }
        Err(e) => failure("Failed to create training module", e),
    }
}

#[utoipa::path(
    get,
    path = "/api/module/fetch-services-data",
    tag = "Modules",
    responses(
        (status = 200, description = "The services document with all three buckets", body = ServicesView),
        (status = 404, description = "Services collection not found")
    )
)]
pub async fn fetch_services_data(state: web::Data<AppState>) -> HttpResponse {
    match module_service::fetch_services(state.store.as_ref()).await {
        Ok(services) => HttpResponse::Ok().json(ApiResponse::data(services)),
        Err(e) => failure("Failed to fetch training modules", e),
    }
}

#[utoipa::path(
    get,
    path = "/api/module/category/{category}",
    tag = "Modules",
    params(("category" = String, Path, description = "sales, admin, customer or a bucket key")),
    responses(
        (status = 200, description = "Modules of one category", body = [TrainingModule]),
        (status = 400, description = "Unknown category")
    )
)]
pub async fn fetch_category_modules(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let raw = path.into_inner();

    match module_service::fetch_category(state.store.as_ref(), &raw).await {
        Ok((category, modules)) => {
            HttpResponse::Ok().json(ApiResponse::list(modules).with_category(category.key()))
        }
        Err(e) => failure("Failed to fetch category modules", e),
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::test_app;
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    fn payload(category: &str, title: &str) -> Value {
        json!({
            "moduleInfo": {
                "title": title,
                "description": "Keeping the calendar sane",
                "category": category,
                "level": "BEGINNER",
                "duration": "30",
                "prerequisites": "",
                "learningObjectives": ["Book meetings"],
                "tags": ["calendar"],
                "language": "English"
            },
            "lessons": [{
                "id": "l1", "title": "Time blocks", "duration": "30", "order": 1,
                "content": "Block your mornings"
            }],
            "metadata": {
                "totalDuration": 30, "totalLessons": 1, "totalQAQuestions": 0,
                "totalQuizQuestions": 0, "createdAt": "2024-05-01T00:00:00Z",
                "createdBy": "Root Admin"
            }
        })
    }

    #[actix_web::test]
    async fn test_services_are_empty_after_boot() {
        let (app, _) = test_app().await;

        let req = test::TestRequest::get().uri("/api/module/fetch-services-data").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        for key in ["sales", "administrativeSupport", "customerService"] {
            assert_eq!(body["data"][key]["modules"], json!([]), "bucket {}", key);
        }
        assert_eq!(body["data"]["_id"].as_str().unwrap().len(), 24);
    }

    #[actix_web::test]
    async fn test_admin_category_appends_to_administrative_support_only() {
        let (app, _) = test_app().await;

        let req = test::TestRequest::post()
            .uri("/api/module/create-module")
            .set_json(payload("admin", "Calendar management"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["category"], "administrativeSupport");
        assert_eq!(body["message"], "Training module added to administrativeSupport.");
        assert_eq!(body["data"]["title"], "Calendar management");
        assert_eq!(body["data"]["category"], "administrativeSupport");
        assert_eq!(body["data"]["metadata"]["totalLessons"], 1);

        let req = test::TestRequest::get().uri("/api/module/fetch-services-data").to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["administrativeSupport"]["modules"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"]["sales"]["modules"], json!([]));
        assert_eq!(body["data"]["customerService"]["modules"], json!([]));
    }

    #[actix_web::test]
    async fn test_category_listing() {
        let (app, _) = test_app().await;

        for (category, title) in [("customer", "Refunds"), ("customer", "Escalations"), ("sales", "Pitching")] {
            let req = test::TestRequest::post()
                .uri("/api/module/create-module")
                .set_json(payload(category, title))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get().uri("/api/module/category/customer").to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["count"], 2);
        assert_eq!(body["category"], "customerService");
        assert_eq!(body["data"][0]["title"], "Refunds");
        assert_eq!(body["data"][1]["title"], "Escalations");

        let req = test::TestRequest::get().uri("/api/module/category/marketing").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_create_module_rejects_incomplete_payloads() {
        let (app, _) = test_app().await;

        let req = test::TestRequest::post()
            .uri("/api/module/create-module")
            .set_json(json!({"moduleInfo": payload("sales", "x")["moduleInfo"].clone()}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Missing required fields for creating training module");

        let mut bad_level = payload("sales", "x");
        bad_level["moduleInfo"]["level"] = json!("EXPERT");
        let req = test::TestRequest::post()
            .uri("/api/module/create-module")
            .set_json(bad_level)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_whitespace_only_module_info_is_rejected() {
        let (app, _) = test_app().await;

        let mut body = payload("sales", "x");
        body["moduleInfo"]["title"] = json!("   ");
        body["moduleInfo"]["description"] = json!("  ");
        body["moduleInfo"]["duration"] = json!(" ");
        body["moduleInfo"]["language"] = json!("  ");

        let req = test::TestRequest::post()
            .uri("/api/module/create-module")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/api/module/fetch-services-data").to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["sales"]["modules"], json!([]));
    }
}
