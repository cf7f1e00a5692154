use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Training Service API",
        version = "1.0.0",
        description = "Accounts, training modules and the activity log of the training platform.\n\nEvery endpoint answers with a `{success, message, data}` envelope."
    ),
    paths(
        // Users
        crate::api::users::create_user_account,
        crate::api::users::login,
        crate::api::users::logout,
        crate::api::users::get_all_users,
        crate::api::users::delete_user,

        // Admins
        crate::api::admins::create_admin_account,
        crate::api::admins::get_all_admins,

        // Modules
        crate::api::modules::create_module,
        crate::api::modules::fetch_services_data,
        crate::api::modules::fetch_category_modules,

        // Activity
        crate::api::activity::fetch_activity_logs,
        crate::api::activity::create_activity_log,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            crate::models::CreateUserRequest,
            crate::models::CreateAdminRequest,
            crate::models::LoginRequest,
            crate::models::UserView,
            crate::models::AuthenticatedUser,
            crate::models::Role,
            crate::models::ServiceFocus,
            crate::models::CreateModuleRequest,
            crate::models::ModuleInfoInput,
            crate::models::MetadataInput,
            crate::models::TagsInput,
            crate::models::TrainingModule,
            crate::models::Lesson,
            crate::models::QaQuestion,
            crate::models::QuizQuestion,
            crate::models::ModuleMetadata,
            crate::models::ServiceBucket,
            crate::models::ServicesView,
            crate::models::ServiceCategory,
            crate::models::CreateActivityRequest,
            crate::models::ActivityLogView,
            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,
        )
    ),
    tags(
        (name = "Users", description = "Employee registration, login and account removal."),
        (name = "Admins", description = "Admin account management."),
        (name = "Modules", description = "Training modules grouped by service category."),
        (name = "Activity", description = "Append-only audit trail of administrative actions."),
        (name = "Health", description = "Health check and request counters."),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/user/create-user-account",
            "/api/user/login",
            "/api/user/delete/{id}",
            "/api/admin/get-all-admin",
            "/api/module/create-module",
            "/api/activity/fetch",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
