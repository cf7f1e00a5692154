use crate::{
    database::Store,
    models::{
        CreateModuleRequest, Lesson, ModuleMetadata, ServiceCategory, ServicesView, TrainingModule,
    },
    services::non_blank,
    utils::error::AppError,
};
use chrono::{SecondsFormat, Utc};
use validator::Validate;

/// Leading integer of a duration field, e.g. `"15 min"` → 15. Anything that
/// does not start with a digit counts as 0.
fn leading_minutes(duration: &str) -> i64 {
    let digits: String = duration
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Totals are recomputed from the lessons rather than trusted from the client.
pub fn derive_metadata(lessons: &[Lesson], created_by: &str) -> ModuleMetadata {
    ModuleMetadata {
        total_duration: lessons.iter().map(|l| leading_minutes(&l.duration)).sum(),
        total_lessons: lessons.len() as i64,
        total_qa_questions: lessons.iter().map(|l| l.qa_questions.len() as i64).sum(),
        total_quiz_questions: lessons.iter().map(|l| l.quiz_questions.len() as i64).sum(),
        created_by: created_by.to_string(),
    }
}

/// A missing category falls back to sales; an unrecognised one is rejected.
pub fn resolve_category(raw: Option<&str>) -> Result<ServiceCategory, AppError> {
    match raw.map(str::trim).filter(|c| !c.is_empty()) {
        None => Ok(ServiceCategory::Sales),
        Some(raw) => ServiceCategory::parse(raw)
            .ok_or_else(|| AppError::InvalidRequest(format!("Unknown category '{}'", raw))),
    }
}

/// Validates the wizard payload and turns it into the stored module.
pub fn build_module(request: CreateModuleRequest) -> Result<(ServiceCategory, TrainingModule), AppError> {
    if request.validate().is_err() {
        return Err(AppError::InvalidRequest(
            "Missing required fields for creating training module".to_string(),
        ));
    }

    let missing = || {
        AppError::InvalidRequest("Missing required fields for creating training module".to_string())
    };

    let info = request.module_info.ok_or_else(missing)?;
    let lessons = request.lessons.ok_or_else(missing)?;
    let metadata = request.metadata.ok_or_else(missing)?;

    let category = resolve_category(info.category.as_deref())?;

    let created_by = non_blank(metadata.created_by).unwrap_or_else(|| "unknown".to_string());
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    let module = TrainingModule {
        id: uuid::Uuid::new_v4().to_string(),
        title: non_blank(info.title).ok_or_else(missing)?,
        description: non_blank(info.description).ok_or_else(missing)?,
        category,
        level: info.level.ok_or_else(missing)?,
        duration: non_blank(info.duration).ok_or_else(missing)?,
        prerequisites: non_blank(info.prerequisites).unwrap_or_default(),
        learning_objectives: info
            .learning_objectives
            .into_iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect(),
        tags: info.tags.map(|t| t.into_tags()).unwrap_or_default(),
        language: non_blank(info.language).ok_or_else(missing)?,
        metadata: derive_metadata(&lessons, &created_by),
        lessons,
        created_at: now.clone(),
        updated_at: now,
    };

    Ok((category, module))
}

pub async fn create_module(
    store: &dyn Store,
    request: CreateModuleRequest,
) -> Result<(ServiceCategory, TrainingModule), AppError> {
    let (category, module) = build_module(request)?;

    let inserted = store
        .push_module(category, module)
        .await?
        .ok_or_else(|| AppError::Internal("Failed to update services collection.".to_string()))?;

    Ok((category, inserted))
}

pub async fn fetch_services(store: &dyn Store) -> Result<ServicesView, AppError> {
    store
        .fetch_services()
        .await?
        .map(ServicesView::from)
        .ok_or_else(|| AppError::NotFound("Services collection not found.".to_string()))
}

pub async fn fetch_category(
    store: &dyn Store,
    raw_category: &str,
) -> Result<(ServiceCategory, Vec<TrainingModule>), AppError> {
    let category = ServiceCategory::parse(raw_category)
        .ok_or_else(|| AppError::InvalidRequest(format!("Unknown category '{}'", raw_category)))?;

    let services = store
        .fetch_services()
        .await?
        .ok_or_else(|| AppError::NotFound("Services collection not found.".to_string()))?;

    Ok((category, services.bucket(category).modules.clone()))
}
