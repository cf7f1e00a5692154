use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub const SERVICES_COLLECTION: &str = "services";

/// The three fixed buckets of the services document.
///
/// Every path into the document goes through this enum, so an update can only
/// ever target one of the known buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ServiceCategory {
    Sales,
    AdministrativeSupport,
    CustomerService,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 3] = [
        ServiceCategory::Sales,
        ServiceCategory::AdministrativeSupport,
        ServiceCategory::CustomerService,
    ];

    /// Field name of the bucket inside the services document.
    pub fn key(&self) -> &'static str {
        match self {
            ServiceCategory::Sales => "sales",
            ServiceCategory::AdministrativeSupport => "administrativeSupport",
            ServiceCategory::CustomerService => "customerService",
        }
    }

    /// Dotted path of the bucket's module array, for `$push` and projections.
    pub fn modules_path(&self) -> &'static str {
        match self {
            ServiceCategory::Sales => "sales.modules",
            ServiceCategory::AdministrativeSupport => "administrativeSupport.modules",
            ServiceCategory::CustomerService => "customerService.modules",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServiceCategory::Sales => "Sales & Lead Generation",
            ServiceCategory::AdministrativeSupport => "Administrative Support",
            ServiceCategory::CustomerService => "Customer Service",
        }
    }

    /// Accepts the short names used by the authoring form (`sales`, `admin`,
    /// `customer`) as well as the canonical bucket keys.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "sales" => Some(ServiceCategory::Sales),
            "admin" | "administrativeSupport" | "administrative-support" => {
                Some(ServiceCategory::AdministrativeSupport)
            }
            "customer" | "customerService" | "customer-service" => {
                Some(ServiceCategory::CustomerService)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModuleLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AnswerType {
    Short,
    Paragraph,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum QuizType {
    MultipleChoice,
    TrueFalse,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QaQuestion {
    pub id: String,
    #[validate(custom(function = "not_blank"))]
    pub question: String,
    pub answer_type: AnswerType,
    pub points: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: String,
    #[validate(custom(function = "not_blank"))]
    pub question: String,
    #[serde(rename = "type")]
    pub quiz_type: QuizType,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
    pub points: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    pub duration: String,
    pub order: i32,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    #[validate(nested)]
    pub qa_questions: Vec<QaQuestion>,
    #[serde(default)]
    #[validate(nested)]
    pub quiz_questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleMetadata {
    pub total_duration: i64,
    pub total_lessons: i64,
    #[serde(rename = "totalQAQuestions")]
    pub total_qa_questions: i64,
    pub total_quiz_questions: i64,
    pub created_by: String,
}

/// A published module, embedded in one bucket of the services document.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrainingModule {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: ServiceCategory,
    pub level: ModuleLevel,
    pub duration: String,
    #[serde(default)]
    pub prerequisites: String,
    #[serde(default)]
    pub learning_objectives: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub language: String,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
    pub metadata: ModuleMetadata,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ServiceBucket {
    #[serde(default)]
    pub modules: Vec<TrainingModule>,
}

/// Singleton document of the `services` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicesDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub sales: ServiceBucket,
    #[serde(default)]
    pub administrative_support: ServiceBucket,
    #[serde(default)]
    pub customer_service: ServiceBucket,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

impl ServicesDocument {
    pub fn empty() -> Self {
        let now = BsonDateTime::now();
        Self {
            id: None,
            sales: ServiceBucket::default(),
            administrative_support: ServiceBucket::default(),
            customer_service: ServiceBucket::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn bucket(&self, category: ServiceCategory) -> &ServiceBucket {
        match category {
            ServiceCategory::Sales => &self.sales,
            ServiceCategory::AdministrativeSupport => &self.administrative_support,
            ServiceCategory::CustomerService => &self.customer_service,
        }
    }

    pub fn bucket_mut(&mut self, category: ServiceCategory) -> &mut ServiceBucket {
        match category {
            ServiceCategory::Sales => &mut self.sales,
            ServiceCategory::AdministrativeSupport => &mut self.administrative_support,
            ServiceCategory::CustomerService => &mut self.customer_service,
        }
    }
}

/// Client-facing shape of the services document.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServicesView {
    #[serde(rename = "_id")]
    pub id: String,
    pub sales: ServiceBucket,
    pub administrative_support: ServiceBucket,
    pub customer_service: ServiceBucket,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ServicesDocument> for ServicesView {
    fn from(doc: ServicesDocument) -> Self {
        Self {
            id: doc.id.map(|id| id.to_hex()).unwrap_or_default(),
            sales: doc.sales,
            administrative_support: doc.administrative_support,
            customer_service: doc.customer_service,
            created_at: doc.created_at.try_to_rfc3339_string().unwrap_or_default(),
            updated_at: doc.updated_at.try_to_rfc3339_string().unwrap_or_default(),
        }
    }
}

// ==================== REQUEST MODELS ====================

/// Tags arrive either as a list or as the raw comma/space separated text of
/// the form field.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    Text(String),
}

impl TagsInput {
    pub fn into_tags(self) -> Vec<String> {
        let raw: Vec<String> = match self {
            TagsInput::List(list) => list,
            TagsInput::Text(text) => text
                .split(|c: char| c == ',' || c.is_whitespace())
                .map(str::to_string)
                .collect(),
        };

        raw.into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleInfoInput {
    #[validate(required, length(min = 1))]
    pub title: Option<String>,
    #[validate(required, length(min = 1))]
    pub description: Option<String>,
    pub category: Option<String>,
    #[validate(required)]
    pub level: Option<ModuleLevel>,
    #[validate(required, length(min = 1))]
    pub duration: Option<String>,
    #[serde(default)]
    pub prerequisites: Option<String>,
    #[serde(default)]
    pub learning_objectives: Vec<String>,
    pub tags: Option<TagsInput>,
    #[validate(required, length(min = 1))]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetadataInput {
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateModuleRequest {
    #[validate(required, nested)]
    pub module_info: Option<ModuleInfoInput>,
    #[validate(required, nested)]
    pub lessons: Option<Vec<Lesson>>,
    #[validate(required)]
    pub metadata: Option<MetadataInput>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
