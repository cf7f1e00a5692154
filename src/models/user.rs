use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const USERS_COLLECTION: &str = "users";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which service an employee mainly trains for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceFocus {
    Sales,
    AdministrativeSupport,
    CustomerService,
}

/// Account document as stored in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub fullname: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub password: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub service_focus: Option<ServiceFocus>,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

impl User {
    pub fn new(
        fullname: String,
        email: String,
        phone: Option<String>,
        password_hash: String,
        role: Role,
    ) -> Self {
        let now = BsonDateTime::now();
        Self {
            id: None,
            fullname,
            email,
            phone,
            password: password_hash,
            role,
            active: false,
            service_focus: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Client-facing projection of an account; never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub fullname: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub active: bool,
    pub service_focus: Option<ServiceFocus>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            fullname: user.fullname,
            email: user.email,
            phone: user.phone,
            role: user.role,
            active: user.active,
            service_focus: user.service_focus,
            created_at: user.created_at.try_to_rfc3339_string().unwrap_or_default(),
            updated_at: user.updated_at.try_to_rfc3339_string().unwrap_or_default(),
        }
    }
}

/// Returned by login: just enough for the client to route by role.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AuthenticatedUser {
    pub id: String,
    pub fullname: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            fullname: user.fullname.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(required, length(min = 1))]
    pub fullname: Option<String>,
    #[validate(required, email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(required, length(min = 1))]
    pub password: Option<String>,
    pub service_focus: Option<ServiceFocus>,
}

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct CreateAdminRequest {
    #[validate(required, length(min = 1))]
    pub fullname: Option<String>,
    #[validate(required, email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(required, length(min = 1))]
    pub password: Option<String>,
    #[validate(required)]
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct LoginRequest {
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
    #[validate(required, length(min = 1))]
    pub password: Option<String>,
}
