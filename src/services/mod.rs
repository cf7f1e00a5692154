pub mod account_service;
pub mod activity_service;
pub mod module_service;

use crate::utils::error::AppError;
use mongodb::bson::oid::ObjectId;

/// Parses a hex ObjectId from a path or body field.
pub fn parse_object_id(raw: &str, what: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw.trim())
        .map_err(|_| AppError::InvalidRequest(format!("Invalid {} id", what)))
}

/// Trimmed value of a required text field. Blank input counts as missing.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
