use crate::utils::error::AppError;
use actix_web::web;

/// Cost bounds bcrypt accepts.
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

/// bcrypt is CPU-bound, so hashing runs on actix's blocking pool instead of
/// an async worker.
pub async fn hash_password(plain: &str, cost: u32) -> Result<String, AppError> {
    let plain = plain.to_string();

    web::block(move || bcrypt::hash(plain, cost))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

pub async fn verify_password(plain: &str, hashed: &str) -> Result<bool, AppError> {
    let plain = plain.to_string();
    let hashed = hashed.to_string();

    web::block(move || bcrypt::verify(plain, &hashed))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Password verification error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_hash_then_verify() {
        let hashed = hash_password("s3cret!", MIN_BCRYPT_COST).await.unwrap();
        assert_ne!(hashed, "s3cret!");
        assert!(verify_password("s3cret!", &hashed).await.unwrap());
        assert!(!verify_password("wrong", &hashed).await.unwrap());
    }

    #[actix_web::test]
    async fn test_verify_rejects_garbage_hash() {
        assert!(verify_password("s3cret!", "not-a-bcrypt-hash").await.is_err());
    }
}
