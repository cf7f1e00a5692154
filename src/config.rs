use crate::utils::password::{MAX_BCRYPT_COST, MIN_BCRYPT_COST};
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    MongoDB,
    Memory,
}

/// Credentials of the account created on first boot.
#[derive(Debug, Clone)]
pub struct SeedAdmin {
    pub fullname: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub bcrypt_cost: u32,
    pub seed_admin: Option<SeedAdmin>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = var("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(5000);

        let cors_origins = var("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        let storage = match var("STORAGE_BACKEND").as_deref() {
            Some("memory") => StorageBackend::Memory,
            Some("mongodb") | None => StorageBackend::MongoDB,
            Some(other) => {
                log::warn!("⚠️  Unknown STORAGE_BACKEND '{}', using mongodb", other);
                StorageBackend::MongoDB
            }
        };

        let bcrypt_cost = var("BCRYPT_COST")
            .and_then(|c| c.trim().parse().ok())
            .filter(|c| (MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(c))
            .unwrap_or(bcrypt::DEFAULT_COST);

        let seed_admin = match (var("SEED_ADMIN_EMAIL"), var("SEED_ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(SeedAdmin {
                fullname: var("SEED_ADMIN_FULLNAME").unwrap_or_else(|| "Administrator".to_string()),
                email,
                phone: var("SEED_ADMIN_PHONE"),
                password,
            }),
            _ => None,
        };

        Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            cors_origins,
            storage,
            database_url: var("DATABASE_URL"),
            bcrypt_cost,
            seed_admin,
        }
    }
}

/// `CORS_ORIGINS` is a JSON array, e.g. `["http://localhost:5173"]`.
fn parse_origins(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(origins) => origins,
        Err(e) => {
            log::warn!("⚠️  CORS_ORIGINS is not a JSON array of strings ({}), ignoring", e);
            Vec::new()
        }
    }
}
