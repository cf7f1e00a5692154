use crate::config::SeedAdmin;
use crate::database::Store;
use crate::models::{Role, User};
use crate::utils::password;

/// Creates the first `super_admin` from the SEED_ADMIN_* settings unless an
/// admin-level account (or one using the seed email) already exists.
/// Failures are logged; boot continues either way.
pub async fn seed_admin_account(store: &dyn Store, seed: Option<&SeedAdmin>, bcrypt_cost: u32) {
    let seed = match seed {
        Some(seed) => seed,
        None => {
            log::warn!("⚠️  SEED_ADMIN_EMAIL / SEED_ADMIN_PASSWORD not set, skipping admin seed");
            return;
        }
    };

    let email = seed.email.trim().to_lowercase();

    match store.find_admin_or_email(&email).await {
        Ok(Some(_)) => {
            log::info!("✅ Admin account already exists.");
            return;
        }
        Ok(None) => {}
        Err(e) => {
            log::error!("❌ Failed to seed admin account: {}", e);
            return;
        }
    }

    let hashed = match password::hash_password(&seed.password, bcrypt_cost).await {
        Ok(hashed) => hashed,
        Err(e) => {
            log::error!("❌ Failed to seed admin account: {}", e);
            return;
        }
    };

    let mut admin = User::new(
        seed.fullname.clone(),
        email,
        seed.phone.clone(),
        hashed,
        Role::SuperAdmin,
    );
    admin.active = true;

    match store.insert_user(admin).await {
        Ok(_) => log::info!("✅ Admin account created successfully."),
        Err(e) => log::error!("❌ Failed to seed admin account: {}", e),
    }
}
