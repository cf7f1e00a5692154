pub mod admin_seed;
pub mod services_seed;

pub use admin_seed::seed_admin_account;
pub use services_seed::seed_services_collection;
