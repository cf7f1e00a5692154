pub mod activity;
pub mod response;
pub mod training_module;
pub mod user;

pub use activity::*;
pub use response::*;
pub use training_module::*;
pub use user::*;
