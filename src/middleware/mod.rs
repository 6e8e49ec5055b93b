pub mod auth;
pub mod error_handler;

pub use auth::{hash_password, provision_user, verify_password, Admin, BasicAuth, Principal};
pub use error_handler::{json_config, json_error_handler};
