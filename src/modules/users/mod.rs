// Users module: accounts allowed to call the API

pub mod models;
pub mod repositories;

pub use models::{AppUser, Role};
pub use repositories::{CredentialStore, InMemoryCredentialStore, MySqlCredentialStore};
