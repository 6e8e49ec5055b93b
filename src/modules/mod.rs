pub mod bikes;
pub mod health;
pub mod users;
