// Bikes module: bikes under repair and the customers who own them

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use controllers::configure;
pub use models::{Bike, BikeDto, Customer, CustomerDto};
pub use repositories::{BikeRepository, InMemoryBikeRepository, MySqlBikeRepository};
pub use services::BikeService;
