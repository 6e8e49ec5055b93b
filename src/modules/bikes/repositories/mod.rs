pub mod in_memory_bike_repository;
pub mod mysql_bike_repository;

use std::sync::Arc;

use crate::core::Repository;
use crate::modules::bikes::models::Bike;

pub use in_memory_bike_repository::InMemoryBikeRepository;
pub use mysql_bike_repository::MySqlBikeRepository;

/// Shared handle to whichever bike store is configured
pub type BikeRepository = Arc<dyn Repository<Bike, i64>>;
