pub mod bike_mapper;
pub mod bike_service;

pub use bike_service::BikeService;
