pub mod bike;
pub mod bike_dto;
pub mod customer;

pub use bike::Bike;
pub use bike_dto::{BikeDto, CustomerDto};
pub use customer::Customer;
