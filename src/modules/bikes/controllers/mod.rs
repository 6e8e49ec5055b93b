pub mod bike_controller;

pub use bike_controller::{add_bike, configure, delete_bike, get_all, get_by_id, update_bike};
