//! Bike Service Library
//!
//! REST backend for tracking bikes under repair and the customers who own
//! them. Reads are open to any authenticated account, mutations need the
//! ADMIN role.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;
pub mod startup;

// Re-export commonly used types
pub use modules::bikes;
pub use modules::users;
