pub mod repository;

pub use repository::{Mutation, Repository};
