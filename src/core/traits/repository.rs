use async_trait::async_trait;

use crate::core::Result;

/// In-place change applied to a stored entity
pub type Mutation<T> = Box<dyn FnOnce(&mut T) + Send>;

/// Base repository trait for CRUD operations
/// Every persisted aggregate is stored through this contract
#[async_trait]
pub trait Repository<T, ID>: Send + Sync {
    /// List all entities in store order
    async fn find_all(&self) -> Result<Vec<T>>;

    /// Find entity by ID
    async fn find_by_id(&self, id: ID) -> Result<Option<T>>;

    /// Insert the entity when it has no ID yet, otherwise update it in place.
    /// Returns the entity as persisted, including generated IDs.
    async fn save(&self, entity: T) -> Result<T>;

    /// Read, change and write back one entity as a single atomic step.
    /// Fails with `AppError::NotFound` when no entity has this ID.
    async fn update_by_id(&self, id: ID, mutation: Mutation<T>) -> Result<T>;

    /// Delete an entity by ID
    async fn delete_by_id(&self, id: ID) -> Result<()>;

    /// Check whether an entity with this ID exists
    async fn exists_by_id(&self, id: ID) -> Result<bool>;

    /// Verify the backing store is reachable
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
