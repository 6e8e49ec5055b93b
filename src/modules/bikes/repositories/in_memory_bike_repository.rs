use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::core::{AppError, Mutation, Repository, Result};
use crate::modules::bikes::models::Bike;

/// Process-local bike store.
///
/// Backs `STORAGE_BACKEND=memory` runs and the HTTP tests. IDs are handed out
/// from monotonically increasing counters and are never reused.
#[derive(Default)]
pub struct InMemoryBikeRepository {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    bikes: BTreeMap<i64, Bike>,
    last_bike_id: i64,
    last_customer_id: i64,
}

impl InMemoryBikeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<Bike, i64> for InMemoryBikeRepository {
    async fn find_all(&self) -> Result<Vec<Bike>> {
        Ok(self.state.read().await.bikes.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Bike>> {
        Ok(self.state.read().await.bikes.get(&id).cloned())
    }

    async fn save(&self, mut bike: Bike) -> Result<Bike> {
        let mut state = self.state.write().await;

        let bike_id = match bike.bike_id {
            Some(id) if state.bikes.contains_key(&id) => id,
            Some(id) => {
                return Err(AppError::not_found(format!("Bike with id {} not found", id)));
            }
            None => {
                state.last_bike_id += 1;
                state.last_bike_id
            }
        };

        if bike.customer.customer_id.is_none() {
            state.last_customer_id += 1;
            bike.customer.customer_id = Some(state.last_customer_id);
        }

        bike.bike_id = Some(bike_id);
        state.bikes.insert(bike_id, bike.clone());
        Ok(bike)
    }

    async fn update_by_id(&self, id: i64, mutation: Mutation<Bike>) -> Result<Bike> {
        let mut state = self.state.write().await;
        let bike = state
            .bikes
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Bike with id {} not found", id)))?;

        let customer_id = bike.customer.customer_id;
        mutation(bike);
        bike.bike_id = Some(id);
        bike.customer.customer_id = customer_id;

        Ok(bike.clone())
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        self.state
            .write()
            .await
            .bikes
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Bike with id {} not found", id)))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        Ok(self.state.read().await.bikes.contains_key(&id))
    }
}
