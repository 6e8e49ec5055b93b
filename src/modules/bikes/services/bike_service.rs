use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::core::{AppError, Result};
use crate::modules::bikes::models::{Bike, BikeDto};
use crate::modules::bikes::repositories::BikeRepository;
use crate::modules::bikes::services::bike_mapper;

const MAX_COST_SCALE: u32 = 10;
const MAX_COST_EXCLUSIVE: i64 = 1_000_000_000_000_000_000;

/// Service for bike business logic
pub struct BikeService {
    repository: BikeRepository,
}

impl BikeService {
    pub fn new(repository: BikeRepository) -> Self {
        Self { repository }
    }

    /// Every stored bike, in store order
    pub async fn get_all(&self) -> Result<Vec<BikeDto>> {
        let bikes = self.repository.find_all().await?;
        Ok(bikes.iter().map(bike_mapper::to_dto).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<BikeDto> {
        let bike = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        Ok(bike_mapper::to_dto(&bike))
    }

    /// Persist a new bike together with its customer
    pub async fn add_bike(&self, dto: BikeDto) -> Result<Bike> {
        check_cost(&dto)?;

        let saved = self.repository.save(bike_mapper::to_entity(dto)).await?;

        info!(
            bike_id = ?saved.bike_id,
            customer_id = ?saved.customer.customer_id,
            "Bike registered"
        );
        Ok(saved)
    }

    /// Merge the fields carried by `dto` into the stored bike.
    ///
    /// # Returns
    /// * `Result<Bike>` - The bike as persisted after the merge
    ///
    /// # Errors
    /// `AppError::NotFound` when no bike has this id
    pub async fn update_bike(&self, id: i64, dto: BikeDto) -> Result<Bike> {
        check_cost(&dto)?;

        let saved = self
            .repository
            .update_by_id(
                id,
                Box::new(move |bike: &mut Bike| bike_mapper::merge_into(bike, dto)),
            )
            .await
            .map_err(|e| if e.is_not_found() { not_found(id) } else { e })?;

        info!(bike_id = id, "Bike updated");
        Ok(saved)
    }

    /// Remove a bike and the customer it owns
    pub async fn delete_bike(&self, id: i64) -> Result<()> {
        if !self.repository.exists_by_id(id).await? {
            return Err(not_found(id));
        }

        self.repository.delete_by_id(id).await?;

        info!(bike_id = id, "Bike deleted");
        Ok(())
    }

    /// Readiness probe for the backing store
    pub async fn ping(&self) -> Result<()> {
        self.repository.ping().await
    }
}

/// Costs must fit `DECIMAL(28, 10)` so they read back unchanged
fn check_cost(dto: &BikeDto) -> Result<()> {
    let Some(cost) = dto.cost else {
        return Ok(());
    };

    if cost.normalize().scale() > MAX_COST_SCALE {
        return Err(AppError::validation(format!(
            "cost allows at most {} decimal places",
            MAX_COST_SCALE
        )));
    }

    if cost.abs() >= Decimal::from(MAX_COST_EXCLUSIVE) {
        return Err(AppError::validation(format!(
            "cost must be below {}",
            MAX_COST_EXCLUSIVE
        )));
    }

    Ok(())
}

fn not_found(id: i64) -> AppError {
    warn!(bike_id = id, "Bike not found");
    AppError::not_found(format!("Bike with id {} not found", id))
}
