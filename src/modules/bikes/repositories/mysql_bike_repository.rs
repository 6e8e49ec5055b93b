// MySQL persistence for bikes and their owning customers.
//
// A bike row references exactly one customer row. Both rows are written and
// removed together inside one transaction.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sqlx::{MySql, MySqlPool, Transaction};

use crate::core::{AppError, Mutation, Repository, Result};
use crate::modules::bikes::models::{Bike, Customer};

const SELECT_BIKES: &str = r#"
    SELECT
        b.bike_id, b.bike_make, b.model_name, b.bike_registration_number,
        b.bike_chassis_number, b.known_issues, b.cost, b.created_date_and_time,
        b.expected_delivery_date, b.given_date, b.updated_date_and_time,
        c.customer_id, c.customer_name, c.phone_number, c.house_no, c.street,
        c.landmark, c.city, c.state, c.pin
    FROM bikes b
    INNER JOIN customers c ON c.customer_id = b.customer_id
"#;

/// Repository for bike database operations
#[derive(Clone)]
pub struct MySqlBikeRepository {
    pool: MySqlPool,
}

impl MySqlBikeRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, mut bike: Bike) -> Result<Bike> {
        let mut tx = self.pool.begin().await?;

        let customer_id = insert_customer(&mut tx, &bike.customer).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO bikes (
                bike_make, model_name, bike_registration_number, bike_chassis_number,
                known_issues, cost, created_date_and_time, expected_delivery_date,
                given_date, updated_date_and_time, customer_id
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&bike.bike_make)
        .bind(&bike.model_name)
        .bind(&bike.bike_registration_number)
        .bind(&bike.bike_chassis_number)
        .bind(&bike.known_issues)
        .bind(bike.cost)
        .bind(bike.created_date_and_time)
        .bind(bike.expected_delivery_date)
        .bind(bike.given_date)
        .bind(bike.updated_date_and_time)
        .bind(customer_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        bike.bike_id = Some(to_id(result.last_insert_id())?);
        bike.customer.customer_id = Some(customer_id);
        Ok(bike)
    }

    async fn update(&self, bike_id: i64, mut bike: Bike) -> Result<Bike> {
        let mut tx = self.pool.begin().await?;

        write_existing(&mut tx, bike_id, &mut bike).await?;

        tx.commit().await?;
        Ok(bike)
    }
}

#[async_trait]
impl Repository<Bike, i64> for MySqlBikeRepository {
    async fn find_all(&self) -> Result<Vec<Bike>> {
        let rows = sqlx::query_as::<_, BikeRow>(&format!("{} ORDER BY b.bike_id", SELECT_BIKES))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(BikeRow::into_bike).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Bike>> {
        let row = sqlx::query_as::<_, BikeRow>(&format!("{} WHERE b.bike_id = ?", SELECT_BIKES))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(BikeRow::into_bike))
    }

    async fn save(&self, bike: Bike) -> Result<Bike> {
        match bike.bike_id {
            Some(id) => self.update(id, bike).await,
            None => self.insert(bike).await,
        }
    }

    async fn update_by_id(&self, id: i64, mutation: Mutation<Bike>) -> Result<Bike> {
        let mut tx = self.pool.begin().await?;

        // Locks both the bike and its customer row until commit
        let row = sqlx::query_as::<_, BikeRow>(&format!(
            "{} WHERE b.bike_id = ? FOR UPDATE",
            SELECT_BIKES
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Err(AppError::not_found(format!("Bike with id {} not found", id)));
        };

        let mut bike = row.into_bike();
        let customer_id = bike.customer.customer_id;
        mutation(&mut bike);
        bike.bike_id = Some(id);
        bike.customer.customer_id = customer_id;

        write_existing(&mut tx, id, &mut bike).await?;

        tx.commit().await?;
        Ok(bike)
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let customer_id: Option<i64> =
            sqlx::query_scalar("SELECT customer_id FROM bikes WHERE bike_id = ? FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(customer_id) = customer_id else {
            return Err(AppError::not_found(format!("Bike with id {} not found", id)));
        };

        sqlx::query("DELETE FROM bikes WHERE bike_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM customers WHERE customer_id = ?")
            .bind(customer_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bikes WHERE bike_id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Write an already persisted bike and its customer inside `tx`
async fn write_existing(
    tx: &mut Transaction<'_, MySql>,
    bike_id: i64,
    bike: &mut Bike,
) -> Result<()> {
    let customer_id = match bike.customer.customer_id {
        Some(customer_id) => {
            update_customer(tx, customer_id, &bike.customer).await?;
            customer_id
        }
        None => insert_customer(tx, &bike.customer).await?,
    };

    let result = sqlx::query(
        r#"
        UPDATE bikes
        SET bike_make = ?, model_name = ?, bike_registration_number = ?,
            bike_chassis_number = ?, known_issues = ?, cost = ?,
            created_date_and_time = ?, expected_delivery_date = ?, given_date = ?,
            updated_date_and_time = ?, customer_id = ?
        WHERE bike_id = ?
        "#,
    )
    .bind(&bike.bike_make)
    .bind(&bike.model_name)
    .bind(&bike.bike_registration_number)
    .bind(&bike.bike_chassis_number)
    .bind(&bike.known_issues)
    .bind(bike.cost)
    .bind(bike.created_date_and_time)
    .bind(bike.expected_delivery_date)
    .bind(bike.given_date)
    .bind(bike.updated_date_and_time)
    .bind(customer_id)
    .bind(bike_id)
    .execute(&mut **tx)
    .await?;

    // MySQL reports changed rows, so an identical update affects 0 rows.
    if result.rows_affected() == 0 && !bike_exists(tx, bike_id).await? {
        return Err(AppError::not_found(format!(
            "Bike with id {} not found",
            bike_id
        )));
    }

    bike.customer.customer_id = Some(customer_id);
    Ok(())
}

async fn insert_customer(tx: &mut Transaction<'_, MySql>, customer: &Customer) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO customers (
            customer_name, phone_number, house_no, street, landmark, city, state, pin
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&customer.customer_name)
    .bind(&customer.phone_number)
    .bind(&customer.house_no)
    .bind(&customer.street)
    .bind(&customer.landmark)
    .bind(&customer.city)
    .bind(&customer.state)
    .bind(&customer.pin)
    .execute(&mut **tx)
    .await?;

    to_id(result.last_insert_id())
}

async fn update_customer(
    tx: &mut Transaction<'_, MySql>,
    customer_id: i64,
    customer: &Customer,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE customers
        SET customer_name = ?, phone_number = ?, house_no = ?, street = ?,
            landmark = ?, city = ?, state = ?, pin = ?
        WHERE customer_id = ?
        "#,
    )
    .bind(&customer.customer_name)
    .bind(&customer.phone_number)
    .bind(&customer.house_no)
    .bind(&customer.street)
    .bind(&customer.landmark)
    .bind(&customer.city)
    .bind(&customer.state)
    .bind(&customer.pin)
    .bind(customer_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn bike_exists(tx: &mut Transaction<'_, MySql>, bike_id: i64) -> Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bikes WHERE bike_id = ?")
        .bind(bike_id)
        .fetch_one(&mut **tx)
        .await?;

    Ok(count > 0)
}

fn to_id(raw: u64) -> Result<i64> {
    i64::try_from(raw).map_err(|_| AppError::internal(format!("Generated id {} overflows", raw)))
}

// Helper struct for database mapping

#[derive(Debug, sqlx::FromRow)]
struct BikeRow {
    bike_id: i64,
    bike_make: Option<String>,
    model_name: Option<String>,
    bike_registration_number: Option<String>,
    bike_chassis_number: Option<String>,
    known_issues: Option<String>,
    cost: Option<Decimal>,
    created_date_and_time: Option<NaiveDateTime>,
    expected_delivery_date: Option<NaiveDate>,
    given_date: Option<NaiveDateTime>,
    updated_date_and_time: Option<NaiveDateTime>,
    customer_id: i64,
    customer_name: Option<String>,
    phone_number: Option<String>,
    house_no: Option<String>,
    street: Option<String>,
    landmark: Option<String>,
    city: Option<String>,
    state: Option<String>,
    pin: Option<String>,
}

impl BikeRow {
    fn into_bike(self) -> Bike {
        Bike {
            bike_id: Some(self.bike_id),
            bike_make: self.bike_make,
            model_name: self.model_name,
            bike_registration_number: self.bike_registration_number,
            bike_chassis_number: self.bike_chassis_number,
            known_issues: self.known_issues,
            cost: self.cost.map(|cost| cost.normalize()),
            created_date_and_time: self.created_date_and_time,
            expected_delivery_date: self.expected_delivery_date,
            given_date: self.given_date,
            updated_date_and_time: self.updated_date_and_time,
            customer: Customer {
                customer_id: Some(self.customer_id),
                customer_name: self.customer_name,
                phone_number: self.phone_number,
                house_no: self.house_no,
                street: self.street,
                landmark: self.landmark,
                city: self.city,
                state: self.state,
                pin: self.pin,
            },
        }
    }
}
