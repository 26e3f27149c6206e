//! Car repository.

use sqlx::PgPool;
use tracing::instrument;

use super::StoreError;
use crate::domain::model::{Car, CarCreate, Pagination, SortOrder};

const CAR_COLUMNS: &str = "id, make, year, vin, owner_name";

/// Car repository
pub struct CarRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CarRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: i32) -> Result<Option<Car>, StoreError> {
        let car = sqlx::query_as::<_, Car>(&format!("SELECT {CAR_COLUMNS} FROM cars WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(car)
    }

    /// Lists cars in insertion order, or by year when `sort` is given (ties broken by id).
    pub async fn list(
        &self,
        page: Pagination,
        sort: Option<SortOrder>,
    ) -> Result<Vec<Car>, StoreError> {
        let order_by = match sort {
            Some(order) => format!("year {}, id", order.as_sql()),
            None => "id".to_string(),
        };
        let cars = sqlx::query_as::<_, Car>(&format!(
            "SELECT {CAR_COLUMNS} FROM cars ORDER BY {order_by} LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;
        Ok(cars)
    }

    /// Exact match on both make and year; unbounded.
    pub async fn search(&self, make: &str, year: i32) -> Result<Vec<Car>, StoreError> {
        let cars = sqlx::query_as::<_, Car>(&format!(
            "SELECT {CAR_COLUMNS} FROM cars WHERE make = $1 AND year = $2 ORDER BY id"
        ))
        .bind(make)
        .bind(year)
        .fetch_all(self.pool)
        .await?;
        Ok(cars)
    }

    #[instrument(skip(self, input), fields(vin = %input.vin))]
    pub async fn create(&self, input: &CarCreate) -> Result<Car, StoreError> {
        let car = sqlx::query_as::<_, Car>(&format!(
            "INSERT INTO cars (make, year, vin, owner_name) VALUES ($1, $2, $3, $4) RETURNING {CAR_COLUMNS}"
        ))
        .bind(&input.make)
        .bind(input.year)
        .bind(&input.vin)
        .bind(&input.owner_name)
        .fetch_one(self.pool)
        .await?;
        tracing::info!(car_id = car.id, "car created");
        Ok(car)
    }

    /// Overwrites every field of the car. `None` when the id does not exist.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: &CarCreate) -> Result<Option<Car>, StoreError> {
        let car = sqlx::query_as::<_, Car>(&format!(
            "UPDATE cars SET make = $2, year = $3, vin = $4, owner_name = $5
             WHERE id = $1 RETURNING {CAR_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.make)
        .bind(input.year)
        .bind(&input.vin)
        .bind(&input.owner_name)
        .fetch_optional(self.pool)
        .await?;
        Ok(car)
    }

    /// Removes the car and returns it. Fails with a foreign key violation while orders reference it.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<Option<Car>, StoreError> {
        let car = sqlx::query_as::<_, Car>(&format!(
            "DELETE FROM cars WHERE id = $1 RETURNING {CAR_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        if car.is_some() {
            tracing::info!(car_id = id, "car deleted");
        }
        Ok(car)
    }
}
