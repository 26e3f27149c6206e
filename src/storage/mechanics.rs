//! Mechanic repository.

use sqlx::PgPool;
use tracing::instrument;

use super::StoreError;
use crate::domain::model::{Mechanic, MechanicCreate, MechanicOrderStats, Pagination};

const MECHANIC_COLUMNS: &str = "id, full_name, experience, rank, employee_id, phone_number";

pub struct MechanicRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> MechanicRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: i32) -> Result<Option<Mechanic>, StoreError> {
        let mechanic = sqlx::query_as::<_, Mechanic>(&format!(
            "SELECT {MECHANIC_COLUMNS} FROM mechanics WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(mechanic)
    }

    pub async fn list(&self, page: Pagination) -> Result<Vec<Mechanic>, StoreError> {
        let mechanics = sqlx::query_as::<_, Mechanic>(&format!(
            "SELECT {MECHANIC_COLUMNS} FROM mechanics ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;
        Ok(mechanics)
    }

    #[instrument(skip(self, input), fields(employee_id = %input.employee_id))]
    pub async fn create(&self, input: &MechanicCreate) -> Result<Mechanic, StoreError> {
        let mechanic = sqlx::query_as::<_, Mechanic>(&format!(
            "INSERT INTO mechanics (full_name, experience, rank, employee_id, phone_number)
             VALUES ($1, $2, $3, $4, $5) RETURNING {MECHANIC_COLUMNS}"
        ))
        .bind(&input.full_name)
        .bind(input.experience)
        .bind(&input.rank)
        .bind(&input.employee_id)
        .bind(&input.phone_number)
        .fetch_one(self.pool)
        .await?;
        tracing::info!(mechanic_id = mechanic.id, "mechanic created");
        Ok(mechanic)
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i32,
        input: &MechanicCreate,
    ) -> Result<Option<Mechanic>, StoreError> {
        let mechanic = sqlx::query_as::<_, Mechanic>(&format!(
            "UPDATE mechanics
             SET full_name = $2, experience = $3, rank = $4, employee_id = $5, phone_number = $6
             WHERE id = $1 RETURNING {MECHANIC_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.full_name)
        .bind(input.experience)
        .bind(&input.rank)
        .bind(&input.employee_id)
        .bind(&input.phone_number)
        .fetch_optional(self.pool)
        .await?;
        Ok(mechanic)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<Option<Mechanic>, StoreError> {
        let mechanic = sqlx::query_as::<_, Mechanic>(&format!(
            "DELETE FROM mechanics WHERE id = $1 RETURNING {MECHANIC_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        if mechanic.is_some() {
            tracing::info!(mechanic_id = id, "mechanic deleted");
        }
        Ok(mechanic)
    }

    /// Order count per mechanic full name. Inner join, so mechanics without orders are absent.
    pub async fn order_counts_per_mechanic(&self) -> Result<Vec<MechanicOrderStats>, StoreError> {
        let stats = sqlx::query_as::<_, MechanicOrderStats>(
            r#"
            SELECT m.full_name, COUNT(o.id) AS order_count
            FROM mechanics m
            JOIN orders o ON o.mechanic_id = m.id
            GROUP BY m.full_name
            ORDER BY m.full_name
            "#,
        )
        .fetch_all(self.pool)
        .await?;
        Ok(stats)
    }
}
