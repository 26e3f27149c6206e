//! Order repository.
//!
//! Plain reads return `Order`; the `*_with_details` variants resolve the car and mechanic
//! with a JOIN in the same statement (no N+1).

use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;

use super::StoreError;
use crate::domain::model::{BulkCostUpdate, Order, OrderCreate, OrderWithDetails, Pagination};

const ORDER_COLUMNS: &str = "id, issue_date, cost, work_type, planned_completion_date, \
     actual_completion_date, work_details, car_id, mechanic_id";

const DETAILS_SELECT: &str = r#"
    SELECT
        o.id, o.issue_date, o.cost, o.work_type, o.planned_completion_date,
        o.actual_completion_date, o.work_details, o.car_id, o.mechanic_id,
        c.make AS car_make, c.year AS car_year, c.vin AS car_vin, c.owner_name AS car_owner_name,
        m.full_name AS mechanic_full_name, m.experience AS mechanic_experience,
        m.rank AS mechanic_rank, m.employee_id AS mechanic_employee_id,
        m.phone_number AS mechanic_phone_number
    FROM orders o
    JOIN cars c ON c.id = o.car_id
    JOIN mechanics m ON m.id = o.mechanic_id
"#;

/// Turns a free-text needle into an ILIKE pattern matching it as a literal substring.
pub fn substring_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

pub struct OrderRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: i32) -> Result<Option<Order>, StoreError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(order)
    }

    pub async fn get_with_details(&self, id: i32) -> Result<Option<OrderWithDetails>, StoreError> {
        let order = sqlx::query_as::<_, OrderWithDetails>(&format!("{DETAILS_SELECT} WHERE o.id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(order)
    }

    pub async fn list(&self, page: Pagination) -> Result<Vec<Order>, StoreError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;
        Ok(orders)
    }

    pub async fn list_with_details(
        &self,
        page: Pagination,
    ) -> Result<Vec<OrderWithDetails>, StoreError> {
        let orders = sqlx::query_as::<_, OrderWithDetails>(&format!(
            "{DETAILS_SELECT} ORDER BY o.id LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;
        Ok(orders)
    }

    #[instrument(skip(self, input), fields(car_id = input.car_id, mechanic_id = input.mechanic_id))]
    pub async fn create(&self, input: &OrderCreate) -> Result<Order, StoreError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "INSERT INTO orders (issue_date, cost, work_type, planned_completion_date,
                                 actual_completion_date, work_details, car_id, mechanic_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {ORDER_COLUMNS}"
        ))
        .bind(input.issue_date)
        .bind(input.cost)
        .bind(&input.work_type)
        .bind(input.planned_completion_date)
        .bind(input.actual_completion_date)
        .bind(input.work_details.as_ref().map(Json))
        .bind(input.car_id)
        .bind(input.mechanic_id)
        .fetch_one(self.pool)
        .await?;
        tracing::info!(order_id = order.id, "order created");
        Ok(order)
    }

    /// Overwrites every field of the order, including clearing optional ones left out.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: &OrderCreate) -> Result<Option<Order>, StoreError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "UPDATE orders
             SET issue_date = $2, cost = $3, work_type = $4, planned_completion_date = $5,
                 actual_completion_date = $6, work_details = $7, car_id = $8, mechanic_id = $9
             WHERE id = $1 RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .bind(input.issue_date)
        .bind(input.cost)
        .bind(&input.work_type)
        .bind(input.planned_completion_date)
        .bind(input.actual_completion_date)
        .bind(input.work_details.as_ref().map(Json))
        .bind(input.car_id)
        .bind(input.mechanic_id)
        .fetch_optional(self.pool)
        .await?;
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<Option<Order>, StoreError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "DELETE FROM orders WHERE id = $1 RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        if order.is_some() {
            tracing::info!(order_id = id, "order deleted");
        }
        Ok(order)
    }

    /// Sets `cost` on every order of `car_id` in one statement.
    #[instrument(skip(self))]
    pub async fn bulk_update_cost_by_car(
        &self,
        car_id: i32,
        new_cost: Decimal,
    ) -> Result<BulkCostUpdate, StoreError> {
        let result = sqlx::query("UPDATE orders SET cost = $2 WHERE car_id = $1")
            .bind(car_id)
            .bind(new_cost)
            .execute(self.pool)
            .await?;
        tracing::info!(car_id, updated = result.rows_affected(), "order costs updated");
        Ok(BulkCostUpdate::new(car_id, result.rows_affected()))
    }

    /// Case-insensitive substring search on `work_details->>'description'`.
    pub async fn search_by_work_details_description(
        &self,
        needle: &str,
    ) -> Result<Vec<Order>, StoreError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            r#"SELECT {ORDER_COLUMNS} FROM orders
               WHERE work_details->>'description' ILIKE $1 ESCAPE '\'
               ORDER BY id"#
        ))
        .bind(substring_pattern(needle))
        .fetch_all(self.pool)
        .await?;
        Ok(orders)
    }
}
