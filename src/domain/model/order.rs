use super::car::Car;
use super::mechanic::Mechanic;
use super::validation::{Checker, Validate, ValidationError};
use super::EntityModel;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{FromRow, Row};
use utoipa::ToSchema;

/// Free-form work details document (conventionally `description` and `parts`).
pub type WorkDetails = serde_json::Map<String, JsonValue>;

/// Largest cost representable by `NUMERIC(10, 2)`.
const MAX_COST_EXCLUSIVE: i64 = 100_000_000;

/// A repair order linking one car to one mechanic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i32,
    pub issue_date: NaiveDate,
    #[schema(value_type = String, example = "149.99")]
    pub cost: Decimal,
    pub work_type: String,
    pub planned_completion_date: NaiveDate,
    pub actual_completion_date: Option<NaiveDate>,
    #[schema(value_type = Option<Object>)]
    pub work_details: Option<WorkDetails>,
    pub car_id: i32,
    pub mechanic_id: i32,
}

/// Create / full-replace payload for an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderCreate {
    #[schema(example = "2024-03-01")]
    pub issue_date: NaiveDate,
    /// Accepted as a string or a number; at most two fractional digits.
    #[schema(value_type = String, example = "149.99")]
    pub cost: Decimal,
    #[schema(example = "Brake Repair")]
    pub work_type: String,
    #[schema(example = "2024-03-05")]
    pub planned_completion_date: NaiveDate,
    #[serde(default)]
    pub actual_completion_date: Option<NaiveDate>,
    pub car_id: i32,
    pub mechanic_id: i32,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub work_details: Option<WorkDetails>,
}

/// Validates a monetary amount against the `NUMERIC(10, 2)` column.
pub fn check_cost(checker: &mut Checker, field: &str, cost: &Decimal) {
    checker.check(
        cost.normalize().scale() <= 2,
        field,
        "must have at most 2 decimal places",
    );
    checker.check(
        cost.abs() < Decimal::from(MAX_COST_EXCLUSIVE),
        field,
        "must be less than 100000000",
    );
}

impl Validate for OrderCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut checker = Checker::new();
        check_cost(&mut checker, "cost", &self.cost);
        checker.text("work_type", &self.work_type);
        if let Some(details) = &self.work_details {
            checker.json_text("work_details", details);
        }
        checker.finish()
    }
}

impl From<Order> for OrderCreate {
    fn from(o: Order) -> Self {
        Self {
            issue_date: o.issue_date,
            cost: o.cost,
            work_type: o.work_type,
            planned_completion_date: o.planned_completion_date,
            actual_completion_date: o.actual_completion_date,
            car_id: o.car_id,
            mechanic_id: o.mechanic_id,
            work_details: o.work_details,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let work_details: Option<Json<WorkDetails>> = row.try_get("work_details")?;
        Ok(Self {
            id: row.try_get("id")?,
            issue_date: row.try_get("issue_date")?,
            cost: row.try_get("cost")?,
            work_type: row.try_get("work_type")?,
            planned_completion_date: row.try_get("planned_completion_date")?,
            actual_completion_date: row.try_get("actual_completion_date")?,
            work_details: work_details.map(|Json(d)| d),
            car_id: row.try_get("car_id")?,
            mechanic_id: row.try_get("mechanic_id")?,
        })
    }
}

/// An order with its car and mechanic resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderWithDetails {
    #[serde(flatten)]
    pub order: Order,
    pub car: Car,
    pub mechanic: Mechanic,
}

impl<'r> FromRow<'r, PgRow> for OrderWithDetails {
    /// Expects the order columns unprefixed and the relations as `car_*` / `mechanic_*`.
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            order: Order::from_row(row)?,
            car: Car {
                id: row.try_get("car_id")?,
                make: row.try_get("car_make")?,
                year: row.try_get("car_year")?,
                vin: row.try_get("car_vin")?,
                owner_name: row.try_get("car_owner_name")?,
            },
            mechanic: Mechanic {
                id: row.try_get("mechanic_id")?,
                full_name: row.try_get("mechanic_full_name")?,
                experience: row.try_get("mechanic_experience")?,
                rank: row.try_get("mechanic_rank")?,
                employee_id: row.try_get("mechanic_employee_id")?,
                phone_number: row.try_get("mechanic_phone_number")?,
            },
        })
    }
}

/// Result of re-pricing every order of one car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BulkCostUpdate {
    #[schema(example = "Costs for car 3 updated.")]
    pub message: String,
    /// Number of orders whose cost was overwritten.
    pub updated: u64,
}

impl BulkCostUpdate {
    pub fn new(car_id: i32, updated: u64) -> Self {
        Self {
            message: format!("Costs for car {} updated.", car_id),
            updated,
        }
    }
}

pub struct OrderModel;

impl EntityModel for OrderModel {
    fn table_name(&self) -> &str {
        "orders"
    }

    fn get_create_table_sql(&self) -> &str {
        "CREATE TABLE IF NOT EXISTS orders (
            id SERIAL PRIMARY KEY,
            issue_date DATE NOT NULL,
            cost NUMERIC(10, 2) NOT NULL,
            work_type TEXT NOT NULL,
            planned_completion_date DATE NOT NULL,
            actual_completion_date DATE,
            work_details JSONB,
            car_id INTEGER NOT NULL REFERENCES cars (id) ON DELETE RESTRICT,
            mechanic_id INTEGER NOT NULL REFERENCES mechanics (id) ON DELETE RESTRICT
        )"
    }

    fn get_index_sql(&self) -> &[&'static str] {
        &[
            "CREATE INDEX IF NOT EXISTS ix_orders_car_id ON orders (car_id)",
            "CREATE INDEX IF NOT EXISTS ix_orders_mechanic_id ON orders (mechanic_id)",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> JsonValue {
        json!({
            "issue_date": "2024-03-01",
            "cost": "149.99",
            "work_type": "Brake Repair",
            "planned_completion_date": "2024-03-05",
            "car_id": 1,
            "mechanic_id": 2,
            "work_details": {
                "description": "Replaced front brake pads and rotors.",
                "parts": ["Front Brake Pads", "Front Rotors"]
            }
        })
    }

    #[test]
    fn optional_fields_default_to_none() {
        let mut body = payload();
        body.as_object_mut().unwrap().remove("work_details");
        let order: OrderCreate = serde_json::from_value(body).unwrap();
        assert_eq!(order.actual_completion_date, None);
        assert_eq!(order.work_details, None);
    }

    #[test]
    fn cost_accepts_string_or_number_and_serializes_as_string() {
        let order: OrderCreate = serde_json::from_value(payload()).unwrap();
        assert_eq!(order.cost, Decimal::new(14999, 2));

        let mut body = payload();
        body["cost"] = json!(80.5);
        let order: OrderCreate = serde_json::from_value(body).unwrap();
        assert_eq!(order.cost, Decimal::new(805, 1));

        let out = serde_json::to_value(&order).unwrap();
        assert_eq!(out["cost"], json!("80.5"));
    }

    #[test]
    fn dates_must_be_calendar_dates() {
        let mut body = payload();
        body["issue_date"] = json!("2024-03-01T10:00:00Z");
        assert!(serde_json::from_value::<OrderCreate>(body).is_err());
    }

    #[test]
    fn work_details_must_be_an_object() {
        let mut body = payload();
        body["work_details"] = json!(["not", "a", "map"]);
        assert!(serde_json::from_value::<OrderCreate>(body).is_err());
    }

    #[test]
    fn cost_precision_and_range_are_checked() {
        let mut order: OrderCreate = serde_json::from_value(payload()).unwrap();
        assert!(order.validate().is_ok());

        order.cost = Decimal::new(5_000, 3); // 5.000 normalizes to 5
        assert!(order.validate().is_ok());

        order.cost = Decimal::new(1_999, 3);
        assert_eq!(order.validate().unwrap_err().errors[0].field, "cost");

        order.cost = Decimal::from(MAX_COST_EXCLUSIVE);
        assert!(order.validate().is_err());
    }

    #[test]
    fn details_shape_flattens_order_fields() {
        let order: OrderCreate = serde_json::from_value(payload()).unwrap();
        let detailed = OrderWithDetails {
            order: Order {
                id: 7,
                issue_date: order.issue_date,
                cost: order.cost,
                work_type: order.work_type.clone(),
                planned_completion_date: order.planned_completion_date,
                actual_completion_date: None,
                work_details: order.work_details.clone(),
                car_id: 1,
                mechanic_id: 2,
            },
            car: Car {
                id: 1,
                make: "Kia".into(),
                year: 2015,
                vin: "KNDJT2A54D7000001".into(),
                owner_name: "Mary Jones".into(),
            },
            mechanic: Mechanic {
                id: 2,
                full_name: "John Davis".into(),
                experience: 9,
                rank: "Senior Technician".into(),
                employee_id: "EMP-10002".into(),
                phone_number: None,
            },
        };
        let out = serde_json::to_value(&detailed).unwrap();
        assert_eq!(out["id"], json!(7));
        assert_eq!(out["cost"], json!("149.99"));
        assert_eq!(out["car"]["make"], json!("Kia"));
        assert_eq!(out["mechanic"]["employee_id"], json!("EMP-10002"));
        assert_eq!(out["actual_completion_date"], JsonValue::Null);
    }
}
