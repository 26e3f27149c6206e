use super::validation::{Checker, Validate, ValidationError};
use super::EntityModel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A customer's vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Car {
    pub id: i32,
    pub make: String,
    pub year: i32,
    /// Vehicle identification number, unique across all cars.
    pub vin: String,
    pub owner_name: String,
}

/// Create / full-replace payload for a car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CarCreate {
    #[schema(example = "Toyota")]
    pub make: String,
    #[schema(example = 2018)]
    pub year: i32,
    #[schema(example = "1HGCM82633A004352")]
    pub vin: String,
    #[schema(example = "James Smith")]
    pub owner_name: String,
}

impl Validate for CarCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        Checker::new()
            .text("make", &self.make)
            .text("vin", &self.vin)
            .not_blank("vin", &self.vin)
            .text("owner_name", &self.owner_name)
            .finish()
    }
}

impl From<Car> for CarCreate {
    fn from(car: Car) -> Self {
        Self {
            make: car.make,
            year: car.year,
            vin: car.vin,
            owner_name: car.owner_name,
        }
    }
}

/// Persistence description of the `cars` table.
pub struct CarModel;

impl EntityModel for CarModel {
    fn table_name(&self) -> &str {
        "cars"
    }

    fn get_create_table_sql(&self) -> &str {
        "CREATE TABLE IF NOT EXISTS cars (
            id SERIAL PRIMARY KEY,
            make TEXT NOT NULL,
            year INTEGER NOT NULL,
            vin TEXT NOT NULL UNIQUE,
            owner_name TEXT NOT NULL
        )"
    }

    fn get_index_sql(&self) -> &[&'static str] {
        &["CREATE INDEX IF NOT EXISTS ix_cars_make_year ON cars (make, year)"]
    }
}
