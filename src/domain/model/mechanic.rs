use super::validation::{Checker, Validate, ValidationError};
use super::EntityModel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Column width of `mechanics.phone_number`.
pub const PHONE_NUMBER_MAX_LEN: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Mechanic {
    pub id: i32,
    pub full_name: String,
    /// Years of experience.
    pub experience: i32,
    pub rank: String,
    pub employee_id: String,
    pub phone_number: Option<String>,
}

/// Create / full-replace payload for a mechanic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MechanicCreate {
    #[schema(example = "Robert Brown")]
    pub full_name: String,
    #[schema(example = 12)]
    pub experience: i32,
    #[schema(example = "Senior Technician")]
    pub rank: String,
    #[schema(example = "EMP-04211")]
    pub employee_id: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl Validate for MechanicCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut checker = Checker::new();
        checker
            .text("full_name", &self.full_name)
            .text("rank", &self.rank)
            .text("employee_id", &self.employee_id)
            .not_blank("employee_id", &self.employee_id);
        if let Some(phone) = &self.phone_number {
            checker
                .text("phone_number", phone)
                .max_chars("phone_number", phone, PHONE_NUMBER_MAX_LEN);
        }
        checker.finish()
    }
}

impl From<Mechanic> for MechanicCreate {
    fn from(m: Mechanic) -> Self {
        Self {
            full_name: m.full_name,
            experience: m.experience,
            rank: m.rank,
            employee_id: m.employee_id,
            phone_number: m.phone_number,
        }
    }
}

/// Number of orders assigned to mechanics sharing a full name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct MechanicOrderStats {
    pub full_name: String,
    pub order_count: i64,
}

pub struct MechanicModel;

impl EntityModel for MechanicModel {
    fn table_name(&self) -> &str {
        "mechanics"
    }

    fn get_create_table_sql(&self) -> &str {
        "CREATE TABLE IF NOT EXISTS mechanics (
            id SERIAL PRIMARY KEY,
            full_name TEXT NOT NULL,
            experience INTEGER NOT NULL,
            rank TEXT NOT NULL,
            employee_id TEXT NOT NULL UNIQUE,
            phone_number VARCHAR(20)
        )"
    }
}
