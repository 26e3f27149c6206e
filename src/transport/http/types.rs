use crate::app::database_service::DatabaseService;
use crate::domain::model::order::check_cost;
use crate::domain::model::validation::Checker;
use crate::domain::model::{Pagination, SortOrder, Validate, ValidationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseService,
}

impl AppState {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }
}

/// Envelope used for error bodies and service endpoints.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(data: JsonValue) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

fn default_limit() -> u32 {
    crate::domain::model::page::DEFAULT_LIMIT
}

/// `GET /cars` query string.
#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CarListParams {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Order by year, `asc` or `desc`. Insertion order when absent.
    pub sort_by_year: Option<SortOrder>,
}

impl CarListParams {
    pub fn page(&self) -> Pagination {
        Pagination::new(self.skip, self.limit)
    }
}

impl Validate for CarListParams {}

impl Validate for Pagination {}

/// `GET /cars/search` query string.
#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CarSearchParams {
    pub make: String,
    pub year: i32,
}

impl Validate for CarSearchParams {
    fn validate(&self) -> Result<(), ValidationError> {
        Checker::new().text("make", &self.make).finish()
    }
}

/// `PUT /orders/update-costs-by-car/{car_id}` query string.
#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NewCostParams {
    #[param(value_type = String, example = "500.00")]
    pub new_cost: Decimal,
}

impl Validate for NewCostParams {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut checker = Checker::new();
        check_cost(&mut checker, "new_cost", &self.new_cost);
        checker.finish()
    }
}

/// `GET /orders/search-details` query string.
#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WorkDetailsSearchParams {
    /// Substring to look for in the work details description (case-insensitive).
    pub q: String,
}

impl Validate for WorkDetailsSearchParams {
    fn validate(&self) -> Result<(), ValidationError> {
        Checker::new().text("q", &self.q).finish()
    }
}
