use crate::domain::model::{Car, CarCreate};
use crate::transport::http::error::ApiError;
use crate::transport::http::extract::{EntityId, ValidJson, ValidQuery};
use crate::transport::http::types::{ApiResponse, AppState, CarListParams, CarSearchParams};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

const RESOURCE: &str = "Car";

#[utoipa::path(
    post,
    path = "/cars",
    tag = "Cars",
    request_body = CarCreate,
    responses(
        (status = 201, description = "Car created", body = Car),
        (status = 409, description = "VIN already registered", body = ApiResponse),
        (status = 422, description = "Invalid body", body = ApiResponse)
    )
)]
pub async fn create_car(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CarCreate>,
) -> Result<(StatusCode, Json<Car>), ApiError> {
    let car = state.db.cars().create(&input).await?;
    Ok((StatusCode::CREATED, Json(car)))
}

#[utoipa::path(
    get,
    path = "/cars",
    tag = "Cars",
    params(CarListParams),
    responses(
        (status = 200, description = "Page of cars", body = [Car]),
        (status = 422, description = "Invalid query", body = ApiResponse)
    )
)]
pub async fn list_cars(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<CarListParams>,
) -> Result<Json<Vec<Car>>, ApiError> {
    let cars = state.db.cars().list(params.page(), params.sort_by_year).await?;
    Ok(Json(cars))
}

/// Search for cars matching both make and year.
#[utoipa::path(
    get,
    path = "/cars/search",
    tag = "Cars",
    params(CarSearchParams),
    responses(
        (status = 200, description = "Matching cars", body = [Car]),
        (status = 422, description = "Invalid query", body = ApiResponse)
    )
)]
pub async fn search_cars(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<CarSearchParams>,
) -> Result<Json<Vec<Car>>, ApiError> {
    let cars = state.db.cars().search(&params.make, params.year).await?;
    Ok(Json(cars))
}

#[utoipa::path(
    get,
    path = "/cars/{id}",
    tag = "Cars",
    params(("id" = i32, Path, description = "Car id")),
    responses(
        (status = 200, description = "Car", body = Car),
        (status = 404, description = "Car not found", body = ApiResponse)
    )
)]
pub async fn get_car(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Car>, ApiError> {
    state
        .db
        .cars()
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(RESOURCE, id))
}

/// Replaces every field of the car.
#[utoipa::path(
    put,
    path = "/cars/{id}",
    tag = "Cars",
    params(("id" = i32, Path, description = "Car id")),
    request_body = CarCreate,
    responses(
        (status = 200, description = "Updated car", body = Car),
        (status = 404, description = "Car not found", body = ApiResponse),
        (status = 409, description = "VIN already registered", body = ApiResponse),
        (status = 422, description = "Invalid body", body = ApiResponse)
    )
)]
pub async fn update_car(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidJson(input): ValidJson<CarCreate>,
) -> Result<Json<Car>, ApiError> {
    state
        .db
        .cars()
        .update(id, &input)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(RESOURCE, id))
}

#[utoipa::path(
    delete,
    path = "/cars/{id}",
    tag = "Cars",
    params(("id" = i32, Path, description = "Car id")),
    responses(
        (status = 200, description = "Deleted car", body = Car),
        (status = 404, description = "Car not found", body = ApiResponse),
        (status = 409, description = "Car still has orders", body = ApiResponse)
    )
)]
pub async fn delete_car(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Car>, ApiError> {
    state
        .db
        .cars()
        .delete(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(RESOURCE, id))
}
