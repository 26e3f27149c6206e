use crate::domain::model::{Mechanic, MechanicCreate, MechanicOrderStats, Pagination};
use crate::transport::http::error::ApiError;
use crate::transport::http::extract::{EntityId, ValidJson, ValidQuery};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

const RESOURCE: &str = "Mechanic";

#[utoipa::path(
    post,
    path = "/mechanics",
    tag = "Mechanics",
    request_body = MechanicCreate,
    responses(
        (status = 201, description = "Mechanic created", body = Mechanic),
        (status = 409, description = "Employee id already registered", body = ApiResponse),
        (status = 422, description = "Invalid body", body = ApiResponse)
    )
)]
pub async fn create_mechanic(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<MechanicCreate>,
) -> Result<(StatusCode, Json<Mechanic>), ApiError> {
    let mechanic = state.db.mechanics().create(&input).await?;
    Ok((StatusCode::CREATED, Json(mechanic)))
}

#[utoipa::path(
    get,
    path = "/mechanics",
    tag = "Mechanics",
    params(Pagination),
    responses(
        (status = 200, description = "Page of mechanics", body = [Mechanic]),
        (status = 422, description = "Invalid query", body = ApiResponse)
    )
)]
pub async fn list_mechanics(
    State(state): State<AppState>,
    ValidQuery(page): ValidQuery<Pagination>,
) -> Result<Json<Vec<Mechanic>>, ApiError> {
    Ok(Json(state.db.mechanics().list(page).await?))
}

/// Number of orders per mechanic (GROUP BY full name); mechanics without orders are omitted.
#[utoipa::path(
    get,
    path = "/mechanics/stats/orders",
    tag = "Mechanics",
    responses(
        (status = 200, description = "Order counts", body = [MechanicOrderStats])
    )
)]
pub async fn mechanic_order_stats(
    State(state): State<AppState>,
) -> Result<Json<Vec<MechanicOrderStats>>, ApiError> {
    Ok(Json(state.db.mechanics().order_counts_per_mechanic().await?))
}

#[utoipa::path(
    get,
    path = "/mechanics/{id}",
    tag = "Mechanics",
    params(("id" = i32, Path, description = "Mechanic id")),
    responses(
        (status = 200, description = "Mechanic", body = Mechanic),
        (status = 404, description = "Mechanic not found", body = ApiResponse)
    )
)]
pub async fn get_mechanic(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Mechanic>, ApiError> {
    state
        .db
        .mechanics()
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(RESOURCE, id))
}

#[utoipa::path(
    put,
    path = "/mechanics/{id}",
    tag = "Mechanics",
    params(("id" = i32, Path, description = "Mechanic id")),
    request_body = MechanicCreate,
    responses(
        (status = 200, description = "Updated mechanic", body = Mechanic),
        (status = 404, description = "Mechanic not found", body = ApiResponse),
        (status = 409, description = "Employee id already registered", body = ApiResponse),
        (status = 422, description = "Invalid body", body = ApiResponse)
    )
)]
pub async fn update_mechanic(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidJson(input): ValidJson<MechanicCreate>,
) -> Result<Json<Mechanic>, ApiError> {
    state
        .db
        .mechanics()
        .update(id, &input)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(RESOURCE, id))
}

#[utoipa::path(
    delete,
    path = "/mechanics/{id}",
    tag = "Mechanics",
    params(("id" = i32, Path, description = "Mechanic id")),
    responses(
        (status = 200, description = "Deleted mechanic", body = Mechanic),
        (status = 404, description = "Mechanic not found", body = ApiResponse),
        (status = 409, description = "Mechanic still has orders", body = ApiResponse)
    )
)]
pub async fn delete_mechanic(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Mechanic>, ApiError> {
    state
        .db
        .mechanics()
        .delete(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(RESOURCE, id))
}
