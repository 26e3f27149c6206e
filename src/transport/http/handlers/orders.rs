use crate::domain::model::{BulkCostUpdate, Order, OrderCreate, OrderWithDetails, Pagination};
use crate::transport::http::error::ApiError;
use crate::transport::http::extract::{EntityId, ValidJson, ValidQuery};
use crate::transport::http::types::{ApiResponse, AppState, NewCostParams, WorkDetailsSearchParams};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

const RESOURCE: &str = "Order";

#[utoipa::path(
    post,
    path = "/orders",
    tag = "Orders",
    request_body = OrderCreate,
    responses(
        (status = 201, description = "Order created", body = Order),
        (status = 409, description = "Car or mechanic does not exist", body = ApiResponse),
        (status = 422, description = "Invalid body", body = ApiResponse)
    )
)]
pub async fn create_order(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<OrderCreate>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = state.db.orders().create(&input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[utoipa::path(
    get,
    path = "/orders",
    tag = "Orders",
    params(Pagination),
    responses(
        (status = 200, description = "Page of orders", body = [Order]),
        (status = 422, description = "Invalid query", body = ApiResponse)
    )
)]
pub async fn list_orders(
    State(state): State<AppState>,
    ValidQuery(page): ValidQuery<Pagination>,
) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.db.orders().list(page).await?))
}

/// Orders with the full car and mechanic inlined (JOIN).
#[utoipa::path(
    get,
    path = "/orders/details",
    tag = "Orders",
    params(Pagination),
    responses(
        (status = 200, description = "Page of orders with relations", body = [OrderWithDetails]),
        (status = 422, description = "Invalid query", body = ApiResponse)
    )
)]
pub async fn list_orders_with_details(
    State(state): State<AppState>,
    ValidQuery(page): ValidQuery<Pagination>,
) -> Result<Json<Vec<OrderWithDetails>>, ApiError> {
    Ok(Json(state.db.orders().list_with_details(page).await?))
}

/// Full-text search in order work details.
#[utoipa::path(
    get,
    path = "/orders/search-details",
    tag = "Orders",
    params(WorkDetailsSearchParams),
    responses(
        (status = 200, description = "Orders whose description contains `q`", body = [Order]),
        (status = 422, description = "Invalid query", body = ApiResponse)
    )
)]
pub async fn search_orders_by_details(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<WorkDetailsSearchParams>,
) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(
        state
            .db
            .orders()
            .search_by_work_details_description(&params.q)
            .await?,
    ))
}

/// Update the cost of all orders for a specific car.
#[utoipa::path(
    put,
    path = "/orders/update-costs-by-car/{car_id}",
    tag = "Orders",
    params(("car_id" = i32, Path, description = "Car id"), NewCostParams),
    responses(
        (status = 200, description = "Costs updated", body = BulkCostUpdate),
        (status = 422, description = "Invalid cost", body = ApiResponse)
    )
)]
pub async fn update_costs_for_car(
    State(state): State<AppState>,
    EntityId(car_id): EntityId,
    ValidQuery(params): ValidQuery<NewCostParams>,
) -> Result<Json<BulkCostUpdate>, ApiError> {
    let result = state
        .db
        .orders()
        .bulk_update_cost_by_car(car_id, params.new_cost)
        .await?;
    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "Orders",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order with car and mechanic", body = OrderWithDetails),
        (status = 404, description = "Order not found", body = ApiResponse)
    )
)]
pub async fn get_order(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<OrderWithDetails>, ApiError> {
    state
        .db
        .orders()
        .get_with_details(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(RESOURCE, id))
}

/// Replaces every field of the order; omitted optional fields are cleared.
#[utoipa::path(
    put,
    path = "/orders/{id}",
    tag = "Orders",
    params(("id" = i32, Path, description = "Order id")),
    request_body = OrderCreate,
    responses(
        (status = 200, description = "Updated order", body = Order),
        (status = 404, description = "Order not found", body = ApiResponse),
        (status = 409, description = "Car or mechanic does not exist", body = ApiResponse),
        (status = 422, description = "Invalid body", body = ApiResponse)
    )
)]
pub async fn update_order(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidJson(input): ValidJson<OrderCreate>,
) -> Result<Json<Order>, ApiError> {
    state
        .db
        .orders()
        .update(id, &input)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(RESOURCE, id))
}

#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = "Orders",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Deleted order", body = Order),
        (status = 404, description = "Order not found", body = ApiResponse)
    )
)]
pub async fn delete_order(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Order>, ApiError> {
    state
        .db
        .orders()
        .delete(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(RESOURCE, id))
}
