use crate::domain::model::{
    BulkCostUpdate, Car, CarCreate, FieldError, Mechanic, MechanicCreate, MechanicOrderStats,
    Order, OrderCreate, OrderWithDetails, SortOrder,
};
use crate::transport::http::handlers::{cars, health, mechanics, orders};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::routing::{get, put};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Auto Service API"),
    paths(
        health::healthcheck_handler,
        cars::create_car,
        cars::list_cars,
        cars::search_cars,
        cars::get_car,
        cars::update_car,
        cars::delete_car,
        mechanics::create_mechanic,
        mechanics::list_mechanics,
        mechanics::mechanic_order_stats,
        mechanics::get_mechanic,
        mechanics::update_mechanic,
        mechanics::delete_mechanic,
        orders::create_order,
        orders::list_orders,
        orders::list_orders_with_details,
        orders::search_orders_by_details,
        orders::update_costs_for_car,
        orders::get_order,
        orders::update_order,
        orders::delete_order
    ),
    components(schemas(
        ApiResponse,
        FieldError,
        Car,
        CarCreate,
        Mechanic,
        MechanicCreate,
        MechanicOrderStats,
        Order,
        OrderCreate,
        OrderWithDetails,
        BulkCostUpdate,
        SortOrder
    )),
    tags(
        (name = "Cars"),
        (name = "Mechanics"),
        (name = "Orders"),
        (name = "Service")
    )
)]
pub struct ApiDoc;

/// Builds the API routes. Static segments (`/cars/search`, `/orders/details`, ...) take
/// precedence over the `/:id` captures next to them.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/cars", get(cars::list_cars).post(cars::create_car))
        .route("/cars/search", get(cars::search_cars))
        .route(
            "/cars/:id",
            get(cars::get_car).put(cars::update_car).delete(cars::delete_car),
        )
        .route(
            "/mechanics",
            get(mechanics::list_mechanics).post(mechanics::create_mechanic),
        )
        .route("/mechanics/stats/orders", get(mechanics::mechanic_order_stats))
        .route(
            "/mechanics/:id",
            get(mechanics::get_mechanic)
                .put(mechanics::update_mechanic)
                .delete(mechanics::delete_mechanic),
        )
        .route("/orders", get(orders::list_orders).post(orders::create_order))
        .route("/orders/details", get(orders::list_orders_with_details))
        .route("/orders/search-details", get(orders::search_orders_by_details))
        .route(
            "/orders/update-costs-by-car/:car_id",
            put(orders::update_costs_for_car),
        )
        .route(
            "/orders/:id",
            get(orders::get_order)
                .put(orders::update_order)
                .delete(orders::delete_order),
        )
        .with_state(app_state)
}
