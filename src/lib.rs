pub mod app;
pub mod domain;
pub mod infra;
pub mod seed;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::database_service::DatabaseService;
pub use domain::model::{
    Car, CarCreate, Mechanic, MechanicCreate, MechanicOrderStats, ModelRegistry, Order,
    OrderCreate, OrderWithDetails,
};
pub use infra::config::Config;
pub use storage::StoreError;
