//! Domain model definitions for the auto-service entities.
//!
//! Every entity comes in two shapes: a `*Create` input shape (all writable fields, no id)
//! that is also the full-replace update payload, and a read shape that adds the generated id.

pub mod car;
pub mod mechanic;
pub mod order;
pub mod page;
pub mod registry;
pub mod validation;

pub use car::{Car, CarCreate, CarModel};
pub use mechanic::{Mechanic, MechanicCreate, MechanicModel, MechanicOrderStats};
pub use order::{BulkCostUpdate, Order, OrderCreate, OrderModel, OrderWithDetails, WorkDetails};
pub use page::{Pagination, SortOrder};
pub use registry::ModelRegistry;
pub use validation::{FieldError, Validate, ValidationError};

/// Trait describing how an entity is persisted.
///
/// The schema bootstrap walks these in dependency order, so every implementation must be
/// safe to run repeatedly (`IF NOT EXISTS`).
pub trait EntityModel: Send + Sync {
    /// Returns the name of the database table for this entity.
    fn table_name(&self) -> &str;

    /// Returns the SQL CREATE TABLE statement for this entity.
    fn get_create_table_sql(&self) -> &str;

    /// Secondary indexes created after the table.
    fn get_index_sql(&self) -> &[&'static str] {
        &[]
    }
}
