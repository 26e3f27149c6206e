//! Data access layer: one repository per entity, one statement per operation.
//!
//! Absence of a row is reported as `Ok(None)`; only real failures become `StoreError`.

pub mod cars;
pub mod error;
pub mod mechanics;
pub mod orders;

pub use cars::CarRepo;
pub use error::{SqlStateKind, StoreError};
pub use mechanics::MechanicRepo;
pub use orders::OrderRepo;
