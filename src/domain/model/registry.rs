//! ModelRegistry listing the persisted entities in dependency order.

use super::{CarModel, EntityModel, MechanicModel, OrderModel};
use std::sync::Arc;

/// Ordered set of entity models; referenced tables come before the tables that reference them.
pub struct ModelRegistry {
    models: Vec<Arc<dyn EntityModel>>,
}

impl ModelRegistry {
    /// Creates a new empty ModelRegistry.
    pub fn new() -> Self {
        Self { models: Vec::new() }
    }

    /// Registry for the repair-shop schema: cars, mechanics, orders.
    pub fn auto_service() -> Self {
        let mut registry = Self::new();
        registry.register(CarModel);
        registry.register(MechanicModel);
        registry.register(OrderModel);
        registry
    }

    /// Appends a model. Register referenced tables first.
    pub fn register<M: EntityModel + 'static>(&mut self, model: M) {
        self.models.push(Arc::new(model));
    }

    /// Returns all registered table names in registration order.
    pub fn list_models(&self) -> Vec<String> {
        self.models.iter().map(|m| m.table_name().to_string()).collect()
    }

    /// Returns every DDL statement (tables, then their indexes) in dependency order.
    pub fn get_all_create_sql(&self) -> Vec<&str> {
        let mut statements = Vec::new();
        for model in &self.models {
            statements.push(model.get_create_table_sql());
            statements.extend(model.get_index_sql().iter().copied());
        }
        statements
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::auto_service()
    }
}
