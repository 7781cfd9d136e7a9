//! Catalog store boundary contracts: lookup and persistence.

use catalog_connector_domain::{Category, CategoryId, StoreGroup, StoreId};
use catalog_connector_shared::Result;

/// Boundary contract for store-scoped category lookup.
///
/// Implementations fail with a `core:not_found` envelope when the category
/// does not exist for the requested store.
pub trait CategoryRepository: Send + Sync {
    /// Load the category projection resolved for a store.
    fn get(&self, id: CategoryId, store_id: StoreId) -> Result<Category>;
}

/// Boundary contract for category persistence.
///
/// The change-detection pipeline wraps an implementation of this trait; the
/// inner implementation owns the actual write to the catalog store.
pub trait CategoryPersist: Send + Sync {
    /// Persist a category and return the stored result.
    fn save(&self, category: &Category) -> Result<Category>;
}

/// Boundary contract for store-group lookup (root category resolution).
pub trait StoreGroupRepository: Send + Sync {
    /// Load a store group by id.
    fn get(&self, group_id: u32) -> Result<StoreGroup>;
}
