//! Attribute metadata boundary contract.

use catalog_connector_domain::{CategoryAttribute, EntityType};
use catalog_connector_shared::Result;

/// Aspect-based filtering applied at the metadata source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectFilter {
    /// Return every attribute of the entity type.
    #[default]
    All,
    /// Return only attributes whose aspect is not `none`.
    ExcludeNone,
}

/// Boundary contract for listing catalog attribute metadata.
pub trait AttributeMetadata: Send + Sync {
    /// List attributes of an entity type, filtered at the source.
    fn list(&self, entity_type: EntityType, filter: AspectFilter)
    -> Result<Vec<CategoryAttribute>>;
}
