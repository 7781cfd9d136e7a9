//! Mutation notification boundary contract.

use catalog_connector_domain::{AttributeCode, CategoryId, StoreId};
use catalog_connector_shared::Result;

/// Payload describing a significant catalog mutation.
///
/// Transport and queueing are owned by the external sync orchestrator; this
/// core only decides when a notification is warranted and what it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationNotification {
    /// Affected entity ids.
    pub entity_ids: Vec<CategoryId>,
    /// Affected store ids (deduplicated, default scope dropped).
    pub store_ids: Vec<StoreId>,
    /// Attribute codes whose values changed (empty for new entities).
    pub changed_attributes: Vec<AttributeCode>,
}

/// Boundary contract for emitting mutation notifications.
pub trait MutationNotifier: Send + Sync {
    /// Emit one notification.
    fn execute(&self, notification: MutationNotification) -> Result<()>;
}
