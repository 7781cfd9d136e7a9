//! Category save pipeline: snapshot, persist, diff, notify.
//!
//! `SavePipeline` is an explicit decorator over the inner persistence
//! implementation. It loads a pre-mutation snapshot, delegates the save,
//! compares watched attributes against the snapshot, and emits exactly one
//! mutation notification when re-indexing is required.

use crate::aspect_registry::AspectWatchRegistry;
use catalog_connector_domain::{AttributeCode, Category, StoreId};
use catalog_connector_ports::{
    CategoryPersist, CategoryRepository, LogFields, Logger, MutationNotification,
    MutationNotifier,
};
use catalog_connector_shared::{ErrorCode, ErrorEnvelope, Result};
use std::sync::Arc;

/// Dependencies required by the save pipeline.
#[derive(Clone)]
pub struct SavePipelineDeps {
    /// Inner persistence implementation that owns the actual write.
    pub inner: Arc<dyn CategoryPersist>,
    /// Snapshot loads.
    pub categories: Arc<dyn CategoryRepository>,
    /// Mutation notification sink.
    pub notifier: Arc<dyn MutationNotifier>,
    /// Optional logger.
    pub logger: Option<Arc<dyn Logger>>,
}

/// Change-detecting decorator around category persistence.
pub struct SavePipeline {
    deps: SavePipelineDeps,
    registry: Arc<AspectWatchRegistry>,
}

impl SavePipeline {
    /// Wrap an inner persistence implementation.
    #[must_use]
    pub const fn new(deps: SavePipelineDeps, registry: Arc<AspectWatchRegistry>) -> Self {
        Self { deps, registry }
    }

    fn changed_attributes(
        &self,
        original: &Category,
        saved: &Category,
    ) -> Result<Vec<AttributeCode>> {
        let mut changed = Vec::new();
        for code in self.registry.attribute_codes()? {
            if original.attribute_value(&code) != saved.attribute_value(&code) {
                changed.push(code);
            }
        }
        Ok(changed)
    }

    fn notify(
        &self,
        saved: &Category,
        original: Option<&Category>,
        changed_attributes: Vec<AttributeCode>,
    ) -> Result<()> {
        let entity_id = saved.id.ok_or_else(|| {
            ErrorEnvelope::invariant(
                ErrorCode::internal(),
                "persisted category has no id",
            )
        })?;
        let store_ids = affected_store_ids(original, saved);

        if let Some(logger) = self.deps.logger.as_ref() {
            let mut fields = LogFields::new();
            fields.insert("entityId".into(), serde_json::Value::from(entity_id.get()));
            fields.insert(
                "changedAttributes".into(),
                serde_json::Value::from(
                    changed_attributes
                        .iter()
                        .map(|code| code.as_str().to_owned())
                        .collect::<Vec<_>>(),
                ),
            );
            logger.debug(
                "connector.save.update_required",
                "Category mutation requires re-indexing",
                Some(fields),
            );
        }

        self.deps.notifier.execute(MutationNotification {
            entity_ids: vec![entity_id],
            store_ids,
            changed_attributes,
        })
    }
}

impl CategoryPersist for SavePipeline {
    fn save(&self, category: &Category) -> Result<Category> {
        let original = match category.id {
            Some(id) => Some(self.deps.categories.get(id, category.store_id)?),
            None => None,
        };

        let saved = self.deps.inner.save(category)?;

        let (update_required, changed_attributes) = match original.as_ref() {
            // New entity: always re-index, with no changed-attribute detail.
            None => (true, Vec::new()),
            Some(snapshot) => {
                let changed = self.changed_attributes(snapshot, &saved)?;
                (!changed.is_empty(), changed)
            },
        };

        if update_required {
            self.notify(&saved, original.as_ref(), changed_attributes)?;
        }

        Ok(saved)
    }
}

/// Union of snapshot and persisted store ids, deduplicated, with the
/// default/admin scope dropped.
fn affected_store_ids(original: Option<&Category>, saved: &Category) -> Vec<StoreId> {
    let mut store_ids = Vec::with_capacity(2);
    for store_id in original
        .map(|category| category.store_id)
        .into_iter()
        .chain(std::iter::once(saved.store_id))
    {
        if !store_id.is_default() && !store_ids.contains(&store_id) {
            store_ids.push(store_id);
        }
    }
    store_ids
}
