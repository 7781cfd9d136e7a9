//! Integration tests for indexability decisions over real configuration.

use catalog_connector_app::CategoryIndexability;
use catalog_connector_config::{ConnectorConfig, ScopedFlags};
use catalog_connector_domain::{Category, CategoryId, Store, StoreId, WebsiteId};
use catalog_connector_ports::{ConfigFlags, Logger};
use catalog_connector_shared::{ErrorEnvelope, Result};
use catalog_connector_testkit::in_memory::MemoryLogger;
use std::sync::Arc;

fn store() -> Store {
    Store {
        id: StoreId::new(1),
        website_id: WebsiteId::new(1),
        group_id: 1,
        code: "default".into(),
    }
}

fn category(active: bool) -> Result<Category> {
    let category = Category::builder("Sneakers", StoreId::new(1))
        .map_err(ErrorEnvelope::from)?
        .id(CategoryId::new(3))
        .path(vec![CategoryId::new(1), CategoryId::new(3)])
        .is_active(active)
        .build()
        .map_err(ErrorEnvelope::from)?;
    Ok(category)
}

fn flags_from(input: &str) -> Result<Arc<dyn ConfigFlags>> {
    let validated = ConnectorConfig::from_toml_str(input)?
        .validate_and_normalize()
        .map_err(ErrorEnvelope::from)?;
    Ok(Arc::new(ScopedFlags::new(validated)))
}

#[test]
fn flag_off_admits_inactive_categories() -> Result<()> {
    let flags = flags_from("version = 1")?;
    let determiner = CategoryIndexability::new(flags, None);

    assert!(determiner.is_indexable(&category(true)?, &store()));
    assert!(determiner.is_indexable(&category(false)?, &store()));
    Ok(())
}

#[test]
fn flag_on_tracks_the_active_flag_exactly() -> Result<()> {
    let flags = flags_from(
        "version = 1\n\n[indexing]\nexcludeDisabledCategories = true\n",
    )?;
    let logger = Arc::new(MemoryLogger::new());
    let log: Arc<dyn Logger> = logger.clone();
    let determiner = CategoryIndexability::new(flags, Some(log));

    assert!(determiner.is_indexable(&category(true)?, &store()));
    assert!(!determiner.is_indexable(&category(false)?, &store()));
    assert!(logger.has_event("connector.indexability.category_disabled"));
    Ok(())
}
