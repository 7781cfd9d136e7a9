//! Contract-style tests for port traits using in-memory adapters.

use catalog_connector_domain::Aspect;
use catalog_connector_ports::{
    AspectFilter, AttributeCode, AttributeMetadata, CategoryAttribute, EntityType,
};
use catalog_connector_shared::Result;
use catalog_connector_testkit::in_memory::InMemoryAttributeMetadata;

fn attribute(id: u32, code: &str, aspect: Aspect) -> CategoryAttribute {
    CategoryAttribute {
        id,
        code: AttributeCode::parse(code).expect("valid fixture code"),
        entity_type: EntityType::Category,
        aspect,
        index_as: None,
    }
}

#[test]
fn attribute_metadata_exclude_none_filters_at_the_source() -> Result<()> {
    let source = InMemoryAttributeMetadata::new(vec![
        attribute(1, "name", Aspect::All),
        attribute(2, "meta_title", Aspect::None),
        attribute(3, "is_active", Aspect::All),
    ]);

    let watched = source.list(EntityType::Category, AspectFilter::ExcludeNone)?;
    let codes: Vec<&str> = watched
        .iter()
        .map(|attribute| attribute.code.as_str())
        .collect();
    assert_eq!(codes, vec!["name", "is_active"]);
    Ok(())
}

#[test]
fn attribute_metadata_all_returns_unwatched_attributes_too() -> Result<()> {
    let source = InMemoryAttributeMetadata::new(vec![
        attribute(1, "name", Aspect::All),
        attribute(2, "meta_title", Aspect::None),
        attribute(3, "sku", Aspect::All),
    ]);

    let everything = source.list(EntityType::Category, AspectFilter::All)?;
    assert_eq!(everything.len(), 3);
    assert!(
        everything
            .iter()
            .any(|attribute| attribute.aspect == Aspect::None)
    );
    assert_eq!(source.list_calls(), 1);
    Ok(())
}
