//! Watched-attribute registry: which attribute codes matter for re-indexing.

use catalog_connector_domain::{
    AttributeCode, AttributeWatchMap, CategoryAttribute, EntityType,
};
use catalog_connector_ports::{AspectFilter, AttributeMetadata};
use catalog_connector_shared::Result;
use std::sync::{Arc, Mutex, PoisonError};

/// Registry of attribute codes whose changes trigger re-indexing, merging
/// catalog-attribute metadata with explicitly configured watch entries.
///
/// The metadata query is cached per instance; instances live for one
/// request/command scope.
pub struct AspectWatchRegistry {
    metadata: Arc<dyn AttributeMetadata>,
    configured_codes: Vec<AttributeCode>,
    configured_aspects: AttributeWatchMap,
    cached_attributes: Mutex<Option<Vec<CategoryAttribute>>>,
}

impl AspectWatchRegistry {
    /// Create a registry over a metadata source and explicit configuration.
    #[must_use]
    pub fn new(
        metadata: Arc<dyn AttributeMetadata>,
        configured_codes: Vec<AttributeCode>,
        configured_aspects: AttributeWatchMap,
    ) -> Self {
        Self {
            metadata,
            configured_codes,
            configured_aspects,
            cached_attributes: Mutex::new(None),
        }
    }

    /// Ordered unique attribute codes significant for re-indexing.
    ///
    /// Metadata-sourced codes with a non-`none` aspect come first in source
    /// order, followed by configured codes not already present.
    pub fn attribute_codes(&self) -> Result<Vec<AttributeCode>> {
        let attributes = self.attributes()?;
        let mut codes: Vec<AttributeCode> = Vec::with_capacity(
            attributes.len() + self.configured_codes.len(),
        );
        for attribute in &attributes {
            if attribute.aspect.is_watched() && !codes.contains(&attribute.code) {
                codes.push(attribute.code.clone());
            }
        }
        for code in &self.configured_codes {
            if !codes.contains(code) {
                codes.push(code.clone());
            }
        }
        Ok(codes)
    }

    /// Merged aspect mapping: metadata-sourced entries with configured
    /// overrides winning on key collision.
    pub fn aspect_mapping(&self) -> Result<AttributeWatchMap> {
        let attributes = self.attributes()?;
        let stored: AttributeWatchMap = attributes
            .iter()
            .map(|attribute| (attribute.code.clone(), attribute.aspect))
            .collect();
        Ok(stored.merged_with(&self.configured_aspects))
    }

    fn attributes(&self) -> Result<Vec<CategoryAttribute>> {
        let mut cached = self
            .cached_attributes
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(attributes) = cached.as_ref() {
            return Ok(attributes.clone());
        }

        let attributes = self
            .metadata
            .list(EntityType::Category, AspectFilter::All)?;
        *cached = Some(attributes.clone());
        Ok(attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_connector_domain::Aspect;
    use catalog_connector_testkit::in_memory::InMemoryAttributeMetadata;
    use std::error::Error;

    fn code(raw: &str) -> AttributeCode {
        AttributeCode::parse(raw).unwrap_or_else(|_| unreachable!("valid test code"))
    }

    fn attribute(id: u32, raw_code: &str, aspect: Aspect) -> CategoryAttribute {
        CategoryAttribute {
            id,
            code: code(raw_code),
            entity_type: EntityType::Category,
            aspect,
            index_as: None,
        }
    }

    #[test]
    fn codes_union_metadata_and_configuration_in_order() -> Result<(), Box<dyn Error>> {
        let metadata = Arc::new(InMemoryAttributeMetadata::new(vec![
            attribute(1, "name", Aspect::All),
            attribute(2, "position", Aspect::None),
            attribute(3, "is_active", Aspect::All),
        ]));
        let registry = AspectWatchRegistry::new(
            metadata,
            vec![code("url_key"), code("name")],
            AttributeWatchMap::new(),
        );

        let codes = registry.attribute_codes()?;
        let codes: Vec<&str> = codes.iter().map(AttributeCode::as_str).collect();
        assert_eq!(codes, vec!["name", "is_active", "url_key"]);
        Ok(())
    }

    #[test]
    fn mapping_prefers_configured_overrides() -> Result<(), Box<dyn Error>> {
        let metadata = Arc::new(InMemoryAttributeMetadata::new(vec![
            attribute(1, "name", Aspect::All),
            attribute(2, "position", Aspect::None),
        ]));
        let overrides: AttributeWatchMap =
            [(code("position"), Aspect::All)].into_iter().collect();
        let registry = AspectWatchRegistry::new(metadata, Vec::new(), overrides);

        let mapping = registry.aspect_mapping()?;
        assert_eq!(mapping.get(&code("position")), Some(Aspect::All));
        assert_eq!(mapping.get(&code("name")), Some(Aspect::All));
        Ok(())
    }

    #[test]
    fn metadata_query_is_cached_per_instance() -> Result<(), Box<dyn Error>> {
        let metadata = Arc::new(InMemoryAttributeMetadata::new(vec![attribute(
            1,
            "name",
            Aspect::All,
        )]));
        let registry =
            AspectWatchRegistry::new(metadata.clone(), Vec::new(), AttributeWatchMap::new());

        let _ = registry.attribute_codes()?;
        let _ = registry.aspect_mapping()?;
        assert_eq!(metadata.list_calls(), 1);
        Ok(())
    }
}
