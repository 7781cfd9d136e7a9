//! Entity- and attribute-level indexability decisions.

use catalog_connector_domain::{
    Category, CategoryAttribute, EntityType, IndexType, ScopeContext, Store,
};
use catalog_connector_ports::{ConfigFlags, FLAG_EXCLUDE_DISABLED_CATEGORIES, Logger, scope_fields};
use catalog_connector_shared::{ErrorCode, ErrorEnvelope, Result};
use std::fmt;
use std::sync::Arc;

/// Validation failures raised by the attribute-level determiner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexabilityError {
    /// The attribute does not belong to the category attribute domain.
    InvalidAttribute {
        /// Offending attribute code.
        code: Box<str>,
        /// Entity domain the attribute actually belongs to.
        entity_type: EntityType,
        /// Validator messages.
        messages: Vec<Box<str>>,
    },
}

impl fmt::Display for IndexabilityError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAttribute { code, .. } => {
                write!(formatter, "attribute '{code}' is not a category attribute")
            },
        }
    }
}

impl std::error::Error for IndexabilityError {}

impl From<IndexabilityError> for ErrorEnvelope {
    fn from(error: IndexabilityError) -> Self {
        let envelope = Self::expected(
            ErrorCode::new("connector", "invalid_attribute"),
            error.to_string(),
        );
        match error {
            IndexabilityError::InvalidAttribute {
                code,
                entity_type,
                messages,
            } => envelope
                .with_metadata("code", code)
                .with_metadata("entity_type", entity_type.as_str())
                .with_metadata("messages", messages.join("; ")),
        }
    }
}

/// Entity-level indexability: is this category eligible for the index.
pub struct CategoryIndexability {
    flags: Arc<dyn ConfigFlags>,
    logger: Option<Arc<dyn Logger>>,
}

impl CategoryIndexability {
    /// Create a determiner over the configuration flags.
    #[must_use]
    pub const fn new(flags: Arc<dyn ConfigFlags>, logger: Option<Arc<dyn Logger>>) -> Self {
        Self { flags, logger }
    }

    /// Decide whether a category should be included in the index.
    ///
    /// With the exclude-disabled flag off (default scope), every category is
    /// indexable; with it on, the category's active flag decides. Inactive
    /// rejections are logged at debug level with the store's scope attached.
    #[must_use]
    pub fn is_indexable(&self, category: &Category, store: &Store) -> bool {
        if !self
            .flags
            .is_set_flag(FLAG_EXCLUDE_DISABLED_CATEGORIES, &ScopeContext::Default)
        {
            return true;
        }

        if !category.is_active
            && let Some(logger) = self.logger.as_ref()
        {
            let mut fields = scope_fields(&ScopeContext::store(store.clone()));
            if let Some(id) = category.id {
                fields.insert("categoryId".into(), serde_json::Value::from(id.get()));
            }
            logger.debug(
                "connector.indexability.category_disabled",
                "Category is disabled and excluded from indexing",
                Some(fields),
            );
        }

        category.is_active
    }
}

/// Attribute-level indexability: should this attribute's values be indexed.
pub struct AttributeIndexability {
    logger: Option<Arc<dyn Logger>>,
}

impl AttributeIndexability {
    /// Create a determiner.
    #[must_use]
    pub const fn new(logger: Option<Arc<dyn Logger>>) -> Self {
        Self { logger }
    }

    /// Decide whether an attribute should be indexed for a store.
    ///
    /// Fails with `connector:invalid_attribute` for attributes outside the
    /// category domain. A missing or unrecognized index-as classification
    /// degrades to not-indexable with a warn event rather than an error, so
    /// bulk export over many attributes is not aborted by one bad record.
    pub fn is_indexable(&self, attribute: &CategoryAttribute, store: &Store) -> Result<bool> {
        if attribute.entity_type != EntityType::Category {
            return Err(IndexabilityError::InvalidAttribute {
                code: attribute.code.as_str().into(),
                entity_type: attribute.entity_type,
                messages: vec![
                    format!(
                        "expected entity type '{}', found '{}'",
                        EntityType::Category,
                        attribute.entity_type
                    )
                    .into_boxed_str(),
                ],
            }
            .into());
        }

        let raw = attribute.index_as.as_deref().unwrap_or("");
        let index_type = match IndexType::parse_raw(raw) {
            Ok(index_type) => index_type,
            Err(error) => {
                if let Some(logger) = self.logger.as_ref() {
                    let mut fields = scope_fields(&ScopeContext::store(store.clone()));
                    fields.insert(
                        "attributeId".into(),
                        serde_json::Value::from(attribute.id),
                    );
                    fields.insert("raw".into(), serde_json::Value::from(raw));
                    fields.insert(
                        "classification".into(),
                        serde_json::Value::from("domain.index_type.parse_raw"),
                    );
                    fields.insert(
                        "error".into(),
                        serde_json::Value::from(error.to_string()),
                    );
                    logger.warn(
                        "connector.indexability.unknown_index_type",
                        "Attribute index-as value is not a known classification; treating as non-indexable",
                        Some(fields),
                    );
                }
                IndexType::NoIndex
            },
        };

        if !index_type.is_indexable()
            && let Some(logger) = self.logger.as_ref()
        {
            let mut fields = scope_fields(&ScopeContext::store(store.clone()));
            fields.insert(
                "indexType".into(),
                serde_json::Value::from(index_type.label()),
            );
            logger.debug(
                "connector.indexability.attribute_not_indexed",
                "Attribute is classified as not indexable",
                Some(fields),
            );
        }

        Ok(index_type.is_indexable())
    }
}
