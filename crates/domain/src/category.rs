//! Category entity and identifier primitives.

use crate::AttributeCode;
use catalog_connector_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validation failures for category values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    /// Category name is empty after trimming.
    EmptyName {
        /// Length of the raw input before trimming.
        input_length: usize,
    },
    /// Stored ancestor path must end with the category's own id.
    PathTailMismatch {
        /// The category's own id.
        id: CategoryId,
        /// Last path segment found, if any.
        tail: Option<CategoryId>,
    },
}

impl CategoryError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyName { .. } => ErrorCode::new("domain", "invalid_category_name"),
            Self::PathTailMismatch { .. } => ErrorCode::new("domain", "invalid_category_path"),
        }
    }
}

impl fmt::Display for CategoryError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName { .. } => formatter.write_str("category name must be non-empty"),
            Self::PathTailMismatch { .. } => {
                formatter.write_str("category path must end with the category's own id")
            },
        }
    }
}

impl std::error::Error for CategoryError {}

impl From<CategoryError> for ErrorEnvelope {
    fn from(error: CategoryError) -> Self {
        let mut envelope = Self::expected(error.error_code(), error.to_string());

        match error {
            CategoryError::EmptyName { input_length } => {
                envelope = envelope.with_metadata("input_length", input_length.to_string());
            },
            CategoryError::PathTailMismatch { id, tail } => {
                envelope = envelope.with_metadata("id", id.to_string()).with_metadata(
                    "tail",
                    tail.map_or_else(|| "none".to_owned(), |tail| tail.to_string()),
                );
            },
        }

        envelope
    }
}

/// Identifier for a catalog category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct CategoryId(u64);

impl CategoryId {
    /// Wrap a raw category id.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Access the raw id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Identifier for a store view.
///
/// Store id 0 is the default/admin scope; it is a legal lookup scope but is
/// dropped from mutation-notification store-id sets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct StoreId(u32);

impl StoreId {
    /// The default/admin store scope.
    pub const DEFAULT: Self = Self(0);

    /// Wrap a raw store id.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Access the raw id.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns true for the default/admin scope.
    #[must_use]
    pub const fn is_default(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Identifier for a website.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct WebsiteId(u32);

impl WebsiteId {
    /// Wrap a raw website id.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Access the raw id.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for WebsiteId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A scalar attribute value carried by a category snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", untagged)]
pub enum AttributeValue {
    /// Textual value (name, url key, request path).
    Text(Box<str>),
    /// Boolean flag (active flag).
    Flag(bool),
    /// Referenced entity id (parent id).
    Id(u64),
}

impl AttributeValue {
    /// Wrap a textual value.
    pub fn text(value: impl AsRef<str>) -> Self {
        Self::Text(value.as_ref().to_owned().into_boxed_str())
    }
}

/// A store-scoped category projection as read from the catalog store.
///
/// Per-store overridable fields (`name`, `is_active`, `url_key`,
/// `request_path`) carry the values already resolved for `store_id`. The
/// projection is read-only from this core's point of view; mutation happens
/// behind the persistence port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Category id; `None` for an entity that has not been persisted yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<CategoryId>,
    /// Parent category id; `None` at the absolute root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CategoryId>,
    /// Stored ancestor path, root to self (own id last when persisted).
    pub path: Vec<CategoryId>,
    /// Display name resolved for the store.
    pub name: Box<str>,
    /// Active flag resolved for the store.
    pub is_active: bool,
    /// Store view this projection was resolved for.
    pub store_id: StoreId,
    /// Explicit URL key, when one is set for the store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_key: Option<Box<str>>,
    /// Pre-resolved request path, when the catalog store carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_path: Option<Box<str>>,
    /// Store group this category's tree is pinned beneath.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_group_id: Option<u32>,
}

impl Category {
    /// Build a category from required fields.
    pub fn builder(
        name: impl AsRef<str>,
        store_id: StoreId,
    ) -> Result<CategoryBuilder, CategoryError> {
        let name = parse_name(name.as_ref())?;
        Ok(CategoryBuilder {
            id: None,
            parent_id: None,
            path: Vec::new(),
            name,
            is_active: true,
            store_id,
            url_key: None,
            request_path: None,
            store_group_id: None,
        })
    }

    /// Validate entity invariants.
    pub fn validate(&self) -> Result<(), CategoryError> {
        if self.name.trim().is_empty() {
            return Err(CategoryError::EmptyName {
                input_length: self.name.len(),
            });
        }
        if let Some(id) = self.id
            && !self.path.is_empty()
            && self.path.last() != Some(&id)
        {
            return Err(CategoryError::PathTailMismatch {
                id,
                tail: self.path.last().copied(),
            });
        }
        Ok(())
    }

    /// Read a watched attribute value by code.
    ///
    /// Codes without a backing snapshot field yield `None`, so unknown codes
    /// compare as absent on both sides of a mutation.
    #[must_use]
    pub fn attribute_value(&self, code: &AttributeCode) -> Option<AttributeValue> {
        match code.as_str() {
            codes::NAME => Some(AttributeValue::Text(self.name.clone())),
            codes::IS_ACTIVE => Some(AttributeValue::Flag(self.is_active)),
            codes::URL_KEY => self.url_key.clone().map(AttributeValue::Text),
            codes::REQUEST_PATH => self.request_path.clone().map(AttributeValue::Text),
            codes::PARENT_ID => self.parent_id.map(|parent| AttributeValue::Id(parent.get())),
            _ => None,
        }
    }
}

/// Builder for `Category`.
#[derive(Debug, Clone)]
pub struct CategoryBuilder {
    id: Option<CategoryId>,
    parent_id: Option<CategoryId>,
    path: Vec<CategoryId>,
    name: Box<str>,
    is_active: bool,
    store_id: StoreId,
    url_key: Option<Box<str>>,
    request_path: Option<Box<str>>,
    store_group_id: Option<u32>,
}

impl CategoryBuilder {
    /// Set the persisted id.
    #[must_use]
    pub const fn id(mut self, id: CategoryId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the parent id.
    #[must_use]
    pub const fn parent_id(mut self, parent_id: CategoryId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Set the stored ancestor path (root to self).
    #[must_use]
    pub fn path(mut self, path: impl Into<Vec<CategoryId>>) -> Self {
        self.path = path.into();
        self
    }

    /// Set the active flag.
    #[must_use]
    pub const fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Set the explicit URL key.
    #[must_use]
    pub fn url_key(mut self, url_key: impl AsRef<str>) -> Self {
        self.url_key = normalize_optional(url_key.as_ref());
        self
    }

    /// Set the pre-resolved request path.
    #[must_use]
    pub fn request_path(mut self, request_path: impl AsRef<str>) -> Self {
        self.request_path = normalize_optional(request_path.as_ref());
        self
    }

    /// Set the store group id.
    #[must_use]
    pub const fn store_group_id(mut self, store_group_id: u32) -> Self {
        self.store_group_id = Some(store_group_id);
        self
    }

    /// Build a validated `Category`.
    pub fn build(self) -> Result<Category, CategoryError> {
        let category = Category {
            id: self.id,
            parent_id: self.parent_id,
            path: self.path,
            name: self.name,
            is_active: self.is_active,
            store_id: self.store_id,
            url_key: self.url_key,
            request_path: self.request_path,
            store_group_id: self.store_group_id,
        };
        category.validate()?;
        Ok(category)
    }
}

/// Well-known category attribute codes.
pub mod codes {
    /// Display name.
    pub const NAME: &str = "name";
    /// Active flag.
    pub const IS_ACTIVE: &str = "is_active";
    /// Explicit URL key.
    pub const URL_KEY: &str = "url_key";
    /// Pre-resolved request path.
    pub const REQUEST_PATH: &str = "request_path";
    /// Parent category reference.
    pub const PARENT_ID: &str = "parent_id";
}

fn parse_name(name: &str) -> Result<Box<str>, CategoryError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CategoryError::EmptyName {
            input_length: name.len(),
        });
    }
    Ok(trimmed.to_owned().into_boxed_str())
}

fn normalize_optional(value: &str) -> Option<Box<str>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned().into_boxed_str())
    }
}
