//! Explicit scope context and the store/website/group scope objects.
//!
//! Scope is an immutable value threaded as a parameter rather than a global
//! slot, so nothing can leak between unrelated operations.

use crate::{CategoryId, StoreId, WebsiteId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A store view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    /// Store id.
    pub id: StoreId,
    /// Website the store belongs to.
    pub website_id: WebsiteId,
    /// Store group the store belongs to.
    pub group_id: u32,
    /// Store code.
    pub code: Box<str>,
}

/// A website grouping one or more stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Website {
    /// Website id.
    pub id: WebsiteId,
    /// Default store for the website, when one is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_store_id: Option<StoreId>,
    /// Website code.
    pub code: Box<str>,
}

/// A store group pinning a catalog tree beneath a root category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreGroup {
    /// Store group id.
    pub id: u32,
    /// Root category the group's catalog hangs beneath, when configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_category_id: Option<CategoryId>,
}

/// Resolution scope for configuration and derived-data lookups.
///
/// Exactly one scope applies to a given call; callers pass the value
/// explicitly instead of mutating ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ScopeContext {
    /// Default/admin scope.
    #[default]
    Default,
    /// Website scope.
    Website(Website),
    /// Store scope.
    Store(Store),
}

impl ScopeContext {
    /// Build a store scope.
    #[must_use]
    pub const fn store(store: Store) -> Self {
        Self::Store(store)
    }

    /// Build a website scope.
    #[must_use]
    pub const fn website(website: Website) -> Self {
        Self::Website(website)
    }

    /// Scope kind name used in log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Website(_) => "website",
            Self::Store(_) => "store",
        }
    }

    /// The store id directly carried by the scope, when it is a store scope.
    #[must_use]
    pub const fn store_id(&self) -> Option<StoreId> {
        match self {
            Self::Store(store) => Some(store.id),
            Self::Default | Self::Website(_) => None,
        }
    }
}

impl fmt::Display for ScopeContext {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => formatter.write_str("default"),
            Self::Website(website) => write!(formatter, "website:{}", website.id),
            Self::Store(store) => write!(formatter, "store:{}", store.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_fixture() -> Store {
        Store {
            id: StoreId::new(2),
            website_id: WebsiteId::new(1),
            group_id: 1,
            code: "b2c_en".into(),
        }
    }

    #[test]
    fn scope_kinds_and_display() {
        assert_eq!(ScopeContext::Default.kind(), "default");
        let scope = ScopeContext::store(store_fixture());
        assert_eq!(scope.kind(), "store");
        assert_eq!(scope.to_string(), "store:2");
        assert_eq!(scope.store_id(), Some(StoreId::new(2)));
    }

    #[test]
    fn scope_serializes_tagged() {
        let scope = ScopeContext::store(store_fixture());
        let value = serde_json::to_value(&scope).unwrap_or_default();
        assert_eq!(value.get("kind"), Some(&serde_json::json!("store")));
    }
}
