//! # catalog-connector-ports
//!
//! Boundary traits for the catalog-connector hexagonal architecture.
//!
//! This crate defines the interfaces between the connector core and its
//! external collaborators (catalog store, URL rewrite table, notifier,
//! configuration). It depends only on `domain` and `shared`.
//!
//! All contracts are synchronous: the connector core runs single-threaded
//! within one request/command invocation with no suspension semantics.

pub mod attribute_metadata;
pub mod catalog;
pub mod config_flags;
pub mod logger;
pub mod notifier;
pub mod url;

pub use attribute_metadata::*;
pub use catalog::*;
pub use config_flags::*;
pub use logger::*;
pub use notifier::*;
pub use url::*;

// Re-export selected domain types used in port signatures, so adapter crates
// can implement ports without directly depending on the domain crate.
pub use catalog_connector_domain::{
    AttributeCode, Category, CategoryAttribute, CategoryId, EntityType, ScopeContext, StoreGroup,
    StoreId,
};

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_connector_domain::domain_crate_version;
    use catalog_connector_shared::shared_crate_version;

    #[test]
    fn ports_crate_compiles() {
        assert!(!ports_crate_version().is_empty());
        assert!(!domain_crate_version().is_empty());
        assert!(!shared_crate_version().is_empty());
    }

    #[test]
    fn rewrite_criteria_defaults_to_canonical_rewrites() {
        let criteria = RewriteCriteria::category(CategoryId::new(7), StoreId::new(1));
        assert_eq!(criteria.redirect_type, 0);
        assert_eq!(criteria.entity_type, EntityType::Category);
    }

    #[test]
    fn scope_fields_carry_store_ids() {
        let fields = scope_fields(&ScopeContext::Default);
        assert_eq!(fields.get("scope"), Some(&serde_json::json!("default")));
        assert!(fields.get("storeId").is_none());
    }
}
