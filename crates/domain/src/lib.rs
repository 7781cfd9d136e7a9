//! # catalog-connector-domain
//!
//! Domain entities, primitives, and value objects for the catalog-connector
//! workspace: category projections, watched-attribute aspects, indexability
//! classifications, and explicit scope contexts.
//!
//! Everything here is pure data with validated constructors; collaborator
//! I/O lives behind the port traits in `catalog-connector-ports`.

pub mod aspect;
pub mod category;
pub mod scope;

pub use aspect::{
    Aspect, AspectError, AttributeCode, AttributeWatchMap, CategoryAttribute, EntityType,
    IndexType,
};
pub use category::{
    AttributeValue, Category, CategoryBuilder, CategoryError, CategoryId, StoreId, WebsiteId,
    codes,
};
pub use scope::{ScopeContext, Store, StoreGroup, Website};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_crate_compiles() {
        assert!(!domain_crate_version().is_empty());
    }

    #[test]
    fn domain_types_are_reachable() {
        let scope = ScopeContext::Default;
        assert_eq!(scope.kind(), "default");
        assert!(IndexType::Index.is_indexable());
    }
}
