//! Configuration flag boundary contract.

use catalog_connector_domain::ScopeContext;

/// Configuration flag path: exclude disabled categories from indexing.
pub const FLAG_EXCLUDE_DISABLED_CATEGORIES: &str =
    "catalog_connector/indexing/exclude_disabled_categories";

/// Boundary contract for boolean configuration flags.
///
/// Flags resolve at the given scope with fallthrough to broader scopes
/// (store → website → default); resolution order is owned by the
/// implementation.
pub trait ConfigFlags: Send + Sync {
    /// Returns true when the flag at `path` is set for the scope.
    fn is_set_flag(&self, path: &str, scope: &ScopeContext) -> bool;
}
