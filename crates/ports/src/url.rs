//! URL-rewrite lookup and URL building boundary contracts.

use catalog_connector_domain::{CategoryId, EntityType, StoreId};
use catalog_connector_shared::Result;

/// Criteria for locating an existing URL-rewrite record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteCriteria {
    /// Entity the rewrite points at.
    pub entity_id: CategoryId,
    /// Entity domain of the rewrite.
    pub entity_type: EntityType,
    /// Store the rewrite applies to.
    pub store_id: StoreId,
    /// Redirect type; 0 selects the canonical (non-redirect) rewrite.
    pub redirect_type: u16,
}

impl RewriteCriteria {
    /// Criteria for the canonical category rewrite of a store.
    #[must_use]
    pub const fn category(entity_id: CategoryId, store_id: StoreId) -> Self {
        Self {
            entity_id,
            entity_type: EntityType::Category,
            store_id,
            redirect_type: 0,
        }
    }
}

/// A stored URL-rewrite record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRecord {
    /// Public-facing request path (relative to the store base URL).
    pub request_path: Box<str>,
    /// Internal target path the request rewrites to.
    pub target_path: Box<str>,
    /// Redirect type; 0 for the canonical rewrite.
    pub redirect_type: u16,
}

/// Boundary contract for URL-rewrite lookup.
pub trait UrlRewriteFinder: Send + Sync {
    /// Find at most one rewrite matching the criteria.
    fn find_one(&self, criteria: &RewriteCriteria) -> Result<Option<RewriteRecord>>;
}

/// Parameters for building a direct URL from a known path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectUrlParams {
    /// Store whose base URL anchors the result.
    pub store_id: StoreId,
    /// Request the secure (https) base URL.
    pub secure: bool,
}

/// Parameters for building a routed URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteUrlParams {
    /// Store whose base URL anchors the result.
    pub store_id: StoreId,
    /// Request the secure (https) base URL.
    pub secure: bool,
    /// Query parameters appended to the route.
    pub query: Vec<(Box<str>, Box<str>)>,
}

/// Boundary contract for absolute URL building.
///
/// Implementations may hold per-resolution shared state; `reset_state`
/// returns the builder to a pristine state and is invoked by the URL
/// resolver's cache clear.
pub trait UrlBuilder: Send + Sync {
    /// Build an absolute URL from a known request path.
    fn direct_url(&self, path: &str, params: &DirectUrlParams) -> Result<Box<str>>;

    /// Build an absolute URL for a route with query parameters.
    fn route_url(&self, route_path: &str, params: &RouteUrlParams) -> Result<Box<str>>;

    /// Reset any shared state a prior resolution may have left behind.
    fn reset_state(&self);
}
