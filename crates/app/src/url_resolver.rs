//! Category URL derivation as an ordered strategy chain.

use crate::store_scope::store_id_from_scope;
use catalog_connector_domain::{Category, CategoryId, ScopeContext, StoreId};
use catalog_connector_ports::{
    CategoryRepository, DirectUrlParams, LogFields, Logger, RewriteCriteria, RouteUrlParams,
    UrlBuilder, UrlRewriteFinder,
};
use catalog_connector_shared::{ErrorCode, ErrorEnvelope, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Route path of the generic category view.
pub const CATEGORY_VIEW_ROUTE: &str = "catalog/category/view";

/// One resolution strategy in the chain.
///
/// A strategy either produces an absolute URL, declines with `Ok(None)` so
/// the next strategy runs, or fails hard. Lookup misses are declines, never
/// errors.
pub trait UrlStrategy: Send + Sync {
    /// Try to resolve an absolute URL for the category at a store.
    fn resolve(&self, category: &Category, store_id: StoreId) -> Result<Option<Box<str>>>;
}

/// Uses the category's pre-resolved request path when one is present.
pub struct RequestPathStrategy {
    builder: Arc<dyn UrlBuilder>,
}

impl UrlStrategy for RequestPathStrategy {
    fn resolve(&self, category: &Category, store_id: StoreId) -> Result<Option<Box<str>>> {
        let Some(request_path) = category.request_path.as_deref().filter(|path| !path.is_empty())
        else {
            return Ok(None);
        };

        self.builder
            .direct_url(
                request_path,
                &DirectUrlParams {
                    store_id,
                    secure: true,
                },
            )
            .map(Some)
    }
}

/// Looks up the canonical URL-rewrite record for the category.
pub struct RewriteLookupStrategy {
    rewrites: Arc<dyn UrlRewriteFinder>,
    builder: Arc<dyn UrlBuilder>,
}

impl UrlStrategy for RewriteLookupStrategy {
    fn resolve(&self, category: &Category, store_id: StoreId) -> Result<Option<Box<str>>> {
        let Some(id) = category.id else {
            return Ok(None);
        };

        let Some(record) = self
            .rewrites
            .find_one(&RewriteCriteria::category(id, store_id))?
        else {
            return Ok(None);
        };

        self.builder
            .direct_url(
                &record.request_path,
                &DirectUrlParams {
                    store_id,
                    secure: true,
                },
            )
            .map(Some)
    }
}

/// Builds the generic category-view route URL from a derived URL key.
pub struct RouteFallbackStrategy {
    builder: Arc<dyn UrlBuilder>,
}

impl UrlStrategy for RouteFallbackStrategy {
    fn resolve(&self, category: &Category, store_id: StoreId) -> Result<Option<Box<str>>> {
        let key = category
            .url_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .map_or_else(|| slugify(&category.name), Into::into);
        let id = category.id.unwrap_or_default();

        self.builder
            .route_url(
                CATEGORY_VIEW_ROUTE,
                &RouteUrlParams {
                    store_id,
                    secure: true,
                    query: vec![
                        ("id".into(), id.to_string().into_boxed_str()),
                        ("s".into(), key),
                    ],
                },
            )
            .map(Some)
    }
}

/// Collaborators of [`UrlResolver`].
pub struct UrlResolverDeps {
    /// Store-scoped category lookup.
    pub categories: Arc<dyn CategoryRepository>,
    /// URL-rewrite lookup.
    pub rewrites: Arc<dyn UrlRewriteFinder>,
    /// Absolute URL builder.
    pub builder: Arc<dyn UrlBuilder>,
    /// Optional structured logger.
    pub logger: Option<Arc<dyn Logger>>,
}

/// Resolves the public URL of a category through an ordered strategy chain.
///
/// Results are cached per `(category id, store id)` key; the cache only
/// empties on an explicit [`UrlResolver::clear_cache`]. Instances are
/// per-request, like [`crate::path_resolver::PathResolver`].
pub struct UrlResolver {
    deps: UrlResolverDeps,
    strategies: Vec<Box<dyn UrlStrategy>>,
    cache: HashMap<(CategoryId, StoreId), Box<str>>,
}

impl UrlResolver {
    /// Create a resolver with the standard strategy order: request path,
    /// then rewrite lookup, then the route fallback.
    #[must_use]
    pub fn new(deps: UrlResolverDeps) -> Self {
        let strategies: Vec<Box<dyn UrlStrategy>> = vec![
            Box::new(RequestPathStrategy {
                builder: Arc::clone(&deps.builder),
            }),
            Box::new(RewriteLookupStrategy {
                rewrites: Arc::clone(&deps.rewrites),
                builder: Arc::clone(&deps.builder),
            }),
            Box::new(RouteFallbackStrategy {
                builder: Arc::clone(&deps.builder),
            }),
        ];

        Self {
            deps,
            strategies,
            cache: HashMap::new(),
        }
    }

    /// Resolve the URL for an already-loaded category.
    ///
    /// `store_id` defaults to the store the scope context implies. A
    /// malformed category (no id and an empty name) degrades to an empty
    /// string with an error event instead of failing.
    pub fn for_category(
        &mut self,
        category: &Category,
        store_id: Option<StoreId>,
        scope: &ScopeContext,
    ) -> Result<Box<str>> {
        let store_id = store_id
            .unwrap_or_else(|| store_id_from_scope(scope, self.deps.logger.as_deref()));

        if let Some(id) = category.id
            && let Some(cached) = self.cache.get(&(id, store_id))
        {
            return Ok(cached.clone());
        }

        if category.id.is_none() && category.name.is_empty() {
            if let Some(logger) = self.deps.logger.as_ref() {
                let mut fields = LogFields::new();
                fields.insert("storeId".into(), serde_json::Value::from(store_id.get()));
                logger.error(
                    "connector.url.malformed_category",
                    "Category carries neither an id nor a name; returning an empty URL",
                    Some(fields),
                );
            }
            return Ok("".into());
        }

        for strategy in &self.strategies {
            if let Some(url) = strategy.resolve(category, store_id)? {
                if let Some(id) = category.id {
                    self.cache.insert((id, store_id), url.clone());
                }
                return Ok(url);
            }
        }

        Err(ErrorEnvelope::invariant(
            ErrorCode::new("connector", "url_unresolved"),
            "no URL strategy produced a result",
        ))
    }

    /// Load a category by id and resolve its URL.
    pub fn for_category_id(
        &mut self,
        id: CategoryId,
        store_id: Option<StoreId>,
        scope: &ScopeContext,
    ) -> Result<Box<str>> {
        let store_id = store_id
            .unwrap_or_else(|| store_id_from_scope(scope, self.deps.logger.as_deref()));
        let category = self.deps.categories.get(id, store_id)?;
        self.for_category(&category, Some(store_id), scope)
    }

    /// Empty the URL cache and reset shared URL-builder state.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
        self.deps.builder.reset_state();
    }
}

/// Derive a URL slug from a display name.
///
/// Lowercased ASCII alphanumerics are kept; every other run of characters
/// collapses to a single `-`, with no leading or trailing dash.
#[must_use]
pub fn slugify(name: &str) -> Box<str> {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug.into_boxed_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn slugify_collapses_separator_runs() {
        assert_eq!(&*slugify("Winter Sale 2026"), "winter-sale-2026");
        assert_eq!(&*slugify("  Émile & Co.  "), "mile-co");
        assert_eq!(&*slugify("---"), "");
    }

    proptest! {
        #[test]
        fn slugify_output_is_url_safe(name in "\\PC{0,48}") {
            let slug = slugify(&name);
            prop_assert!(
                slug.chars()
                    .all(|ch| ch == '-' || ch.is_ascii_lowercase() || ch.is_ascii_digit())
            );
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }
    }
}
