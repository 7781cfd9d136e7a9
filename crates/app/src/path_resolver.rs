//! Breadcrumb-style category path derivation.

use crate::store_scope::store_id_from_scope;
use catalog_connector_domain::{Category, CategoryId, ScopeContext, StoreId};
use catalog_connector_ports::{CategoryRepository, Logger, StoreGroupRepository};
use catalog_connector_shared::Result;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Segment delimiter in the derived path.
pub const PATH_DELIMITER: &str = ";";

/// Upper bound on ancestor loads for a single resolution.
///
/// Catalog trees are shallow in practice; the bound exists so a corrupted
/// parent chain cannot turn one resolution into an unbounded walk.
const MAX_ANCESTOR_DEPTH: usize = 64;

/// Collaborators of [`PathResolver`].
pub struct PathResolverDeps {
    /// Store-scoped category lookup.
    pub categories: Arc<dyn CategoryRepository>,
    /// Store-group lookup for root-category resolution.
    pub store_groups: Arc<dyn StoreGroupRepository>,
    /// Optional structured logger.
    pub logger: Option<Arc<dyn Logger>>,
}

/// Derives the ancestor-name path ("breadcrumb") of a category.
///
/// Instances hold a per-instance root-category cache and are meant to live
/// for one logical request; they are not shared across execution contexts.
pub struct PathResolver {
    deps: PathResolverDeps,
    root_cache: HashMap<u32, Option<CategoryId>>,
}

impl PathResolver {
    /// Create a resolver over its collaborators.
    #[must_use]
    pub fn new(deps: PathResolverDeps) -> Self {
        Self {
            deps,
            root_cache: HashMap::new(),
        }
    }

    /// Derive the breadcrumb path for an already-loaded category.
    ///
    /// Ancestor names are joined root-to-leaf with [`PATH_DELIMITER`], and a
    /// non-empty `current_path` is appended as the final suffix. When
    /// `exclude_ids` is `None` the default exclude set applies: the absolute
    /// root plus the store group's configured root category. A category whose
    /// own id is excluded yields `current_path` unchanged.
    pub fn for_category(
        &mut self,
        category: &Category,
        current_path: &str,
        exclude_ids: Option<&[CategoryId]>,
    ) -> Result<Box<str>> {
        let derived_exclude;
        let exclude: &[CategoryId] = match exclude_ids {
            Some(ids) => ids,
            None => {
                derived_exclude = self.default_exclude_ids(category);
                &derived_exclude
            },
        };

        let mut segments: Vec<Box<str>> = Vec::new();
        let mut visited: HashSet<CategoryId> = HashSet::new();
        let mut current = category.clone();

        for _ in 0..MAX_ANCESTOR_DEPTH {
            if let Some(id) = current.id {
                if exclude.contains(&id) {
                    break;
                }
                if !visited.insert(id) {
                    if let Some(logger) = self.deps.logger.as_ref() {
                        let mut fields = catalog_connector_ports::LogFields::new();
                        fields.insert("categoryId".into(), serde_json::Value::from(id.get()));
                        logger.warn(
                            "connector.path.parent_cycle",
                            "Category parent chain revisits an ancestor; truncating the path",
                            Some(fields),
                        );
                    }
                    break;
                }
            }

            segments.push(current.name.clone());

            match current.parent_id {
                Some(parent_id) => {
                    current = self.deps.categories.get(parent_id, current.store_id)?;
                },
                None => break,
            }
        }

        segments.reverse();
        let mut path = segments.join(PATH_DELIMITER);
        if !current_path.is_empty() {
            if path.is_empty() {
                return Ok(current_path.into());
            }
            path.push_str(PATH_DELIMITER);
            path.push_str(current_path);
        }

        Ok(path.into_boxed_str())
    }

    /// Load a category by id and derive its breadcrumb path.
    ///
    /// `store_id` defaults to the store the scope context implies.
    pub fn for_category_id(
        &mut self,
        id: CategoryId,
        store_id: Option<StoreId>,
        scope: &ScopeContext,
    ) -> Result<Box<str>> {
        let store_id = store_id
            .unwrap_or_else(|| store_id_from_scope(scope, self.deps.logger.as_deref()));
        let category = self.deps.categories.get(id, store_id)?;
        self.for_category(&category, "", None)
    }

    /// Default exclude set: the absolute root plus the group root category.
    fn default_exclude_ids(&mut self, category: &Category) -> Vec<CategoryId> {
        let mut exclude = Vec::with_capacity(2);
        if let Some(absolute_root) = category.path.first() {
            exclude.push(*absolute_root);
        }
        if let Some(group_id) = category.store_group_id
            && let Some(group_root) = self.group_root_category(group_id)
            && !exclude.contains(&group_root)
        {
            exclude.push(group_root);
        }
        exclude
    }

    /// Resolve and cache the root category of a store group.
    ///
    /// A group without the root-category capability, or a failed group
    /// lookup, yields `None`: nothing beyond the absolute root is excluded.
    fn group_root_category(&mut self, group_id: u32) -> Option<CategoryId> {
        if let Some(cached) = self.root_cache.get(&group_id) {
            return *cached;
        }

        let resolved = match self.deps.store_groups.get(group_id) {
            Ok(group) => group.root_category_id,
            Err(error) => {
                if let Some(logger) = self.deps.logger.as_ref() {
                    let mut fields = catalog_connector_ports::LogFields::new();
                    fields.insert("storeGroupId".into(), serde_json::Value::from(group_id));
                    fields.insert("error".into(), serde_json::Value::from(error.to_string()));
                    logger.warn(
                        "connector.path.group_root_unavailable",
                        "Store group root category could not be resolved; excluding only the absolute root",
                        Some(fields),
                    );
                }
                None
            },
        };

        self.root_cache.insert(group_id, resolved);
        resolved
    }
}
