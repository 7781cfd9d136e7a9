//! Integration tests for breadcrumb-path derivation.

use catalog_connector_app::{PathResolver, PathResolverDeps};
use catalog_connector_domain::{
    Category, CategoryId, ScopeContext, Store, StoreGroup, StoreId, WebsiteId,
};
use catalog_connector_shared::{ErrorEnvelope, Result};
use catalog_connector_testkit::in_memory::{InMemoryCategories, InMemoryStoreGroups};
use std::sync::Arc;

const STORE: StoreId = StoreId::new(1);

fn seed_category(
    store: &InMemoryCategories,
    id: u64,
    name: &str,
    parent: Option<u64>,
    path: &[u64],
) -> Result<Category> {
    let mut builder = Category::builder(name, STORE)
        .map_err(ErrorEnvelope::from)?
        .id(CategoryId::new(id))
        .path(path.iter().copied().map(CategoryId::new).collect::<Vec<_>>())
        .store_group_id(1);
    if let Some(parent) = parent {
        builder = builder.parent_id(CategoryId::new(parent));
    }
    let category = builder.build().map_err(ErrorEnvelope::from)?;
    store.insert(category.clone());
    Ok(category)
}

/// Chain: absolute root (1) → store root (2) → Top (3) → Mid (4) → Bottom (5).
fn seeded_tree(store: &InMemoryCategories) -> Result<Category> {
    seed_category(store, 1, "Root Catalog", None, &[1])?;
    seed_category(store, 2, "Default Category", Some(1), &[1, 2])?;
    seed_category(store, 3, "Top", Some(2), &[1, 2, 3])?;
    seed_category(store, 4, "Mid", Some(3), &[1, 2, 3, 4])?;
    seed_category(store, 5, "Bottom", Some(4), &[1, 2, 3, 4, 5])
}

fn resolver(store: &Arc<InMemoryCategories>) -> PathResolver {
    PathResolver::new(PathResolverDeps {
        categories: store.clone(),
        store_groups: Arc::new(InMemoryStoreGroups::new(vec![StoreGroup {
            id: 1,
            root_category_id: Some(CategoryId::new(2)),
        }])),
        logger: None,
    })
}

#[test]
fn breadcrumb_excludes_the_two_topmost_ancestors() -> Result<()> {
    let store = Arc::new(InMemoryCategories::new());
    let bottom = seeded_tree(&store)?;
    let mut resolver = resolver(&store);

    let path = resolver.for_category(&bottom, "", None)?;
    assert_eq!(&*path, "Top;Mid;Bottom");
    Ok(())
}

#[test]
fn repeated_resolution_of_an_unchanged_snapshot_is_identical() -> Result<()> {
    let store = Arc::new(InMemoryCategories::new());
    let bottom = seeded_tree(&store)?;
    let mut resolver = resolver(&store);

    let first = resolver.for_category(&bottom, "", None)?;
    let second = resolver.for_category(&bottom, "", None)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn explicit_exclude_ids_override_the_default_boundary() -> Result<()> {
    let store = Arc::new(InMemoryCategories::new());
    let bottom = seeded_tree(&store)?;
    let mut resolver = resolver(&store);

    let exclude = [CategoryId::new(1), CategoryId::new(2), CategoryId::new(3)];
    let path = resolver.for_category(&bottom, "", Some(&exclude))?;
    assert_eq!(&*path, "Mid;Bottom");

    let own_id_excluded = [CategoryId::new(5)];
    let unchanged = resolver.for_category(&bottom, "Suffix", Some(&own_id_excluded))?;
    assert_eq!(&*unchanged, "Suffix");
    Ok(())
}

#[test]
fn current_path_is_appended_as_a_suffix() -> Result<()> {
    let store = Arc::new(InMemoryCategories::new());
    let bottom = seeded_tree(&store)?;
    let mut resolver = resolver(&store);

    let path = resolver.for_category(&bottom, "Clearance", None)?;
    assert_eq!(&*path, "Top;Mid;Bottom;Clearance");
    Ok(())
}

#[test]
fn category_directly_under_the_store_root_is_its_own_name() -> Result<()> {
    let store = Arc::new(InMemoryCategories::new());
    seeded_tree(&store)?;
    let mut resolver = resolver(&store);

    let scope = ScopeContext::store(Store {
        id: STORE,
        website_id: WebsiteId::new(1),
        group_id: 1,
        code: "default".into(),
    });
    let path = resolver.for_category_id(CategoryId::new(3), None, &scope)?;
    assert_eq!(&*path, "Top");
    Ok(())
}

#[test]
fn missing_group_root_excludes_only_the_absolute_root() -> Result<()> {
    let store = Arc::new(InMemoryCategories::new());
    let bottom = seeded_tree(&store)?;
    let mut resolver = PathResolver::new(PathResolverDeps {
        categories: store.clone(),
        store_groups: Arc::new(InMemoryStoreGroups::new(Vec::new())),
        logger: None,
    });

    let path = resolver.for_category(&bottom, "", None)?;
    assert_eq!(&*path, "Default Category;Top;Mid;Bottom");
    Ok(())
}

#[test]
fn cyclic_parent_references_terminate() -> Result<()> {
    let store = Arc::new(InMemoryCategories::new());
    seed_category(&store, 1, "Root Catalog", None, &[1])?;
    // 10 and 11 point at each other.
    seed_category(&store, 10, "Loop A", Some(11), &[1, 10])?;
    let loop_b = seed_category(&store, 11, "Loop B", Some(10), &[1, 11])?;
    let mut resolver = resolver(&store);

    let path = resolver.for_category(&loop_b, "", Some(&[CategoryId::new(1)]))?;
    assert_eq!(&*path, "Loop A;Loop B");
    Ok(())
}
