//! # catalog-connector-testkit
//!
//! Test helpers and in-memory adapters.
//! This crate depends on `ports` and `shared`.

pub mod in_memory;

/// Returns the testkit crate version.
#[must_use]
pub const fn testkit_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::in_memory::{InMemoryCategories, TestUrlBuilder};
    use catalog_connector_domain::{Category, CategoryId, StoreId};
    use catalog_connector_ports::{CategoryPersist, CategoryRepository, RouteUrlParams, UrlBuilder};

    #[test]
    fn testkit_crate_compiles() {
        assert!(!testkit_crate_version().is_empty());
    }

    #[test]
    fn category_store_assigns_ids_on_save() {
        let store = InMemoryCategories::new();
        let category = Category::builder("Shoes", StoreId::new(1))
            .and_then(catalog_connector_domain::CategoryBuilder::build)
            .expect("valid fixture");

        let saved = store.save(&category).expect("save succeeds");
        let id = saved.id.expect("id assigned");
        assert_eq!(saved.path.last(), Some(&id));

        let loaded = store.get(id, StoreId::new(1)).expect("loaded");
        assert_eq!(loaded, saved);
    }

    #[test]
    fn missing_category_is_a_not_found_envelope() {
        let store = InMemoryCategories::new();
        let error = store
            .get(CategoryId::new(9), StoreId::new(1))
            .expect_err("lookup miss");
        assert!(error.is_not_found());
    }

    #[test]
    fn url_builder_appends_query_pairs() {
        let builder = TestUrlBuilder::new("https://shop.test/");
        let url = builder
            .route_url(
                "catalog/category/view",
                &RouteUrlParams {
                    store_id: StoreId::new(1),
                    secure: true,
                    query: vec![("id".into(), "3".into()), ("s".into(), "shoes".into())],
                },
            )
            .expect("route URL builds");
        assert_eq!(&*url, "https://shop.test/catalog/category/view?id=3&s=shoes");
    }
}
