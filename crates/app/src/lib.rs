//! # catalog-connector-app
//!
//! Use cases of the catalog-to-search-index connector: change detection on
//! category save, entity- and attribute-level indexability decisions, the
//! merged attribute watch registry, and the breadcrumb-path and URL
//! resolvers.
//!
//! Everything here is synchronous and talks to the outside world only
//! through the `ports` traits; adapters and wiring live in sibling crates.

pub mod aspect_registry;
pub mod change_detector;
pub mod indexability;
pub mod path_resolver;
pub mod store_scope;
pub mod url_resolver;

pub use aspect_registry::AspectWatchRegistry;
pub use change_detector::{SavePipeline, SavePipelineDeps};
pub use indexability::{AttributeIndexability, CategoryIndexability, IndexabilityError};
pub use path_resolver::{PATH_DELIMITER, PathResolver, PathResolverDeps};
pub use store_scope::store_id_from_scope;
pub use url_resolver::{
    CATEGORY_VIEW_ROUTE, UrlResolver, UrlResolverDeps, UrlStrategy, slugify,
};

/// Returns the app crate version.
#[must_use]
pub const fn app_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
