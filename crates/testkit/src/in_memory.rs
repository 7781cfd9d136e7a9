//! In-memory adapter implementations for port contracts.
//!
//! These implementations are intended for:
//! - Unit/integration tests
//! - Deterministic contract tests for the ports layer
//! - Local experimentation without external collaborators

use catalog_connector_ports::{
    AspectFilter, AttributeMetadata, Category, CategoryAttribute, CategoryId, CategoryPersist,
    CategoryRepository, ConfigFlags, DirectUrlParams, EntityType, LogEvent, Logger,
    MutationNotification, MutationNotifier, RewriteCriteria, RewriteRecord, RouteUrlParams,
    ScopeContext, StoreGroup, StoreGroupRepository, StoreId, UrlBuilder, UrlRewriteFinder,
};
use catalog_connector_shared::{ErrorCode, ErrorEnvelope, Result};
use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// A no-op logger implementation.
#[derive(Debug, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _event: LogEvent) {}
}

/// Logger that records every event for later assertions.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    /// Create an empty recording logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events in emission order.
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().expect("memory logger lock").clone()
    }

    /// Returns true when an event with the given name was recorded.
    pub fn has_event(&self, event: &str) -> bool {
        self.events()
            .iter()
            .any(|recorded| &*recorded.event == event)
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: LogEvent) {
        self.events.lock().expect("memory logger lock").push(event);
    }
}

/// In-memory catalog store: store-scoped lookup plus persistence.
///
/// Categories are keyed by `(id, store id)`, mirroring the per-store
/// projection of the real catalog. `save` assigns ids to new entities.
#[derive(Debug, Default)]
pub struct InMemoryCategories {
    records: Mutex<HashMap<(CategoryId, StoreId), Category>>,
    next_id: AtomicU64,
}

impl InMemoryCategories {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1000),
        }
    }

    /// Seed the catalog with pre-existing categories (each must carry an id).
    #[must_use]
    pub fn with_categories(categories: impl IntoIterator<Item = Category>) -> Self {
        let store = Self::new();
        for category in categories {
            store.insert(category);
        }
        store
    }

    /// Insert or replace a category projection.
    pub fn insert(&self, category: Category) {
        let id = category.id.expect("seeded category must carry an id");
        self.records
            .lock()
            .expect("category store lock")
            .insert((id, category.store_id), category);
    }
}

impl CategoryRepository for InMemoryCategories {
    fn get(&self, id: CategoryId, store_id: StoreId) -> Result<Category> {
        self.records
            .lock()
            .expect("category store lock")
            .get(&(id, store_id))
            .cloned()
            .ok_or_else(|| {
                ErrorEnvelope::not_found(format!("category {id} for store {store_id}"))
                    .with_metadata("categoryId", id.to_string())
                    .with_metadata("storeId", store_id.to_string())
            })
    }
}

impl CategoryPersist for InMemoryCategories {
    fn save(&self, category: &Category) -> Result<Category> {
        let mut saved = category.clone();
        if saved.id.is_none() {
            let id = CategoryId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
            saved.id = Some(id);
            saved.path.push(id);
        }
        let id = saved.id.expect("assigned above");
        self.records
            .lock()
            .expect("category store lock")
            .insert((id, saved.store_id), saved.clone());
        Ok(saved)
    }
}

/// In-memory store-group lookup.
#[derive(Debug, Default)]
pub struct InMemoryStoreGroups {
    groups: HashMap<u32, StoreGroup>,
}

impl InMemoryStoreGroups {
    /// Create a lookup over the given groups.
    #[must_use]
    pub fn new(groups: impl IntoIterator<Item = StoreGroup>) -> Self {
        Self {
            groups: groups.into_iter().map(|group| (group.id, group)).collect(),
        }
    }
}

impl StoreGroupRepository for InMemoryStoreGroups {
    fn get(&self, group_id: u32) -> Result<StoreGroup> {
        self.groups.get(&group_id).cloned().ok_or_else(|| {
            ErrorEnvelope::not_found(format!("store group {group_id}"))
                .with_metadata("storeGroupId", group_id.to_string())
        })
    }
}

/// Notifier that records every notification it receives.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<MutationNotification>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded notifications in emission order.
    pub fn notifications(&self) -> Vec<MutationNotification> {
        self.notifications
            .lock()
            .expect("notifier lock")
            .clone()
    }
}

impl MutationNotifier for RecordingNotifier {
    fn execute(&self, notification: MutationNotification) -> Result<()> {
        self.notifications
            .lock()
            .expect("notifier lock")
            .push(notification);
        Ok(())
    }
}

/// In-memory URL-rewrite table with a lookup counter.
#[derive(Debug, Default)]
pub struct InMemoryRewrites {
    records: Mutex<Vec<(RewriteCriteria, RewriteRecord)>>,
    lookups: AtomicUsize,
}

impl InMemoryRewrites {
    /// Create an empty rewrite table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rewrite record for the given criteria.
    pub fn insert(&self, criteria: RewriteCriteria, record: RewriteRecord) {
        self.records
            .lock()
            .expect("rewrite table lock")
            .push((criteria, record));
    }

    /// Number of `find_one` invocations so far.
    pub fn find_calls(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl UrlRewriteFinder for InMemoryRewrites {
    fn find_one(&self, criteria: &RewriteCriteria) -> Result<Option<RewriteRecord>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .records
            .lock()
            .expect("rewrite table lock")
            .iter()
            .find(|(stored, _)| stored == criteria)
            .map(|(_, record)| record.clone()))
    }
}

/// Scope-insensitive flag source: a flag is either on everywhere or off.
#[derive(Debug, Default)]
pub struct StaticFlags {
    enabled: BTreeSet<String>,
}

impl StaticFlags {
    /// Create a source with every flag off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable a flag path.
    #[must_use]
    pub fn with_flag(mut self, path: &str) -> Self {
        self.enabled.insert(path.to_string());
        self
    }
}

impl ConfigFlags for StaticFlags {
    fn is_set_flag(&self, path: &str, _scope: &ScopeContext) -> bool {
        self.enabled.contains(path)
    }
}

/// In-memory attribute metadata source with a query counter.
#[derive(Debug)]
pub struct InMemoryAttributeMetadata {
    attributes: Vec<CategoryAttribute>,
    queries: AtomicUsize,
}

impl InMemoryAttributeMetadata {
    /// Create a source over the given attributes.
    #[must_use]
    pub fn new(attributes: Vec<CategoryAttribute>) -> Self {
        Self {
            attributes,
            queries: AtomicUsize::new(0),
        }
    }

    /// Number of `list` invocations so far.
    pub fn list_calls(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl AttributeMetadata for InMemoryAttributeMetadata {
    fn list(
        &self,
        entity_type: EntityType,
        filter: AspectFilter,
    ) -> Result<Vec<CategoryAttribute>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .attributes
            .iter()
            .filter(|attribute| attribute.entity_type == entity_type)
            .filter(|attribute| match filter {
                AspectFilter::All => true,
                AspectFilter::ExcludeNone => attribute.aspect.is_watched(),
            })
            .cloned()
            .collect())
    }
}

/// URL builder resolving against a fixed base URL.
///
/// Store id and the secure flag are accepted but do not change the output;
/// tests assert on paths and query strings, not on per-store base URLs.
#[derive(Debug)]
pub struct TestUrlBuilder {
    base: url::Url,
    resets: AtomicUsize,
}

impl TestUrlBuilder {
    /// Create a builder over a base URL such as `https://shop.test/`.
    #[must_use]
    pub fn new(base: &str) -> Self {
        Self {
            base: url::Url::parse(base).expect("test base URL must parse"),
            resets: AtomicUsize::new(0),
        }
    }

    /// Number of `reset_state` invocations so far.
    pub fn reset_calls(&self) -> usize {
        self.resets.load(Ordering::SeqCst)
    }

    fn join(&self, path: &str) -> Result<url::Url> {
        self.base.join(path).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::invalid_input(),
                format!("cannot join '{path}' onto the base URL: {error}"),
            )
        })
    }
}

impl UrlBuilder for TestUrlBuilder {
    fn direct_url(&self, path: &str, _params: &DirectUrlParams) -> Result<Box<str>> {
        Ok(self.join(path)?.as_str().into())
    }

    fn route_url(&self, route_path: &str, params: &RouteUrlParams) -> Result<Box<str>> {
        let mut resolved = self.join(route_path)?;
        {
            let mut pairs = resolved.query_pairs_mut();
            for (key, value) in &params.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(resolved.as_str().into())
    }

    fn reset_state(&self) {
        self.resets.fetch_add(1, Ordering::SeqCst);
    }
}
