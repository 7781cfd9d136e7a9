//! Store-id resolution from an explicit scope context.

use catalog_connector_domain::{ScopeContext, StoreId};
use catalog_connector_ports::{Logger, scope_fields};

/// Resolve the store id a scope context implies.
///
/// Default scope maps to the admin store (id 0). A website scope maps to
/// the website's default store; a website without one is a configuration
/// gap, logged as a warn event, and falls back to the admin store rather
/// than failing the caller.
#[must_use]
pub fn store_id_from_scope(scope: &ScopeContext, logger: Option<&dyn Logger>) -> StoreId {
    match scope {
        ScopeContext::Default => StoreId::DEFAULT,
        ScopeContext::Store(store) => store.id,
        ScopeContext::Website(website) => website.default_store_id.unwrap_or_else(|| {
            if let Some(logger) = logger {
                let mut fields = scope_fields(scope);
                fields.insert(
                    "websiteId".into(),
                    serde_json::Value::from(website.id.get()),
                );
                logger.warn(
                    "connector.scope.missing_default_store",
                    "Website scope has no default store; using the admin store",
                    Some(fields),
                );
            }
            StoreId::DEFAULT
        }),
    }
}
