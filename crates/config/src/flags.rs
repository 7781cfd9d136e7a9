//! Config-backed implementation of the `ConfigFlags` port.

use crate::schema::ValidatedConnectorConfig;
use catalog_connector_domain::ScopeContext;
use catalog_connector_ports::{ConfigFlags, FLAG_EXCLUDE_DISABLED_CATEGORIES};

/// Scope-aware flag resolution over a validated connector configuration.
///
/// Resolution falls through store → website → default; an override table
/// entry applies only when it sets the flag explicitly.
#[derive(Debug, Clone)]
pub struct ScopedFlags {
    config: ValidatedConnectorConfig,
}

impl ScopedFlags {
    /// Wrap a validated configuration.
    #[must_use]
    pub const fn new(config: ValidatedConnectorConfig) -> Self {
        Self { config }
    }

    fn exclude_disabled(&self, scope: &ScopeContext) -> bool {
        let indexing = &self.config.raw().indexing;
        let website_value = |website_id: u32| {
            indexing
                .website_overrides
                .get(&website_id.to_string())
                .and_then(|entry| entry.exclude_disabled_categories)
        };

        let scoped = match scope {
            ScopeContext::Default => None,
            ScopeContext::Website(website) => website_value(website.id.get()),
            ScopeContext::Store(store) => indexing
                .store_overrides
                .get(&store.id.get().to_string())
                .and_then(|entry| entry.exclude_disabled_categories)
                .or_else(|| website_value(store.website_id.get())),
        };

        scoped.unwrap_or(indexing.exclude_disabled_categories)
    }
}

impl ConfigFlags for ScopedFlags {
    fn is_set_flag(&self, path: &str, scope: &ScopeContext) -> bool {
        match path {
            FLAG_EXCLUDE_DISABLED_CATEGORIES => self.exclude_disabled(scope),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ConnectorConfig;
    use catalog_connector_domain::{Store, StoreId, WebsiteId};
    use std::error::Error;

    fn store_scope(store_id: u32, website_id: u32) -> ScopeContext {
        ScopeContext::Store(Store {
            id: StoreId::new(store_id),
            website_id: WebsiteId::new(website_id),
            group_id: 1,
            code: "store".into(),
        })
    }

    #[test]
    fn store_override_beats_website_and_default() -> Result<(), Box<dyn Error>> {
        let input = r#"
            version = 1

            [indexing]
            excludeDisabledCategories = true

            [indexing.websiteOverrides.1]
            excludeDisabledCategories = true

            [indexing.storeOverrides.2]
            excludeDisabledCategories = false
        "#;
        let flags = ScopedFlags::new(
            ConnectorConfig::from_toml_str(input)?.validate_and_normalize()?,
        );

        assert!(flags.is_set_flag(FLAG_EXCLUDE_DISABLED_CATEGORIES, &ScopeContext::Default));
        assert!(flags.is_set_flag(FLAG_EXCLUDE_DISABLED_CATEGORIES, &store_scope(3, 1)));
        assert!(!flags.is_set_flag(FLAG_EXCLUDE_DISABLED_CATEGORIES, &store_scope(2, 1)));
        Ok(())
    }

    #[test]
    fn unknown_paths_are_unset() -> Result<(), Box<dyn Error>> {
        let flags =
            ScopedFlags::new(ConnectorConfig::default().validate_and_normalize()?);
        assert!(!flags.is_set_flag("catalog_connector/other/flag", &ScopeContext::Default));
        Ok(())
    }
}
