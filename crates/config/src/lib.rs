//! # catalog-connector-config
//!
//! Typed connector configuration: schema, TOML loading, validation and
//! normalization, and a config-backed `ConfigFlags` implementation with
//! store → website → default fallthrough.

pub mod flags;
pub mod schema;

pub use flags::ScopedFlags;
pub use schema::{
    CURRENT_CONFIG_VERSION, ConfigSchemaError, ConnectorConfig, IndexingConfig, IndexingOverride,
    ValidatedConnectorConfig, WatchConfig,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
