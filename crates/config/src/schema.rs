//! Connector configuration schema, defaults, validation, and normalization.
//!
//! - Deserialization uses `serde` over TOML.
//! - Validation is manual and returns typed errors mapped to `ErrorEnvelope`.
//! - Normalization enforces stable ordering and de-duplication for the
//!   watch-list fields.

use catalog_connector_domain::{Aspect, AspectError, AttributeCode, AttributeWatchMap};
use catalog_connector_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Current supported configuration schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

const WATCH_CODES_MAX: usize = 128;

/// Top-level connector configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ConnectorConfig {
    /// Schema version for forward-compatible migrations.
    pub version: u32,
    /// Indexing behavior flags.
    pub indexing: IndexingConfig,
    /// Watched-attribute configuration.
    pub watch: WatchConfig,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            indexing: IndexingConfig::default(),
            watch: WatchConfig::default(),
        }
    }
}

/// Indexing behavior flags with per-scope overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct IndexingConfig {
    /// Exclude disabled categories from the index (default scope value).
    pub exclude_disabled_categories: bool,
    /// Per-website overrides, keyed by website id (TOML keys are strings).
    pub website_overrides: BTreeMap<String, IndexingOverride>,
    /// Per-store overrides, keyed by store id (TOML keys are strings).
    pub store_overrides: BTreeMap<String, IndexingOverride>,
}

/// Scope-level override of indexing flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct IndexingOverride {
    /// Override for `exclude_disabled_categories`, when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_disabled_categories: Option<bool>,
}

/// Watched-attribute configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct WatchConfig {
    /// Explicitly watched attribute codes.
    pub codes: Vec<String>,
    /// Explicitly configured aspect overrides (code → raw aspect value).
    pub aspects: BTreeMap<String, String>,
}

/// Typed configuration validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSchemaError {
    /// Unsupported schema version.
    UnsupportedVersion {
        /// Version found in the input.
        found: u32,
    },
    /// Watch code list exceeds the fixed bound.
    TooManyWatchCodes {
        /// Number of codes found.
        found: usize,
    },
    /// A watch code or aspect value failed domain validation.
    InvalidWatchEntry {
        /// Offending raw input.
        raw: Box<str>,
        /// Underlying domain error.
        cause: AspectError,
    },
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found } => {
                write!(
                    formatter,
                    "unsupported config version {found} (expected {CURRENT_CONFIG_VERSION})"
                )
            },
            Self::TooManyWatchCodes { found } => {
                write!(
                    formatter,
                    "watch code list has {found} entries (max {WATCH_CODES_MAX})"
                )
            },
            Self::InvalidWatchEntry { raw, cause } => {
                write!(formatter, "invalid watch entry '{raw}': {cause}")
            },
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let envelope = Self::expected(
            ErrorCode::new("config", "invalid_config"),
            error.to_string(),
        );
        match error {
            ConfigSchemaError::UnsupportedVersion { found } => {
                envelope.with_metadata("found", found.to_string())
            },
            ConfigSchemaError::TooManyWatchCodes { found } => {
                envelope.with_metadata("found", found.to_string())
            },
            ConfigSchemaError::InvalidWatchEntry { raw, .. } => {
                envelope.with_metadata("raw", raw)
            },
        }
    }
}

/// A validated, normalized connector configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConnectorConfig {
    raw: ConnectorConfig,
    watch_codes: Vec<AttributeCode>,
    watch_aspects: AttributeWatchMap,
}

impl ValidatedConnectorConfig {
    /// Access the raw configuration.
    #[must_use]
    pub const fn raw(&self) -> &ConnectorConfig {
        &self.raw
    }

    /// Validated explicit watch codes, de-duplicated preserving order.
    #[must_use]
    pub fn watch_codes(&self) -> &[AttributeCode] {
        &self.watch_codes
    }

    /// Validated configured aspect overrides.
    #[must_use]
    pub const fn watch_aspects(&self) -> &AttributeWatchMap {
        &self.watch_aspects
    }
}

impl ConnectorConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(input: &str) -> Result<Self, ErrorEnvelope> {
        toml::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "parse_failed"),
                format!("config parse failed: {error}"),
            )
        })
    }

    /// Validate and normalize the config.
    pub fn validate_and_normalize(self) -> Result<ValidatedConnectorConfig, ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
            });
        }
        if self.watch.codes.len() > WATCH_CODES_MAX {
            return Err(ConfigSchemaError::TooManyWatchCodes {
                found: self.watch.codes.len(),
            });
        }

        let mut watch_codes: Vec<AttributeCode> = Vec::with_capacity(self.watch.codes.len());
        for raw in &self.watch.codes {
            let code = AttributeCode::parse(raw).map_err(|cause| {
                ConfigSchemaError::InvalidWatchEntry {
                    raw: raw.as_str().into(),
                    cause,
                }
            })?;
            if !watch_codes.contains(&code) {
                watch_codes.push(code);
            }
        }

        let mut watch_aspects = AttributeWatchMap::new();
        for (raw_code, raw_aspect) in &self.watch.aspects {
            let code = AttributeCode::parse(raw_code).map_err(|cause| {
                ConfigSchemaError::InvalidWatchEntry {
                    raw: raw_code.as_str().into(),
                    cause,
                }
            })?;
            let aspect = Aspect::parse_raw(raw_aspect).map_err(|cause| {
                ConfigSchemaError::InvalidWatchEntry {
                    raw: raw_aspect.as_str().into(),
                    cause,
                }
            })?;
            watch_aspects.insert(code, aspect);
        }

        Ok(ValidatedConnectorConfig {
            raw: self,
            watch_codes,
            watch_aspects,
        })
    }
}
