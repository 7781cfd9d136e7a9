//! Watched-attribute aspects, indexability classification, and the merged
//! watch map.

use catalog_connector_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validation failures for attribute metadata values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AspectError {
    /// Attribute code is empty after trimming.
    EmptyAttributeCode {
        /// Length of the raw input before trimming.
        input_length: usize,
    },
    /// Raw aspect value is not a recognized aspect.
    UnknownAspect {
        /// Raw value read from attribute metadata.
        raw: Box<str>,
    },
    /// Raw index-as value is not a recognized classification.
    UnknownIndexType {
        /// Raw value read from attribute metadata.
        raw: Box<str>,
    },
}

impl AspectError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyAttributeCode { .. } => ErrorCode::new("domain", "invalid_attribute_code"),
            Self::UnknownAspect { .. } => ErrorCode::new("domain", "unknown_aspect"),
            Self::UnknownIndexType { .. } => ErrorCode::new("domain", "unknown_index_type"),
        }
    }
}

impl fmt::Display for AspectError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAttributeCode { .. } => {
                formatter.write_str("attribute code must be non-empty")
            },
            Self::UnknownAspect { raw } => write!(formatter, "unknown aspect value '{raw}'"),
            Self::UnknownIndexType { raw } => {
                write!(formatter, "unknown index-as value '{raw}'")
            },
        }
    }
}

impl std::error::Error for AspectError {}

impl From<AspectError> for ErrorEnvelope {
    fn from(error: AspectError) -> Self {
        let mut envelope = Self::expected(error.error_code(), error.to_string());

        match error {
            AspectError::EmptyAttributeCode { input_length } => {
                envelope = envelope.with_metadata("input_length", input_length.to_string());
            },
            AspectError::UnknownAspect { raw } | AspectError::UnknownIndexType { raw } => {
                envelope = envelope.with_metadata("raw", raw);
            },
        }

        envelope
    }
}

/// Code identifying a catalog attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeCode(Box<str>);

impl AttributeCode {
    /// Parse an `AttributeCode` from user input.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, AspectError> {
        let raw = input.as_ref();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AspectError::EmptyAttributeCode {
                input_length: raw.len(),
            });
        }

        Ok(Self(trimmed.to_owned().into_boxed_str()))
    }

    /// Access the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AttributeCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AttributeCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Significance of a watched attribute's change.
///
/// `None` never triggers re-indexing; `All` means any change triggers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aspect {
    /// Changes to this attribute never trigger re-indexing.
    None,
    /// Any change to this attribute triggers re-indexing.
    All,
}

impl Aspect {
    /// Parse a raw metadata value.
    pub fn parse_raw(raw: impl AsRef<str>) -> Result<Self, AspectError> {
        match raw.as_ref().trim() {
            "none" => Ok(Self::None),
            "all" => Ok(Self::All),
            other => Err(AspectError::UnknownAspect { raw: other.into() }),
        }
    }

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::All => "all",
        }
    }

    /// Returns true when changes to the attribute are significant.
    #[must_use]
    pub const fn is_watched(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Attribute-level indexability classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexType {
    /// The attribute is excluded from the search index.
    NoIndex,
    /// The attribute is included in the search index.
    Index,
}

impl IndexType {
    /// Parse a raw index-as metadata value.
    ///
    /// Callers absorb the error into `NoIndex` at the determiner boundary;
    /// the parse stays fallible so the bad raw value can be logged.
    pub fn parse_raw(raw: impl AsRef<str>) -> Result<Self, AspectError> {
        match raw.as_ref().trim() {
            "no-index" => Ok(Self::NoIndex),
            "index" => Ok(Self::Index),
            other => Err(AspectError::UnknownIndexType { raw: other.into() }),
        }
    }

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoIndex => "no-index",
            Self::Index => "index",
        }
    }

    /// Human-readable label used in log events.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoIndex => "No Index",
            Self::Index => "Index",
        }
    }

    /// Returns true when the attribute should be indexed.
    #[must_use]
    pub const fn is_indexable(self) -> bool {
        matches!(self, Self::Index)
    }
}

impl fmt::Display for IndexType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Entity domain an attribute belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    /// Catalog category attributes.
    Category,
    /// Catalog product attributes.
    Product,
}

impl EntityType {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Product => "product",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Catalog attribute metadata as read from the attribute source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAttribute {
    /// Attribute id in the catalog store.
    pub id: u32,
    /// Attribute code.
    pub code: AttributeCode,
    /// Entity domain the attribute belongs to.
    pub entity_type: EntityType,
    /// Stored change-significance aspect.
    pub aspect: Aspect,
    /// Raw index-as classification value, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_as: Option<Box<str>>,
}

/// Ordered mapping of attribute code to `Aspect`.
///
/// Insertion order is preserved; merging lets the override source win on key
/// collision without disturbing the first-seen ordering of surviving keys.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeWatchMap {
    entries: Vec<(AttributeCode, Aspect)>,
}

impl AttributeWatchMap {
    /// Create an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a mapping, overwriting in place on key collision.
    pub fn insert(&mut self, code: AttributeCode, aspect: Aspect) {
        if let Some(entry) = self.entries.iter_mut().find(|(key, _)| *key == code) {
            entry.1 = aspect;
        } else {
            self.entries.push((code, aspect));
        }
    }

    /// Look up the aspect for a code.
    #[must_use]
    pub fn get(&self, code: &AttributeCode) -> Option<Aspect> {
        self.entries
            .iter()
            .find(|(key, _)| key == code)
            .map(|(_, aspect)| *aspect)
    }

    /// Merge `overrides` into this map; override entries win on collision.
    #[must_use]
    pub fn merged_with(mut self, overrides: &Self) -> Self {
        for (code, aspect) in &overrides.entries {
            self.insert(code.clone(), *aspect);
        }
        self
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&AttributeCode, Aspect)> {
        self.entries.iter().map(|(code, aspect)| (code, *aspect))
    }

    /// Codes in insertion order.
    pub fn codes(&self) -> impl Iterator<Item = &AttributeCode> {
        self.entries.iter().map(|(code, _)| code)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(AttributeCode, Aspect)> for AttributeWatchMap {
    fn from_iter<I: IntoIterator<Item = (AttributeCode, Aspect)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (code, aspect) in iter {
            map.insert(code, aspect);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::error::Error;

    fn code(raw: &str) -> AttributeCode {
        AttributeCode::parse(raw).unwrap_or_else(|_| unreachable!("valid test code"))
    }

    #[test]
    fn aspect_parses_known_values() -> Result<(), Box<dyn Error>> {
        assert_eq!(Aspect::parse_raw("none")?, Aspect::None);
        assert_eq!(Aspect::parse_raw(" all ")?, Aspect::All);
        assert!(matches!(
            Aspect::parse_raw("cascade"),
            Err(AspectError::UnknownAspect { .. })
        ));
        Ok(())
    }

    #[test]
    fn index_type_parse_is_strict() -> Result<(), Box<dyn Error>> {
        assert!(IndexType::parse_raw("index")?.is_indexable());
        assert!(!IndexType::parse_raw("no-index")?.is_indexable());
        assert!(matches!(
            IndexType::parse_raw("analyze"),
            Err(AspectError::UnknownIndexType { .. })
        ));
        Ok(())
    }

    #[test]
    fn merge_prefers_override_entries() {
        let base: AttributeWatchMap = [
            (code("name"), Aspect::All),
            (code("is_active"), Aspect::All),
            (code("position"), Aspect::None),
        ]
        .into_iter()
        .collect();
        let overrides: AttributeWatchMap = [
            (code("position"), Aspect::All),
            (code("url_key"), Aspect::All),
        ]
        .into_iter()
        .collect();

        let merged = base.merged_with(&overrides);
        assert_eq!(merged.get(&code("position")), Some(Aspect::All));

        let order: Vec<&str> = merged.codes().map(AttributeCode::as_str).collect();
        assert_eq!(order, vec!["name", "is_active", "position", "url_key"]);
    }

    proptest! {
        #[test]
        fn merge_is_deterministic_and_deduplicated(
            base_codes in proptest::collection::vec("[a-z_]{1,12}", 0..12),
            override_codes in proptest::collection::vec("[a-z_]{1,12}", 0..12),
        ) {
            let base: AttributeWatchMap = base_codes
                .iter()
                .filter_map(|raw| AttributeCode::parse(raw).ok())
                .map(|code| (code, Aspect::None))
                .collect();
            let overrides: AttributeWatchMap = override_codes
                .iter()
                .filter_map(|raw| AttributeCode::parse(raw).ok())
                .map(|code| (code, Aspect::All))
                .collect();

            let merged = base.clone().merged_with(&overrides);
            let codes: Vec<&AttributeCode> = merged.codes().collect();
            let unique: std::collections::HashSet<&AttributeCode> =
                codes.iter().copied().collect();
            prop_assert_eq!(codes.len(), unique.len());

            // Every override entry wins.
            for override_code in overrides.codes() {
                prop_assert_eq!(merged.get(override_code), Some(Aspect::All));
            }

            // Determinism.
            prop_assert_eq!(merged.clone(), base.merged_with(&overrides));
        }
    }
}
