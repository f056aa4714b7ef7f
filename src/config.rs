//! View defaults loaded from JSON.
//!
//! Every field is optional on the wire. Absent fields take their defaults;
//! present fields must name a known mode, so a typo in `default_sort` is
//! reported against that field instead of silently falling back.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ValidationError};
use crate::filter::{KindFilter, OwnershipFilter};
use crate::slots::FullOutfitLayout;
use crate::sort::SortOrder;

/// Default modes for collection views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogConfig {
    /// Sort order applied when the view does not pick one.
    pub default_sort: SortOrder,
    /// Ownership filter applied to piece views.
    pub default_ownership: OwnershipFilter,
    /// Kind filter applied to mixed views.
    pub default_kind: KindFilter,
    /// Layout used when an outfit fills every row.
    pub full_outfit_layout: FullOutfitLayout,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "snake_case")]
struct RawCatalogConfig {
    #[serde(alias = "defaultSort")]
    default_sort: Option<String>,
    #[serde(alias = "defaultOwnership")]
    default_ownership: Option<String>,
    #[serde(alias = "defaultKind")]
    default_kind: Option<String>,
    #[serde(alias = "fullOutfitLayout")]
    full_outfit_layout: Option<String>,
}

fn parse_field<T>(field: &str, raw: Option<&str>) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = ValidationError> + Default,
{
    match raw {
        None => Ok(T::default()),
        Some(value) => value.parse().map_err(|source| ConfigError::InvalidField {
            field: field.to_string(),
            source,
        }),
    }
}

impl CatalogConfig {
    /// Parses a config document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Malformed`] when the text is not a JSON object
    /// of string fields, and [`ConfigError::InvalidField`] when a field names
    /// an unknown mode.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: RawCatalogConfig = serde_json::from_str(json)?;
        Ok(Self {
            default_sort: parse_field("default_sort", raw.default_sort.as_deref())?,
            default_ownership: parse_field("default_ownership", raw.default_ownership.as_deref())?,
            default_kind: parse_field("default_kind", raw.default_kind.as_deref())?,
            full_outfit_layout: parse_field("full_outfit_layout", raw.full_outfit_layout.as_deref())?,
        })
    }

    /// Overrides the default sort order.
    #[must_use]
    pub const fn with_default_sort(mut self, order: SortOrder) -> Self {
        self.default_sort = order;
        self
    }

    /// Overrides the full-outfit layout policy.
    #[must_use]
    pub const fn with_full_outfit_layout(mut self, policy: FullOutfitLayout) -> Self {
        self.full_outfit_layout = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::default();
        assert_eq!(config.default_sort, SortOrder::Newest);
        assert_eq!(config.default_ownership, OwnershipFilter::All);
        assert_eq!(config.default_kind, KindFilter::All);
        assert_eq!(config.full_outfit_layout, FullOutfitLayout::AllRows);
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(CatalogConfig::from_json_str("{}").unwrap(), CatalogConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config =
            CatalogConfig::from_json_str(r#"{"default_sort": "az", "fullOutfitLayout": "preserve-gap"}"#).unwrap();
        assert_eq!(config.default_sort, SortOrder::Az);
        assert_eq!(config.default_ownership, OwnershipFilter::All);
        assert_eq!(config.full_outfit_layout, FullOutfitLayout::PreserveGap);
    }

    #[test]
    fn test_unknown_mode_names_field() {
        let err = CatalogConfig::from_json_str(r#"{"default_ownership": "borrowed"}"#).unwrap_err();
        match err {
            ConfigError::InvalidField { field, source } => {
                assert_eq!(field, "default_ownership");
                assert_eq!(
                    source,
                    ValidationError::UnknownOwnershipFilter {
                        value: "borrowed".to_string()
                    }
                );
            }
            other => panic!("expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json() {
        let err = CatalogConfig::from_json_str("[1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Malformed { .. }));
    }

    #[test]
    fn test_serializes_mode_strings() {
        let value = serde_json::to_value(CatalogConfig::default().with_default_sort(SortOrder::Za)).unwrap();
        assert_eq!(value["default_sort"], "za");
        assert_eq!(value["full_outfit_layout"], "all-rows");
    }
}
