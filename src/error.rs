//! Error types for the wardrobe core.
//!
//! The catalog operations themselves never fail: broken records degrade to
//! default sort positions instead. Errors only surface at the parsing
//! boundary, when sort orders, filter modes, or configuration arrive as
//! strings from the view layer.

use thiserror::Error;

/// Validation errors raised while parsing caller-supplied mode strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Sort order name not recognized.
    #[error("Unknown sort order '{value}' (expected newest, oldest, az, or za)")]
    UnknownSortOrder {
        /// The rejected input, trimmed.
        value: String,
    },

    /// Ownership filter name not recognized.
    #[error("Unknown ownership filter '{value}' (expected all, owned, or want)")]
    UnknownOwnershipFilter {
        /// The rejected input, trimmed.
        value: String,
    },

    /// Kind filter name not recognized.
    #[error("Unknown kind filter '{value}' (expected all, pieces, or outfits)")]
    UnknownKindFilter {
        /// The rejected input, trimmed.
        value: String,
    },

    /// Item kind tag not recognized.
    #[error("Unknown item kind '{value}' (expected piece or outfit)")]
    UnknownItemKind {
        /// The rejected input, trimmed.
        value: String,
    },

    /// Slot type name not recognized.
    #[error("Unknown slot type '{value}' (expected headwear, top, outerwear, bottom, or footwear)")]
    UnknownSlotType {
        /// The rejected input, trimmed.
        value: String,
    },

    /// Full-outfit layout policy not recognized.
    #[error("Unknown layout policy '{value}' (expected all-rows or preserve-gap)")]
    UnknownLayoutPolicy {
        /// The rejected input, trimmed.
        value: String,
    },

    /// Blank identifier.
    #[error("Identifier cannot be empty")]
    EmptyIdentifier,
}

/// Errors raised while loading a [`CatalogConfig`](crate::config::CatalogConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON for a config object.
    #[error("Failed to parse config: {message}")]
    Malformed {
        /// Decoder message.
        message: String,
    },

    /// A field holds an unknown mode name.
    #[error("Invalid config field '{field}': {source}")]
    InvalidField {
        /// Field name as written in the config.
        field: String,
        /// Why the value was rejected.
        #[source]
        source: ValidationError,
    },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed {
            message: err.to_string(),
        }
    }
}

/// Top-level error type for the wardrobe core.
#[derive(Debug, Error)]
pub enum WardrobeError {
    /// A mode string failed to parse.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A config document failed to load.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl WardrobeError {
    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a config error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Result type alias for fallible wardrobe operations.
pub type WardrobeResult<T> = Result<T, WardrobeError>;
