//! Garments and the body-region slots they occupy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{Identified, ItemId};
use crate::time;
use crate::wire;

/// Body region a piece occupies within an outfit.
///
/// The declaration order is the canonical row order used by the outfit
/// classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SlotType {
    /// Hats and other headwear.
    Headwear,
    /// Shirts and tees.
    Top,
    /// Jackets and coats.
    Outerwear,
    /// Trousers and skirts.
    Bottom,
    /// Shoes and boots.
    Footwear,
}

impl SlotType {
    /// All slot types in row order.
    pub const ALL: [Self; 5] = [
        Self::Headwear,
        Self::Top,
        Self::Outerwear,
        Self::Bottom,
        Self::Footwear,
    ];

    /// Position of this slot in [`SlotType::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Headwear => 0,
            Self::Top => 1,
            Self::Outerwear => 2,
            Self::Bottom => 3,
            Self::Footwear => 4,
        }
    }

    /// Wire name of the slot.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Headwear => "headwear",
            Self::Top => "top",
            Self::Outerwear => "outerwear",
            Self::Bottom => "bottom",
            Self::Footwear => "footwear",
        }
    }

    /// True for the upper-body row (top or outerwear).
    #[must_use]
    pub const fn is_upper(self) -> bool {
        matches!(self, Self::Top | Self::Outerwear)
    }

    /// True for the lower-body row (bottom or footwear).
    #[must_use]
    pub const fn is_lower(self) -> bool {
        matches!(self, Self::Bottom | Self::Footwear)
    }
}

impl FromStr for SlotType {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|slot| value.eq_ignore_ascii_case(slot.as_str()))
            .ok_or_else(|| ValidationError::UnknownSlotType {
                value: value.to_string(),
            })
    }
}

impl TryFrom<String> for SlotType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SlotType> for String {
    fn from(value: SlotType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single garment.
///
/// Pieces are snapshots: the core reads them and never edits them.
///
/// # Examples
///
/// ```
/// use wardrobe::{Piece, SlotType};
///
/// let tee = Piece::new("p1", "Blue Tee", SlotType::Top).with_created_at("2024-01-01");
/// assert_eq!(tee.created_millis(), 1_704_067_200_000);
/// assert!(!tee.is_owned());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    /// Stable identifier.
    pub id: ItemId,

    /// Display name; empty when absent.
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub name: String,

    /// Slot the piece occupies in an outfit.
    #[serde(rename = "type", alias = "slotType")]
    pub slot_type: SlotType,

    /// `None` means the user has not marked it; treated as "want".
    #[serde(default, deserialize_with = "wire::lenient_bool", skip_serializing_if = "Option::is_none")]
    pub owned: Option<bool>,

    #[serde(
        default,
        alias = "created_at",
        deserialize_with = "wire::lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    /// Raw creation timestamp, as received.
    pub created_at: Option<String>,

    /// Primary image URL.
    #[serde(default, alias = "image", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Additional image URLs, in display order.
    #[serde(default, deserialize_with = "wire::null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl Piece {
    /// Creates an unowned piece with no timestamp or images.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, slot_type: SlotType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slot_type,
            owned: None,
            created_at: None,
            image_url: None,
            images: Vec::new(),
        }
    }

    /// Sets the raw creation timestamp.
    #[must_use]
    pub fn with_created_at(mut self, raw: impl Into<String>) -> Self {
        self.created_at = Some(raw.into());
        self
    }

    /// Sets the ownership flag.
    #[must_use]
    pub fn with_owned(mut self, owned: bool) -> Self {
        self.owned = Some(owned);
        self
    }

    /// Sets the primary image URL.
    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Ownership flag is strictly `true`.
    #[must_use]
    pub fn is_owned(&self) -> bool {
        self.owned == Some(true)
    }

    /// True if the piece carries any image reference.
    #[must_use]
    pub fn has_image(&self) -> bool {
        self.image_url.is_some() || !self.images.is_empty()
    }

    /// The image to show on cards: the primary URL, else the first gallery image.
    #[must_use]
    pub fn cover_image(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .or_else(|| self.images.first().map(String::as_str))
    }

    /// Creation time in epoch milliseconds, or 0 when absent/malformed.
    #[must_use]
    pub fn created_millis(&self) -> i64 {
        time::epoch_millis(self.created_at.as_deref())
    }
}

impl Identified for Piece {
    fn id(&self) -> &ItemId {
        &self.id
    }
}
