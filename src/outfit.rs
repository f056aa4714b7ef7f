//! Outfits: named compositions of up to one piece per slot.

use serde::{Deserialize, Serialize};

use crate::id::{Identified, ItemId};
use crate::piece::Piece;
use crate::resolve::Reference;
use crate::time;
use crate::wire;

/// A named composition of pieces.
///
/// `pieces` keeps the stored order; slotting depends on it, since the first
/// piece of a given slot type masks any later ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outfit {
    /// Stable identifier.
    pub id: ItemId,

    /// Display name; empty when absent.
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub name: String,

    #[serde(
        default,
        alias = "created_at",
        deserialize_with = "wire::lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    /// Raw creation timestamp, as received.
    pub created_at: Option<String>,

    /// Piece references in display order.
    #[serde(default, alias = "items", deserialize_with = "wire::null_as_default")]
    pub pieces: Vec<Reference<Piece>>,

    /// Free-form tags, deduplicated.
    #[serde(default, deserialize_with = "wire::null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Outfit {
    /// Creates an empty outfit with no timestamp.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at: None,
            pieces: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Sets the raw creation timestamp.
    #[must_use]
    pub fn with_created_at(mut self, raw: impl Into<String>) -> Self {
        self.created_at = Some(raw.into());
        self
    }

    /// Appends a piece reference (bare id or inlined piece).
    #[must_use]
    pub fn with_piece(mut self, reference: impl Into<Reference<Piece>>) -> Self {
        self.pieces.push(reference.into());
        self
    }

    /// Adds a tag unless it is already present.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if !self.has_tag(&tag) {
            self.tags.push(tag);
        }
        self
    }

    /// Case-insensitive tag lookup.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Creation time in epoch milliseconds, or 0 when absent/malformed.
    #[must_use]
    pub fn created_millis(&self) -> i64 {
        time::epoch_millis(self.created_at.as_deref())
    }
}

impl Identified for Outfit {
    fn id(&self) -> &ItemId {
        &self.id
    }
}

impl From<Piece> for Reference<Piece> {
    fn from(piece: Piece) -> Self {
        Self::Inline(piece)
    }
}

impl From<&str> for Reference<Piece> {
    fn from(id: &str) -> Self {
        Self::Id(ItemId::from(id))
    }
}

impl From<&str> for Reference<Outfit> {
    fn from(id: &str) -> Self {
        Self::Id(ItemId::from(id))
    }
}

impl From<Outfit> for Reference<Outfit> {
    fn from(outfit: Outfit) -> Self {
        Self::Inline(outfit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::SlotType;

    #[test]
    fn test_outfit_mixed_reference_shapes() {
        let json = r#"{
            "id": "o1",
            "name": "Weekend",
            "createdAt": "2024-03-01",
            "pieces": [
                "p1",
                {"id": "p2", "name": "Jeans", "type": "bottom", "imageUrl": "j.png"}
            ]
        }"#;
        let outfit: Outfit = serde_json::from_str(json).unwrap();
        assert_eq!(outfit.pieces.len(), 2);
        assert_eq!(outfit.pieces[0], Reference::id("p1"));
        assert!(outfit.pieces[1].is_inline());
        assert_eq!(outfit.created_millis(), 1_709_251_200_000);
    }

    #[test]
    fn test_outfit_items_alias_and_null_fields() {
        let outfit: Outfit =
            serde_json::from_str(r#"{"id":"o2","name":null,"items":["a","b"],"tags":null}"#).unwrap();
        assert_eq!(outfit.name, "");
        assert_eq!(outfit.pieces.len(), 2);
        assert!(outfit.tags.is_empty());
    }

    #[test]
    fn test_with_piece_accepts_both_shapes() {
        let outfit = Outfit::new("o", "Look")
            .with_piece("p1")
            .with_piece(Piece::new("p2", "Cap", SlotType::Headwear));
        assert!(!outfit.pieces[0].is_inline());
        assert!(outfit.pieces[1].is_inline());
    }

    #[test]
    fn test_tags_dedupe_case_insensitive() {
        let outfit = Outfit::new("o", "Look").with_tag("Favorite").with_tag("favorite");
        assert_eq!(outfit.tags.len(), 1);
        assert!(outfit.has_tag("FAVORITE"));
        assert!(!outfit.has_tag("archived"));
    }

    #[test]
    fn test_missing_created_at_is_epoch_zero() {
        assert_eq!(Outfit::new("o", "Look").created_millis(), 0);
    }
}
