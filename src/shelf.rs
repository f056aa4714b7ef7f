//! Shelves: user-curated collections mixing pieces and outfits.

use serde::{Deserialize, Serialize};

use crate::id::{Identified, ItemId};
use crate::item::{HasKind, ItemKind};
use crate::outfit::Outfit;
use crate::piece::Piece;
use crate::resolve::Reference;
use crate::time;
use crate::wire;

/// One membership record on a shelf.
///
/// Tagged by kind on the wire, so the reference type always matches:
///
/// ```json
/// {"kind": "piece", "item": "p1", "addedAt": "2024-04-02T10:00:00Z"}
/// {"kind": "outfit", "item": {"id": "o1", "name": "Weekend"}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShelfEntry {
    /// Membership of a single piece.
    #[serde(alias = "Piece")]
    Piece {
        /// The piece, by id or inlined.
        item: Reference<Piece>,
        /// Raw membership timestamp.
        #[serde(
            default,
            rename = "addedAt",
            alias = "added_at",
            deserialize_with = "wire::lenient_timestamp",
            skip_serializing_if = "Option::is_none"
        )]
        added_at: Option<String>,
    },
    /// Membership of a whole outfit.
    #[serde(alias = "Outfit")]
    Outfit {
        /// The outfit, by id or inlined.
        item: Reference<Outfit>,
        /// Raw membership timestamp.
        #[serde(
            default,
            rename = "addedAt",
            alias = "added_at",
            deserialize_with = "wire::lenient_timestamp",
            skip_serializing_if = "Option::is_none"
        )]
        added_at: Option<String>,
    },
}

impl ShelfEntry {
    /// A piece entry with no membership timestamp.
    #[must_use]
    pub fn piece(item: impl Into<Reference<Piece>>) -> Self {
        Self::Piece {
            item: item.into(),
            added_at: None,
        }
    }

    /// An outfit entry with no membership timestamp.
    #[must_use]
    pub fn outfit(item: impl Into<Reference<Outfit>>) -> Self {
        Self::Outfit {
            item: item.into(),
            added_at: None,
        }
    }

    /// Sets the membership timestamp.
    #[must_use]
    pub fn with_added_at(mut self, raw: impl Into<String>) -> Self {
        let raw = Some(raw.into());
        match &mut self {
            Self::Piece { added_at, .. } | Self::Outfit { added_at, .. } => *added_at = raw,
        }
        self
    }

    /// The entry's kind.
    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        match self {
            Self::Piece { .. } => ItemKind::Piece,
            Self::Outfit { .. } => ItemKind::Outfit,
        }
    }

    /// Raw membership timestamp, if recorded.
    #[must_use]
    pub fn added_at(&self) -> Option<&str> {
        match self {
            Self::Piece { added_at, .. } | Self::Outfit { added_at, .. } => added_at.as_deref(),
        }
    }

    /// Membership timestamp in epoch milliseconds, when present and parseable.
    #[must_use]
    pub fn added_millis(&self) -> Option<i64> {
        time::try_epoch_millis(self.added_at())
    }

    /// Identifier of the referenced item, whichever shape the reference has.
    #[must_use]
    pub fn target_id(&self) -> Option<&ItemId> {
        match self {
            Self::Piece { item, .. } => item.target_id(),
            Self::Outfit { item, .. } => item.target_id(),
        }
    }
}

impl HasKind for ShelfEntry {
    fn kind(&self) -> ItemKind {
        ShelfEntry::kind(self)
    }
}

/// Entry tallies by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KindCounts {
    /// Piece entries.
    pub pieces: usize,
    /// Outfit entries.
    pub outfits: usize,
}

impl KindCounts {
    /// All entries.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.pieces + self.outfits
    }
}

/// A named, ordered collection of shelf entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shelf {
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

    /// Entries in shelf order. Entries that fail to decode are skipped.
    #[serde(default, alias = "items", deserialize_with = "wire::skip_invalid")]
    pub entries: Vec<ShelfEntry>,
}

impl Shelf {
    /// Creates an empty shelf.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at: None,
            entries: Vec::new(),
        }
    }

    /// Sets the raw creation timestamp.
    #[must_use]
    pub fn with_created_at(mut self, raw: impl Into<String>) -> Self {
        self.created_at = Some(raw.into());
        self
    }

    /// Appends an entry.
    #[must_use]
    pub fn with_entry(mut self, entry: ShelfEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Counts entries by kind, resolved or not.
    #[must_use]
    pub fn count_by_kind(&self) -> KindCounts {
        self.entries.iter().fold(KindCounts::default(), |mut counts, entry| {
            match entry.kind() {
                ItemKind::Piece => counts.pieces += 1,
                ItemKind::Outfit => counts.outfits += 1,
            }
            counts
        })
    }

    /// Creation time in epoch milliseconds; 0 when absent or malformed.
    #[must_use]
    pub fn created_millis(&self) -> i64 {
        time::epoch_millis(self.created_at.as_deref())
    }
}

impl Identified for Shelf {
    fn id(&self) -> &ItemId {
        &self.id
    }
}
