//! Mixed collections of pieces and outfits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{Identified, ItemId};
use crate::outfit::Outfit;
use crate::piece::Piece;

/// Which kind of catalog item a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A single garment.
    #[serde(alias = "Piece")]
    Piece,
    /// A composition of pieces.
    #[serde(alias = "Outfit")]
    Outfit,
}

impl ItemKind {
    /// Wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Piece => "piece",
            Self::Outfit => "outfit",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("piece") {
            Ok(Self::Piece)
        } else if s.eq_ignore_ascii_case("outfit") {
            Ok(Self::Outfit)
        } else {
            Err(ValidationError::UnknownItemKind { value: s.to_string() })
        }
    }
}

/// Anything tagged with an [`ItemKind`].
pub trait HasKind {
    /// The item's kind.
    fn kind(&self) -> ItemKind;
}

/// An owned piece-or-outfit, the common currency of mixed views.
///
/// # Examples
///
/// ```
/// use wardrobe::{ItemKind, MixedItem, Outfit};
///
/// let item = MixedItem::from(Outfit::new("o1", "Weekend"));
/// assert_eq!(item.kind(), ItemKind::Outfit);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MixedItem {
    /// A piece.
    #[serde(alias = "Piece")]
    Piece(Piece),
    /// An outfit.
    #[serde(alias = "Outfit")]
    Outfit(Outfit),
}

impl MixedItem {
    /// The wrapped item's kind.
    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        match self {
            Self::Piece(_) => ItemKind::Piece,
            Self::Outfit(_) => ItemKind::Outfit,
        }
    }

    /// The piece, if this is one.
    #[must_use]
    pub const fn as_piece(&self) -> Option<&Piece> {
        match self {
            Self::Piece(piece) => Some(piece),
            Self::Outfit(_) => None,
        }
    }

    /// The outfit, if this is one.
    #[must_use]
    pub const fn as_outfit(&self) -> Option<&Outfit> {
        match self {
            Self::Outfit(outfit) => Some(outfit),
            Self::Piece(_) => None,
        }
    }

    /// Borrows this item as a [`MixedRef`].
    #[must_use]
    pub const fn borrowed(&self) -> MixedRef<'_> {
        match self {
            Self::Piece(piece) => MixedRef::Piece(piece),
            Self::Outfit(outfit) => MixedRef::Outfit(outfit),
        }
    }
}

impl From<Piece> for MixedItem {
    fn from(piece: Piece) -> Self {
        Self::Piece(piece)
    }
}

impl From<Outfit> for MixedItem {
    fn from(outfit: Outfit) -> Self {
        Self::Outfit(outfit)
    }
}

impl HasKind for MixedItem {
    fn kind(&self) -> ItemKind {
        MixedItem::kind(self)
    }
}

impl Identified for MixedItem {
    fn id(&self) -> &ItemId {
        match self {
            Self::Piece(piece) => &piece.id,
            Self::Outfit(outfit) => &outfit.id,
        }
    }
}

/// A borrowed piece-or-outfit, as produced by resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MixedRef<'a> {
    /// A borrowed piece.
    Piece(&'a Piece),
    /// A borrowed outfit.
    Outfit(&'a Outfit),
}

impl<'a> MixedRef<'a> {
    /// The referenced item's kind.
    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        match self {
            Self::Piece(_) => ItemKind::Piece,
            Self::Outfit(_) => ItemKind::Outfit,
        }
    }

    /// The piece, if this is one.
    #[must_use]
    pub const fn as_piece(&self) -> Option<&'a Piece> {
        match self {
            Self::Piece(piece) => Some(*piece),
            Self::Outfit(_) => None,
        }
    }

    /// The outfit, if this is one.
    #[must_use]
    pub const fn as_outfit(&self) -> Option<&'a Outfit> {
        match self {
            Self::Outfit(outfit) => Some(*outfit),
            Self::Piece(_) => None,
        }
    }

    /// Creation time of the underlying entity, in epoch milliseconds.
    #[must_use]
    pub fn created_millis(&self) -> i64 {
        match self {
            Self::Piece(piece) => piece.created_millis(),
            Self::Outfit(outfit) => outfit.created_millis(),
        }
    }

    /// Clones the referenced entity into an owned [`MixedItem`].
    #[must_use]
    pub fn to_owned_item(&self) -> MixedItem {
        match self {
            Self::Piece(piece) => MixedItem::Piece((*piece).clone()),
            Self::Outfit(outfit) => MixedItem::Outfit((*outfit).clone()),
        }
    }
}

impl HasKind for MixedRef<'_> {
    fn kind(&self) -> ItemKind {
        MixedRef::kind(self)
    }
}

impl Identified for MixedRef<'_> {
    fn id(&self) -> &ItemId {
        match self {
            Self::Piece(piece) => &piece.id,
            Self::Outfit(outfit) => &outfit.id,
        }
    }
}

impl<T: HasKind + ?Sized> HasKind for &T {
    fn kind(&self) -> ItemKind {
        (**self).kind()
    }
}

/// Anything that can be viewed as a borrowed piece-or-outfit.
pub trait AsMixed {
    /// Borrows `self` as a [`MixedRef`].
    fn as_mixed(&self) -> MixedRef<'_>;
}

impl AsMixed for MixedItem {
    fn as_mixed(&self) -> MixedRef<'_> {
        self.borrowed()
    }
}

impl AsMixed for MixedRef<'_> {
    fn as_mixed(&self) -> MixedRef<'_> {
        *self
    }
}

impl<T: AsMixed + ?Sized> AsMixed for &T {
    fn as_mixed(&self) -> MixedRef<'_> {
        (**self).as_mixed()
    }
}
