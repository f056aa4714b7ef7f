//! Predicate filters over piece, outfit, and mixed collections.
//!
//! Like sorting, every filter returns a new `Vec` and leaves its input
//! untouched.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::item::{AsMixed, HasKind, ItemKind};
use crate::piece::{Piece, SlotType};
use crate::sort::{collation_key, SortKey};

/// Ownership view over a piece collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OwnershipFilter {
    /// Every piece.
    #[default]
    All,
    /// Pieces whose ownership flag is strictly true.
    Owned,
    /// Pieces flagged not owned, or never flagged at all.
    Want,
}

impl OwnershipFilter {
    /// Every mode, in wire order.
    pub const ALL: [Self; 3] = [Self::All, Self::Owned, Self::Want];

    /// Wire name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Owned => "owned",
            Self::Want => "want",
        }
    }

    /// Whether `piece` survives this filter.
    #[must_use]
    pub fn matches(self, piece: &Piece) -> bool {
        match self {
            Self::All => true,
            Self::Owned => piece.is_owned(),
            Self::Want => !piece.is_owned(),
        }
    }
}

impl fmt::Display for OwnershipFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OwnershipFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| s.eq_ignore_ascii_case(mode.as_str()))
            .ok_or_else(|| ValidationError::UnknownOwnershipFilter { value: s.to_string() })
    }
}

impl TryFrom<String> for OwnershipFilter {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OwnershipFilter> for String {
    fn from(value: OwnershipFilter) -> Self {
        value.as_str().to_string()
    }
}

/// Kind view over a mixed collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum KindFilter {
    /// Pieces and outfits.
    #[default]
    All,
    /// Pieces only.
    Pieces,
    /// Outfits only.
    Outfits,
}

impl KindFilter {
    /// Every mode, in wire order.
    pub const ALL: [Self; 3] = [Self::All, Self::Pieces, Self::Outfits];

    /// Wire name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pieces => "pieces",
            Self::Outfits => "outfits",
        }
    }

    /// Whether an item of `kind` survives this filter.
    #[must_use]
    pub const fn matches(self, kind: ItemKind) -> bool {
        match self {
            Self::All => true,
            Self::Pieces => matches!(kind, ItemKind::Piece),
            Self::Outfits => matches!(kind, ItemKind::Outfit),
        }
    }
}

impl fmt::Display for KindFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KindFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| s.eq_ignore_ascii_case(mode.as_str()))
            .ok_or_else(|| ValidationError::UnknownKindFilter { value: s.to_string() })
    }
}

impl TryFrom<String> for KindFilter {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KindFilter> for String {
    fn from(value: KindFilter) -> Self {
        value.as_str().to_string()
    }
}

/// Keeps the pieces matching `mode`.
///
/// Works over owned pieces and borrowed ones alike.
pub fn filter_by_ownership<T>(pieces: &[T], mode: OwnershipFilter) -> Vec<T>
where
    T: Borrow<Piece> + Clone,
{
    pieces
        .iter()
        .filter(|piece| mode.matches(<T as Borrow<Piece>>::borrow(piece)))
        .cloned()
        .collect()
}

/// Ownership filter for mixed collections; outfits always pass.
pub fn filter_mixed_by_ownership<T>(items: &[T], mode: OwnershipFilter) -> Vec<T>
where
    T: AsMixed + Clone,
{
    items
        .iter()
        .filter(|item| item.as_mixed().as_piece().map_or(true, |piece| mode.matches(piece)))
        .cloned()
        .collect()
}

/// Keeps the items whose kind matches `mode`.
pub fn filter_by_kind<T>(items: &[T], mode: KindFilter) -> Vec<T>
where
    T: HasKind + Clone,
{
    items
        .iter()
        .filter(|item| mode.matches(item.kind()))
        .cloned()
        .collect()
}

/// Case- and accent-insensitive substring match on each item's name.
///
/// A blank query keeps everything.
pub fn filter_by_name<T>(items: &[T], query: &str) -> Vec<T>
where
    T: SortKey + Clone,
{
    let needle = collation_key(query);
    if needle.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| collation_key(item.sort_name()).contains(&needle))
        .cloned()
        .collect()
}

/// Keeps the pieces occupying `slot`.
pub fn filter_by_slot_type<T>(pieces: &[T], slot: SlotType) -> Vec<T>
where
    T: Borrow<Piece> + Clone,
{
    pieces
        .iter()
        .filter(|piece| <T as Borrow<Piece>>::borrow(piece).slot_type == slot)
        .cloned()
        .collect()
}

/// Slot filter for mixed collections; outfits always pass.
pub fn filter_mixed_by_slot_type<T>(items: &[T], slot: SlotType) -> Vec<T>
where
    T: AsMixed + Clone,
{
    items
        .iter()
        .filter(|item| item.as_mixed().as_piece().map_or(true, |piece| piece.slot_type == slot))
        .cloned()
        .collect()
}
