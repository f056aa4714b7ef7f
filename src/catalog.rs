//! The per-fetch working set: entity maps for pieces and outfits.
//!
//! A [`Catalog`] is built once per fetch cycle from the latest piece and
//! outfit lists and passed down explicitly to every resolution call. It is
//! read-only for its whole lifetime.

use crate::id::ItemId;
use crate::item::MixedRef;
use crate::outfit::Outfit;
use crate::piece::Piece;
use crate::resolve::{resolve, resolve_all, EntityMap, HasImage, HasName, Reference};
use crate::shelf::ShelfEntry;
use crate::slots::{classify_outfit, FullOutfitLayout, OutfitLayout};

/// Piece and outfit lookups for one render cycle.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pieces: EntityMap<Piece>,
    outfits: EntityMap<Outfit>,
}

impl Catalog {
    /// Builds both entity maps from freshly fetched lists.
    pub fn new(pieces: impl IntoIterator<Item = Piece>, outfits: impl IntoIterator<Item = Outfit>) -> Self {
        Self {
            pieces: EntityMap::from_items(pieces),
            outfits: EntityMap::from_items(outfits),
        }
    }

    /// Wraps maps that were already built.
    #[must_use]
    pub const fn from_maps(pieces: EntityMap<Piece>, outfits: EntityMap<Outfit>) -> Self {
        Self { pieces, outfits }
    }

    /// Pieces in fetch order.
    #[must_use]
    pub const fn pieces(&self) -> &EntityMap<Piece> {
        &self.pieces
    }

    /// Outfits in fetch order.
    #[must_use]
    pub const fn outfits(&self) -> &EntityMap<Outfit> {
        &self.outfits
    }

    /// Looks up a piece by id.
    #[must_use]
    pub fn piece(&self, id: &ItemId) -> Option<&Piece> {
        self.pieces.get(id.as_str())
    }

    /// Looks up an outfit by id.
    #[must_use]
    pub fn outfit(&self, id: &ItemId) -> Option<&Outfit> {
        self.outfits.get(id.as_str())
    }

    /// Resolves a piece reference with the [`HasImage`] guard.
    #[must_use]
    pub fn resolve_piece<'a>(&'a self, reference: &'a Reference<Piece>) -> Option<&'a Piece> {
        resolve(reference, &self.pieces, &HasImage)
    }

    /// Resolves an outfit reference with the [`HasName`] guard.
    #[must_use]
    pub fn resolve_outfit<'a>(&'a self, reference: &'a Reference<Outfit>) -> Option<&'a Outfit> {
        resolve(reference, &self.outfits, &HasName)
    }

    /// Resolves a shelf entry against the map for its kind.
    #[must_use]
    pub fn resolve_entry_item<'a>(&'a self, entry: &'a ShelfEntry) -> Option<MixedRef<'a>> {
        match entry {
            ShelfEntry::Piece { item, .. } => self.resolve_piece(item).map(MixedRef::Piece),
            ShelfEntry::Outfit { item, .. } => self.resolve_outfit(item).map(MixedRef::Outfit),
        }
    }

    /// An outfit's pieces in reference order, unresolvable ones omitted.
    #[must_use]
    pub fn outfit_pieces<'a>(&'a self, outfit: &'a Outfit) -> Vec<&'a Piece> {
        resolve_all(&outfit.pieces, &self.pieces, &HasImage)
    }

    /// Resolves an outfit's pieces and classifies them under `policy`.
    #[must_use]
    pub fn classify<'a>(&'a self, outfit: &'a Outfit, policy: FullOutfitLayout) -> OutfitLayout<'a> {
        classify_outfit(outfit, &self.pieces, policy)
    }

    /// Every piece followed by every outfit, each in fetch order.
    #[must_use]
    pub fn mixed_items(&self) -> Vec<MixedRef<'_>> {
        self.pieces
            .values()
            .map(MixedRef::Piece)
            .chain(self.outfits.values().map(MixedRef::Outfit))
            .collect()
    }
}
