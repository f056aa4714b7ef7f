//! # wardrobe - catalog core for a digital wardrobe
//!
//! Turns loosely shaped piece, outfit, and shelf records into render-ready
//! views. Everything here is pure and in-memory: fetching, caching, and
//! drawing belong to the caller.
//!
//! ## Core Concepts
//!
//! - **Piece**: a single garment with a fixed [`SlotType`]
//! - **Outfit**: a composition referencing up to one piece per slot
//! - **Shelf**: a user-curated collection mixing pieces and outfits
//! - **Reference**: a bare identifier or an inlined entity, resolved
//!   through an [`EntityMap`]
//!
//! ## Usage
//!
//! ```rust
//! use wardrobe::{Catalog, Outfit, Piece, Shelf, ShelfEntry, SlotType, SortOrder, ViewQuery};
//!
//! let catalog = Catalog::new(
//!     [
//!         Piece::new("p1", "Blue Tee", SlotType::Top).with_image("tee.png"),
//!         Piece::new("p2", "Jeans", SlotType::Bottom).with_image("jeans.png"),
//!     ],
//!     [Outfit::new("o1", "Weekend").with_piece("p1").with_piece("p2")],
//! );
//!
//! let shelf = Shelf::new("s1", "Favorites")
//!     .with_entry(ShelfEntry::piece("p2").with_added_at("2024-04-02T10:00:00Z"))
//!     .with_entry(ShelfEntry::outfit("o1").with_added_at("2024-04-01"));
//!
//! let query = ViewQuery::builder().order(SortOrder::Newest).build();
//! let entries = query.apply_shelf(&shelf, &catalog);
//! assert_eq!(entries.len(), 2);
//! assert_eq!(entries[0].item.as_piece().unwrap().name, "Jeans");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Records
pub mod error;
pub mod id;
pub mod item;
pub mod outfit;
pub mod piece;
pub mod shelf;
pub mod time;
mod wire;

// Catalog operations
pub mod catalog;
pub mod config;
pub mod filter;
pub mod membership;
pub mod resolve;
pub mod slots;
pub mod sort;
pub mod view;

// Re-export primary types at crate root for convenience
pub use catalog::Catalog;
pub use config::CatalogConfig;
pub use error::{ConfigError, ValidationError, WardrobeError, WardrobeResult};
pub use filter::{
    filter_by_kind, filter_by_name, filter_by_ownership, filter_by_slot_type, filter_mixed_by_ownership,
    filter_mixed_by_slot_type, KindFilter, OwnershipFilter,
};
pub use id::{Identified, ItemId};
pub use item::{AsMixed, HasKind, ItemKind, MixedItem, MixedRef};
pub use membership::{effective_timestamp, resolve_entry, resolve_shelf, sort_shelf, ResolvedEntry};
pub use outfit::Outfit;
pub use piece::{Piece, SlotType};
pub use resolve::{resolve, resolve_all, EntityMap, HasImage, HasName, Reference, ShapeGuard};
pub use shelf::{KindCounts, Shelf, ShelfEntry};
pub use slots::{classify, classify_outfit, classify_with, FullOutfitLayout, LayoutTag, OutfitLayout, OutfitSlots};
pub use sort::{collation_key, compare_keys, sort_items, sort_with, ComparisonKey, SortKey, SortOrder};
pub use view::{ViewBuilder, ViewParams, ViewQuery};
