//! Shelf membership timestamps.
//!
//! A shelf entry's "added" time falls back in three steps: the explicit
//! membership timestamp, then the referenced entity's creation time, then
//! epoch zero. The result feeds the ordinary [`sort_items`] comparator, so
//! "recently added" and "recently created" are two inputs to the same
//! ordering rather than two implementations.

use tracing::debug;

use crate::catalog::Catalog;
use crate::id::{Identified, ItemId};
use crate::item::{AsMixed, HasKind, ItemKind, MixedRef};
use crate::shelf::{Shelf, ShelfEntry};
use crate::sort::{sort_items, SortKey, SortOrder};
use crate::time::EPOCH_ZERO;

/// Effective "added" timestamp of `entry`, in epoch milliseconds.
///
/// Never absent: unresolvable entries without a usable membership
/// timestamp yield [`EPOCH_ZERO`].
#[must_use]
pub fn effective_timestamp(entry: &ShelfEntry, catalog: &Catalog) -> i64 {
    fallback_timestamp(entry, || catalog.resolve_entry_item(entry))
}

fn fallback_timestamp<'a>(entry: &ShelfEntry, resolve: impl FnOnce() -> Option<MixedRef<'a>>) -> i64 {
    entry
        .added_millis()
        .or_else(|| resolve().map(|item| item.created_millis()))
        .unwrap_or(EPOCH_ZERO)
}

/// A shelf entry resolved to its piece or outfit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedEntry<'a> {
    /// The resolved piece or outfit.
    pub item: MixedRef<'a>,
    /// Effective membership timestamp, epoch milliseconds.
    pub added_at: i64,
}

impl SortKey for ResolvedEntry<'_> {
    fn sort_name(&self) -> &str {
        self.item.sort_name()
    }

    fn sort_timestamp(&self) -> i64 {
        self.added_at
    }
}

impl HasKind for ResolvedEntry<'_> {
    fn kind(&self) -> ItemKind {
        self.item.kind()
    }
}

impl AsMixed for ResolvedEntry<'_> {
    fn as_mixed(&self) -> MixedRef<'_> {
        self.item
    }
}

impl Identified for ResolvedEntry<'_> {
    fn id(&self) -> &ItemId {
        self.item.id()
    }
}

/// Resolves one entry, or `None` when its reference does not resolve.
#[must_use]
pub fn resolve_entry<'a>(entry: &'a ShelfEntry, catalog: &'a Catalog) -> Option<ResolvedEntry<'a>> {
    let item = catalog.resolve_entry_item(entry)?;
    Some(ResolvedEntry {
        item,
        added_at: fallback_timestamp(entry, || Some(item)),
    })
}

/// Resolves every entry on `shelf` in shelf order, dropping unresolvable ones.
#[must_use]
pub fn resolve_shelf<'a>(shelf: &'a Shelf, catalog: &'a Catalog) -> Vec<ResolvedEntry<'a>> {
    shelf
        .entries
        .iter()
        .filter_map(|entry| {
            let resolved = resolve_entry(entry, catalog);
            if resolved.is_none() {
                debug!(shelf = %shelf.id, kind = %entry.kind(), "dropping unresolvable shelf entry");
            }
            resolved
        })
        .collect()
}

/// Resolves and orders a shelf's contents; `newest` means most recently added.
#[must_use]
pub fn sort_shelf<'a>(shelf: &'a Shelf, catalog: &'a Catalog, order: SortOrder) -> Vec<ResolvedEntry<'a>> {
    sort_items(&resolve_shelf(shelf, catalog), order)
}
