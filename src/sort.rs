//! Ordering for piece, outfit, and mixed collections.
//!
//! There is exactly one sorting algorithm. Every view flavor (pieces by
//! creation time, shelf entries by time added, mixed grids by name) differs
//! only in how it extracts a [`ComparisonKey`] from an item.
//!
//! Sorting is stable and never mutates the input: each call returns a new
//! `Vec`, so two views can order the same snapshot differently.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::ValidationError;
use crate::item::{MixedItem, MixedRef};
use crate::outfit::Outfit;
use crate::piece::Piece;

/// Requested ordering for a collection view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortOrder {
    /// Most recent timestamp first.
    #[default]
    Newest,
    /// Oldest timestamp first.
    Oldest,
    /// Name, A to Z.
    Az,
    /// Name, Z to A.
    Za,
}

impl SortOrder {
    /// Every order, in wire order.
    pub const ALL: [Self; 4] = [Self::Newest, Self::Oldest, Self::Az, Self::Za];

    /// Wire name of the order.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Az => "az",
            Self::Za => "za",
        }
    }

    /// The same key with the direction flipped.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Newest => Self::Oldest,
            Self::Oldest => Self::Newest,
            Self::Az => Self::Za,
            Self::Za => Self::Az,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|order| s.eq_ignore_ascii_case(order.as_str()))
            .ok_or_else(|| ValidationError::UnknownSortOrder { value: s.to_string() })
    }
}

impl TryFrom<String> for SortOrder {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortOrder> for String {
    fn from(value: SortOrder) -> Self {
        value.as_str().to_string()
    }
}

/// Normalized comparison key.
///
/// Names compare in two levels, the way a locale collator does: first on
/// the accent- and case-folded [`collation_key`], then on the lowercased
/// name so that `"emile"` sorts before `"émile"`. Names equal on both
/// levels tie, and ties keep input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonKey {
    /// Primary level: accent- and case-folded name.
    pub name: String,
    /// Secondary level: lowercased name with accents kept.
    pub accented: String,
    /// Epoch milliseconds; 0 for absent or malformed timestamps.
    pub timestamp: i64,
}

impl ComparisonKey {
    /// Builds a key from a display name and an epoch-millis timestamp.
    #[must_use]
    pub fn new(name: &str, timestamp: i64) -> Self {
        Self {
            name: collation_key(name),
            accented: name.trim().to_lowercase(),
            timestamp,
        }
    }

    fn name_cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.accented.cmp(&other.accented))
    }
}

/// Accent- and case-insensitive collation form of a display name.
///
/// Decomposes to NFD, drops combining marks, and lowercases, so `"Émile"`
/// folds to `"emile"` and sorts between `"Alpha"` and `"Zoe"`.
#[must_use]
pub fn collation_key(name: &str) -> String {
    name.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Compares two keys under `order`.
#[must_use]
pub fn compare_keys(a: &ComparisonKey, b: &ComparisonKey, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Newest => b.timestamp.cmp(&a.timestamp),
        SortOrder::Oldest => a.timestamp.cmp(&b.timestamp),
        SortOrder::Az => a.name_cmp(b),
        SortOrder::Za => b.name_cmp(a),
    }
}

/// Items that expose a name and a timestamp for ordering.
///
/// Absent names read as `""` and absent or malformed timestamps as 0, so
/// broken records sort deterministically.
pub trait SortKey {
    /// Name used by the alphabetical orders.
    fn sort_name(&self) -> &str;

    /// Timestamp used by the chronological orders, epoch milliseconds.
    fn sort_timestamp(&self) -> i64;

    /// Key for [`compare_keys`].
    fn comparison_key(&self) -> ComparisonKey {
        ComparisonKey::new(self.sort_name(), self.sort_timestamp())
    }
}

impl SortKey for Piece {
    fn sort_name(&self) -> &str {
        &self.name
    }

    fn sort_timestamp(&self) -> i64 {
        self.created_millis()
    }
}

impl SortKey for Outfit {
    fn sort_name(&self) -> &str {
        &self.name
    }

    fn sort_timestamp(&self) -> i64 {
        self.created_millis()
    }
}

impl SortKey for MixedItem {
    fn sort_name(&self) -> &str {
        match self {
            Self::Piece(piece) => piece.sort_name(),
            Self::Outfit(outfit) => outfit.sort_name(),
        }
    }

    fn sort_timestamp(&self) -> i64 {
        match self {
            Self::Piece(piece) => piece.sort_timestamp(),
            Self::Outfit(outfit) => outfit.sort_timestamp(),
        }
    }
}

impl SortKey for MixedRef<'_> {
    fn sort_name(&self) -> &str {
        match self {
            Self::Piece(piece) => piece.sort_name(),
            Self::Outfit(outfit) => outfit.sort_name(),
        }
    }

    fn sort_timestamp(&self) -> i64 {
        match self {
            Self::Piece(piece) => piece.sort_timestamp(),
            Self::Outfit(outfit) => outfit.sort_timestamp(),
        }
    }
}

impl<T: SortKey + ?Sized> SortKey for &T {
    fn sort_name(&self) -> &str {
        (**self).sort_name()
    }

    fn sort_timestamp(&self) -> i64 {
        (**self).sort_timestamp()
    }
}

/// Sorts with a caller-supplied key extractor.
///
/// Keys are extracted once per item. The sort is stable: items with equal
/// keys keep their input order.
pub fn sort_with<T, F>(items: &[T], order: SortOrder, key: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> ComparisonKey,
{
    let mut keyed: Vec<(ComparisonKey, &T)> = items.iter().map(|item| (key(item), item)).collect();
    keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, order));
    keyed.into_iter().map(|(_, item)| item.clone()).collect()
}

/// Sorts by each item's own [`SortKey`].
///
/// # Examples
///
/// ```
/// use wardrobe::{sort_items, Piece, SlotType, SortOrder};
///
/// let tee = Piece::new("a", "Blue Tee", SlotType::Top).with_created_at("2024-01-01");
/// let jeans = Piece::new("b", "Jeans", SlotType::Bottom).with_created_at("2024-02-01");
///
/// let newest = sort_items(&[&tee, &jeans], SortOrder::Newest);
/// assert_eq!(newest[0].name, "Jeans");
///
/// let az = sort_items(&[&tee, &jeans], SortOrder::Az);
/// assert_eq!(az[0].name, "Blue Tee");
/// ```
pub fn sort_items<T>(items: &[T], order: SortOrder) -> Vec<T>
where
    T: SortKey + Clone,
{
    sort_with(items, order, |item| item.comparison_key())
}
