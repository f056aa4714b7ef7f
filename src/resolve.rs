//! Reference resolution.
//!
//! Collections arrive denormalized to different degrees: an outfit's piece
//! list may hold bare identifiers, fully populated pieces, or a mix of both.
//! Resolution turns either shape into a borrowed entity, looking bare
//! identifiers up in a caller-built [`EntityMap`].
//!
//! Unresolvable references are expected (the entity has not been fetched
//! yet, or the reference is stale) and are silently dropped. Callers never
//! see a sparse list.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::id::{Identified, ItemId};
use crate::outfit::Outfit;
use crate::piece::Piece;

/// A reference that is either a bare identifier or an inlined entity.
///
/// On the wire both shapes are accepted interchangeably. Anything that is
/// neither a string nor a decodable entity is kept as [`Reference::Unrecognized`]
/// and never resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference<T> {
    /// Bare identifier, resolved through an [`EntityMap`].
    Id(ItemId),
    /// Already-populated entity.
    Inline(T),
    /// Undecodable value.
    Unrecognized(serde_json::Value),
}

impl<T> Reference<T> {
    /// A reference by bare identifier.
    #[must_use]
    pub fn id(id: impl Into<ItemId>) -> Self {
        Self::Id(id.into())
    }

    /// A reference carrying the entity itself.
    #[must_use]
    pub const fn inline(entity: T) -> Self {
        Self::Inline(entity)
    }

    /// True when the entity is inlined.
    #[must_use]
    pub const fn is_inline(&self) -> bool {
        matches!(self, Self::Inline(_))
    }
}

impl<T: Identified> Reference<T> {
    /// The identifier this reference points at, whichever shape it has.
    #[must_use]
    pub fn target_id(&self) -> Option<&ItemId> {
        match self {
            Self::Id(id) => Some(id),
            Self::Inline(entity) => Some(entity.id()),
            Self::Unrecognized(_) => None,
        }
    }
}

impl<T> From<ItemId> for Reference<T> {
    fn from(id: ItemId) -> Self {
        Self::Id(id)
    }
}

/// Recognizes whether an inlined object already has the target entity's shape.
///
/// Implemented for any `Fn(&T) -> bool`, plus the stock guards [`HasImage`]
/// and [`HasName`].
pub trait ShapeGuard<T> {
    /// Whether `candidate` is already a populated entity.
    fn recognizes(&self, candidate: &T) -> bool;
}

impl<T, F> ShapeGuard<T> for F
where
    F: Fn(&T) -> bool,
{
    fn recognizes(&self, candidate: &T) -> bool {
        self(candidate)
    }
}

/// A piece is populated once it carries an image reference.
#[derive(Debug, Default, Clone, Copy)]
pub struct HasImage;

impl ShapeGuard<Piece> for HasImage {
    fn recognizes(&self, candidate: &Piece) -> bool {
        candidate.has_image()
    }
}

/// An outfit is populated once it carries a name.
#[derive(Debug, Default, Clone, Copy)]
pub struct HasName;

impl ShapeGuard<Outfit> for HasName {
    fn recognizes(&self, candidate: &Outfit) -> bool {
        !candidate.name.is_empty()
    }
}

/// Identifier → entity lookup, built once per fetch cycle.
///
/// Iteration follows first-insertion order. When two items share an
/// identifier, the one inserted last replaces the earlier one in place.
#[derive(Debug, Clone)]
pub struct EntityMap<T> {
    items: Vec<T>,
    index: HashMap<ItemId, usize>,
}

impl<T> Default for EntityMap<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Identified> EntityMap<T> {
    /// An empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map keyed by each item's identifier.
    pub fn from_items(items: impl IntoIterator<Item = T>) -> Self {
        let mut map = Self::new();
        for item in items {
            map.insert(item);
        }
        map
    }

    /// Inserts an item, replacing any previous item with the same id.
    pub fn insert(&mut self, item: T) -> Option<T> {
        if let Some(&position) = self.index.get(item.id().as_str()) {
            debug!(id = %item.id(), "entity map id collision, keeping the later item");
            return Some(std::mem::replace(&mut self.items[position], item));
        }
        self.index.insert(item.id().clone(), self.items.len());
        self.items.push(item);
        None
    }
}

impl<T> EntityMap<T> {
    /// Looks up an entity by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&position| &self.items[position])
    }

    /// True when an entity with `id` is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of distinct entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the map holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates entities in first-insertion order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T: Identified> FromIterator<T> for EntityMap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

/// Resolves a single reference.
///
/// - An inlined entity the guard recognizes is returned unchanged,
///   regardless of the map's contents.
/// - A bare identifier present in `map` yields the mapped entity.
/// - Anything else resolves to `None`.
///
/// # Examples
///
/// ```
/// use wardrobe::{resolve, EntityMap, HasImage, Piece, Reference, SlotType};
///
/// let tee = Piece::new("p1", "Blue Tee", SlotType::Top);
/// let map = EntityMap::from_items([tee]);
///
/// let by_id: Reference<Piece> = Reference::id("p1");
/// assert_eq!(resolve(&by_id, &map, &HasImage).unwrap().name, "Blue Tee");
///
/// let stale: Reference<Piece> = Reference::id("gone");
/// assert!(resolve(&stale, &map, &HasImage).is_none());
/// ```
pub fn resolve<'a, T, G>(reference: &'a Reference<T>, map: &'a EntityMap<T>, guard: &G) -> Option<&'a T>
where
    G: ShapeGuard<T> + ?Sized,
{
    match reference {
        Reference::Inline(entity) if guard.recognizes(entity) => Some(entity),
        Reference::Id(id) => {
            let found = map.get(id.as_str());
            if found.is_none() {
                debug!(id = %id, "dropping reference missing from entity map");
            }
            found
        }
        Reference::Inline(_) => {
            debug!("dropping inline reference rejected by shape guard");
            None
        }
        Reference::Unrecognized(_) => {
            debug!("dropping unrecognized reference");
            None
        }
    }
}

/// Resolves every reference, omitting the ones that do not resolve.
///
/// Output order follows input order.
pub fn resolve_all<'a, T, G>(references: &'a [Reference<T>], map: &'a EntityMap<T>, guard: &G) -> Vec<&'a T>
where
    G: ShapeGuard<T> + ?Sized,
{
    references
        .iter()
        .filter_map(|reference| resolve(reference, map, guard))
        .collect()
}
