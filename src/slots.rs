//! Outfit slot classification.
//!
//! An outfit renders as up to three rows: headwear, upper body (top and
//! outerwear), and lower body (bottom and footwear). Classification picks at
//! most one piece per slot and derives a layout tag from which rows are
//! occupied.
//!
//! Slotting is first-wins: when several pieces share a slot type, the first
//! in reference order occupies the slot and the rest are masked.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;
use crate::outfit::Outfit;
use crate::piece::{Piece, SlotType};
use crate::resolve::{resolve_all, EntityMap, HasImage};

/// Presentation layout derived from slot-row occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutTag {
    /// Headwear row only.
    HeadwearOnly,
    /// Headwear and upper rows.
    HeadwearPlusUpper,
    /// Headwear and lower rows.
    HeadwearPlusLower,
    /// Upper row only.
    UpperOnly,
    /// Lower row only.
    LowerOnly,
    /// Upper and lower rows, no headwear.
    FullNoHeadwear,
    /// Headwear, upper, and lower rows all occupied.
    AllRows,
    /// No slot occupied; the renderer shows a placeholder.
    Empty,
    /// All three rows occupied under [`FullOutfitLayout::PreserveGap`]:
    /// no layout class and no placeholder.
    Unclassified,
}

impl LayoutTag {
    /// Picks the layout for a row-occupancy pattern.
    ///
    /// Total over all eight combinations; `policy` only decides the
    /// all-three-rows case.
    #[must_use]
    pub const fn from_rows(has_headwear: bool, has_upper: bool, has_lower: bool, policy: FullOutfitLayout) -> Self {
        match (has_headwear, has_upper, has_lower) {
            (true, false, false) => Self::HeadwearOnly,
            (true, true, false) => Self::HeadwearPlusUpper,
            (true, false, true) => Self::HeadwearPlusLower,
            (false, true, false) => Self::UpperOnly,
            (false, false, true) => Self::LowerOnly,
            (false, true, true) => Self::FullNoHeadwear,
            (false, false, false) => Self::Empty,
            (true, true, true) => match policy {
                FullOutfitLayout::AllRows => Self::AllRows,
                FullOutfitLayout::PreserveGap => Self::Unclassified,
            },
        }
    }

    /// Wire name of the layout.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HeadwearOnly => "headwear-only",
            Self::HeadwearPlusUpper => "headwear-plus-upper",
            Self::HeadwearPlusLower => "headwear-plus-lower",
            Self::UpperOnly => "upper-only",
            Self::LowerOnly => "lower-only",
            Self::FullNoHeadwear => "full-no-headwear",
            Self::AllRows => "all-rows",
            Self::Empty => "empty",
            Self::Unclassified => "unclassified",
        }
    }

    /// Layout class for the renderer; `None` means no class is applied.
    #[must_use]
    pub const fn css_class(self) -> Option<&'static str> {
        match self {
            Self::Empty | Self::Unclassified => None,
            other => Some(other.as_str()),
        }
    }

    /// True when the renderer should show the empty-outfit placeholder.
    #[must_use]
    pub const fn shows_placeholder(self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for LayoutTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How to lay out an outfit that fills the headwear, upper, and lower rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FullOutfitLayout {
    /// Use the dedicated [`LayoutTag::AllRows`] layout.
    #[default]
    AllRows,
    /// Emit [`LayoutTag::Unclassified`], leaving the outfit without a layout class.
    PreserveGap,
}

impl FullOutfitLayout {
    /// Wire name of the policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllRows => "all-rows",
            Self::PreserveGap => "preserve-gap",
        }
    }
}

impl FromStr for FullOutfitLayout {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all-rows") {
            Ok(Self::AllRows)
        } else if s.eq_ignore_ascii_case("preserve-gap") {
            Ok(Self::PreserveGap)
        } else {
            Err(ValidationError::UnknownLayoutPolicy { value: s.to_string() })
        }
    }
}

impl TryFrom<String> for FullOutfitLayout {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FullOutfitLayout> for String {
    fn from(value: FullOutfitLayout) -> Self {
        value.as_str().to_string()
    }
}

/// At most one piece per slot type.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OutfitSlots<'a> {
    slots: [Option<&'a Piece>; 5],
}

impl<'a> OutfitSlots<'a> {
    /// Fills slots first-wins in iteration order.
    pub fn fill(pieces: impl IntoIterator<Item = &'a Piece>) -> Self {
        let mut slots: [Option<&'a Piece>; 5] = [None; 5];
        for piece in pieces {
            let slot = &mut slots[piece.slot_type.index()];
            if let Some(occupant) = *slot {
                debug!(
                    slot = %piece.slot_type,
                    kept = %occupant.id,
                    masked = %piece.id,
                    "slot already occupied, masking later piece"
                );
            } else {
                *slot = Some(piece);
            }
        }
        Self { slots }
    }

    /// The piece in `slot`, if any.
    #[must_use]
    pub const fn get(&self, slot: SlotType) -> Option<&'a Piece> {
        self.slots[slot.index()]
    }

    /// Slots in row order, occupied or not.
    pub fn iter(&self) -> impl Iterator<Item = (SlotType, Option<&'a Piece>)> + '_ {
        SlotType::ALL.into_iter().map(|slot| (slot, self.get(slot)))
    }

    /// Occupied slots in row order.
    pub fn occupied(&self) -> impl Iterator<Item = (SlotType, &'a Piece)> + '_ {
        self.iter().filter_map(|(slot, piece)| piece.map(|p| (slot, p)))
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// True when the headwear row is occupied.
    #[must_use]
    pub const fn has_headwear(&self) -> bool {
        self.get(SlotType::Headwear).is_some()
    }

    /// True when a top or outerwear piece is present.
    #[must_use]
    pub const fn has_upper(&self) -> bool {
        self.get(SlotType::Top).is_some() || self.get(SlotType::Outerwear).is_some()
    }

    /// True when a bottom or footwear piece is present.
    #[must_use]
    pub const fn has_lower(&self) -> bool {
        self.get(SlotType::Bottom).is_some() || self.get(SlotType::Footwear).is_some()
    }
}

/// Classification result: slot assignment plus layout tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutfitLayout<'a> {
    /// Piece per slot, first-wins.
    pub slots: OutfitSlots<'a>,
    /// Layout derived from row occupancy.
    pub layout: LayoutTag,
}

/// Classifies already-resolved pieces with the default layout policy.
///
/// # Examples
///
/// ```
/// use wardrobe::{classify, LayoutTag, Piece, SlotType};
///
/// let cap = Piece::new("a", "Cap", SlotType::Headwear);
/// let jeans = Piece::new("b", "Jeans", SlotType::Bottom);
/// let result = classify([&cap, &jeans]);
/// assert_eq!(result.layout, LayoutTag::HeadwearPlusLower);
/// ```
pub fn classify<'a>(pieces: impl IntoIterator<Item = &'a Piece>) -> OutfitLayout<'a> {
    classify_with(pieces, FullOutfitLayout::default())
}

/// Classifies already-resolved pieces under an explicit layout policy.
pub fn classify_with<'a>(pieces: impl IntoIterator<Item = &'a Piece>, policy: FullOutfitLayout) -> OutfitLayout<'a> {
    let slots = OutfitSlots::fill(pieces);
    let layout = LayoutTag::from_rows(slots.has_headwear(), slots.has_upper(), slots.has_lower(), policy);
    OutfitLayout { slots, layout }
}

/// Resolves an outfit's piece references, then classifies them.
///
/// Unresolvable references are dropped before slotting, so they never
/// occupy or mask a slot.
pub fn classify_outfit<'a>(outfit: &'a Outfit, pieces: &'a EntityMap<Piece>, policy: FullOutfitLayout) -> OutfitLayout<'a> {
    classify_with(resolve_all(&outfit.pieces, pieces, &HasImage), policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::Reference;

    fn piece(id: &str, slot: SlotType) -> Piece {
        Piece::new(id, id, slot).with_image(format!("{id}.png"))
    }

    #[test]
    fn test_layout_table_is_exhaustive() {
        let cases = [
            ((true, false, false), LayoutTag::HeadwearOnly),
            ((true, true, false), LayoutTag::HeadwearPlusUpper),
            ((true, false, true), LayoutTag::HeadwearPlusLower),
            ((false, true, false), LayoutTag::UpperOnly),
            ((false, false, true), LayoutTag::LowerOnly),
            ((false, true, true), LayoutTag::FullNoHeadwear),
            ((false, false, false), LayoutTag::Empty),
            ((true, true, true), LayoutTag::AllRows),
        ];
        for ((h, u, l), expected) in cases {
            assert_eq!(LayoutTag::from_rows(h, u, l, FullOutfitLayout::AllRows), expected);
        }
    }

    #[test]
    fn test_preserve_gap_policy() {
        let tag = LayoutTag::from_rows(true, true, true, FullOutfitLayout::PreserveGap);
        assert_eq!(tag, LayoutTag::Unclassified);
        assert_eq!(tag.css_class(), None);
        assert!(!tag.shows_placeholder());
    }

    #[test]
    fn test_policy_only_affects_full_case() {
        for h in [false, true] {
            for u in [false, true] {
                for l in [false, true] {
                    if h && u && l {
                        continue;
                    }
                    assert_eq!(
                        LayoutTag::from_rows(h, u, l, FullOutfitLayout::AllRows),
                        LayoutTag::from_rows(h, u, l, FullOutfitLayout::PreserveGap)
                    );
                }
            }
        }
    }

    #[test]
    fn test_empty_layout_shows_placeholder() {
        let result = classify(std::iter::empty());
        assert_eq!(result.layout, LayoutTag::Empty);
        assert!(result.layout.shows_placeholder());
        assert_eq!(result.layout.css_class(), None);
        assert_eq!(result.slots.occupied_count(), 0);
    }

    #[test]
    fn test_headwear_plus_bottom() {
        let a = piece("A", SlotType::Headwear);
        let b = piece("B", SlotType::Bottom);
        let result = classify([&a, &b]);
        assert!(result.slots.has_headwear());
        assert!(!result.slots.has_upper());
        assert!(result.slots.has_lower());
        assert_eq!(result.layout, LayoutTag::HeadwearPlusLower);
        assert_eq!(result.layout.css_class(), Some("headwear-plus-lower"));
    }

    #[test]
    fn test_first_piece_wins_slot() {
        let first = piece("t0", SlotType::Top);
        let shoes = piece("f1", SlotType::Footwear);
        let second = piece("t2", SlotType::Top);
        let result = classify([&first, &shoes, &second]);
        assert_eq!(result.slots.get(SlotType::Top).unwrap().id.as_str(), "t0");
        assert_eq!(result.slots.occupied_count(), 2);
    }

    #[test]
    fn test_outerwear_alone_counts_as_upper() {
        let coat = piece("c", SlotType::Outerwear);
        assert_eq!(classify([&coat]).layout, LayoutTag::UpperOnly);
    }

    #[test]
    fn test_footwear_alone_counts_as_lower() {
        let boots = piece("b", SlotType::Footwear);
        assert_eq!(classify([&boots]).layout, LayoutTag::LowerOnly);
    }

    #[test]
    fn test_occupied_in_row_order() {
        let shoes = piece("f", SlotType::Footwear);
        let hat = piece("h", SlotType::Headwear);
        let tee = piece("t", SlotType::Top);
        let result = classify([&shoes, &hat, &tee]);
        let order: Vec<SlotType> = result.slots.occupied().map(|(slot, _)| slot).collect();
        assert_eq!(order, vec![SlotType::Headwear, SlotType::Top, SlotType::Footwear]);
        assert_eq!(result.layout, LayoutTag::AllRows);
    }

    #[test]
    fn test_classify_outfit_drops_unresolved_before_slotting() {
        let map = EntityMap::from_items([piece("t1", SlotType::Top)]);
        let outfit = Outfit::new("o", "Look")
            .with_piece("ghost")
            .with_piece("t1")
            .with_piece(Reference::inline(piece("b1", SlotType::Bottom)));
        let result = classify_outfit(&outfit, &map, FullOutfitLayout::AllRows);
        assert_eq!(result.slots.get(SlotType::Top).unwrap().id.as_str(), "t1");
        assert_eq!(result.slots.get(SlotType::Bottom).unwrap().id.as_str(), "b1");
        assert_eq!(result.layout, LayoutTag::FullNoHeadwear);
    }

    #[test]
    fn test_layout_policy_parse() {
        assert_eq!("all-rows".parse::<FullOutfitLayout>().unwrap(), FullOutfitLayout::AllRows);
        assert_eq!("Preserve-Gap".parse::<FullOutfitLayout>().unwrap(), FullOutfitLayout::PreserveGap);
        assert!("merge".parse::<FullOutfitLayout>().is_err());
    }

    #[test]
    fn test_layout_tag_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&LayoutTag::FullNoHeadwear).unwrap(), "\"full-no-headwear\"");
        assert_eq!(serde_json::to_string(&LayoutTag::AllRows).unwrap(), "\"all-rows\"");
    }
}
