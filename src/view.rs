//! Collection view queries: filter, then sort.
//!
//! A [`ViewQuery`] bundles the modes a grid screen offers (sort order,
//! ownership, kind, a name search, and a slot carousel) and runs them as one
//! pipeline over pieces, outfits, mixed collections, or a shelf.

use std::borrow::Borrow;
use std::str::FromStr;

use serde::Deserialize;

use crate::catalog::Catalog;
use crate::config::CatalogConfig;
use crate::error::{ValidationError, WardrobeResult};
use crate::filter::{
    filter_by_kind, filter_by_name, filter_by_ownership, filter_by_slot_type, filter_mixed_by_ownership,
    filter_mixed_by_slot_type, KindFilter, OwnershipFilter,
};
use crate::item::{AsMixed, HasKind};
use crate::membership::{resolve_shelf, ResolvedEntry};
use crate::outfit::Outfit;
use crate::piece::{Piece, SlotType};
use crate::shelf::Shelf;
use crate::slots::{FullOutfitLayout, OutfitLayout};
use crate::sort::{sort_items, SortKey, SortOrder};

/// Builder for a [`ViewQuery`].
///
/// Unset modes fall back to the seeding config, or to the defaults.
///
/// # Examples
///
/// ```
/// use wardrobe::{OwnershipFilter, SortOrder, ViewBuilder};
///
/// let query = ViewBuilder::new()
///     .order(SortOrder::Az)
///     .ownership(OwnershipFilter::Owned)
///     .name_query("tee")
///     .build();
/// assert_eq!(query.order, SortOrder::Az);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ViewBuilder {
    base: CatalogConfig,
    order: Option<SortOrder>,
    ownership: Option<OwnershipFilter>,
    kind: Option<KindFilter>,
    name_query: Option<String>,
    slot_type: Option<SlotType>,
}

impl ViewBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder whose unset modes come from `config`.
    #[must_use]
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            base: *config,
            ..Self::default()
        }
    }

    /// Sets the sort order.
    #[must_use]
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Sets the sort order from its wire name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownSortOrder`] for an unknown name.
    pub fn try_order(self, raw: &str) -> Result<Self, ValidationError> {
        Ok(self.order(raw.parse()?))
    }

    /// Sets the ownership filter.
    #[must_use]
    pub fn ownership(mut self, mode: OwnershipFilter) -> Self {
        self.ownership = Some(mode);
        self
    }

    /// Sets the ownership filter from its wire name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownOwnershipFilter`] for an unknown name.
    pub fn try_ownership(self, raw: &str) -> Result<Self, ValidationError> {
        Ok(self.ownership(raw.parse()?))
    }

    /// Sets the kind filter.
    #[must_use]
    pub fn kind(mut self, mode: KindFilter) -> Self {
        self.kind = Some(mode);
        self
    }

    /// Sets the kind filter from its wire name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownKindFilter`] for an unknown name.
    pub fn try_kind(self, raw: &str) -> Result<Self, ValidationError> {
        Ok(self.kind(raw.parse()?))
    }

    /// Case-insensitive name search; blank queries match everything.
    #[must_use]
    pub fn name_query(mut self, query: impl Into<String>) -> Self {
        self.name_query = Some(query.into());
        self
    }

    /// Restricts pieces to a single slot type.
    #[must_use]
    pub fn slot_type(mut self, slot: SlotType) -> Self {
        self.slot_type = Some(slot);
        self
    }

    /// Resolves unset modes from the base config.
    #[must_use]
    pub fn build(self) -> ViewQuery {
        ViewQuery {
            order: self.order.unwrap_or(self.base.default_sort),
            ownership: self.ownership.unwrap_or(self.base.default_ownership),
            kind: self.kind.unwrap_or(self.base.default_kind),
            name_query: self.name_query.filter(|q| !q.trim().is_empty()),
            slot_type: self.slot_type,
            layout: self.base.full_outfit_layout,
        }
    }
}

/// View modes as they arrive from a screen, before parsing.
///
/// Every field is optional. Absent or blank values fall back to the
/// catalog config.
///
/// # Examples
///
/// ```
/// use wardrobe::{CatalogConfig, SortOrder, ViewParams};
///
/// let params: ViewParams = serde_json::from_str(r#"{"sort": "az", "ownership": ""}"#).unwrap();
/// let query = params.into_query(&CatalogConfig::default()).unwrap();
/// assert_eq!(query.order, SortOrder::Az);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ViewParams {
    /// Sort order name.
    #[serde(alias = "order")]
    pub sort: Option<String>,
    /// Ownership filter name.
    pub ownership: Option<String>,
    /// Kind filter name.
    pub kind: Option<String>,
    /// Name search.
    #[serde(alias = "q")]
    pub query: Option<String>,
    /// Slot type name.
    #[serde(alias = "slotType")]
    pub slot: Option<String>,
}

impl ViewParams {
    /// Parses every mode and seeds unset ones from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`WardrobeError::Validation`](crate::WardrobeError::Validation)
    /// for the first unknown mode name.
    pub fn into_query(self, config: &CatalogConfig) -> WardrobeResult<ViewQuery> {
        let builder = ViewBuilder {
            order: parse_param(self.sort.as_deref())?,
            ownership: parse_param(self.ownership.as_deref())?,
            kind: parse_param(self.kind.as_deref())?,
            name_query: self.query,
            slot_type: parse_param(self.slot.as_deref())?,
            ..ViewBuilder::from_config(config)
        };
        Ok(builder.build())
    }
}

fn parse_param<T>(raw: Option<&str>) -> Result<Option<T>, ValidationError>
where
    T: FromStr<Err = ValidationError>,
{
    raw.map(str::trim).filter(|value| !value.is_empty()).map(str::parse).transpose()
}

/// A resolved set of view modes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    /// Sort order.
    pub order: SortOrder,
    /// Ownership filter for pieces.
    pub ownership: OwnershipFilter,
    /// Kind filter for mixed collections.
    pub kind: KindFilter,
    /// `None` when no search is active.
    pub name_query: Option<String>,
    /// Slot restriction for pieces, if any.
    pub slot_type: Option<SlotType>,
    /// Layout policy for outfits that fill every row.
    pub layout: FullOutfitLayout,
}

impl ViewQuery {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> ViewBuilder {
        ViewBuilder::new()
    }

    /// The query a screen opens with under `config`.
    #[must_use]
    pub fn from_config(config: &CatalogConfig) -> Self {
        ViewBuilder::from_config(config).build()
    }

    /// Loads a config document and applies screen params on top of it.
    ///
    /// # Errors
    ///
    /// Returns [`WardrobeError::Config`](crate::WardrobeError::Config) when the
    /// config fails to load, and
    /// [`WardrobeError::Validation`](crate::WardrobeError::Validation) when a
    /// param names an unknown mode.
    pub fn load(config_json: &str, params: ViewParams) -> WardrobeResult<Self> {
        let config = CatalogConfig::from_json_str(config_json)?;
        params.into_query(&config)
    }

    fn search<T: SortKey + Clone>(&self, items: Vec<T>) -> Vec<T> {
        match self.name_query.as_deref() {
            Some(query) => filter_by_name(&items, query),
            None => items,
        }
    }

    /// Filters pieces by ownership, slot, and name, then sorts.
    pub fn apply_pieces<T>(&self, pieces: &[T]) -> Vec<T>
    where
        T: Borrow<Piece> + SortKey + Clone,
    {
        let mut kept = filter_by_ownership(pieces, self.ownership);
        if let Some(slot) = self.slot_type {
            kept = filter_by_slot_type(&kept, slot);
        }
        sort_items(&self.search(kept), self.order)
    }

    /// Filters outfits by name, then sorts.
    ///
    /// Ownership and slot modes apply to pieces only.
    pub fn apply_outfits<T>(&self, outfits: &[T]) -> Vec<T>
    where
        T: Borrow<Outfit> + SortKey + Clone,
    {
        sort_items(&self.search(outfits.to_vec()), self.order)
    }

    /// Filters a mixed collection by kind, ownership, slot, and name, then
    /// sorts. Ownership and slot modes let outfits through.
    pub fn apply_mixed<T>(&self, items: &[T]) -> Vec<T>
    where
        T: AsMixed + HasKind + SortKey + Clone,
    {
        let mut kept = filter_by_kind(items, self.kind);
        kept = filter_mixed_by_ownership(&kept, self.ownership);
        if let Some(slot) = self.slot_type {
            kept = filter_mixed_by_slot_type(&kept, slot);
        }
        sort_items(&self.search(kept), self.order)
    }

    /// Resolves a shelf and runs the mixed pipeline over it.
    ///
    /// Time orders use each entry's effective membership timestamp.
    #[must_use]
    pub fn apply_shelf<'a>(&self, shelf: &'a Shelf, catalog: &'a Catalog) -> Vec<ResolvedEntry<'a>> {
        self.apply_mixed(&resolve_shelf(shelf, catalog))
    }

    /// Classifies an outfit under this query's layout policy.
    #[must_use]
    pub fn classify<'a>(&self, outfit: &'a Outfit, catalog: &'a Catalog) -> OutfitLayout<'a> {
        catalog.classify(outfit, self.layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::Identified;
    use crate::item::MixedItem;
    use crate::shelf::ShelfEntry;
    use crate::slots::LayoutTag;
    use pretty_assertions::assert_eq;

    fn pieces() -> Vec<Piece> {
        vec![
            Piece::new("tee", "Blue Tee", SlotType::Top)
                .with_owned(true)
                .with_image("tee.png")
                .with_created_at("2024-01-01"),
            Piece::new("jeans", "Jeans", SlotType::Bottom)
                .with_owned(false)
                .with_image("jeans.png")
                .with_created_at("2024-02-01"),
            Piece::new("tank", "Tank Top", SlotType::Top)
                .with_owned(true)
                .with_image("tank.png")
                .with_created_at("2024-03-01"),
            Piece::new("cap", "Cap", SlotType::Headwear)
                .with_image("cap.png")
                .with_created_at("2024-04-01"),
        ]
    }

    fn ids<T: Identified>(items: &[T]) -> Vec<&str> {
        items.iter().map(|item| item.id().as_str()).collect()
    }

    #[test]
    fn test_default_query() {
        let query = ViewBuilder::new().build();
        assert_eq!(query, ViewQuery::default());
        assert_eq!(ids(&query.apply_pieces(&pieces())), vec!["cap", "tank", "jeans", "tee"]);
    }

    #[test]
    fn test_piece_pipeline() {
        let query = ViewBuilder::new()
            .ownership(OwnershipFilter::Owned)
            .slot_type(SlotType::Top)
            .order(SortOrder::Az)
            .build();
        assert_eq!(ids(&query.apply_pieces(&pieces())), vec!["tee", "tank"]);
    }

    #[test]
    fn test_name_search() {
        let query = ViewBuilder::new().name_query("TOP").build();
        assert_eq!(ids(&query.apply_pieces(&pieces())), vec!["tank"]);
    }

    #[test]
    fn test_blank_search_is_inactive() {
        let query = ViewBuilder::new().name_query("   ").build();
        assert_eq!(query.name_query, None);
    }

    #[test]
    fn test_config_seeds_unset_modes() {
        let config = CatalogConfig {
            default_sort: SortOrder::Oldest,
            default_ownership: OwnershipFilter::Want,
            ..CatalogConfig::default()
        };
        let query = ViewBuilder::from_config(&config).order(SortOrder::Za).build();
        assert_eq!(query.order, SortOrder::Za);
        assert_eq!(query.ownership, OwnershipFilter::Want);
        assert_eq!(ViewQuery::from_config(&config).order, SortOrder::Oldest);
    }

    #[test]
    fn test_try_setters() {
        let query = ViewBuilder::new()
            .try_order("za")
            .and_then(|b| b.try_ownership("want"))
            .and_then(|b| b.try_kind("outfits"))
            .unwrap()
            .build();
        assert_eq!(query.order, SortOrder::Za);
        assert_eq!(query.ownership, OwnershipFilter::Want);
        assert_eq!(query.kind, KindFilter::Outfits);

        assert!(ViewBuilder::new().try_order("sideways").is_err());
    }

    #[test]
    fn test_params_parse_into_query() {
        let params: ViewParams =
            serde_json::from_str(r#"{"order": "OLDEST", "kind": "pieces", "q": "tee", "slotType": "top"}"#).unwrap();
        let query = params.into_query(&CatalogConfig::default()).unwrap();
        assert_eq!(query.order, SortOrder::Oldest);
        assert_eq!(query.kind, KindFilter::Pieces);
        assert_eq!(query.name_query.as_deref(), Some("tee"));
        assert_eq!(query.slot_type, Some(SlotType::Top));
        assert_eq!(ids(&query.apply_pieces(&pieces())), vec!["tee"]);
    }

    #[test]
    fn test_blank_params_fall_back_to_config() {
        let config = CatalogConfig::default().with_default_sort(SortOrder::Za);
        let params = ViewParams {
            sort: Some("  ".to_string()),
            ownership: Some(String::new()),
            ..ViewParams::default()
        };
        assert_eq!(params.into_query(&config).unwrap(), ViewQuery::from_config(&config));
    }

    #[test]
    fn test_unknown_param_is_validation_error() {
        let params = ViewParams {
            slot: Some("gloves".to_string()),
            ..ViewParams::default()
        };
        let err = params.into_query(&CatalogConfig::default()).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("gloves"));
    }

    #[test]
    fn test_load_reports_config_and_param_errors() {
        let query = ViewQuery::load(r#"{"defaultSort": "az"}"#, ViewParams::default()).unwrap();
        assert_eq!(query.order, SortOrder::Az);

        let err = ViewQuery::load(r#"{"defaultSort": "sideways"}"#, ViewParams::default()).unwrap_err();
        assert!(err.is_config());

        let err = ViewQuery::load("not json", ViewParams::default()).unwrap_err();
        assert!(err.is_config());

        let params = ViewParams {
            kind: Some("shoes".to_string()),
            ..ViewParams::default()
        };
        assert!(ViewQuery::load("{}", params).unwrap_err().is_validation());
    }

    #[test]
    fn test_outfits_ignore_piece_modes() {
        let outfits = vec![
            Outfit::new("o1", "Weekend").with_created_at("2024-01-01"),
            Outfit::new("o2", "Office").with_created_at("2024-02-01"),
        ];
        let query = ViewBuilder::new()
            .ownership(OwnershipFilter::Owned)
            .slot_type(SlotType::Footwear)
            .build();
        assert_eq!(ids(&query.apply_outfits(&outfits)), vec!["o2", "o1"]);
    }

    #[test]
    fn test_mixed_pipeline() {
        let mut items: Vec<MixedItem> = pieces().into_iter().map(MixedItem::from).collect();
        items.push(MixedItem::from(Outfit::new("look", "Blue Look").with_created_at("2024-05-01")));

        let query = ViewBuilder::new().ownership(OwnershipFilter::Owned).build();
        assert_eq!(ids(&query.apply_mixed(&items)), vec!["look", "tank", "tee"]);

        let query = ViewBuilder::new().kind(KindFilter::Pieces).name_query("blue").build();
        assert_eq!(ids(&query.apply_mixed(&items)), vec!["tee"]);
    }

    #[test]
    fn test_shelf_pipeline() {
        let catalog = Catalog::new(pieces(), [Outfit::new("look", "Look").with_created_at("2024-05-01")]);
        let shelf = Shelf::new("s", "Faves")
            .with_entry(ShelfEntry::piece("tee").with_added_at("2024-06-01"))
            .with_entry(ShelfEntry::piece("jeans"))
            .with_entry(ShelfEntry::outfit("look"))
            .with_entry(ShelfEntry::piece("missing"));

        let query = ViewQuery::default();
        assert_eq!(ids(&query.apply_shelf(&shelf, &catalog)), vec!["tee", "look", "jeans"]);

        let query = ViewBuilder::new().kind(KindFilter::Pieces).order(SortOrder::Oldest).build();
        assert_eq!(ids(&query.apply_shelf(&shelf, &catalog)), vec!["jeans", "tee"]);
    }

    #[test]
    fn test_classify_uses_layout_policy() {
        let catalog = Catalog::new(
            pieces(),
            [Outfit::new("full", "Full")
                .with_piece("cap")
                .with_piece("tee")
                .with_piece("jeans")],
        );
        let outfit = catalog.outfits().get("full").unwrap();
        let config = CatalogConfig::default().with_full_outfit_layout(FullOutfitLayout::PreserveGap);
        assert_eq!(ViewQuery::default().classify(outfit, &catalog).layout, LayoutTag::AllRows);
        assert_eq!(
            ViewQuery::from_config(&config).classify(outfit, &catalog).layout,
            LayoutTag::Unclassified
        );
    }
}
