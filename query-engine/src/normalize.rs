//! Canonicalization of UI-facing filters and category lists.
//!
//! UI labels and selections become backend wire parameters here, and raw
//! category lists become the stable display ordering. Sentinel values
//! ("all", relevance, empty text) are omitted from outgoing requests, never
//! forwarded as literals.

use catalog_client::{ALL_CATEGORY_ID, CategoryEntry, ItemQuery};
use serde::{Deserialize, Serialize};

/// Sort orders selectable in the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    Popularity,
    NameAsc,
    NameDesc,
}

impl SortOrder {
    /// Backend token; `None` for the relevance sentinel.
    pub fn as_param(self) -> Option<&'static str> {
        match self {
            SortOrder::Relevance => None,
            SortOrder::PriceAsc => Some("price_asc"),
            SortOrder::PriceDesc => Some("price_desc"),
            SortOrder::Popularity => Some("popularity"),
            SortOrder::NameAsc => Some("name_asc"),
            SortOrder::NameDesc => Some("name_desc"),
        }
    }

    /// Maps a UI sort label to its order; unrecognized labels fall back to
    /// relevance (and are therefore omitted from the request).
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "price: low to high" | "lowest price" | "price_asc" => SortOrder::PriceAsc,
            "price: high to low" | "highest price" | "price_desc" => SortOrder::PriceDesc,
            "most popular" | "popularity" => SortOrder::Popularity,
            "name a-z" | "name_asc" => SortOrder::NameAsc,
            "name z-a" | "name_desc" => SortOrder::NameDesc,
            _ => SortOrder::Relevance,
        }
    }
}

/// Active filter selection as held by the UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    pub category_id: Option<String>,
    pub price_min: Option<u32>,
    pub price_max: Option<u32>,
    pub sort: SortOrder,
}

/// A user intent snapshot taken when a dispatch is scheduled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryIntent {
    pub text: String,
    pub filters: FilterSet,
}

/// Builds canonical wire parameters from an intent.
///
/// An intent with nothing set is still a valid query for the unfiltered
/// catalog; it carries only the page window.
pub fn to_item_query(intent: &QueryIntent, page: u32, page_size: u32) -> ItemQuery {
    let text = intent.text.trim();
    ItemQuery {
        text: (!text.is_empty()).then(|| text.to_string()),
        category_id: intent
            .filters
            .category_id
            .as_deref()
            .filter(|id| !id.is_empty() && *id != ALL_CATEGORY_ID)
            .map(str::to_string),
        price_min: intent.filters.price_min,
        price_max: intent.filters.price_max,
        sort: intent.filters.sort.as_param(),
        page,
        page_size,
    }
}

/// Parses a UI price-range label like "R$10–25" into numeric bounds.
///
/// Accepts an optional currency prefix on either bound and a hyphen or
/// en-dash separator. Unrecognized labels yield `None` and are omitted
/// from the request.
pub fn parse_price_range_label(label: &str) -> Option<(u32, u32)> {
    let cleaned = label.trim();
    let (lo, hi) = cleaned.split_once(['–', '-'])?;
    let lo: u32 = strip_currency(lo).parse().ok()?;
    let hi: u32 = strip_currency(hi).parse().ok()?;
    (lo <= hi).then_some((lo, hi))
}

fn strip_currency(part: &str) -> &str {
    part.trim().trim_start_matches("R$").trim()
}

/// Where the synthetic "All" entry is placed in the display list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllPosition {
    First,
    Last,
}

/// Normalized category list plus a recoverable-degradation signal.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDisplay {
    pub entries: Vec<CategoryEntry>,
    /// True when the upstream source yielded nothing and only the
    /// synthetic "All" entry is shown.
    pub degraded: bool,
}

fn synthetic_all() -> CategoryEntry {
    CategoryEntry {
        id: ALL_CATEGORY_ID.to_string(),
        name: "All".to_string(),
        sort_order: 0,
        is_principal: false,
    }
}

/// Builds the canonical display ordering: principal categories by
/// `(sort_order, name)`, then the rest the same way, then exactly one
/// synthetic "All" entry at the configured position.
///
/// Zero upstream entries still yield the single-entry "All" list; the
/// screen keeps rendering either way.
pub fn to_category_display_list(
    raw: &[CategoryEntry],
    all_position: AllPosition,
) -> CategoryDisplay {
    let degraded = raw.is_empty();
    let mut principal: Vec<CategoryEntry> =
        raw.iter().filter(|c| c.is_principal).cloned().collect();
    let mut secondary: Vec<CategoryEntry> =
        raw.iter().filter(|c| !c.is_principal).cloned().collect();
    let key = |c: &CategoryEntry| (c.sort_order, c.name.clone());
    principal.sort_by_key(key);
    secondary.sort_by_key(key);

    let mut entries = Vec::with_capacity(raw.len() + 1);
    if all_position == AllPosition::First {
        entries.push(synthetic_all());
    }
    entries.extend(principal);
    entries.extend(secondary);
    if all_position == AllPosition::Last {
        entries.push(synthetic_all());
    }
    CategoryDisplay { entries, degraded }
}
