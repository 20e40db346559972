//! Normalized data model for the storefront catalog.
//!
//! These types are the "normalized output" of the client; raw response
//! shapes stay private to the transport layer and are mapped into these
//! structs before anything downstream sees them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel category id meaning "no category constraint".
///
/// Exists only on the UI side of the boundary; it is never forwarded to
/// the backend as a literal value.
pub const ALL_CATEGORY_ID: &str = "all";

/// A single purchasable item as displayed in feeds and search results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    /// Unit price in cents; keeps money out of float arithmetic.
    pub price_cents: i64,
    pub image_url: Option<String>,
    pub category_id: Option<String>,
    /// Backend popularity score driving the "popular" feed ordering.
    pub popularity: Option<f32>,
    pub created_at: Option<DateTime<Utc>>,
}

/// A catalog category as served by `GET /categories`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryEntry {
    pub id: String,
    pub name: String,
    pub sort_order: i32,
    /// Principal categories get priority placement in display ordering.
    pub is_principal: bool,
}

/// One page of catalog items plus its pagination envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemPage {
    pub items: Vec<CatalogItem>,
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

/// Canonical wire parameters for `GET /catalog-items`.
///
/// Built exclusively by the query normalizer. Optional fields are omitted
/// from the outgoing request entirely rather than sent as sentinel
/// literals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemQuery {
    pub text: Option<String>,
    pub category_id: Option<String>,
    pub price_min: Option<u32>,
    pub price_max: Option<u32>,
    pub sort: Option<&'static str>,
    pub page: u32,
    pub page_size: u32,
}

impl ItemQuery {
    /// Renders the populated fields as query pairs for the HTTP layer.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(7);
        if let Some(text) = &self.text {
            pairs.push(("text", text.clone()));
        }
        if let Some(id) = &self.category_id {
            pairs.push(("categoryId", id.clone()));
        }
        if let Some(min) = self.price_min {
            pairs.push(("priceMin", min.to_string()));
        }
        if let Some(max) = self.price_max {
            pairs.push(("priceMax", max.to_string()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.to_string()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("pageSize", self.page_size.to_string()));
        pairs
    }
}
