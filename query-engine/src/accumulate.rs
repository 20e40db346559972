//! Page accumulation: replace/append with duplicate and exhaustion tracking.

use catalog_client::{CatalogItem, ItemPage};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How an accepted page folds into the visible result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    /// Discard the prior items and install the page as the new baseline.
    Replace,
    /// Extend the current list with the next page.
    Append,
}

/// The accumulated, currently visible slice of the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResultSet {
    pub items: Vec<CatalogItem>,
    /// Last applied page number; 0 before anything was accepted.
    pub page: u32,
    pub total_items: u64,
    pub has_more: bool,
}

impl ResultSet {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Folds one accepted page into the set.
    ///
    /// `Append` is a no-op when the page is not beyond the last applied
    /// one, so re-applying the same page never duplicates entries. Items
    /// whose id is already present are skipped; the set holds no duplicate
    /// ids. Exhaustion is recomputed from the page's `total_pages` on
    /// every apply.
    pub fn apply(&mut self, page: ItemPage, mode: ApplyMode) {
        if mode == ApplyMode::Append && page.page <= self.page {
            return;
        }
        if mode == ApplyMode::Replace {
            self.items.clear();
        }
        let mut seen: HashSet<String> = self.items.iter().map(|i| i.id.clone()).collect();
        for item in page.items {
            if seen.insert(item.id.clone()) {
                self.items.push(item);
            }
        }
        self.page = page.page;
        self.total_items = page.total_items;
        self.has_more = page.page < page.total_pages;
    }
}
