//! Backend facade w/o async-trait or dynamic trait objects.
//!
//! An enum with concrete implementations per backend keeps async fns
//! simple and avoids boxing futures.

use crate::client::CatalogHttpClient;
use crate::errors::CatalogResult;
use crate::fake::FakeCatalog;
use crate::types::{CategoryEntry, ItemPage, ItemQuery};

/// Concrete catalog backend (enum-dispatch).
#[derive(Clone)]
pub enum CatalogBackend {
    Http(CatalogHttpClient),
    Fake(FakeCatalog),
}

impl CatalogBackend {
    /// Fetch the raw category list.
    pub async fn list_categories(&self) -> CatalogResult<Vec<CategoryEntry>> {
        match self {
            Self::Http(c) => c.list_categories().await,
            Self::Fake(c) => c.list_categories().await,
        }
    }

    /// Fetch one page of catalog items for canonical wire parameters.
    pub async fn search_items(&self, query: &ItemQuery) -> CatalogResult<ItemPage> {
        match self {
            Self::Http(c) => c.search_items(query).await,
            Self::Fake(c) => c.search_items(query).await,
        }
    }
}
