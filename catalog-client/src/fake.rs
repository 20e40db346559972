//! In-memory catalog backend for tests and offline runs.
//!
//! Scriptable: queue per-call outcomes with optional delays to reproduce
//! slow, failing, or racing responses deterministically under virtual
//! time. Clones share the same scripted state, so a test can keep a handle
//! while the engine owns another.

use crate::errors::{CatalogError, CatalogResult};
use crate::types::{CategoryEntry, ItemPage, ItemQuery};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

/// Failure kinds a scripted call can produce.
#[derive(Debug, Clone, Copy)]
pub enum FakeFailure {
    RateLimited,
    Timeout,
    Server(u16),
}

impl FakeFailure {
    fn into_error(self) -> CatalogError {
        match self {
            FakeFailure::RateLimited => CatalogError::RateLimited {
                retry_after_secs: Some(30),
            },
            FakeFailure::Timeout => CatalogError::Timeout,
            FakeFailure::Server(code) => CatalogError::Server(code),
        }
    }
}

#[derive(Debug, Clone)]
struct ScriptedCall {
    delay: Duration,
    outcome: Result<ItemPage, FakeFailure>,
}

#[derive(Default)]
struct FakeState {
    item_calls: VecDeque<ScriptedCall>,
    categories: Vec<CategoryEntry>,
    category_failure: Option<FakeFailure>,
    seen_queries: Vec<ItemQuery>,
}

/// Cloneable handle over shared scripted state.
#[derive(Clone, Default)]
pub struct FakeCatalog {
    state: Arc<Mutex<FakeState>>,
    item_call_count: Arc<AtomicU64>,
    category_call_count: Arc<AtomicU64>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the next `search_items` outcome as a successful page.
    pub async fn push_page(&self, delay: Duration, page: ItemPage) {
        self.state.lock().await.item_calls.push_back(ScriptedCall {
            delay,
            outcome: Ok(page),
        });
    }

    /// Queues the next `search_items` outcome as a failure.
    pub async fn push_failure(&self, delay: Duration, failure: FakeFailure) {
        self.state.lock().await.item_calls.push_back(ScriptedCall {
            delay,
            outcome: Err(failure),
        });
    }

    /// Sets the category list served to every `list_categories` call.
    pub async fn set_categories(&self, categories: Vec<CategoryEntry>) {
        let mut state = self.state.lock().await;
        state.categories = categories;
        state.category_failure = None;
    }

    /// Makes every `list_categories` call fail until categories are set.
    pub async fn fail_categories(&self, failure: FakeFailure) {
        self.state.lock().await.category_failure = Some(failure);
    }

    pub fn item_call_count(&self) -> u64 {
        self.item_call_count.load(Ordering::Relaxed)
    }

    pub fn category_call_count(&self) -> u64 {
        self.category_call_count.load(Ordering::Relaxed)
    }

    /// Queries received so far, in arrival order.
    pub async fn seen_queries(&self) -> Vec<ItemQuery> {
        self.state.lock().await.seen_queries.clone()
    }

    pub(crate) async fn list_categories(&self) -> CatalogResult<Vec<CategoryEntry>> {
        self.category_call_count.fetch_add(1, Ordering::Relaxed);
        let state = self.state.lock().await;
        if let Some(failure) = state.category_failure {
            return Err(failure.into_error());
        }
        Ok(state.categories.clone())
    }

    pub(crate) async fn search_items(&self, query: &ItemQuery) -> CatalogResult<ItemPage> {
        self.item_call_count.fetch_add(1, Ordering::Relaxed);
        let call = {
            let mut state = self.state.lock().await;
            state.seen_queries.push(query.clone());
            state.item_calls.pop_front()
        };
        let Some(call) = call else {
            return Err(CatalogError::InvalidResponse(
                "no scripted response queued".to_string(),
            ));
        };
        if !call.delay.is_zero() {
            tokio::time::sleep(call.delay).await;
        }
        call.outcome.map_err(FakeFailure::into_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemQuery;

    #[tokio::test]
    async fn scripted_outcomes_pop_in_order() {
        let fake = FakeCatalog::new();
        fake.push_failure(Duration::ZERO, FakeFailure::Timeout).await;
        fake.push_page(
            Duration::ZERO,
            ItemPage {
                items: Vec::new(),
                page: 1,
                page_size: 10,
                total_items: 0,
                total_pages: 0,
            },
        )
        .await;

        let query = ItemQuery {
            page: 1,
            page_size: 10,
            ..ItemQuery::default()
        };
        assert!(matches!(
            fake.search_items(&query).await,
            Err(CatalogError::Timeout)
        ));
        assert!(fake.search_items(&query).await.is_ok());
        assert_eq!(fake.item_call_count(), 2);
        assert_eq!(fake.seen_queries().await.len(), 2);
    }

    #[tokio::test]
    async fn unscripted_call_reports_invalid_response() {
        let fake = FakeCatalog::new();
        let query = ItemQuery::default();
        assert!(matches!(
            fake.search_items(&query).await,
            Err(CatalogError::InvalidResponse(_))
        ));
    }
}
