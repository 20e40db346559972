//! The orchestration core: generation sequencing, dispatch, and the
//! explicit mutation entry points.
//!
//! All UI-driven mutation goes through the entry points below; there is no
//! effect-style refetching. Every fresh dispatch stamps a new generation
//! before its network call; a completion whose generation is no longer
//! current is discarded wholesale, success or error. That discard is the
//! only cancellation mechanism; superseded transport calls are left to
//! resolve on their own.

use crate::accumulate::ApplyMode;
use crate::classify::classify;
use crate::debounce::Debouncer;
use crate::normalize::{
    AllPosition, CategoryDisplay, FilterSet, QueryIntent, SortOrder, to_category_display_list,
    to_item_query,
};
use crate::shuffle::{ShuffleMode, rng_for, shuffle_in_place};
use crate::state::{QuerySnapshot, StateCell};
use catalog_client::CatalogBackend;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::{debug, warn};

/// Engine knobs. Both call sites tune these; nothing is hard-wired.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Debounce for free-text edits.
    pub text_debounce: Duration,
    /// Debounce for filter and category edits.
    pub filter_debounce: Duration,
    pub page_size: u32,
    /// Placement of the synthetic "All" category entry.
    pub all_position: AllPosition,
    /// Presentational shuffle of a fresh first page, if any.
    pub shuffle: ShuffleMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            text_debounce: Duration::from_millis(800),
            filter_debounce: Duration::from_millis(600),
            page_size: 10,
            all_position: AllPosition::Last,
            shuffle: ShuffleMode::Off,
        }
    }
}

struct OrchestratorInner {
    backend: CatalogBackend,
    config: EngineConfig,
    generation: AtomicU64,
    cell: StateCell,
    debounce: Mutex<Debouncer>,
}

/// The query orchestrator. Construct once per screen, clone freely; clones
/// share the same state, debouncer, and generation counter.
#[derive(Clone)]
pub struct QueryOrchestrator {
    inner: Arc<OrchestratorInner>,
}

impl QueryOrchestrator {
    pub fn new(backend: CatalogBackend, config: EngineConfig) -> Self {
        Self {
            inner: Arc::new(OrchestratorInner {
                backend,
                config,
                generation: AtomicU64::new(0),
                cell: StateCell::new(),
                debounce: Mutex::new(Debouncer::new()),
            }),
        }
    }

    /// Watch-channel view of the state store; a snapshot is published
    /// after every apply step.
    pub fn subscribe(&self) -> watch::Receiver<QuerySnapshot> {
        self.inner.cell.subscribe()
    }

    pub fn snapshot(&self) -> QuerySnapshot {
        self.inner.cell.read(|s| s.snapshot())
    }

    /// Updates the free text and schedules a debounced fresh query.
    ///
    /// An empty text with no active filters is still a valid intent: it
    /// requests the unfiltered catalog.
    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        let intent = self.inner.cell.apply(|s| {
            s.text = text;
            QueryIntent {
                text: s.text.clone(),
                filters: s.filters.clone(),
            }
        });
        self.schedule_fresh(intent, self.inner.config.text_debounce);
    }

    /// Replaces the whole filter selection and schedules a debounced
    /// fresh query.
    pub fn set_filters(&self, filters: FilterSet) {
        let intent = self.inner.cell.apply(|s| {
            s.filters = filters;
            QueryIntent {
                text: s.text.clone(),
                filters: s.filters.clone(),
            }
        });
        self.schedule_fresh(intent, self.inner.config.filter_debounce);
    }

    /// Selects a category (the "all" sentinel clears the constraint).
    pub fn set_category(&self, category_id: impl Into<String>) {
        let category_id = category_id.into();
        let intent = self.inner.cell.apply(|s| {
            s.filters.category_id = Some(category_id);
            QueryIntent {
                text: s.text.clone(),
                filters: s.filters.clone(),
            }
        });
        self.schedule_fresh(intent, self.inner.config.filter_debounce);
    }

    /// Selects a sort order.
    pub fn set_sort(&self, sort: SortOrder) {
        let intent = self.inner.cell.apply(|s| {
            s.filters.sort = sort;
            QueryIntent {
                text: s.text.clone(),
                filters: s.filters.clone(),
            }
        });
        self.schedule_fresh(intent, self.inner.config.filter_debounce);
    }

    /// Immediate fresh dispatch for initial mount and retry affordances.
    /// Cancels any pending debounced dispatch; this one supersedes it.
    pub fn load(&self) {
        self.dispatch_now(false);
    }

    /// Immediate fresh dispatch for user-initiated pull-to-refresh.
    pub fn refresh(&self) {
        self.dispatch_now(true);
    }

    /// Current generation; responses stamped with an older one are inert.
    pub fn current_generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }

    fn dispatch_now(&self, refreshing: bool) {
        self.inner
            .debounce
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cancel();
        let intent = self.inner.cell.read(|s| QueryIntent {
            text: s.text.clone(),
            filters: s.filters.clone(),
        });
        let this = self.clone();
        tokio::spawn(async move { this.run_fresh(intent, refreshing).await });
    }

    /// Requests the next page. Rejected while anything is in flight or
    /// the current set is exhausted.
    pub fn load_more(&self) {
        let this = self.clone();
        tokio::spawn(async move { this.run_load_more().await });
    }

    /// Returns the session-cached category display list, fetching it on
    /// first use.
    pub async fn categories(&self) -> CategoryDisplay {
        if let Some(cached) = self.inner.cell.read(|s| s.categories.clone()) {
            return cached;
        }
        self.refresh_categories().await
    }

    /// Re-fetches categories and rebuilds the display list.
    ///
    /// An empty or failing source degrades to the single synthetic "All"
    /// entry; the screen keeps rendering either way.
    pub async fn refresh_categories(&self) -> CategoryDisplay {
        let raw = match self.inner.backend.list_categories().await {
            Ok(raw) => raw,
            Err(err) => {
                let classified = classify(&err);
                warn!(kind = ?classified.kind, "categories: fetch failed, degrading to synthetic list");
                Vec::new()
            }
        };
        let display = to_category_display_list(&raw, self.inner.config.all_position);
        self.inner.cell.apply(|s| s.categories = Some(display.clone()));
        display
    }

    fn schedule_fresh(&self, intent: QueryIntent, delay: Duration) {
        let this = self.clone();
        self.inner
            .debounce
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .schedule(delay, async move { this.run_fresh(intent, false).await });
    }

    async fn run_fresh(&self, intent: QueryIntent, refreshing: bool) {
        let inner = &self.inner;
        let generation = inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, text = %intent.text, refreshing, "dispatch: fresh query");
        inner.cell.apply(|s| {
            s.loading = !refreshing;
            s.refreshing = refreshing;
            s.error = None;
        });

        let query = to_item_query(&intent, 1, inner.config.page_size);
        let started = Instant::now();
        let outcome = inner.backend.search_items(&query).await;

        inner.cell.apply(|s| {
            if inner.generation.load(Ordering::SeqCst) != generation {
                debug!(generation, "dispatch: stale fresh response discarded");
                return;
            }
            s.loading = false;
            s.refreshing = false;
            match outcome {
                Ok(mut page) => {
                    if let Some(mut rng) = rng_for(inner.config.shuffle) {
                        shuffle_in_place(&mut page.items, &mut rng);
                    }
                    s.results.apply(page, ApplyMode::Replace);
                    debug!(
                        generation,
                        items = s.results.items.len(),
                        has_more = s.results.has_more,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "dispatch: fresh page applied"
                    );
                }
                Err(err) => {
                    let classified = classify(&err);
                    warn!(generation, kind = ?classified.kind, "dispatch: fresh query failed");
                    s.results.clear();
                    s.error = Some(classified);
                }
            }
        });
    }

    async fn run_load_more(&self) {
        let inner = &self.inner;
        let generation = inner.generation.load(Ordering::SeqCst);
        let claimed = inner.cell.apply(|s| {
            if !s.can_load_more() {
                return None;
            }
            s.loading_more = true;
            s.error = None;
            Some((
                QueryIntent {
                    text: s.text.clone(),
                    filters: s.filters.clone(),
                },
                s.results.page + 1,
            ))
        });
        let Some((intent, next_page)) = claimed else {
            debug!("load_more: rejected (busy or exhausted)");
            return;
        };
        debug!(generation, page = next_page, "dispatch: load more");

        let query = to_item_query(&intent, next_page, inner.config.page_size);
        let outcome = inner.backend.search_items(&query).await;

        inner.cell.apply(|s| {
            s.loading_more = false;
            if inner.generation.load(Ordering::SeqCst) != generation {
                debug!(generation, "load_more: stale response discarded");
                return;
            }
            match outcome {
                Ok(page) => {
                    s.results.apply(page, ApplyMode::Append);
                    debug!(
                        generation,
                        items = s.results.items.len(),
                        has_more = s.results.has_more,
                        "load_more: page appended"
                    );
                }
                Err(err) => {
                    // A failed append never shrinks the visible list.
                    let classified = classify(&err);
                    warn!(generation, kind = ?classified.kind, "load_more: failed");
                    s.error = Some(classified);
                }
            }
        });
    }
}
