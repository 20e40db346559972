//! Single source of truth consumed by the UI collaborator.
//!
//! All mutation flows through `StateCell::apply`, which runs one
//! serialized step and publishes the resulting snapshot over a watch
//! channel. No two apply steps interleave their effects.

use crate::accumulate::ResultSet;
use crate::classify::QueryError;
use crate::normalize::{CategoryDisplay, FilterSet};
use std::sync::{Mutex, PoisonError};
use tokio::sync::watch;

/// Immutable view published to the UI after every apply step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySnapshot {
    pub text: String,
    pub filters: FilterSet,
    pub results: ResultSet,
    /// A fresh query is in flight.
    pub loading: bool,
    /// A user-initiated refresh is in flight.
    pub refreshing: bool,
    /// An append is in flight.
    pub loading_more: bool,
    pub error: Option<QueryError>,
}

/// Live mutable state; mutated only inside one serialized apply step.
#[derive(Debug, Default)]
pub(crate) struct QueryState {
    pub text: String,
    pub filters: FilterSet,
    pub results: ResultSet,
    pub loading: bool,
    pub refreshing: bool,
    pub loading_more: bool,
    pub error: Option<QueryError>,
    pub categories: Option<CategoryDisplay>,
}

impl QueryState {
    pub fn snapshot(&self) -> QuerySnapshot {
        QuerySnapshot {
            text: self.text.clone(),
            filters: self.filters.clone(),
            results: self.results.clone(),
            loading: self.loading,
            refreshing: self.refreshing,
            loading_more: self.loading_more,
            error: self.error.clone(),
        }
    }

    /// A load-more is allowed only when nothing else is in flight and the
    /// current set is not exhausted.
    pub fn can_load_more(&self) -> bool {
        self.results.has_more && !self.loading && !self.refreshing && !self.loading_more
    }
}

pub(crate) struct StateCell {
    state: Mutex<QueryState>,
    tx: watch::Sender<QuerySnapshot>,
}

impl StateCell {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(QuerySnapshot::default());
        Self {
            state: Mutex::new(QueryState::default()),
            tx,
        }
    }

    /// Runs one serialized apply step and publishes the snapshot.
    pub fn apply<R>(&self, f: impl FnOnce(&mut QueryState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let out = f(&mut state);
        let _ = self.tx.send(state.snapshot());
        out
    }

    pub fn read<R>(&self, f: impl FnOnce(&QueryState) -> R) -> R {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    pub fn subscribe(&self) -> watch::Receiver<QuerySnapshot> {
        self.tx.subscribe()
    }
}
