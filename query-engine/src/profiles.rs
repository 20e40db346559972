//! Call-site presets over the engine configuration.
//!
//! Two screens drive the same engine with different knobs; nothing here
//! is hard-coded inside the engine itself.

use crate::normalize::AllPosition;
use crate::orchestrator::{EngineConfig, QueryOrchestrator};
use crate::shuffle::ShuffleMode;
use catalog_client::CatalogBackend;
use std::time::Duration;

/// Dedicated search screen: "All" appended last, no shuffle.
pub fn search_screen(backend: CatalogBackend) -> QueryOrchestrator {
    QueryOrchestrator::new(
        backend,
        EngineConfig {
            text_debounce: Duration::from_millis(800),
            filter_debounce: Duration::from_millis(600),
            page_size: 10,
            all_position: AllPosition::Last,
            shuffle: ShuffleMode::Off,
        },
    )
}

/// Home feed ("load more popular"): "All" first, shuffled first page.
pub fn home_feed(backend: CatalogBackend, shuffle: ShuffleMode) -> QueryOrchestrator {
    QueryOrchestrator::new(
        backend,
        EngineConfig {
            text_debounce: Duration::from_millis(800),
            filter_debounce: Duration::from_millis(600),
            page_size: 10,
            all_position: AllPosition::First,
            shuffle,
        },
    )
}
