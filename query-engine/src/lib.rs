//! Incremental query orchestration for the storefront catalog.
//!
//! Turns a stream of user intents (free-text edits, filter and category
//! changes, pull-to-refresh, load-more) into a minimal, correctly ordered
//! set of catalog requests, and reconciles the responses into one
//! consistent result list even when requests race, arrive out of order,
//! or are superseded mid-flight.
//!
//! 1) **Debounced dispatch** – a text or filter edit schedules a delayed
//!    query; each new edit supersedes the pending timer entirely, so only
//!    the last intent of a burst ever reaches the network.
//! 2) **Generation sequencing** – every fresh dispatch stamps a new
//!    monotonic generation; responses from superseded generations are
//!    discarded (success or error) without touching state. Last
//!    dispatched wins, even when an earlier response arrives later.
//! 3) **Page accumulation** – accepted pages either replace the visible
//!    list (fresh query) or append to it (load more), deduplicating by
//!    item id and tracking exhaustion.
//! 4) **Normalization** – UI-facing filters and category lists become
//!    canonical wire parameters and a stable display ordering; sentinels
//!    ("all", relevance, empty text) are omitted, never forwarded.
//! 5) **Error classification** – transport failures fold into a small
//!    taxonomy (rate-limited / transport / unknown) the UI can present
//!    without ever unwinding already-displayed results.
//!
//! The engine uses `tracing` for debug logging and avoids `async-trait`
//! and heap trait objects; backend dispatch is enum-based and every state
//! mutation happens inside one serialized apply step.

pub mod accumulate;
pub mod classify;
pub mod debounce;
pub mod normalize;
pub mod orchestrator;
pub mod profiles;
pub mod shuffle;
pub mod state;

pub use accumulate::{ApplyMode, ResultSet};
pub use classify::{QueryError, QueryErrorKind, classify};
pub use debounce::Debouncer;
pub use normalize::{
    AllPosition, CategoryDisplay, FilterSet, QueryIntent, SortOrder, parse_price_range_label,
    to_category_display_list, to_item_query,
};
pub use orchestrator::{EngineConfig, QueryOrchestrator};
pub use shuffle::{ShuffleMode, shuffle_in_place};
pub use state::QuerySnapshot;
